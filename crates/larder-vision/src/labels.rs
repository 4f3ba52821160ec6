use std::collections::HashMap;
use std::sync::LazyLock;

static LABELS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("tomato", "tomato"),
        ("tomatoes", "tomato"),
        ("onion", "onion"),
        ("onions", "onion"),
        ("garlic", "garlic"),
        ("chicken", "chicken"),
        ("beef", "beef"),
        ("pork", "pork"),
        ("fish", "fish"),
        ("salmon", "salmon"),
        ("tuna", "tuna"),
        ("cheese", "cheese"),
        ("milk", "milk"),
        ("egg", "egg"),
        ("eggs", "egg"),
        ("bread", "bread"),
        ("rice", "rice"),
        ("pasta", "pasta"),
        ("potato", "potato"),
        ("potatoes", "potato"),
        ("carrot", "carrot"),
        ("carrots", "carrot"),
        ("bell pepper", "bell pepper"),
        ("pepper", "bell pepper"),
        ("mushroom", "mushroom"),
        ("mushrooms", "mushroom"),
        ("spinach", "spinach"),
        ("lettuce", "lettuce"),
        ("cucumber", "cucumber"),
        ("avocado", "avocado"),
        ("lemon", "lemon"),
        ("lime", "lime"),
        ("apple", "apple"),
        ("banana", "banana"),
        ("orange", "orange"),
        ("broccoli", "broccoli"),
        ("cauliflower", "cauliflower"),
        ("zucchini", "zucchini"),
        ("eggplant", "eggplant"),
        ("corn", "corn"),
        ("beans", "beans"),
        ("peas", "peas"),
    ])
});

/// Canonical ingredient for a recognition label, if the label is known.
pub fn map_label(label: &str) -> Option<&'static str> { LABELS.get(label.trim().to_lowercase().as_str()).copied() }
