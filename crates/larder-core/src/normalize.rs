//! Ingredient normalization.
//!
//! Turns authored or detected ingredient phrases ("2% low-fat milk",
//! "1/2 cup chopped onion") into the canonical lowercase token used for
//! matching and deduplication ("milk", "onion").

/// Measurement words dropped from the front of an ingredient phrase.
const UNITS: &[&str] = &[
    "cup", "cups", "c",
    "tbsp", "tsp", "tablespoon", "tablespoons", "teaspoon", "teaspoons",
    "oz", "ounce", "ounces", "lb", "lbs", "pound", "pounds",
    "gram", "grams", "g", "kg", "kilogram", "kilograms",
    "ml", "milliliter", "milliliters", "liter", "liters", "l",
    "pint", "pints", "pt", "quart", "quarts", "qt", "gallon", "gallons", "gal",
    "inch", "inches", "cm", "centimeter", "centimeters",
];

/// Leading words that describe an ingredient rather than name it.
const DESCRIPTORS: &[&str] = &[
    "of", "the", "and", "or", "with", "without", "plus", "extra",
    "fresh", "dried", "frozen", "canned", "bottled", "packaged",
    "chopped", "sliced", "diced", "minced", "grated", "shredded",
    "cooked", "uncooked", "raw", "prepared", "ready",
    "low-fat", "non-fat", "fat-free", "sugar-free", "salt-free",
    "organic", "natural", "pure", "whole", "reduced",
];

/// Normalize a raw ingredient phrase into its canonical form.
///
/// Never fails: when cleaning leaves fewer than two characters the trimmed
/// input is returned unchanged, so short names like "ox" survive.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let lowered = trimmed.to_lowercase();

    let rest = strip_leading_nonalpha(strip_leading_quantity(&lowered));

    let mut words: Vec<&str> = rest.split_whitespace().collect();
    let quantity_words = words.iter().take_while(|w| is_quantity_or_unit(w)).count();
    words.drain(..quantity_words);

    let joined = words.join(" ");
    let mut words: Vec<&str> = strip_leading_nonalpha(&joined).split_whitespace().collect();
    while words.len() > 1 && DESCRIPTORS.contains(&words[0]) {
        words.remove(0);
    }

    let cleaned = words.join(" ");
    if cleaned.chars().count() < 2 {
        return trimmed.to_string();
    }
    cleaned
}

/// Drop a leading run of digits, an optional `%`, and the whitespace after it.
fn strip_leading_quantity(s: &str) -> &str {
    let digits = s.len() - s.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return s;
    }
    let rest = &s[digits..];
    rest.strip_prefix('%').unwrap_or(rest).trim_start()
}

fn strip_leading_nonalpha(s: &str) -> &str { s.trim_start_matches(|c: char| !c.is_alphabetic()) }

fn is_quantity_or_unit(word: &str) -> bool {
    is_number_or_fraction(word) || UNITS.contains(&word) || is_fused_quantity(word)
}

/// `N` or `N/M`.
fn is_number_or_fraction(word: &str) -> bool {
    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    match word.split_once('/') {
        Some((num, den)) => all_digits(num) && all_digits(den),
        None => all_digits(word),
    }
}

/// Digits glued to letters that contain a unit word, e.g. "2cups" or "500ml".
fn is_fused_quantity(word: &str) -> bool {
    let letters = word.trim_start_matches(|c: char| c.is_ascii_digit());
    let has_digits = letters.len() < word.len();
    has_digits
        && !letters.is_empty()
        && letters.chars().all(|c| c.is_ascii_alphabetic())
        && UNITS.iter().any(|unit| word.contains(unit))
}
