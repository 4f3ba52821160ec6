use larder_core::normalize;

#[test]
fn strips_quantity_percent_and_descriptor() {
    assert_eq!(normalize("2% low-fat milk"), "milk");
}

#[test]
fn strips_fraction_unit_and_descriptor() {
    assert_eq!(normalize("1/2 cup chopped onion"), "onion");
    assert_eq!(normalize("1 1/2 cups flour"), "flour");
}

#[test]
fn fused_quantity_and_unit_is_dropped() {
    assert_eq!(normalize("2cups sugar"), "sugar");
    assert_eq!(normalize("500ml whole milk"), "milk");
}

#[test]
fn empty_and_plain_inputs() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("   "), "");
    assert_eq!(normalize("egg"), "egg");
    assert_eq!(normalize("  Egg "), "egg");
}

#[test]
fn last_word_is_never_dropped_as_descriptor() {
    assert_eq!(normalize("the"), "the");
    assert_eq!(normalize("of the"), "the");
    assert_eq!(normalize("Fresh Basil Leaves"), "basil leaves");
}

#[test]
fn short_results_fall_back_to_trimmed_input() {
    assert_eq!(normalize(" 3 x "), "3 x");
    assert_eq!(normalize("ox"), "ox");
}

#[test]
fn unicode_letters_are_kept() {
    assert_eq!(normalize("½ cup rice"), "rice");
    assert_eq!(normalize("Crème fraîche"), "crème fraîche");
}

#[test]
fn normalize_is_idempotent_on_samples() {
    let samples = [
        "2% low-fat milk",
        "1/2 cup chopped onion",
        "egg",
        "2cups sugar",
        "Extra Virgin Olive Oil",
        "2 large eggs",
        "1 (14 oz) can tomatoes",
        "Fresh Basil Leaves",
        "salt",
    ];
    for s in samples {
        let once = normalize(s);
        assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
    }
}
