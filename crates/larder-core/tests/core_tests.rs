use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use figment::providers::{Format, Toml};
use figment::Figment;
use larder_core::config::{expand_path, resolve_with_base, AuthMode, Config, Settings};
use larder_core::favorites::FavoritesStore;
use larder_core::images::assign_image;
use larder_core::source::CatalogSource;
use larder_core::traits::FavoriteSet;
use larder_core::{normalize, CatalogIndexer, DietaryTag, Difficulty, Error, MatchMode, Strategy};

fn repo_root() -> PathBuf {
    // crates/larder-core -> crates -> repo root
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap().to_path_buf()
}

const SMALL: &str = r#"[
  {"id": 1, "name": "Chicken Rice", "ingredients": ["1 cup rice", "chicken", "1 onion", "garlic"], "dietary": ["Gluten_Free"]},
  {"id": 2, "name": "Plain Toast", "ingredients": ["2 slices bread", "butter"], "difficulty": "Easy"}
]"#;

#[test]
fn index_json_normalizes_and_builds_vocabulary() {
    let catalog = CatalogIndexer::new().index_json(SMALL).expect("index");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.recipes()[0].ingredients, vec!["rice", "chicken", "onion", "garlic"]);
    assert_eq!(catalog.recipes()[0].dietary, vec![DietaryTag::new("gluten-free")]);
    assert_eq!(catalog.recipes()[1].difficulty, Some(Difficulty::Easy));

    let vocab = catalog.vocabulary();
    assert_eq!(vocab.len(), 6);
    assert!(vocab.contains(" RICE "));
    assert!(!vocab.contains("beef"));
    assert_eq!(vocab.sorted(), vec!["butter", "chicken", "garlic", "onion", "rice", "slices bread"]);
    assert!(catalog.skipped().is_empty());
}

#[test]
fn non_array_and_empty_catalogs_are_invalid() {
    let indexer = CatalogIndexer::new();
    assert!(matches!(indexer.index_json(r#"{"id": 1}"#), Err(Error::InvalidCatalog(_))));
    assert!(matches!(indexer.index_json("[]"), Err(Error::InvalidCatalog(_))));
    assert!(matches!(indexer.index_json("not json"), Err(Error::Json(_))));
}

#[test]
fn malformed_records_are_skipped_and_reported() {
    let json = r#"[
      {"id": 1, "name": "Good", "ingredients": ["rice"]},
      {"id": 2, "name": "No ingredients"},
      {"name": "No id", "ingredients": ["egg"]},
      {"id": 4, "name": "Blank", "ingredients": ["  "]},
      {"id": 5, "name": "Negative", "ingredients": ["egg"], "nutrition": {"calories": -1}},
      {"id": 6, "name": "Weird", "ingredients": ["egg"], "difficulty": "extreme"},
      {"id": 1, "name": "Duplicate", "ingredients": ["egg"]},
      {"id": 8, "name": "Also good", "ingredients": ["egg"]}
    ]"#;
    let catalog = CatalogIndexer::new().index_json(json).expect("index");
    let ids: Vec<u64> = catalog.recipes().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 8]);

    let positions: Vec<usize> = catalog.skipped().iter().map(|m| m.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4, 5, 6]);
    let dup = catalog.skipped().iter().find(|m| m.position == 6).unwrap();
    assert_eq!(dup.id, Some(1));
    assert!(dup.reason.contains("duplicate"));
}

#[test]
fn null_optional_fields_are_treated_as_absent() {
    let json = r#"[
      {"id": 1, "name": "Rice Bowl", "ingredients": ["rice"], "steps": null, "dietary": null, "nutrition": null, "time": null},
      {"id": 2, "name": "Egg", "ingredients": ["egg"]}
    ]"#;
    let catalog = CatalogIndexer::new().index_json(json).expect("index");
    assert_eq!(catalog.len(), 2);
    assert!(catalog.skipped().is_empty());
    let bowl = catalog.get(1).unwrap();
    assert!(bowl.steps.is_empty());
    assert!(bowl.dietary.is_empty());
    assert_eq!(bowl.time_minutes, 0);
}

#[test]
fn strict_mode_fails_on_first_malformed_record() {
    let json = r#"[{"id": 1, "ingredients": ["rice"]}, {"id": 2}]"#;
    match CatalogIndexer::new().strict(true).index_json(json) {
        Err(Error::MalformedRecipe(m)) => {
            assert_eq!(m.position, 1);
            assert_eq!(m.id, Some(2));
        }
        other => panic!("expected MalformedRecipe, got {other:?}"),
    }
}

#[test]
fn all_malformed_is_invalid_catalog() {
    let json = r#"[{"id": 1}, {"id": 2, "ingredients": []}]"#;
    assert!(matches!(CatalogIndexer::new().index_json(json), Err(Error::InvalidCatalog(_))));
}

#[test]
fn leading_digits_are_removed_from_names() {
    let json = r#"[{"id": 3, "name": "3 Bean Chili", "ingredients": ["kidney beans"]}]"#;
    let catalog = CatalogIndexer::new().index_json(json).expect("index");
    assert_eq!(catalog.recipes()[0].name, "Bean Chili");
}

#[test]
fn images_and_fingerprint_are_stable_across_reindexing() {
    let a = CatalogIndexer::new().index_json(SMALL).expect("index");
    let b = CatalogIndexer::new().index_json(SMALL).expect("index");
    for (x, y) in a.recipes().iter().zip(b.recipes()) {
        assert_eq!(x.image, y.image);
    }
    assert_eq!(a.fingerprint(), b.fingerprint());

    let (expected, _) = assign_image(1, "Chicken Rice", &["1 cup rice", "chicken", "1 onion", "garlic"]);
    assert_eq!(a.recipes()[0].image, expected);
}

#[test]
fn directory_source_concatenates_sorted_files() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("more");
    fs::create_dir_all(&nested).unwrap();
    fs::write(tmp.path().join("b.json"), r#"[{"id": 2, "name": "B", "ingredients": ["egg"]}]"#).unwrap();
    fs::write(tmp.path().join("a.json"), r#"[{"id": 1, "name": "A", "ingredients": ["rice"]}]"#).unwrap();
    fs::write(nested.join("c.json"), r#"[{"id": 3, "name": "C", "ingredients": ["milk"]}]"#).unwrap();
    fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

    let source = CatalogSource::new(tmp.path());
    assert_eq!(source.files().unwrap().len(), 3);
    let catalog = source.load(&CatalogIndexer::new()).expect("load");
    let ids: Vec<u64> = catalog.recipes().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn missing_source_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let source = CatalogSource::new(tmp.path().join("nope.json"));
    assert!(matches!(source.files(), Err(Error::NotFound(_))));
}

#[test]
fn favorites_round_trip_through_disk() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("favorites.json");
    let catalog = CatalogIndexer::new().index_json(SMALL).expect("index");

    let mut store = FavoritesStore::open(&path).expect("open");
    assert!(store.is_empty());
    assert!(store.toggle(&catalog.recipes()[1]));
    store.save().expect("save");

    let mut reopened = FavoritesStore::open(&path).expect("reopen");
    assert_eq!(reopened.len(), 1);
    assert!(reopened.is_favorite(2));
    assert!(!reopened.is_favorite(1));
    assert_eq!(reopened.recipes()[0], catalog.recipes()[1]);

    assert!(!reopened.toggle(&catalog.recipes()[1]));
    reopened.save().expect("save");
    assert!(FavoritesStore::open(&path).expect("reopen").is_empty());
}

#[test]
fn default_settings_are_valid() {
    let settings = Settings::default();
    settings.validate().expect("defaults validate");
    assert_eq!(settings.search.min_accuracy, 50.0);
    assert_eq!(settings.search.suggestion_limit, 10);
    assert_eq!(settings.search.match_mode, MatchMode::Containment);
    assert_eq!(settings.search.strategy, Strategy::Threshold);
    assert_eq!(settings.recognition.auth_mode, AuthMode::ApiKey);
}

#[test]
fn figment_layers_override_defaults() {
    let toml = r#"
        [search]
        match_mode = "exact"
        strategy = "ranked"
        min_accuracy = 75.0

        [recognition]
        auth_mode = "api-key-user-token-env"
    "#;
    let config = Config::from_figment(Figment::from(Toml::string(toml))).expect("config");
    let settings = config.settings().expect("settings");
    assert_eq!(settings.search.match_mode, MatchMode::Exact);
    assert_eq!(settings.search.strategy, Strategy::Ranked);
    assert_eq!(settings.search.min_accuracy, 75.0);
    assert_eq!(settings.search.suggestion_limit, 10);
    assert_eq!(settings.recognition.auth_mode, AuthMode::ApiKeyUserTokenEnv);
    assert_eq!(config.get::<u64>("featured.seed").expect("seed"), 42);
}

#[test]
fn out_of_range_values_are_rejected() {
    for toml in [
        "[search]\nmin_accuracy = 101.0",
        "[search]\nsuggestion_limit = 0",
        "[featured]\ncount = 0",
        "[recognition]\nresults_threshold = 1.5",
    ] {
        let result = Config::from_figment(Figment::from(Toml::string(toml)));
        assert!(matches!(result, Err(Error::InvalidConfig(_))), "accepted {toml:?}");
    }
}

#[test]
fn load_from_reads_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[featured]\ncount = 3\nseed = 9\n").unwrap();
    let settings = Config::load_from(tmp.path()).expect("load").settings().expect("settings");
    assert_eq!(settings.featured.count, 3);
    assert_eq!(settings.featured.seed, 9);
}

#[test]
fn paths_are_expanded_and_resolved() {
    let base = PathBuf::from("/srv/larder");
    assert_eq!(resolve_with_base(&base, "data/catalog.json"), base.join("data/catalog.json"));
    assert_eq!(resolve_with_base(&base, "/abs/catalog.json"), PathBuf::from("/abs/catalog.json"));
    assert!(!expand_path("~/favorites.json").starts_with("~"));

    let settings = Settings::default().resolve_paths(&base);
    assert_eq!(settings.catalog.path, base.join("data/catalog.json"));
}

#[test]
fn sample_catalog_full_flow() {
    let path = repo_root().join("data/catalog.json");
    let catalog = CatalogSource::new(&path).load(&CatalogIndexer::new().strict(true)).expect("sample catalog loads");
    assert_eq!(catalog.len(), 10);

    // Vocabulary is exactly the set of normalized ingredients.
    let raw: Vec<serde_json::Value> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let mut expected: Vec<String> = raw
        .iter()
        .flat_map(|r| r["ingredients"].as_array().unwrap().iter())
        .map(|i| normalize(&i.as_str().unwrap().to_lowercase()))
        .filter(|i| !i.is_empty())
        .collect();
    expected.sort();
    expected.dedup();
    assert_eq!(catalog.vocabulary().sorted(), expected.iter().map(String::as_str).collect::<Vec<_>>());

    for recipe in catalog.recipes() {
        assert!(!recipe.ingredients.is_empty());
        assert!(recipe.image.starts_with("https://images.unsplash.com/"));
    }
    assert_eq!(catalog.get(8).unwrap().name, "Bean Chili");
}
