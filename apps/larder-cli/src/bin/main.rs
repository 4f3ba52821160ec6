use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use larder_cli::{init_tracing, load_catalog, load_settings, print_recipe, recipe_summary};
use larder_core::config::Settings;
use larder_core::favorites::FavoritesStore;
use larder_core::{Catalog, Error, MatchMode, RecipeId, Strategy};
use larder_match::{featured, mark_favorites, DietaryFilter, MatchEngine, Selection};
use larder_vision::{decode_image_payload, detect, CannedRecognizer, DetectionThresholds};

#[derive(Parser)]
#[command(name = "larder", about = "Find recipes for the ingredients you have")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Catalog file or directory (overrides catalog.path)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Recipes matching the selected ingredients
    Search {
        /// Selected ingredient (repeatable)
        #[arg(short = 'i', long = "ingredient", required = true)]
        ingredients: Vec<String>,

        /// Required dietary tag (repeatable)
        #[arg(long = "diet")]
        diet: Vec<String>,

        /// Every partial match, most matches first
        #[arg(long)]
        ranked: bool,

        /// Compare ingredients for equality instead of containment
        #[arg(long)]
        exact: bool,

        #[arg(long)]
        min_accuracy: Option<f64>,
    },
    /// Autocomplete from the catalog vocabulary
    Suggest {
        query: String,

        /// Already selected ingredient (repeatable)
        #[arg(short = 'i', long = "ingredient")]
        selected: Vec<String>,

        #[arg(long)]
        limit: Option<usize>,
    },
    /// A seeded sample of recipes
    Featured {
        #[arg(long)]
        count: Option<usize>,

        #[arg(long)]
        seed: Option<u64>,
    },
    /// Full recipe details
    Show { id: RecipeId },
    /// Add or remove a favorite
    Favorite { id: RecipeId },
    /// List favorites
    Favorites,
    /// Detect ingredients from a saved recognition response
    Detect {
        /// Recognition response JSON
        #[arg(long)]
        response: PathBuf,

        /// Raw image file
        #[arg(long, conflicts_with = "payload")]
        image: Option<PathBuf>,

        /// Base64 or data-URL image payload file
        #[arg(long)]
        payload: Option<PathBuf>,

        /// Search the catalog with the detected ingredients
        #[arg(long)]
        search: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = load_settings()?;
    let catalog_override = cli.catalog.as_deref();

    match cli.command {
        Command::Search { ingredients, diet, ranked, exact, min_accuracy } => {
            let catalog = load_catalog(&settings, catalog_override)?;
            let mut engine = MatchEngine::from_settings(&settings.search)?;
            if ranked { engine = engine.with_strategy(Strategy::Ranked); }
            if exact { engine = engine.with_mode(MatchMode::Exact); }
            if let Some(min) = min_accuracy { engine = engine.with_min_accuracy(min)?; }
            let selection: Selection = ingredients.iter().collect();
            let filter: DietaryFilter = diet.iter().collect();
            run_search(&settings, &catalog, &engine, &selection, &filter)?;
        }
        Command::Suggest { query, selected, limit } => {
            let catalog = load_catalog(&settings, catalog_override)?;
            let selection: Selection = selected.iter().collect();
            let limit = limit.unwrap_or(settings.search.suggestion_limit);
            let suggestions = catalog.vocabulary().suggest(&query, |i| selection.contains(i), limit);
            if suggestions.is_empty() {
                println!("No suggestions for '{}'", query);
            }
            for s in suggestions { println!("  {}", s); }
        }
        Command::Featured { count, seed } => {
            let catalog = load_catalog(&settings, catalog_override)?;
            let count = count.unwrap_or(settings.featured.count);
            let seed = seed.unwrap_or(settings.featured.seed);
            println!("✨ Featured recipes (seed {})", seed);
            for recipe in featured(&catalog, count, seed) { println!("  {}", recipe_summary(recipe)); }
        }
        Command::Show { id } => {
            let catalog = load_catalog(&settings, catalog_override)?;
            let recipe = catalog.get(id).ok_or_else(|| Error::NotFound(format!("recipe {id}")))?;
            print_recipe(recipe);
        }
        Command::Favorite { id } => {
            let catalog = load_catalog(&settings, catalog_override)?;
            let recipe = catalog.get(id).ok_or_else(|| Error::NotFound(format!("recipe {id}")))?;
            let mut store = FavoritesStore::open(&settings.catalog.favorites_path)?;
            if store.toggle(recipe) {
                println!("❤️  Added '{}' to favorites", recipe.name);
            } else {
                println!("💔 Removed '{}' from favorites", recipe.name);
            }
            store.save().with_context(|| format!("saving {}", store.path().display()))?;
        }
        Command::Favorites => {
            let store = FavoritesStore::open(&settings.catalog.favorites_path)?;
            if store.is_empty() {
                println!("No favorites yet. Use 'larder favorite <id>' to add one.");
            }
            for recipe in store.recipes() { println!("❤️  {}", recipe_summary(recipe)); }
        }
        Command::Detect { response, image, payload, search } => {
            let recognizer = CannedRecognizer::from_file(&response).with_context(|| format!("reading {}", response.display()))?;
            let bytes = read_image(image.as_deref(), payload.as_deref())?;
            let thresholds = DetectionThresholds::from(&settings.recognition);
            let detections = detect(&recognizer, &bytes, &thresholds)?;
            if detections.is_empty() {
                println!("⚠️  No ingredients detected in this image");
                return Ok(());
            }

            let catalog = load_catalog(&settings, catalog_override)?;
            println!("📷 Detected {} ingredients:", detections.len());
            for d in &detections {
                let known = if catalog.vocabulary().contains(&d.name) { "" } else { " (not in catalog)" };
                println!("  {} {:.0}%{}", d.name, d.confidence * 100.0, known);
            }
            if search {
                let selection: Selection = detections.iter().map(|d| d.name.as_str()).collect();
                let engine = MatchEngine::from_settings(&settings.search)?;
                run_search(&settings, &catalog, &engine, &selection, &DietaryFilter::none())?;
            }
        }
    }
    Ok(())
}

fn run_search(settings: &Settings, catalog: &Catalog, engine: &MatchEngine, selection: &Selection, filter: &DietaryFilter) -> anyhow::Result<()> {
    let mut results = engine.search(catalog, selection, filter)?;
    let favorites = FavoritesStore::open(&settings.catalog.favorites_path)?;
    mark_favorites(&mut results, &favorites);

    let selected: Vec<&str> = selection.iter().collect();
    println!("🔍 Searching with: {}", selected.join(", "));
    if results.is_empty() {
        println!("No recipes found. Try fewer ingredients or --ranked.");
        return Ok(());
    }
    println!("📊 Found {} recipes", results.len());
    for r in &results {
        let heart = if r.favorite { " ❤️" } else { "" };
        println!("  {:>3.0}% ({}/{}) {}{}", r.accuracy, r.matched, selection.len(), recipe_summary(r.recipe), heart);
    }
    Ok(())
}

fn read_image(image: Option<&Path>, payload: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    if let Some(path) = image {
        return std::fs::read(path).with_context(|| format!("reading {}", path.display()));
    }
    if let Some(path) = payload {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        return Ok(decode_image_payload(&text)?);
    }
    Ok(Vec::new())
}
