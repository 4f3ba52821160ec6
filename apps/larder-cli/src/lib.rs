//! Helpers shared by the larder binaries.

use std::path::{Path, PathBuf};

use anyhow::Context;
use larder_core::config::{Config, Settings};
use larder_core::source::CatalogSource;
use larder_core::{Catalog, CatalogIndexer, Recipe};
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins unless `--verbose` asks for debug output.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Layered settings with paths resolved against the working directory.
pub fn load_settings() -> anyhow::Result<Settings> {
    let config = Config::load().context("Error loading config")?;
    tracing::debug!(env = config.env_name(), "configuration loaded");
    let base = std::env::current_dir()?;
    Ok(config.settings()?.resolve_paths(&base))
}

pub fn catalog_path(settings: &Settings, cli_override: Option<&Path>) -> PathBuf {
    match cli_override {
        Some(p) => larder_core::config::expand_path(p.to_string_lossy()),
        None => settings.catalog.path.clone(),
    }
}

pub fn load_catalog(settings: &Settings, cli_override: Option<&Path>) -> anyhow::Result<Catalog> {
    let path = catalog_path(settings, cli_override);
    let indexer = CatalogIndexer::new().strict(settings.catalog.strict);
    CatalogSource::new(&path).load(&indexer).with_context(|| format!("loading catalog from {}", path.display()))
}

pub fn recipe_summary(recipe: &Recipe) -> String {
    let difficulty = recipe.difficulty.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
    let tags: Vec<&str> = recipe.dietary.iter().map(|t| t.as_str()).collect();
    let mut line = format!("#{} {} ({} min, serves {}, {})", recipe.id, recipe.name, recipe.time_minutes, recipe.servings, difficulty);
    if !tags.is_empty() {
        line.push_str(&format!(" [{}]", tags.join(", ")));
    }
    line
}

pub fn print_recipe(recipe: &Recipe) {
    println!("🍽️  {}", recipe_summary(recipe));
    println!("   🖼️  {}", recipe.image);
    println!("   🥕 Ingredients: {}", recipe.ingredients.join(", "));
    if !recipe.steps.is_empty() {
        println!("   📝 Steps:");
        for (i, step) in recipe.steps.iter().enumerate() {
            println!("      {}. {}", i + 1, step);
        }
    }
    let n = &recipe.nutrition;
    println!("   🔥 {} kcal · protein {}g · fat {}g · carbs {}g", n.calories, n.protein, n.fat, n.carbs);
}
