use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::Recipe;
use pipeline::SearchParams;
use server::{BulkImporter, Config, ImportOptions, Pagination, RecipeService};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use store::RecordStore;
use tracing::info;

/// Recipes - import, browse and search the recipe collection
#[derive(Parser)]
#[command(name = "recipes")]
#[command(about = "Import, browse and search the recipe collection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bulk-import a raw recipe dump into the store
    Import {
        /// Path to the JSON dump
        #[arg(short, long, default_value = "data/US_recipes_null.Pdf.json")]
        file: PathBuf,

        /// Remove every stored recipe before importing
        #[arg(long)]
        drop_existing: bool,

        /// Records per insert batch (defaults to IMPORT_BATCH_SIZE)
        #[arg(long)]
        batch_size: Option<usize>,
    },

    /// List recipes by descending rating
    List {
        #[arg(long, default_value = "1")]
        page: u64,

        #[arg(long, default_value = "10")]
        limit: u64,
    },

    /// Search recipes; numeric filters take an optional <, <=, >, >= or = prefix
    Search {
        /// Case-insensitive substring of the title
        #[arg(long)]
        title: Option<String>,

        /// Case-insensitive substring of the cuisine
        #[arg(long)]
        cuisine: Option<String>,

        /// e.g. ">=4.5"
        #[arg(long, allow_hyphen_values = true)]
        rating: Option<String>,

        /// Minutes, e.g. "<=60"
        #[arg(long, allow_hyphen_values = true)]
        total_time: Option<String>,

        /// kcal, e.g. "<300"
        #[arg(long, allow_hyphen_values = true)]
        calories: Option<String>,
    },

    /// Show one recipe in full
    Show {
        #[arg(long)]
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let start = Instant::now();
    let store: Arc<dyn RecordStore> = Arc::new(config.open_store().await?);
    info!("Connected to {}/{} in {:?}", config.database, config.collection, start.elapsed());

    match cli.command {
        Commands::Import {
            file,
            drop_existing,
            batch_size,
        } => {
            let options = ImportOptions {
                batch_size: batch_size.unwrap_or(config.import_batch_size),
                drop_existing,
            };
            handle_import(store, file, options).await?
        }
        Commands::List { page, limit } => {
            handle_list(RecipeService::new(store), Pagination::new(page, limit)).await?
        }
        Commands::Search {
            title,
            cuisine,
            rating,
            total_time,
            calories,
        } => {
            let params = SearchParams {
                title,
                cuisine,
                rating,
                total_time,
                calories,
            };
            handle_search(RecipeService::new(store), params).await?
        }
        Commands::Show { id } => handle_show(RecipeService::new(store), &id).await?,
    }

    Ok(())
}

/// Handle the 'import' command
async fn handle_import(store: Arc<dyn RecordStore>, file: PathBuf, options: ImportOptions) -> Result<()> {
    let start = Instant::now();
    let report = BulkImporter::new(store, options)
        .import_file(&file)
        .await
        .with_context(|| format!("Import of {} failed", file.display()))?;

    println!(
        "{} Imported {} recipes in {} batches ({:?})",
        "✓".green(),
        report.inserted.to_string().bold(),
        report.batches,
        start.elapsed()
    );
    println!(
        "{}Rows found: {}, skipped without title: {}",
        "• ".cyan(),
        report.found,
        report.skipped
    );
    Ok(())
}

/// Handle the 'list' command
async fn handle_list(service: RecipeService, pagination: Pagination) -> Result<()> {
    let page = service.list(pagination).await?;
    let pages = page.total.div_ceil(page.limit);

    println!(
        "{}",
        format!("Recipes (page {} of {}, {} total):", page.page, pages, page.total)
            .bold()
            .blue()
    );
    print_recipes(&page.data);
    Ok(())
}

/// Handle the 'search' command
async fn handle_search(service: RecipeService, params: SearchParams) -> Result<()> {
    let recipes = service.search(&params).await?;

    println!("{}", format!("Search results ({} found):", recipes.len()).bold().blue());
    print_recipes(&recipes);
    Ok(())
}

/// Handle the 'show' command
async fn handle_show(service: RecipeService, id: &str) -> Result<()> {
    let recipe = service.get(id).await?;

    println!("{}", recipe.title.as_deref().unwrap_or("Untitled recipe").bold().blue());
    if let Some(cuisine) = &recipe.cuisine {
        println!("{}", cuisine.italic());
    }
    if let Some(description) = &recipe.description {
        println!("\n{description}");
    }

    println!();
    println!("{}Rating: {}", "• ".green(), or_na(recipe.rating));
    println!("{}Total time: {}", "• ".green(), minutes(recipe.total_time));
    println!("{}Prep time: {}", "• ".green(), minutes(recipe.prep_time));
    println!("{}Cook time: {}", "• ".green(), minutes(recipe.cook_time));
    println!("{}Serves: {}", "• ".green(), recipe.serves.as_deref().unwrap_or("N/A"));

    if !recipe.nutrients.is_empty() {
        println!("\n{}", "Nutrition:".bold());
        for (name, amount) in &recipe.nutrients {
            println!("  - {name}: {amount}");
        }
    }

    println!("\n{}", "Ingredients:".bold());
    for ingredient in &recipe.ingredients {
        println!("  - {ingredient}");
    }

    println!("\n{}", "Instructions:".bold());
    for (step, instruction) in recipe.instructions.iter().enumerate() {
        println!("  {}. {instruction}", (step + 1).to_string().green());
    }
    Ok(())
}

fn or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

fn minutes(value: Option<f64>) -> String {
    match value {
        Some(m) if m != 0.0 => format!("{m} min"),
        _ => "N/A".to_string(),
    }
}

/// Helper function to format and print a list of recipes
fn print_recipes(recipes: &[Recipe]) {
    for (rank, recipe) in recipes.iter().enumerate() {
        println!(
            "{}. {} [{}] - Rating: {} - {} - {}",
            (rank + 1).to_string().green(),
            recipe.title.as_deref().unwrap_or("Untitled"),
            recipe.cuisine.as_deref().unwrap_or("-"),
            or_na(recipe.rating),
            minutes(recipe.total_time),
            recipe.id.dimmed()
        );
    }
}
