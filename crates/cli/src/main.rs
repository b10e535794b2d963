//! Kinetic Exchange CLI - catalog checks and fragment previews.
//!
//! # Usage
//!
//! ```bash
//! # Validate the catalog document and print a summary
//! kx-cli catalog validate --source data/products.json
//!
//! # Run a storefront search against the catalog
//! kx-cli catalog search tee
//!
//! # Print the grid markup for one category section
//! kx-cli render grid --category "Street Wear"
//!
//! # Print the quick-view modal body for a product
//! kx-cli render modal 3
//! ```
//!
//! The catalog location defaults to `CATALOG_SOURCE` (or `data/products.json`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "kx-cli")]
#[command(author, version, about = "Kinetic Exchange CLI tools")]
struct Cli {
    /// Catalog file path or http(s) URL
    #[arg(short, long, global = true)]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Print rendered storefront fragments
    Render {
        #[command(subcommand)]
        target: RenderTarget,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Load and validate the catalog, then print a summary
    Validate,
    /// Search the catalog the way the storefront does
    Search {
        /// Search text (matched against name and category)
        query: String,
    },
}

#[derive(Subcommand)]
enum RenderTarget {
    /// Grid markup for one category
    Grid {
        /// Category name, e.g. "Street Wear"
        #[arg(short, long)]
        category: String,

        /// Card markup (`grid` or `search`)
        #[arg(long, default_value = "grid")]
        style: String,
    },
    /// Quick-view modal body for a product
    Modal {
        /// Product id
        id: i32,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let source = commands::resolve_source(cli.source.as_deref())?;
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Validate => commands::catalog::validate(&source).await?,
            CatalogAction::Search { query } => commands::catalog::search(&source, &query).await?,
        },
        Commands::Render { target } => match target {
            RenderTarget::Grid { category, style } => {
                commands::render::grid(&source, &category, &style).await?;
            }
            RenderTarget::Modal { id } => commands::render::modal(&source, id).await?,
        },
    }
    Ok(())
}
