//! Bramble CLI - catalog browsing against a live store.
//!
//! # Usage
//!
//! ```bash
//! # First page of the product catalog
//! bramble products
//!
//! # Filtered and sorted, then page through twice more
//! bramble products --category espresso --instock --sort price_desc --load-more 2
//!
//! # Attribute filters use TAXONOMY=TERM,TERM
//! bramble products --attr pa_colour=red,blue --attr pa_size=250g
//!
//! # One brand's products, the brand directory, the blog
//! bramble products --brand acme
//! bramble brands
//! bramble posts --category brewing
//! ```
//!
//! The endpoint comes from `WOO_GRAPHQL_ENDPOINT` (or `--endpoint`), with
//! an optional `WOO_AUTH_TOKEN` bearer token.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bramble")]
#[command(author, version, about = "Bramble catalog browser")]
struct Cli {
    /// WooCommerce GraphQL endpoint (defaults to WOO_GRAPHQL_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products(ListArgs),
    /// Browse the brand directory
    Brands(ListArgs),
    /// Browse the blog post archive
    Posts(ListArgs),
}

/// Shared listing flags.
#[derive(Args)]
struct ListArgs {
    /// Filter by category slug (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Filter by brand slug (repeatable)
    #[arg(long = "brand")]
    brands: Vec<String>,

    /// Filter by attribute, as TAXONOMY=TERM,TERM (repeatable)
    #[arg(long = "attr", value_name = "TAXONOMY=TERMS")]
    attributes: Vec<String>,

    /// Only purchasable items
    #[arg(long)]
    instock: bool,

    /// Sort order (latest, price_asc, price_desc, popularity, rating)
    #[arg(long)]
    sort: Option<String>,

    /// Page to anchor at
    #[arg(long, default_value_t = 0)]
    page: u32,

    /// Free-text search term
    #[arg(long)]
    search: Option<String>,

    /// Items per page
    #[arg(long, default_value_t = 24)]
    per_page: u32,

    /// Extra pages to append after the anchored one
    #[arg(long, default_value_t = 0)]
    load_more: u32,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let client = commands::client(cli.endpoint)?;

    match cli.command {
        Commands::Products(args) => commands::listings::products(client, &args).await?,
        Commands::Brands(args) => commands::listings::brands(client, &args).await?,
        Commands::Posts(args) => commands::listings::posts(client, &args).await?,
    }

    Ok(())
}
