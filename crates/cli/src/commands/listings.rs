//! Listing commands: build filter state from flags, drive the catalog
//! engine, print the window.

use std::collections::BTreeSet;

use url::Url;

use bramble_catalog::{
    CatalogConfig, CatalogController, CatalogSnapshot, CatalogSource, FilterState, Outcome,
    UrlSync,
};
use bramble_core::{Slug, SortOrder};
use bramble_storefront::woo::{BrandCatalog, PostCatalog, ProductCatalog, WooClient};

use crate::ListArgs;

type CliResult = Result<(), Box<dyn std::error::Error>>;

pub async fn products(client: WooClient, args: &ListArgs) -> CliResult {
    let filter = filter_from_args(args)?;
    let source = ProductCatalog::new(client).with_search(args.search.clone());
    let controller = browse("/products", source, filter, args).await?;

    let snapshot = controller.snapshot();
    for product in &snapshot.items {
        let price = product
            .price
            .map_or_else(|| "-".to_string(), |p| format!("{p}"));
        let sale = if product.on_sale { " (sale)" } else { "" };
        println!(
            "{:<40} {:>10} {:?}{}",
            product.name, price, product.stock_status, sale
        );
    }
    footer(&snapshot, &controller.current_url());
    Ok(())
}

pub async fn brands(client: WooClient, args: &ListArgs) -> CliResult {
    let filter = filter_from_args(args)?;
    let source = BrandCatalog::new(client).with_search(args.search.clone());
    let controller = browse("/brands", source, filter, args).await?;

    let snapshot = controller.snapshot();
    for brand in &snapshot.items {
        println!(
            "{:<30} {:>5} products  [{}]",
            brand.name, brand.product_count, brand.slug
        );
    }
    footer(&snapshot, &controller.current_url());
    Ok(())
}

pub async fn posts(client: WooClient, args: &ListArgs) -> CliResult {
    let filter = filter_from_args(args)?;
    let source = PostCatalog::new(client).with_search(args.search.clone());
    let controller = browse("/posts", source, filter, args).await?;

    let snapshot = controller.snapshot();
    for post in &snapshot.items {
        let date = post
            .published_at
            .map_or_else(|| "          ".to_string(), |d| d.format("%Y-%m-%d").to_string());
        println!("{date}  {}", post.title);
    }
    footer(&snapshot, &controller.current_url());
    Ok(())
}

/// Anchor the engine at the flags' filter state and page through.
async fn browse<S: CatalogSource>(
    path: &str,
    source: S,
    filter: FilterState,
    args: &ListArgs,
) -> Result<CatalogController<S>, Box<dyn std::error::Error>> {
    let taxonomies: Vec<String> = filter.attributes.keys().cloned().collect();

    // The engine hydrates from a URL; write the flags into one so the CLI
    // exercises the same deep-link path a browser would.
    let sync = UrlSync::new(taxonomies.clone());
    let url = sync.write(
        &Url::parse(&format!("https://storefront.local{path}"))?,
        &filter,
    );

    let controller = CatalogController::new(
        source,
        url,
        CatalogConfig {
            per_page: args.per_page,
            taxonomies,
            pinned_brand: None,
        },
    );
    controller.hydrate().await;

    for _ in 0..args.load_more {
        if controller.load_more().await != Outcome::Updated {
            break;
        }
    }

    Ok(controller)
}

fn filter_from_args(args: &ListArgs) -> Result<FilterState, Box<dyn std::error::Error>> {
    let mut filter = FilterState::default();

    for category in &args.categories {
        filter.categories.insert(Slug::parse(category)?);
    }
    for brand in &args.brands {
        filter.brands.insert(Slug::parse(brand)?);
    }
    for spec in &args.attributes {
        let (taxonomy, terms) = spec
            .split_once('=')
            .ok_or_else(|| format!("invalid --attr '{spec}', expected TAXONOMY=TERMS"))?;
        let options = terms
            .split(',')
            .filter(|t| !t.is_empty())
            .map(Slug::parse)
            .collect::<Result<BTreeSet<_>, _>>()?;
        filter.attributes.insert(taxonomy.to_string(), options);
    }
    filter.instock = args.instock;
    filter.sort = args
        .sort
        .as_deref()
        .map(|s| SortOrder::parse(s).ok_or_else(|| format!("unknown sort key: {s}")))
        .transpose()?;
    filter.page = args.page;

    Ok(filter)
}

fn footer<T>(snapshot: &CatalogSnapshot<T>, url: &Url) {
    if snapshot.found == 0 {
        println!("No results.");
        return;
    }

    println!(
        "\nViewing {}-{} of {} ({} loaded{})",
        snapshot.viewing.from,
        snapshot.viewing.to,
        snapshot.found,
        snapshot.items.len(),
        if snapshot.has_more {
            ", more available"
        } else {
            ""
        },
    );
    println!("{url}");
}
