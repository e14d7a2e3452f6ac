mod content;
mod filter;
mod kontent;
mod listing;
mod settings;
mod store;
mod types;

use std::path::PathBuf;
use std::sync::{Arc, PoisonError};
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;
use dotenvy::dotenv;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::filter::brewer_filter::Filter;
use crate::kontent::kontent_client::KontentClient;
use crate::kontent::kontent_config::KontentConfig;
use crate::settings::Settings;
use crate::store::brewer_store::BrewerStore;
use crate::store::change_listeners::ChangeListener;
use crate::types::price_range::PriceRange;

#[derive(Debug, Clone, Parser)]
#[command(about = "Browse the brewer catalog of a Kontent.ai project")]
struct Args {
    /// Language code; the configured default when omitted.
    #[arg(long)]
    pub language: Option<String>,

    /// Show a single brewer by URL slug.
    #[arg(long)]
    pub slug: Option<String>,

    #[arg(long = "manufacturer")]
    pub manufacturers: Vec<String>,

    /// Price bracket as MIN-MAX, inclusive.
    #[arg(long = "price-range")]
    pub price_ranges: Vec<PriceRange>,

    #[arg(long = "status")]
    pub product_statuses: Vec<String>,

    /// Also fetch taxonomies and print facet counts.
    #[arg(long)]
    pub facets: bool,

    #[arg(long)]
    pub settings: Option<PathBuf>,

    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

impl Args {
    fn filter(&self) -> Filter {
        let mut filter = Filter::new();
        for manufacturer in &self.manufacturers {
            filter.toggle_manufacturer(manufacturer.as_str());
        }
        for price_range in &self.price_ranges {
            filter.toggle_price_range(*price_range);
        }
        for product_status in &self.product_statuses {
            filter.toggle_product_status(product_status.as_str());
        }
        filter
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("brewer_store=info".parse()?),
        )
        .with_target(false)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    let settings = match &args.settings {
        Some(path) => Settings::from_path(path)?,
        None => Settings::load()?.clone(),
    };

    if let Some(language) = args.language.as_deref()
        && !settings.languages.is_supported(language)
    {
        warn!(language, supported = ?settings.languages.supported(), "language is not configured");
    }

    let config = KontentConfig::from_env()?;
    info!(?config, "using delivery api");
    let client = KontentClient::new(config)?;

    let store = BrewerStore::new(Arc::new(client), settings.languages.clone());
    store.set_filter(args.filter());

    let (change_sender, mut change_receiver) = mpsc::unbounded_channel::<()>();
    let listener: ChangeListener = Arc::new(move || {
        let _ = change_sender.send(());
    });
    store.add_change_listener(Arc::clone(&listener));

    let language = args.language.as_deref();
    let mut expected = 1;
    match args.slug.as_deref() {
        Some(slug) => store.provide_brewer(slug, language),
        None => store.provide_brewers(language),
    }
    if args.facets {
        store.provide_manufacturers();
        store.provide_product_statuses();
        expected += 2;
    }

    let deadline = Instant::now() + Duration::from_secs(args.timeout_secs);
    let mut received = 0;
    while received < expected {
        match tokio::time::timeout_at(deadline, change_receiver.recv()).await {
            Ok(Some(())) => received += 1,
            Ok(None) => break,
            Err(_) => {
                warn!(received, expected, "timed out waiting for delivery api responses");
                store.unsubscribe();
                break;
            }
        }
    }
    store.remove_change_listener(&listener);

    let printed = print_catalog(&store, &args, &settings);

    store.unsubscribe();
    store.reset();
    debug!("store released");

    printed
}

fn print_catalog(store: &BrewerStore, args: &Args, settings: &Settings) -> Result<()> {
    let language = args.language.as_deref();

    if let Some(slug) = args.slug.as_deref() {
        let Some(brewer) = store.get_brewer(slug, language) else {
            bail!("no brewer with slug \"{slug}\"");
        };
        for line in listing::brewer_details(&brewer) {
            println!("{line}");
        }
        return Ok(());
    }

    let brewers = store.get_filtered_brewers(language);
    info!(count = brewers.len(), "brewers matching filter");
    for brewer in &brewers {
        println!("{}", listing::brewer_line(brewer));
    }

    if !args.facets {
        return Ok(());
    }

    let language = store.languages().resolve(language);
    let all = store.get_brewers(Some(language)).unwrap_or_default();
    let filter = store.get_filter();
    let filter = filter.read().unwrap_or_else(PoisonError::into_inner);

    println!();
    println!("filter: {}", listing::filter_summary(&filter));
    println!("manufacturers:");
    print_facets(listing::manufacturer_counts(
        &store.get_manufacturers(),
        &all,
        filter.manufacturers(),
    ));
    println!("product statuses:");
    print_facets(listing::product_status_counts(
        &store.get_product_statuses(),
        &all,
        filter.product_statuses(),
    ));
    println!("price ranges:");
    print_facets(listing::price_range_counts(
        &settings.price_ranges,
        &all,
        filter.price_ranges(),
    ));

    Ok(())
}

fn print_facets(facets: Vec<listing::FacetCount>) {
    for facet in facets {
        let marker = if facet.selected { '*' } else { ' ' };
        println!(" {marker} {:<40} {}", facet.label, facet.count);
    }
}
