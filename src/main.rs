use catalog_crawl::{Catalog, ScraperConfig};
use clap::Parser;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match ScraperConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load configuration {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ScraperConfig::default(),
    };
    config.apply_env();
    args.apply(&mut config);

    let catalog = Catalog::new(config);
    let start_time = std::time::Instant::now();

    let result = match &args.snapshot {
        Some(path) => catalog.run_snapshot(path).await.map(|file| vec![file]),
        None => {
            ::log::info!(
                "Crawling {} through WebDriver at {}",
                catalog.config().base_url,
                catalog.config().webdriver_url
            );
            catalog.run().await
        }
    };

    match result {
        Ok(files) => ::log::info!(
            "Exported {} files in {:.2} seconds",
            files.len(),
            start_time.elapsed().as_secs_f64()
        ),
        Err(e) => {
            ::log::error!("Crawl failed: {}", e);
            std::process::exit(1);
        }
    }
}
