pub mod categories;
pub mod config;
pub mod crawlers;
pub mod error;
pub mod export;
pub mod extract;
pub mod results;

// Re-export commonly used types for convenience
pub use config::{PaginationPolicy, ScraperConfig};
pub use error::{Result, ScrapeError};
pub use results::Product;

use categories::Category;
use crawlers::{BrowserSession, CatalogPage, SnapshotPage, crawl_category};
use export::{ExportTarget, export_all};
use std::path::{Path, PathBuf};

/// Crawls every category of the shop and exports one CSV file per category
pub struct Catalog {
    config: ScraperConfig,
}

impl Catalog {
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Runs the full crawl in a browser session and writes the six CSV files
    pub async fn run(&self) -> Result<Vec<PathBuf>> {
        let categories = categories::categories(&self.config.base_url)?;
        let session = BrowserSession::connect(&self.config).await?;
        self.run_with(session, &categories).await
    }

    /// Crawls `categories` on `page`, closes the page, then exports.
    ///
    /// The page is closed on every path. Nothing is written unless every
    /// category was crawled.
    pub async fn run_with<P: CatalogPage>(
        &self,
        mut page: P,
        categories: &[Category],
    ) -> Result<Vec<PathBuf>> {
        let crawled = crawl_all(&mut page, categories, &self.config.pagination).await;
        page.close().await;

        export_all(&self.config.output_dir, &crawled?)
    }

    /// Extracts a saved category page and writes `<file stem>.csv`
    pub async fn run_snapshot(&self, html_path: &Path) -> Result<PathBuf> {
        let name = html_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "snapshot".to_string());

        let mut page = SnapshotPage::from_file(html_path)?;
        let location = html_path.display().to_string();
        let crawled = crawl_category(&mut page, &location, &self.config.pagination).await;
        page.close().await;
        let products = crawled?;

        let mut written = export_all(
            &self.config.output_dir,
            &[ExportTarget::new(name, products)],
        )?;
        Ok(written.remove(0))
    }
}

/// Crawls the categories one after another; the first failure aborts the lot
pub async fn crawl_all<P: CatalogPage>(
    page: &mut P,
    categories: &[Category],
    policy: &PaginationPolicy,
) -> Result<Vec<ExportTarget>> {
    let mut targets = Vec::with_capacity(categories.len());

    for category in categories {
        ::log::info!("Crawling {} at {}", category.name, category.url);
        let start_time = std::time::Instant::now();

        let products = crawl_category(page, category.url.as_str(), policy).await?;

        ::log::info!(
            "Collected {} products from {} in {:.2} seconds",
            products.len(),
            category.name,
            start_time.elapsed().as_secs_f64()
        );
        targets.push(ExportTarget::new(category.name, products));
    }

    Ok(targets)
}
