use catalog_crawl::ScraperConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "catalog-crawl")]
#[command(about = "Crawls the webscraper.io demo shop and exports each category to CSV")]
#[command(version)]
pub struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// URL of the WebDriver server
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Directory the CSV files are written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Seconds to wait for the "load more" control on each attempt
    #[arg(long)]
    pub wait_secs: Option<u64>,

    /// Extra waits when the "load more" control is present but not clickable
    #[arg(long)]
    pub not_ready_retries: Option<u32>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Extract a saved category page instead of crawling the site
    #[arg(long, value_name = "HTML FILE")]
    pub snapshot: Option<PathBuf>,
}

impl Args {
    /// Layers command-line flags over the configuration
    pub fn apply(&self, config: &mut ScraperConfig) {
        if let Some(url) = &self.webdriver_url {
            config.webdriver_url = url.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(secs) = self.wait_secs {
            config.pagination.wait_secs = secs;
        }
        if let Some(retries) = self.not_ready_retries {
            config.pagination.not_ready_retries = retries;
        }
        if self.headed {
            config.headless = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keep_defaults() {
        let args = Args::parse_from(["catalog-crawl"]);
        let mut config = ScraperConfig::default();
        args.apply(&mut config);

        assert!(config.headless);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.pagination.wait_secs, 2);
        assert!(args.snapshot.is_none());
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "catalog-crawl",
            "--webdriver-url",
            "http://localhost:9515",
            "-o",
            "out",
            "--wait-secs",
            "5",
            "--not-ready-retries",
            "2",
            "--headed",
        ]);
        let mut config = ScraperConfig::default();
        args.apply(&mut config);

        assert_eq!(config.webdriver_url, "http://localhost:9515");
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.pagination.wait_secs, 5);
        assert_eq!(config.pagination.not_ready_retries, 2);
        assert!(!config.headless);
    }
}
