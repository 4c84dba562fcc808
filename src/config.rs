use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for a catalog crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Site root the category URLs are derived from
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Directory the CSV files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Run the browser without a visible window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// How the "load more" control is driven
    #[serde(default)]
    pub pagination: PaginationPolicy,
}

/// Controls the "load more" expansion loop of a category crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationPolicy {
    /// Seconds to wait for the control to be present on each attempt
    #[serde(default = "default_wait_secs")]
    pub wait_secs: u64,

    /// Extra waits granted when the control is present but hidden or disabled.
    /// Zero treats a not-ready control as exhausted.
    #[serde(default)]
    pub not_ready_retries: u32,

    /// Upper bound on activations per category
    #[serde(default = "default_max_activations")]
    pub max_activations: usize,
}

impl PaginationPolicy {
    pub fn wait(&self) -> Duration {
        Duration::from_secs(self.wait_secs)
    }
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self {
            wait_secs: default_wait_secs(),
            not_ready_retries: 0,
            max_activations: default_max_activations(),
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            base_url: default_base_url(),
            output_dir: default_output_dir(),
            headless: default_headless(),
            pagination: PaginationPolicy::default(),
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Override the WebDriver URL with the WEBDRIVER_URL environment variable if set
    pub fn apply_env(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
    }
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_base_url() -> String {
    "https://webscraper.io/".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_headless() -> bool {
    true
}

fn default_wait_secs() -> u64 {
    2
}

fn default_max_activations() -> usize {
    500
}
