use crate::config::ScraperConfig;
use crate::crawlers::page::{CatalogPage, ControlState};
use crate::crawlers::selectors::{self, Field};
use crate::error::{Result, ScrapeError};
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::time::Duration;

/// Endpoints tried when the configured WebDriver URL refuses a session
const FALLBACK_WEBDRIVER_URLS: [&str; 2] = [
    "http://localhost:9515", // ChromeDriver default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// A live browser driven over WebDriver.
///
/// Owned by the caller for the whole run; release it with [`CatalogPage::close`].
pub struct BrowserSession {
    client: Client,
}

impl BrowserSession {
    /// Opens a new browser session, headless unless the config says otherwise
    pub async fn connect(config: &ScraperConfig) -> Result<Self> {
        let capabilities = browser_capabilities(config.headless);

        let first_error = match connect_to(&config.webdriver_url, &capabilities).await {
            Ok(client) => return Ok(Self { client }),
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    config.webdriver_url,
                    e
                );
                e
            }
        };

        for url in FALLBACK_WEBDRIVER_URLS.iter() {
            if *url == config.webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            if let Ok(client) = connect_to(url, &capabilities).await {
                return Ok(Self { client });
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(ScrapeError::Connect {
            url: config.webdriver_url.clone(),
            message: first_error,
        })
    }
}

async fn connect_to(url: &str, caps: &Capabilities) -> std::result::Result<Client, String> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(caps.clone());
    let client = builder.connect(url).await.map_err(|e| e.to_string())?;

    ::log::info!("Connected to WebDriver at {}", url);
    Ok(client)
}

/// Capabilities understood by Chrome, Edge and Firefox drivers
fn browser_capabilities(headless: bool) -> Capabilities {
    let mut capabilities = Capabilities::new();
    if headless {
        let chromium = json!({ "args": ["--headless=new"] });
        capabilities.insert("goog:chromeOptions".to_string(), chromium.clone());
        capabilities.insert("ms:edgeOptions".to_string(), chromium);
        capabilities.insert(
            "moz:firefoxOptions".to_string(),
            json!({ "args": ["-headless"] }),
        );
    }
    capabilities
}

/// Classifies a located control; a stale handle counts as gone
async fn control_state(element: &Element) -> ControlState {
    match (element.is_displayed().await, element.is_enabled().await) {
        (Ok(true), Ok(true)) => ControlState::Ready,
        (Ok(_), Ok(_)) => ControlState::NotReady,
        (Err(e), _) | (_, Err(e)) => {
            ::log::debug!("Load-more control became unusable: {}", e);
            ControlState::Absent
        }
    }
}

#[async_trait]
impl CatalogPage for BrowserSession {
    type Card = Element;

    async fn open(&mut self, url: &str) -> Result<()> {
        ::log::debug!("Navigating to {}", url);
        self.client
            .goto(url)
            .await
            .map_err(|source| ScrapeError::Navigation {
                url: url.to_string(),
                source,
            })
    }

    async fn probe_more_control(&mut self) -> ControlState {
        match self.client.find(Locator::Css(selectors::MORE_CONTROL)).await {
            Ok(element) => control_state(&element).await,
            Err(_) => ControlState::Absent,
        }
    }

    async fn wait_for_more_control(&mut self, timeout: Duration) -> ControlState {
        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selectors::MORE_CONTROL))
            .await
        {
            Ok(element) => control_state(&element).await,
            Err(e) => {
                ::log::trace!("Load-more control not found: {}", e);
                ControlState::Absent
            }
        }
    }

    async fn activate_more_control(&mut self) -> Result<()> {
        let control = self.client.find(Locator::Css(selectors::MORE_CONTROL)).await?;
        control.click().await?;
        Ok(())
    }

    async fn find_cards(&mut self) -> Result<Vec<Element>> {
        Ok(self.client.find_all(Locator::Css(selectors::CARD)).await?)
    }

    async fn read_field(&mut self, card: &Element, field: Field) -> Result<Option<String>> {
        let element = match card.find(Locator::Css(field.selector())).await {
            Ok(element) => element,
            Err(e) if e.is_no_such_element() => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match field.attribute() {
            Some(name) => Ok(element.attr(name).await?),
            None => Ok(Some(element.text().await?)),
        }
    }

    async fn count_field(&mut self, card: &Element, field: Field) -> Result<usize> {
        Ok(card.find_all(Locator::Css(field.selector())).await?.len())
    }

    async fn close(self) {
        match self.client.close().await {
            Ok(()) => ::log::debug!("Closed browser session"),
            Err(e) => ::log::warn!("Failed to close browser session: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_capabilities() {
        let capabilities = browser_capabilities(true);
        assert_eq!(
            capabilities["goog:chromeOptions"]["args"][0],
            "--headless=new"
        );
        assert_eq!(capabilities["ms:edgeOptions"]["args"][0], "--headless=new");
        assert_eq!(capabilities["moz:firefoxOptions"]["args"][0], "-headless");
    }

    #[test]
    fn test_headed_capabilities_are_empty() {
        assert!(browser_capabilities(false).is_empty());
    }
}
