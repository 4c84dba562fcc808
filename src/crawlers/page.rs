use crate::crawlers::selectors::Field;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// What a page reports about its "load more" control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    /// Not in the page, or did not show up before the wait ran out
    Absent,
    /// Present but hidden or disabled
    NotReady,
    /// Visible and enabled
    Ready,
}

/// Capabilities a category page must offer to be crawled.
///
/// Implementations bind to the shop's markup; the crawler only sees cards,
/// fields and the state of the "load more" control.
#[async_trait]
pub trait CatalogPage: Send + Sized {
    /// Handle to one product card
    type Card: Send + Sync;

    /// Load the category page at `url`
    async fn open(&mut self, url: &str) -> Result<()>;

    /// Check for the control without waiting
    async fn probe_more_control(&mut self) -> ControlState;

    /// Wait up to `timeout` for the control to be present, then classify it
    async fn wait_for_more_control(&mut self, timeout: Duration) -> ControlState;

    /// Click the control
    async fn activate_more_control(&mut self) -> Result<()>;

    /// All product cards currently in the page, in document order
    async fn find_cards(&mut self) -> Result<Vec<Self::Card>>;

    /// Text or attribute value of a field; `None` when the sub-element is missing
    async fn read_field(&mut self, card: &Self::Card, field: Field) -> Result<Option<String>>;

    /// Number of sub-elements matching the field inside the card
    async fn count_field(&mut self, card: &Self::Card, field: Field) -> Result<usize>;

    /// Release the page. Failures are logged, never returned, so a crawl
    /// error is not masked by a teardown error.
    async fn close(self);
}
