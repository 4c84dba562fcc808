pub mod category;
pub mod page;
pub mod selectors;
pub mod snapshot;
pub mod web;

#[cfg(test)]
mod tests;

pub use category::{PaginationOutcome, StopReason, crawl_category, expand};
pub use page::{CatalogPage, ControlState};
pub use snapshot::SnapshotPage;
pub use web::BrowserSession;
