use crate::config::PaginationPolicy;
use crate::crawlers::page::{CatalogPage, ControlState};
use crate::error::Result;
use crate::extract::extract_record;
use crate::results::{Product, build_products};

/// Why the "load more" loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Never present, or gone after the last activation
    Absent,
    /// Present but hidden or disabled once the retry budget ran out
    NotReady,
    /// The click was rejected
    ActivationFailed,
    /// `max_activations` reached
    LimitReached,
}

/// Result of expanding one category page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationOutcome {
    pub activations: usize,
    pub stop: StopReason,
}

#[derive(Debug)]
enum PaginationState {
    Probing,
    Expanding,
    Done(StopReason),
}

/// Clicks the "load more" control until it is exhausted or unusable.
///
/// Never fails: every problem with the control ends the loop instead.
pub async fn expand<P: CatalogPage>(page: &mut P, policy: &PaginationPolicy) -> PaginationOutcome {
    let mut state = PaginationState::Probing;
    let mut activations = 0;
    let mut retries_left = policy.not_ready_retries;

    loop {
        state = match state {
            PaginationState::Probing => match page.probe_more_control().await {
                ControlState::Absent => PaginationState::Done(StopReason::Absent),
                _ => PaginationState::Expanding,
            },
            PaginationState::Expanding if activations >= policy.max_activations => {
                ::log::warn!(
                    "Stopping after {} load-more activations",
                    policy.max_activations
                );
                PaginationState::Done(StopReason::LimitReached)
            }
            PaginationState::Expanding => match page.wait_for_more_control(policy.wait()).await {
                ControlState::Ready => match page.activate_more_control().await {
                    Ok(()) => {
                        activations += 1;
                        retries_left = policy.not_ready_retries;
                        ::log::debug!("Activated load-more control ({})", activations);
                        PaginationState::Expanding
                    }
                    Err(e) => {
                        ::log::debug!("Load-more control could not be activated: {}", e);
                        PaginationState::Done(StopReason::ActivationFailed)
                    }
                },
                ControlState::NotReady if retries_left > 0 => {
                    retries_left -= 1;
                    ::log::debug!(
                        "Load-more control not ready, retrying ({} left)",
                        retries_left
                    );
                    tokio::time::sleep(policy.wait()).await;
                    PaginationState::Expanding
                }
                ControlState::NotReady => PaginationState::Done(StopReason::NotReady),
                ControlState::Absent => PaginationState::Done(StopReason::Absent),
            },
            PaginationState::Done(stop) => return PaginationOutcome { activations, stop },
        };
    }
}

/// Loads a category page, expands it fully and returns its products in page order.
///
/// Navigation and extraction errors abort the category; pagination problems do not.
pub async fn crawl_category<P: CatalogPage>(
    page: &mut P,
    url: &str,
    policy: &PaginationPolicy,
) -> Result<Vec<Product>> {
    page.open(url).await?;

    let outcome = expand(page, policy).await;
    ::log::debug!(
        "Expanded {} with {} activations, stopped: {:?}",
        url,
        outcome.activations,
        outcome.stop
    );

    let cards = page.find_cards().await?;
    ::log::debug!("Found {} product cards in {}", cards.len(), url);

    let mut records = Vec::with_capacity(cards.len());
    for (index, card) in cards.iter().enumerate() {
        records.push(extract_record(page, card, index).await?);
    }

    build_products(records)
}
