mod pagination_tests;

use crate::crawlers::page::{CatalogPage, ControlState};
use crate::crawlers::selectors::Field;
use crate::error::{Result, ScrapeError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory product card
#[derive(Debug, Clone)]
pub struct MockCard {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub stars: usize,
    pub reviews: Option<String>,
}

impl MockCard {
    pub fn new(title: &str, price: &str, stars: usize, reviews: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            description: Some(format!("{} description", title)),
            price: Some(price.to_string()),
            stars,
            reviews: Some(reviews.to_string()),
        }
    }
}

/// A page whose "load more" control follows a fixed script.
///
/// `wait_for_more_control` pops the next state, reporting `Absent` once the
/// script is used up. Each activation reveals `batch` more cards.
pub struct ScriptedPage {
    pub probe: ControlState,
    pub script: VecDeque<ControlState>,
    pub reject_clicks: bool,
    pub fail_open: Option<&'static str>,
    pub cards: Vec<MockCard>,
    pub batch: usize,
    pub activations: usize,
    pub waits: usize,
    pub opened: Vec<String>,
    /// Shared so it can be read after the page is consumed by `close`
    pub closes: Arc<AtomicUsize>,
}

impl ScriptedPage {
    pub fn new(probe: ControlState, script: Vec<ControlState>) -> Self {
        Self {
            probe,
            script: script.into(),
            reject_clicks: false,
            fail_open: None,
            cards: Vec::new(),
            batch: usize::MAX,
            activations: 0,
            waits: 0,
            opened: Vec::new(),
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_cards(mut self, cards: Vec<MockCard>, batch: usize) -> Self {
        self.cards = cards;
        self.batch = batch;
        self
    }

    fn visible(&self) -> usize {
        self.batch
            .saturating_mul(self.activations + 1)
            .min(self.cards.len())
    }
}

#[async_trait]
impl CatalogPage for ScriptedPage {
    type Card = usize;

    async fn open(&mut self, url: &str) -> Result<()> {
        if let Some(fragment) = self.fail_open {
            if url.contains(fragment) {
                return Err(ScrapeError::Unsupported("navigation"));
            }
        }
        self.opened.push(url.to_string());
        self.activations = 0;
        Ok(())
    }

    async fn probe_more_control(&mut self) -> ControlState {
        self.probe
    }

    async fn wait_for_more_control(&mut self, _timeout: Duration) -> ControlState {
        self.waits += 1;
        self.script.pop_front().unwrap_or(ControlState::Absent)
    }

    async fn activate_more_control(&mut self) -> Result<()> {
        if self.reject_clicks {
            return Err(ScrapeError::Unsupported("click"));
        }
        self.activations += 1;
        Ok(())
    }

    async fn find_cards(&mut self) -> Result<Vec<usize>> {
        Ok((0..self.visible()).collect())
    }

    async fn read_field(&mut self, card: &usize, field: Field) -> Result<Option<String>> {
        let card = &self.cards[*card];
        Ok(match field {
            Field::Title => card.title.clone(),
            Field::Description => card.description.clone(),
            Field::Price => card.price.clone(),
            Field::Rating => None,
            Field::Reviews => card.reviews.clone(),
        })
    }

    async fn count_field(&mut self, card: &usize, field: Field) -> Result<usize> {
        Ok(match field {
            Field::Rating => self.cards[*card].stars,
            _ => 0,
        })
    }

    async fn close(self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
