use crate::crawlers::page::{CatalogPage, ControlState};
use crate::crawlers::selectors::{self, Field};
use crate::error::{Result, ScrapeError};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static CARD: LazyLock<Selector> = LazyLock::new(|| Selector::parse(selectors::CARD).unwrap());
static MORE_CONTROL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(selectors::MORE_CONTROL).unwrap());
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(Field::Title.selector()).unwrap());
static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(Field::Description.selector()).unwrap());
static PRICE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(Field::Price.selector()).unwrap());
static RATING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(Field::Rating.selector()).unwrap());
static REVIEWS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(Field::Reviews.selector()).unwrap());

fn field_selector(field: Field) -> &'static Selector {
    match field {
        Field::Title => &*TITLE,
        Field::Description => &*DESCRIPTION,
        Field::Price => &*PRICE,
        Field::Rating => &*RATING,
        Field::Reviews => &*REVIEWS,
    }
}

/// One product card read out of a saved page
#[derive(Debug, Clone, Default)]
pub struct SnapshotCard {
    values: HashMap<Field, String>,
    counts: HashMap<Field, usize>,
}

impl SnapshotCard {
    fn parse(card: ElementRef<'_>) -> Self {
        let mut parsed = Self::default();
        for field in Field::ALL {
            let mut matches = card.select(field_selector(field));
            let first = matches.next();
            parsed.counts.insert(field, first.map_or(0, |_| 1 + matches.count()));

            let value = first.and_then(|element| match field.attribute() {
                Some(name) => element.value().attr(name).map(str::to_string),
                None => Some(element_text(element)),
            });
            if let Some(value) = value {
                parsed.values.insert(field, value);
            }
        }
        parsed
    }
}

/// A category page saved to disk, read without a browser.
///
/// The document is parsed once up front. The "load more" control can be
/// inspected but not activated.
pub struct SnapshotPage {
    cards: Vec<SnapshotCard>,
    control: ControlState,
}

impl SnapshotPage {
    pub fn new(html: &str) -> Self {
        let doc = Html::parse_document(html);
        Self {
            cards: doc.select(&CARD).map(SnapshotCard::parse).collect(),
            control: control_state(&doc),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(&std::fs::read_to_string(path)?))
    }
}

fn control_state(doc: &Html) -> ControlState {
    let Some(control) = doc.select(&MORE_CONTROL).next() else {
        return ControlState::Absent;
    };

    let hidden = control
        .value()
        .attr("style")
        .map(|style| style.replace(' ', "").contains("display:none"))
        .unwrap_or(false);
    let disabled = control.value().attr("disabled").is_some();

    if hidden || disabled {
        ControlState::NotReady
    } else {
        ControlState::Ready
    }
}

/// Rendered text of an element with whitespace collapsed, like a browser reports it
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl CatalogPage for SnapshotPage {
    type Card = SnapshotCard;

    async fn open(&mut self, url: &str) -> Result<()> {
        ::log::debug!("Reading saved page in place of {}", url);
        Ok(())
    }

    async fn probe_more_control(&mut self) -> ControlState {
        self.control
    }

    async fn wait_for_more_control(&mut self, _timeout: Duration) -> ControlState {
        self.control
    }

    async fn activate_more_control(&mut self) -> Result<()> {
        Err(ScrapeError::Unsupported(
            "activating the load-more control of a saved page",
        ))
    }

    async fn find_cards(&mut self) -> Result<Vec<SnapshotCard>> {
        Ok(self.cards.clone())
    }

    async fn read_field(&mut self, card: &SnapshotCard, field: Field) -> Result<Option<String>> {
        Ok(card.values.get(&field).cloned())
    }

    async fn count_field(&mut self, card: &SnapshotCard, field: Field) -> Result<usize> {
        Ok(card.counts.get(&field).copied().unwrap_or(0))
    }

    async fn close(self) {}
}
