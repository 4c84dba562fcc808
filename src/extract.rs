use crate::crawlers::page::CatalogPage;
use crate::crawlers::selectors::Field;
use crate::error::{Result, ScrapeError};
use crate::results::RawRecord;

/// Reads the five product fields out of one card.
///
/// A missing sub-element fails the card, and with it the whole category.
pub async fn extract_record<P: CatalogPage>(
    page: &mut P,
    card: &P::Card,
    index: usize,
) -> Result<RawRecord> {
    let mut record = RawRecord::new();

    for field in [Field::Title, Field::Description] {
        let value = require(page, card, index, field).await?;
        record.insert(field.key(), value);
    }

    let price = require(page, card, index, Field::Price).await?;
    record.insert(Field::Price.key(), price_text(&price));

    let stars = page.count_field(card, Field::Rating).await?;
    record.insert(Field::Rating.key(), stars.to_string());

    let label = require(page, card, index, Field::Reviews).await?;
    let count = review_count_text(&label).ok_or(ScrapeError::MissingField {
        card: index,
        field: Field::Reviews.key(),
    })?;
    record.insert(Field::Reviews.key(), count);

    ::log::trace!("Card {}: {:?}", index, record);
    Ok(record)
}

async fn require<P: CatalogPage>(
    page: &mut P,
    card: &P::Card,
    index: usize,
    field: Field,
) -> Result<String> {
    page.read_field(card, field)
        .await?
        .ok_or(ScrapeError::MissingField {
            card: index,
            field: field.key(),
        })
}

/// Price label with the currency symbol removed, e.g. `"$19.99"` -> `"19.99"`
pub fn price_text(label: &str) -> String {
    label.replace('$', "").trim().to_string()
}

/// Leading token of a review label, e.g. `"3 reviews"` -> `"3"`
pub fn review_count_text(label: &str) -> Option<&str> {
    label.split_whitespace().next()
}
