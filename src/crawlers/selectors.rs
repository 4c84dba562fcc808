//! Markup contract of the demo shop.
//!
//! Every class name the crawler depends on lives here; when the site changes its
//! markup, this is the only file that should need updating.

/// Product card container
pub const CARD: &str = ".card-body";

/// The "load more" control below the product grid
pub const MORE_CONTROL: &str = ".ecomerce-items-scroll-more";

/// Attribute of the title link holding the full, untruncated product name
pub const TITLE_ATTR: &str = "title";

/// A value read from inside a product card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    Price,
    /// Star icons; counted rather than read
    Rating,
    Reviews,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Description,
        Field::Price,
        Field::Rating,
        Field::Reviews,
    ];

    /// CSS selector of the sub-element, relative to the card
    pub fn selector(self) -> &'static str {
        match self {
            Field::Title => ".title",
            Field::Description => ".description",
            Field::Price => ".price",
            Field::Rating => ".ws-icon-star",
            Field::Reviews => ".review-count",
        }
    }

    /// Attribute holding the value, when the text content is not used
    pub fn attribute(self) -> Option<&'static str> {
        match self {
            Field::Title => Some(TITLE_ATTR),
            _ => None,
        }
    }

    /// Record key and CSV column the field is stored under
    pub fn key(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Price => "price",
            Field::Rating => "rating",
            Field::Reviews => "num_of_reviews",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::CSV_SCHEMA;

    #[test]
    fn test_field_keys_follow_csv_schema() {
        let keys: Vec<&str> = Field::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(keys, CSV_SCHEMA);
    }
}
