//! Prefilled message skeletons.
//!
//! Record values are interpolated verbatim; no trimming beyond what the
//! field mapping already did, no escaping.

use karia_search::SearchResultItem;

const GREETING: &str = "Hello Karia Mitra";

/// Fixed message skeletons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageTemplate {
    /// Book a professional through the mediator
    Booking {
        /// Professional's name
        name: String,
        /// Category label (Engineers, Labour, ...)
        category: String,
        /// Expertise or specialisation
        offer: Option<String>,
        /// Listed phone, if any
        phone: Option<String>,
    },
    /// Ask about a shop or an item
    Enquiry {
        /// Shop or item name
        name: String,
        /// Category label
        category: String,
        /// Category, price or other offer text
        offer: Option<String>,
    },
    /// General support request
    Support,
}

impl MessageTemplate {
    /// Pick the skeleton for a search result.
    #[must_use]
    pub fn for_item(item: &SearchResultItem) -> Self {
        let name = item.display_name().to_string();
        let category = item.source_display.clone();
        match item.source.as_str() {
            "shops" | "items" => Self::Enquiry {
                name,
                category,
                offer: item.offer.clone(),
            },
            _ => Self::Booking {
                name,
                category,
                offer: item.offer.clone(),
                phone: item.phone.clone(),
            },
        }
    }

    /// Message text.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Booking {
                name,
                category,
                offer,
                phone,
            } => {
                let mut text = format!("{GREETING}, I would like to book {name} ({category})");
                if let Some(offer) = offer {
                    text.push_str(&format!(" for {offer}"));
                }
                text.push_str(". Please connect me.");
                if let Some(phone) = phone {
                    text.push_str(&format!(" Listed number: {phone}."));
                }
                text
            }
            Self::Enquiry {
                name,
                category,
                offer,
            } => {
                let mut text = format!("{GREETING}, I am interested in {name} from {category}");
                if let Some(offer) = offer {
                    text.push_str(&format!(" ({offer})"));
                }
                text.push_str(". Please share availability and price.");
                text
            }
            Self::Support => format!("{GREETING} support, I need help with the app."),
        }
    }
}
