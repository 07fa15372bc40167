//! Contact handoff for Karia Mitra search results.
//!
//! Turns a selected [`SearchResultItem`](karia_search::SearchResultItem)
//! into a `tel:` or `https://wa.me/` deep link. Professionals without a
//! listed phone are reached through the mediator's WhatsApp number with a
//! prefilled message naming them and their expertise.

mod action;
mod error;
mod planner;
mod template;

pub use action::ContactAction;
pub use error::{ContactError, Result};
pub use planner::{Channel, ContactPlanner};
pub use template::MessageTemplate;
