//! Dashboard view-models and the aggregations that build them.
//!
//! Each loader returns plain data; rendering lives in [`crate::render`].

pub mod admin;
pub mod owner;
pub mod sitter;

use crate::actions::Action;
use crate::consts::dashboard_consts::PLACEHOLDER;
use crate::models::Booking;

/// A booking together with the actions the current role may take on it.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRow {
    pub booking: Booking,
    pub actions: Vec<Action>,
}

/// Optional text: blank values read as the placeholder dash.
pub(crate) fn text_or_placeholder(value: &str) -> String {
    if value.trim().is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

/// Text from a secondary that may not have arrived.
pub(crate) fn or_placeholder(value: Option<&str>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), text_or_placeholder)
}
