//! Owner dashboard views.

use super::{BookingRow, text_or_placeholder};
use crate::actions::{Action, booking_actions, owner_booking_actions};
use crate::aggregate::{Aggregated, Aggregator, Lookup};
use crate::api::ApiError;
use crate::consts::dashboard_consts::{PLACEHOLDER, RECENT_LIMIT};
use crate::models::{Booking, BookingStatus, Pet, ResourceRef, Review, ServiceWithSitter};
use crate::network::AuthenticatedIssuer;

#[derive(Debug, Clone, PartialEq)]
pub struct OwnerOverview {
    pub pet_count: usize,
    pub booking_count: usize,
    pub recent_bookings: Vec<Booking>,
}

/// A completed booking with the review the owner left for it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingReview {
    pub booking: Booking,
    pub review: Option<Review>,
    pub actions: &'static [Action],
}

/// A service search hit with its sitter fields resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceHit {
    pub service_id: ResourceRef,
    pub sitter_id: ResourceRef,
    pub kind: String,
    pub price_per_hour: f64,
    pub description: String,
    pub sitter_name: String,
    pub sitter_rating: f64,
}

/// Search filters. `None` or `"all"` means no filter on that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceQuery {
    pub kind: Option<String>,
    pub location: Option<String>,
}

fn pets_path(owner_id: ResourceRef) -> String {
    format!("/api/owners/{}/pets", owner_id)
}

fn bookings_path(owner_id: ResourceRef) -> String {
    format!("/api/owners/{}/bookings", owner_id)
}

pub async fn overview(issuer: &AuthenticatedIssuer) -> Result<OwnerOverview, ApiError> {
    let owner_id = issuer.session().user_id;
    let aggregator = Aggregator::new(issuer);
    let pets_path = pets_path(owner_id);
    let bookings_path = bookings_path(owner_id);

    let (pets, bookings) = tokio::try_join!(
        aggregator.primary_list::<Pet>(&pets_path),
        aggregator.primary_list::<Booking>(&bookings_path),
    )?;

    let overview = OwnerOverview {
        pet_count: pets.len(),
        booking_count: bookings.len(),
        recent_bookings: bookings.into_iter().take(RECENT_LIMIT).collect(),
    };
    aggregator.finish_one(overview)
}

pub async fn pets(issuer: &AuthenticatedIssuer) -> Result<Vec<Pet>, ApiError> {
    let path = pets_path(issuer.session().user_id);
    Aggregator::new(issuer).primary_list(&path).await
}

/// Bookings with the actions an owner may take. Completed bookings look up
/// their review so the review actions match; other bookings issue no lookup.
pub async fn bookings(issuer: &AuthenticatedIssuer) -> Result<Aggregated<BookingRow>, ApiError> {
    let aggregator = Aggregator::new(issuer);
    let path = bookings_path(issuer.session().user_id);
    let bookings: Vec<Booking> = aggregator.primary_list(&path).await?;

    let agg = &aggregator;
    aggregator
        .fan_out(bookings, |booking| async move {
            let has_review = booking.status == BookingStatus::Completed
                && agg
                    .secondary::<Option<Review>>(&review_path(&booking), Lookup::Optional)
                    .await
                    .value()
                    .flatten()
                    .is_some();
            BookingRow {
                actions: owner_booking_actions(booking.status, has_review),
                booking,
            }
        })
        .await
}

fn review_path(booking: &Booking) -> String {
    format!("/api/bookings/{}/review", booking.booking_id)
}

/// Completed bookings, each enriched with its review. A booking without a
/// review is a skipped lookup, not a failure, and offers "leave review".
pub async fn reviews(
    issuer: &AuthenticatedIssuer,
) -> Result<Aggregated<BookingReview>, ApiError> {
    let aggregator = Aggregator::new(issuer);
    let path = bookings_path(issuer.session().user_id);
    let completed: Vec<Booking> = aggregator
        .primary_list::<Booking>(&path)
        .await?
        .into_iter()
        .filter(|b| b.status == BookingStatus::Completed)
        .collect();

    let agg = &aggregator;
    aggregator
        .fan_out(completed, |booking| async move {
            let review = agg
                .secondary::<Option<Review>>(&review_path(&booking), Lookup::Optional)
                .await
                .value()
                .flatten();
            let actions = booking_actions(booking.status, review.is_some());
            BookingReview {
                booking,
                review,
                actions,
            }
        })
        .await
}

impl Aggregated<BookingReview> {
    /// Reviews that exist, in booking order.
    pub fn written_reviews(&self) -> impl Iterator<Item = &Review> {
        self.views.iter().filter_map(|entry| entry.review.as_ref())
    }
}

impl ServiceQuery {
    fn filter(value: &Option<String>) -> Option<&str> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
    }

    pub fn to_path(&self) -> String {
        let params: Vec<String> = [
            ("type", Self::filter(&self.kind)),
            ("location", Self::filter(&self.location)),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value.map(|v| format!("{}={}", key, urlencoding::encode(v)))
        })
        .collect();

        if params.is_empty() {
            "/api/services/search".to_string()
        } else {
            format!("/api/services/search?{}", params.join("&"))
        }
    }
}

/// Service search. Results already carry their sitter's name and rating.
pub async fn search_services(
    issuer: &AuthenticatedIssuer,
    query: &ServiceQuery,
) -> Result<Vec<ServiceHit>, ApiError> {
    let hits: Vec<ServiceWithSitter> = Aggregator::new(issuer)
        .primary_list(&query.to_path())
        .await?;
    Ok(hits
        .into_iter()
        .map(|hit| ServiceHit {
            service_id: hit.service.service_id,
            sitter_id: hit.service.sitter_id,
            kind: hit.service.kind,
            price_per_hour: hit.service.price_per_hour,
            description: text_or_placeholder(&hit.service.description),
            sitter_name: hit
                .sitter_name
                .as_deref()
                .map_or_else(|| PLACEHOLDER.to_string(), text_or_placeholder),
            sitter_rating: hit.sitter_rating.unwrap_or(0.0),
        })
        .collect())
}
