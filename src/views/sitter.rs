//! Sitter dashboard views.

use super::BookingRow;
use crate::actions::sitter_booking_actions;
use crate::aggregate::{Aggregator, Lookup};
use crate::api::ApiError;
use crate::models::{
    Booking, BookingStatus, RatingSummary, ResourceRef, Review, Service, SitterDetails,
};
use crate::network::AuthenticatedIssuer;

#[derive(Debug, Clone, PartialEq)]
pub struct SitterOverview {
    pub services: Vec<Service>,
    pub booking_count: usize,
    pub pending_requests: Vec<BookingRow>,
    pub rating: RatingSummary,
    /// False when the rating could not be loaded and shows defaults.
    pub rating_loaded: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitterReviews {
    pub reviews: Vec<Review>,
    pub rating: RatingSummary,
    pub rating_loaded: bool,
}

fn services_path(id: ResourceRef) -> String {
    format!("/api/sitters/{}/services", id)
}

fn bookings_path(id: ResourceRef) -> String {
    format!("/api/sitters/{}/bookings", id)
}

fn rating_path(id: ResourceRef) -> String {
    format!("/api/sitters/{}/rating", id)
}

fn rows(bookings: Vec<Booking>) -> Vec<BookingRow> {
    bookings
        .into_iter()
        .map(|booking| BookingRow {
            actions: sitter_booking_actions(booking.status),
            booking,
        })
        .collect()
}

/// Services and bookings are primaries; the rating is a secondary and falls
/// back to zero. All three requests are in flight together.
pub async fn overview(issuer: &AuthenticatedIssuer) -> Result<SitterOverview, ApiError> {
    let sitter_id = issuer.session().user_id;
    let aggregator = Aggregator::new(issuer);
    let services_path = services_path(sitter_id);
    let bookings_path = bookings_path(sitter_id);
    let rating_path = rating_path(sitter_id);

    let (primaries, rating) = tokio::join!(
        async {
            tokio::try_join!(
                aggregator.primary_list::<Service>(&services_path),
                aggregator.primary_list::<Booking>(&bookings_path),
            )
        },
        aggregator.secondary::<RatingSummary>(&rating_path, Lookup::Required),
    );
    let (services, bookings) = primaries?;
    let rating_loaded = rating.is_success();

    let booking_count = bookings.len();
    let pending = bookings
        .into_iter()
        .filter(|b| b.status == BookingStatus::Pending)
        .collect();

    let overview = SitterOverview {
        services,
        booking_count,
        pending_requests: rows(pending),
        rating: rating.unwrap_or_default(),
        rating_loaded,
    };
    aggregator.finish_one(overview)
}

pub async fn bookings(issuer: &AuthenticatedIssuer) -> Result<Vec<BookingRow>, ApiError> {
    let path = bookings_path(issuer.session().user_id);
    let bookings = Aggregator::new(issuer).primary_list::<Booking>(&path).await?;
    Ok(rows(bookings))
}

pub async fn reviews(issuer: &AuthenticatedIssuer) -> Result<SitterReviews, ApiError> {
    let sitter_id = issuer.session().user_id;
    let aggregator = Aggregator::new(issuer);
    let reviews_path = format!("/api/sitters/{}/reviews", sitter_id);
    let rating_path = rating_path(sitter_id);

    let (reviews, rating) = tokio::join!(
        aggregator.primary_list::<Review>(&reviews_path),
        aggregator.secondary::<RatingSummary>(&rating_path, Lookup::Required),
    );
    let rating_loaded = rating.is_success();
    let view = SitterReviews {
        reviews: reviews?,
        rating: rating.unwrap_or_default(),
        rating_loaded,
    };
    aggregator.finish_one(view)
}

/// The sitter's own account record, including its moderation status.
pub async fn profile(issuer: &AuthenticatedIssuer) -> Result<SitterDetails, ApiError> {
    let path = format!("/api/admin/sitters/{}", issuer.session().user_id);
    Aggregator::new(issuer).primary(&path).await
}
