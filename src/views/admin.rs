//! Admin dashboard views: overview, users, sitter roster, moderation queue,
//! sitter detail card.

use super::{or_placeholder, text_or_placeholder};
use crate::actions::{Action, sitter_actions};
use crate::aggregate::{Aggregated, Aggregator, Lookup};
use crate::api::ApiError;
use crate::consts::dashboard_consts::RECENT_LIMIT;
use crate::models::{
    RatingSummary, ResourceRef, Review, Role, Service, Sitter, SitterDetails, SitterStatus, User,
};
use crate::network::AuthenticatedIssuer;

#[derive(Debug, Clone, PartialEq)]
pub struct AdminOverview {
    pub total_users: usize,
    pub total_sitters: usize,
    pub pending_sitters: usize,
    pub approved_sitters: usize,
    pub recent_users: Vec<User>,
}

/// One line of the sitter roster.
#[derive(Debug, Clone, PartialEq)]
pub struct SitterRow {
    pub sitter_id: ResourceRef,
    pub full_name: String,
    pub email: String,
    pub location: String,
    pub experience_years: i64,
    pub status: SitterStatus,
    pub rating: f64,
    pub review_count: i64,
}

/// A pending application awaiting moderation.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationCard {
    pub sitter_id: ResourceRef,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub experience_years: i64,
    pub location: String,
    pub certificates: String,
    pub status: SitterStatus,
    pub actions: &'static [Action],
}

/// Everything shown on the sitter detail card. Each section is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct SitterDetailView {
    pub sitter_id: ResourceRef,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub experience_years: i64,
    pub location: String,
    pub status: SitterStatus,
    pub services: Vec<Service>,
    pub reviews: Vec<Review>,
    pub actions: &'static [Action],
}

const USERS: &str = "/api/admin/users";
const PENDING_SITTERS: &str = "/api/admin/sitters/pending";

fn sitter_details_path(id: ResourceRef) -> String {
    format!("/api/admin/sitters/{}", id)
}

fn sitter_rating_path(id: ResourceRef) -> String {
    format!("/api/sitters/{}/rating", id)
}

/// Users plus pending sitters, both primary and fetched together.
pub async fn overview(issuer: &AuthenticatedIssuer) -> Result<AdminOverview, ApiError> {
    let aggregator = Aggregator::new(issuer);
    let (users, pending) = tokio::try_join!(
        aggregator.primary_list::<User>(USERS),
        aggregator.primary_list::<Sitter>(PENDING_SITTERS),
    )?;

    let total_sitters = users.iter().filter(|u| u.role == Role::Sitter).count();
    let pending_sitters = pending.len();
    let overview = AdminOverview {
        total_users: users.len(),
        total_sitters,
        pending_sitters,
        approved_sitters: total_sitters.saturating_sub(pending_sitters),
        recent_users: users.into_iter().take(RECENT_LIMIT).collect(),
    };
    aggregator.finish_one(overview)
}

pub async fn users(issuer: &AuthenticatedIssuer) -> Result<Vec<User>, ApiError> {
    Aggregator::new(issuer).primary_list(USERS).await
}

/// Sitter roster: users with the sitter role, enriched with profile and rating.
pub async fn sitter_roster(
    issuer: &AuthenticatedIssuer,
) -> Result<Aggregated<SitterRow>, ApiError> {
    let aggregator = Aggregator::new(issuer);
    let sitters: Vec<User> = aggregator
        .primary_list::<User>(USERS)
        .await?
        .into_iter()
        .filter(|u| u.role == Role::Sitter)
        .collect();

    let agg = &aggregator;
    aggregator
        .fan_out(sitters, |user| async move {
            let details_path = sitter_details_path(user.user_id);
            let rating_path = sitter_rating_path(user.user_id);
            let (details, rating) = tokio::join!(
                agg.secondary::<SitterDetails>(&details_path, Lookup::Required),
                agg.secondary::<RatingSummary>(&rating_path, Lookup::Required),
            );
            let details = details.value();
            let d = details.as_ref();
            let rating = rating.unwrap_or_default();

            SitterRow {
                sitter_id: user.user_id,
                full_name: user.full_name,
                email: user.email,
                location: or_placeholder(d.map(|d| d.sitter.location.as_str())),
                experience_years: d.map_or(0, |d| d.sitter.experience_years),
                status: d.map_or(SitterStatus::Unknown, |d| d.sitter.status),
                rating: rating.average_rating,
                review_count: rating.review_count,
            }
        })
        .await
}

/// Moderation queue: pending applications enriched with the applicant's account fields.
pub async fn moderation_queue(
    issuer: &AuthenticatedIssuer,
) -> Result<Aggregated<ModerationCard>, ApiError> {
    let aggregator = Aggregator::new(issuer);
    let pending = aggregator.primary_list::<Sitter>(PENDING_SITTERS).await?;

    let agg = &aggregator;
    aggregator
        .fan_out(pending, |sitter| async move {
            let path = sitter_details_path(sitter.sitter_id);
            let details = agg
                .secondary::<SitterDetails>(&path, Lookup::Required)
                .await
                .value();
            let d = details.as_ref();

            ModerationCard {
                sitter_id: sitter.sitter_id,
                full_name: or_placeholder(d.map(|d| d.full_name.as_str())),
                email: or_placeholder(d.map(|d| d.email.as_str())),
                phone: or_placeholder(d.map(|d| d.phone.as_str())),
                experience_years: sitter.experience_years,
                location: text_or_placeholder(&sitter.location),
                certificates: text_or_placeholder(&sitter.certificates),
                status: sitter.status,
                actions: sitter_actions(sitter.status),
            }
        })
        .await
}

/// Sitter detail card. Profile, reviews and services are fetched together and
/// each falls back independently.
pub async fn sitter_detail(
    issuer: &AuthenticatedIssuer,
    sitter_id: ResourceRef,
) -> Result<SitterDetailView, ApiError> {
    let aggregator = Aggregator::new(issuer);
    let details_path = sitter_details_path(sitter_id);
    let reviews_path = format!("/api/sitters/{}/reviews", sitter_id);
    let services_path = format!("/api/sitters/{}/services", sitter_id);

    let (details, reviews, services) = tokio::join!(
        aggregator.secondary::<SitterDetails>(&details_path, Lookup::Optional),
        aggregator.secondary::<Option<Vec<Review>>>(&reviews_path, Lookup::Optional),
        aggregator.secondary::<Option<Vec<Service>>>(&services_path, Lookup::Optional),
    );
    let details = details.value();
    let d = details.as_ref();
    let status = d.map_or(SitterStatus::Unknown, |d| d.sitter.status);

    let view = SitterDetailView {
        sitter_id,
        full_name: or_placeholder(d.map(|d| d.full_name.as_str())),
        email: or_placeholder(d.map(|d| d.email.as_str())),
        phone: or_placeholder(d.map(|d| d.phone.as_str())),
        experience_years: d.map_or(0, |d| d.sitter.experience_years),
        location: or_placeholder(d.map(|d| d.sitter.location.as_str())),
        status,
        services: services.unwrap_or_default().unwrap_or_default(),
        reviews: reviews.unwrap_or_default().unwrap_or_default(),
        actions: sitter_actions(status),
    };
    aggregator.finish_one(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::testing::issuer_over;
    use crate::api::scripted::ScriptedTransport;

    const USERS_JSON: &str = r#"[
        {"user_id": 1, "full_name": "Asel", "email": "asel@example.com", "phone": "1", "role": "sitter"},
        {"user_id": 2, "full_name": "Bolat", "email": "bolat@example.com", "phone": "2", "role": "sitter"},
        {"user_id": 5, "full_name": "Olga", "email": "olga@example.com", "phone": "5", "role": "owner"},
        {"user_id": 3, "full_name": "Dana", "email": "dana@example.com", "phone": "3", "role": "sitter"}
    ]"#;

    fn details_json(id: i64, location: &str, years: i64, status: &str) -> String {
        format!(
            r#"{{"sitter_id":{id},"experience_years":{years},"location":"{location}","status":"{status}",
                "full_name":"Sitter {id}","email":"s{id}@example.com","phone":"+7{id}"}}"#
        )
    }

    fn rating_json(avg: f64, count: i64) -> String {
        format!(r#"{{"average_rating":{avg},"review_count":{count}}}"#)
    }

    #[tokio::test]
    async fn roster_degrades_only_the_failed_rating() {
        let transport = ScriptedTransport::new()
            .route("/api/admin/users", 200, USERS_JSON)
            .route("/api/admin/sitters/1", 200, details_json(1, "Almaty", 4, "approved"))
            .route("/api/admin/sitters/2", 200, details_json(2, "Astana", 2, "approved"))
            .route("/api/admin/sitters/3", 200, details_json(3, "Shymkent", 7, "pending"))
            .route_delayed("/api/sitters/1/rating", 20, 200, rating_json(4.5, 10))
            .fail(
                "/api/sitters/2/rating",
                ApiError::Transport("connection reset by peer".into()),
            )
            .route("/api/sitters/3/rating", 200, rating_json(3.0, 1));
        let issuer = issuer_over(transport);

        let roster = sitter_roster(&issuer).await.unwrap();

        assert_eq!(roster.views.len(), 3);
        assert_eq!(roster.failed, 1);
        let ids: Vec<_> = roster.views.iter().map(|r| r.sitter_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let second = &roster.views[1];
        assert_eq!(second.rating, 0.0);
        assert_eq!(second.review_count, 0);
        assert_eq!(second.location, "Astana");
        assert_eq!(second.experience_years, 2);
        assert_eq!(second.full_name, "Bolat");

        assert_eq!(roster.views[0].rating, 4.5);
        assert_eq!(roster.views[0].location, "Almaty");
        assert_eq!(roster.views[2].rating, 3.0);
        assert_eq!(roster.views[2].status, SitterStatus::Pending);
    }

    #[tokio::test]
    async fn roster_survives_every_secondary_failing() {
        let transport = ScriptedTransport::new().route("/api/admin/users", 200, USERS_JSON);
        let issuer = issuer_over(transport);

        let roster = sitter_roster(&issuer).await.unwrap();

        assert_eq!(roster.views.len(), 3);
        assert_eq!(roster.failed, 6);
        for row in &roster.views {
            assert_eq!(row.rating, 0.0);
            assert_eq!(row.location, "-");
            assert_eq!(row.experience_years, 0);
            assert_eq!(row.status, SitterStatus::Unknown);
            assert!(!row.full_name.is_empty());
        }
    }

    #[tokio::test]
    async fn roster_primary_failure_yields_no_rows() {
        let transport = ScriptedTransport::new()
            .route("/api/admin/users", 500, r#"{"error":"database unavailable"}"#)
            .route("/api/admin/sitters/1", 200, details_json(1, "Almaty", 4, "approved"));
        let issuer = issuer_over(transport);

        let err = sitter_roster(&issuer).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 500,
                message: "database unavailable".to_string()
            }
        );
    }

    #[tokio::test]
    async fn moderation_cards_carry_actions_and_placeholders() {
        let transport = ScriptedTransport::new()
            .route(
                "/api/admin/sitters/pending",
                200,
                r#"[
                    {"sitter_id": 8, "experience_years": 1, "location": "", "status": "pending"},
                    {"sitter_id": 9, "experience_years": 6, "location": "Taraz", "status": "pending"}
                ]"#,
            )
            .route("/api/admin/sitters/8", 200, details_json(8, "", 1, "pending"))
            .route("/api/admin/sitters/9", 503, "");
        let issuer = issuer_over(transport);

        let queue = moderation_queue(&issuer).await.unwrap();

        assert_eq!(queue.views.len(), 2);
        assert_eq!(queue.views[0].full_name, "Sitter 8");
        assert_eq!(queue.views[0].location, "-");
        assert_eq!(queue.views[0].actions, &[Action::Approve, Action::Reject]);
        assert_eq!(queue.views[1].full_name, "-");
        assert_eq!(queue.views[1].phone, "-");
        assert_eq!(queue.views[1].location, "Taraz");
        assert_eq!(queue.failed, 1);
    }

    #[tokio::test]
    async fn empty_moderation_queue() {
        let transport = ScriptedTransport::new().route("/api/admin/sitters/pending", 200, "null");
        let issuer = issuer_over(transport);

        let queue = moderation_queue(&issuer).await.unwrap();
        assert!(queue.views.is_empty());
    }

    #[tokio::test]
    async fn detail_sections_fall_back_independently() {
        let transport = ScriptedTransport::new()
            .route("/api/admin/sitters/4", 200, details_json(4, "Almaty", 3, "approved"))
            .route("/api/sitters/4/reviews", 500, "")
            .route(
                "/api/sitters/4/services",
                200,
                r#"[{"service_id":1,"sitter_id":4,"type":"walking","price_per_hour":2500}]"#,
            );
        let issuer = issuer_over(transport);

        let detail = sitter_detail(&issuer, 4).await.unwrap();
        assert_eq!(detail.full_name, "Sitter 4");
        assert_eq!(detail.status, SitterStatus::Approved);
        assert!(detail.actions.is_empty());
        assert!(detail.reviews.is_empty());
        assert_eq!(detail.services.len(), 1);
        assert_eq!(detail.services[0].kind, "walking");
    }

    #[tokio::test]
    async fn overview_counts() {
        let transport = ScriptedTransport::new()
            .route("/api/admin/users", 200, USERS_JSON)
            .route(
                "/api/admin/sitters/pending",
                200,
                r#"[{"sitter_id": 3, "status": "pending"}]"#,
            );
        let issuer = issuer_over(transport);

        let overview = overview(&issuer).await.unwrap();
        assert_eq!(overview.total_users, 4);
        assert_eq!(overview.total_sitters, 3);
        assert_eq!(overview.pending_sitters, 1);
        assert_eq!(overview.approved_sitters, 2);
        assert_eq!(overview.recent_users.len(), 4);
    }
}
