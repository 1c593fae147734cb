//! Backend mutations and login.
//!
//! Thin pass-throughs: each call either succeeds or surfaces the backend's
//! error message. Everything except login goes through the authenticated
//! issuer.

use crate::api::{ApiError, ApiRequest, Transport, resolve_url};
use crate::models::{LoginRequest, LoginResponse, NewReview, ResourceRef, ReviewUpdate, Role};
use crate::network::AuthenticatedIssuer;
use crate::session::Session;
use log::debug;
use reqwest::Method;

/// Exchanges credentials for a session. Does not persist it.
pub async fn login(
    transport: &dyn Transport,
    email: &str,
    password: &str,
) -> Result<Session, ApiError> {
    let body = LoginRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    let bytes = serde_json::to_vec(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
    let request = ApiRequest::new(
        Method::POST,
        resolve_url(transport.base_url(), "/api/auth/login"),
    )
    .with_header("Content-Type", "application/json")
    .with_body(bytes);

    debug!("POST /api/auth/login for {}", body.email);
    let response = transport.send(request).await?;
    // No session exists yet, so a 401 here is rejected credentials.
    if response.status == 401 {
        return Err(ApiError::Validation {
            message: ApiError::message_of(&response),
        });
    }
    let login: LoginResponse = response.error_for_status()?.json()?;
    if login.token.is_empty() {
        return Err(ApiError::Decode("login response carried no token".to_string()));
    }
    if login.role == Role::Unknown {
        return Err(ApiError::Decode(
            "login response carried a role this client does not support".to_string(),
        ));
    }

    Ok(Session {
        token: login.token,
        user_id: login.user_id,
        role: login.role,
        email: if login.email.is_empty() {
            body.email
        } else {
            login.email
        },
        full_name: login.full_name,
    })
}

pub async fn approve_sitter(
    issuer: &AuthenticatedIssuer,
    id: ResourceRef,
) -> Result<(), ApiError> {
    let path = format!("/api/admin/sitters/{}/approve", id);
    issuer.send_empty(Method::POST, &path).await.map(drop)
}

pub async fn reject_sitter(
    issuer: &AuthenticatedIssuer,
    id: ResourceRef,
) -> Result<(), ApiError> {
    let path = format!("/api/admin/sitters/{}/reject", id);
    issuer.send_empty(Method::POST, &path).await.map(drop)
}

pub async fn delete_user(
    issuer: &AuthenticatedIssuer,
    id: ResourceRef,
) -> Result<(), ApiError> {
    let path = format!("/api/admin/users/{}", id);
    issuer.send_empty(Method::DELETE, &path).await.map(drop)
}

/// Booking transitions exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Transition {
    Confirm,
    Cancel,
    Complete,
}

pub async fn transition_booking(
    issuer: &AuthenticatedIssuer,
    booking_id: ResourceRef,
    transition: Transition,
) -> Result<(), ApiError> {
    let path = format!("/api/bookings/{}/{}", booking_id, transition);
    issuer.send_empty(Method::POST, &path).await.map(drop)
}

pub async fn create_review(
    issuer: &AuthenticatedIssuer,
    review: &NewReview,
) -> Result<(), ApiError> {
    issuer
        .send_json(Method::POST, "/api/reviews", review)
        .await
        .map(drop)
}

pub async fn update_review(
    issuer: &AuthenticatedIssuer,
    review_id: ResourceRef,
    update: &ReviewUpdate,
) -> Result<(), ApiError> {
    let path = format!("/api/reviews/{}", review_id);
    issuer.send_json(Method::PUT, &path, update).await.map(drop)
}

pub async fn delete_review(
    issuer: &AuthenticatedIssuer,
    review_id: ResourceRef,
) -> Result<(), ApiError> {
    let path = format!("/api/reviews/{}", review_id);
    issuer.send_empty(Method::DELETE, &path).await.map(drop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::testing::issuer_as;
    use crate::api::scripted::ScriptedTransport;
    use crate::api::{ApiResponse, MockTransport};

    #[tokio::test]
    async fn login_builds_a_session() {
        let mut transport = MockTransport::new();
        transport.expect_base_url().return_const("http://backend.test".to_string());
        transport
            .expect_send()
            .withf(|req| {
                req.method == Method::POST
                    && req.url == "http://backend.test/api/auth/login"
                    && req.header("authorization").is_none()
                    && req.header("content-type") == Some("application/json")
            })
            .times(1)
            .returning(|_| {
                Ok(ApiResponse::new(
                    200,
                    r#"{"token":"abc","user_id":5,"role":"owner","email":"o@example.com","full_name":"Olga"}"#,
                ))
            });

        let session = login(&transport, " o@example.com ", "secret").await.unwrap();
        assert_eq!(session.token, "abc");
        assert_eq!(session.user_id, 5);
        assert_eq!(session.role, Role::Owner);
        assert_eq!(session.full_name, "Olga");
    }

    #[tokio::test]
    async fn login_surfaces_the_backend_message() {
        let mut transport = MockTransport::new();
        transport.expect_base_url().return_const("http://backend.test".to_string());
        transport.expect_send().returning(|_| {
            Ok(ApiResponse::new(400, r#"{"error":"invalid credentials"}"#))
        });

        let err = login(&transport, "o@example.com", "wrong").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Validation {
                message: "invalid credentials".to_string()
            }
        );
    }

    #[tokio::test]
    async fn login_rejected_credentials_keep_the_backend_message() {
        let mut transport = MockTransport::new();
        transport.expect_base_url().return_const("http://backend.test".to_string());
        transport.expect_send().times(1).returning(|_| {
            Ok(ApiResponse::new(401, r#"{"error":"invalid email or password"}"#))
        });

        let err = login(&transport, "o@example.com", "wrong").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Validation {
                message: "invalid email or password".to_string()
            }
        );
        assert_eq!(err.to_string(), "Rejected by the server: invalid email or password");
    }

    #[tokio::test]
    async fn login_refuses_an_unknown_role() {
        let mut transport = MockTransport::new();
        transport.expect_base_url().return_const("http://backend.test".to_string());
        transport.expect_send().returning(|_| {
            Ok(ApiResponse::new(
                200,
                r#"{"token":"abc","user_id":5,"role":"superuser","email":"s@example.com"}"#,
            ))
        });

        let err = login(&transport, "s@example.com", "secret").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert!(err.to_string().contains("role"));
    }

    #[tokio::test]
    async fn transitions_post_to_the_named_endpoint() {
        let transport = ScriptedTransport::new().route("/api/bookings/9/complete", 200, "{}");
        let issuer = issuer_as(Role::Sitter, 7, transport);

        transition_booking(&issuer, 9, Transition::Complete).await.unwrap();
        let err = transition_booking(&issuer, 9, Transition::Confirm)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn review_validation_errors_carry_the_message() {
        let transport = ScriptedTransport::new().route(
            "/api/reviews",
            422,
            r#"{"error":"rating must be between 1 and 5"}"#,
        );
        let issuer = issuer_as(Role::Owner, 42, transport);
        let review = NewReview {
            booking_id: 1,
            sitter_id: 7,
            rating: 9,
            comment: String::new(),
        };

        let err = create_review(&issuer, &review).await.unwrap_err();
        assert_eq!(err.to_string(), "Rejected by the server: rating must be between 1 and 5");
    }

    #[tokio::test]
    async fn moderation_and_deletion() {
        let transport = ScriptedTransport::new()
            .route("/api/admin/sitters/3/approve", 200, "")
            .route("/api/admin/sitters/4/reject", 204, "")
            .route("/api/admin/users/5", 404, r#"{"error":"user not found"}"#);
        let issuer = issuer_as(Role::Admin, 1, transport);

        approve_sitter(&issuer, 3).await.unwrap();
        reject_sitter(&issuer, 4).await.unwrap();
        let err = delete_user(&issuer, 5).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
