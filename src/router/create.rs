use std::sync::Arc;

use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use crate::error::Result;
use crate::router::Valid;
use crate::user::UserBuilder;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Body {
    #[validate(
        length(min = 2, max = 32),
        custom(
            function = "crate::router::validate_username",
            message = "Username must be alphanumeric."
        )
    )]
    pub username: String,
    #[validate(email(message = "Email must be formatted."))]
    pub email: String,
}

/// Handler to create user.
///
/// Success carries no body: the row belongs to the backend once committed.
pub async fn handler(
    State(state): State<AppState>,
    Valid(body): Valid<Body>,
) -> Result<StatusCode> {
    UserBuilder::new()
        .username(body.username)
        .email(body.email)
        .build(state.db.postgres.clone(), Arc::clone(&state.hasher))
        .create_user()
        .await?;

    Ok(StatusCode::CREATED)
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;
    use crate::*;
    use axum::http::{Method, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use sqlx::{Pool, Postgres};

    #[sqlx::test]
    async fn test_create_handler(pool: Pool<Postgres>) {
        let state = router::state(pool);
        let app = app(state);

        let req_body = router::create::Body {
            username: "testuser".into(),
            email: "test@example.com".into(),
        };
        let response = make_request(
            app,
            Method::POST,
            "/create",
            json!(req_body).to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[sqlx::test]
    async fn test_create_with_taken_username(pool: Pool<Postgres>) {
        let state = router::state(pool);
        let app = app(state);

        let first = router::create::Body {
            username: "testuser".into(),
            email: "user1@example.com".into(),
        };
        let response = make_request(
            app.clone(),
            Method::POST,
            "/create",
            json!(first).to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let second = router::create::Body {
            username: "testuser".into(),
            email: "user2@example.com".into(),
        };
        let response = make_request(
            app,
            Method::POST,
            "/create",
            json!(second).to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["detail"], "Username \"testuser\" is already taken");
    }

    #[sqlx::test]
    async fn test_create_with_registered_email(pool: Pool<Postgres>) {
        let state = router::state(pool);
        let app = app(state);

        let first = router::create::Body {
            username: "user1".into(),
            email: "test@example.com".into(),
        };
        let response = make_request(
            app.clone(),
            Method::POST,
            "/create",
            json!(first).to_string(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let second = router::create::Body {
            username: "user2".into(),
            email: "Test@Example.com".into(),
        };
        let response = make_request(
            app,
            Method::POST,
            "/create",
            json!(second).to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body["detail"],
            "Email \"Test@Example.com\" is already registered"
        );
    }

    #[sqlx::test]
    async fn test_create_with_invalid_email(pool: Pool<Postgres>) {
        let state = router::state(pool);
        let app = app(state);

        let req_body = router::create::Body {
            username: "testuser".into(),
            email: "not-an-email".into(),
        };
        let response = make_request(
            app,
            Method::POST,
            "/create",
            json!(req_body).to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
