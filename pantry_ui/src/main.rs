//! Pantry HTTP server.
//!
//! JSON API over the recipe service: public browsing, cookie sessions,
//! and capability-gated mutations. Every protected route builds a
//! request context from the session cookie; the capability set is
//! derived once per request and checked before any write.

mod error;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use pantry_runtime::RuntimeConfig;

use crate::state::AppState;

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/register", post(routes::auth::register))
        .route("/api/login", post(routes::auth::login))
        .route("/api/logout", post(routes::auth::logout))
        .route("/api/confirm/{token}", get(routes::auth::confirm))
        .route(
            "/api/recipes",
            get(routes::recipes::list_published).post(routes::recipes::create),
        )
        .route(
            "/api/recipes/{id}",
            get(routes::recipes::get)
                .put(routes::recipes::update)
                .delete(routes::recipes::delete),
        )
        .route("/api/recipes/{id}/image", post(routes::recipes::attach_image))
        .route("/api/my/recipes", get(routes::recipes::list_mine))
        .route(
            "/api/profile",
            get(routes::users::profile).put(routes::users::update_profile),
        )
        .route("/api/profile/avatar", post(routes::users::upload_avatar))
        .route("/api/users", get(routes::users::list))
        .route("/api/users/{email}", put(routes::users::update_user))
        .route("/api/images/{id}", get(routes::images::serve))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .compact()
        .init();

    let config = RuntimeConfig::load().expect("failed to load configuration");
    let state = AppState::build(&config);
    let app = app(state);

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .expect("invalid PANTRY_BIND_ADDR value");
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    info!("Server started successfully");

    axum::serve(listener, app).await.unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use pantry_capability::DENIAL_REASON;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let config = RuntimeConfig {
            admins: "admin@example.com".to_string(),
            ..RuntimeConfig::default()
        };
        app(AppState::build(&config))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value, Option<String>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(str::to_string);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json, set_cookie)
    }

    async fn signup(app: &Router, email: &str, password: &str) -> String {
        let (status, _, _) = send(
            app,
            "POST",
            "/api/register",
            None,
            Some(json!({"email": email, "password": password})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _, cookie) = send(
            app,
            "POST",
            "/api/login",
            None,
            Some(json!({"email": email, "password": password})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        cookie.expect("login should set a session cookie")
    }

    fn recipe_body(title: &str, status: &str) -> Value {
        json!({
            "title": title,
            "ingredients": "200g flour, 2 eggs",
            "instructions": "mix and fry",
            "category": "dessert",
            "status": status,
        })
    }

    #[tokio::test]
    async fn test_register_login_create_and_browse() {
        let app = test_app();
        let cookie = signup(&app, "cook@example.com", "lozinka123").await;

        let (status, created, _) = send(
            &app,
            "POST",
            "/api/recipes",
            Some(&cookie),
            Some(recipe_body("Palačinke", "published")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["owner"], "cook@example.com");

        // Published recipes are browseable without a session.
        let (status, listing, _) = send(&app, "GET", "/api/recipes", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listing.as_array().unwrap().len(), 1);
        assert_eq!(listing[0]["title"], "Palačinke");
    }

    #[tokio::test]
    async fn test_anonymous_mutation_is_forbidden() {
        let app = test_app();
        let (status, body, _) = send(
            &app,
            "POST",
            "/api/recipes",
            None,
            Some(recipe_body("Nope", "draft")),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], DENIAL_REASON);
    }

    #[tokio::test]
    async fn test_foreign_recipe_edit_is_forbidden() {
        let app = test_app();
        let owner = signup(&app, "u1@example.com", "password-one").await;
        let intruder = signup(&app, "u2@example.com", "password-two").await;

        let (_, created, _) = send(
            &app,
            "POST",
            "/api/recipes",
            Some(&owner),
            Some(recipe_body("Mine", "published")),
        )
        .await;
        let id = created["id"].as_str().unwrap().to_string();

        let (status, body, _) = send(
            &app,
            "PUT",
            &format!("/api/recipes/{}", id),
            Some(&intruder),
            Some(recipe_body("Hijacked", "published")),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], DENIAL_REASON);

        // The owner still can.
        let (status, _, _) = send(
            &app,
            "PUT",
            &format!("/api/recipes/{}", id),
            Some(&owner),
            Some(recipe_body("Still mine", "published")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_recipe_id_is_denied() {
        let app = test_app();
        let cookie = signup(&app, "cook@example.com", "lozinka123").await;

        let (status, body, _) = send(
            &app,
            "PUT",
            "/api/recipes/not-a-valid-id",
            Some(&cookie),
            Some(recipe_body("Whatever", "draft")),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], DENIAL_REASON);
    }

    #[tokio::test]
    async fn test_admin_routes_are_gated() {
        let app = test_app();
        let cook = signup(&app, "cook@example.com", "lozinka123").await;
        let admin = signup(&app, "admin@example.com", "admin-password").await;

        let (status, _, _) = send(&app, "GET", "/api/users", Some(&cook), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, users, _) = send(&app, "GET", "/api/users", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(users.as_array().unwrap().len(), 2);

        // Admin edits another user's confirmation flag.
        let (status, _, _) = send(
            &app,
            "PUT",
            "/api/users/cook@example.com",
            Some(&admin),
            Some(json!({"is_confirmed": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_admin_can_delete_any_recipe() {
        let app = test_app();
        let owner = signup(&app, "u1@example.com", "password-one").await;
        let admin = signup(&app, "admin@example.com", "admin-password").await;

        let (_, created, _) = send(
            &app,
            "POST",
            "/api/recipes",
            Some(&owner),
            Some(recipe_body("Contested", "published")),
        )
        .await;
        let id = created["id"].as_str().unwrap().to_string();

        let (status, _, _) = send(
            &app,
            "DELETE",
            &format!("/api/recipes/{}", id),
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _, _) =
            send(&app, "GET", &format!("/api/recipes/{}", id), None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_logout_drops_the_session() {
        let app = test_app();
        let cookie = signup(&app, "cook@example.com", "lozinka123").await;

        let (status, _, _) = send(&app, "GET", "/api/profile", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, _) = send(&app, "POST", "/api/logout", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, _) = send(&app, "GET", "/api/profile", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_image_upload_and_serve() {
        let app = test_app();
        let cookie = signup(&app, "cook@example.com", "lozinka123").await;

        let (_, created, _) = send(
            &app,
            "POST",
            "/api/recipes",
            Some(&cookie),
            Some(recipe_body("Photogenic", "published")),
        )
        .await;
        let id = created["id"].as_str().unwrap().to_string();

        let request = Request::builder()
            .method("POST")
            .uri(format!("/api/recipes/{}/image", id))
            .header(header::COOKIE, &cookie)
            .header(header::CONTENT_TYPE, "image/png")
            .body(Body::from(vec![137u8, 80, 78, 71]))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        let image_id = body["image_id"].as_str().unwrap().to_string();

        let request = Request::builder()
            .uri(format!("/api/images/{}", image_id))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/png"
        );

        // A non-image upload is refused.
        let request = Request::builder()
            .method("POST")
            .uri(format!("/api/recipes/{}/image", id))
            .header(header::COOKIE, &cookie)
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("not an image"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_invalid_confirmation_token_is_bad_request() {
        let app = test_app();
        let (status, _, _) = send(&app, "GET", "/api/confirm/garbage-token", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let app = test_app();
        signup(&app, "cook@example.com", "lozinka123").await;
        let (status, _, _) = send(
            &app,
            "POST",
            "/api/register",
            None,
            Some(json!({"email": "cook@example.com", "password": "other"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
