//! # Time Machine Control Endpoints
//!
//! Browser-facing endpoints for inspecting and steering the override
//! cookie. They are meant for manual testing through a browser or a
//! simple HTTP client and are only mounted when cookie support is
//! enabled.
//!
//! ## Endpoints
//! Relative to the configured mount prefix:
//!
//! - `GET /` reports the override bound to the current request as
//!   `{"testDate": "..."}`, or `{}` when none is active.
//! - `GET /{value}` validates `value`, stores it in a session cookie, and
//!   echoes it back. Unparseable values get `400` with a message naming
//!   the rejected text, and no cookie.
//! - `GET /clear` and `DELETE /` expire the cookie and return `204`.
//!
//! # Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use axum::Router;
//! use delorean_web::config::time_machine::TimeMachineConfig;
//! use delorean_web::web::control;
//!
//! let cfg = Arc::new(TimeMachineConfig::from_env());
//! let app: Router = Router::new().nest("/time-machine", control::router(cfg));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::time_machine::TimeMachineConfig;
use crate::time::{codec, context};

/// JSON response schema returned by [`set_test_date`].
#[derive(Debug, Serialize)]
pub struct TestDateResponse {
    #[serde(rename = "testDate")]
    pub test_date: String,
}

/// Builds the control endpoint router, to be nested under the configured
/// mount prefix.
pub fn router(config: Arc<TimeMachineConfig>) -> Router {
    Router::new()
        .route("/", get(get_test_date).delete(clear_test_date))
        .route("/clear", get(clear_test_date))
        .route("/{value}", get(set_test_date))
        .with_state(config)
}

/// Reports the override bound to the current request.
///
/// Returns `{"testDate": "..."}` in wire form while an override is
/// active, `{}` otherwise.
pub async fn get_test_date() -> Json<Value> {
    match context::encoded_override() {
        Some(encoded) => Json(json!({ "testDate": encoded })),
        None => Json(json!({})),
    }
}

/// Validates the value and stores it in a session cookie.
///
/// The cookie carries no expiry, so the override lasts for the browser
/// session. The value takes effect on subsequent requests, once the
/// inbound binding reads it back.
pub async fn set_test_date(
    State(config): State<Arc<TimeMachineConfig>>,
    Path(value): Path<String>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<TestDateResponse>), (StatusCode, String)> {
    if codec::decode(&value).is_err() {
        debug!(value = %value, "rejecting unparseable test date");
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Unable to parse date {value} for time travel."),
        ));
    }

    debug!(value = %value, "setting time machine cookie");
    let cookie = Cookie::build((config.cookie.name.clone(), value.clone()))
        .path(config.cookie.path.clone())
        .build();

    Ok((jar.add(cookie), Json(TestDateResponse { test_date: value })))
}

/// Expires the override cookie.
///
/// The expired cookie is sent back even when the request carried none.
pub async fn clear_test_date(
    State(config): State<Arc<TimeMachineConfig>>,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    debug!("expiring time machine cookie");
    let mut cookie = Cookie::build((config.cookie.name.clone(), ""))
        .path(config.cookie.path.clone())
        .build();
    cookie.make_removal();

    (jar.add(cookie), StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request},
    };
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::time::context::TimeOverride;

    fn test_cfg() -> Arc<TimeMachineConfig> {
        let mut cfg = TimeMachineConfig::default();
        cfg.cookie.enabled = true;
        Arc::new(cfg)
    }

    async fn body_json(res: axum::response::Response) -> Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn get_test_date_reports_nothing_outside_a_context() {
        let Json(body) = get_test_date().await;
        assert_eq!(body, json!({}));
    }

    #[tokio::test]
    async fn get_test_date_reports_the_active_override() {
        let date = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();

        let Json(body) =
            context::scope(Some(TimeOverride::FixedDate(date)), get_test_date()).await;

        assert_eq!(body, json!({ "testDate": "2016-01-01" }));
    }

    #[tokio::test]
    async fn set_test_date_issues_a_session_cookie() {
        let result = set_test_date(
            State(test_cfg()),
            Path("2016-01-01".to_string()),
            CookieJar::new(),
        )
        .await;

        let (jar, Json(body)) = result.expect("valid value accepted");
        assert_eq!(body.test_date, "2016-01-01");

        let cookie = jar.get("Delorean-Time-Machine").expect("cookie set");
        assert_eq!(cookie.value(), "2016-01-01");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), None, "session cookie carries no expiry");
    }

    #[tokio::test]
    async fn set_test_date_rejects_malformed_values() {
        let result = set_test_date(
            State(test_cfg()),
            Path("25-12-2016".to_string()),
            CookieJar::new(),
        )
        .await;

        let (status, message) = result.expect_err("malformed value rejected");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Unable to parse date 25-12-2016 for time travel.");
    }

    #[tokio::test]
    async fn clear_test_date_returns_an_expired_cookie() {
        let (jar, status) = clear_test_date(State(test_cfg()), CookieJar::new()).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let cookie = jar.get("Delorean-Time-Machine").expect("removal cookie present");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age().map(|age| age.whole_seconds()), Some(0));
    }

    #[tokio::test]
    async fn current_endpoint_returns_an_empty_object() {
        let app = router(test_cfg());

        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await, json!({}));
    }

    #[tokio::test]
    async fn set_endpoint_accepts_a_date() {
        let app = router(test_cfg());

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/2016-01-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);

        let set_cookie = res
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(set_cookie.contains("Delorean-Time-Machine=2016-01-01"));
        assert!(set_cookie.contains("Path=/"));

        assert_eq!(body_json(res).await, json!({ "testDate": "2016-01-01" }));
    }

    #[tokio::test]
    async fn set_endpoint_accepts_a_date_time() {
        let app = router(test_cfg());

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/2016-01-01T16:30:30")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            body_json(res).await,
            json!({ "testDate": "2016-01-01T16:30:30" })
        );
    }

    #[tokio::test]
    async fn set_endpoint_rejects_garbage_with_a_message() {
        let app = router(test_cfg());

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/next-tuesday")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(res.headers().get(header::SET_COOKIE).is_none());

        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(
            String::from_utf8_lossy(&bytes),
            "Unable to parse date next-tuesday for time travel."
        );
    }

    #[tokio::test]
    async fn clear_endpoint_expires_the_cookie() {
        let app = router(test_cfg());

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/clear")
                    .header(header::COOKIE, "Delorean-Time-Machine=2016-01-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let set_cookie = res
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(set_cookie.contains("Delorean-Time-Machine="));
        assert!(set_cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn clear_expires_the_cookie_even_without_one_inbound() {
        let app = router(test_cfg());

        let res = app
            .oneshot(Request::builder().uri("/clear").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let set_cookie = res
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(set_cookie.contains("Delorean-Time-Machine="));
        assert!(set_cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn delete_on_the_root_also_clears() {
        let app = router(test_cfg());

        let res = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert!(res.headers().get(header::SET_COOKIE).is_some());
    }

    #[tokio::test]
    async fn custom_cookie_name_and_path_are_honored() {
        let mut cfg = TimeMachineConfig::default();
        cfg.cookie.enabled = true;
        cfg.cookie.name = "Test-Clock".to_string();
        cfg.cookie.path = "/app".to_string();
        let app = router(Arc::new(cfg));

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/2016-01-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let set_cookie = res
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(set_cookie.contains("Test-Clock=2016-01-01"));
        assert!(set_cookie.contains("Path=/app"));
    }
}
