pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::matching::handlers as matching;
use crate::notifications::handlers as notifications;
use crate::profile::handlers as profile;
use crate::state::AppState;
use crate::tracker::handlers as tracker;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).patch(profile::handle_update_profile),
        )
        // Opportunities
        .route(
            "/api/v1/opportunities",
            get(matching::handle_list_opportunities),
        )
        .route(
            "/api/v1/opportunities/:id",
            get(matching::handle_get_opportunity),
        )
        // Tracking
        .route(
            "/api/v1/applications",
            get(tracker::handle_list_applications),
        )
        .route(
            "/api/v1/applications/:opportunity_id",
            put(tracker::handle_set_application_status),
        )
        .route("/api/v1/checklist", get(tracker::handle_get_checklist))
        .route(
            "/api/v1/checklist/:item",
            put(tracker::handle_set_checklist),
        )
        .route(
            "/api/v1/checklist/:item/increment",
            post(tracker::handle_increment_checklist),
        )
        .route("/api/v1/dashboard", get(tracker::handle_dashboard))
        // Notifications
        .route(
            "/api/v1/notifications",
            get(notifications::handle_list_notifications),
        )
        .route(
            "/api/v1/notifications/read-all",
            post(notifications::handle_mark_all_read),
        )
        .route(
            "/api/v1/notifications/:id/read",
            post(notifications::handle_mark_read),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::catalog::Catalog;
    use crate::config::Config;
    use crate::matching::scorer::SkillCgpaScorer;
    use crate::models::identity::{USER_ID_HEADER, USER_NAME_HEADER};
    use crate::models::opportunity::{ApplicationStatus, Opportunity};
    use crate::store::testing::FlakyStore;
    use crate::store::{MemoryRecordStore, RecordStore};

    fn opportunity(id: &str, hours: i64, requirements: &[&str]) -> Opportunity {
        Opportunity {
            id: id.to_string(),
            company: format!("Company {id}"),
            role: "Backend Engineer".to_string(),
            cohort: "SDE".to_string(),
            location: "Remote".to_string(),
            salary: "1L/month".to_string(),
            deadline: Utc::now() + Duration::hours(hours),
            requirements: requirements.iter().map(|r| r.to_string()).collect(),
            status: ApplicationStatus::Applied,
            description: String::new(),
            company_type: None,
            industry: None,
        }
    }

    fn app() -> Router {
        app_with_store(Arc::new(MemoryRecordStore::new()))
    }

    fn app_with_store(store: Arc<dyn RecordStore>) -> Router {
        let mut java = opportunity("java", 4, &["Java", "Spring"]);
        java.company_type = Some("Startup".to_string());
        java.industry = Some("Fintech".to_string());
        let catalog = Catalog::new(vec![
            opportunity("rust", 72, &["Rust", "SQL", "CGPA > 7.0"]),
            java,
        ]);
        build_router(AppState {
            store,
            catalog: Arc::new(catalog),
            config: Config {
                database_url: None,
                catalog_path: None,
                port: 0,
                rust_log: "info".to_string(),
            },
            scorer: Arc::new(SkillCgpaScorer),
        })
    }

    async fn call(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(USER_ID_HEADER, "user-1")
            .header(USER_NAME_HEADER, "Asha Rao");
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn notification_ids(body: &Value) -> Vec<String> {
        body["notifications"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["store"], "memory");
        assert_eq!(body["opportunities"], 2);
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_profile_created_on_first_load_then_patched() {
        let router = app();
        let (status, body) = call(&router, Method::GET, "/api/v1/profile", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profile"]["first_name"], "Asha");
        assert_eq!(body["profile"]["last_name"], "Rao");
        assert_eq!(body["profile"]["onboarding_completed"], false);

        let patch = json!({
            "degree": "btech",
            "cgpa": "8.1",
            "skills": ["Rust", "rust", "SQL"],
            "onboarding_completed": true
        });
        let (status, body) = call(&router, Method::PATCH, "/api/v1/profile", Some(patch)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["degree_label"], "B.Tech");
        assert_eq!(body["profile"]["skills"], json!(["Rust", "SQL"]));

        let (_, body) = call(&router, Method::GET, "/api/v1/profile", None).await;
        assert_eq!(body["profile"]["cgpa"], "8.1");
    }

    #[tokio::test]
    async fn test_opportunities_scored_and_sorted() {
        let router = app();
        let patch = json!({
            "cgpa": "8.1",
            "skills": ["Rust", "SQL"],
            "onboarding_completed": true
        });
        call(&router, Method::PATCH, "/api/v1/profile", Some(patch)).await;

        let (status, body) = call(&router, Method::GET, "/api/v1/opportunities", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["opportunities"][0]["id"], "rust");
        assert_eq!(body["opportunities"][0]["match_score"], 100);
        assert_eq!(body["opportunities"][1]["match_score"], 20);

        let uri = "/api/v1/opportunities?q=company%20java";
        let (_, body) = call(&router, Method::GET, uri, None).await;
        assert_eq!(body["total"], 1);

        let (status, body) = call(&router, Method::GET, "/api/v1/opportunities/rust", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["breakdown"]["matched"], json!(["Rust", "SQL"]));

        let (status, body) = call(&router, Method::GET, "/api/v1/opportunities/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_application_status_drives_notifications() {
        let router = app();
        let (status, _) = call(
            &router,
            Method::PUT,
            "/api/v1/applications/missing",
            Some(json!({ "status": "applied" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = call(
            &router,
            Method::PUT,
            "/api/v1/applications/rust",
            Some(json!({ "status": "interview" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "interview");

        let (_, body) = call(&router, Method::GET, "/api/v1/applications", None).await;
        assert_eq!(body["counts"]["interview"], 1);

        let (_, body) = call(&router, Method::GET, "/api/v1/notifications", None).await;
        let ids = notification_ids(&body);
        assert!(ids.contains(&"achievement-first-app".to_string()));
        assert!(ids.contains(&"update-interview-rust".to_string()));
    }

    #[tokio::test]
    async fn test_checklist_increment_and_set() {
        let router = app();
        let uri = "/api/v1/checklist/chess/increment";
        let (status, _) = call(&router, Method::POST, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let uri = "/api/v1/checklist/mock_interview/increment";
        for _ in 0..4 {
            call(&router, Method::POST, uri, None).await;
        }
        let (_, body) = call(&router, Method::GET, "/api/v1/checklist", None).await;
        assert_eq!(body["progress"]["mock_interview"], 3);
        assert_eq!(body["items"][2]["complete"], true);

        let (status, body) = call(
            &router,
            Method::PUT,
            "/api/v1/checklist/dsa",
            Some(json!({ "value": 120 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["progress"]["dsa"], 120);
        assert_eq!(body["items"][0]["percent"], 120);

        let (_, body) = call(&router, Method::GET, "/api/v1/notifications", None).await;
        assert!(notification_ids(&body).contains(&"achievement-dsa-50".to_string()));
    }

    #[tokio::test]
    async fn test_mark_read_and_read_all() {
        let router = app();
        let (_, body) = call(&router, Method::GET, "/api/v1/notifications", None).await;
        let ids = notification_ids(&body);
        assert!(!ids.is_empty());
        let first = ids[0].clone();

        let uri = format!("/api/v1/notifications/{first}/read");
        let (status, body) = call(&router, Method::POST, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["notifications"][0]["read"], true);
        assert_eq!(body["unread_count"], ids.len() - 1);

        let (_, body) = call(&router, Method::POST, "/api/v1/notifications/read-all", None).await;
        assert_eq!(body["unread_count"], 0);

        let (_, body) = call(&router, Method::GET, "/api/v1/dashboard", None).await;
        assert_eq!(body["unread_notifications"], 0);
        assert_eq!(body["closing_soon"][0]["id"], "java");
    }

    #[tokio::test]
    async fn test_listing_filters_by_company_type_industry_and_role() {
        let router = app();
        let uri = "/api/v1/opportunities?company_type=Startup&industry=Fintech";
        let (_, body) = call(&router, Method::GET, uri, None).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["opportunities"][0]["id"], "java");

        let uri = "/api/v1/opportunities?industry=Edtech";
        let (_, body) = call(&router, Method::GET, uri, None).await;
        assert_eq!(body["total"], 0);

        let uri = "/api/v1/opportunities?role=Backend&company_type=All";
        let (_, body) = call(&router, Method::GET, uri, None).await;
        assert_eq!(body["total"], 2);
    }

    #[tokio::test]
    async fn test_checklist_reports_readiness() {
        let router = app();
        let patch = json!({ "resume_uploaded": true, "onboarding_completed": true });
        call(&router, Method::PATCH, "/api/v1/profile", Some(patch)).await;

        let (status, body) = call(&router, Method::GET, "/api/v1/checklist", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["readiness"]["total_count"], 7);
        assert_eq!(body["readiness"]["completed_count"], 1);
        assert_eq!(body["readiness"]["completion_percent"], 14);
        // profile: first, last, resume = 3 / 8 => 38; round(38 * 0.4 + 14 * 0.6)
        assert_eq!(body["readiness"]["readiness"], 24);
        assert_eq!(body["readiness"]["tasks"][0]["id"], "resume");
    }

    #[tokio::test]
    async fn test_failed_read_does_not_overwrite_applications() {
        let store = Arc::new(FlakyStore::default());
        let router = app_with_store(store.clone());
        for id in ["rust", "java"] {
            let uri = format!("/api/v1/applications/{id}");
            let body = json!({ "status": "applied" });
            let (status, _) = call(&router, Method::PUT, &uri, Some(body)).await;
            assert_eq!(status, StatusCode::OK);
        }

        store.fail_next_read();
        let body = json!({ "status": "interview" });
        let (status, body) =
            call(&router, Method::PUT, "/api/v1/applications/rust", Some(body)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "STORE_UNAVAILABLE");

        let (_, body) = call(&router, Method::GET, "/api/v1/applications", None).await;
        assert_eq!(body["counts"]["applied"], 2);
        assert_eq!(body["counts"]["interview"], 0);

        store.fail_next_read();
        let uri = "/api/v1/checklist/dsa/increment";
        let (status, _) = call(&router, Method::POST, uri, None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let stored = store.inner.get("user-1").await.unwrap().unwrap();
        assert_eq!(stored["profile"]["first_name"], "Asha");
    }
}
