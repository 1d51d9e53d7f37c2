use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use remedial_service::app::api_router;
use tower::ServiceExt;

#[tokio::test]
async fn health_reports_ok() {
    let response = api_router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn recording_a_lesson_requires_a_token() {
    let response = api_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/lesson/add/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"timetable":1,"week":1}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_views_reject_non_bearer_credentials() {
    for uri in ["/admin-payments/", "/admin-payments/export/", "/student/payments/"] {
        let response = api_router()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = api_router()
        .oneshot(Request::builder().uri("/nope/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
