mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{parse_body, slots, TestApp};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

const DATE: &str = "2024-06-01";

#[tokio::test]
async fn test_create_booking_returns_booking_and_pitch() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin();
    let (user_id, user) = app.user();
    let pitch_id = app.create_pitch(&admin, Some("08:00"), Some("22:00")).await;

    let res = app.book(&user, &pitch_id, DATE, "18:00", None).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    let booking = &body["data"]["booking"];
    assert_eq!(booking["userId"], user_id.as_str());
    assert_eq!(booking["pitchId"], pitch_id.as_str());
    assert_eq!(booking["date"], DATE);
    assert_eq!(booking["startTime"], "18:00");
    assert_eq!(booking["endTime"], "19:00");
    assert_eq!(booking["durationMinutes"], 60);
    assert_eq!(booking["status"], "CONFIRMED");
    assert_eq!(body["data"]["pitch"]["id"], pitch_id.as_str());
}

#[tokio::test]
async fn test_create_booking_requires_authentication() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin();
    let pitch_id = app.create_pitch(&admin, None, None).await;

    let res = app.request(Method::POST, "/bookings", None, Some(json!({
        "pitchId": pitch_id, "date": DATE, "startTime": "10:00"
    }))).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(parse_body(res).await["code"], "UNAUTHORIZED");

    let res = app.request(Method::POST, "/bookings", Some("not-a-jwt"), Some(json!({
        "pitchId": pitch_id, "date": DATE, "startTime": "10:00"
    }))).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_booking_validation_errors() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin();
    let (_, user) = app.user();
    let pitch_id = app.create_pitch(&admin, Some("00:00"), Some("24:00")).await;

    let cases = vec![
        json!({ "pitchId": "not-a-uuid", "date": DATE, "startTime": "10:00" }),
        json!({ "pitchId": pitch_id, "date": "2024/06/01", "startTime": "10:00" }),
        json!({ "pitchId": pitch_id, "date": DATE, "startTime": "10:0" }),
        json!({ "pitchId": pitch_id, "date": DATE, "startTime": "25:00" }),
        json!({ "pitchId": pitch_id, "date": DATE, "startTime": "10:00", "durationMinutes": 29 }),
        json!({ "pitchId": pitch_id, "date": DATE, "startTime": "10:00", "durationMinutes": 241 }),
        json!({ "pitchId": pitch_id, "date": DATE, "startTime": "23:00", "durationMinutes": 120 }),
        json!({ "pitchId": pitch_id, "date": DATE }),
    ];

    for payload in cases {
        let res = app.request(Method::POST, "/bookings", Some(&user), Some(payload.clone())).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "payload {} should be rejected", payload);
        assert_eq!(parse_body(res).await["code"], "VALIDATION_ERROR");
    }

    // Bounds themselves are accepted
    let res = app.book(&user, &pitch_id, DATE, "06:00", Some(30)).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let res = app.book(&user, &pitch_id, DATE, "20:00", Some(240)).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_booking_unknown_pitch() {
    let app = TestApp::new().await;
    let (_, user) = app.user();

    let res = app.book(&user, &Uuid::new_v4().to_string(), DATE, "10:00", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(parse_body(res).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_booking_outside_working_hours() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin();
    let (_, user) = app.user();
    let pitch_id = app.create_pitch(&admin, Some("08:00"), Some("22:00")).await;

    let res = app.book(&user, &pitch_id, DATE, "07:00", Some(60)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.book(&user, &pitch_id, DATE, "21:00", Some(90)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.book(&user, &pitch_id, DATE, "21:00", Some(60)).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_overlapping_booking_conflicts() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin();
    let (_, alice) = app.user();
    let (_, bob) = app.user();
    let pitch_id = app.create_pitch(&admin, None, None).await;

    let res = app.book(&alice, &pitch_id, DATE, "10:00", Some(90)).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    // Same start, partial overlap, enclosing window
    for (start, minutes) in [("10:00", 60), ("11:00", 60), ("09:30", 60), ("09:00", 240)] {
        let res = app.book(&bob, &pitch_id, DATE, start, Some(minutes)).await;
        assert_eq!(res.status(), StatusCode::CONFLICT, "{} for {}min should conflict", start, minutes);
        assert_eq!(parse_body(res).await["code"], "SLOT_ALREADY_BOOKED");
    }

    // Touching intervals do not overlap
    let res = app.book(&bob, &pitch_id, DATE, "11:30", Some(30)).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let res = app.book(&bob, &pitch_id, DATE, "09:00", Some(60)).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_cancel_frees_the_slot() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin();
    let (user_id, user) = app.user();
    let pitch_id = app.create_pitch(&admin, Some("08:00"), Some("22:00")).await;

    let res = app.book(&user, &pitch_id, DATE, "14:00", Some(60)).await;
    let booking_id = parse_body(res).await["data"]["booking"]["id"].as_str().unwrap().to_string();
    assert!(!slots(&app.availability(&pitch_id, DATE).await).contains(&"14:00".to_string()));

    let res = app.request(Method::PATCH, &format!("/bookings/{}/cancel", booking_id), Some(&user), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["status"], "CANCELLED");
    assert_eq!(body["data"]["cancelledBy"], user_id.as_str());
    assert!(body["data"]["cancelledAt"].is_string());

    assert!(slots(&app.availability(&pitch_id, DATE).await).contains(&"14:00".to_string()));

    // Slot can be taken again
    let (_, other) = app.user();
    let res = app.book(&other, &pitch_id, DATE, "14:00", Some(60)).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_cancel_is_terminal() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin();
    let (_, user) = app.user();
    let pitch_id = app.create_pitch(&admin, None, None).await;

    let res = app.book(&user, &pitch_id, DATE, "10:00", None).await;
    let booking_id = parse_body(res).await["data"]["booking"]["id"].as_str().unwrap().to_string();

    let uri = format!("/bookings/{}/cancel", booking_id);
    let res = app.request(Method::PATCH, &uri, Some(&user), None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.request(Method::PATCH, &uri, Some(&user), None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["code"], "INVALID_STATUS");
}

#[tokio::test]
async fn test_cancel_permissions() {
    let app = TestApp::new().await;
    let (admin_id, admin) = app.admin();
    let (_, owner) = app.user();
    let (_, stranger) = app.user();
    let pitch_id = app.create_pitch(&admin, None, None).await;

    let res = app.book(&owner, &pitch_id, DATE, "10:00", None).await;
    let booking_id = parse_body(res).await["data"]["booking"]["id"].as_str().unwrap().to_string();
    let uri = format!("/bookings/{}/cancel", booking_id);

    let res = app.request(Method::PATCH, &uri, Some(&stranger), None).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(parse_body(res).await["code"], "FORBIDDEN");

    let res = app.request(Method::PATCH, &uri, Some(&admin), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["data"]["cancelledBy"], admin_id.as_str());

    let res = app.request(Method::PATCH, &format!("/bookings/{}/cancel", Uuid::new_v4()), Some(&owner), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_my_bookings_and_get_booking() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin();
    let (_, alice) = app.user();
    let (_, bob) = app.user();
    let pitch_id = app.create_pitch(&admin, None, None).await;

    app.book(&alice, &pitch_id, "2024-06-01", "10:00", None).await;
    let res = app.book(&alice, &pitch_id, "2024-06-02", "10:00", None).await;
    let booking_id = parse_body(res).await["data"]["booking"]["id"].as_str().unwrap().to_string();
    app.book(&bob, &pitch_id, "2024-06-01", "12:00", None).await;

    let res = app.request(Method::GET, "/bookings/me", Some(&alice), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let mine = body["data"].as_array().unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0]["date"], "2024-06-02");
    assert_eq!(mine[0]["pitch"]["id"], pitch_id.as_str());

    let res = app.request(Method::GET, &format!("/bookings/{}", booking_id), Some(&alice), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["booking"]["id"], booking_id.as_str());
    assert_eq!(body["data"]["pitch"]["id"], pitch_id.as_str());

    let res = app.request(Method::GET, &format!("/bookings/{}", booking_id), Some(&bob), None).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.request(Method::GET, &format!("/bookings/{}", booking_id), Some(&admin), None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.request(Method::GET, "/bookings/me", None, None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cookie_auth_requires_csrf_on_writes() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin();
    let pitch_id = app.create_pitch(&admin, None, None).await;

    let user_id = Uuid::new_v4().to_string();
    let (token, csrf) = app.state.auth_service
        .issue_access_token(&user_id, "USER", chrono::Duration::minutes(15))
        .unwrap();
    let payload = json!({ "pitchId": pitch_id, "date": DATE, "startTime": "10:00" }).to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/bookings")
            .header(header::COOKIE, format!("access_token={}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.clone())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/bookings")
            .header(header::COOKIE, format!("access_token={}", token))
            .header("X-CSRF-Token", "wrong")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.clone())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/bookings")
            .header(header::COOKIE, format!("access_token={}", token))
            .header("X-CSRF-Token", &csrf)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload)).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // Reads need no CSRF header
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/bookings/me")
            .header(header::COOKIE, format!("access_token={}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let app = TestApp::new().await;
    let (_, user) = app.user();

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/bookings")
            .header(header::AUTHORIZATION, format!("Bearer {}", user))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"pitchId\": ")).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["code"], "VALIDATION_ERROR");
}
