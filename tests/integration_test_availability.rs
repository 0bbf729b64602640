mod common;

use axum::http::{Method, StatusCode};
use common::{parse_body, slots, TestApp};
use serde_json::json;

const DATE: &str = "2024-06-01"; // Saturday

#[tokio::test]
async fn test_default_hours_yield_fourteen_slots() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin();
    let pitch_id = app.create_pitch(&admin, Some("08:00"), Some("22:00")).await;

    let body = app.availability(&pitch_id, DATE).await;
    let expected: Vec<String> = (8..22).map(|h| format!("{:02}:00", h)).collect();
    assert_eq!(slots(&body), expected);
    assert_eq!(body["data"]["date"], DATE);
    assert_eq!(body["data"]["freeIntervals"], json!([{ "start": "08:00", "end": "22:00" }]));
}

#[tokio::test]
async fn test_fallback_hours_when_pitch_has_none() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin();
    let pitch_id = app.create_pitch(&admin, None, None).await;

    let body = app.availability(&pitch_id, DATE).await;
    let got = slots(&body);
    assert_eq!(got.len(), 14);
    assert_eq!(got.first().map(String::as_str), Some("08:00"));
    assert_eq!(got.last().map(String::as_str), Some("21:00"));
}

#[tokio::test]
async fn test_blocked_interval_hides_slots() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin();
    let pitch_id = app.create_pitch(&admin, Some("08:00"), Some("22:00")).await;

    let res = app.request(Method::POST, &format!("/admin/pitches/{}/block-slot", pitch_id), Some(&admin), Some(json!({
        "date": DATE, "startTime": "12:00", "endTime": "14:00", "reason": "Tournament"
    }))).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = app.availability(&pitch_id, DATE).await;
    let got = slots(&body);
    assert_eq!(got.len(), 12);
    assert!(!got.contains(&"12:00".to_string()));
    assert!(!got.contains(&"13:00".to_string()));
    assert!(got.contains(&"11:00".to_string()));
    assert!(got.contains(&"14:00".to_string()));

    // Block applies only to its own date
    let next_day = app.availability(&pitch_id, "2024-06-02").await;
    assert_eq!(slots(&next_day).len(), 14);
}

#[tokio::test]
async fn test_booking_hides_overlapping_slots() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin();
    let (_, user) = app.user();
    let pitch_id = app.create_pitch(&admin, Some("08:00"), Some("22:00")).await;

    let res = app.book(&user, &pitch_id, DATE, "10:00", Some(90)).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = app.availability(&pitch_id, DATE).await;
    let got = slots(&body);
    assert!(!got.contains(&"10:00".to_string()));
    assert!(!got.contains(&"11:00".to_string()));
    assert!(got.contains(&"09:00".to_string()));
    assert!(got.contains(&"12:00".to_string()));
    assert_eq!(body["data"]["freeIntervals"], json!([
        { "start": "08:00", "end": "10:00" },
        { "start": "11:30", "end": "22:00" },
    ]));
}

#[tokio::test]
async fn test_override_replaces_pitch_hours_for_that_weekday() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin();
    let pitch_id = app.create_pitch(&admin, Some("08:00"), Some("22:00")).await;

    let res = app.request(Method::PATCH, &format!("/admin/pitches/{}/working-hours", pitch_id), Some(&admin), Some(json!({
        "dayOfWeek": 6, "openTime": "10:00", "closeTime": "14:30"
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);

    let saturday = app.availability(&pitch_id, DATE).await;
    assert_eq!(slots(&saturday), vec!["10:00", "11:00", "12:00", "13:00"]);

    let sunday = app.availability(&pitch_id, "2024-06-02").await;
    assert_eq!(slots(&sunday).len(), 14);
}

#[tokio::test]
async fn test_boundary_slot_must_end_by_close() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin();
    let pitch_id = app.create_pitch(&admin, Some("08:00"), Some("10:30")).await;

    let body = app.availability(&pitch_id, DATE).await;
    assert_eq!(slots(&body), vec!["08:00", "09:00"]);

    let late = app.create_pitch(&admin, Some("22:00"), Some("24:00")).await;
    let body = app.availability(&late, DATE).await;
    assert_eq!(slots(&body), vec!["22:00", "23:00"]);
}

#[tokio::test]
async fn test_availability_reads_are_idempotent() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin();
    let (_, user) = app.user();
    let pitch_id = app.create_pitch(&admin, None, None).await;
    app.book(&user, &pitch_id, DATE, "15:00", Some(60)).await;

    let first = app.availability(&pitch_id, DATE).await;
    let second = app.availability(&pitch_id, DATE).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_availability_rejects_bad_input() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin();
    let pitch_id = app.create_pitch(&admin, None, None).await;

    let res = app.request(Method::GET, &format!("/pitches/{}/availability", pitch_id), None, None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["code"], "VALIDATION_ERROR");

    for bad in ["2024-6-1", "01-06-2024", "2024-02-30", "tomorrow"] {
        let res = app.request(Method::GET, &format!("/pitches/{}/availability?date={}", pitch_id, bad), None, None).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "date {} should be rejected", bad);
    }

    let res = app.request(Method::GET, &format!("/pitches/{}/availability?date={}", uuid::Uuid::new_v4(), DATE), None, None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(parse_body(res).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_every_listed_slot_is_bookable() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin();
    let (_, user) = app.user();
    let pitch_id = app.create_pitch(&admin, Some("08:00"), Some("12:00")).await;

    app.request(Method::POST, &format!("/admin/pitches/{}/block-slot", pitch_id), Some(&admin), Some(json!({
        "date": DATE, "startTime": "09:00", "endTime": "10:00"
    }))).await;

    let listed = slots(&app.availability(&pitch_id, DATE).await);
    assert_eq!(listed, vec!["08:00", "10:00", "11:00"]);

    for slot in &listed {
        let res = app.book(&user, &pitch_id, DATE, slot, Some(60)).await;
        assert_eq!(res.status(), StatusCode::CREATED, "slot {} should be bookable", slot);
    }

    // Blocked slot was never listed and cannot be booked either
    let res = app.book(&user, &pitch_id, DATE, "09:00", Some(60)).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(res).await["code"], "SLOT_BLOCKED");

    assert!(slots(&app.availability(&pitch_id, DATE).await).is_empty());
}
