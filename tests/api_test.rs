//! HTTP-level tests: route wiring, status codes and admin gating, driven
//! through the same route table as the binary.

mod common;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::http::StatusCode;
use actix_web::{App, cookie::Key, test, web};
use serde_json::json;
use tempfile::TempDir;

use climbclub::auth::{AdminCredentials, password};
use climbclub::handlers;
use climbclub::store::Store;
use common::seeded_document;

const ADMIN_PASSWORD: &str = "test-admin";

fn test_store() -> (TempDir, web::Data<Store>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = Store::open(dir.path().join("club.json")).expect("Failed to open store");
    store.replace(seeded_document()).expect("Failed to seed store");
    (dir, web::Data::new(store))
}

macro_rules! test_app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .wrap(
                    SessionMiddleware::builder(
                        CookieSessionStore::default(),
                        Key::from(&[0u8; 64]),
                    )
                    .cookie_secure(false)
                    .build(),
                )
                .app_data($store.clone())
                .app_data(web::Data::new(AdminCredentials {
                    password_hash: password::hash_password(ADMIN_PASSWORD)
                        .expect("Failed to hash test password"),
                }))
                .configure(handlers::configure),
        )
        .await
    };
}

/// Log in as admin and hand back the session cookie for follow-up requests.
macro_rules! login_admin {
    ($app:expr) => {{
        let resp = test::call_service(
            &$app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({ "password": ADMIN_PASSWORD }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        resp.response()
            .cookies()
            .next()
            .expect("session cookie")
            .into_owned()
    }};
}

#[actix_rt::test]
async fn health_reports_ok() {
    let (_dir, store) = test_store();
    let app = test_app!(store);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/health").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_rt::test]
async fn member_create_mints_sequential_ids() {
    let (_dir, store) = test_store();
    let app = test_app!(store);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/members")
            .set_json(json!({ "name": "Kari Traa", "email": "kari@example.com" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], "10", "next id comes from the seeded counter");
    assert_eq!(body["name"], "Kari Traa");

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/members").to_request(),
    )
    .await;
    let members: Vec<serde_json::Value> = test::read_body_json(resp).await;
    assert_eq!(members.len(), 5);
}

#[actix_rt::test]
async fn member_create_validates_input() {
    let (_dir, store) = test_store();
    let app = test_app!(store);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/members")
            .set_json(json!({ "name": "  ", "email": "not-an-email" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("Member name is required"));
    assert!(message.contains("Invalid email format"));
}

#[actix_rt::test]
async fn session_mutations_require_admin() {
    let (_dir, store) = test_store();
    let app = test_app!(store);
    let session_body = json!({
        "date": "2026-10-01",
        "location": "Grip Sluppen",
        "start": "19:00",
        "end": "23:00",
        "discipline": "Lead",
        "capacity": 8
    });

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/sessions")
            .set_json(&session_body)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let cookie = login_admin!(app);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/sessions")
            .cookie(cookie.clone())
            .set_json(&session_body)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/sessions")
            .cookie(cookie)
            .set_json(json!({
                "date": "01.10.2026",
                "location": "Grip Sluppen",
                "start": "19:00",
                "end": "23:00",
                "discipline": "Lead"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn registration_honors_capacity_and_frees_slots() {
    let (_dir, store) = test_store();
    let app = test_app!(store);

    for member_id in ["m1", "m2"] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/sessions/s1/register")
                .set_json(json!({ "member_id": member_id }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // s1 has capacity 2, so a third registration is refused.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/sessions/s1/register")
            .set_json(json!({ "member_id": "m3" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/sessions/s1/unregister")
            .set_json(json!({ "member_id": "m1" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/sessions/s1/register")
            .set_json(json!({ "member_id": "m3" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let occupancy: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(occupancy["registered"], 2);
    assert_eq!(occupancy["capacity"], 2);
}

#[actix_rt::test]
async fn walk_in_attendance_does_not_consume_capacity() {
    let (_dir, store) = test_store();
    let app = test_app!(store);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/sessions/s1/attend")
            .set_json(json!({ "member_id": "m4" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let status: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(status, json!("attended"));

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/sessions/s1/occupancy")
            .to_request(),
    )
    .await;
    let occupancy: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(occupancy["registered"], 0);
}

#[actix_rt::test]
async fn registering_an_unknown_member_is_a_404() {
    let (_dir, store) = test_store();
    let app = test_app!(store);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/sessions/s1/register")
            .set_json(json!({ "member_id": "ghost" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "member not found");
}

#[actix_rt::test]
async fn roster_editing_is_admin_only() {
    let (_dir, store) = test_store();
    let app = test_app!(store);
    let record = json!({ "registered": true, "attended": true, "notes": "added by coach" });

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/attendance/s1/m1")
            .set_json(&record)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let cookie = login_admin!(app);
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/attendance/s1/m1")
            .cookie(cookie.clone())
            .set_json(&record)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/sessions/s1/attendance")
            .to_request(),
    )
    .await;
    let roster: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(roster["m1"]["attended"], true);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/attendance/s1/m1")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[actix_rt::test]
async fn member_delete_cascades_out_of_rosters() {
    let (_dir, store) = test_store();
    let app = test_app!(store);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/sessions/s1/register")
            .set_json(json!({ "member_id": "m1" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = login_admin!(app);
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/members/m1")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/sessions/s1/occupancy")
            .to_request(),
    )
    .await;
    let occupancy: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(occupancy["registered"], 0);
}

#[actix_rt::test]
async fn bulk_import_migrates_legacy_documents() {
    let (_dir, store) = test_store();
    let app = test_app!(store);
    let cookie = login_admin!(app);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/data")
            .cookie(cookie)
            .set_json(json!({
                "members": [{ "id": "1", "name": "Anna Hansen" }],
                "sessions": [{
                    "id": "2", "date": "2026-09-02", "location": "Grip",
                    "start": "19:00", "end": "21:00", "discipline": "Bouldering"
                }],
                "registrations": { "2": ["1"] },
                "_seq": 3
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let summary: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(summary["members"], 1);
    assert_eq!(summary["attendance_records"], 1);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/data").to_request(),
    )
    .await;
    let doc: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(doc["attendance"]["2"]["1"]["registered"], true);
    assert!(doc.get("registrations").is_none());
}

#[actix_rt::test]
async fn csv_export_is_admin_only() {
    let (_dir, store) = test_store();
    let app = test_app!(store);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/export/members")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let cookie = login_admin!(app);
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/export/members")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).expect("utf-8 csv");
    assert!(text.starts_with("\"id\",\"name\""));
    assert!(text.contains("Anna Hansen"));
}

#[actix_rt::test]
async fn reports_summarize_the_club() {
    let (_dir, store) = test_store();
    let app = test_app!(store);

    for (uri, member_id) in [
        ("/api/sessions/s1/register", "m1"),
        ("/api/sessions/s1/attend", "m1"),
        ("/api/sessions/s2/attend", "m1"),
        ("/api/sessions/s2/attend", "m2"),
    ] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(uri)
                .set_json(json!({ "member_id": member_id }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/reports").to_request(),
    )
    .await;
    let reports: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(reports["member_count"], 4);
    assert_eq!(reports["session_count"], 2);
    assert_eq!(reports["total_attendance"], 3);
    assert_eq!(reports["top_attendees"][0]["member_id"], "m1");
    assert_eq!(reports["top_attendees"][0]["attended"], 2);
}

#[actix_rt::test]
async fn auth_status_tracks_the_session() {
    let (_dir, store) = test_store();
    let app = test_app!(store);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/auth/status").to_request(),
    )
    .await;
    let status: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(status["admin"], false);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "password": "wrong" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let cookie = login_admin!(app);
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/auth/status")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let status: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(status["admin"], true);
}
