use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use appointment_scheduler::web::{configure, AppState};
use appointment_scheduler::SlotConfig;
use chrono::NaiveTime;
use serde_json::{json, Value};

fn state() -> web::Data<AppState> {
    web::Data::new(AppState::new(SlotConfig::default(), NaiveTime::from_hms_opt(9, 0, 0).unwrap()))
}

#[actix_web::test]
async fn test_slots_are_offered_with_default() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/api/slots").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["default"], "09:00:00");
    assert_eq!(body["slots"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["slots"][4]["slot"], "11:00:00");
    assert_eq!(body["slots"][0]["taken"], false);
}

#[actix_web::test]
async fn test_booking_conflict_across_queues() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/book/fcfs")
        .set_json(json!({"name": "Ada", "slot": "09:30:00"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Appointment booked for Ada at 09:30:00.");

    let req = test::TestRequest::post()
        .uri("/api/book/priority")
        .set_json(json!({"name": "Bob", "slot": "09:30:00", "priority": "4"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "slot_taken");
}

#[actix_web::test]
async fn test_empty_name_is_bad_request() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/book/fcfs")
        .set_json(json!({"name": "  ", "slot": "09:00:00"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_invalid_priority_books_at_zero_with_warning() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/api/book/priority")
        .set_json(json!({"name": "Ada", "slot": "10:00:00", "priority": "asap"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["appointment"]["priority"], 0);
    assert!(body["warning"].as_str().is_some_and(|w| w.contains("Priority must be a number")));
}

#[actix_web::test]
async fn test_listing_and_next_in_priority_order() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    for (name, slot, priority) in [("low", "09:00:00", "1"), ("high", "09:30:00", "9")] {
        let req = test::TestRequest::post()
            .uri("/api/book/priority")
            .set_json(json!({"name": name, "slot": slot, "priority": priority}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    let req = test::TestRequest::get().uri("/api/appointments/priority").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["appointments"][0]["name"], "high");

    let req = test::TestRequest::post().uri("/api/next/priority").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["appointment"]["name"], "high");

    let req = test::TestRequest::post().uri("/api/next").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["fcfs"], Value::Null);
    assert_eq!(body["priority"]["name"], "low");
}

#[actix_web::test]
async fn test_next_on_empty_queue_is_not_found() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post().uri("/api/next/fcfs").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "There are no appointments in the FCFS queue.");
}

#[actix_web::test]
async fn test_unknown_queue_is_bad_request() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/api/appointments/vip").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_listing_carries_rendered_message() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/api/appointments/fcfs").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "There are no appointments in the FCFS queue.");

    let req = test::TestRequest::post()
        .uri("/api/book/priority")
        .set_json(json!({"name": "Ada", "slot": "09:00:00", "priority": "3"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/api/appointments/priority").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Current Appointments (Priority):\nAda (Priority: 3) at 09:00:00");
}

#[actix_web::test]
async fn test_refresh_regenerates_offer_and_form_exposes_it() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post().uri("/api/slots/refresh").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["slots"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["default"], body["slots"][0]);

    let req = test::TestRequest::get().uri("/").to_request();
    let page = test::call_and_read_body(&app, req).await;
    let page = String::from_utf8(page.to_vec()).unwrap();
    assert!(page.contains("/api/slots/refresh"), "Form should offer a way to refresh the times");
    assert!(page.contains("data.message"), "Form should show the server-rendered listing");
}
