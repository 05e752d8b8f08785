use std::sync::{Mutex, MutexGuard};

use actix_web::http::StatusCode;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, ResponseError, Result};
use chrono::{Local, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::display::{booked_message, format_fcfs, format_priority, render_listing, render_next};
use crate::error::BookingError;
use crate::schedule::{BookingStore, Queue, SlotConfig, SlotRegistry};

/// Shared server state. Every booking runs its occupancy check and insert
/// while holding the `store` lock.
pub struct AppState {
    pub store: Mutex<BookingStore>,
    pub slots: Mutex<SlotRegistry>,
}

impl AppState {
    pub fn new(config: SlotConfig, now: NaiveTime) -> Self {
        AppState {
            store: Mutex::new(BookingStore::new()),
            slots: Mutex::new(SlotRegistry::new(config, now)),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| actix_web::error::ErrorInternalServerError("booking state is unavailable"))
}

impl ResponseError for BookingError {
    fn status_code(&self) -> StatusCode {
        match self {
            BookingError::EmptyName | BookingError::InvalidPriority { .. } => StatusCode::BAD_REQUEST,
            BookingError::SlotTaken { .. } => StatusCode::CONFLICT,
            BookingError::Empty { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "kind": self.kind(),
            "title": self.title(),
            "error": self.to_string(),
        }))
    }
}

#[derive(Deserialize)]
pub struct FcfsBookingRequest {
    pub name: String,
    pub slot: String,
}

#[derive(Deserialize)]
pub struct PriorityBookingRequest {
    pub name: String,
    pub slot: String,
    /// Raw text as typed; unparseable values book at priority 0
    pub priority: Option<String>,
}

#[derive(Serialize)]
pub struct SlotStatus {
    slot: String,
    taken: bool,
}

#[derive(Serialize)]
pub struct SlotsResponse {
    slots: Vec<SlotStatus>,
    default: Option<String>,
}

fn parse_queue(queue: &str) -> Result<Queue> {
    queue
        .parse::<Queue>()
        .map_err(actix_web::error::ErrorBadRequest)
}

fn listing(store: &BookingStore, queue: Queue) -> serde_json::Value {
    match queue {
        Queue::Fcfs => serde_json::json!(store.list_fcfs()),
        Queue::Priority => serde_json::json!(store.list_priority()),
    }
}

async fn get_slots(state: web::Data<AppState>) -> Result<HttpResponse> {
    let registry = lock(&state.slots)?;
    let store = lock(&state.store)?;
    let slots = registry
        .offered()
        .iter()
        .map(|slot| SlotStatus {
            slot: slot.clone(),
            taken: store.is_taken(slot),
        })
        .collect();

    Ok(HttpResponse::Ok().json(SlotsResponse {
        slots,
        default: registry.default_slot().map(str::to_string),
    }))
}

async fn refresh_slots(state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut registry = lock(&state.slots)?;
    registry.refresh(Local::now().time());
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "slots": registry.offered(),
        "default": registry.default_slot(),
    })))
}

async fn book_fcfs(
    req: web::Json<FcfsBookingRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut store = lock(&state.store)?;
    let appointment = store.book_fcfs(&req.name, &req.slot)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": booked_message(&appointment.name, &appointment.slot),
        "appointment": appointment,
        "appointments": listing(&store, Queue::Fcfs),
    })))
}

async fn book_priority(
    req: web::Json<PriorityBookingRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut store = lock(&state.store)?;
    let (appointment, warning) = store.book_priority_text(&req.name, req.priority.as_deref(), &req.slot)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": booked_message(&appointment.name, &appointment.slot),
        "warning": warning.map(|w| w.to_string()),
        "appointment": appointment,
        "appointments": listing(&store, Queue::Priority),
    })))
}

async fn next_both(state: web::Data<AppState>) -> Result<HttpResponse> {
    let next = lock(&state.store)?.next_appointment();
    info!(fcfs = next.fcfs.is_some(), priority = next.priority.is_some(), "served next appointment request");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "fcfs": next.fcfs,
        "priority": next.priority,
        "messages": render_next(&next),
    })))
}

async fn next_in_queue(
    queue: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let queue = parse_queue(&queue)?;
    let mut store = lock(&state.store)?;
    let appointment = match queue {
        Queue::Fcfs => serde_json::json!(store.next_fcfs()?),
        Queue::Priority => serde_json::json!(store.next_priority()?),
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "queue": queue,
        "appointment": appointment,
    })))
}

async fn get_appointments(
    queue: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let queue = parse_queue(&queue)?;
    let store = lock(&state.store)?;
    let message = match queue {
        Queue::Fcfs => render_listing(queue, &store.list_fcfs(), format_fcfs),
        Queue::Priority => render_listing(queue, &store.list_priority(), format_priority),
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "queue": queue,
        "appointments": listing(&store, queue),
        "message": message,
    })))
}

async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Registers every route; shared by the server and tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/slots", web::get().to(get_slots))
        .route("/api/slots/refresh", web::post().to(refresh_slots))
        .route("/api/book/fcfs", web::post().to(book_fcfs))
        .route("/api/book/priority", web::post().to(book_priority))
        .route("/api/next", web::post().to(next_both))
        .service(web::resource("/api/next/{queue}").route(web::post().to(next_in_queue)))
        .service(web::resource("/api/appointments/{queue}").route(web::get().to(get_appointments)));
}

pub async fn start_server(bind: &str, port: u16, config: SlotConfig) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(config, Local::now().time()));
    info!(bind, port, "starting booking form server");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((bind, port))?
    .run()
    .await
}
