use actix_web::{web, get, HttpResponse, Responder};
use humantime::format_duration;
use chrono::Utc;
use std::time::Duration;
use sysinfo::System;
use serde::Serialize;
use crate::{constants::START_TIME, AppState};

#[derive(Serialize, Clone, Default)]
pub struct HealthCheckResponse {
    pub status: String,
    pub uptime: String,
    pub started_at: String,
    pub timestamp: String,
    pub version: String,
    pub tracked_identities: usize,
    pub mail_configured: bool,
    pub memory_usage: String,
}

fn process_memory() -> String {
    let Ok(pid) = sysinfo::get_current_pid() else {
        return "Unknown".to_string();
    };

    let mut sys = System::new();
    sys.refresh_processes(sysinfo::ProcessesToUpdate::Some(&[pid]), true);

    sys.process(pid).map_or("Unknown".to_string(), |p| {
        format!("{:.2} MB", p.memory() as f64 / 1024.0 / 1024.0)
    })
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now_utc = Utc::now();
    let uptime = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime.num_seconds().max(0) as u64));

    let handler = &state.contact_handler;

    HttpResponse::Ok().json(HealthCheckResponse {
        status: "healthy".to_string(),
        uptime: human_uptime.to_string(),
        started_at: START_TIME.to_rfc3339(),
        timestamp: now_utc.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        tracked_identities: handler.limiter.len(),
        mail_configured: handler.dispatcher.settings().is_configured(),
        memory_usage: process_memory(),
    })
}
