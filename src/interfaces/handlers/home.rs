use actix_web::{get, HttpResponse, Responder};

use crate::constants::{CONTACT_PATH, HEALTH_PATH};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Portfolio contact API",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [format!("POST {CONTACT_PATH}"), format!("GET {HEALTH_PATH}")]
    }))
}
