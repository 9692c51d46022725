use actix_web::{web, HttpRequest, HttpResponse};
use tracing::Instrument;
use uuid::Uuid;

use crate::{utils::get_client_ip::get_client_ip, AppState};

pub async fn submit_contact(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> HttpResponse {
    let identity = get_client_ip(&req, state.trust_forwarded_headers);
    let span = tracing::info_span!(
        "contact_submission",
        submission_id = %Uuid::new_v4(),
        client = %identity,
    );

    match state.contact_handler.submit(&identity, &body).instrument(span).await {
        Ok(receipt) => HttpResponse::Ok().json(receipt),
        Err(e) => e.to_http_response(),
    }
}
