use actix_web::web;

use crate::{constants::CONTACT_PATH, handlers::contact};

/// Largest accepted form body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(CONTACT_PATH)
            .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
            .route(web::post().to(contact::submit_contact))
    );
}
