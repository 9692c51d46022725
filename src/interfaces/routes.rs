use actix_web::web;

mod contact;
mod system;

pub use contact::MAX_BODY_BYTES;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(system::config_routes)
        .configure(contact::config_routes);
}
