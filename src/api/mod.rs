pub mod companies;
pub mod helpers;
pub mod industries;
pub mod invoices;
pub mod middleware;

use actix_web::{http::StatusCode, web, HttpResponse};

use crate::errors::ErrorEnvelope;

/// Register every route group plus the catch-all 404 envelope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(companies::init_routes)
        .configure(invoices::init_routes)
        .configure(industries::init_routes)
        .default_service(web::route().to(not_found));
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorEnvelope::new("Not Found", StatusCode::NOT_FOUND))
}
