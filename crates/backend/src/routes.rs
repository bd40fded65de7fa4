use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // I18N
        // ========================================
        .route("/api/i18n/:lang", get(handlers::i18n::get_dictionary))
        // ========================================
        // UseCase u501: Invoice reminder email
        // ========================================
        .route(
            "/api/u501/invoice-email/options",
            get(handlers::u501_invoice_email::options),
        )
        .route(
            "/api/u501/invoice-email/sessions",
            post(handlers::u501_invoice_email::create_session),
        )
        .route(
            "/api/u501/invoice-email/sessions/:id",
            get(handlers::u501_invoice_email::get_session)
                .delete(handlers::u501_invoice_email::delete_session),
        )
        .route(
            "/api/u501/invoice-email/sessions/:id/field",
            put(handlers::u501_invoice_email::update_field),
        )
        .route(
            "/api/u501/invoice-email/sessions/:id/ui-language",
            put(handlers::u501_invoice_email::set_ui_language),
        )
        .route(
            "/api/u501/invoice-email/sessions/:id/generate",
            post(handlers::u501_invoice_email::generate),
        )
}
