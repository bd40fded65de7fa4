use axum::{extract::Path, http::StatusCode, Json};
use contracts::usecases::common::UseCaseError;
use contracts::usecases::u501_invoice_email::{
    InvoiceEmailOptions, SessionSnapshot, UiLanguageRequest, UpdateFieldRequest,
};

use crate::usecases::u501_invoice_email::session_store::{self, SessionError, SessionStore};
use crate::usecases::u501_invoice_email::TriggerOutcome;

type ApiError = (StatusCode, Json<UseCaseError>);

fn store() -> Result<&'static SessionStore, ApiError> {
    session_store::get_store().ok_or_else(|| {
        tracing::error!("Invoice session store is not initialized");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(UseCaseError::internal("Session store is not initialized")),
        )
    })
}

fn session_error(e: SessionError) -> ApiError {
    match e {
        SessionError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(UseCaseError::not_found(e.to_string())),
        ),
        SessionError::Field(_) => (
            StatusCode::BAD_REQUEST,
            Json(UseCaseError::validation(e.to_string())),
        ),
    }
}

/// GET /api/u501/invoice-email/options
pub async fn options() -> Json<InvoiceEmailOptions> {
    Json(InvoiceEmailOptions::current())
}

/// POST /api/u501/invoice-email/sessions
pub async fn create_session() -> Result<(StatusCode, Json<SessionSnapshot>), ApiError> {
    let session = store()?.create_session();
    Ok((StatusCode::CREATED, Json(session.snapshot())))
}

/// GET /api/u501/invoice-email/sessions/:id
pub async fn get_session(Path(id): Path<String>) -> Result<Json<SessionSnapshot>, ApiError> {
    let session = store()?.get(&id).map_err(session_error)?;
    Ok(Json(session.snapshot()))
}

/// DELETE /api/u501/invoice-email/sessions/:id
pub async fn delete_session(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    store()?.remove(&id).map_err(session_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/u501/invoice-email/sessions/:id/field
pub async fn update_field(
    Path(id): Path<String>,
    Json(request): Json<UpdateFieldRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let session = store()?.get(&id).map_err(session_error)?;
    session
        .update_field(request.field, &request.value)
        .map_err(|e| session_error(e.into()))?;
    Ok(Json(session.snapshot()))
}

/// PUT /api/u501/invoice-email/sessions/:id/ui-language
pub async fn set_ui_language(
    Path(id): Path<String>,
    Json(request): Json<UiLanguageRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let session = store()?.get(&id).map_err(session_error)?;
    session.set_ui_language(request.language);
    Ok(Json(session.snapshot()))
}

/// POST /api/u501/invoice-email/sessions/:id/generate
///
/// 200: попытка завершена (письмо или общее сообщение об ошибке в `notice`),
/// 422: черновик не заполнен; 202: генерация уже идёт.
pub async fn generate(
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<SessionSnapshot>), ApiError> {
    let session = store()?.get(&id).map_err(session_error)?;

    let status = match session.generate().await {
        TriggerOutcome::Settled(_) => StatusCode::OK,
        TriggerOutcome::Rejected => StatusCode::UNPROCESSABLE_ENTITY,
        TriggerOutcome::Ignored => StatusCode::ACCEPTED,
    };

    Ok((status, Json(session.snapshot())))
}
