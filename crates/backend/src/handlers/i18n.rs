use axum::{extract::Path, http::StatusCode, Json};
use contracts::shared::i18n::{dictionary_for, UiLanguage};
use std::collections::BTreeMap;

/// GET /api/i18n/:lang
pub async fn get_dictionary(
    Path(lang): Path<String>,
) -> Result<Json<BTreeMap<&'static str, &'static str>>, StatusCode> {
    match UiLanguage::from_code(&lang) {
        Some(language) => Ok(Json(dictionary_for(language))),
        None => Err(StatusCode::NOT_FOUND),
    }
}
