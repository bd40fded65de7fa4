use serde::{Deserialize, Serialize};

use super::draft::DraftField;
use crate::shared::i18n::UiLanguage;

/// Изменение одного поля черновика
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFieldRequest {
    pub field: DraftField,
    /// Сырое значение из поля ввода
    pub value: String,
}

/// Смена языка интерфейса
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiLanguageRequest {
    pub language: UiLanguage,
}
