use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::draft::InvoiceDraft;
use crate::shared::i18n::UiLanguage;

/// Статус генерации письма
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    #[default]
    Idle,
    Loading,
    Settled,
}

/// Тип уведомления пользователю
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Не заполнены обязательные поля
    Validation,
    /// Сервис генерации не ответил
    GenerationFailed,
}

impl NoticeKind {
    /// Ключ словаря с текстом уведомления
    pub fn message_key(&self) -> &'static str {
        match self {
            NoticeKind::Validation => "alertFill",
            NoticeKind::GenerationFailed => "alertFail",
        }
    }
}

/// Уведомление для пользователя (вместо блокирующего alert)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Снимок сессии черновика для отрисовки в UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub draft: InvoiceDraft,
    pub status: GenerationStatus,
    /// Текст письма последней успешной попытки
    pub result: Option<String>,
    pub notice: Option<Notice>,
    /// Номер последней запущенной попытки (0, если генерация не запускалась)
    pub attempt: u64,
    pub ui_language: UiLanguage,
    pub updated_at: DateTime<Utc>,
}
