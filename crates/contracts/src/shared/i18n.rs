//! Словарь интерфейса (English / 한국어)
//!
//! Поиск строки по ключу с учётом выбранного языка интерфейса.
//! Неизвестный ключ возвращается как есть.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Язык интерфейса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiLanguage {
    #[default]
    En,
    Ko,
}

impl UiLanguage {
    /// Получить код языка
    pub fn code(&self) -> &'static str {
        match self {
            UiLanguage::En => "en",
            UiLanguage::Ko => "ko",
        }
    }

    /// Получить название языка для переключателя
    pub fn display_name(&self) -> &'static str {
        match self {
            UiLanguage::En => "English",
            UiLanguage::Ko => "한국어",
        }
    }

    pub fn all() -> Vec<UiLanguage> {
        vec![UiLanguage::En, UiLanguage::Ko]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(UiLanguage::En),
            "ko" => Some(UiLanguage::Ko),
            _ => None,
        }
    }
}

/// (ключ, en, ko)
pub const DICTIONARY: &[(&str, &str, &str)] = &[
    ("appTitle", "AI Smart Invoice", "AI 스마트 인보이스"),
    ("totalOutstanding", "Total Outstanding", "미수금 총액"),
    ("paidThisMonth", "Paid this month", "이번 달 입금액"),
    ("aiTip", "AI Tip:", "AI 팁:"),
    (
        "aiTipContent",
        "Sending invoices on Tuesday mornings results in 20% faster payments.",
        "화요일 오전에 인보이스를 발송하면 입금 처리가 20% 빨라집니다.",
    ),
    ("newInvoiceGenerator", "New Invoice Generator", "새 인보이스 생성"),
    ("invoiceDetails", "Invoice Details", "인보이스 상세 정보"),
    ("clientName", "Client Name", "고객사명"),
    ("description", "Description of Service", "청구 내역"),
    ("amount", "Amount", "금액"),
    ("currency", "Currency", "통화"),
    ("dueDate", "Due Date", "납기일"),
    ("targetLanguage", "Email Language", "이메일 언어"),
    ("generateButton", "Generate Invoice Email", "인보이스 이메일 생성"),
    ("generating", "Generating with Gemini...", "Gemini가 생성 중..."),
    ("emailPreview", "Email Preview", "이메일 미리보기"),
    ("copyText", "Copy Text", "복사"),
    ("copied", "Copied!", "완료!"),
    ("monthlyRevenue", "Monthly Revenue Overview", "월간 매출 현황"),
    (
        "fillForm",
        "Fill out the form and click generate",
        "정보를 입력하고 생성 버튼을 누르세요",
    ),
    ("aiWillWrite", "AI will write the email for you", "AI가 이메일을 작성해 드립니다"),
    ("placeholderClient", "e.g. Acme Corp", "예: (주)한국기업"),
    ("placeholderDesc", "e.g. Q1 Web Development", "예: 1분기 웹 개발비"),
    (
        "alertFill",
        "Please fill in all required fields.",
        "모든 필수 항목을 입력해 주세요.",
    ),
    (
        "alertFail",
        "Failed to generate email. Please check your connection.",
        "이메일 생성에 실패했습니다. 연결을 확인해 주세요.",
    ),
    (
        "footer",
        "AI Smart Invoice. Powered by Google Gemini.",
        "AI 스마트 인보이스. Google Gemini 기반 서비스.",
    ),
];

static INDEX: Lazy<HashMap<&'static str, (&'static str, &'static str)>> = Lazy::new(|| {
    DICTIONARY
        .iter()
        .map(|(key, en, ko)| (*key, (*en, *ko)))
        .collect()
});

/// Перевести ключ на указанный язык
///
/// Пустой или отсутствующий перевод заменяется самим ключом.
pub fn translate<'a>(language: UiLanguage, key: &'a str) -> &'a str {
    let text = INDEX.get(key).map(|(en, ko)| match language {
        UiLanguage::En => *en,
        UiLanguage::Ko => *ko,
    });

    match text {
        Some(t) if !t.is_empty() => t,
        _ => key,
    }
}

/// Весь словарь для одного языка (для загрузки в UI одним запросом)
pub fn dictionary_for(language: UiLanguage) -> BTreeMap<&'static str, &'static str> {
    DICTIONARY
        .iter()
        .map(|&(key, _, _)| (key, translate(language, key)))
        .collect()
}

/// Настройки интерфейса сессии
///
/// Владеет выбранным языком; меняется только через `set_language`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSettings {
    language: UiLanguage,
}

impl UiSettings {
    pub fn new(language: UiLanguage) -> Self {
        Self { language }
    }

    pub fn language(&self) -> UiLanguage {
        self.language
    }

    pub fn set_language(&mut self, language: UiLanguage) {
        self.language = language;
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        translate(self.language, key)
    }
}
