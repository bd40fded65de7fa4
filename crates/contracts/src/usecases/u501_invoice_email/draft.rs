use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Валюта счёта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "KRW")]
    Krw,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "JPY")]
    Jpy,
}

impl Currency {
    /// Получить ISO-код валюты
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Krw => "KRW",
            Currency::Eur => "EUR",
            Currency::Jpy => "JPY",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Krw => "₩",
            Currency::Eur => "€",
            Currency::Jpy => "¥",
        }
    }

    pub fn all() -> Vec<Currency> {
        vec![Currency::Usd, Currency::Krw, Currency::Eur, Currency::Jpy]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "USD" => Some(Currency::Usd),
            "KRW" => Some(Currency::Krw),
            "EUR" => Some(Currency::Eur),
            "JPY" => Some(Currency::Jpy),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Язык, на котором LLM должна написать письмо
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputLanguage {
    #[default]
    English,
    Korean,
    Japanese,
    Spanish,
    French,
}

impl OutputLanguage {
    pub fn name(&self) -> &'static str {
        match self {
            OutputLanguage::English => "English",
            OutputLanguage::Korean => "Korean",
            OutputLanguage::Japanese => "Japanese",
            OutputLanguage::Spanish => "Spanish",
            OutputLanguage::French => "French",
        }
    }

    pub fn all() -> Vec<OutputLanguage> {
        vec![
            OutputLanguage::English,
            OutputLanguage::Korean,
            OutputLanguage::Japanese,
            OutputLanguage::Spanish,
            OutputLanguage::French,
        ]
    }

    /// Парсинг из строки
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|lang| lang.name() == name)
    }
}

impl fmt::Display for OutputLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Поле формы, которое можно изменить
///
/// Принимаются также camelCase-имена полей исходной веб-формы.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    #[serde(alias = "clientName")]
    ClientName,
    #[serde(alias = "itemDescription")]
    ItemDescription,
    Amount,
    Currency,
    #[serde(alias = "dueDate")]
    DueDate,
    #[serde(alias = "language")]
    OutputLanguage,
}

/// Черновик счёта (один на сессию, не сохраняется)
///
/// `amount == None` означает «не число»: пустое или нечисловое значение
/// из поля ввода. Проверка заполненности выполняется только при запуске
/// генерации.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub client_name: String,
    pub item_description: String,
    pub amount: Option<f64>,
    pub currency: Currency,
    pub due_date: NaiveDate,
    pub output_language: OutputLanguage,
}

impl InvoiceDraft {
    /// Пустой черновик со сроком оплаты `due_date`
    pub fn new(due_date: NaiveDate) -> Self {
        Self {
            client_name: String::new(),
            item_description: String::new(),
            amount: None,
            currency: Currency::default(),
            due_date,
            output_language: OutputLanguage::default(),
        }
    }
}

impl Default for InvoiceDraft {
    fn default() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_codes() {
        for currency in Currency::all() {
            assert_eq!(Currency::from_code(currency.code()), Some(currency));
        }
        assert_eq!(Currency::from_code("GBP"), None);
        assert_eq!(Currency::from_code("usd"), None);
        assert_eq!(serde_json::to_string(&Currency::Krw).unwrap(), "\"KRW\"");
    }

    #[test]
    fn test_output_language_names() {
        assert_eq!(OutputLanguage::from_name("Japanese"), Some(OutputLanguage::Japanese));
        assert_eq!(OutputLanguage::from_name("German"), None);
        assert_eq!(OutputLanguage::Spanish.to_string(), "Spanish");
    }

    #[test]
    fn test_draft_field_accepts_form_names() {
        let snake: DraftField = serde_json::from_str("\"client_name\"").unwrap();
        let camel: DraftField = serde_json::from_str("\"clientName\"").unwrap();
        assert_eq!(snake, DraftField::ClientName);
        assert_eq!(camel, DraftField::ClientName);

        let lang: DraftField = serde_json::from_str("\"language\"").unwrap();
        assert_eq!(lang, DraftField::OutputLanguage);
    }

    #[test]
    fn test_new_draft_is_empty() {
        let due = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let draft = InvoiceDraft::new(due);
        assert!(draft.client_name.is_empty());
        assert_eq!(draft.amount, None);
        assert_eq!(draft.currency, Currency::Usd);
        assert_eq!(draft.output_language, OutputLanguage::English);
        assert_eq!(draft.due_date, due);
    }
}
