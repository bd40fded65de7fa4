use chrono::NaiveDate;
use contracts::usecases::u501_invoice_email::{Currency, DraftField, InvoiceDraft, OutputLanguage};
use thiserror::Error;

/// Ошибки изменения поля черновика
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("Unknown output language: {0}")]
    UnknownLanguage(String),

    #[error("Invalid due date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),
}

/// Хранит текущий черновик счёта
///
/// Проверку заполненности не выполняет: это делает оркестратор в момент
/// запуска генерации.
#[derive(Debug, Clone)]
pub struct FormState {
    draft: InvoiceDraft,
}

impl FormState {
    pub fn new(draft: InvoiceDraft) -> Self {
        Self { draft }
    }

    pub fn draft(&self) -> &InvoiceDraft {
        &self.draft
    }

    /// Изменить одно поле и вернуть новый черновик
    ///
    /// Черновик заменяется целиком; при ошибке остаётся прежним.
    pub fn update(&mut self, field: DraftField, raw: &str) -> Result<InvoiceDraft, FieldError> {
        let mut next = self.draft.clone();

        match field {
            DraftField::ClientName => next.client_name = raw.to_string(),
            DraftField::ItemDescription => next.item_description = raw.to_string(),
            DraftField::Amount => next.amount = parse_amount(raw),
            DraftField::Currency => {
                next.currency = Currency::from_code(raw.trim())
                    .ok_or_else(|| FieldError::UnknownCurrency(raw.to_string()))?;
            }
            DraftField::DueDate => {
                next.due_date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|_| FieldError::InvalidDate(raw.to_string()))?;
            }
            DraftField::OutputLanguage => {
                next.output_language = OutputLanguage::from_name(raw.trim())
                    .ok_or_else(|| FieldError::UnknownLanguage(raw.to_string()))?;
            }
        }

        self.draft = next.clone();
        Ok(next)
    }
}

/// Сумма из текстового поля; `None` если это не конечное число
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormState {
        FormState::new(InvoiceDraft::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        ))
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("500"), Some(500.0));
        assert_eq!(parse_amount(" 12.5 "), Some(12.5));
        assert_eq!(parse_amount("0"), Some(0.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("NaN"), None);
    }

    #[test]
    fn test_text_fields_stored_verbatim() {
        let mut form = form();
        let draft = form.update(DraftField::ClientName, "  Acme Corp ").unwrap();
        assert_eq!(draft.client_name, "  Acme Corp ");

        let draft = form
            .update(DraftField::ItemDescription, "Q1 Web Development")
            .unwrap();
        assert_eq!(draft.item_description, "Q1 Web Development");
        assert_eq!(draft.client_name, "  Acme Corp ");
        assert_eq!(form.draft(), &draft);
    }

    #[test]
    fn test_non_numeric_amount_becomes_none() {
        let mut form = form();
        form.update(DraftField::Amount, "500").unwrap();
        assert_eq!(form.draft().amount, Some(500.0));

        let draft = form.update(DraftField::Amount, "abc").unwrap();
        assert_eq!(draft.amount, None);
    }

    #[test]
    fn test_enumerated_fields() {
        let mut form = form();
        let draft = form.update(DraftField::Currency, "KRW").unwrap();
        assert_eq!(draft.currency, Currency::Krw);

        let draft = form.update(DraftField::OutputLanguage, "Korean").unwrap();
        assert_eq!(draft.output_language, OutputLanguage::Korean);

        let draft = form.update(DraftField::DueDate, "2024-07-01").unwrap();
        assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    }

    #[test]
    fn test_invalid_value_leaves_draft_untouched() {
        let mut form = form();
        form.update(DraftField::ClientName, "Acme Corp").unwrap();
        let before = form.draft().clone();

        assert_eq!(
            form.update(DraftField::Currency, "GBP"),
            Err(FieldError::UnknownCurrency("GBP".into()))
        );
        assert_eq!(
            form.update(DraftField::DueDate, "01.07.2024"),
            Err(FieldError::InvalidDate("01.07.2024".into()))
        );
        assert_eq!(
            form.update(DraftField::OutputLanguage, "German"),
            Err(FieldError::UnknownLanguage("German".into()))
        );
        assert_eq!(form.draft(), &before);
    }
}
