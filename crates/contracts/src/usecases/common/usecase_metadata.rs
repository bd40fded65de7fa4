/// Метаданные UseCase для идентификации в логах и API
pub trait UseCaseMetadata {
    /// Индекс UseCase, например "u501"
    fn usecase_index() -> &'static str;

    /// Техническое имя, например "invoice_email"
    fn usecase_name() -> &'static str;

    /// Отображаемое имя для UI
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// Полное имя вида "u501_invoice_email"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_invoice_email::InvoiceEmail;

    #[test]
    fn test_full_name() {
        assert_eq!(InvoiceEmail::full_name(), "u501_invoice_email");
        assert!(!InvoiceEmail::description().is_empty());
    }
}
