use contracts::usecases::u501_invoice_email::InvoiceDraft;

/// Плейсхолдер для платёжных реквизитов в тексте письма
pub const PAYMENT_DETAILS_PLACEHOLDER: &str = "[Bank Account Details]";

/// Собрать инструкцию для LLM по черновику счёта
///
/// Чистая функция: одинаковый черновик даёт байт-в-байт одинаковый текст.
pub fn build(draft: &InvoiceDraft) -> String {
    let amount = draft
        .amount
        .map(|a| a.to_string())
        .unwrap_or_default();

    format!(
        "You are an expert in professional business correspondence.\n\
         Write a polite, professional and clear invoice reminder email using these details:\n\
         \n\
         - Recipient Name: {client}\n\
         - Service/Item: {item}\n\
         - Amount: {amount} {currency}\n\
         - Due Date: {due}\n\
         - Language: {language}\n\
         \n\
         Requirements:\n\
         1. Start with a professional subject line, then the email body.\n\
         2. Open politely, following general business etiquette.\n\
         3. State clearly the amount due and the service provided.\n\
         4. Include the placeholder {placeholder} where the payment details go.\n\
         5. End with a professional closing.\n\
         6. Keep the tone courteous but firm about the due date.\n\
         7. Write the email in {language}.\n\
         8. Return ONLY the email content (Subject and Body), with no commentary.\n",
        client = draft.client_name,
        item = draft.item_description,
        amount = amount,
        currency = draft.currency.code(),
        due = draft.due_date.format("%Y-%m-%d"),
        language = draft.output_language.name(),
        placeholder = PAYMENT_DETAILS_PLACEHOLDER,
    )
}
