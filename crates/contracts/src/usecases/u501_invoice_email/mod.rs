pub mod draft;
pub mod options;
pub mod request;
pub mod state;

pub use draft::{Currency, DraftField, InvoiceDraft, OutputLanguage};
pub use options::{CurrencyOption, InvoiceEmailOptions};
pub use request::{UiLanguageRequest, UpdateFieldRequest};
pub use state::{GenerationStatus, Notice, NoticeKind, SessionSnapshot};

use crate::usecases::common::UseCaseMetadata;

pub struct InvoiceEmail;

impl UseCaseMetadata for InvoiceEmail {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "invoice_email"
    }

    fn display_name() -> &'static str {
        "Invoice reminder email"
    }

    fn description() -> &'static str {
        "Drafting an invoice reminder email with an LLM"
    }
}
