use serde::{Deserialize, Serialize};

use super::draft::{Currency, OutputLanguage};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyOption {
    pub code: String,
    pub symbol: String,
}

/// Значения для выпадающих списков формы
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceEmailOptions {
    pub currencies: Vec<CurrencyOption>,
    pub output_languages: Vec<String>,
}

impl InvoiceEmailOptions {
    pub fn current() -> Self {
        Self {
            currencies: Currency::all()
                .into_iter()
                .map(|c| CurrencyOption {
                    code: c.code().to_string(),
                    symbol: c.symbol().to_string(),
                })
                .collect(),
            output_languages: OutputLanguage::all()
                .into_iter()
                .map(|l| l.name().to_string())
                .collect(),
        }
    }
}
