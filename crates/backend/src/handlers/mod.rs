pub mod i18n;
pub mod u501_invoice_email;
