pub mod u501_invoice_email;
