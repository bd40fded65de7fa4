pub mod form_state;
pub mod generation_client;
pub mod orchestrator;
pub mod prompt;
pub mod session_store;

pub use form_state::{FieldError, FormState};
pub use generation_client::{EmailGenerator, GenerationError, LlmEmailGenerator};
pub use orchestrator::{GenerationOrchestrator, Settlement, TriggerOutcome};
pub use session_store::{InvoiceSession, SessionError, SessionStore};
