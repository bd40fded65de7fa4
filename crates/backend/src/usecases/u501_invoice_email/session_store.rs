use chrono::{DateTime, Duration, Utc};
use contracts::shared::i18n::{UiLanguage, UiSettings};
use contracts::usecases::u501_invoice_email::{
    DraftField, InvoiceDraft, Notice, SessionSnapshot,
};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use thiserror::Error;
use uuid::Uuid;

use super::form_state::{FieldError, FormState};
use super::generation_client::EmailGenerator;
use super::orchestrator::{GenerationOrchestrator, TriggerOutcome};

static SESSION_STORE: OnceCell<SessionStore> = OnceCell::new();

/// Установить хранилище сессий (один раз при старте)
pub fn initialize(store: SessionStore) -> anyhow::Result<()> {
    SESSION_STORE
        .set(store)
        .map_err(|_| anyhow::anyhow!("Session store is already initialized"))
}

pub fn get_store() -> Option<&'static SessionStore> {
    SESSION_STORE.get()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Сессия черновика: один черновик, одни настройки UI, один оркестратор
pub struct InvoiceSession {
    id: String,
    form: Mutex<FormState>,
    settings: Mutex<UiSettings>,
    orchestrator: GenerationOrchestrator,
    updated_at: Mutex<DateTime<Utc>>,
}

impl InvoiceSession {
    fn new(id: String, generator: Arc<dyn EmailGenerator>) -> Self {
        Self {
            id,
            form: Mutex::new(FormState::new(InvoiceDraft::default())),
            settings: Mutex::new(UiSettings::default()),
            orchestrator: GenerationOrchestrator::new(generator),
            updated_at: Mutex::new(Utc::now()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn touch(&self) {
        *self.updated_at.lock().unwrap_or_else(PoisonError::into_inner) = Utc::now();
    }

    pub fn draft(&self) -> InvoiceDraft {
        self.form
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .draft()
            .clone()
    }

    pub fn settings(&self) -> UiSettings {
        *self.settings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn update_field(&self, field: DraftField, raw: &str) -> Result<InvoiceDraft, FieldError> {
        let draft = self
            .form
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .update(field, raw)?;
        self.touch();
        Ok(draft)
    }

    pub fn set_ui_language(&self, language: UiLanguage) {
        self.settings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_language(language);
        self.touch();
    }

    /// Запустить генерацию по текущему черновику
    pub async fn generate(&self) -> TriggerOutcome {
        let draft = self.draft();
        let outcome = self.orchestrator.trigger(&draft).await;
        if outcome != TriggerOutcome::Ignored {
            self.touch();
        }
        outcome
    }

    fn is_stale(&self, now: DateTime<Utc>, max_idle: Duration) -> bool {
        let updated_at = *self.updated_at.lock().unwrap_or_else(PoisonError::into_inner);
        now - updated_at >= max_idle && !self.orchestrator.is_loading()
    }

    /// Снимок для UI; текст уведомления берётся на текущем языке интерфейса
    pub fn snapshot(&self) -> SessionSnapshot {
        let settings = self.settings();
        let view = self.orchestrator.view();
        let updated_at = *self.updated_at.lock().unwrap_or_else(PoisonError::into_inner);

        SessionSnapshot {
            session_id: self.id.clone(),
            draft: self.draft(),
            status: view.status,
            result: view.result,
            notice: view.notice.map(|kind| Notice {
                kind,
                message: settings.t(kind.message_key()).to_string(),
            }),
            attempt: view.attempt,
            ui_language: settings.language(),
            updated_at,
        }
    }
}

/// In-memory хранилище сессий черновиков
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<InvoiceSession>>>,
    generator: Arc<dyn EmailGenerator>,
}

impl SessionStore {
    pub fn new(generator: Arc<dyn EmailGenerator>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            generator,
        }
    }

    /// Создать новую сессию с пустым черновиком
    pub fn create_session(&self) -> Arc<InvoiceSession> {
        let id = Uuid::new_v4().to_string();
        let session = Arc::new(InvoiceSession::new(id.clone(), self.generator.clone()));

        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.insert(id.clone(), session.clone());
        tracing::info!(session_id = %id, "Invoice draft session created");

        session
    }

    pub fn get(&self, session_id: &str) -> Result<Arc<InvoiceSession>, SessionError> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }

    pub fn remove(&self, session_id: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        match sessions.remove(session_id) {
            Some(_) => {
                tracing::info!(session_id, "Invoice draft session removed");
                Ok(())
            }
            None => Err(SessionError::NotFound(session_id.to_string())),
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Удалить сессии, которые не менялись дольше `max_idle`
    ///
    /// Сессии с идущей генерацией не удаляются. Возвращает число удалённых.
    pub fn cleanup_stale_sessions(&self, max_idle: Duration) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_stale(now, max_idle));
        let removed = before - sessions.len();

        if removed > 0 {
            tracing::info!(removed, remaining = sessions.len(), "Stale invoice sessions removed");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_invoice_email::generation_client::GenerationError;
    use crate::usecases::u501_invoice_email::orchestrator::Settlement;
    use async_trait::async_trait;
    use contracts::usecases::u501_invoice_email::{GenerationStatus, NoticeKind};
    use tokio::sync::Notify;

    struct EchoGenerator;

    #[async_trait]
    impl EmailGenerator for EchoGenerator {
        async fn send(&self, prompt: &str) -> Result<String, GenerationError> {
            if prompt.contains("Broken Inc") {
                Err(GenerationError::Failed)
            } else {
                Ok(format!("Subject: Invoice\n\n{}", prompt.lines().count()))
            }
        }
    }

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(EchoGenerator))
    }

    fn fill(session: &InvoiceSession, client: &str) {
        session.update_field(DraftField::ClientName, client).unwrap();
        session
            .update_field(DraftField::ItemDescription, "Q1 Web Development")
            .unwrap();
        session.update_field(DraftField::Amount, "500").unwrap();
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = store();
        let a = store.create_session();
        let b = store.create_session();
        assert_ne!(a.id(), b.id());
        assert_eq!(store.session_count(), 2);

        a.update_field(DraftField::ClientName, "Acme Corp").unwrap();
        assert_eq!(b.draft().client_name, "");

        store.remove(a.id()).unwrap();
        assert!(matches!(store.get(a.id()), Err(SessionError::NotFound(_))));
        assert!(store.get(b.id()).is_ok());
        assert_eq!(store.remove(a.id()), Err(SessionError::NotFound(a.id().to_string())));
    }

    #[tokio::test]
    async fn test_validation_notice_is_localized() {
        let store = store();
        let session = store.create_session();

        assert_eq!(session.generate().await, TriggerOutcome::Rejected);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.status, GenerationStatus::Idle);
        let notice = snapshot.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Validation);
        assert_eq!(notice.message, "Please fill in all required fields.");

        session.set_ui_language(UiLanguage::Ko);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.ui_language, UiLanguage::Ko);
        assert_eq!(snapshot.notice.unwrap().message, "모든 필수 항목을 입력해 주세요.");
    }

    #[tokio::test]
    async fn test_generate_uses_current_draft() {
        let store = store();
        let session = store.create_session();
        fill(&session, "Acme Corp");

        let outcome = session.generate().await;
        assert!(matches!(outcome, TriggerOutcome::Settled(Settlement::Email(_))));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.status, GenerationStatus::Settled);
        assert!(snapshot.result.unwrap().starts_with("Subject: Invoice"));
        assert_eq!(snapshot.notice, None);
        assert_eq!(snapshot.attempt, 1);
    }

    #[tokio::test]
    async fn test_failure_shows_generic_message_only() {
        let store = store();
        let session = store.create_session();
        fill(&session, "Broken Inc");

        session.generate().await;
        let snapshot = session.snapshot();
        assert_eq!(snapshot.status, GenerationStatus::Settled);
        assert_eq!(snapshot.result, None);
        let notice = snapshot.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::GenerationFailed);
        assert_eq!(
            notice.message,
            "Failed to generate email. Please check your connection."
        );
    }

    fn age(session: &InvoiceSession, minutes: i64) {
        *session.updated_at.lock().unwrap() = Utc::now() - Duration::minutes(minutes);
    }

    #[test]
    fn test_cleanup_removes_only_stale_sessions() {
        let store = store();
        let stale = store.create_session();
        let fresh = store.create_session();
        age(&stale, 180);
        age(&fresh, 5);

        assert_eq!(store.cleanup_stale_sessions(Duration::minutes(120)), 1);
        assert!(matches!(store.get(stale.id()), Err(SessionError::NotFound(_))));
        assert!(store.get(fresh.id()).is_ok());
        assert_eq!(store.session_count(), 1);

        assert_eq!(store.cleanup_stale_sessions(Duration::minutes(120)), 0);
    }

    struct WaitingGenerator(Arc<Notify>);

    #[async_trait]
    impl EmailGenerator for WaitingGenerator {
        async fn send(&self, _prompt: &str) -> Result<String, GenerationError> {
            self.0.notified().await;
            Ok("Subject: Invoice".into())
        }
    }

    #[tokio::test]
    async fn test_cleanup_keeps_session_while_loading() {
        let gate = Arc::new(Notify::new());
        let store = SessionStore::new(Arc::new(WaitingGenerator(gate.clone())));
        let session = store.create_session();
        fill(&session, "Acme Corp");

        let running = {
            let session = session.clone();
            tokio::spawn(async move { session.generate().await })
        };
        while session.snapshot().status != GenerationStatus::Loading {
            tokio::task::yield_now().await;
        }

        age(&session, 600);
        assert_eq!(store.cleanup_stale_sessions(Duration::minutes(120)), 0);
        assert!(store.get(session.id()).is_ok());

        gate.notify_one();
        running.await.unwrap();
    }
}
