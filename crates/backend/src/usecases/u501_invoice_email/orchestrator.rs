//! Машина состояний генерации письма
//!
//! `Idle | Settled --trigger--> Loading --> Settled(result | error)`.
//! Переход в `Loading` проверяется и выполняется под одной блокировкой,
//! поэтому два одновременных запуска не могут оба дойти до сервиса.
//! Если future `trigger` будет отброшен (клиент отключился), попытка
//! завершается как неудачная и сессия не остаётся в `Loading`.

use contracts::usecases::u501_invoice_email::{GenerationStatus, InvoiceDraft, NoticeKind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::generation_client::EmailGenerator;
use super::prompt;

/// Результат завершённой попытки
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    Email(String),
    Failed,
}

/// Что произошло при запуске генерации
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Попытка выполнена
    Settled(Settlement),
    /// Черновик не прошёл проверку заполненности, состояние не изменилось
    Rejected,
    /// Генерация уже идёт, повторный запуск проигнорирован
    Ignored,
}

/// Состояние оркестратора для отображения
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrchestratorView {
    pub status: GenerationStatus,
    pub result: Option<String>,
    pub notice: Option<NoticeKind>,
    pub attempt: u64,
}

#[derive(Debug, Default)]
struct OrchestratorState {
    status: GenerationStatus,
    result: Option<String>,
    notice: Option<NoticeKind>,
    attempt: u64,
}

pub struct GenerationOrchestrator {
    generator: Arc<dyn EmailGenerator>,
    state: Mutex<OrchestratorState>,
}

impl GenerationOrchestrator {
    pub fn new(generator: Arc<dyn EmailGenerator>) -> Self {
        Self {
            generator,
            state: Mutex::new(OrchestratorState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, OrchestratorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn view(&self) -> OrchestratorView {
        let state = self.lock();
        OrchestratorView {
            status: state.status,
            result: state.result.clone(),
            notice: state.notice,
            attempt: state.attempt,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.lock().status == GenerationStatus::Loading
    }

    /// Запустить генерацию письма для черновика
    pub async fn trigger(&self, draft: &InvoiceDraft) -> TriggerOutcome {
        let attempt = {
            let mut state = self.lock();
            if state.status == GenerationStatus::Loading {
                return TriggerOutcome::Ignored;
            }
            if !is_complete(draft) {
                state.notice = Some(NoticeKind::Validation);
                return TriggerOutcome::Rejected;
            }

            state.attempt += 1;
            state.status = GenerationStatus::Loading;
            state.result = None;
            state.notice = None;
            state.attempt
        };

        let instruction = prompt::build(draft);
        tracing::info!(attempt, "Generating invoice email");

        let pending = PendingAttempt {
            state: &self.state,
            attempt,
            finished: false,
        };

        let settlement = match self.generator.send(&instruction).await {
            Ok(text) => Settlement::Email(text),
            Err(_) => Settlement::Failed,
        };
        pending.finish(&settlement);

        TriggerOutcome::Settled(settlement)
    }
}

/// Незавершённая попытка; при drop без `finish` переводит её в ошибку
struct PendingAttempt<'a> {
    state: &'a Mutex<OrchestratorState>,
    attempt: u64,
    finished: bool,
}

impl PendingAttempt<'_> {
    fn finish(mut self, settlement: &Settlement) {
        self.finished = true;
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        settle(&mut state, settlement);
    }
}

impl Drop for PendingAttempt<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.attempt == self.attempt && state.status == GenerationStatus::Loading {
            tracing::warn!(attempt = self.attempt, "Invoice email generation was cancelled");
            settle(&mut state, &Settlement::Failed);
        }
    }
}

fn settle(state: &mut OrchestratorState, settlement: &Settlement) {
    state.status = GenerationStatus::Settled;
    match settlement {
        Settlement::Email(text) => {
            state.result = Some(text.clone());
            state.notice = None;
        }
        Settlement::Failed => {
            state.result = None;
            state.notice = Some(NoticeKind::GenerationFailed);
        }
    }
}

/// Проверка заполненности черновика перед генерацией
///
/// Имя клиента и описание не пустые, сумма: конечное число `>= 0`.
pub fn is_complete(draft: &InvoiceDraft) -> bool {
    !draft.client_name.trim().is_empty()
        && !draft.item_description.trim().is_empty()
        && draft
            .amount
            .is_some_and(|amount| amount.is_finite() && amount >= 0.0)
}
