//! In-memory session store
//!
//! A caller-side helper for hosts that serve many users at once: it keeps one
//! [`SessionState`] per session id and applies transitions under a write
//! lock, so two answers for the same session are never interleaved.

use crate::engine::{Diagnosis, Questionnaire};
use crate::error::{QuestionnaireError, QuestionnaireResult};
use crate::question::SymptomQuestion;
use crate::session::{SessionState, SessionStatus};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Session states keyed by session id
#[derive(Clone)]
pub struct SessionStore {
    questionnaire: Arc<Questionnaire>,
    sessions: Arc<RwLock<HashMap<String, SessionState>>>,
}

impl SessionStore {
    pub fn new(questionnaire: Arc<Questionnaire>) -> Self {
        Self {
            questionnaire,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    /// Start (or start over) the session `id`
    pub fn open(&self, id: impl Into<String>) -> SessionState {
        let state = self.questionnaire.start();
        self.sessions.write().insert(id.into(), state.clone());
        state
    }

    /// Current state of `id`
    pub fn get(&self, id: &str) -> QuestionnaireResult<SessionState> {
        self.sessions
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| unknown(id))
    }

    pub fn status(&self, id: &str) -> QuestionnaireResult<SessionStatus> {
        let sessions = self.sessions.read();
        let state = sessions.get(id).ok_or_else(|| unknown(id))?;
        self.questionnaire.status(state)
    }

    /// Question `id` is waiting on
    pub fn current_question(&self, id: &str) -> QuestionnaireResult<SymptomQuestion> {
        let sessions = self.sessions.read();
        let state = sessions.get(id).ok_or_else(|| unknown(id))?;
        self.questionnaire.current_question(state).cloned()
    }

    /// Answer the current question of `id`
    pub fn answer(&self, id: &str, yes: bool) -> QuestionnaireResult<SessionState> {
        self.transition(id, |q, state| q.answer(state, yes))
    }

    /// Restart the completed session `id`
    pub fn restart(&self, id: &str) -> QuestionnaireResult<SessionState> {
        self.transition(id, Questionnaire::restart)
    }

    /// Result of the completed session `id`
    pub fn result(&self, id: &str) -> QuestionnaireResult<Diagnosis> {
        let sessions = self.sessions.read();
        let state = sessions.get(id).ok_or_else(|| unknown(id))?;
        self.questionnaire.result(state)
    }

    /// Drop the session `id`, returning its last state
    pub fn close(&self, id: &str) -> Option<SessionState> {
        self.sessions.write().remove(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    fn transition<F>(&self, id: &str, apply: F) -> QuestionnaireResult<SessionState>
    where
        F: FnOnce(&Questionnaire, &SessionState) -> QuestionnaireResult<SessionState>,
    {
        let mut sessions = self.sessions.write();
        let state = sessions.get_mut(id).ok_or_else(|| unknown(id))?;
        let next = apply(&self.questionnaire, state)?;
        *state = next.clone();
        Ok(next)
    }
}

fn unknown(id: &str) -> QuestionnaireError {
    QuestionnaireError::UnknownSession { id: id.to_string() }
}
