//! Questionnaire engine
//!
//! A linear yes/no interview over a fixed question sequence:
//!
//! - `Asking(step)` for `0 <= step < N`, then `Complete`
//! - `answer` is only valid while asking; a "yes" adds one hit to the
//!   question's condition
//! - `restart` is only valid once complete
//! - `result` is only valid once complete
//!
//! Transitions take the caller's [`SessionState`] by reference and return a
//! new one, so a rejected call leaves the caller's state untouched.

use crate::error::{QuestionnaireError, QuestionnaireResult};
use crate::question::{standard_questions, SymptomQuestion};
use crate::session::{SessionState, SessionStatus};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Final outcome of a completed session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Diagnosis {
    /// Every question was answered "no"
    NoConditionDetected,
    /// Best-scoring condition and its hit percentage, one decimal place
    Condition { name: String, confidence: f64 },
}

impl Diagnosis {
    pub fn condition(&self) -> Option<&str> {
        match self {
            Self::NoConditionDetected => None,
            Self::Condition { name, .. } => Some(name.as_str()),
        }
    }

    pub fn confidence(&self) -> Option<f64> {
        match self {
            Self::NoConditionDetected => None,
            Self::Condition { confidence, .. } => Some(*confidence),
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoConditionDetected => {
                write!(f, "No specific disease detected based on the answers provided.")
            }
            Self::Condition { name, confidence } => write!(
                f,
                "Based on your symptoms, you might have: {} (confidence {}%)",
                title_case(name),
                confidence
            ),
        }
    }
}

/// `heart disease` becomes `Heart Disease`
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A fixed, ordered sequence of symptom questions
#[derive(Debug, Clone, PartialEq)]
pub struct Questionnaire {
    questions: Vec<SymptomQuestion>,
    /// Question count per condition, in order of first appearance
    totals: IndexMap<String, u32>,
}

impl Questionnaire {
    /// Create a questionnaire; the sequence must not be empty
    pub fn new<I, Q>(questions: I) -> QuestionnaireResult<Self>
    where
        I: IntoIterator<Item = Q>,
        Q: Into<SymptomQuestion>,
    {
        let questions: Vec<SymptomQuestion> = questions.into_iter().map(Into::into).collect();
        if questions.is_empty() {
            return Err(QuestionnaireError::EmptyQuestionnaire);
        }
        Ok(Self::tally(questions))
    }

    /// The stock twelve-question symptom checker
    pub fn standard() -> Self {
        Self::tally(standard_questions().to_vec())
    }

    fn tally(questions: Vec<SymptomQuestion>) -> Self {
        let mut totals = IndexMap::new();
        for question in &questions {
            *totals.entry(question.condition.clone()).or_insert(0) += 1;
        }
        Self { questions, totals }
    }

    /// Number of questions
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[SymptomQuestion] {
        &self.questions
    }

    /// Conditions in order of first appearance
    pub fn conditions(&self) -> impl Iterator<Item = &str> + '_ {
        self.totals.keys().map(String::as_str)
    }

    /// Number of questions tagged with `condition`
    pub fn total_for(&self, condition: &str) -> u32 {
        self.totals.get(condition).copied().unwrap_or(0)
    }

    /// Question at `step`
    pub fn question(&self, step: usize) -> QuestionnaireResult<&SymptomQuestion> {
        self.questions
            .get(step)
            .ok_or(QuestionnaireError::StepOutOfRange {
                step,
                total: self.questions.len(),
            })
    }

    /// Fresh session at the first question
    pub fn start(&self) -> SessionState {
        SessionState::default()
    }

    /// Where `state` stands
    pub fn status(&self, state: &SessionState) -> QuestionnaireResult<SessionStatus> {
        self.validate(state)?;
        Ok(self.status_unchecked(state))
    }

    fn status_unchecked(&self, state: &SessionState) -> SessionStatus {
        if state.current_step < self.questions.len() {
            SessionStatus::Asking {
                step: state.current_step,
                total: self.questions.len(),
            }
        } else {
            SessionStatus::Complete
        }
    }

    /// `(answered, total)` question counts
    pub fn progress(&self, state: &SessionState) -> QuestionnaireResult<(usize, usize)> {
        self.validate(state)?;
        Ok((state.current_step, self.questions.len()))
    }

    /// Question the session is waiting on
    pub fn current_question(&self, state: &SessionState) -> QuestionnaireResult<&SymptomQuestion> {
        match self.status(state)? {
            SessionStatus::Asking { step, .. } => self.question(step),
            status @ SessionStatus::Complete => {
                Err(QuestionnaireError::invalid_transition("ask a question", status))
            }
        }
    }

    /// Record the answer to the current question and advance
    pub fn answer(&self, state: &SessionState, yes: bool) -> QuestionnaireResult<SessionState> {
        let step = match self.status(state)? {
            SessionStatus::Asking { step, .. } => step,
            status @ SessionStatus::Complete => {
                return Err(QuestionnaireError::invalid_transition("answer", status));
            }
        };

        let mut next = state.clone();
        if yes {
            let condition = &self.questions[step].condition;
            *next.scores.entry(condition.clone()).or_insert(0) += 1;
        }
        next.current_step = step + 1;

        log::debug!(
            "question {}/{} answered {}",
            step + 1,
            self.questions.len(),
            if yes { "yes" } else { "no" }
        );
        if next.current_step == self.questions.len() {
            log::debug!("questionnaire complete with scores {:?}", next.scores);
        }
        Ok(next)
    }

    /// Back to the first question with no scores
    pub fn restart(&self, state: &SessionState) -> QuestionnaireResult<SessionState> {
        match self.status(state)? {
            SessionStatus::Complete => Ok(self.start()),
            status @ SessionStatus::Asking { .. } => {
                Err(QuestionnaireError::invalid_transition("restart", status))
            }
        }
    }

    /// Rank the conditions of a completed session
    ///
    /// The winner is the condition with the most hits; ties go to the
    /// condition whose first question comes earliest in the sequence.
    pub fn result(&self, state: &SessionState) -> QuestionnaireResult<Diagnosis> {
        if let status @ SessionStatus::Asking { .. } = self.status(state)? {
            return Err(QuestionnaireError::invalid_transition("compute a result", status));
        }

        let mut best: Option<(&str, u32, u32)> = None;
        for (condition, &total) in &self.totals {
            let hits = state.hits(condition);
            if hits == 0 {
                continue;
            }
            if best.is_none_or(|(_, top, _)| hits > top) {
                best = Some((condition.as_str(), hits, total));
            }
        }

        Ok(match best {
            None => Diagnosis::NoConditionDetected,
            Some((name, hits, total)) => Diagnosis::Condition {
                name: name.to_string(),
                confidence: percent_one_decimal(hits, total),
            },
        })
    }

    /// Reject states this questionnaire could not have produced
    fn validate(&self, state: &SessionState) -> QuestionnaireResult<()> {
        let total = self.questions.len();
        if state.current_step > total {
            return Err(QuestionnaireError::corrupt(format!(
                "step {} is past the last of {} questions",
                state.current_step, total
            )));
        }

        for (condition, &hits) in &state.scores {
            if !self.totals.contains_key(condition) {
                return Err(QuestionnaireError::corrupt(format!(
                    "unknown condition '{}'",
                    condition
                )));
            }
            let asked = self.questions[..state.current_step]
                .iter()
                .filter(|q| &q.condition == condition)
                .count();
            if hits == 0 || hits as usize > asked {
                return Err(QuestionnaireError::corrupt(format!(
                    "{} hits for '{}' after {} of its questions",
                    hits, condition, asked
                )));
            }
        }
        Ok(())
    }
}

fn percent_one_decimal(hits: u32, total: u32) -> f64 {
    let percent = f64::from(hits) / f64::from(total) * 100.0;
    (percent * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Questionnaire {
        Questionnaire::new([
            ("Thirsty?", "diabetes"),
            ("Chest pain?", "heart disease"),
            ("Urinating often?", "diabetes"),
        ])
        .unwrap()
    }

    fn run(q: &Questionnaire, answers: &[bool]) -> SessionState {
        answers
            .iter()
            .fold(q.start(), |state, &yes| q.answer(&state, yes).unwrap())
    }

    #[test]
    fn test_empty_questionnaire_rejected() {
        let err = Questionnaire::new(Vec::<SymptomQuestion>::new()).unwrap_err();
        assert_eq!(err, QuestionnaireError::EmptyQuestionnaire);
    }

    #[test]
    fn test_totals_in_first_appearance_order() {
        let q = small();
        assert_eq!(q.conditions().collect::<Vec<_>>(), ["diabetes", "heart disease"]);
        assert_eq!(q.total_for("diabetes"), 2);
        assert_eq!(q.total_for("cold"), 0);
    }

    #[test]
    fn test_answer_advances_and_scores() {
        let q = small();
        let state = q.answer(&q.start(), true).unwrap();
        assert_eq!(state.current_step(), 1);
        assert_eq!(state.hits("diabetes"), 1);

        let state = q.answer(&state, false).unwrap();
        assert_eq!(state.current_step(), 2);
        assert!(!state.scores().contains_key("heart disease"));
    }

    #[test]
    fn test_partial_score_rounds_to_one_decimal() {
        let q = Questionnaire::new([("a?", "x"), ("b?", "x"), ("c?", "x")]).unwrap();
        let state = run(&q, &[true, false, false]);
        assert_eq!(
            q.result(&state).unwrap(),
            Diagnosis::Condition {
                name: "x".into(),
                confidence: 33.3
            }
        );
    }

    #[test]
    fn test_result_before_completion_rejected() {
        let q = small();
        let err = q.result(&q.start()).unwrap_err();
        assert!(matches!(err, QuestionnaireError::InvalidTransition { .. }));
    }

    #[test]
    fn test_current_question() {
        let q = small();
        let state = run(&q, &[false]);
        assert_eq!(q.current_question(&state).unwrap().prompt, "Chest pain?");
        let done = run(&q, &[false, false, false]);
        assert!(q.current_question(&done).is_err());
    }

    #[test]
    fn test_question_out_of_range() {
        let q = small();
        assert_eq!(
            q.question(3).unwrap_err(),
            QuestionnaireError::StepOutOfRange { step: 3, total: 3 }
        );
    }

    #[test]
    fn test_corrupt_states() {
        let q = small();
        let past_end = SessionState::from_parts(4, IndexMap::new());
        assert!(matches!(q.status(&past_end), Err(QuestionnaireError::CorruptState { .. })));

        let unknown = SessionState::from_parts(3, IndexMap::from([("flu".to_string(), 1)]));
        assert!(matches!(q.result(&unknown), Err(QuestionnaireError::CorruptState { .. })));

        // Only one diabetes question has been asked by step 1
        let too_many = SessionState::from_parts(1, IndexMap::from([("diabetes".to_string(), 2)]));
        assert!(matches!(q.answer(&too_many, true), Err(QuestionnaireError::CorruptState { .. })));
    }

    #[test]
    fn test_diagnosis_display() {
        let diagnosis = Diagnosis::Condition {
            name: "heart disease".into(),
            confidence: 100.0,
        };
        assert_eq!(
            diagnosis.to_string(),
            "Based on your symptoms, you might have: Heart Disease (confidence 100%)"
        );
        assert_eq!(title_case("uti"), "Uti");
    }
}
