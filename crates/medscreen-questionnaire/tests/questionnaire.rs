//! Symptom questionnaire tests
//!
//! Tests for: answer, restart, result, tie-breaking, invalid transitions,
//! and session isolation across restarts.

use medscreen_questionnaire::{
    Diagnosis, Questionnaire, QuestionnaireError, SessionState, SessionStatus, SessionStore,
    SymptomQuestion,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use std::sync::Arc;

// ============================================================================
// Test Helpers
// ============================================================================

fn run(q: &Questionnaire, answers: &[bool]) -> SessionState {
    let mut state = q.start();
    for &yes in answers {
        state = q
            .answer(&state, yes)
            .unwrap_or_else(|e| panic!("answer failed at step {}: {}", state.current_step(), e));
    }
    state
}

/// Answers "yes" exactly to the questions tagged with `condition`
fn yes_to(q: &Questionnaire, condition: &str) -> Vec<bool> {
    q.questions().iter().map(|s| s.condition == condition).collect()
}

fn condition(name: &str, confidence: f64) -> Diagnosis {
    Diagnosis::Condition {
        name: name.to_string(),
        confidence,
    }
}

// ============================================================================
// Completion Tests
// ============================================================================

#[test]
fn test_all_no_detects_nothing() {
    let q = Questionnaire::standard();
    let state = run(&q, &vec![false; q.len()]);

    assert_eq!(q.status(&state).unwrap(), SessionStatus::Complete);
    assert!(state.scores().is_empty());
    assert_eq!(q.result(&state).unwrap(), Diagnosis::NoConditionDetected);
}

#[rstest]
#[case::diabetes("diabetes")]
#[case::heart_disease("heart disease")]
#[case::dengue("dengue")]
#[case::uti("uti")]
#[case::cold("cold")]
#[case::breast_cancer("breast cancer")]
fn test_both_questions_of_a_condition(#[case] name: &str) {
    let q = Questionnaire::standard();
    assert_eq!(q.total_for(name), 2);

    let state = run(&q, &yes_to(&q, name));
    assert_eq!(q.result(&state).unwrap(), condition(name, 100.0));
}

#[test]
fn test_single_yes_is_fifty_percent() {
    let q = Questionnaire::standard();
    let mut answers = vec![false; q.len()];
    answers[9] = true; // sore throat

    let state = run(&q, &answers);
    assert_eq!(q.result(&state).unwrap(), condition("cold", 50.0));
}

#[test]
fn test_highest_score_wins_over_earlier_condition() {
    let q = Questionnaire::standard();
    let mut answers = vec![false; q.len()];
    answers[0] = true; // diabetes 1/2
    answers[10] = true; // breast cancer 2/2
    answers[11] = true;

    let state = run(&q, &answers);
    assert_eq!(q.result(&state).unwrap(), condition("breast cancer", 100.0));
}

// ============================================================================
// Tie-Break Tests
// ============================================================================

#[test]
fn test_tie_goes_to_earliest_first_question() {
    let q = Questionnaire::standard();
    let mut answers = vec![false; q.len()];
    answers[8] = true; // cold
    answers[9] = true;
    answers[2] = true; // heart disease
    answers[3] = true;

    let state = run(&q, &answers);
    for _ in 0..5 {
        assert_eq!(q.result(&state).unwrap(), condition("heart disease", 100.0));
    }
}

#[test]
fn test_tie_ignores_order_of_yes_answers() {
    // "later" is answered yes first, but "earlier" has the earlier first question
    let q = Questionnaire::new([
        ("e1?", "earlier"),
        ("l1?", "later"),
        ("e2?", "earlier"),
        ("l2?", "later"),
    ])
    .unwrap();

    let state = run(&q, &[false, true, true, false]);
    assert_eq!(state.scores().keys().next().map(String::as_str), Some("later"));
    assert_eq!(q.result(&state).unwrap(), condition("earlier", 50.0));
}

#[test]
fn test_tie_break_uses_first_appearance_not_question_count() {
    let q = Questionnaire::new([
        ("a1?", "a"),
        ("b1?", "b"),
        ("a2?", "a"),
        ("a3?", "a"),
    ])
    .unwrap();

    // a: 1/3, b: 1/1; equal hits, so a wins despite the lower percentage
    let state = run(&q, &[true, true, false, false]);
    assert_eq!(q.result(&state).unwrap(), condition("a", 33.3));
}

// ============================================================================
// Transition Tests
// ============================================================================

#[test]
fn test_answer_after_complete_rejected() {
    let q = Questionnaire::standard();
    let done = run(&q, &vec![true; q.len()]);

    let err = q.answer(&done, true).unwrap_err();
    assert_eq!(err, QuestionnaireError::invalid_transition("answer", "complete"));
    assert_eq!(q.status(&done).unwrap(), SessionStatus::Complete);
}

#[rstest]
#[case(0)]
#[case(5)]
#[case(11)]
fn test_restart_while_asking_rejected(#[case] answered: usize) {
    let q = Questionnaire::standard();
    let state = run(&q, &vec![true; answered]);
    let before = state.clone();

    let err = q.restart(&state).unwrap_err();
    assert!(matches!(err, QuestionnaireError::InvalidTransition { .. }));
    assert_eq!(state, before);
}

#[test]
fn test_restart_clears_previous_scores() {
    let q = Questionnaire::standard();
    let done = run(&q, &vec![true; q.len()]);
    assert!(q.result(&done).unwrap().condition().is_some());

    let fresh = q.restart(&done).unwrap();
    assert_eq!(fresh, q.start());

    let state = (0..q.len()).fold(fresh, |s, _| q.answer(&s, false).unwrap());
    assert_eq!(q.result(&state).unwrap(), Diagnosis::NoConditionDetected);
}

#[test]
fn test_every_step_reports_its_question() {
    let q = Questionnaire::standard();
    let mut state = q.start();
    for (step, expected) in q.questions().iter().enumerate() {
        assert_eq!(
            q.status(&state).unwrap(),
            SessionStatus::Asking {
                step,
                total: q.len()
            }
        );
        assert_eq!(q.current_question(&state).unwrap(), expected);
        state = q.answer(&state, false).unwrap();
    }
    assert!(q.status(&state).unwrap().is_complete());
    assert_eq!(q.progress(&state).unwrap(), (12, 12));
}

#[test]
fn test_custom_questions_from_values() {
    let q = Questionnaire::new(vec![SymptomQuestion::new("Rash?", "measles")]).unwrap();
    let state = run(&q, &[true]);
    assert_eq!(q.result(&state).unwrap().to_string(),
        "Based on your symptoms, you might have: Measles (confidence 100%)");
}

#[test]
fn test_store_drives_full_session() {
    let store = SessionStore::new(Arc::new(Questionnaire::standard()));
    store.open("session-1");

    for step in 0..12 {
        let question = store.current_question("session-1").unwrap();
        store.answer("session-1", question.condition == "uti").unwrap();
        assert_eq!(store.get("session-1").unwrap().current_step(), step + 1);
    }

    assert_eq!(store.result("session-1").unwrap(), condition("uti", 100.0));
    assert!(store.answer("session-1", true).is_err());
    store.restart("session-1").unwrap();
    assert_eq!(store.get("session-1").unwrap(), SessionState::default());
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_scores_never_exceed_totals(answers in proptest::collection::vec(any::<bool>(), 12)) {
        let q = Questionnaire::standard();
        let state = run(&q, &answers);
        for (name, hits) in state.scores() {
            prop_assert!(*hits >= 1);
            prop_assert!(*hits <= q.total_for(name));
        }
    }

    #[test]
    fn prop_confidence_in_range_when_detected(answers in proptest::collection::vec(any::<bool>(), 12)) {
        let q = Questionnaire::standard();
        let state = run(&q, &answers);
        match q.result(&state).unwrap() {
            Diagnosis::NoConditionDetected => prop_assert!(answers.iter().all(|yes| !yes)),
            Diagnosis::Condition { confidence, .. } => {
                prop_assert!(confidence > 0.0 && confidence <= 100.0);
            }
        }
    }

    #[test]
    fn prop_result_is_deterministic(answers in proptest::collection::vec(any::<bool>(), 12)) {
        let q = Questionnaire::standard();
        let first = q.result(&run(&q, &answers)).unwrap();
        let second = q.result(&run(&q, &answers)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_restart_never_leaks(answers in proptest::collection::vec(any::<bool>(), 12)) {
        let q = Questionnaire::standard();
        let fresh = q.restart(&run(&q, &answers)).unwrap();
        prop_assert_eq!(fresh.current_step(), 0);
        prop_assert!(fresh.scores().is_empty());
    }
}
