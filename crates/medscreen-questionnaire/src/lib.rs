//! Medscreen Symptom Questionnaire Engine
//!
//! Drives a fixed sequence of yes/no symptom questions, tallies hits per
//! condition, and ranks the conditions once every question is answered.
//!
//! # Example
//!
//! ```ignore
//! use medscreen_questionnaire::Questionnaire;
//!
//! let q = Questionnaire::standard();
//! let mut state = q.start();
//! while let Ok(question) = q.current_question(&state) {
//!     let yes = ask_user(&question.prompt);
//!     state = q.answer(&state, yes)?;
//! }
//! println!("{}", q.result(&state)?);
//! ```
//!
//! # Scoring
//!
//! The winning condition has the most "yes" answers; ties go to the condition
//! whose first question appears earliest. Its confidence is its hit count as
//! a percentage of its question count, rounded to one decimal place.

pub mod engine;
pub mod error;
pub mod question;
pub mod session;
pub mod store;

pub use engine::{Diagnosis, Questionnaire, title_case};
pub use error::{QuestionnaireError, QuestionnaireResult};
pub use question::{SymptomQuestion, standard_questions};
pub use session::{SessionState, SessionStatus};
pub use store::SessionStore;
