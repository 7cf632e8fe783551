//! Symptom questions and the stock catalogue

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A yes/no prompt tagged with the condition a "yes" counts towards
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymptomQuestion {
    pub prompt: String,
    pub condition: String,
}

impl SymptomQuestion {
    pub fn new(prompt: impl Into<String>, condition: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            condition: condition.into(),
        }
    }
}

impl<P: Into<String>, C: Into<String>> From<(P, C)> for SymptomQuestion {
    fn from((prompt, condition): (P, C)) -> Self {
        Self::new(prompt, condition)
    }
}

static STANDARD_QUESTIONS: Lazy<Vec<SymptomQuestion>> = Lazy::new(|| {
    [
        ("Do you experience frequent urination?", "diabetes"),
        ("Do you feel excessive thirst?", "diabetes"),
        ("Do you feel chest pain?", "heart disease"),
        ("Do you experience shortness of breath?", "heart disease"),
        ("Do you have a persistent fever?", "dengue"),
        ("Do you have muscle pain and joint aches?", "dengue"),
        ("Do you have white or yellow vaginal discharge?", "uti"),
        ("Do you feel pain or burning while urinating?", "uti"),
        ("Do you have a cough with phlegm or dry cough?", "cold"),
        ("Do you have a sore throat?", "cold"),
        ("Do you feel a lump in the breast?", "breast cancer"),
        ("Have you noticed any discharge or changes in breast shape?", "breast cancer"),
    ]
    .into_iter()
    .map(SymptomQuestion::from)
    .collect()
});

/// The stock symptom questions, in presentation order
pub fn standard_questions() -> &'static [SymptomQuestion] {
    &STANDARD_QUESTIONS
}
