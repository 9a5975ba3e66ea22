use serde::{Deserialize, Serialize};

/// An immutable, ordered list of interview questions.
///
/// Fixed at startup; the session state machine depends on its length and
/// ordering but never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionList(Vec<String>);

impl QuestionList {
    pub fn new(questions: Vec<String>) -> Self {
        Self(questions)
    }

    /// The standard psychiatrist-style interview.
    pub fn standard_interview() -> Self {
        Self(
            [
                "Can you tell me about your family background?",
                "What was your childhood like?",
                "How do you handle stress in your daily life?",
                "What are your goals and aspirations?",
                "How do you feel about your relationships with others?",
                "Have you experienced any significant traumas in your life?",
                "What makes you happy?",
                "How do you cope with negative emotions?",
                "What are your strengths and weaknesses?",
                "How do you see your future?",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
