//! The pre-authored question list that opens every interview.

/// The canonical opening questions asked before generation takes over.
const DEFAULT_QUESTIONS: [&str; 4] = [
    "What is this story about?",
    "Who are the people in this story?",
    "When did this story take place?",
    "Where did this story happen?",
];

/// An ordered, fixed list of scripted questions.
///
/// # Examples
///
/// ```
/// use talespin_interview::ScriptedQuestions;
///
/// let script = ScriptedQuestions::default();
/// assert_eq!(script.len(), 4);
/// assert_eq!(script.next(0), Some("What is this story about?"));
/// assert_eq!(script.next(4), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedQuestions {
    questions: Vec<String>,
}

impl ScriptedQuestions {
    /// Create a script from an ordered question list.
    pub fn new(questions: Vec<String>) -> Self {
        Self { questions }
    }

    /// The question at `index`, or `None` once the script is exhausted.
    pub fn next(&self, index: usize) -> Option<&str> {
        self.questions.get(index).map(String::as_str)
    }

    /// Number of scripted questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// True if the script holds no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Default for ScriptedQuestions {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_script_asks_the_four_openers() {
        let script = ScriptedQuestions::default();
        assert_eq!(script.len(), 4);
        assert_eq!(script.next(3), Some("Where did this story happen?"));
    }

    #[test]
    fn out_of_range_index_is_exhausted() {
        let script = ScriptedQuestions::new(vec!["Only one".to_string()]);
        assert_eq!(script.next(0), Some("Only one"));
        assert_eq!(script.next(1), None);
        assert_eq!(script.next(100), None);
    }
}
