//! In-memory transcript of one interview session.

use std::collections::HashMap;
use talespin_core::{Message, MessageId, Role, Speaker, TurnId};
use talespin_error::{TalespinResult, TranscriptError, TranscriptErrorKind};
use talespin_interface::TurnView;

/// Ordered message sequence for one interview session.
///
/// Append-only during the interview; the only mutation is resolving an
/// answer's text. Insertion order is conversational order is display
/// order. Each question and its answer share a [`TurnId`], so pairing
/// never depends on adjacency in the sequence.
///
/// # Examples
///
/// ```
/// use talespin_core::Speaker;
/// use talespin_interview::Transcript;
///
/// let mut transcript = Transcript::new();
/// let user = Speaker::User("uid-1".to_string());
/// let answer_id = transcript.append_turn("What is this story about?", user).unwrap();
/// transcript.resolve_answer(&answer_id, "A summer in Lisbon").unwrap();
/// assert_eq!(transcript.len(), 2);
/// assert!(transcript.turns()[0].is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    positions: HashMap<String, usize>,
    next_id: u32,
    next_turn: TurnId,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages, questions and answer slots both counted.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True if no messages have been appended.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message to the end of the sequence.
    ///
    /// Fails with [`TranscriptErrorKind::DuplicateId`] if a message with
    /// the same id was already appended.
    pub fn append(&mut self, message: Message) -> TalespinResult<()> {
        let id = message.id.as_str().to_string();
        if self.positions.contains_key(&id) {
            return Err(TranscriptError::new(TranscriptErrorKind::DuplicateId(id)).into());
        }
        self.positions.insert(id, self.messages.len());
        self.messages.push(message);
        Ok(())
    }

    /// Append one question and its empty answer slot, assigning fresh
    /// sequential ids and a shared turn id. Returns the answer slot's id.
    pub fn append_turn(
        &mut self,
        question: impl Into<String>,
        answerer: Speaker,
    ) -> TalespinResult<MessageId> {
        let turn = self.next_turn;
        self.next_turn = turn.next();

        let question_id = self.allocate_id();
        self.append(Message::question(question_id, turn, question))?;

        let answer_id = self.allocate_id();
        self.append(Message::answer_slot(answer_id.clone(), turn, answerer))?;
        Ok(answer_id)
    }

    /// Set the text of an answer slot and mark it answered.
    ///
    /// Re-resolving an already answered slot overwrites its text; editing
    /// is an overwrite, not an error. Fails with
    /// [`TranscriptErrorKind::NotFound`] for an unknown id and
    /// [`TranscriptErrorKind::NotAnAnswer`] when the id names a question.
    pub fn resolve_answer(&mut self, id: &MessageId, text: impl Into<String>) -> TalespinResult<()> {
        let position = *self
            .positions
            .get(id.as_str())
            .ok_or_else(|| TranscriptError::new(TranscriptErrorKind::NotFound(id.as_str().to_string())))?;
        let message = &mut self.messages[position];
        if message.role == Role::Question {
            return Err(TranscriptError::new(TranscriptErrorKind::NotAnAnswer(
                id.as_str().to_string(),
            ))
            .into());
        }
        message.text = text.into();
        message.answered = true;
        Ok(())
    }

    /// Look up a message by id.
    pub fn get(&self, id: &MessageId) -> Option<&Message> {
        self.positions
            .get(id.as_str())
            .map(|&position| &self.messages[position])
    }

    /// The full ordered sequence, for rendering or persistence.
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    /// Question/answer pairs grouped by turn id, in turn order.
    pub fn turns(&self) -> Vec<TurnView> {
        let mut views: Vec<TurnView> = Vec::new();
        for message in &self.messages {
            match message.role {
                Role::Question => {
                    views.push(TurnView::new(message.clone(), None));
                }
                Role::Answer => {
                    if let Some(view) = views.iter_mut().find(|v| v.turn() == message.turn) {
                        view.answer = Some(message.clone());
                    }
                }
            }
        }
        views
    }

    fn allocate_id(&mut self) -> MessageId {
        self.next_id += 1;
        MessageId::new(self.next_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talespin_error::TalespinErrorKind;

    fn user() -> Speaker {
        Speaker::User("uid-1".to_string())
    }

    #[test]
    fn append_rejects_duplicate_ids() {
        let mut transcript = Transcript::new();
        let message = Message::question(MessageId::new("1"), TurnId::new(0), "Who?");
        transcript.append(message.clone()).unwrap();

        let err = transcript.append(message).unwrap_err();
        match err.kind() {
            TalespinErrorKind::Transcript(t) => {
                assert_eq!(t.kind, TranscriptErrorKind::DuplicateId("1".to_string()))
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[test]
    fn resolve_unknown_id_is_not_found() {
        let mut transcript = Transcript::new();
        let err = transcript
            .resolve_answer(&MessageId::new("9"), "text")
            .unwrap_err();
        match err.kind() {
            TalespinErrorKind::Transcript(t) => {
                assert_eq!(t.kind, TranscriptErrorKind::NotFound("9".to_string()))
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[test]
    fn resolve_on_question_is_rejected() {
        let mut transcript = Transcript::new();
        transcript.append_turn("Where?", user()).unwrap();

        let err = transcript
            .resolve_answer(&MessageId::new("1"), "nope")
            .unwrap_err();
        match err.kind() {
            TalespinErrorKind::Transcript(t) => {
                assert_eq!(t.kind, TranscriptErrorKind::NotAnAnswer("1".to_string()))
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[test]
    fn re_resolving_overwrites_text() {
        let mut transcript = Transcript::new();
        let answer_id = transcript.append_turn("Where?", user()).unwrap();

        transcript.resolve_answer(&answer_id, "A").unwrap();
        transcript.resolve_answer(&answer_id, "B").unwrap();

        let answer = transcript.get(&answer_id).unwrap();
        assert_eq!(answer.text, "B");
        assert!(answer.answered);
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn turns_pair_by_turn_id() {
        let mut transcript = Transcript::new();
        let first = transcript.append_turn("Who?", user()).unwrap();
        transcript.append_turn("Where?", user()).unwrap();
        transcript.resolve_answer(&first, "My sister").unwrap();

        let turns = transcript.turns();
        assert_eq!(turns.len(), 2);
        assert!(turns[0].is_complete());
        assert!(!turns[1].is_complete());
        assert_eq!(turns[0].question.text, "Who?");
        assert_eq!(turns[0].answer.as_ref().unwrap().text, "My sister");
    }

    #[test]
    fn ids_are_sequential_strings() {
        let mut transcript = Transcript::new();
        transcript.append_turn("Who?", user()).unwrap();
        let answer_id = transcript.append_turn("Where?", user()).unwrap();
        assert_eq!(answer_id.as_str(), "4");

        let snapshot = transcript.snapshot();
        assert_eq!(snapshot[0].id.as_str(), "1");
        assert_eq!(snapshot[2].id.as_str(), "3");
    }
}
