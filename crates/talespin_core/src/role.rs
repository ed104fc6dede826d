//! Role and speaker types for interview participants.

use serde::{Deserialize, Serialize};

/// The role a message plays in the interview.
///
/// A question is always authored by the assistant; an answer is always
/// authored by the end user. The two are mutually exclusive.
///
/// # Examples
///
/// ```
/// use talespin_core::Role;
///
/// assert_ne!(Role::Question, Role::Answer);
/// assert_eq!(format!("{}", Role::Question), "Question");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// A prompt presented to the user, scripted or generated
    Question,
    /// The user's reply slot for one question
    Answer,
}

/// The author of a message.
///
/// # Examples
///
/// ```
/// use talespin_core::Speaker;
///
/// let bot = Speaker::Bot;
/// let user = Speaker::User("uid-123".to_string());
/// assert_eq!(bot.tag(), "bot");
/// assert_eq!(user.tag(), "user");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speaker {
    /// The fixed assistant identity
    Bot,
    /// The end user, carrying their stable identity string
    User(String),
}

impl Speaker {
    /// The persisted speaker tag, matching the existing document readers.
    pub fn tag(&self) -> &'static str {
        match self {
            Speaker::Bot => "bot",
            Speaker::User(_) => "user",
        }
    }

    /// The stable identity string for this speaker.
    pub fn identity(&self) -> &str {
        match self {
            Speaker::Bot => "bot",
            Speaker::User(uid) => uid,
        }
    }
}
