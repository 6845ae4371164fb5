use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a participant in a shared-expense group.
///
/// A participant is anyone who pays for an expense or shares in one:
/// a flatmate, a trip member, a colleague on a team lunch. The engine
/// treats the name as an opaque key; nodes in the debt graph are
/// created the first time a name is referenced by a record.
///
/// # Examples
///
/// ```
/// use tally_engine::core::participant::ParticipantId;
///
/// let fred = ParticipantId::new("Fred");
/// let thelma = ParticipantId::new("Thelma");
/// assert_ne!(fred, thelma);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create a new participant identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the string representation of this participant ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
