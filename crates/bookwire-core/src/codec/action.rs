use serde::{Deserialize, Serialize};

use super::layout;

/// Delta action carried by a map entry.
///
/// Unknown codes are preserved rather than rejected: the entry's key and
/// payload are still meaningful for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryAction {
    Add,
    Update,
    Delete,
    Unknown(u8),
}

impl EntryAction {
    pub fn classify(code: u8) -> Self {
        match code {
            layout::ACTION_ADD => Self::Add,
            layout::ACTION_UPDATE => Self::Update,
            layout::ACTION_DELETE => Self::Delete,
            other => Self::Unknown(other),
        }
    }

    /// Delete entries carry no field-list payload; everything else does.
    pub fn has_payload(self) -> bool {
        !matches!(self, Self::Delete)
    }
}

impl std::fmt::Display for EntryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "ADD"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
            Self::Unknown(code) => write!(f, "UNKNOWN({code})"),
        }
    }
}
