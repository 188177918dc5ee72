// ── Relation links ──
//
// A foreign key on the wire is one of: an expanded array of related
// records, a bare id, or a deferred reference object carrying `__id`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Link<T> {
    Expanded(Vec<T>),
    Id(u64),
    Deferred {
        #[serde(rename = "__id", default, skip_serializing_if = "Option::is_none")]
        id: Option<u64>,
    },
}

impl<T> Link<T> {
    /// The referenced id, when the link was not expanded.
    pub fn id(&self) -> Option<u64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Deferred { id } => *id,
            Self::Expanded(_) => None,
        }
    }

    /// Expanded records, if the query asked for them.
    pub fn expanded(&self) -> Option<&[T]> {
        match self {
            Self::Expanded(items) => Some(items),
            Self::Id(_) | Self::Deferred { .. } => None,
        }
    }

    /// First expanded record (belongs-to relations expand to one element).
    pub fn first(&self) -> Option<&T> {
        self.expanded().and_then(<[T]>::first)
    }
}

impl<T> Default for Link<T> {
    fn default() -> Self {
        Self::Deferred { id: None }
    }
}
