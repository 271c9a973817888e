use chrono::{DateTime, Utc};

/// Soft-delete status shared by users and items. `Discarded` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Active,
    Discarded {
        at: DateTime<Utc>,
    },
}

impl Lifecycle {
    pub fn from_discarded_at(discarded_at: Option<DateTime<Utc>>) -> Self {
        match discarded_at {
            Some(at) => Self::Discarded { at },
            None => Self::Active,
        }
    }

    pub fn discarded_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Active => None,
            Self::Discarded { at } => Some(*at),
        }
    }

    pub fn is_discarded(&self) -> bool {
        matches!(self, Self::Discarded { .. })
    }

    /// Discarding twice keeps the first timestamp.
    pub fn discard(self, at: DateTime<Utc>) -> Self {
        match self {
            Self::Active => Self::Discarded { at },
            discarded => discarded,
        }
    }
}
