use serde::Serialize;

/// Distinguishes regular entries from the summary rows produced by a squish.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Normal,
    Squished,
}

impl EntryKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EntryKind::Normal => "normal",
            EntryKind::Squished => "squished",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(EntryKind::Normal),
            "squished" => Some(EntryKind::Squished),
            _ => None,
        }
    }

    pub fn is_squished(&self) -> bool {
        matches!(self, EntryKind::Squished)
    }
}
