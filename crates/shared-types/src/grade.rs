//! Security grade lattice
//!
//! Three classification levels form a strict total order:
//! `Open < Sensitive < Classified`. Zones and systems carry a grade as a
//! container clearance, data carries one as a content classification.

use serde::{Deserialize, Serialize};

/// Security classification level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Grade {
    #[default]
    Open,
    Sensitive,
    Classified,
}

impl Grade {
    /// Position in the lattice (Open = 0, Classified = 2)
    pub const fn rank(self) -> u8 {
        match self {
            Grade::Open => 0,
            Grade::Sensitive => 1,
            Grade::Classified => 2,
        }
    }

    /// Strict ordering used by every "grade is insufficient" check
    pub const fn less_than(self, other: Grade) -> bool {
        self.rank() < other.rank()
    }

    /// True for grades that require protective controls (Sensitive and above)
    pub const fn is_protected(self) -> bool {
        !self.less_than(Grade::Sensitive)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Open => "Open",
            Grade::Sensitive => "Sensitive",
            Grade::Classified => "Classified",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
