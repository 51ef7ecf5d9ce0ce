use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a team inside the [`TeamRegistry`](crate::registry::TeamRegistry).
///
/// Ids are dense (`0..team_count`) and only meaningful for the registry that
/// issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub usize);

impl TeamId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team({})", self.0)
    }
}
