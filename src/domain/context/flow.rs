//! Conversation flows.
//!
//! A flow partitions a user's conversations into separate tracks. It is not
//! a stored record of its own, only a key-space segment plus the per-user
//! active-flow pointer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The two conversation tracks a user can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Flow {
    /// General chat. Assumed when a user has no active-flow pointer.
    #[default]
    #[serde(rename = "normal")]
    Normal,

    /// Structured check-in, entered through check-in initiation.
    #[serde(rename = "check-in")]
    CheckIn,
}

impl Flow {
    /// Every flow, in the order aggregate queries report them.
    pub const ALL: [Flow; 2] = [Flow::Normal, Flow::CheckIn];

    /// Wire and key-space name of the flow.
    pub fn as_str(&self) -> &'static str {
        match self {
            Flow::Normal => "normal",
            Flow::CheckIn => "check-in",
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flow {
    type Err = ValidationError;

    /// Exact, case-sensitive match against the two wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Flow::Normal),
            "check-in" => Ok(Flow::CheckIn),
            other => Err(ValidationError::invalid_flow(other)),
        }
    }
}
