use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// What an analyst did about a deal; recorded in the action log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealActionType {
    Contacted,
    Watchlist,
    Meeting,
    Note,
    Skip,
    Pass,
}

impl DealActionType {
    pub const ALL: [DealActionType; 6] = [
        DealActionType::Contacted,
        DealActionType::Watchlist,
        DealActionType::Meeting,
        DealActionType::Note,
        DealActionType::Skip,
        DealActionType::Pass,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DealActionType::Contacted => "contacted",
            DealActionType::Watchlist => "watchlist",
            DealActionType::Meeting => "meeting",
            DealActionType::Note => "note",
            DealActionType::Skip => "skip",
            DealActionType::Pass => "pass",
        }
    }
}

impl std::fmt::Display for DealActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DealActionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DealActionType::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| CoreError::InvalidActionType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_action_type() {
        for action in DealActionType::ALL {
            assert_eq!(action.as_str().parse::<DealActionType>(), Ok(action));
        }
    }

    #[test]
    fn rejects_unknown_action_type() {
        assert_eq!(
            "archive".parse::<DealActionType>(),
            Err(CoreError::InvalidActionType("archive".to_string()))
        );
    }
}
