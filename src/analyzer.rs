use std::fmt::{Display, Formatter};

pub mod battles;
pub mod cards;
pub mod models;

pub use self::battles::BattleAnalyzer;
pub use self::cards::CardAnalyzer;

/// Known outcomes when there is nothing to analyze.
///
/// The `Display` implementation is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisError {
    NoBattleData,
    NoTopPlayerData,
    NoCardData,
    NoDeckData,
    NoBattleDataCollected,
}

impl Display for AnalysisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NoBattleData => "No battle data available",
            Self::NoTopPlayerData => "No top player data available",
            Self::NoCardData => "No card data collected",
            Self::NoDeckData => "No deck data collected",
            Self::NoBattleDataCollected => "No battle data collected",
        })
    }
}

impl std::error::Error for AnalysisError {}
