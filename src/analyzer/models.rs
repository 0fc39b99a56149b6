use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleResult {
    Victory,
    Defeat,
    Draw,
}

impl BattleResult {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Victory => "Victory",
            Self::Defeat => "Defeat",
            Self::Draw => "Draw",
        }
    }
}

/// Analyzed battle as it is returned by the API.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedBattle {
    pub battle_time: Option<String>,
    pub game_mode: String,
    pub arena: String,
    pub result: BattleResult,
    pub crowns_earned: i32,
    pub crowns_lost: i32,
    pub trophy_change: i32,
    pub player_deck: Vec<DeckCard>,
    pub opponent_deck: Vec<DeckCard>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeckCard {
    pub name: String,
    pub level: i32,
    pub max_level: i32,
    pub icon_url: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BattleStats {
    pub total_battles: usize,
    pub victories: usize,
    pub defeats: usize,
    pub draws: usize,
    pub win_rate: f64,
    pub average_crowns_earned: f64,
    pub average_crowns_lost: f64,
    pub total_trophy_change: i32,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CardUsageCount {
    pub name: String,
    pub usage_count: usize,
}

/// Card usage among the top players.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CardUsage {
    pub name: String,
    pub count: usize,
    pub usage_rate: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PopularDeck {
    pub cards: Vec<String>,
    pub count: usize,
    pub usage_rate: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CardWinRate {
    pub name: String,
    pub win_rate: f64,
    pub total_games: usize,
}
