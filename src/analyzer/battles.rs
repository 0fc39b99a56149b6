use itertools::Itertools;

use crate::analyzer::models::*;
use crate::analyzer::AnalysisError;
use crate::clash_royale::{self, Participant, Source};
use crate::prelude::*;

const UNKNOWN: &str = "Unknown";

#[derive(Clone)]
pub struct BattleAnalyzer {
    source: Arc<dyn Source>,
}

impl BattleAnalyzer {
    pub fn new(source: Arc<dyn Source>) -> Self {
        Self { source }
    }

    /// Analyzes the player's battle log, preserving its order.
    #[instrument(level = "info", skip_all, fields(player_tag = player_tag))]
    pub async fn analyze_recent_battles(
        &self,
        player_tag: &str,
    ) -> Result<Vec<AnalyzedBattle>, AnalysisError> {
        let battles = match self.source.get_player_battles(player_tag).await {
            Ok(battles) => battles,
            Err(error) => {
                warn!("failed to retrieve the battle log: {:#}", error);
                return Err(AnalysisError::NoBattleData);
            }
        };
        if battles.is_empty() {
            return Err(AnalysisError::NoBattleData);
        }
        let battles = battles.iter().map(analyze_battle).collect_vec();
        debug!(n_battles = battles.len());
        Ok(battles)
    }

    pub async fn get_battle_stats(&self, player_tag: &str) -> Result<BattleStats, AnalysisError> {
        Ok(summarize(&self.analyze_recent_battles(player_tag).await?))
    }

    pub async fn get_most_used_cards(
        &self,
        player_tag: &str,
        top_n: usize,
    ) -> Result<Vec<CardUsageCount>, AnalysisError> {
        Ok(most_used_cards(&self.analyze_recent_battles(player_tag).await?, top_n))
    }
}

fn analyze_battle(battle: &clash_royale::Battle) -> AnalyzedBattle {
    let default = Participant::default();
    let team = battle.team.first().unwrap_or(&default);
    let opponent = battle.opponent.first().unwrap_or(&default);

    AnalyzedBattle {
        battle_time: battle.battle_time.clone(),
        game_mode: battle
            .game_mode
            .as_ref()
            .and_then(|game_mode| game_mode.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        arena: battle
            .arena
            .as_ref()
            .and_then(|arena| arena.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        result: determine_result(team, opponent),
        crowns_earned: team.crowns,
        crowns_lost: opponent.crowns,
        trophy_change: team.trophy_change,
        player_deck: deck(&team.cards),
        opponent_deck: deck(&opponent.cards),
    }
}

pub(crate) fn determine_result(team: &Participant, opponent: &Participant) -> BattleResult {
    if team.crowns > opponent.crowns {
        BattleResult::Victory
    } else if team.crowns < opponent.crowns {
        BattleResult::Defeat
    } else {
        BattleResult::Draw
    }
}

fn deck(cards: &[clash_royale::Card]) -> Vec<DeckCard> {
    cards
        .iter()
        .map(|card| DeckCard {
            name: card.name.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            level: card.level,
            max_level: card.max_level,
            icon_url: card.icon_urls.medium.clone().unwrap_or_default(),
        })
        .collect()
}

fn summarize(battles: &[AnalyzedBattle]) -> BattleStats {
    let total_battles = battles.len();
    let count = |result: BattleResult| battles.iter().filter(|battle| battle.result == result).count();
    let victories = count(BattleResult::Victory);
    let defeats = count(BattleResult::Defeat);
    let average = |sum: i32| {
        if total_battles != 0 {
            sum as f64 / total_battles as f64
        } else {
            0.0
        }
    };

    BattleStats {
        total_battles,
        victories,
        defeats,
        draws: total_battles - victories - defeats,
        win_rate: 100.0 * average(victories as i32),
        average_crowns_earned: average(battles.iter().map(|battle| battle.crowns_earned).sum()),
        average_crowns_lost: average(battles.iter().map(|battle| battle.crowns_lost).sum()),
        total_trophy_change: battles.iter().map(|battle| battle.trophy_change).sum(),
    }
}

fn most_used_cards(battles: &[AnalyzedBattle], top_n: usize) -> Vec<CardUsageCount> {
    battles
        .iter()
        .flat_map(|battle| battle.player_deck.iter())
        .map(|card| card.name.as_str())
        .counts()
        .into_iter()
        // Ties keep the name order so that the result is stable.
        .sorted_by(|(name_1, count_1), (name_2, count_2)| {
            count_2.cmp(count_1).then_with(|| name_1.cmp(name_2))
        })
        .take(top_n)
        .map(|(name, usage_count)| CardUsageCount {
            name: name.to_string(),
            usage_count,
        })
        .collect()
}
