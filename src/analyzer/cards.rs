use futures::{stream, StreamExt};
use itertools::Itertools;

use crate::analyzer::battles::determine_result;
use crate::analyzer::models::*;
use crate::analyzer::AnalysisError;
use crate::clash_royale::{Battle, Player, RankedPlayer, Source};
use crate::prelude::*;

const LOCATION_ID: &str = "global";
const DECK_SIZE: f64 = 8.0;
const N_POPULAR_DECKS: usize = 10;
const N_CONCURRENT_REQUESTS: usize = 4;

/// Analyzes the cards played by the top players.
#[derive(Clone)]
pub struct CardAnalyzer {
    source: Arc<dyn Source>,
    n_players: usize,
}

impl CardAnalyzer {
    pub fn new(source: Arc<dyn Source>, n_players: usize) -> Self {
        Self { source, n_players }
    }

    #[instrument(level = "info", skip_all)]
    pub async fn get_card_usage(&self) -> Result<Vec<CardUsage>, AnalysisError> {
        let all_cards = self
            .retrieve_decks()
            .await?
            .into_iter()
            .flatten()
            .collect_vec();
        if all_cards.is_empty() {
            warn!("no card data collected");
            return Err(AnalysisError::NoCardData);
        }
        info!(n_cards = all_cards.len(), "collected the cards");

        let total_decks = all_cards.len() as f64 / DECK_SIZE;
        let usage = all_cards
            .into_iter()
            .counts()
            .into_iter()
            .map(|(name, count)| CardUsage {
                name,
                count,
                usage_rate: 100.0 * count as f64 / total_decks,
            })
            .sorted_by(|usage_1, usage_2| {
                usage_2
                    .usage_rate
                    .total_cmp(&usage_1.usage_rate)
                    .then_with(|| usage_1.name.cmp(&usage_2.name))
            })
            .collect_vec();
        info!(n_unique_cards = usage.len(), "analyzed");
        Ok(usage)
    }

    #[instrument(level = "info", skip_all)]
    pub async fn get_popular_decks(&self) -> Result<Vec<PopularDeck>, AnalysisError> {
        let decks = self
            .retrieve_decks()
            .await?
            .into_iter()
            .map(|mut deck| {
                deck.sort_unstable();
                deck
            })
            .collect_vec();
        if decks.is_empty() {
            warn!("no deck data collected");
            return Err(AnalysisError::NoDeckData);
        }

        let total_decks = decks.len() as f64;
        let popular_decks = decks
            .into_iter()
            .counts()
            .into_iter()
            .sorted_by(|(cards_1, count_1), (cards_2, count_2)| {
                count_2.cmp(count_1).then_with(|| cards_1.cmp(cards_2))
            })
            .take(N_POPULAR_DECKS)
            .map(|(cards, count)| PopularDeck {
                cards,
                count,
                usage_rate: 100.0 * count as f64 / total_decks,
            })
            .collect_vec();
        info!(n_decks = popular_decks.len(), "analyzed");
        Ok(popular_decks)
    }

    #[instrument(level = "info", skip_all)]
    pub async fn get_card_win_rates(&self) -> Result<Vec<CardWinRate>, AnalysisError> {
        let players = self.retrieve_top_players().await?;
        let battle_logs: Vec<Vec<Battle>> = stream::iter(players)
            .map(|player| async move {
                match self.source.get_player_battles(&player.tag).await {
                    Ok(battles) => battles,
                    Err(error) => {
                        warn!(%player.tag, "no battle log: {:#}", error);
                        Vec::new()
                    }
                }
            })
            .buffered(N_CONCURRENT_REQUESTS)
            .collect()
            .await;

        let mut wins = AHashMap::<String, usize>::default();
        let mut losses = AHashMap::<String, usize>::default();
        for battle in battle_logs.iter().flatten() {
            let (team, opponent) = match (battle.team.first(), battle.opponent.first()) {
                (Some(team), Some(opponent)) => (team, opponent),
                _ => continue,
            };
            let counter = match determine_result(team, opponent) {
                BattleResult::Victory => &mut wins,
                _ => &mut losses,
            };
            for card in &team.cards {
                let name = card.name.clone().unwrap_or_else(|| "Unknown".to_string());
                *counter.entry(name).or_default() += 1;
            }
        }
        if wins.is_empty() && losses.is_empty() {
            warn!("no battle data collected");
            return Err(AnalysisError::NoBattleDataCollected);
        }

        let win_rates = wins
            .keys()
            .chain(losses.keys())
            .unique()
            .map(|name| {
                let n_wins = wins.get(name).copied().unwrap_or_default();
                let total_games = n_wins + losses.get(name).copied().unwrap_or_default();
                CardWinRate {
                    name: name.clone(),
                    win_rate: 100.0 * n_wins as f64 / total_games as f64,
                    total_games,
                }
            })
            .sorted_by(|rate_1, rate_2| {
                rate_2
                    .win_rate
                    .total_cmp(&rate_1.win_rate)
                    .then_with(|| rate_1.name.cmp(&rate_2.name))
            })
            .collect_vec();
        info!(n_cards = win_rates.len(), "analyzed");
        Ok(win_rates)
    }

    async fn retrieve_top_players(&self) -> Result<Vec<RankedPlayer>, AnalysisError> {
        info!(n_players = self.n_players, "fetching the top players…");
        match self
            .source
            .get_top_players(LOCATION_ID, self.n_players)
            .await
        {
            Ok(rankings) if !rankings.items.is_empty() => {
                info!(n_players = rankings.items.len(), "found the top players");
                Ok(rankings.items)
            }
            Ok(_) => {
                warn!("no top player data available");
                Err(AnalysisError::NoTopPlayerData)
            }
            Err(error) => {
                warn!("failed to fetch the top players: {:#}", error);
                Err(AnalysisError::NoTopPlayerData)
            }
        }
    }

    /// Retrieves current decks of the top players as lists of card names.
    async fn retrieve_decks(&self) -> Result<Vec<Vec<String>>, AnalysisError> {
        let players = self.retrieve_top_players().await?;
        let decks: Vec<Vec<String>> = stream::iter(players)
            .map(|player| async move {
                let result = self.source.get_player(&player.tag).await;
                (player, result)
            })
            .buffered(N_CONCURRENT_REQUESTS)
            .filter_map(|(player, result)| async move {
                match result {
                    Ok(Player {
                        name,
                        current_deck: Some(deck),
                        ..
                    }) => {
                        debug!(%player.tag, name = name.as_str(), n_cards = deck.len(), "collected the deck");
                        Some(
                            deck.into_iter()
                                .map(|card| card.name.unwrap_or_else(|| "Unknown".to_string()))
                                .collect_vec(),
                        )
                    }
                    Ok(_) => {
                        warn!(%player.tag, "no deck data");
                        None
                    }
                    Err(error) => {
                        warn!(%player.tag, "no deck data: {:#}", error);
                        None
                    }
                }
            })
            .collect()
            .await;
        Ok(decks)
    }
}
