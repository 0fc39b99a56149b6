//! Clash Royale API models.
//!
//! Only the fields the analyzers need are declared; everything else is ignored.

use serde::Deserialize;

/// Entry of `/players/{tag}/battlelog`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Battle {
    pub battle_time: Option<String>,
    pub game_mode: Option<GameMode>,
    pub arena: Option<Arena>,
    pub team: Vec<Participant>,
    pub opponent: Vec<Participant>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct GameMode {
    pub name: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Arena {
    pub name: Option<String>,
}

/// One side of a battle.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Participant {
    pub crowns: i32,
    pub trophy_change: i32,
    pub cards: Vec<Card>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Card {
    pub name: Option<String>,
    pub level: i32,
    pub max_level: i32,
    pub icon_urls: IconUrls,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct IconUrls {
    pub medium: Option<String>,
}

/// `/players/{tag}`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub tag: String,
    pub name: String,

    #[serde(default)]
    pub current_deck: Option<Vec<Card>>,
}

/// `/locations/{id}/rankings/players`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct PlayerRankings {
    #[serde(default)]
    pub items: Vec<RankedPlayer>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RankedPlayer {
    pub tag: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn parse_battle_ok() -> Result {
        let battle = serde_json::from_str::<Battle>(
            // language=JSON
            r##"{"type":"PvP","battleTime":"20240601T120000.000Z","arena":{"id":54000012,"name":"Legendary Arena"},"gameMode":{"id":72000006,"name":"Ladder"},"team":[{"tag":"#9LRYU982G","crowns":3,"trophyChange":30,"cards":[{"name":"Knight","id":26000000,"level":14,"maxLevel":14,"iconUrls":{"medium":"https://example.com/knight.png"}}]}],"opponent":[{"tag":"#ABC","crowns":1,"cards":[]}]}"##,
        )?;
        assert_eq!(battle.battle_time.as_deref(), Some("20240601T120000.000Z"));
        assert_eq!(battle.arena.and_then(|arena| arena.name).as_deref(), Some("Legendary Arena"));
        assert_eq!(battle.team[0].crowns, 3);
        assert_eq!(battle.team[0].trophy_change, 30);
        assert_eq!(battle.team[0].cards[0].max_level, 14);
        assert_eq!(battle.opponent[0].trophy_change, 0);
        Ok(())
    }

    #[test]
    fn parse_sparse_battle_ok() -> Result {
        let battle = serde_json::from_str::<Battle>("{}")?;
        assert_eq!(battle, Battle::default());
        Ok(())
    }

    #[test]
    fn parse_player_without_deck_ok() -> Result {
        let player = serde_json::from_str::<Player>(r##"{"tag":"#9LRYU982G","name":"eigenein"}"##)?;
        assert!(player.current_deck.is_none());
        Ok(())
    }
}
