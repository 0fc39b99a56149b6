use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::analyzer::models::AnalyzedBattle;

/// Body of `POST /api/battle_replay`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReplayRequest {
    pub player_tag: String,
}

/// Battle as the replay endpoint returns it. Any other fields are ignored.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BattleRecord {
    /// Raw timestamp string, displayed as is.
    pub battle_time: Option<String>,

    pub game_mode: String,
    pub arena: String,
    pub result: String,
    pub crowns_earned: i32,
    pub crowns_lost: i32,
    pub trophy_change: i32,
}

impl From<&AnalyzedBattle> for BattleRecord {
    fn from(battle: &AnalyzedBattle) -> Self {
        Self {
            battle_time: battle.battle_time.clone(),
            game_mode: battle.game_mode.clone(),
            arena: battle.arena.clone(),
            result: battle.result.as_str().to_string(),
            crowns_earned: battle.crowns_earned,
            crowns_lost: battle.crowns_lost,
            trophy_change: battle.trophy_change,
        }
    }
}

/// The endpoint answers with either an error object or a battle list.
///
/// Any object with an `error` field is an error, whatever the field holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePayload {
    Error { error: Value },
    Battles(Vec<BattleRecord>),
}

impl ResponsePayload {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: Value::String(message.into()),
        }
    }
}

impl<'de> Deserialize<'de> for ResponsePayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut value = Value::deserialize(deserializer)?;
        if let Some(error) = value.as_object_mut().and_then(|object| object.remove("error")) {
            return Ok(Self::Error { error });
        }
        Vec::<BattleRecord>::deserialize(value)
            .map(Self::Battles)
            .map_err(D::Error::custom)
    }
}

/// Text to show for an error field: strings as they are, anything else as JSON.
pub fn error_message(error: &Value) -> String {
    match error {
        Value::String(message) => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn serialize_request_ok() -> Result {
        let request = ReplayRequest {
            player_tag: " #9LRYU982G ".to_string(),
        };
        assert_eq!(serde_json::to_string(&request)?, r##"{"player_tag":" #9LRYU982G "}"##);
        Ok(())
    }

    #[test]
    fn from_analyzed_battle_ok() {
        let battle = AnalyzedBattle {
            battle_time: None,
            game_mode: "Ladder".to_string(),
            arena: "Arena 1".to_string(),
            result: crate::analyzer::models::BattleResult::Defeat,
            crowns_earned: 1,
            crowns_lost: 2,
            trophy_change: -29,
            player_deck: vec![],
            opponent_deck: vec![],
        };
        let record = BattleRecord::from(&battle);
        assert_eq!(record.battle_time, None);
        assert_eq!(record.result, "Defeat");
        assert_eq!(record.trophy_change, -29);
    }

    #[test]
    fn parse_error_ok() -> Result {
        let payload = serde_json::from_str::<ResponsePayload>(
            // language=JSON
            r#"{"error": "Player not found"}"#,
        )?;
        assert_eq!(payload, ResponsePayload::error("Player not found"));
        Ok(())
    }

    #[test]
    fn parse_non_string_error_ok() -> Result {
        let payload = serde_json::from_str::<ResponsePayload>(r#"{"error": 42}"#)?;
        match payload {
            ResponsePayload::Error { error } => assert_eq!(error_message(&error), "42"),
            ResponsePayload::Battles(_) => unreachable!(),
        }

        let payload = serde_json::from_str::<ResponsePayload>(
            // language=JSON
            r#"{"error": {"reason": "notFound"}, "status": 404}"#,
        )?;
        match payload {
            ResponsePayload::Error { error } => {
                assert_eq!(error_message(&error), r#"{"reason":"notFound"}"#)
            }
            ResponsePayload::Battles(_) => unreachable!(),
        }
        Ok(())
    }

    #[test]
    fn parse_single_battle_is_not_error_ok() -> Result {
        let payload = serde_json::from_str::<ResponsePayload>(
            // language=JSON
            r#"[{"gameMode":"Ladder","arena":"Arena 1","result":"Draw","crownsEarned":1,"crownsLost":1,"trophyChange":0}]"#,
        )?;
        assert!(matches!(payload, ResponsePayload::Battles(battles) if battles.len() == 1));
        Ok(())
    }

    #[test]
    fn parse_malformed_battles_fails() {
        assert!(serde_json::from_str::<ResponsePayload>(r#"[{"arena": 1}]"#).is_err());
        assert!(serde_json::from_str::<ResponsePayload>(r#""not a list""#).is_err());
    }

    #[test]
    fn parse_battles_ok() -> Result {
        let payload = serde_json::from_str::<ResponsePayload>(
            // language=JSON
            r#"[{"battleTime":"20240601T120000.000Z","gameMode":"Ladder","arena":"Legendary Arena","result":"Victory","crownsEarned":3,"crownsLost":1,"trophyChange":30,"playerDeck":[],"opponentDeck":[]}]"#,
        )?;
        match payload {
            ResponsePayload::Battles(battles) => {
                assert_eq!(battles.len(), 1);
                assert_eq!(battles[0].battle_time.as_deref(), Some("20240601T120000.000Z"));
                assert_eq!(battles[0].trophy_change, 30);
            }
            ResponsePayload::Error { .. } => unreachable!(),
        }
        Ok(())
    }

    #[test]
    fn parse_empty_battles_ok() -> Result {
        let payload = serde_json::from_str::<ResponsePayload>("[]")?;
        assert_eq!(payload, ResponsePayload::Battles(vec![]));
        Ok(())
    }

    #[test]
    fn parse_unexpected_object_fails() {
        assert!(serde_json::from_str::<ResponsePayload>(r#"{"status": "ok"}"#).is_err());
    }
}
