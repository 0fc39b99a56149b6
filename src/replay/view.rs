use maud::{html, Markup};

use crate::replay::models::BattleRecord;

pub const LOADING_TEXT: &str = "Loading...";
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while fetching battle data.";

pub fn loading() -> Markup {
    html! { (LOADING_TEXT) }
}

pub fn error(message: &str) -> Markup {
    html! { p.error { (message) } }
}

pub fn generic_error() -> Markup {
    error(GENERIC_ERROR_MESSAGE)
}

/// Renders the whole list at once, headed «Battle 1» through «Battle N».
pub fn battle_analysis(battles: &[BattleRecord]) -> Markup {
    html! {
        h2 { "Battle Analysis" }
        @for (index, battle) in battles.iter().enumerate() {
            (battle_block(index + 1, battle))
        }
    }
}

fn battle_block(number: usize, battle: &BattleRecord) -> Markup {
    html! {
        div.battle {
            h3 { "Battle " (number) }
            p { "Time: " @if let Some(battle_time) = &battle.battle_time { (battle_time) } }
            p { "Game Mode: " (battle.game_mode) }
            p { "Arena: " (battle.arena) }
            p { "Result: " (battle.result) }
            p { "Crowns Earned: " (battle.crowns_earned) }
            p { "Crowns Lost: " (battle.crowns_lost) }
            p { "Trophy Change: " (battle.trophy_change) }
        }
    }
}
