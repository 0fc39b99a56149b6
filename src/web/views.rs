pub mod api;
pub mod battle_replay;
pub mod card_usage;
pub mod index;
