use std::net::IpAddr;
use std::str::FromStr;

use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, Tracing};
use poem::{get, post, Endpoint, EndpointExt, Route, Server};

use crate::analyzer::{BattleAnalyzer, CardAnalyzer};
use crate::clash_royale::{ClashRoyaleApi, Source};
use crate::opts::WebOpts;
use crate::prelude::*;
use crate::web::middleware::{ErrorMiddleware, SecurityHeadersMiddleware, SentryMiddleware};

mod middleware;
mod partials;
mod views;


/// Run the web app.
pub async fn run(opts: &WebOpts) -> Result {
    info!(host = opts.host.as_str(), port = opts.port, "starting up…");
    let source = Arc::new(ClashRoyaleApi::new(&opts.api)?);
    let app = create_app(source, opts.top_players);
    Server::new(TcpListener::bind((IpAddr::from_str(&opts.host)?, opts.port)))
        .run(app)
        .await?;
    Ok(())
}

pub fn create_app(source: Arc<dyn Source>, n_top_players: usize) -> impl Endpoint {
    Route::new()
        .at("/", get(views::index::get))
        .at("/health", get(views::api::get_health))
        .at("/battle_replay", get(views::battle_replay::get).post(views::battle_replay::post))
        .at(views::battle_replay::SCRIPT_PATH, get(views::battle_replay::get_script))
        .at("/card_usage", get(views::card_usage::get))
        .at("/api/battle_replay", post(views::api::post_battle_replay))
        .at("/api/battle_stats", post(views::api::post_battle_stats))
        .at("/api/most_used_cards", post(views::api::post_most_used_cards))
        .at("/api/card_usage", get(views::api::get_card_usage))
        .at("/api/popular_decks", get(views::api::get_popular_decks))
        .at("/api/card_win_rates", get(views::api::get_card_win_rates))
        .data(BattleAnalyzer::new(Arc::clone(&source)))
        .data(CardAnalyzer::new(source, n_top_players))
        .with(Tracing)
        .with(CatchPanic::new())
        .with(ErrorMiddleware)
        .with(SecurityHeadersMiddleware)
        .with(SentryMiddleware)
}
