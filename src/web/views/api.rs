use poem::http::StatusCode;
use poem::web::{Data, Json};
use poem::{handler, IntoResponse, Response};
use serde::Serialize;

use crate::analyzer::{AnalysisError, BattleAnalyzer, CardAnalyzer};
use crate::prelude::*;
use crate::replay::models::ReplayRequest;

const CACHE_CONTROL: &str = "no-cache";
const N_MOST_USED_CARDS: usize = 8;

/// JSON body of every API error.
#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<AnalysisError> for ErrorResponse {
    fn from(error: AnalysisError) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get_health() -> Result<impl IntoResponse> {
    Ok(Response::from(StatusCode::NO_CONTENT).with_header("Cache-Control", CACHE_CONTROL))
}

/// Missing battle data is a regular answer here, hence `200 OK` in both cases.
#[handler]
#[instrument(skip_all, level = "info")]
pub async fn post_battle_replay(
    Json(request): Json<ReplayRequest>,
    analyzer: Data<&BattleAnalyzer>,
) -> Result<Response> {
    info!(player_tag = request.player_tag.as_str(), "received the request");
    let response = match analyzer.analyze_recent_battles(&request.player_tag).await {
        Ok(battles) => {
            info!(n_battles = battles.len(), "analyzed");
            Json(battles).into_response()
        }
        Err(error) => Json(ErrorResponse::from(error)).into_response(),
    };
    Ok(response)
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn post_battle_stats(
    Json(request): Json<ReplayRequest>,
    analyzer: Data<&BattleAnalyzer>,
) -> Result<Response> {
    Ok(into_response(analyzer.get_battle_stats(&request.player_tag).await))
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn post_most_used_cards(
    Json(request): Json<ReplayRequest>,
    analyzer: Data<&BattleAnalyzer>,
) -> Result<Response> {
    Ok(into_response(
        analyzer
            .get_most_used_cards(&request.player_tag, N_MOST_USED_CARDS)
            .await,
    ))
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get_card_usage(analyzer: Data<&CardAnalyzer>) -> Result<Response> {
    Ok(into_response(analyzer.get_card_usage().await))
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get_popular_decks(analyzer: Data<&CardAnalyzer>) -> Result<Response> {
    Ok(into_response(analyzer.get_popular_decks().await))
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get_card_win_rates(analyzer: Data<&CardAnalyzer>) -> Result<Response> {
    Ok(into_response(analyzer.get_card_win_rates().await))
}

/// Missing data is `404 Not Found` with the error message.
fn into_response<T: Serialize + Send>(result: Result<T, AnalysisError>) -> Response {
    match result {
        Ok(data) => Json(data).into_response(),
        Err(error) => Json(ErrorResponse::from(error))
            .with_status(StatusCode::NOT_FOUND)
            .into_response(),
    }
}
