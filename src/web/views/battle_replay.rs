use async_trait::async_trait;
use maud::{html, Markup, DOCTYPE};
use poem::web::{Data, Form, Html};
use poem::{handler, IntoResponse};
use serde::Deserialize;

use crate::analyzer::BattleAnalyzer;
use crate::prelude::*;
use crate::replay::models::{BattleRecord, ReplayRequest, ResponsePayload};
use crate::replay::transport::Transport;
use crate::replay::{FormHandler, CONTAINER_ID, FORM_ID, INPUT_ID, INPUT_NAME};
use crate::web::partials::{footer, headers, home_button};

pub const SCRIPT_PATH: &str = "/static/battle_replay.js";

#[derive(Deserialize)]
pub struct ReplayForm {
    pub player_tag: String,
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get() -> Result<impl IntoResponse> {
    Ok(Html(page("", None).into_string()))
}

/// Submits the form without leaving the page.
#[handler]
pub async fn get_script() -> impl IntoResponse {
    include_str!("../static/battle_replay.js").with_content_type("application/javascript")
}

/// Renders the same page with the analysis when the script is not running.
#[handler]
#[instrument(skip_all, level = "info")]
pub async fn post(
    Form(form): Form<ReplayForm>,
    analyzer: Data<&BattleAnalyzer>,
) -> Result<impl IntoResponse> {
    let transport = LocalTransport {
        analyzer: analyzer.0.clone(),
    };
    let analysis = FormHandler::with_transport(Arc::new(transport))
        .on_submit(&form.player_tag)
        .await;
    Ok(Html(page(&form.player_tag, Some(analysis)).into_string()))
}

/// Delivers replay requests straight to the analyzer, bypassing the network.
struct LocalTransport {
    analyzer: BattleAnalyzer,
}

#[async_trait]
impl Transport for LocalTransport {
    async fn post_battle_replay(&self, request: &ReplayRequest) -> Result<ResponsePayload> {
        let payload = match self.analyzer.analyze_recent_battles(&request.player_tag).await {
            Ok(battles) => ResponsePayload::Battles(battles.iter().map(BattleRecord::from).collect()),
            Err(error) => ResponsePayload::error(error.to_string()),
        };
        Ok(payload)
    }
}

fn page(player_tag: &str, analysis: Option<Markup>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (headers())
                title { "Battle Replay – Clash Dashboard" }
            }
            body {
                nav.navbar.has-shadow role="navigation" aria-label="main navigation" {
                    div.navbar-brand {
                        (home_button())
                    }
                }

                section.section {
                    div.container {
                        h1.title { "Battle Replay" }
                        form.block id=(FORM_ID) method="POST" action="/battle_replay" {
                            div.field.has-addons {
                                div.control.is-expanded {
                                    input.input
                                        type="text"
                                        id=(INPUT_ID)
                                        name=(INPUT_NAME)
                                        value=(player_tag)
                                        placeholder="#9LRYU982G"
                                        autocomplete="off"
                                        spellcheck="false"
                                        required;
                                }
                                div.control {
                                    button.button.is-link type="submit" { "Analyze" }
                                }
                            }
                        }
                        div.box.content id=(CONTAINER_ID) {
                            @if let Some(analysis) = analysis {
                                (analysis)
                            }
                        }
                    }
                }

                (footer())
                script src=(SCRIPT_PATH) defer {}
            }
        }
    }
}
