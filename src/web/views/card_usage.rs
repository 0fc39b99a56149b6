use maud::{html, Markup, DOCTYPE};
use poem::web::{Data, Html};
use poem::{handler, IntoResponse};

use crate::analyzer::models::CardUsage;
use crate::analyzer::CardAnalyzer;
use crate::prelude::*;
use crate::web::partials::{footer, headers, home_button, Float};

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get(analyzer: Data<&CardAnalyzer>) -> Result<impl IntoResponse> {
    let usage = analyzer.get_card_usage().await;
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (headers())
                title { "Card Usage – Clash Dashboard" }
            }
            body {
                nav.navbar.has-shadow role="navigation" aria-label="main navigation" {
                    div.navbar-brand {
                        (home_button())
                    }
                }

                section.section {
                    div.container {
                        h1.title { "Card Usage Among Top Players" }
                        div.box {
                            @match &usage {
                                Ok(usage) => { (usage_table(usage)) }
                                Err(error) => { p.error { (error.to_string()) } }
                            }
                        }
                    }
                }

                (footer())
            }
        }
    };
    Ok(Html(markup.into_string()))
}

fn usage_table(usage: &[CardUsage]) -> Markup {
    html! {
        div.table-container {
            table.table.is-hoverable.is-striped.is-fullwidth {
                thead {
                    tr {
                        th { "Card" }
                        th.has-text-right { "Count" }
                        th.has-text-right { "Usage Rate" }
                    }
                }
                tbody {
                    @for card in usage {
                        tr {
                            td { (card.name) }
                            td.has-text-right { (card.count) }
                            td.has-text-right { (Float::from(card.usage_rate).precision(1)) "%" }
                        }
                    }
                }
            }
        }
    }
}
