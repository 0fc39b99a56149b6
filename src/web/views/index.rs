use maud::{html, DOCTYPE};
use poem::web::Html;
use poem::{handler, IntoResponse};

use crate::prelude::*;
use crate::web::partials::{footer, headers};

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get() -> Result<impl IntoResponse> {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (headers())
                title { "Clash Dashboard" }
            }
            body {
                section.hero.is-fullheight-with-navbar {
                    div.hero-body {
                        div.container {
                            h1.title { "Clash Dashboard" }
                            h2.subtitle { "Clash Royale battle replays and card statistics" }
                            div.buttons {
                                a.button.is-link href="/battle_replay" {
                                    span.icon { i.fas.fa-history {} }
                                    span { "Battle Replay" }
                                }
                                a.button.is-info href="/card_usage" {
                                    span.icon { i.fas.fa-layer-group {} }
                                    span { "Card Usage" }
                                }
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

#[cfg(test)]
mod tests {
    use crate::analyzer::tests::FakeSource;
    use crate::prelude::*;
    use crate::web::test::create_standalone_test_client;

    #[tokio::test]
    async fn get_index_ok() -> Result {
        let client = create_standalone_test_client(FakeSource::default());
        let response = client.get("/").send().await;
        response.assert_status_is_ok();
        response.assert_header("x-frame-options", "deny");
        let body = response.0.into_body().into_string().await?;
        assert!(body.contains(r#"href="/battle_replay""#));
        Ok(())
    }
}
