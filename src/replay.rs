//! Battle replay form handler.
//!
//! Submits a player tag to the replay endpoint and renders the answer
//! into the display container.

use maud::Markup;

use crate::prelude::*;
use crate::replay::container::{DisplayContainer, Submission};
use crate::replay::models::{error_message, ReplayRequest, ResponsePayload};
use crate::replay::transport::{HttpTransport, Transport};

pub mod container;
pub mod models;
pub mod transport;
pub mod view;

/// Identifiers the hosting page must provide.
pub const FORM_ID: &str = "player-form";
pub const INPUT_ID: &str = "player-tag";
pub const CONTAINER_ID: &str = "battle-analysis";

/// Form field holding the player tag.
pub const INPUT_NAME: &str = "player_tag";

pub struct FormHandler {
    transport: Arc<dyn Transport>,
    container: DisplayContainer,
}

impl FormHandler {
    /// Initializes the handler against a dashboard at the base URL.
    pub fn initialize(base_url: &str) -> Result<Self> {
        let transport = HttpTransport::new(base_url).context("failed to initialize the form")?;
        info!(form_id = FORM_ID, container_id = CONTAINER_ID, "initialized");
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            container: DisplayContainer::default(),
        }
    }

    pub fn container(&self) -> &DisplayContainer {
        &self.container
    }

    /// Handles one submission and returns the markup it has rendered.
    ///
    /// The player tag is sent exactly as entered. The returned markup is what
    /// this submission produced, even when a newer submission has already
    /// taken over the container.
    #[instrument(level = "info", skip_all, fields(player_tag = player_tag))]
    pub async fn on_submit(&self, player_tag: &str) -> Markup {
        let submission = self.container.begin(view::loading()).await;
        debug!(?submission, "submitting the player tag…");

        let markup = match self.fetch(player_tag).await {
            Ok(ResponsePayload::Error { error }) => {
                let message = error_message(&error);
                info!(error = message.as_str(), "the server has reported an error");
                view::error(&message)
            }
            Ok(ResponsePayload::Battles(battles)) => {
                debug!(n_battles = battles.len(), "received the battles");
                view::battle_analysis(&battles)
            }
            Err(error) => {
                error!("failed to fetch the battles: {:#}", error);
                view::generic_error()
            }
        };

        self.settle(submission, markup).await
    }

    async fn fetch(&self, player_tag: &str) -> Result<ResponsePayload> {
        let request = ReplayRequest {
            player_tag: player_tag.to_string(),
        };
        self.transport.post_battle_replay(&request).await
    }

    async fn settle(&self, submission: Submission, markup: Markup) -> Markup {
        if !self.container.settle(submission, markup.clone()).await {
            info!(?submission, "a newer submission has started, discarding the response");
        }
        markup
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use tokio::sync::{oneshot, Mutex};

    use super::*;
    use crate::replay::models::BattleRecord;

    /// Answers with a prepared result and remembers the requests.
    struct FakeTransport {
        response: fn() -> Result<ResponsePayload>,
        requests: Mutex<Vec<ReplayRequest>>,
    }

    impl FakeTransport {
        fn new(response: fn() -> Result<ResponsePayload>) -> Arc<Self> {
            Arc::new(Self {
                response,
                requests: Mutex::default(),
            })
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn post_battle_replay(&self, request: &ReplayRequest) -> Result<ResponsePayload> {
            self.requests.lock().await.push(request.clone());
            (self.response)()
        }
    }

    fn battles() -> Result<ResponsePayload> {
        let battles = (1..=3)
            .map(|i| BattleRecord {
                battle_time: Some(format!("2024060{}T120000.000Z", i)),
                game_mode: "Ladder".to_string(),
                arena: format!("Arena {}", i),
                result: "Victory".to_string(),
                crowns_earned: i,
                crowns_lost: 0,
                trophy_change: 10 * i,
            })
            .collect();
        Ok(ResponsePayload::Battles(battles))
    }

    #[tokio::test]
    async fn renders_battles_ok() {
        let transport = FakeTransport::new(battles);
        let handler = FormHandler::with_transport(transport.clone());
        let markup = handler.on_submit("#9LRYU982G").await.into_string();

        assert_eq!(handler.container().contents().await, markup);
        assert!(markup.starts_with("<h2>Battle Analysis</h2>"));
        assert_eq!(markup.matches(r#"<div class="battle">"#).count(), 3);
        for i in 1..=3 {
            assert!(markup.contains(&format!("<h3>Battle {}</h3>", i)));
            assert!(markup.contains(&format!("<p>Arena: Arena {}</p>", i)));
            assert!(markup.contains(&format!("<p>Trophy Change: {}</p>", 10 * i)));
        }
        assert!(!markup.contains("Battle 4"));
    }

    #[tokio::test]
    async fn sends_player_tag_verbatim_ok() {
        let transport = FakeTransport::new(battles);
        let handler = FormHandler::with_transport(transport.clone());
        handler.on_submit("  #9LRYU982G ").await;
        assert_eq!(
            *transport.requests.lock().await,
            vec![ReplayRequest {
                player_tag: "  #9LRYU982G ".to_string(),
            }],
        );
    }

    #[tokio::test]
    async fn renders_server_error_ok() {
        let transport = FakeTransport::new(|| Ok(ResponsePayload::error("Player not found")));
        let handler = FormHandler::with_transport(transport);
        assert_eq!(
            handler.on_submit("#UNKNOWN").await.into_string(),
            r#"<p class="error">Player not found</p>"#,
        );
    }

    #[tokio::test]
    async fn renders_non_string_server_error_ok() {
        let transport = FakeTransport::new(|| {
            Ok(ResponsePayload::Error {
                error: serde_json::json!(42),
            })
        });
        let handler = FormHandler::with_transport(transport);
        assert_eq!(handler.on_submit("#9LRYU982G").await.into_string(), r#"<p class="error">42</p>"#);
    }

    #[tokio::test]
    async fn renders_generic_error_ok() {
        let transport = FakeTransport::new(|| Err(anyhow!("connection refused")));
        let handler = FormHandler::with_transport(transport);
        let markup = handler.on_submit("#9LRYU982G").await.into_string();
        assert_eq!(markup, r#"<p class="error">An error occurred while fetching battle data.</p>"#);
        assert!(!markup.contains("connection refused"));
    }

    #[tokio::test]
    async fn renders_empty_battles_ok() {
        let transport = FakeTransport::new(|| Ok(ResponsePayload::Battles(vec![])));
        let handler = FormHandler::with_transport(transport);
        assert_eq!(handler.on_submit("#9LRYU982G").await.into_string(), "<h2>Battle Analysis</h2>");
    }

    #[tokio::test]
    async fn remains_usable_after_error_ok() {
        let transport = FakeTransport::new(|| Err(anyhow!("connection reset")));
        let handler = FormHandler::with_transport(transport.clone());
        handler.on_submit("#A").await;
        handler.on_submit("#B").await;
        assert_eq!(transport.requests.lock().await.len(), 2);
    }

    /// Holds the answer to the «first» player tag until released.
    struct SlowTransport {
        release: Mutex<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl Transport for SlowTransport {
        async fn post_battle_replay(&self, request: &ReplayRequest) -> Result<ResponsePayload> {
            if request.player_tag == "first" {
                let release = self.release.lock().await.take();
                release.ok_or_else(|| anyhow!("already released"))?.await?;
            }
            Ok(ResponsePayload::error(request.player_tag.as_str()))
        }
    }

    #[tokio::test]
    async fn stale_response_is_discarded() {
        let (sender, receiver) = oneshot::channel();
        let handler = Arc::new(FormHandler::with_transport(Arc::new(SlowTransport {
            release: Mutex::new(Some(receiver)),
        })));

        let first = tokio::spawn({
            let handler = Arc::clone(&handler);
            async move { handler.on_submit("first").await.into_string() }
        });
        // Wait for the first submission to show the loading indicator.
        while handler.container().contents().await.is_empty() {
            tokio::task::yield_now().await;
        }
        assert_eq!(handler.container().contents().await, "Loading...");

        handler.on_submit("second").await;
        sender.send(()).unwrap();
        assert_eq!(first.await.unwrap(), r#"<p class="error">first</p>"#);
        assert_eq!(handler.container().contents().await, r#"<p class="error">second</p>"#);
    }

    #[test]
    fn initialize_with_invalid_url_fails() {
        assert!(FormHandler::initialize("localhost without scheme").is_err());
    }
}
