use async_trait::async_trait;
use clap::{crate_name, crate_version};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::header;
use serde::de::DeserializeOwned;

use crate::opts::ApiOpts;
use crate::prelude::*;

pub mod models;

pub use self::models::*;

/// Source of raw Clash Royale data the analyzers work with.
#[async_trait]
pub trait Source: Send + Sync {
    async fn get_player(&self, player_tag: &str) -> Result<Player>;

    async fn get_player_battles(&self, player_tag: &str) -> Result<Vec<Battle>>;

    async fn get_top_players(&self, location_id: &str, limit: usize) -> Result<PlayerRankings>;
}

#[derive(Clone)]
pub struct ClashRoyaleApi {
    client: reqwest::Client,
    base_url: Arc<String>,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl ClashRoyaleApi {
    pub fn new(opts: &ApiOpts) -> Result<Self> {
        let api_key = opts.key.trim();
        info!(api_key = %crate::tracing::mask_secret(api_key), "initialising the API client");

        let mut headers = header::HeaderMap::new();
        let mut authorization = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
            .context("the API key is not a valid header value")?;
        authorization.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, authorization);
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .user_agent(concat!(crate_name!(), "/", crate_version!()))
            .timeout(opts.request_timeout)
            .connect_timeout(opts.request_timeout)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .context("failed to build the API client")?;

        Ok(Self {
            client,
            base_url: Arc::new(opts.base_url.trim_end_matches('/').to_string()),
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(opts.rate_limit))),
        })
    }

    #[instrument(level = "debug", skip_all, fields(endpoint = endpoint))]
    async fn call<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.limiter.until_ready().await;

        let start_instant = Instant::now();
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(url = url.as_str(), "sending the request…");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("failed to call `{}`", endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, body = body.as_str(), "the API request has failed");
            bail!("`{}` has responded with {}", endpoint, status);
        }
        let data = response
            .json::<T>()
            .await
            .with_context(|| format!("failed to parse the `{}` response", endpoint))?;
        debug!(%status, elapsed = %crate::tracing::format_elapsed(start_instant), "done");
        Ok(data)
    }
}

#[async_trait]
impl Source for ClashRoyaleApi {
    #[instrument(level = "info", skip_all, fields(player_tag = player_tag))]
    async fn get_player(&self, player_tag: &str) -> Result<Player> {
        self.call(&format!("/players/{}", urlencoding::encode(player_tag)))
            .await
    }

    #[instrument(level = "info", skip_all, fields(player_tag = player_tag))]
    async fn get_player_battles(&self, player_tag: &str) -> Result<Vec<Battle>> {
        self.call(&format!("/players/{}/battlelog", urlencoding::encode(player_tag)))
            .await
    }

    #[instrument(level = "info", skip_all, fields(location_id = location_id, limit = limit))]
    async fn get_top_players(&self, location_id: &str, limit: usize) -> Result<PlayerRankings> {
        self.call(&format!(
            "/locations/{}/rankings/players?limit={}",
            urlencoding::encode(location_id),
            limit,
        ))
        .await
    }
}
