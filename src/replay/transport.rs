use async_trait::async_trait;
use clap::{crate_name, crate_version};
use reqwest::Url;

use crate::prelude::*;
use crate::replay::models::{ReplayRequest, ResponsePayload};

pub const ENDPOINT_PATH: &str = "/api/battle_replay";

/// Carries a replay request to the endpoint and brings the parsed response back.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_battle_replay(&self, request: &ReplayRequest) -> Result<ResponsePayload>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        let endpoint_url = Url::parse(base_url)
            .with_context(|| format!("`{}` is not a valid base URL", base_url))?
            .join(ENDPOINT_PATH)?;
        let client = reqwest::ClientBuilder::new()
            .user_agent(concat!(crate_name!(), "/", crate_version!()))
            .build()
            .context("failed to build the HTTP client")?;
        Ok(Self { client, endpoint_url })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_battle_replay(&self, request: &ReplayRequest) -> Result<ResponsePayload> {
        let response = self
            .client
            .post(self.endpoint_url.clone())
            .json(request)
            .send()
            .await
            .context("the request has failed")?;
        // The status is only informative: error responses carry a JSON body too.
        debug!(status = %response.status(), "received the response");
        let payload = response
            .json::<ResponsePayload>()
            .await
            .context("could not parse the response")?;
        Ok(payload)
    }
}
