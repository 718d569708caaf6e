use akamai_iam_client::{Client, RequestRunner, Response, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// The library client, tagged with the CLI user agent and with request and
/// response tracing.
pub struct WrappedClient {
    pub inner: Client,
}

fn user_agent() -> String {
    format!(
        "akamai-iam-cli-{}-{}-{}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH,
    )
}

#[async_trait]
impl RequestRunner for WrappedClient {
    fn make_url(&self, path: &str) -> Result<Url> {
        self.inner.make_url(path)
    }

    async fn run<T>(&self, method: http::Method, url: Url) -> Result<Response<T>>
    where
        T: DeserializeOwned + Send,
    {
        let request = self
            .inner
            .prepare_request(method, url)?
            .header(reqwest::header::USER_AGENT, user_agent());
        debug!(?request);
        let response = request.send().await?;
        debug!(?response);
        self.inner.process_response(response).await
    }
}
