use async_trait::async_trait;
use http::Method;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::edgegrid::EdgeGridAuth;
use crate::edgerc::Credentials;
use crate::{Error, Response, Result};

/// Everything an API operation needs from a transport: a way to turn a path
/// into a full URL on the configured host, and a way to execute a request.
#[async_trait]
pub trait RequestRunner: Send + Sync {
    fn make_url(&self, path: &str) -> Result<Url>;

    async fn run<T>(&self, method: Method, url: Url) -> Result<Response<T>>
    where
        T: DeserializeOwned + Send;
}

/// An asynchronous client for the identity management API.
///
/// Every request is signed with EdgeGrid. To configure a client, use
/// [`Client::builder()`] or [`ClientBuilder::new()`].
#[derive(Clone)]
pub struct Client {
    http_client: reqwest::Client,
    config: ClientConfig,
}

/// A `ClientBuilder` is what should be used to construct a `Client` with custom
/// configuration. Both the API host and the EdgeGrid credentials are
/// required; [`ClientBuilder::credentials`] sets both from an `.edgerc`
/// section.
#[must_use]
#[derive(Default, Clone)]
pub struct ClientBuilder {
    config: Config,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// The API host, e.g. `akab-xxxx.luna.akamaiapis.net`. Requests are
    /// always sent over https.
    pub fn host<T: AsRef<str>>(mut self, host: T) -> Result<Self> {
        let base_url = format!("https://{}", host.as_ref());
        // Validate early, make_url relies on this being parseable.
        Url::parse(&base_url)?;
        self.config.base_url = Some(base_url);
        Ok(self)
    }

    pub fn auth(mut self, auth: EdgeGridAuth) -> Self {
        self.config.auth = Some(auth);
        self
    }

    pub fn credentials(self, credentials: &Credentials) -> Result<Self> {
        Ok(self
            .host(credentials.host())?
            .auth(EdgeGridAuth::from_credentials(credentials)))
    }

    /// Use a pre-configured [`reqwest::Client`] instance instead of creating
    /// our own. This allows customising TLS, timeout, and other low-level http
    /// client configuration options.
    pub fn reqwest_client(mut self, c: reqwest::Client) -> Self {
        self.config.reqwest_client = Some(c);
        self
    }

    pub fn build(self) -> Result<Client> {
        let http_client = match self.config.reqwest_client {
            | Some(c) => c,
            | None => {
                reqwest::ClientBuilder::new()
                    .redirect(reqwest::redirect::Policy::none())
                    .build()?
            }
        };

        Ok(Client {
            http_client,
            config: ClientConfig {
                base_url: self.config.base_url.ok_or(Error::HostRequired)?,
                auth: self.config.auth.ok_or(Error::CredentialsRequired)?,
            },
        })
    }
}

impl Client {
    /// Creates a `ClientBuilder` to configure a `Client`.
    ///
    /// This is the same as `ClientBuilder::new()`.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Builds a signed request. The signature covers the method, host, path
    /// and query of `url`, so the url must not change after this point.
    pub fn prepare_request(
        &self,
        method: Method,
        url: Url,
    ) -> Result<RequestBuilder> {
        debug!("Preparing a request '{} {}'", method, url);
        let mut authorization =
            HeaderValue::from_str(&self.config.auth.authorization(&method, &url))?;
        authorization.set_sensitive(true);
        Ok(self
            .http_client
            .request(method, url)
            .header(AUTHORIZATION, authorization))
    }

    pub async fn process_response<T>(
        &self,
        response: reqwest::Response,
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned + Send,
    {
        Response::from_raw_response(response).await
    }
}

#[async_trait]
impl RequestRunner for Client {
    fn make_url(&self, path: &str) -> Result<Url> {
        // Path segments are embedded as given, no re-escaping.
        Ok(Url::parse(&format!("{}{}", self.config.base_url, path))?)
    }

    async fn run<T>(&self, method: Method, url: Url) -> Result<Response<T>>
    where
        T: DeserializeOwned + Send,
    {
        let request = self.prepare_request(method, url)?;
        let response = request.send().await?;
        self.process_response(response).await
    }
}

#[derive(Default, Clone)]
struct Config {
    base_url: Option<String>,
    auth: Option<EdgeGridAuth>,
    reqwest_client: Option<reqwest::Client>,
}

#[derive(Clone)]
struct ClientConfig {
    base_url: String,
    auth: EdgeGridAuth,
}

// Ensure that Client is Send + Sync. Compiler will fail if it's not.
const _: () = {
    fn assert_send<T: Send + Sync>() {}
    let _ = assert_send::<Client>;
};
