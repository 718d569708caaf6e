//! The identity management endpoints.
//!
//! Each operation is a single signed `GET`. The response is returned as-is,
//! a non-200 status is not turned into an `Err` here so callers can decide
//! how to report it.
use http::Method;
use serde_json::Value;

use crate::client::RequestRunner;
use crate::constants::OPEN_IDENTITIES_PATH;
use crate::{Error, Response, Result};

/// Path and optional query of a single API call, relative to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub path: String,
    pub query: Option<String>,
}

impl RequestDescriptor {
    fn new(path: String) -> Self {
        Self { path, query: None }
    }

    fn with_actions(self, actions: bool) -> Self {
        if actions {
            self.with_query("actions=true".to_owned())
        } else {
            self
        }
    }

    fn with_query(mut self, query: String) -> Self {
        self.query = Some(query);
        self
    }

    /// Issues the GET. Identifiers are embedded verbatim, so one carrying a
    /// query or fragment delimiter is refused instead of truncating the path.
    pub async fn send<T>(&self, client: &impl RequestRunner) -> Result<Response<T>>
    where
        T: serde::de::DeserializeOwned + Send,
    {
        if self.path.contains(['?', '#']) {
            return Err(Error::InvalidIdentifier(self.path.clone()));
        }
        let mut url = client.make_url(&self.path)?;
        if let Some(ref query) = self.query {
            url.set_query(Some(query));
        }
        client.run(Method::GET, url).await
    }
}

pub fn list_credentials_request<T>(
    open_identity_id: T,
    actions: bool,
) -> RequestDescriptor
where
    T: AsRef<str>,
{
    RequestDescriptor::new(format!(
        "{OPEN_IDENTITIES_PATH}/{}/credentials",
        open_identity_id.as_ref()
    ))
    .with_actions(actions)
}

pub fn get_credential_request<T, C>(
    open_identity_id: T,
    credential_id: C,
    actions: bool,
) -> RequestDescriptor
where
    T: AsRef<str>,
    C: AsRef<str>,
{
    RequestDescriptor::new(format!(
        "{OPEN_IDENTITIES_PATH}/{}/credentials/{}",
        open_identity_id.as_ref(),
        credential_id.as_ref()
    ))
    .with_actions(actions)
}

pub fn get_client_request<T>(access_token: T, actions: bool) -> RequestDescriptor
where
    T: AsRef<str>,
{
    RequestDescriptor::new(format!(
        "{OPEN_IDENTITIES_PATH}/tokens/{}",
        access_token.as_ref()
    ))
    .with_actions(actions)
}

/// The API only filters when `search` has at least three characters, shorter
/// strings are still forwarded and left for the server to ignore.
pub fn list_account_switch_keys_request<T>(
    open_identity_id: T,
    search: Option<&str>,
) -> RequestDescriptor
where
    T: AsRef<str>,
{
    let request = RequestDescriptor::new(format!(
        "{OPEN_IDENTITIES_PATH}/{}/account-switch-keys",
        open_identity_id.as_ref()
    ));
    match search {
        | Some(search) if !search.is_empty() => {
            request.with_query(format!("search={search}"))
        }
        | _ => request,
    }
}

/// Lists the credentials of an API client.
pub async fn list_credentials<T>(
    client: &impl RequestRunner,
    open_identity_id: T,
    actions: bool,
) -> Result<Response<Value>>
where
    T: AsRef<str>,
{
    list_credentials_request(open_identity_id, actions)
        .send(client)
        .await
}

/// Retrieve a single credential.
pub async fn get_credential<T, C>(
    client: &impl RequestRunner,
    open_identity_id: T,
    credential_id: C,
    actions: bool,
) -> Result<Response<Value>>
where
    T: AsRef<str>,
    C: AsRef<str>,
{
    get_credential_request(open_identity_id, credential_id, actions)
        .send(client)
        .await
}

/// Retrieve the API client identified by `access_token`.
pub async fn get_client<T>(
    client: &impl RequestRunner,
    access_token: T,
    actions: bool,
) -> Result<Response<Value>>
where
    T: AsRef<str>,
{
    get_client_request(access_token, actions).send(client).await
}

/// Lists the account switch keys available to an API client.
pub async fn list_account_switch_keys<T>(
    client: &impl RequestRunner,
    open_identity_id: T,
    search: Option<&str>,
) -> Result<Response<Value>>
where
    T: AsRef<str>,
{
    list_account_switch_keys_request(open_identity_id, search)
        .send(client)
        .await
}
