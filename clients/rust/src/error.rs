use thiserror::Error;

use crate::edgerc::EdgeRcError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unexpected error from the http client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("Cannot instantiate the client without an API host!")]
    HostRequired,
    #[error("Cannot instantiate the client without EdgeGrid credentials!")]
    CredentialsRequired,
    #[error("Identifiers in \"{0}\" cannot contain '?' or '#'")]
    InvalidIdentifier(String),
    #[error(transparent)]
    UrlParserError(#[from] url::ParseError),
    #[error("Returned JSON does not conform to protocol: {0}")]
    ProtocolError(#[from] serde_json::Error),
    #[error("Cannot build a request header: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
    #[error(transparent)]
    EdgeRc(#[from] EdgeRcError),
}
