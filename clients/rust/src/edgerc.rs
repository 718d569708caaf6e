//! Loader for `.edgerc` credential files.
//!
//! An `.edgerc` is an INI file where each section holds one set of EdgeGrid
//! credentials:
//!
//! ```ini
//! [iam]
//! host = akab-xxxx.luna.akamaiapis.net
//! client_token = akab-client-token
//! client_secret = secret
//! access_token = akab-access-token
//! ```
use std::fmt;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdgeRcError {
    #[error("Unable to read edgerc file \"{}\"", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to parse edgerc file")]
    Malformed(#[source] ConfigError),
    #[error("Edgerc section \"{0}\" not found")]
    SectionNotFound(String),
    #[error("Edgerc section \"{section}\" is incomplete")]
    Invalid {
        section: String,
        #[source]
        source: ConfigError,
    },
}

/// A single section of an `.edgerc` file.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub host: String,
    pub client_token: String,
    pub client_secret: String,
    pub access_token: String,
}

impl Credentials {
    /// The API host without scheme or trailing slash.
    pub fn host(&self) -> &str {
        let host = self.host.trim();
        let host = host
            .strip_prefix("https://")
            .or_else(|| host.strip_prefix("http://"))
            .unwrap_or(host);
        host.trim_end_matches('/')
    }
}

// Keep the client secret out of debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("client_token", &self.client_token)
            .field("client_secret", &"<redacted>")
            .field("access_token", &self.access_token)
            .finish()
    }
}

#[derive(Debug)]
pub struct EdgeRc {
    inner: Config,
}

impl EdgeRc {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, EdgeRcError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| {
            EdgeRcError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, EdgeRcError> {
        let inner = Config::builder()
            .add_source(File::from_str(raw, FileFormat::Ini))
            .build()
            .map_err(EdgeRcError::Malformed)?;
        Ok(Self { inner })
    }

    pub fn section(&self, name: &str) -> Result<Credentials, EdgeRcError> {
        match self.inner.get::<Credentials>(name) {
            | Ok(credentials) => Ok(credentials),
            | Err(ConfigError::NotFound(_)) => {
                Err(EdgeRcError::SectionNotFound(name.to_owned()))
            }
            | Err(source) => {
                Err(EdgeRcError::Invalid {
                    section: name.to_owned(),
                    source,
                })
            }
        }
    }
}
