//! Resolution of the common options into an authenticated session.
use std::path::PathBuf;

use akamai_iam_client::{ClientBuilder, EdgeRc, DEFAULT_EDGERC_FILE};
use anyhow::{Context, Result};
use tracing::debug;

use crate::args::CommonOptions;
use crate::client::WrappedClient;

const CACHE_DIR_VAR: &str = "AKAMAI_CLI_CACHE_DIR";

/// The options every API command runs with, resolved once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub edgerc: PathBuf,
    pub section: String,
    pub debug: bool,
    /// Reserved for the Akamai CLI cache, nothing is cached yet.
    pub cache_dir: PathBuf,
}

/// An authenticated transport plus the access token of the `.edgerc`
/// section it was built from.
pub struct Session<R> {
    pub client: R,
    pub access_token: String,
}

impl Config {
    pub fn from_options(options: &CommonOptions) -> Result<Self> {
        let edgerc = match options.edgerc {
            | Some(ref path) => path.clone(),
            | None => {
                etcetera::home_dir()
                    .context("Cannot locate the home directory")?
                    .join(DEFAULT_EDGERC_FILE)
            }
        };
        let cache_dir = std::env::var_os(CACHE_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            edgerc,
            section: options.section.clone(),
            debug: options.debug,
            cache_dir,
        })
    }

    /// Reads the credentials and builds the signed client. Fails before any
    /// request is made if the file or the section can't be read.
    pub fn open_session(&self) -> Result<Session<WrappedClient>> {
        debug!(
            edgerc = %self.edgerc.display(),
            section = %self.section,
            cache_dir = %self.cache_dir.display(),
            "Loading credentials"
        );
        let credentials =
            EdgeRc::from_path(&self.edgerc)?.section(&self.section)?;
        let inner = ClientBuilder::new()
            .credentials(&credentials)
            .context("Error while parsing the edgerc host")?
            .build()?;

        Ok(Session {
            client: WrappedClient { inner },
            access_token: credentials.access_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use akamai_iam_client::{EdgeRcError, RequestRunner};

    use super::*;

    fn config(edgerc: PathBuf, section: &str) -> Config {
        Config {
            edgerc,
            section: section.to_owned(),
            debug: false,
            cache_dir: PathBuf::from("."),
        }
    }

    fn edgerc_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"[iam]\n\
              host = akab-iam.luna.akamaiapis.net\n\
              client_token = akab-client\n\
              client_secret = secret\n\
              access_token = akab-access\n",
        )
        .unwrap();
        file
    }

    #[test]
    fn explicit_options_win() {
        let options = CommonOptions {
            edgerc: Some(PathBuf::from("/etc/akamai/edgerc")),
            section: "default".to_owned(),
            debug: true,
        };
        let config = Config::from_options(&options).unwrap();
        assert_eq!(config.edgerc, PathBuf::from("/etc/akamai/edgerc"));
        assert_eq!(config.section, "default");
        assert!(config.debug);
    }

    #[test]
    fn session_from_edgerc() {
        let file = edgerc_file();
        let session = config(file.path().to_path_buf(), "iam")
            .open_session()
            .unwrap();
        assert_eq!(session.access_token, "akab-access");
        assert_eq!(
            session.client.make_url("/x").unwrap().as_str(),
            "https://akab-iam.luna.akamaiapis.net/x"
        );
    }

    #[test]
    fn unreadable_edgerc_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.edgerc");
        let err = config(path.clone(), "iam").open_session().err().unwrap();
        assert!(matches!(
            err.downcast_ref::<EdgeRcError>(),
            Some(EdgeRcError::Unreadable { .. })
        ));
        assert!(format!("{err:#}").contains(&path.display().to_string()));
    }

    #[test]
    fn missing_section_is_reported() {
        let file = edgerc_file();
        let err = config(file.path().to_path_buf(), "papi")
            .open_session()
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Edgerc section \"papi\" not found");
    }
}
