mod api;
pub mod client;
mod constants;
pub mod edgegrid;
pub mod edgerc;
mod error;
pub mod identity;
mod model;

pub use self::api::{to_pretty_json, ApiError, Response};
pub use self::client::{Client, ClientBuilder, RequestRunner};
pub use self::constants::{
    DEFAULT_EDGERC_FILE,
    DEFAULT_SECTION,
    EDGERC_ENV,
    EDGERC_SECTION_ENV,
    OPEN_IDENTITIES_PATH,
};
pub use self::edgerc::{Credentials, EdgeRc, EdgeRcError};
pub use self::error::{Error, Result};
pub use self::model::AccountSwitchKey;
