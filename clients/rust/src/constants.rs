pub static EDGERC_ENV: &str = "AKAMAI_EDGERC";
pub static EDGERC_SECTION_ENV: &str = "AKAMAI_EDGERC_SECTION";
pub static DEFAULT_EDGERC_FILE: &str = ".edgerc";
pub static DEFAULT_SECTION: &str = "iam";

/// Root of every identity management endpoint.
pub static OPEN_IDENTITIES_PATH: &str =
    "/identity-management/v1/open-identities";
