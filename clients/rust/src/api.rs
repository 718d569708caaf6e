use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// A failed API call. Any status other than `200 OK` ends up here, the body
/// is kept verbatim since error bodies are not guaranteed to be JSON.
#[derive(Debug, Clone)]
pub struct ApiError {
    status_code: StatusCode,
    body: String,
    json: Option<serde_json::Value>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn json(&self) -> Option<&serde_json::Value> {
        self.json.as_ref()
    }

    /// The error body as indented JSON, or the raw text if it isn't JSON.
    pub fn pretty_body(&self) -> String {
        self.json
            .as_ref()
            .and_then(|json| to_pretty_json(json).ok())
            .unwrap_or_else(|| self.body.clone())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}) {}", self.status_code, self.body)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone)]
pub struct Response<T> {
    inner: Result<T, ApiError>,
    status_code: StatusCode,
}

impl<T> Response<T> {
    pub fn into_inner(self) -> Result<T, ApiError> {
        self.inner
    }

    pub fn inner(&self) -> &Result<T, ApiError> {
        &self.inner
    }

    pub fn status_code(&self) -> http::StatusCode {
        self.status_code
    }

    pub fn is_err(&self) -> bool {
        self.inner.is_err()
    }

    pub fn is_ok(&self) -> bool {
        self.inner.is_ok()
    }
}

impl<T> Response<T>
where
    T: DeserializeOwned,
{
    pub(crate) async fn from_raw_response(
        raw: reqwest::Response,
    ) -> Result<Self, crate::Error> {
        let status_code = raw.status();
        let body = raw.text().await?;

        Self::from_parts(status_code, &body)
    }

    /// Builds a response out of an already received status and body. Only
    /// `200 OK` is treated as success, and a success body must be JSON.
    pub fn from_parts(
        status_code: StatusCode,
        body: &str,
    ) -> Result<Self, crate::Error> {
        let inner = if status_code == StatusCode::OK {
            Ok(serde_json::from_str(body)?)
        } else {
            // Attempt to parse the error as json
            let json = match serde_json::from_str(body) {
                | Ok(json) => Some(json),
                | Err(e) => {
                    debug!(
                        "Response error body is not json. Error: {}. Body: {}",
                        e, body
                    );
                    None
                }
            };
            Err(ApiError {
                status_code,
                body: body.to_owned(),
                json,
            })
        };

        Ok(Self { inner, status_code })
    }
}

/// Serializes with a four-space indent.
pub fn to_pretty_json<T>(value: &T) -> Result<String, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
