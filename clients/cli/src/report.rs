use akamai_iam_client::{to_pretty_json, ApiError, Response};
use anyhow::Result;
use serde_json::Value;
use tracing::{debug, info};

pub const FETCH_ERROR: &str =
    "There was error in fetching response. Use --debug for more information.";

/// What a command has to show for its single API call.
#[derive(Debug)]
pub enum Report {
    /// The rendered body of a `200 OK` response.
    Output(String),
    /// Any other status.
    Failed(ApiError),
}

impl Report {
    /// Renders a successful body with `render`. Failures are kept as-is and
    /// only rendered when emitted.
    pub fn from_response<F>(response: Response<Value>, render: F) -> Result<Self>
    where
        F: FnOnce(Value) -> Result<String>,
    {
        match response.into_inner() {
            | Ok(body) => Ok(Report::Output(render(body)?)),
            | Err(e) => Ok(Report::Failed(e)),
        }
    }

    pub fn json(response: Response<Value>) -> Result<Self> {
        Self::from_response(response, |body| Ok(to_pretty_json(&body)?))
    }

    /// Writes the report to the log. The error body is only visible at
    /// debug level.
    pub fn emit(&self) {
        match self {
            | Report::Output(output) => info!("{}", output),
            | Report::Failed(e) => {
                info!("{}", FETCH_ERROR);
                debug!("{}", e.pretty_body());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use serde_json::json;
    use tracing::subscriber::with_default;
    use tracing_subscriber::prelude::*;

    use super::*;
    use crate::logging::{console_layer, test_util::Capture};

    fn response(status: StatusCode, body: &str) -> Response<Value> {
        Response::from_parts(status, body).unwrap()
    }

    fn emitted(report: &Report, debug: bool) -> String {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::registry()
            .with(console_layer(capture.clone(), debug));
        with_default(subscriber, || report.emit());
        capture.contents()
    }

    #[test]
    fn json_output_round_trips() {
        let body = r#"[{"credentialId":1,"clientToken":"akab-x","status":"ACTIVE","actions":{"delete":true}}]"#;
        let report = Report::json(response(StatusCode::OK, body)).unwrap();
        let Report::Output(output) = report else {
            panic!("expected output");
        };
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, serde_json::from_str::<Value>(body).unwrap());
        // Keys keep the server order.
        assert!(output.find("credentialId").unwrap() < output.find("status").unwrap());
        assert!(output.contains("\n    {\n        \"credentialId\": 1,"));
    }

    #[test]
    fn forbidden_at_normal_verbosity() {
        let body = json!({"type": "/identity-management/error-types/2", "status": 403});
        let report =
            Report::json(response(StatusCode::FORBIDDEN, &body.to_string()))
                .unwrap();
        assert!(matches!(report, Report::Failed(_)));
        assert_eq!(emitted(&report, false), format!("{FETCH_ERROR}\n"));
    }

    #[test]
    fn forbidden_at_debug_verbosity() {
        let body = json!({"type": "/identity-management/error-types/2", "status": 403});
        let report =
            Report::json(response(StatusCode::FORBIDDEN, &body.to_string()))
                .unwrap();
        assert_eq!(
            emitted(&report, true),
            format!(
                "{FETCH_ERROR}\n{{\n    \"type\": \
                 \"/identity-management/error-types/2\",\n    \"status\": \
                 403\n}}\n"
            )
        );
    }

    #[test]
    fn non_json_error_body_is_shown_raw() {
        let report = Report::json(response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "upstream timed out",
        ))
        .unwrap();
        assert_eq!(
            emitted(&report, true),
            format!("{FETCH_ERROR}\nupstream timed out\n")
        );
    }

    #[test]
    fn render_errors_propagate() {
        let result = Report::from_response(
            response(StatusCode::OK, "{}"),
            |_| anyhow::bail!("cannot render"),
        );
        assert!(result.is_err());
    }
}
