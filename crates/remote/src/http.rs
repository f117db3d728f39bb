//! HTTP business API transport.
//!
//! Every operation is a form-encoded `POST <base_url>/<method>` carrying the
//! API key and `format=json`. The API answers with a JSON object whose
//! `errorCode` is `0` on success; anything else is mapped onto
//! [`RemoteError`] by [`classify_response`].

use async_trait::async_trait;
use screenset_config::AppConfig;
use screenset_core::ApiTransport;
use screenset_core::error::RemoteError;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// Authorization failures use the 403xxx error-code range.
const AUTH_ERROR_CODES: std::ops::RangeInclusive<i64> = 403_000..=403_999;

/// A transport speaking to the business REST API over HTTPS.
pub struct HttpApiTransport {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpApiTransport {
    /// Create a transport for `base_url` (e.g. `https://accounts.us1.gigya.com`).
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::NotConfigured(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Build a transport from application configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, RemoteError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| RemoteError::NotConfigured("api_key is not set".into()))?;
        Self::new(
            config.api_base_url(),
            api_key,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Flatten JSON params into form fields. Strings go as-is, other values
    /// as their JSON text.
    fn to_form(&self, params: Map<String, Value>) -> Vec<(String, String)> {
        let mut form: Vec<(String, String)> = params
            .into_iter()
            .map(|(k, v)| {
                let v = match v {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (k, v)
            })
            .collect();
        form.push(("apiKey".into(), self.api_key.clone()));
        form.push(("format".into(), "json".into()));
        form
    }
}

#[async_trait]
impl ApiTransport for HttpApiTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(
        &self,
        method: &str,
        params: Map<String, Value>,
    ) -> Result<Map<String, Value>, RemoteError> {
        let url = format!("{}/{}", self.base_url, method);
        debug!(method, "Sending business API request");

        let response = self
            .client
            .post(&url)
            .form(&self.to_form(params))
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let result = classify_response(status, &body);
        if let Err(e) = &result {
            warn!(method, status, error = %e, "Business API request failed");
        }
        result
    }
}

/// Map an HTTP status and body onto the response object or a [`RemoteError`].
pub fn classify_response(status: u16, body: &str) -> Result<Map<String, Value>, RemoteError> {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let object = match parsed {
        Some(Value::Object(map)) => map,
        _ => {
            return Err(match status {
                401 | 403 => RemoteError::Authorization {
                    code: i64::from(status),
                    message: truncate(body, 120).to_string(),
                },
                200..=299 => RemoteError::InvalidResponse(format!(
                    "expected a JSON object, got: {}",
                    truncate(body, 120)
                )),
                _ => RemoteError::Server {
                    code: i64::from(status),
                    message: truncate(body, 120).to_string(),
                },
            });
        }
    };

    let error_code = object.get("errorCode").and_then(Value::as_i64).unwrap_or(0);
    if error_code != 0 {
        let message = object
            .get("errorDetails")
            .or_else(|| object.get("errorMessage"))
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(if AUTH_ERROR_CODES.contains(&error_code) {
            RemoteError::Authorization {
                code: error_code,
                message,
            }
        } else {
            RemoteError::Server {
                code: error_code,
                message,
            }
        });
    }

    match status {
        200..=299 => Ok(object),
        401 | 403 => Err(RemoteError::Authorization {
            code: i64::from(status),
            message: "request rejected".into(),
        }),
        _ => Err(RemoteError::Server {
            code: i64::from(status),
            message: "unexpected HTTP status".into(),
        }),
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenset_core::RemoteErrorKind;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn success_body_is_returned() {
        let body = r#"{"errorCode": 0, "statusCode": 200, "screenSet": {"routing": {"initial": "login"}}}"#;
        let map = classify_response(200, body).unwrap();
        assert_eq!(map["screenSet"]["routing"]["initial"], "login");
    }

    #[test]
    fn auth_error_code_is_authorization() {
        let body = r#"{"errorCode": 403005, "errorDetails": "Unauthorized user", "statusCode": 403}"#;
        let err = classify_response(200, body).unwrap_err();
        assert_eq!(err.kind(), RemoteErrorKind::Authorization);
        assert!(err.to_string().contains("Unauthorized user"));
    }

    #[test]
    fn other_error_code_is_server() {
        let body = r#"{"errorCode": 500001, "errorMessage": "General Server Error"}"#;
        match classify_response(200, body).unwrap_err() {
            RemoteError::Server { code, message } => {
                assert_eq!(code, 500001);
                assert_eq!(message, "General Server Error");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn non_json_error_pages_are_truncated() {
        let page = format!("<html>{}</html>", "x".repeat(5000));
        match classify_response(503, &page).unwrap_err() {
            RemoteError::Server { code, message } => {
                assert_eq!(code, 503);
                assert_eq!(message.chars().count(), 120);
            }
            other => panic!("expected server error, got {other:?}"),
        }
        match classify_response(403, &page).unwrap_err() {
            RemoteError::Authorization { message, .. } => assert_eq!(message.chars().count(), 120),
            other => panic!("expected authorization error, got {other:?}"),
        }
    }

    #[test]
    fn non_json_bodies() {
        assert_eq!(
            classify_response(200, "<html>").unwrap_err().kind(),
            RemoteErrorKind::InvalidResponse
        );
        assert_eq!(
            classify_response(502, "Bad Gateway").unwrap_err().kind(),
            RemoteErrorKind::Server
        );
        assert_eq!(
            classify_response(401, "").unwrap_err().kind(),
            RemoteErrorKind::Authorization
        );
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[tokio::test]
    async fn posts_form_with_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/accounts.getNativeScreenSet"))
            .and(body_string_contains("apiKey=3_key"))
            .and(body_string_contains("screenSetId=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errorCode": 0,
                "screenSet": {"routing": {"initial": "login"}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let transport =
            HttpApiTransport::new(server.uri(), "3_key", Duration::from_secs(5)).unwrap();
        let mut params = Map::new();
        params.insert("screenSetId".into(), json!("abc"));
        params.insert("lang".into(), json!("en"));

        let response = transport
            .send("accounts.getNativeScreenSet", params)
            .await
            .unwrap();
        assert_eq!(response["screenSet"]["routing"]["initial"], "login");
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let transport =
            HttpApiTransport::new("http://127.0.0.1:9", "3_key", Duration::from_secs(2)).unwrap();
        let err = transport
            .send("accounts.getNativeScreenSet", Map::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), RemoteErrorKind::Network);
    }

    #[test]
    fn from_config_requires_api_key() {
        let config = AppConfig::default();
        assert!(matches!(
            HttpApiTransport::from_config(&config),
            Err(RemoteError::NotConfigured(_))
        ));
    }
}
