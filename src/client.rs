use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::RemoteError;
use crate::retry::{with_retry_if, RetryConfig};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest<'a> {
    text: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
}

#[derive(Debug, Serialize)]
struct SuggestionsRequest<'a> {
    text: &'a str,
}

/// Body of a successful translate call. The service may omit the field.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct TranslateResponse {
    #[serde(default)]
    pub translated: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SuggestionsResponse {
    #[serde(default)]
    pub suggestions: Option<String>,
}

/// Non-empty payload, or `None` when the service answered without one.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl TranslateResponse {
    pub fn into_text(self) -> Option<String> {
        non_empty(self.translated)
    }
}

impl SuggestionsResponse {
    pub fn into_text(self) -> Option<String> {
        non_empty(self.suggestions)
    }
}

/// The remote translation collaborator.
#[async_trait]
pub trait TranslationApi: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<TranslateResponse, RemoteError>;

    async fn suggest(&self, text: &str) -> Result<SuggestionsResponse, RemoteError>;
}

/// HTTP client for `POST {base}/translate` and `POST {base}/suggestions`.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl RemoteClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        retry: RetryConfig,
    ) -> Result<Self, RemoteError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| RemoteError::Transport {
                url: base_url.clone(),
                source,
            })?;

        Ok(Self {
            http,
            base_url,
            retry,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, RemoteError> {
        Self::new(
            &config.api_base_url,
            config.request_timeout,
            RetryConfig::remote_call().with_max_attempts(config.remote_max_attempts),
        )
    }

    pub fn translate_url(&self) -> String {
        format!("{}/translate", self.base_url)
    }

    pub fn suggestions_url(&self) -> String {
        format!("{}/suggestions", self.base_url)
    }

    async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R, RemoteError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| RemoteError::from_send(url, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(RemoteError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        response.json::<R>().await.map_err(|source| RemoteError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl TranslationApi for RemoteClient {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<TranslateResponse, RemoteError> {
        let url = self.translate_url();
        let request = TranslateRequest {
            text,
            source_lang,
            target_lang,
        };
        debug!("Translating {} chars {} -> {}", text.len(), source_lang, target_lang);

        with_retry_if(
            &self.retry,
            &format!("Translate {} -> {}", source_lang, target_lang),
            || self.post_json(&url, &request),
            RemoteError::is_retryable,
        )
        .await
    }

    async fn suggest(&self, text: &str) -> Result<SuggestionsResponse, RemoteError> {
        let url = self.suggestions_url();
        let request = SuggestionsRequest { text };
        debug!("Fetching suggestions for {} chars", text.len());

        with_retry_if(
            &self.retry,
            "Suggestions",
            || self.post_json(&url, &request),
            RemoteError::is_retryable,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_for(server: &MockServer, retry: RetryConfig) -> RemoteClient {
        RemoteClient::new(
            format!("{}/api/translate", server.uri()),
            Duration::from_secs(5),
            retry,
        )
        .unwrap()
    }

    #[test]
    fn test_urls_trim_trailing_slash() {
        let client = RemoteClient::new(
            "http://localhost:5181/api/translate/",
            Duration::from_secs(1),
            RetryConfig::no_retry(),
        )
        .unwrap();
        assert_eq!(client.translate_url(), "http://localhost:5181/api/translate/translate");
        assert_eq!(client.suggestions_url(), "http://localhost:5181/api/translate/suggestions");
    }

    #[test]
    fn test_translate_request_uses_camel_case() {
        let request = TranslateRequest {
            text: "hello",
            source_lang: "en",
            target_lang: "es",
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"text": "hello", "sourceLang": "en", "targetLang": "es"})
        );
    }

    #[test]
    fn test_missing_fields_deserialize_to_none() {
        let translate: TranslateResponse = serde_json::from_str("{}").unwrap();
        let suggestions: SuggestionsResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(translate.into_text(), None);
        assert_eq!(suggestions.into_text(), None);
    }

    #[test]
    fn test_empty_payload_is_none() {
        let response = TranslateResponse {
            translated: Some(String::new()),
        };
        assert_eq!(response.into_text(), None);
    }

    #[tokio::test]
    async fn test_translate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/translate/translate"))
            .and(body_json(json!({"text": "hello", "sourceLang": "en", "targetLang": "es"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"translated": "hola"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, RetryConfig::no_retry());
        let response = client.translate("hello", "en", "es").await.unwrap();
        assert_eq!(response.into_text().as_deref(), Some("hola"));
    }

    #[tokio::test]
    async fn test_suggest_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/translate/suggestions"))
            .and(body_json(json!({"text": "helo"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"suggestions": "hello, help"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, RetryConfig::no_retry());
        let response = client.suggest("helo").await.unwrap();
        assert_eq!(response.into_text().as_deref(), Some("hello, help"));
    }

    #[tokio::test]
    async fn test_retries_on_503() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/translate/translate"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/translate/translate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"translated": "bonjour"})))
            .mount(&server)
            .await;

        let retry = RetryConfig::new(2, Duration::from_millis(10));
        let client = client_for(&server, retry);
        let response = client.translate("hello", "en", "fr").await.unwrap();
        assert_eq!(response.into_text().as_deref(), Some("bonjour"));
    }

    #[tokio::test]
    async fn test_no_retry_on_400() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/translate/translate"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .expect(1)
            .mount(&server)
            .await;

        let retry = RetryConfig::new(3, Duration::from_millis(10));
        let client = client_for(&server, retry);
        let err = client.translate("hello", "en", "es").await.unwrap_err();

        match err {
            RemoteError::Status { status, body, .. } => {
                assert_eq!(status.as_u16(), 400);
                assert_eq!(body, "bad request");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/translate/suggestions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, RetryConfig::new(3, Duration::from_millis(10)));
        let err = client.suggest("hi").await.unwrap_err();
        assert!(matches!(err, RemoteError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_timeout_surfaces_as_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/translate/translate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"translated": "tarde"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = RemoteClient::new(
            format!("{}/api/translate", server.uri()),
            Duration::from_millis(50),
            RetryConfig::no_retry(),
        )
        .unwrap();
        let err = client.translate("late", "en", "es").await.unwrap_err();
        assert!(matches!(err, RemoteError::Timeout { .. }), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client = RemoteClient::new(
            "http://127.0.0.1:1/api/translate",
            Duration::from_secs(1),
            RetryConfig::no_retry(),
        )
        .unwrap();
        let err = client.suggest("hi").await.unwrap_err();
        assert!(err.is_retryable());
    }
}
