use crate::models::Document;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http,
    Parse,
    /// Body decoded but does not look like a page document.
    InvalidPayload,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn http(message: String) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message,
        }
    }

    fn invalid_payload() -> Self {
        Self {
            kind: ApiErrorKind::InvalidPayload,
            message: "Les données reçues sont invalides ou vides.".to_string(),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Endpoint configuration, read from `window.ENV` at startup with
/// compiled-in relative defaults (same-origin serverless functions).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub data_url: String,
    pub save_url: String,
    pub secret: String,
    pub upload_url: String,
    pub upload_preset: String,
}

fn env_string(env: &wasm_bindgen::JsValue, key: &str) -> Option<String> {
    js_sys::Reflect::get(env, &key.into())
        .ok()
        .and_then(|v| v.as_string())
}

impl EnvConfig {
    pub fn new() -> Self {
        let mut cfg = Self {
            data_url: "/.netlify/functions/get-data".to_string(),
            save_url: "/.netlify/functions/update-data".to_string(),
            secret: String::new(),
            upload_url: String::new(),
            upload_preset: String::new(),
        };

        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    if let Some(v) = env_string(&env, "DATA_URL") {
                        cfg.data_url = v;
                    }
                    if let Some(v) = env_string(&env, "SAVE_URL") {
                        cfg.save_url = v;
                    }
                    if let Some(v) = env_string(&env, "SECRET") {
                        cfg.secret = v;
                    }
                    if let Some(v) = env_string(&env, "UPLOAD_URL") {
                        cfg.upload_url = v;
                    }
                    if let Some(v) = env_string(&env, "UPLOAD_PRESET") {
                        cfg.upload_preset = v;
                    }
                }
            }
        }

        cfg
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Clone, Debug)]
pub(crate) struct SaveRequest<'a> {
    pub secret: &'a str,
    pub data: &'a Document,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) config: EnvConfig,
}

impl ApiClient {
    pub fn new(config: EnvConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(EnvConfig::new())
    }

    /// GET the stored document. The raw JSON value is returned so the
    /// caller can run it through `merge_defaults`; a body without a
    /// `profile` key is rejected as structurally invalid.
    pub async fn fetch_document(&self) -> ApiResult<serde_json::Value> {
        let client = reqwest::Client::new();
        let res = client
            .get(&self.config.data_url)
            .send()
            .await
            .map_err(ApiError::network)?;

        if !res.status().is_success() {
            return Err(ApiError::http(format!(
                "Erreur réseau ({})",
                res.status().as_u16()
            )));
        }

        let data: serde_json::Value = res.json().await.map_err(ApiError::parse)?;
        if data.get("profile").is_none() {
            return Err(ApiError::invalid_payload());
        }
        Ok(data)
    }

    /// POST `{ secret, data }`. A rejected save surfaces the server's
    /// `message` verbatim.
    pub async fn save_document(&self, doc: &Document) -> ApiResult<serde_json::Value> {
        let client = reqwest::Client::new();
        let res = client
            .post(&self.config.save_url)
            .json(&SaveRequest {
                secret: &self.config.secret,
                data: doc,
            })
            .send()
            .await
            .map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else {
            let body = res.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| "Échec de la sauvegarde".to_string());
            Err(ApiError::http(message))
        }
    }
}

/// Image-hosting collaborator (Cloudinary-style unsigned upload). The
/// `file` form field accepts a base64 data URL directly, which is exactly
/// what the FileReader hands us.
#[derive(Clone)]
pub(crate) struct ImageHostClient {
    upload_url: String,
    upload_preset: String,
}

impl ImageHostClient {
    pub fn from_config(config: &EnvConfig) -> Option<Self> {
        if config.upload_url.trim().is_empty() {
            return None;
        }
        Some(Self {
            upload_url: config.upload_url.clone(),
            upload_preset: config.upload_preset.clone(),
        })
    }

    pub async fn upload(&self, data_url: &str) -> ApiResult<String> {
        let client = reqwest::Client::new();
        let res = client
            .post(&self.upload_url)
            .form(&[
                ("file", data_url),
                ("upload_preset", self.upload_preset.as_str()),
            ])
            .send()
            .await
            .map_err(ApiError::network)?;

        if !res.status().is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::http(format!(
                "Le téléversement a échoué: {body}"
            )));
        }

        let data: serde_json::Value = res.json().await.map_err(ApiError::parse)?;
        Self::extract_secure_url(&data)
    }

    pub(crate) fn extract_secure_url(data: &serde_json::Value) -> ApiResult<String> {
        data.get("secure_url")
            .or_else(|| data.get("url"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| ApiError::parse("réponse du service d'images sans secure_url"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_request_contract() {
        let doc = Document::default();
        let req = SaveRequest {
            secret: "s3cret",
            data: &doc,
        };
        let v = serde_json::to_value(&req).expect("serializes");
        assert_eq!(v["secret"], "s3cret");
        assert!(v["data"]["profile"].is_object());
        assert!(v["data"]["sectionOrder"].is_array());
    }

    #[test]
    fn test_error_body_message_is_optional() {
        let b: ErrorBody = serde_json::from_str(r#"{"message":"nope"}"#).expect("parses");
        assert_eq!(b.message.as_deref(), Some("nope"));

        let b: ErrorBody = serde_json::from_str("{}").expect("parses");
        assert!(b.message.is_none());
    }

    #[test]
    fn test_upload_response_secure_url_extraction() {
        let url = ImageHostClient::extract_secure_url(&json!({
            "secure_url": "https://img.example/x.png"
        }))
        .expect("secure_url");
        assert_eq!(url, "https://img.example/x.png");

        let url =
            ImageHostClient::extract_secure_url(&json!({ "url": "https://img.example/y.png" }))
                .expect("url fallback");
        assert_eq!(url, "https://img.example/y.png");

        let err = ImageHostClient::extract_secure_url(&json!({})).unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Parse);
    }

    #[test]
    fn test_api_error_display_is_message_only() {
        let e = ApiError::http("Échec de la sauvegarde".to_string());
        assert_eq!(e.to_string(), "Échec de la sauvegarde");
    }
}
