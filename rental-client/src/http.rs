// rental-client/src/http.rs
// HTTP 客户端 - 与 PostgREST 后端通信

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ClientConfig, ClientError, ClientResult};

/// 后端返回的错误响应格式
#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

impl ApiErrorResponse {
    fn describe(self) -> Option<String> {
        let mut message = self.message?;
        if let Some(details) = self.details.filter(|d| !d.is_empty()) {
            message = format!("{message} ({details})");
        }
        if let Some(hint) = self.hint.filter(|h| !h.is_empty()) {
            message = format!("{message}; hint: {hint}");
        }
        if let Some(code) = self.code {
            message = format!("[{code}] {message}");
        }
        Some(message)
    }
}

/// REST 客户端
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => req
                .header("apikey", key)
                .header(reqwest::header::AUTHORIZATION, format!("Bearer {key}")),
            None => req,
        }
    }

    /// GET `path` with query pairs
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let req = self.authorize(self.client.get(self.url(path)).query(query));
        tracing::debug!(path, "GET");
        let response = req.send().await?;
        self.handle_response(response).await
    }

    /// POST a JSON body, asking for the stored rows back
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self
            .authorize(self.client.post(self.url(path)).json(body))
            .header("Prefer", "return=representation");
        tracing::debug!(path, "POST");
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            // 尝试解析为 PostgREST 错误响应
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .ok()
                .and_then(ApiErrorResponse::describe)
                .unwrap_or(text);
            tracing::warn!(status = status.as_u16(), %message, "Backend request failed");
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
                StatusCode::FORBIDDEN => ClientError::Forbidden(message),
                StatusCode::NOT_FOUND => ClientError::NotFound(message),
                StatusCode::CONFLICT => ClientError::Conflict(message),
                _ => ClientError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}
