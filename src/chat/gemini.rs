//! Gemini REST client.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::project::ChatSettings;

use super::events::{Content, GenerateContentRequest, GoogleSearch, Tool};
use super::{parser, ChatBackend};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// A multi-turn conversation with one Gemini model.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    system_instruction: String,
    search: bool,
    history: Vec<Content>,
}

impl GeminiClient {
    pub fn new(settings: &ChatSettings, api_key: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            bail!("Gemini API key is empty");
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            system_instruction: settings.system_instruction(),
            search: settings.search,
            history: Vec::new(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Request body for the current history plus `pending`.
    fn build_request<'a>(&'a self, pending: &'a Content) -> GenerateContentRequest<'a> {
        let tools = if self.search {
            vec![Tool {
                google_search: GoogleSearch::default(),
            }]
        } else {
            Vec::new()
        };

        GenerateContentRequest {
            contents: self.history.iter().chain(std::iter::once(pending)).collect(),
            system_instruction: Some(Content::system(&self.system_instruction)),
            tools,
        }
    }

    async fn generate(&self, pending: &Content) -> Result<String> {
        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&self.build_request(pending))
            .send()
            .await
            .context("Failed to reach the Gemini API")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read the Gemini API response")?;

        if !status.is_success() {
            bail!("{}", parser::error_message(status.as_u16(), &body));
        }

        Ok(parser::parse_reply(&body)?.text)
    }
}

#[async_trait]
impl ChatBackend for GeminiClient {
    async fn send_message(&mut self, prompt: &str) -> Result<String> {
        let pending = Content::user(prompt);
        let reply = self.generate(&pending).await?;

        // History only changes once the exchange is complete, so a dropped
        // future or an error leaves it untouched.
        self.history.push(pending);
        self.history.push(Content::model(&reply));
        Ok(reply)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::events::Role;

    fn client(search: bool) -> GeminiClient {
        let settings = ChatSettings {
            search,
            base_url: "https://example.test/".to_string(),
            ..ChatSettings::default()
        };
        GeminiClient::new(&settings, "key".to_string()).unwrap()
    }

    #[test]
    fn endpoint_uses_model_and_trims_slash() {
        let c = client(true);
        assert_eq!(
            c.endpoint(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let result = GeminiClient::new(&ChatSettings::default(), "  ".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn request_includes_history_instruction_and_search_tool() {
        let mut c = client(true);
        c.history.push(Content::user("hi"));
        c.history.push(Content::model("hello!"));

        let pending = Content::user("what's new?");
        let json = serde_json::to_value(c.build_request(&pending)).unwrap();

        let contents = json["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["parts"][0]["text"], "what's new?");

        let instruction = json["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap();
        assert!(instruction.contains("Aeros AI"));
        assert!(json["systemInstruction"].get("role").is_none());

        assert!(json["tools"][0]["google_search"].is_object());
    }

    #[test]
    fn search_disabled_omits_tools() {
        let c = client(false);
        let pending = Content::user("x");
        let json = serde_json::to_value(c.build_request(&pending)).unwrap();
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn content_roles_round_trip_lowercase() {
        let content: Content =
            serde_json::from_str(r#"{"role": "model", "parts": [{"text": "a"}]}"#).unwrap();
        assert_eq!(content.role, Some(Role::Model));
        assert_eq!(content.text(), "a");
    }
}
