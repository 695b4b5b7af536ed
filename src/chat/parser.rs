//! Response body parsing for the Gemini API.

use anyhow::{bail, Context, Result};

use super::events::*;

/// Parse a successful `generateContent` response body into a reply.
///
/// The reply text is the concatenation of the first candidate's text parts.
/// A blocked prompt or a candidate without any text is an error.
pub fn parse_reply(body: &str) -> Result<Reply> {
    let raw: RawResponse =
        serde_json::from_str(body).context("Failed to parse Gemini API response")?;

    if let Some(reason) = raw.prompt_feedback.and_then(|f| f.block_reason) {
        bail!("prompt was blocked ({})", reason);
    }

    let Some(candidate) = raw.candidates.into_iter().next() else {
        bail!("Gemini API returned no candidates");
    };

    let text = candidate
        .content
        .as_ref()
        .map(Content::text)
        .unwrap_or_default();

    if text.is_empty() {
        match candidate.finish_reason {
            Some(reason) => bail!("Gemini API returned an empty reply ({})", reason),
            None => bail!("Gemini API returned an empty reply"),
        }
    }

    Ok(Reply { text })
}

/// Build a readable message for a failed HTTP exchange.
///
/// Uses the `error.message` field when the body is a Gemini error document,
/// otherwise falls back to the first line of the raw body.
pub fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<RawErrorBody>(body) {
        Ok(RawErrorBody { error }) => match error.status {
            Some(code) => format!("Gemini API error {} {}: {}", status, code, error.message),
            None => format!("Gemini API error {}: {}", status, error.message),
        },
        Err(_) => {
            let first_line = body.lines().next().unwrap_or("").trim();
            if first_line.is_empty() {
                format!("Gemini API error {}", status)
            } else {
                format!("Gemini API error {}: {}", status, first_line)
            }
        }
    }
}
