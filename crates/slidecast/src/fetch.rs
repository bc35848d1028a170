use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// What the generation service returns for one deck identifier.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    status: String,
    #[serde(default)]
    slide_markdown: String,
    /// Base64-encoded WebVTT.
    #[serde(default)]
    captions: String,
    #[serde(default)]
    error: Option<String>,
}

/// A generated deck: slide markdown plus its WebVTT caption track.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckPayload {
    pub slides: String,
    pub captions: String,
}

/// Ask the generation service to produce a narrated deck.
pub fn fetch_deck(url: &str, identifier: &str, voice: Option<&str>) -> Result<DeckPayload> {
    let mut body = serde_json::json!({ "identifier": identifier });
    if let Some(voice) = voice {
        body["voice"] = serde_json::Value::String(voice.to_string());
    }

    let response: GenerateResponse = ureq::post(url)
        .header("Content-Type", "application/json")
        .send_json(&body)
        .context("Failed to call the generation service")?
        .body_mut()
        .read_json()
        .context("Failed to parse the generation service response")?;

    payload_from(response)
}

fn payload_from(response: GenerateResponse) -> Result<DeckPayload> {
    if response.status != "ok" {
        match response.error {
            Some(reason) => bail!("Generation failed: {reason}"),
            None => bail!("Generation failed with status {:?}", response.status),
        }
    }

    use base64::Engine;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&response.captions)
        .context("Failed to decode base64 caption data")?;
    let captions = String::from_utf8(bytes).context("Failed to decode captions as UTF-8")?;

    Ok(DeckPayload {
        slides: response.slide_markdown,
        captions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    fn encode(text: &str) -> String {
        base64::engine::general_purpose::STANDARD.encode(text)
    }

    #[test]
    fn test_ok_response_decodes_captions() {
        let response = GenerateResponse {
            status: "ok".into(),
            slide_markdown: "# One\n\n---\n\n# Two".into(),
            captions: encode("WEBVTT\n\n00:00.000 --> 00:02.000\nhello"),
            error: None,
        };

        let payload = payload_from(response).unwrap();
        assert_eq!(payload.slides, "# One\n\n---\n\n# Two");
        assert!(payload.captions.starts_with("WEBVTT"));
        assert!(payload.captions.ends_with("hello"));
    }

    #[test]
    fn test_error_response_reports_reason() {
        let response = GenerateResponse {
            status: "error".into(),
            slide_markdown: String::new(),
            captions: String::new(),
            error: Some("no such deck".into()),
        };

        let err = payload_from(response).unwrap_err();
        assert!(err.to_string().contains("no such deck"));
    }

    #[test]
    fn test_error_response_without_reason_reports_status() {
        let response = GenerateResponse {
            status: "busy".into(),
            slide_markdown: String::new(),
            captions: String::new(),
            error: None,
        };

        let err = payload_from(response).unwrap_err();
        assert!(err.to_string().contains("busy"));
    }

    #[test]
    fn test_invalid_base64_fails() {
        let response = GenerateResponse {
            status: "ok".into(),
            slide_markdown: String::new(),
            captions: "not base64!!".into(),
            error: None,
        };

        assert!(payload_from(response).is_err());
    }

    #[test]
    fn test_response_json_fills_defaults() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"status": "error", "error": "deck not found"}"#).unwrap();
        assert_eq!(response.status, "error");
        assert_eq!(response.slide_markdown, "");
        assert_eq!(response.error.as_deref(), Some("deck not found"));
    }
}
