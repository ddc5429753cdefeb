use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};

use crate::{
    error::{Result, StudioError},
    models::{GenerateContentResponse, GeneratedImage, ImagePart},
};

use super::transport::GenerateTransport;

/// The outbound call primitive: builds one request envelope, submits it,
/// retries on rate limiting, and extracts the first inline image from the
/// response.
#[derive(Clone)]
pub struct ImageClient {
    transport: Arc<dyn GenerateTransport>,
    max_retries: u32,
    backoff_base: f64,
}

impl ImageClient {
    pub fn new(transport: Arc<dyn GenerateTransport>, max_retries: u32, backoff_base: f64) -> Self {
        Self {
            transport,
            max_retries,
            backoff_base,
        }
    }

    /// Send one instruction plus its inline images and return the generated
    /// image. Only HTTP 429 is retried; the envelope is resent unchanged
    /// after a backoff of `backoff_base^attempt` seconds.
    pub async fn generate(
        &self,
        instruction: &str,
        images: &[ImagePart],
    ) -> Result<GeneratedImage> {
        let payload = build_envelope(instruction, images);

        log::info!(
            "Calling Gemini image model ({} inline image(s))",
            images.len()
        );
        log::debug!("Instruction: {}", instruction);

        let _timer = crate::logger::timer("gemini.generate");

        let mut attempt: u32 = 0;
        while attempt <= self.max_retries {
            let reply = self.transport.send(&payload).await?;

            if reply.status == 429 {
                if attempt == self.max_retries {
                    log::warn!("Rate limited on final attempt, giving up");
                    return Err(StudioError::RateLimited(reply.body));
                }
                let delay = Duration::from_secs_f64(self.backoff_base.powi(attempt as i32));
                log::warn!(
                    "Rate limited by Gemini, retrying in {:.1}s (attempt {}/{})",
                    delay.as_secs_f64(),
                    attempt + 1,
                    self.max_retries
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            if reply.status != 200 {
                log::error!("Gemini returned status {}", reply.status);
                return Err(StudioError::RemoteError(reply.body));
            }

            return extract_image(&reply.body);
        }

        Err(StudioError::RetriesExhausted)
    }
}

/// Assemble `{ contents: [ { parts: [...] } ] }` with the instruction first
/// and each image as an inlineData part, in caller order.
fn build_envelope(instruction: &str, images: &[ImagePart]) -> Value {
    let mut parts = vec![json!({ "text": instruction })];
    for image in images {
        parts.push(json!({
            "inlineData": {
                "data": STANDARD.encode(&image.bytes),
                "mimeType": image.media_type,
            }
        }));
    }
    json!({ "contents": [{ "parts": parts }] })
}

/// Scan the first candidate's parts for inline image data. The declared
/// media type defaults to `image/png` when absent.
fn extract_image(body: &str) -> Result<GeneratedImage> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| StudioError::ResponseError(format!("Unparseable Gemini response: {}", e)))?;

    let parts = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .unwrap_or_default();

    for part in parts {
        if let Some(inline) = part.inline_data {
            let bytes = STANDARD.decode(inline.data.as_bytes()).map_err(|e| {
                StudioError::ResponseError(format!("Invalid base64 image data: {}", e))
            })?;
            let media_type = inline.mime_type.unwrap_or_else(|| "image/png".to_string());
            return Ok(GeneratedImage { bytes, media_type });
        }
    }

    Err(StudioError::NoImageReturned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::transport::TransportReply;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedTransport {
        replies: Mutex<VecDeque<TransportReply>>,
        requests: Mutex<Vec<Value>>,
    }

    impl ScriptedTransport {
        fn new(replies: Vec<TransportReply>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn request(&self, index: usize) -> Value {
            self.requests.lock().unwrap()[index].clone()
        }
    }

    #[async_trait]
    impl GenerateTransport for ScriptedTransport {
        async fn send(&self, payload: &Value) -> Result<TransportReply> {
            self.requests.lock().unwrap().push(payload.clone());
            Ok(self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("transport received more requests than scripted"))
        }
    }

    fn reply(status: u16, body: &str) -> TransportReply {
        TransportReply {
            status,
            body: body.to_string(),
        }
    }

    fn image_reply(data: &[u8], mime: Option<&str>) -> TransportReply {
        let mut inline = json!({ "data": STANDARD.encode(data) });
        if let Some(mime) = mime {
            inline["mimeType"] = json!(mime);
        }
        let body = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "sure, here it is" },
                        { "inlineData": inline }
                    ]
                }
            }]
        });
        reply(200, &body.to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_retries_follow_the_backoff_schedule() {
        let transport = ScriptedTransport::new(vec![
            reply(429, "quota exceeded"),
            reply(429, "quota exceeded"),
            reply(429, "quota exceeded"),
        ]);
        let client = ImageClient::new(transport.clone(), 2, 2.0);

        let start = tokio::time::Instant::now();
        let err = client.generate("draw a duck", &[]).await.unwrap_err();

        // attempts 0 and 1 sleep 2^0 and 2^1 seconds; attempt 2 fails fast
        assert_eq!(transport.request_count(), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(3));
        assert!(matches!(err, StudioError::RateLimited(ref body) if body == "quota exceeded"));
        assert_eq!(err.reason(), "quota exceeded");
    }

    #[tokio::test(start_paused = true)]
    async fn success_after_a_single_rate_limit() {
        let transport = ScriptedTransport::new(vec![
            reply(429, "slow down"),
            image_reply(b"pixels", Some("image/jpeg")),
        ]);
        let client = ImageClient::new(transport.clone(), 3, 1.5);

        let start = tokio::time::Instant::now();
        let image = client.generate("draw a duck", &[]).await.unwrap();

        assert_eq!(transport.request_count(), 2);
        assert_eq!(start.elapsed(), Duration::from_secs(1));
        assert_eq!(image.bytes, b"pixels");
        assert_eq!(image.media_type, "image/jpeg");
    }

    #[tokio::test]
    async fn hard_failures_are_not_retried() {
        let transport = ScriptedTransport::new(vec![reply(500, "internal error body")]);
        let client = ImageClient::new(transport.clone(), 3, 1.5);

        let err = client.generate("draw a duck", &[]).await.unwrap_err();

        assert_eq!(transport.request_count(), 1);
        assert!(matches!(err, StudioError::RemoteError(_)));
        assert_eq!(err.reason(), "internal error body");
    }

    #[tokio::test]
    async fn missing_mime_type_defaults_to_png() {
        let transport = ScriptedTransport::new(vec![image_reply(b"raw", None)]);
        let client = ImageClient::new(transport, 3, 1.5);

        let image = client.generate("draw", &[]).await.unwrap();
        assert_eq!(image.media_type, "image/png");
        assert_eq!(image.bytes, b"raw");
    }

    #[tokio::test]
    async fn response_without_inline_image_is_a_failure() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "no can do" }] } }]
        });
        let transport = ScriptedTransport::new(vec![reply(200, &body.to_string())]);
        let client = ImageClient::new(transport, 3, 1.5);

        let err = client.generate("draw", &[]).await.unwrap_err();
        assert!(matches!(err, StudioError::NoImageReturned));
        assert_eq!(err.reason(), "No image returned");
    }

    #[tokio::test]
    async fn empty_candidate_list_is_a_failure() {
        let transport = ScriptedTransport::new(vec![reply(200, r#"{"candidates": []}"#)]);
        let client = ImageClient::new(transport, 3, 1.5);

        let err = client.generate("draw", &[]).await.unwrap_err();
        assert!(matches!(err, StudioError::NoImageReturned));
    }

    #[tokio::test]
    async fn envelope_places_instruction_first_and_preserves_image_order() {
        let transport = ScriptedTransport::new(vec![image_reply(b"out", None)]);
        let client = ImageClient::new(transport.clone(), 0, 1.5);

        let first = ImagePart::new(vec![1, 2, 3], "image/png");
        let second = ImagePart::new(vec![4, 5], "image/webp");
        client
            .generate("blend these", &[first.clone(), second.clone()])
            .await
            .unwrap();

        let envelope = transport.request(0);
        let parts = envelope["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0]["text"], "blend these");
        assert_eq!(parts[1]["inlineData"]["data"], STANDARD.encode(&first.bytes));
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(
            parts[2]["inlineData"]["data"],
            STANDARD.encode(&second.bytes)
        );
        assert_eq!(parts[2]["inlineData"]["mimeType"], "image/webp");
    }

    /// Echoes the first inline image of the request back as the response,
    /// exercising the full encode/decode path.
    struct EchoTransport;

    #[async_trait]
    impl GenerateTransport for EchoTransport {
        async fn send(&self, payload: &Value) -> Result<TransportReply> {
            let inline = payload["contents"][0]["parts"]
                .as_array()
                .unwrap()
                .iter()
                .find_map(|part| part.get("inlineData"))
                .cloned()
                .expect("request carried no inline image");
            let body = json!({
                "candidates": [{ "content": { "parts": [{ "inlineData": inline }] } }]
            });
            Ok(TransportReply {
                status: 200,
                body: body.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn image_round_trips_through_the_envelope() {
        let client = ImageClient::new(Arc::new(EchoTransport), 0, 1.5);
        let part = ImagePart::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg");

        let out = client.generate("echo", &[part.clone()]).await.unwrap();

        assert_eq!(out.bytes, part.bytes);
        assert_eq!(out.media_type, part.media_type);
    }
}
