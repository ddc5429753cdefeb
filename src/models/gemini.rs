use serde::Deserialize;

/// Wire shape of a `generateContent` response. Only the fields the image
/// extraction path reads are modeled; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

/// A response part is either plain text or an inline image; both fields are
/// optional so unknown part kinds deserialize as neither.
#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
    #[serde(rename = "inlineData")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
pub struct InlineData {
    pub data: String,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mixed_text_and_image_parts() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "here you go"},
                        {"inlineData": {"data": "aGVsbG8=", "mimeType": "image/jpeg"}}
                    ]
                }
            }]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let parts = &parsed.candidates[0].content.as_ref().unwrap().parts;
        assert_eq!(parts[0].text.as_deref(), Some("here you go"));
        let inline = parts[1].inline_data.as_ref().unwrap();
        assert_eq!(inline.data, "aGVsbG8=");
        assert_eq!(inline.mime_type.as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn tolerates_missing_candidates_and_mime_type() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());

        let body = r#"{"candidates": [{"content": {"parts": [{"inlineData": {"data": "QQ=="}}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let inline = parsed.candidates[0].content.as_ref().unwrap().parts[0]
            .inline_data
            .as_ref()
            .unwrap();
        assert!(inline.mime_type.is_none());
    }
}
