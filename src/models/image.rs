use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

/// One inline image attached to an outbound request. Immutable once built;
/// produced by decoding an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

impl ImagePart {
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            bytes,
            media_type: media_type.into(),
        }
    }
}

/// A decoded image extracted from a Gemini response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

/// Single-image response body: `{"image": <base64>, "mime": <type>}`.
#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub image: String,
    pub mime: String,
}

impl From<GeneratedImage> for ImageResponse {
    fn from(image: GeneratedImage) -> Self {
        ImageResponse {
            image: STANDARD.encode(&image.bytes),
            mime: image.media_type,
        }
    }
}

/// Batch response body for the multi-variation endpoints. An empty result
/// list is a valid, non-error outcome.
#[derive(Debug, Serialize)]
pub struct VariationResponse {
    pub results: Vec<ImageResponse>,
}

impl VariationResponse {
    pub fn new(images: Vec<GeneratedImage>) -> Self {
        VariationResponse {
            results: images.into_iter().map(ImageResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_response_encodes_bytes_as_base64() {
        let generated = GeneratedImage {
            bytes: vec![0x89, 0x50, 0x4E, 0x47],
            media_type: "image/png".to_string(),
        };
        let response = ImageResponse::from(generated);
        assert_eq!(response.image, STANDARD.encode([0x89, 0x50, 0x4E, 0x47]));
        assert_eq!(response.mime, "image/png");
    }
}
