use std::collections::HashMap;

use axum::extract::Multipart;
use axum::http::StatusCode;

use crate::models::ImagePart;

/// A fully drained multipart form: uploaded images keyed by field name (in
/// upload order) plus plain text fields. Uploads with no declared content
/// type default to `image/png`.
pub struct UploadForm {
    images: Vec<(String, ImagePart)>,
    fields: HashMap<String, String>,
}

pub type FormError = (StatusCode, String);

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, FormError> {
        let mut images = Vec::new();
        let mut fields = HashMap::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| bad_request(format!("Multipart error: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if field.file_name().is_some() {
                let media_type = field.content_type().unwrap_or("image/png").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read '{}': {}", name, e)))?;
                images.push((name, ImagePart::new(data.to_vec(), media_type)));
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read '{}': {}", name, e)))?;
                fields.insert(name, value);
            }
        }

        Ok(Self { images, fields })
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn require_text(&self, name: &str) -> Result<&str, FormError> {
        self.text(name)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| bad_request(format!("Missing '{}'", name)))
    }

    /// The caller-requested variation count, when parseable. Unparseable
    /// values are treated as absent.
    pub fn variation_count(&self) -> Option<u32> {
        self.text("variations")
            .and_then(|value| value.trim().parse().ok())
    }

    pub fn require_image(&self, name: &str) -> Result<ImagePart, FormError> {
        self.images
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, image)| image.clone())
            .ok_or_else(|| bad_request(format!("Missing '{}'", name)))
    }

    /// All uploads under a repeated field name, in upload order.
    pub fn images_named(&self, name: &str) -> Vec<ImagePart> {
        self.images
            .iter()
            .filter(|(field, _)| field == name)
            .map(|(_, image)| image.clone())
            .collect()
    }
}

fn bad_request(message: String) -> FormError {
    (StatusCode::BAD_REQUEST, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(images: Vec<(&str, ImagePart)>, fields: Vec<(&str, &str)>) -> UploadForm {
        UploadForm {
            images: images
                .into_iter()
                .map(|(name, image)| (name.to_string(), image))
                .collect(),
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn require_text_rejects_missing_and_blank_fields() {
        let form = form_with(vec![], vec![("prompt", "   ")]);
        assert!(form.require_text("prompt").is_err());
        assert!(form.require_text("other").is_err());

        let form = form_with(vec![], vec![("prompt", "a red fox")]);
        assert_eq!(form.require_text("prompt").unwrap(), "a red fox");
    }

    #[test]
    fn variation_count_ignores_garbage() {
        let form = form_with(vec![], vec![("variations", "2")]);
        assert_eq!(form.variation_count(), Some(2));

        let form = form_with(vec![], vec![("variations", "lots")]);
        assert_eq!(form.variation_count(), None);

        let form = form_with(vec![], vec![]);
        assert_eq!(form.variation_count(), None);
    }

    #[test]
    fn images_named_preserves_upload_order() {
        let form = form_with(
            vec![
                ("files", ImagePart::new(vec![1], "image/png")),
                ("other", ImagePart::new(vec![2], "image/png")),
                ("files", ImagePart::new(vec![3], "image/jpeg")),
            ],
            vec![],
        );
        let files = form.images_named("files");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].bytes, vec![1]);
        assert_eq!(files[1].bytes, vec![3]);
        assert!(form.require_image("other").is_ok());
        assert!(form.require_image("missing").is_err());
    }
}
