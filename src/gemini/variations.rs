use crate::models::{GeneratedImage, ImagePart};

use super::image_client::ImageClient;

/// Derives a bounded number of instruction variants from a rotating hint
/// list and issues one call per variant, sequentially. Failures are absorbed
/// per variation; the batch keeps only successes, in call order.
#[derive(Debug, Clone)]
pub struct VariationPlanner {
    default_count: u32,
    hard_cap: u32,
}

impl VariationPlanner {
    pub fn new(default_count: u32, hard_cap: u32) -> Self {
        Self {
            default_count,
            hard_cap: hard_cap.max(1),
        }
    }

    /// A missing or zero request falls back to the default; the result is
    /// clamped to `[1, hard_cap]`.
    pub fn resolve_count(&self, requested: Option<u32>) -> u32 {
        let target = match requested {
            Some(n) if n > 0 => n,
            _ => self.default_count,
        };
        target.clamp(1, self.hard_cap)
    }

    /// Instruction text for variation `index`:
    /// `"{base} Variation {index+1}: {hint}."` plus `" User: {text}"` when
    /// the trimmed user text is non-empty.
    pub fn instruction(
        base_instruction: &str,
        index: u32,
        hint: &str,
        user_text: Option<&str>,
    ) -> String {
        let mut full = format!("{} Variation {}: {}.", base_instruction, index + 1, hint);
        if let Some(user) = user_text {
            let user = user.trim();
            if !user.is_empty() {
                full.push_str(&format!(" User: {}", user));
            }
        }
        full
    }

    pub async fn run(
        &self,
        client: &ImageClient,
        base_instruction: &str,
        user_text: Option<&str>,
        images: &[ImagePart],
        requested: Option<u32>,
        hints: &[&str],
    ) -> Vec<GeneratedImage> {
        let count = self.resolve_count(requested);
        log::info!("Planning {} variation(s)", count);

        let mut results = Vec::new();
        for index in 0..count {
            let hint = hints[index as usize % hints.len()];
            let instruction = Self::instruction(base_instruction, index, hint, user_text);
            match client.generate(&instruction, images).await {
                Ok(image) => results.push(image),
                Err(e) => log::warn!("Variation {} failed: {}", index + 1, e),
            }
        }

        log::info!(
            "Variation batch complete: {}/{} call(s) succeeded",
            results.len(),
            count
        );
        results
    }
}
