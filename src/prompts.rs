//! Static instruction tables for the seven studio modes.
//!
//! Each mode maps to an ordered set of system directives. Single-output
//! endpoints pick one directive (uniformly at random when a mode defines
//! several); multi-variation endpoints use the first directive and append a
//! rotating style hint per variation.

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    GenerateImage,
    EditImage,
    VirtualTryOn,
    CreateAds,
    MergeImages,
    GenerateScenes,
    RestoreOldImage,
}

pub const ALL_MODES: &[Mode] = &[
    Mode::GenerateImage,
    Mode::EditImage,
    Mode::VirtualTryOn,
    Mode::CreateAds,
    Mode::MergeImages,
    Mode::GenerateScenes,
    Mode::RestoreOldImage,
];

const GENERATE_IMAGE: &[&str] = &[
    "SYSTEM: Generate a high-quality image based on the appended user prompt. Maintain clarity, coherent lighting, clean composition, and omit all textual overlays or watermarks.",
];

const EDIT_IMAGE: &[&str] = &[
    "SYSTEM: Apply non-destructive visual transformations guided by the appended user prompt while preserving subject identity, proportions, and core composition. Avoid artifacts, over-saturation, or unintended style drift.",
];

const VIRTUAL_TRY_ON: &[&str] = &[
    "SYSTEM: Perform realistic virtual try-on by blending the product image onto the person image. Maintain anatomical correctness, natural fabric behavior, consistent lighting, and seamless color integration. No distortions or added accessories.",
];

const CREATE_ADS: &[&str] = &[
    "SYSTEM: Produce professional advertisement imagery combining the model and product. Each generation should feel like a distinct ad concept while keeping the product clearly legible, composition balanced, and free of textual elements or logos.",
];

const MERGE_IMAGES: &[&str] = &[
    "SYSTEM: Merge all provided images into a single coherent output guided by the user prompt. Unify perspective, color temperature, exposure, and shadow logic; remove redundancies; avoid frames, borders, or extraneous artifacts.",
];

const GENERATE_SCENES: &[&str] = &[
    "SYSTEM: Generate extended or reinterpreted scene outputs derived from the uploaded image and optional user prompt. Preserve spatial coherence, plausible lighting, and material consistency while allowing creative environmental variation.",
];

const RESTORE_OLD_IMAGE: &[&str] = &[
    "SYSTEM: Restore the uploaded aged or damaged image. Remove scratches, noise, stains, and fading while preserving authentic detail, texture, and historical integrity. No stylistic modernization beyond faithful clarity recovery.",
];

/// Style hints rotated through by the ad-variation endpoint.
pub const AD_STYLE_HINTS: &[&str] = &[
    "lifestyle angle",
    "dramatic lighting",
    "portrait social feed style",
    "product-forward macro",
    "cinematic depth",
    "high contrast poster feel",
    "minimal negative space layout",
    "moody editorial",
    "bright commercial",
    "subtle neutral studio",
];

/// Style hints rotated through by the scene-extension endpoint.
pub const SCENE_STYLE_HINTS: &[&str] = &[
    "wide cinematic extension",
    "dawn atmosphere",
    "midday clarity",
    "night / blue hour mood",
    "stylized painterly reinterpretation",
    "foggy ambient variant",
    "high contrast sunset",
    "rainy ambience",
    "snowy transformation",
    "minimal desaturated look",
];

impl Mode {
    pub fn key(&self) -> &'static str {
        match self {
            Mode::GenerateImage => "generate_image",
            Mode::EditImage => "edit_image",
            Mode::VirtualTryOn => "virtual_try_on",
            Mode::CreateAds => "create_ads",
            Mode::MergeImages => "merge_images",
            Mode::GenerateScenes => "generate_scenes",
            Mode::RestoreOldImage => "restore_old_image",
        }
    }

    pub fn directives(&self) -> &'static [&'static str] {
        match self {
            Mode::GenerateImage => GENERATE_IMAGE,
            Mode::EditImage => EDIT_IMAGE,
            Mode::VirtualTryOn => VIRTUAL_TRY_ON,
            Mode::CreateAds => CREATE_ADS,
            Mode::MergeImages => MERGE_IMAGES,
            Mode::GenerateScenes => GENERATE_SCENES,
            Mode::RestoreOldImage => RESTORE_OLD_IMAGE,
        }
    }
}

/// Select a system directive for a mode. Uniform random choice when a mode
/// defines more than one; the sole element otherwise.
pub fn pick_directive(mode: Mode) -> &'static str {
    let set = mode.directives();
    if set.len() > 1 {
        set[rand::thread_rng().gen_range(0..set.len())]
    } else {
        set[0]
    }
}

/// Prefix the user's free text with a system directive, trimming stray
/// whitespace when the user text is empty.
pub fn join_instruction(directive: &str, user_text: &str) -> String {
    format!("{} {}", directive, user_text.trim())
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_has_at_least_one_directive() {
        for mode in ALL_MODES {
            assert!(
                !mode.directives().is_empty(),
                "mode {} has no directives",
                mode.key()
            );
            assert!(mode.directives()[0].starts_with("SYSTEM:"));
        }
    }

    #[test]
    fn single_directive_modes_pick_deterministically() {
        for mode in ALL_MODES {
            assert_eq!(pick_directive(*mode), mode.directives()[0]);
        }
    }

    #[test]
    fn hint_lists_cover_ten_styles() {
        assert_eq!(AD_STYLE_HINTS.len(), 10);
        assert_eq!(SCENE_STYLE_HINTS.len(), 10);
    }

    #[test]
    fn join_instruction_trims_empty_user_text() {
        assert_eq!(join_instruction("SYSTEM: x.", ""), "SYSTEM: x.");
        assert_eq!(
            join_instruction("SYSTEM: x.", "  add a hat  "),
            "SYSTEM: x. add a hat"
        );
    }
}
