use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::Result,
    gemini::VariationPlanner,
    models::{ErrorResponse, GeneratedImage, ImageResponse, VariationResponse},
    prompts::{self, Mode},
};

use super::{
    upload::{FormError, UploadForm},
    AppState,
};

/// `/merge_images` keeps at most this many uploads; extras are ignored.
const MERGE_IMAGE_LIMIT: usize = 5;

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "banana-studio",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> std::result::Result<Response, FormError> {
    let form = UploadForm::read(multipart).await?;
    let prompt = form.require_text("prompt")?;

    let request_id = Uuid::new_v4();
    log::info!("[{}] /generate prompt_len={}", request_id, prompt.len());

    let directive = prompts::pick_directive(Mode::GenerateImage);
    let instruction = prompts::join_instruction(directive, prompt);

    Ok(single_response(
        request_id,
        state.client.image().generate(&instruction, &[]).await,
    ))
}

pub async fn edit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> std::result::Result<Response, FormError> {
    let form = UploadForm::read(multipart).await?;
    let prompt = form.require_text("prompt")?;
    let file = form.require_image("file")?;

    let request_id = Uuid::new_v4();
    log::info!("[{}] /edit mime={}", request_id, file.media_type);

    let directive = prompts::pick_directive(Mode::EditImage);
    let instruction = prompts::join_instruction(directive, prompt);

    Ok(single_response(
        request_id,
        state.client.image().generate(&instruction, &[file]).await,
    ))
}

pub async fn virtual_try_on(
    State(state): State<AppState>,
    multipart: Multipart,
) -> std::result::Result<Response, FormError> {
    let form = UploadForm::read(multipart).await?;
    let product = form.require_image("product")?;
    let person = form.require_image("person")?;

    let request_id = Uuid::new_v4();
    log::info!("[{}] /virtual_try_on", request_id);

    let directive = prompts::pick_directive(Mode::VirtualTryOn);
    let instruction = prompts::join_instruction(directive, form.text("prompt").unwrap_or(""));

    // product first, then person; the model reads the order
    Ok(single_response(
        request_id,
        state
            .client
            .image()
            .generate(&instruction, &[product, person])
            .await,
    ))
}

pub async fn create_ads(
    State(state): State<AppState>,
    multipart: Multipart,
) -> std::result::Result<Response, FormError> {
    let form = UploadForm::read(multipart).await?;
    let model = form.require_image("model")?;
    let product = form.require_image("product")?;
    let requested = form.variation_count();

    let request_id = Uuid::new_v4();
    log::info!("[{}] /create_ads requested={:?}", request_id, requested);

    let planner = VariationPlanner::new(
        state.variations.max_ad_variations,
        state.variations.max_ad_variations,
    );
    let results = planner
        .run(
            state.client.image(),
            Mode::CreateAds.directives()[0],
            form.text("prompt"),
            &[model, product],
            requested,
            prompts::AD_STYLE_HINTS,
        )
        .await;

    Ok(batch_response(request_id, results))
}

pub async fn merge_images(
    State(state): State<AppState>,
    multipart: Multipart,
) -> std::result::Result<Response, FormError> {
    let form = UploadForm::read(multipart).await?;
    let mut files = form.images_named("files");
    if files.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Missing 'files'".to_string()));
    }
    files.truncate(MERGE_IMAGE_LIMIT);

    let request_id = Uuid::new_v4();
    log::info!("[{}] /merge_images count={}", request_id, files.len());

    let directive = prompts::pick_directive(Mode::MergeImages);
    let instruction = prompts::join_instruction(directive, form.text("prompt").unwrap_or(""));

    Ok(single_response(
        request_id,
        state.client.image().generate(&instruction, &files).await,
    ))
}

pub async fn generate_scenes(
    State(state): State<AppState>,
    multipart: Multipart,
) -> std::result::Result<Response, FormError> {
    let form = UploadForm::read(multipart).await?;
    let scene = form.require_image("scene")?;
    let requested = form.variation_count();

    let request_id = Uuid::new_v4();
    log::info!("[{}] /generate_scenes requested={:?}", request_id, requested);

    let planner = VariationPlanner::new(
        state.variations.max_scene_variations,
        state.variations.max_scene_variations,
    );
    let results = planner
        .run(
            state.client.image(),
            Mode::GenerateScenes.directives()[0],
            form.text("prompt"),
            &[scene],
            requested,
            prompts::SCENE_STYLE_HINTS,
        )
        .await;

    Ok(batch_response(request_id, results))
}

pub async fn restore_old_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> std::result::Result<Response, FormError> {
    let form = UploadForm::read(multipart).await?;
    let file = form.require_image("file")?;

    let request_id = Uuid::new_v4();
    log::info!("[{}] /restore_old_image mime={}", request_id, file.media_type);

    let directive = prompts::pick_directive(Mode::RestoreOldImage);
    let instruction = prompts::join_instruction(directive, form.text("prompt").unwrap_or(""));

    Ok(single_response(
        request_id,
        state.client.image().generate(&instruction, &[file]).await,
    ))
}

/// Single-output contract: 200 with `{image, mime}` on success, 500 with
/// the unmodified failure reason otherwise.
fn single_response(request_id: Uuid, result: Result<GeneratedImage>) -> Response {
    match result {
        Ok(image) => {
            log::info!("[{}] success mime={}", request_id, image.media_type);
            (StatusCode::OK, Json(ImageResponse::from(image))).into_response()
        }
        Err(e) => {
            log::error!("[{}] Gemini call failed: {}", request_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: e.reason() }),
            )
                .into_response()
        }
    }
}

/// Batch contract: always 200, carrying whichever variations succeeded.
fn batch_response(request_id: Uuid, results: Vec<GeneratedImage>) -> Response {
    log::info!("[{}] batch size={}", request_id, results.len());
    (StatusCode::OK, Json(VariationResponse::new(results))).into_response()
}
