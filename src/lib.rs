pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod prompts;
pub mod server;

pub use config::{Config, GeminiConfig, VariationConfig};
pub use error::{Result, StudioError};
pub use gemini::{GeminiClient, ImageClient, VariationPlanner};
pub use models::{GeneratedImage, ImagePart};
pub use prompts::Mode;
