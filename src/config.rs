use std::env;

pub const DEFAULT_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-image-preview:generateContent";

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_BASE: f64 = 1.5;
pub const DEFAULT_MAX_VARIATIONS: u32 = 3;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub max_retries: u32,
    pub backoff_base: f64,
}

#[derive(Debug, Clone)]
pub struct VariationConfig {
    pub max_ad_variations: u32,
    pub max_scene_variations: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: Option<u16>,
    pub gemini: GeminiConfig,
    pub variations: VariationConfig,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base: DEFAULT_BACKOFF_BASE,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY").ok();
        let api_url = env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let max_retries = env::var("GEMINI_MAX_RETRIES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_RETRIES);
        let backoff_base = env::var("GEMINI_BACKOFF_BASE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_BACKOFF_BASE);

        GeminiConfig {
            api_key,
            api_url,
            max_retries,
            backoff_base,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base: f64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base = backoff_base;
        self
    }
}

impl Default for VariationConfig {
    fn default() -> Self {
        VariationConfig {
            max_ad_variations: DEFAULT_MAX_VARIATIONS,
            max_scene_variations: DEFAULT_MAX_VARIATIONS,
        }
    }
}

impl VariationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let max_ad_variations = env::var("MAX_AD_VARIATIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_VARIATIONS);
        let max_scene_variations = env::var("MAX_SCENE_VARIATIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_VARIATIONS);

        VariationConfig {
            max_ad_variations,
            max_scene_variations,
        }
    }

    pub fn with_ad_cap(mut self, cap: u32) -> Self {
        self.max_ad_variations = cap;
        self
    }

    pub fn with_scene_cap(mut self, cap: u32) -> Self {
        self.max_scene_variations = cap;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: None,
            gemini: GeminiConfig::default(),
            variations: VariationConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());

        Config {
            port,
            gemini: GeminiConfig::from_env(),
            variations: VariationConfig::from_env(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = config;
        self
    }

    pub fn with_variations(mut self, config: VariationConfig) -> Self {
        self.variations = config;
        self
    }
}
