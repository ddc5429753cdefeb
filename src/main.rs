use banana_studio::{
    config::Config,
    gemini::GeminiClient,
    logger,
    server::{self, AppState},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file first
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    logger::init_with_config(logger::LoggerConfig::development())?;

    let config = Config::from_env();
    logger::log_config_info(&config);

    // Fails fast when GEMINI_API_KEY is absent
    let client = match GeminiClient::new(config.gemini.clone()) {
        Ok(client) => {
            log::info!("✅ Gemini client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize Gemini client: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState {
        client,
        variations: config.variations.clone(),
    };
    let app = server::router(state);

    let port = config.port.unwrap_or(8000);
    logger::log_startup_info("banana-studio", env!("CARGO_PKG_VERSION"), port);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
