//! Server configuration, read from the environment at startup.

use std::env;

/// Runtime configuration shared with the request handlers as `web::Data`.
///
/// The provider API key is deliberately NOT captured here: it is read from
/// the environment on every generation call through the `Credentials` trait,
/// so a rotated key takes effect without a restart.
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base URL of the generative API, e.g.
    /// `https://generativelanguage.googleapis.com/v1beta`.
    pub api_base: String,
    /// Model used for image generation.
    pub image_model: String,
    /// Model used for detailed-prompt generation.
    pub text_model: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("GURU_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("GURU_PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(8080),
            api_base: env::var("GURU_API_BASE")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            image_model: env::var("GURU_IMAGE_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash-preview-image-generation".to_string()),
            text_model: env::var("GURU_TEXT_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_environment() {
        let config = Config::from_env();
        assert!(!config.api_base.is_empty());
        assert!(!config.image_model.is_empty());
        assert!(config.port > 0);
    }
}
