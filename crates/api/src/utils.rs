use assistant_common::env_or;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing_subscriber::EnvFilter;

use crate::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

impl LogFormat {
    /// `APP_LOG_FORMAT_MODE`: `text` for human readable lines, JSON otherwise.
    pub fn from_env() -> Self {
        match env_or("APP_LOG_FORMAT_MODE", "json").to_lowercase().as_str() {
            "text" => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }
}

fn env_filter() -> EnvFilter {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_or("DEBUG_SQL", "false").eq_ignore_ascii_case("true") {
        if let Ok(directive) = "sqlx=debug".parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

pub fn setup_tracing() {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());
    let result = match LogFormat::from_env() {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    if let Err(e) = result {
        eprintln!("tracing subscriber already set: {e}");
    }
}

pub fn cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("[cors_layer] Ignoring invalid origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::POST, Method::GET])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// `{:.16E}` with an explicit exponent sign, e.g. `1.8015000000000001E+1`.
/// Zero keeps its sixteen fractional zeros in the exponent: `0.0000000000000000E+16`.
pub fn scientific_notation(value: f64) -> String {
    let formatted = format!("{value:.16E}");
    match formatted.split_once('E') {
        Some((mantissa, _)) if value == 0.0 => format!("{mantissa}E+16"),
        Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}E+{exponent}"),
        _ => formatted,
    }
}
