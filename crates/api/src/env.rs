use std::collections::BTreeSet;

use assistant_common::{env_or, EnvVars};

pub struct Settings {
    pub app_name: String,
    pub version: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    /// Model names the food predictor accepts.
    pub food_models: BTreeSet<String>,
}

impl Settings {
    pub const DEFAULT_PORT: u16 = 3033;

    pub fn supports_food_model(&self, model: &str) -> bool {
        self.food_models.contains(model)
    }
}

fn comma_separated(value: &str) -> impl Iterator<Item = String> + '_ {
    value.split(',').map(str::trim).filter(|item| !item.is_empty()).map(str::to_string)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "assistant".to_string(),
            version: "1.0".to_string(),
            port: Self::DEFAULT_PORT,
            cors_origins: vec!["http://localhost".to_string(), "http://localhost:5173".to_string()],
            food_models: BTreeSet::from(["foodb-3feat".to_string()]),
        }
    }
}

impl EnvVars for Settings {
    fn load() -> Self {
        let defaults = Self::default();
        Self {
            app_name: env_or("APP_NAME", &defaults.app_name),
            version: env_or("APP_VERSION", &defaults.version),
            port: std::env::var("PORT").ok().and_then(|port| port.parse().ok()).unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|origins| comma_separated(&origins).collect())
                .unwrap_or(defaults.cors_origins),
            food_models: std::env::var("FOOD_ML_MODELS")
                .map(|models| comma_separated(&models).collect())
                .unwrap_or(defaults.food_models),
        }
    }

    fn get_env_var(&self, key: &str) -> Option<String> {
        match key {
            "APP_NAME" => Some(self.app_name.clone()),
            "APP_VERSION" => Some(self.version.clone()),
            "PORT" => Some(self.port.to_string()),
            "CORS_ORIGINS" => Some(self.cors_origins.join(",")),
            "FOOD_ML_MODELS" => Some(self.food_models.iter().cloned().collect::<Vec<_>>().join(",")),
            _ => None,
        }
    }
}
