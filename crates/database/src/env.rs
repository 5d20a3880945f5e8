use std::env;

use assistant_common::EnvVars;

pub struct DatabaseEnv {
    pub document_embedding_db_url: Option<String>,
    pub max_connections: u32,
}

impl DatabaseEnv {
    pub const DB_URL_KEY: &'static str = "DOCUMENT_EMBEDDING_DB_URL";
    pub const MAX_CONNECTIONS_KEY: &'static str = "DOCUMENT_EMBEDDING_DB_MAX_CONNECTIONS";
}

impl EnvVars for DatabaseEnv {
    fn load() -> Self {
        Self {
            document_embedding_db_url: env::var(Self::DB_URL_KEY).ok(),
            max_connections: env::var(Self::MAX_CONNECTIONS_KEY)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    fn get_env_var(&self, key: &str) -> Option<String> {
        match key {
            Self::DB_URL_KEY => self.document_embedding_db_url.clone(),
            Self::MAX_CONNECTIONS_KEY => Some(self.max_connections.to_string()),
            _ => None,
        }
    }
}
