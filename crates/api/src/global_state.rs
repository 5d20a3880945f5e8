use std::sync::Arc;

use anyhow::Result;
use assistant_clients::{InferenceClient, PostgresClient};
use assistant_common::{EnvVars, ModuleClient};

use crate::Settings;

#[derive(Clone)]
pub struct GlobalState {
    pub settings: Arc<Settings>,
    pub db: PostgresClient,
    pub inference: InferenceClient,
}

impl GlobalState {
    pub async fn new() -> Result<Self> {
        let settings = Arc::new(Settings::load());
        let db = PostgresClient::setup_connection().await?;
        let inference = InferenceClient::setup_connection().await?;

        assistant_database::db_version(db.pool()).await?;

        Ok(Self { settings, db, inference })
    }
}
