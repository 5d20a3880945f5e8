use std::time::Duration;

use anyhow::{anyhow, Result};
use assistant_common::{define_module_client, env_or, ModuleClient};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodFeature {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Recurrent network flavour of the stock price model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockModel {
    Lstm,
    Gru,
}

impl StockModel {
    /// Case-insensitive; anything but `LSTM` selects GRU.
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(str::to_uppercase).as_deref() {
            Some("LSTM") => StockModel::Lstm,
            _ => StockModel::Gru,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockModel::Lstm => "lstm",
            StockModel::Gru => "gru",
        }
    }
}

#[derive(Debug, Serialize)]
struct PredictRequest<T: Serialize> {
    instances: T,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    predictions: Vec<Value>,
}

/// HTTP handle on the model server.
#[derive(Debug, Clone)]
pub struct InferenceEndpoint {
    http: Client,
    base_url: String,
}

impl InferenceEndpoint {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("Failed to build inference http client: {}", e))?;
        Ok(Self { http, base_url: base_url.into().trim_end_matches('/').to_string() })
    }

    fn from_env() -> Result<Self> {
        let base_url = std::env::var("INFERENCE_BASE_URL")
            .map_err(|_| anyhow!("INFERENCE_BASE_URL environment variable not set"))?;
        let timeout_secs = env_or("INFERENCE_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|_| anyhow!("INFERENCE_TIMEOUT_SECS must be a number of seconds"))?;
        Self::new(base_url, Duration::from_secs(timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

define_module_client! {
    (struct InferenceClient, "inference")
    client_type: InferenceEndpoint,
    env: ["INFERENCE_BASE_URL"],
    setup: async {
        InferenceEndpoint::from_env()
    }
}

impl InferenceClient {
    async fn predict<T: Serialize>(&self, model: &str, instances: T) -> Result<Vec<Value>> {
        let endpoint = self.get_client();
        let url = format!("{}/v1/models/{}/predict", endpoint.base_url, model);

        let response = endpoint
            .http
            .post(&url)
            .json(&PredictRequest { instances })
            .send()
            .await
            .map_err(|e| anyhow!("Failed to send predict request to {}: {}", url, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!("Predict request to {} failed with status {}: {}", url, status, text));
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to decode predict response from {}: {}", url, e))?;
        tracing::debug!("[InferenceClient::predict] {} returned {} predictions", model, body.predictions.len());
        Ok(body.predictions)
    }

    /// Food class predicted by `model` from a single `[name, description, category]` row.
    pub async fn predict_food(&self, model: &str, feature: &FoodFeature) -> Result<String> {
        let row = [Some(feature.name.as_str()), feature.description.as_deref(), feature.category.as_deref()];
        let predictions = self.predict(model, [row]).await?;

        match predictions.into_iter().next() {
            Some(Value::String(label)) => Ok(label),
            Some(other) => Ok(other.to_string()),
            None => Err(anyhow!("Model {} returned no prediction", model)),
        }
    }

    /// Next-price prediction for a `(n, 1)` column of prices.
    pub async fn predict_stock(&self, model: StockModel, prices: &[f64]) -> Result<Vec<f64>> {
        let column: Vec<[f64; 1]> = prices.iter().map(|price| [*price]).collect();
        let predictions = self.predict(model.as_str(), column).await?;

        let mut values = Vec::with_capacity(predictions.len());
        for prediction in predictions {
            flatten_numbers(&prediction, &mut values)?;
        }
        Ok(values)
    }
}

fn flatten_numbers(value: &Value, out: &mut Vec<f64>) -> Result<()> {
    match value {
        Value::Number(n) => {
            out.push(n.as_f64().ok_or_else(|| anyhow!("Prediction {} is not a float", n))?);
            Ok(())
        }
        Value::Array(items) => items.iter().try_for_each(|item| flatten_numbers(item, out)),
        other => Err(anyhow!("Unexpected prediction value {}", other)),
    }
}
