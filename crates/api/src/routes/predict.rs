use anyhow::anyhow;
use assistant_clients::{FoodFeature, StockModel};
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::response::{AppError, ErrorCode};
use crate::GlobalState;

pub fn predict_routes() -> Router<GlobalState> {
    Router::new()
        .route("/api/v1/chemistry/ml/food/predict", post(predict_food))
        .route("/api/v1/finance/stock/predict", post(predict_stock))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodFeatureDto {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl From<FoodFeatureDto> for FoodFeature {
    fn from(dto: FoodFeatureDto) -> Self {
        Self { name: dto.name, description: dto.description, category: dto.category }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodPredictRequestDto {
    pub model: String,
    pub feature: FoodFeatureDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodPredictResponseDto {
    pub prediction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPredictRequestDto {
    pub prices: Vec<f64>,
    pub model_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPredictResponseDto {
    pub prediction: Vec<f64>,
}

async fn predict_food(
    State(state): State<GlobalState>,
    Json(request): Json<FoodPredictRequestDto>,
) -> Result<Json<FoodPredictResponseDto>, AppError> {
    if !state.settings.supports_food_model(&request.model) {
        return Err(AppError::new(
            ErrorCode::UnsupportedMlModel,
            anyhow!("Unsupported model '{}'", request.model),
        ));
    }

    let feature = FoodFeature::from(request.feature);
    let prediction = state.inference.predict_food(&request.model, &feature).await?;
    tracing::info!("[predict_food] {} -> {}", feature.name, prediction);

    Ok(Json(FoodPredictResponseDto { prediction }))
}

async fn predict_stock(
    State(state): State<GlobalState>,
    Json(request): Json<StockPredictRequestDto>,
) -> Result<Json<StockPredictResponseDto>, AppError> {
    if request.prices.is_empty() {
        return Err(AppError::invalid_input("prices must not be empty"));
    }
    if request.prices.iter().any(|price| !price.is_finite()) {
        return Err(AppError::invalid_input("prices must only contain finite numbers"));
    }

    let model = StockModel::from_name(request.model_type.as_deref());
    let prediction = state.inference.predict_stock(model, &request.prices).await?;
    tracing::info!("[predict_stock] {} prices with {:?} -> {:?}", request.prices.len(), model, prediction);

    Ok(Json(StockPredictResponseDto { prediction }))
}
