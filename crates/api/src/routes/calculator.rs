use assistant_chemistry::Substance;
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::response::AppError;
use crate::utils::scientific_notation;

pub fn calculator_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/api/v1/chemistry/calculator/molar-mass", post(calculate_molar_mass))
        .route("/api/v1/chemistry/calculator/mole", post(calculate_mole))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorResp {
    pub result: f64,
    pub result_scientific_notation: String,
}

impl CalculatorResp {
    pub fn new(result: f64) -> Self {
        Self { result, result_scientific_notation: scientific_notation(result) }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalculateMolarMassReq {
    formula: Option<String>,
    smiles: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalculateMoleReq {
    formula: Option<String>,
    smiles: Option<String>,
    mass: Option<f64>,
    molecular_weight: Option<f64>,
}

async fn calculate_molar_mass(Json(body): Json<CalculateMolarMassReq>) -> Result<Json<CalculatorResp>, AppError> {
    let molar_mass = assistant_chemistry::calculate_molar_mass(body.formula.as_deref(), body.smiles.as_deref())?;
    Ok(Json(CalculatorResp::new(molar_mass)))
}

async fn calculate_mole(Json(body): Json<CalculateMoleReq>) -> Result<Json<CalculatorResp>, AppError> {
    let substance = Substance::from_parts(body.formula.as_deref(), body.smiles.as_deref());
    if substance.is_none() && body.mass.is_none() && body.molecular_weight.is_none() {
        return Err(AppError::invalid_input("None of the params are provided."));
    }

    let moles = assistant_chemistry::calculate_mole(substance.as_ref(), body.mass, body.molecular_weight)?;
    Ok(Json(CalculatorResp::new(moles)))
}
