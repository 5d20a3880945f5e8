use assistant_chemistry::calculators::{cyclopropane, hydrogen, nitrogen, water};
use assistant_chemistry::{calculators::nitrogen::CompoundAtoms, Amounts};
use axum::{extract::Query, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::response::AppError;

pub fn element_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/api/v1/chemistry/water", get(water_molecules))
        .route("/api/v1/chemistry/nitrogen", get(nitrogen_mass))
        .route("/api/v1/chemistry/nitrogen/ammonium", get(ammonium_atoms))
        .route("/api/v1/chemistry/nitrogen/urea", get(urea_atoms))
        .route("/api/v1/chemistry/hydrogen/butane", get(butane_atoms))
        .route("/api/v1/chemistry/cyclopropane/combustion-air", get(combustion_air))
}

#[derive(Debug, Deserialize)]
struct WaterQuery {
    milliliters: f64,
}
async fn water_molecules(Query(query): Query<WaterQuery>) -> Result<Json<Amounts>, AppError> {
    Ok(Json(water::calculate_molecules(query.milliliters)?))
}

#[derive(Debug, Deserialize)]
struct NitrogenQuery {
    molecules: f64,
}
async fn nitrogen_mass(Query(query): Query<NitrogenQuery>) -> Result<Json<Amounts>, AppError> {
    Ok(Json(nitrogen::calculate_mass(query.molecules)?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NitrogenCompoundQuery {
    total_grams: f64,
    nitrogen_fraction: f64,
}
async fn ammonium_atoms(Query(query): Query<NitrogenCompoundQuery>) -> Result<Json<CompoundAtoms>, AppError> {
    Ok(Json(nitrogen::calculate_ammonium_compound_atoms(query.total_grams, query.nitrogen_fraction)?))
}
async fn urea_atoms(Query(query): Query<NitrogenCompoundQuery>) -> Result<Json<CompoundAtoms>, AppError> {
    Ok(Json(nitrogen::calculate_urea_compound_atoms(query.total_grams, query.nitrogen_fraction)?))
}

#[derive(Debug, Deserialize)]
struct ButaneQuery {
    moles: f64,
}
async fn butane_atoms(Query(query): Query<ButaneQuery>) -> Result<Json<Amounts>, AppError> {
    Ok(Json(hydrogen::calculate_atoms_in_butane(query.moles)?))
}

#[derive(Debug, Deserialize)]
struct CombustionAirQuery {
    volume: f64,
}

#[derive(Debug, Serialize)]
struct CombustionAirResp {
    liters: f64,
}
async fn combustion_air(Query(query): Query<CombustionAirQuery>) -> Result<Json<CombustionAirResp>, AppError> {
    let liters = cyclopropane::air_volume_combustion_with_propene(query.volume)?;
    Ok(Json(CombustionAirResp { liters }))
}
