use assistant_chemistry::{parse_sdf, SdfRecord};
use axum::{routing::post, Json, Router};
use serde::Serialize;

use crate::response::AppError;

pub fn compound_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/api/v1/chemistry/compound/sdf", post(parse_compound_sdf))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompoundSdfDataResponse {
    #[serde(flatten)]
    record: SdfRecord,
    formula: String,
    molecular_weight: f64,
}

async fn parse_compound_sdf(body: String) -> Result<Json<Vec<CompoundSdfDataResponse>>, AppError> {
    let records = parse_sdf(&body)?;

    let mut compounds = Vec::with_capacity(records.len());
    for record in records {
        compounds.push(CompoundSdfDataResponse {
            formula: record.formula()?.to_string(),
            molecular_weight: record.molecular_weight(),
            record,
        });
    }
    Ok(Json(compounds))
}
