use assistant_math::{HypotenuseInput, HypotenuseMethod, Matrix, MatrixOperation, RightTriangle};
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::response::AppError;
use crate::routes::CalculatorResp;

pub fn math_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/api/v1/math/calculator/right-triangle", post(calculate_right_triangle))
        .route("/api/v1/math/calculator/hypotenuse", post(calculate_hypotenuse))
        .route("/api/v1/math/calculator/linear-algebra/matrix-addition", post(calculate_matrix_addition))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalculateHypotenuseReq {
    solve_for: String,
    #[serde(flatten)]
    input: HypotenuseInput,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalculateMatrixAddReq {
    solve_for: String,
    a: Matrix,
    b: Option<Matrix>,
    scalar: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalculatorMatrixResp {
    pub result: Matrix,
}

async fn calculate_right_triangle(Json(body): Json<RightTriangle>) -> Result<Json<CalculatorResp>, AppError> {
    Ok(Json(CalculatorResp::new(body.solve()?)))
}

async fn calculate_hypotenuse(Json(body): Json<CalculateHypotenuseReq>) -> Result<Json<CalculatorResp>, AppError> {
    let method: HypotenuseMethod = body.solve_for.parse()?;
    let hypotenuse = assistant_math::hypotenuse(method, &body.input)?;
    Ok(Json(CalculatorResp::new(hypotenuse)))
}

async fn calculate_matrix_addition(
    Json(body): Json<CalculateMatrixAddReq>,
) -> Result<Json<CalculatorMatrixResp>, AppError> {
    let result = match body.solve_for.parse()? {
        MatrixOperation::AddMatrix => {
            let b = body.b.ok_or_else(|| AppError::invalid_input("Matrix b is required for a+b."))?;
            assistant_math::add_matrices(&body.a, &b)?
        }
        MatrixOperation::AddScalar => {
            let scalar = body.scalar.ok_or_else(|| AppError::invalid_input("A scalar is required for a+scalar."))?;
            assistant_math::add_scalar(&body.a, scalar)?
        }
    };
    Ok(Json(CalculatorMatrixResp { result }))
}
