use assistant_service_api::{calculator_routes, compound_routes, element_routes};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    Router::new().merge(calculator_routes()).merge(element_routes()).merge(compound_routes())
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(request).await
}

fn assert_relative(expected: f64, actual: &Value) {
    let actual = actual.as_f64().unwrap();
    assert!(((expected - actual) / expected).abs() < 1e-3, "expected {expected}, got {actual}");
}

#[tokio::test]
async fn test_molar_mass_from_formula() {
    let (status, body) = post_json("/api/v1/chemistry/calculator/molar-mass", json!({ "formula": "H2O" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_relative(18.015, &body["result"]);
    let notation = body["resultScientificNotation"].as_str().unwrap();
    assert!(notation.starts_with("1.80150000000000"), "{notation}");
    assert!(notation.ends_with("E+1"), "{notation}");
}

#[tokio::test]
async fn test_molar_mass_from_smiles() {
    let (status, body) = post_json("/api/v1/chemistry/calculator/molar-mass", json!({ "smiles": "CCO" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_relative(46.069, &body["result"]);
}

#[tokio::test]
async fn test_molar_mass_rejects_invalid_smiles() {
    let (status, body) = post_json("/api/v1/chemistry/calculator/molar-mass", json!({ "smiles": "C1CC" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], 2);
}

#[tokio::test]
async fn test_mole_from_molecular_weight() {
    let (status, body) =
        post_json("/api/v1/chemistry/calculator/mole", json!({ "mass": 10.0, "molecularWeight": 20.0 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], 0.5);
    assert_eq!(body["resultScientificNotation"], "5.0000000000000000E-1");
}

#[tokio::test]
async fn test_mole_requires_params() {
    let (status, body) = post_json("/api/v1/chemistry/calculator/mole", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], 2);
    assert_eq!(body["errorMessage"], "None of the params are provided.");
}

#[tokio::test]
async fn test_water() {
    let (status, body) = get("/api/v1/chemistry/water?milliliters=200").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grams"], 200.0);
    assert_relative(11.1019, &body["moles"]);
    assert_relative(6.683e24, &body["molecules"]);
}

#[tokio::test]
async fn test_nitrogen() {
    let (status, body) = get("/api/v1/chemistry/nitrogen?molecules=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_relative(4.653e-23, &body["grams"]);
    assert_relative(3.322e-24, &body["moles"]);
}

#[tokio::test]
async fn test_nitrogen_compounds() {
    let (status, body) = get("/api/v1/chemistry/nitrogen/ammonium?totalGrams=100&nitrogenFraction=0.9").await;
    assert_eq!(status, StatusCode::OK);
    assert_relative(90.0, &body["grams"]);
    assert_relative(5.639e23, &body["molecules"]);
    assert_relative(1.128e24, &body["totalFractionAtoms"]);

    let (status, body) = get("/api/v1/chemistry/nitrogen/urea?totalGrams=20&nitrogenFraction=0.9").await;
    assert_eq!(status, StatusCode::OK);
    assert_relative(3.609e23, &body["totalFractionAtoms"]);
}

#[tokio::test]
async fn test_butane_and_combustion_air() {
    let (status, body) = get("/api/v1/chemistry/hydrogen/butane?moles=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_relative(581.24, &body["grams"]);
    assert_relative(6.02e24, &body["molecules"]);

    let (status, body) = get("/api/v1/chemistry/cyclopropane/combustion-air?volume=6").await;
    assert_eq!(status, StatusCode::OK);
    assert_relative(128.5714, &body["liters"]);
}

#[tokio::test]
async fn test_invalid_queries() {
    let (status, _) = get("/api/v1/chemistry/water").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get("/api/v1/chemistry/nitrogen/urea?totalGrams=20&nitrogenFraction=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], 2);
}

#[tokio::test]
async fn test_compound_sdf() {
    let sdf = concat!(
        "962\n",
        "  -OEChem-03132412003D\n",
        "\n",
        "  3  2  0     0  0  0  0  0  0999 V2000\n",
        "    0.0000    0.0000    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0\n",
        "    0.2774    0.8929    0.2544 H   0  0  0  0  0  0  0  0  0  0  0  0\n",
        "    0.6068   -0.2383   -0.7169 H   0  0  0  0  0  0  0  0  0  0  0  0\n",
        "  1  2  1  0  0  0  0\n",
        "  1  3  1  0  0  0  0\n",
        "M  END\n",
        "> <PUBCHEM_COMPOUND_CID>\n",
        "962\n",
        "\n",
        "$$$$\n",
    );
    let request = Request::post("/api/v1/chemistry/compound/sdf").body(Body::from(sdf)).unwrap();
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "962");
    assert_eq!(body[0]["formula"], "H2O");
    assert_eq!(body[0]["atoms"].as_array().unwrap().len(), 3);
    assert_eq!(body[0]["atoms"][0]["bondCount"], 2);
    assert_eq!(body[0]["properties"]["PUBCHEM_COMPOUND_CID"], "962");
    assert_relative(18.015, &body[0]["molecularWeight"]);

    let request = Request::post("/api/v1/chemistry/compound/sdf").body(Body::from("not a molfile")).unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], 2);
}
