use assistant_service_api::math_routes;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = math_routes::<()>().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn assert_close(expected: f64, actual: &Value) {
    let actual = actual.as_f64().unwrap();
    assert!((expected - actual).abs() < 1e-4, "expected {expected}, got {actual}");
}

#[tokio::test]
async fn test_right_triangle() {
    let uri = "/api/v1/math/calculator/right-triangle";

    let (status, body) = post_json(uri, json!({ "cathetusA": 7, "cathetusB": 9 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_close(11.40175, &body["result"]);
    assert!(body["resultScientificNotation"].as_str().unwrap().ends_with("E+1"));

    let (status, body) = post_json(uri, json!({ "cathetusA": 4, "hypotenuse": 8.94427 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_close(8.0, &body["result"]);
}

#[tokio::test]
async fn test_right_triangle_rejects_short_hypotenuse() {
    let uri = "/api/v1/math/calculator/right-triangle";

    let (status, body) = post_json(uri, json!({ "cathetusB": 10, "hypotenuse": 6 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], 2);

    let (status, body) = post_json(uri, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], 2);
}

#[tokio::test]
async fn test_hypotenuse() {
    let uri = "/api/v1/math/calculator/hypotenuse";

    let body = json!({
        "solveFor": "side_and_opposite_angle",
        "cathetusA": 5,
        "angleAlpha": 30,
        "alphaAngleUnit": "degrees",
    });
    let (status, body) = post_json(uri, body).await;
    assert_eq!(status, StatusCode::OK);
    assert_close(10.0, &body["result"]);

    let (status, body) = post_json(uri, json!({ "solveFor": "area_and_side", "cathetusB": 3, "area": 6 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_close(5.0, &body["result"]);
}

#[tokio::test]
async fn test_hypotenuse_rejects_unknown_method() {
    let body = json!({ "solveFor": "law_of_cosines", "cathetusA": 3, "cathetusB": 4 });
    let (status, body) = post_json("/api/v1/math/calculator/hypotenuse", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], 2);
}

#[tokio::test]
async fn test_matrix_addition() {
    let uri = "/api/v1/math/calculator/linear-algebra/matrix-addition";

    let body = json!({ "solveFor": "a+b", "a": [[1, 2], [3, 4]], "b": [[5, 6], [7, 8]] });
    let (status, body) = post_json(uri, body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], json!([[6.0, 8.0], [10.0, 12.0]]));

    let (status, body) = post_json(uri, json!({ "solveFor": "a+scalar", "a": [[1, 2]], "scalar": 0.5 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], json!([[1.5, 2.5]]));
}

#[tokio::test]
async fn test_matrix_addition_rejects_mismatch() {
    let uri = "/api/v1/math/calculator/linear-algebra/matrix-addition";

    let body = json!({ "solveFor": "a+b", "a": [[1, 2], [3, 4]], "b": [[5, 6]] });
    let (status, body) = post_json(uri, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], 2);

    let (status, _) = post_json(uri, json!({ "solveFor": "a+b", "a": [[1]] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
