use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use calc_server::{api_router, build_router, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

async fn send(router: Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = router.oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

async fn post_json(path: &str, body: Value) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?;
    send(api_router(AppState::default()), request).await
}

async fn get(path: &str) -> Result<(StatusCode, Value)> {
    let request = Request::builder().uri(path).body(Body::empty())?;
    send(api_router(AppState::default()), request).await
}

#[tokio::test]
async fn test_basic_arithmetic() -> Result<()> {
    let (status, body) = post_json("/api/basic", json!({"a": 12, "b": 4, "operator": "/"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], json!(3.0));

    let (status, body) = post_json("/api/basic", json!({"expression": "2 + 3 * (4 - 1)"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], json!(11.0));
    Ok(())
}

#[tokio::test]
async fn test_division_by_zero_echoes_request() -> Result<()> {
    let request = json!({"a": 5, "b": 0, "operator": "/"});
    let (status, body) = post_json("/api/basic", request.clone()).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DivisionByZero");
    assert_eq!(body["error"], "Division by zero");
    assert_eq!(body["received"], request);
    Ok(())
}

#[tokio::test]
async fn test_gst_exclusive() -> Result<()> {
    let (status, body) =
        post_json("/api/gst", json!({"amount": 1000, "rate": 18, "type": "exclusive"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gstAmount"], json!(180.0));
    assert_eq!(body["cgst"], json!(90.0));
    assert_eq!(body["totalAmount"], json!(1180.0));
    Ok(())
}

#[tokio::test]
async fn test_numeric_strings_are_accepted() -> Result<()> {
    let (status, body) = post_json("/api/gst", json!({"amount": "1000", "rate": "18"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalAmount"], json!(1180.0));
    Ok(())
}

#[tokio::test]
async fn test_non_numeric_amount_is_rejected() -> Result<()> {
    let (status, body) = post_json("/api/gst", json!({"amount": "abc", "rate": 18})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "InvalidInput");
    assert_eq!(body["error"], "amount must be a number, got \"abc\"");
    Ok(())
}

#[tokio::test]
async fn test_overflowing_result_is_a_400() -> Result<()> {
    let request = json!({"amount": 1e308, "rate": 18});
    let (status, body) = post_json("/api/gst", request.clone()).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "InvalidInput");
    assert_eq!(body["received"], request);

    let (status, body) = post_json("/api/length", json!({"value": 1e308, "from": "au"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "InvalidInput");
    Ok(())
}

#[tokio::test]
async fn test_tds_known_and_fallback_category() -> Result<()> {
    let (status, body) =
        post_json("/api/tds", json!({"amount": 100000, "category": "professional"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["section"], "194J");
    assert_eq!(body["basicTds"], json!(10000.0));
    assert_eq!(body["cess"], json!(400.0));
    assert_eq!(body["totalTds"], json!(10400.0));
    assert_eq!(body["netAmount"], json!(89600.0));
    assert_eq!(body["categoryFallback"], json!(false));

    let (status, body) =
        post_json("/api/tds", json!({"amount": 100000, "category": "lottery"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "professional");
    assert_eq!(body["categoryFallback"], json!(true));
    Ok(())
}

#[tokio::test]
async fn test_emi_reference_loan() -> Result<()> {
    let (status, body) =
        post_json("/api/emi", json!({"principal": 100000, "rate": 10, "tenure": 12})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["emi"], json!(8791.59));
    assert_eq!(body["totalInterest"], json!(5499.08));
    assert!(!body["schedule"].as_array().map(Vec::is_empty).unwrap_or(true));
    Ok(())
}

#[tokio::test]
async fn test_unit_converters() -> Result<()> {
    let (status, body) = post_json("/api/length", json!({"value": 1, "from": "km"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["conversions"]["m"], json!(1000.0));

    let (status, body) = post_json("/api/temperature", json!({"value": 100, "from": "c"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["conversions"]["f"], json!(212.0));

    let (status, body) = post_json("/api/height", json!({"value": 180, "from": "cm"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "5' 10.9\"");

    let (status, body) = post_json("/api/weight", json!({"value": 1, "from": "parsec"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "InvalidUnit");
    Ok(())
}

#[tokio::test]
async fn test_age_and_percentage() -> Result<()> {
    let (status, body) = post_json(
        "/api/age",
        json!({"birthDate": "2000-01-15", "asOf": "2024-03-10"}),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["years"], json!(24));
    assert_eq!(body["months"], json!(1));
    assert_eq!(body["days"], json!(24));

    let (status, body) =
        post_json("/api/percentage", json!({"type": "of", "a": 20, "b": 50})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], json!(10.0));
    Ok(())
}

#[tokio::test]
async fn test_area_rejects_unknown_shape() -> Result<()> {
    let (status, body) = post_json("/api/area", json!({"shape": "square", "side": 4})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["area"], json!(16.0));
    assert_eq!(body["perimeter"], json!(16.0));

    let (status, body) = post_json("/api/area", json!({"shape": "hexagon", "side": 4})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "InvalidShape");
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_is_a_400() -> Result<()> {
    let request = Request::builder()
        .method("POST")
        .uri("/api/gst")
        .header("content-type", "application/json")
        .body(Body::from("{\"amount\": 10,"))?;
    let (status, body) = send(api_router(AppState::default()), request).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "InvalidInput");
    assert!(body["error"]
        .as_str()
        .unwrap_or_default()
        .starts_with("Invalid JSON body"));
    assert!(body.get("received").is_none());
    Ok(())
}

#[tokio::test]
async fn test_health_and_categories() -> Result<()> {
    let (status, body) = get("/api/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get("/api/tds/categories").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["default"], "professional");
    assert_eq!(body["categories"].as_array().map(Vec::len), Some(8));
    Ok(())
}

#[tokio::test]
async fn test_unknown_api_path_is_json_404() -> Result<()> {
    let (status, body) = get("/api/unknown").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
    assert_eq!(body["code"], "NotFound");

    let (status, _) = post_json("/api/nested/unknown", json!({})).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_wrong_method_is_json_405() -> Result<()> {
    let (status, body) = get("/api/gst").await?;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["code"], "MethodNotAllowed");
    assert_eq!(body["error"], "Method GET is not allowed on /api/gst");

    let (status, body) = post_json("/api/health", json!({})).await?;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["code"], "MethodNotAllowed");
    Ok(())
}

#[tokio::test]
async fn test_frontend_fallback_serves_index() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("index.html"), "<h1>calculator</h1>")?;

    let router = build_router(AppState::default(), temp_dir.path());
    let response = router
        .oneshot(Request::builder().uri("/some/page").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    assert_eq!(&bytes[..], b"<h1>calculator</h1>");
    Ok(())
}
