mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::json;

async fn assert_unauthorized(method: Method, path: &str) -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .request(method.clone(), format!("{}{}", server.base_url, path))
        .json(&json!({}))
        .send()
        .await?;

    assert_eq!(
        res.status(),
        StatusCode::UNAUTHORIZED,
        "{} {} should require auth",
        method,
        path
    );

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn admin_routes_require_a_token() -> Result<()> {
    assert_unauthorized(Method::GET, "/api/auth/me").await?;
    assert_unauthorized(Method::PUT, "/api/auth/password").await?;
    assert_unauthorized(Method::PUT, "/api/profile").await?;
    assert_unauthorized(Method::POST, "/api/articles").await?;
    assert_unauthorized(Method::POST, "/api/projects").await?;
    assert_unauthorized(Method::PUT, "/api/projects/reorder").await?;
    assert_unauthorized(Method::POST, "/api/skills").await?;
    assert_unauthorized(Method::POST, "/api/experiences").await?;
    assert_unauthorized(Method::POST, "/api/certifications").await?;
    assert_unauthorized(Method::PUT, "/api/seo/home").await?;
    assert_unauthorized(Method::GET, "/api/contact").await?;
    assert_unauthorized(Method::POST, "/api/admin/upload").await?;
    Ok(())
}

#[tokio::test]
async fn garbage_bearer_token_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/auth/me", server.base_url))
        .header("Authorization", "Bearer not-a-real-token")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn optional_auth_listing_rejects_invalid_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // A bogus token on a public listing is a 401, not a silent downgrade
    let res = client
        .get(format!("{}/api/articles", server.base_url))
        .header("Authorization", "Bearer not-a-real-token")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn login_with_wrong_shape_is_a_validation_error() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&json!({ "email": "not-an-email", "password": "" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    Ok(())
}
