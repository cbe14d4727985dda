mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

/// Public GET endpoints answer with the success envelope when a database is
/// present, or a 503 envelope when it is not. Either way the shape holds.
async fn assert_enveloped_get(path: &str) -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}{}", server.base_url, path))
        .send()
        .await?;

    assert!(
        res.status() == StatusCode::OK
            || res.status() == StatusCode::NOT_FOUND
            || res.status() == StatusCode::SERVICE_UNAVAILABLE,
        "{} answered {}",
        path,
        res.status()
    );

    let body = res.json::<serde_json::Value>().await?;
    assert!(body.get("success").is_some(), "{} had no envelope: {}", path, body);
    Ok(())
}

#[tokio::test]
async fn public_listings_respond() -> Result<()> {
    assert_enveloped_get("/api/articles").await?;
    assert_enveloped_get("/api/articles/categories").await?;
    assert_enveloped_get("/api/articles/tags").await?;
    assert_enveloped_get("/api/projects").await?;
    assert_enveloped_get("/api/projects/technologies").await?;
    assert_enveloped_get("/api/skills").await?;
    assert_enveloped_get("/api/skills/categories").await?;
    assert_enveloped_get("/api/experiences").await?;
    assert_enveloped_get("/api/certifications").await?;
    assert_enveloped_get("/api/seo").await?;
    assert_enveloped_get("/api/seo/home").await?;
    assert_enveloped_get("/api/profile").await?;
    Ok(())
}

#[tokio::test]
async fn paginated_listing_carries_meta_when_db_present() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/articles?limit=5", server.base_url))
        .send()
        .await?;

    if res.status() == StatusCode::OK {
        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["success"], true);
        assert!(body["data"].is_array());
        assert!(body["meta"]["total"].is_number());
        assert_eq!(body["meta"]["limit"], 5);
    }

    Ok(())
}

#[tokio::test]
async fn contact_rejects_invalid_payload() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/contact", server.base_url))
        .json(&json!({
            "name": "",
            "email": "not-an-email",
            "message": ""
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["email"].is_string());

    Ok(())
}

#[tokio::test]
async fn invalid_status_filter_is_a_client_error() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/articles?status=BOGUS", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
