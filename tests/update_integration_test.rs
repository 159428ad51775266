use anyhow::Result;
use httpmock::prelude::*;
use medal_pool::{LocalStorage, PoolEngine, UpdateOptions, UpdatePipeline};
use tempfile::TempDir;

fn options(server: &MockServer) -> UpdateOptions {
    UpdateOptions {
        pool_path: "pool.json".to_string(),
        mirror_path: "pool.js".to_string(),
        settings_url: server.url("/settings.json"),
        medals_endpoint: server.url("/medals"),
        api_key: "test-key".to_string(),
        timeout_seconds: 5,
        dry_run: false,
    }
}

fn write_pool(dir: &TempDir, value: &serde_json::Value) -> Vec<u8> {
    let body = serde_json::to_string_pretty(value).unwrap();
    std::fs::write(dir.path().join("pool.json"), &body).unwrap();
    body.into_bytes()
}

fn tagged_pool() -> serde_json::Value {
    serde_json::json!({
        "updatedAt": null,
        "teams": [
            {"member": "Chris", "country": "USA", "draftValue": 30, "gold": 1, "silver": 1, "bronze": 1},
            {"member": "Dad", "country": "Wakanda", "draftValue": 12, "gold": 2, "silver": 2, "bronze": 2}
        ]
    })
}

fn mock_settings(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/settings.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"competition_code": "milan2026"}));
    })
}

#[tokio::test]
async fn test_update_rewrites_pool_and_mirror() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_pool(&temp_dir, &tagged_pool());

    let server = MockServer::start();
    let settings_mock = mock_settings(&server);
    let medals_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/medals")
            .query_param("competitionCode", "milan2026")
            .header("x-olyapiauth", "test-key");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"countryCode": "USA", "countryName": "United States of America",
                 "gold": "9", "silver": 7, "bronze": "12"}
            ]));
    });

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let engine = PoolEngine::new(UpdatePipeline::new(storage, options(&server)));

    let written = engine.run().await?;
    assert_eq!(written, "pool.json");
    settings_mock.assert();
    medals_mock.assert();

    let pool: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp_dir.path().join("pool.json"))?)?;
    assert!(pool.get("updatedAt").unwrap().as_str().is_some());

    let teams = pool.get("teams").unwrap().as_array().unwrap();
    let usa = &teams[0];
    assert_eq!(usa.get("gold").unwrap().as_u64(), Some(9));
    assert_eq!(usa.get("silver").unwrap().as_u64(), Some(7));
    assert_eq!(usa.get("bronze").unwrap().as_u64(), Some(12));
    // Draft metadata survives the merge.
    assert_eq!(usa.get("draftValue").unwrap().as_f64(), Some(30.0));

    // Wakanda has no external row and gets zeroed.
    let wakanda = &teams[1];
    assert_eq!(wakanda.get("gold").unwrap().as_u64(), Some(0));
    assert_eq!(wakanda.get("silver").unwrap().as_u64(), Some(0));
    assert_eq!(wakanda.get("bronze").unwrap().as_u64(), Some(0));

    let mirror = std::fs::read_to_string(temp_dir.path().join("pool.js"))?;
    assert!(mirror.starts_with("window.POOL_DATA = {"));
    assert!(mirror.ends_with(";\n"));
    assert!(mirror.contains("\"teams\""));

    Ok(())
}

#[tokio::test]
async fn test_update_preserves_bare_array_shape() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_pool(
        &temp_dir,
        &serde_json::json!([
            {"member": "Chris", "country": "USA", "draftValue": 30}
        ]),
    );

    let server = MockServer::start();
    mock_settings(&server);
    server.mock(|when, then| {
        when.method(GET).path("/medals");
        then.status(200)
            .json_body(serde_json::json!([{"countryCode": "USA", "gold": 1, "silver": 0, "bronze": 0}]));
    });

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let engine = PoolEngine::new(UpdatePipeline::new(storage, options(&server)));
    engine.run().await?;

    let pool: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp_dir.path().join("pool.json"))?)?;
    assert!(pool.is_array());
    assert_eq!(pool[0].get("gold").unwrap().as_u64(), Some(1));

    Ok(())
}

#[tokio::test]
async fn test_settings_failure_leaves_pool_untouched() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let original = write_pool(&temp_dir, &tagged_pool());

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/settings.json");
        then.status(500);
    });

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let engine = PoolEngine::new(UpdatePipeline::new(storage, options(&server)));

    assert!(engine.run().await.is_err());
    assert_eq!(std::fs::read(temp_dir.path().join("pool.json"))?, original);
    assert!(!temp_dir.path().join("pool.js").exists());

    Ok(())
}

#[tokio::test]
async fn test_missing_competition_code_is_fatal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let original = write_pool(&temp_dir, &tagged_pool());

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/settings.json");
        then.status(200).json_body(serde_json::json!({"theme": "winter"}));
    });

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let engine = PoolEngine::new(UpdatePipeline::new(storage, options(&server)));

    assert!(engine.run().await.is_err());
    assert_eq!(std::fs::read(temp_dir.path().join("pool.json"))?, original);

    Ok(())
}

#[tokio::test]
async fn test_non_array_medals_response_is_fatal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let original = write_pool(&temp_dir, &tagged_pool());

    let server = MockServer::start();
    mock_settings(&server);
    server.mock(|when, then| {
        when.method(GET).path("/medals");
        then.status(200).json_body(serde_json::json!({"error": "maintenance"}));
    });

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let engine = PoolEngine::new(UpdatePipeline::new(storage, options(&server)));

    assert!(engine.run().await.is_err());
    assert_eq!(std::fs::read(temp_dir.path().join("pool.json"))?, original);

    Ok(())
}

#[tokio::test]
async fn test_dry_run_skips_writes() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let original = write_pool(&temp_dir, &tagged_pool());

    let server = MockServer::start();
    mock_settings(&server);
    server.mock(|when, then| {
        when.method(GET).path("/medals");
        then.status(200)
            .json_body(serde_json::json!([{"countryCode": "USA", "gold": 9, "silver": 0, "bronze": 0}]));
    });

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let mut opts = options(&server);
    opts.dry_run = true;
    let engine = PoolEngine::new(UpdatePipeline::new(storage, opts));

    assert!(engine.run().await.is_ok());
    assert_eq!(std::fs::read(temp_dir.path().join("pool.json"))?, original);
    assert!(!temp_dir.path().join("pool.js").exists());

    Ok(())
}
