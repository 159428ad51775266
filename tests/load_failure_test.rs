use httpmock::prelude::*;
use medal_pool::core::loader::SnapshotLoader;
use medal_pool::core::{aggregate::aggregate, rank::rank_teams};
use medal_pool::PoolError;

#[tokio::test]
async fn test_http_failure_is_a_load_error_and_previous_snapshot_survives() {
    let good_server = MockServer::start();
    good_server.mock(|when, then| {
        when.method(GET).path("/pool.json");
        then.status(200).json_body(serde_json::json!([
            {"member": "Chris", "country": "Italy", "draftValue": 19, "gold": 1, "silver": 0, "bronze": 0}
        ]));
    });

    let previous = SnapshotLoader::new(&good_server.url("/pool.json"))
        .load()
        .await
        .unwrap();

    let bad_server = MockServer::start();
    bad_server.mock(|when, then| {
        when.method(GET).path("/pool.json");
        then.status(503);
    });

    let err = SnapshotLoader::new(&bad_server.url("/pool.json"))
        .load()
        .await
        .unwrap_err();
    assert!(matches!(err, PoolError::LoadError { .. }));

    // The failure is a value, not a panic; the previously loaded snapshot
    // is still fully renderable.
    let mut teams = aggregate(&previous.teams);
    rank_teams(&mut teams);
    assert_eq!(teams[0].member, "Chris");
    assert_eq!(teams[0].total_points, 4);
}

#[tokio::test]
async fn test_malformed_json_is_a_load_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/pool.json");
        then.status(200).body("this is not json");
    });

    let err = SnapshotLoader::new(&server.url("/pool.json"))
        .load()
        .await
        .unwrap_err();
    assert!(matches!(err, PoolError::LoadError { .. }));
}

#[tokio::test]
async fn test_non_array_teams_is_a_load_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/pool.json");
        then.status(200)
            .json_body(serde_json::json!({"teams": "coming soon"}));
    });

    let err = SnapshotLoader::new(&server.url("/pool.json"))
        .load()
        .await
        .unwrap_err();
    assert!(matches!(err, PoolError::LoadError { .. }));
}

#[tokio::test]
async fn test_invalid_entry_is_rejected_at_the_boundary() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/pool.json");
        then.status(200).json_body(serde_json::json!([
            {"member": "", "country": "Italy", "draftValue": 19}
        ]));
    });

    let err = SnapshotLoader::new(&server.url("/pool.json"))
        .load()
        .await
        .unwrap_err();
    assert!(matches!(err, PoolError::LoadError { .. }));
}

#[tokio::test]
async fn test_missing_local_file_is_an_io_error() {
    let err = SnapshotLoader::new("definitely/does/not/exist.json")
        .load()
        .await
        .unwrap_err();
    assert!(matches!(err, PoolError::IoError(_)));
}
