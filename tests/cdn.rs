//! CDN Client Integration Tests
//!
//! Exercises version resolution and dataset fetching against a mock HTTP
//! server, plus one end-to-end sync through the real client.

use serde_json::json;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use wakfu_gamedata::adapters::{CdnClient, GameDataSource};
use wakfu_gamedata::core::{BracketTable, DatasetWriter, Orchestrator, RunSettings};
use wakfu_gamedata::domain::DatasetType;

fn client_for(server: &MockServer) -> CdnClient {
    CdnClient::new(
        format!("{}/gamedata/config.json", server.uri()),
        format!("{}/gamedata", server.uri()),
        None,
    )
    .unwrap()
}

#[tokio::test]
async fn test_current_version_resolved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gamedata/config.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": "1.90.1.43" })))
        .expect(1)
        .mount(&server)
        .await;

    let version = client_for(&server).current_version().await.unwrap();
    assert_eq!(version, "1.90.1.43");
}

#[tokio::test]
async fn test_missing_or_empty_version_is_an_error() {
    for body in [json!({}), json!({ "version": "" }), json!({ "version": "a/b" })] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gamedata/config.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let result = client_for(&server).current_version().await;
        assert!(result.is_err(), "accepted {}", body);
    }
}

#[tokio::test]
async fn test_dataset_fetched_from_versioned_path() {
    let server = MockServer::start().await;
    let body = json!([{ "definition": { "id": 1 } }]);
    Mock::given(method("GET"))
        .and(path("/gamedata/1.90.1.43/recipeResults.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let data = client_for(&server)
        .fetch_dataset("1.90.1.43", DatasetType::RecipeResults)
        .await
        .unwrap();
    assert_eq!(data, body);
}

#[tokio::test]
async fn test_non_success_status_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gamedata/1.0/actions.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_dataset("1.0", DatasetType::Actions)
        .await
        .unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("actions"));
    assert!(message.contains("404"));
}

#[tokio::test]
async fn test_malformed_json_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gamedata/1.0/states.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[{\"id\": 1,"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .fetch_dataset("1.0", DatasetType::States)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_sync_through_cdn_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gamedata/config.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": "9.9" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gamedata/9.9/resources.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 12 }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gamedata/9.9/items.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "definition": {
                "item": {
                    "id": 42,
                    "level": 50,
                    "baseParameters": { "itemTypeId": 120, "rarity": 4 },
                    "graphicParameters": { "gfxId": 4242 }
                }
            },
            "title": { "en": "Ring" }
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let orchestrator = Orchestrator::new(
        client_for(&server),
        DatasetWriter::new(temp.path()),
        RunSettings {
            datasets: vec![DatasetType::Items, DatasetType::Resources],
            brackets: BracketTable::new(vec![35, 50]).unwrap(),
            ..Default::default()
        },
    );

    let report = orchestrator.sync(None).await.unwrap();
    assert_eq!(report.version, "9.9");
    assert_eq!(report.datasets[0].dataset, DatasetType::Items);
    assert_eq!(report.datasets[1].dataset, DatasetType::Resources);

    let ring: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(temp.path().join("9.9/items/50/4.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(ring[0]["graphic_id"], 4242);
    assert_eq!(ring[0]["equip_effects"], json!([]));
    assert!(temp.path().join("9.9/resources.json").is_file());
    assert!(temp.path().join("9.9-source/resources.json").is_file());
}
