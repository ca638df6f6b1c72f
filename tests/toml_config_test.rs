use album_catalog::core::augment::cover_number;
use album_catalog::utils::validation::Validate;
use album_catalog::{AlbumLoader, LoadState, TomlConfig, UiDispatcher};
use anyhow::Result;
use httpmock::prelude::*;
use tempfile::TempDir;

/// TOML 檔案中的端點與封面服務會一路傳到 loader
#[tokio::test]
async fn test_loader_runs_with_settings_from_toml_file() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/v1/albums");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"title": "Kind of Blue", "artist": "Miles Davis", "year": 1959, "genre": "Jazz"},
                {"title": "Blue Train", "artist": "John Coltrane", "year": 1958, "genre": "Jazz"}
            ]));
    });

    std::env::set_var("ALBUM_CATALOG_TOML_TEST_BASE", server.base_url());

    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("catalog.toml");
    tokio::fs::write(
        &config_path,
        r#"
[source]
endpoint = "${ALBUM_CATALOG_TOML_TEST_BASE}/v1/albums"

[covers]
base_url = "https://covers.example.com/300"

[publish]
reset_before_publish = true
"#,
    )
    .await?;

    let config = TomlConfig::from_file(&config_path)?;
    config.validate()?;
    let settings = config.to_settings();
    assert!(settings.reset_before_publish);

    let dispatcher = UiDispatcher::start()?;
    let report = AlbumLoader::from_config(&settings, dispatcher.handle(), |_: &str| {})
        .run()
        .await;

    api_mock.assert();
    assert_eq!(report.state, LoadState::Done);

    let albums = dispatcher.handle().snapshot().await?;
    assert_eq!(albums.len(), 2);
    assert_eq!(albums[0].creator, "Miles Davis");
    assert!(albums
        .iter()
        .all(|a| cover_number("https://covers.example.com/300", &a.cover_ref).is_some()));

    dispatcher.shutdown();
    std::env::remove_var("ALBUM_CATALOG_TOML_TEST_BASE");
    Ok(())
}
