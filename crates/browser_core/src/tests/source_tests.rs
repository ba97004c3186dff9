use super::*;
use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Result;
use axum::{http::StatusCode, routing::get, Router};
use shared::error::FetchError;
use tokio::net::TcpListener;
use url::Url;

async fn spawn_site_server() -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route(
            "/site/assets/conference-list.json",
            get(|| async { r#"{"conferences":[]}"# }),
        )
        .route(
            "/site/data/broken.jsonl",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}/site"))
}

fn temp_site(tag: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let root = env::temp_dir().join(format!("paper_browser_{tag}_{suffix}"));
    fs::create_dir_all(root.join("data")).expect("temp site");
    root
}

#[tokio::test]
async fn http_source_fetches_relative_to_base_path() {
    let base = spawn_site_server().await.expect("spawn server");
    let source = HttpAssetSource::new(Url::parse(&base).expect("url"));
    assert!(source.base().path().ends_with("/site/"));

    let body = source.fetch_text(CATALOG_PATH).await.expect("catalog");
    assert_eq!(body, r#"{"conferences":[]}"#);
}

#[tokio::test]
async fn http_source_maps_error_statuses() {
    let base = spawn_site_server().await.expect("spawn server");
    let source = HttpAssetSource::new(Url::parse(&base).expect("url"));

    let missing = source
        .fetch_text("data/missing.jsonl")
        .await
        .expect_err("404");
    assert_eq!(
        missing,
        FetchError::Status {
            path: "data/missing.jsonl".to_string(),
            status: 404,
        }
    );
    assert_eq!(missing.to_string(), "HTTP error! status: 404");

    let broken = source.fetch_text("data/broken.jsonl").await.expect_err("500");
    assert!(matches!(broken, FetchError::Status { status: 500, .. }));
}

#[tokio::test]
async fn dir_source_reads_files_and_reports_missing_ones() {
    let root = temp_site("dir_source");
    fs::write(root.join("data").join("icml.jsonl"), "{\"id\":1}\n").expect("write");
    let source = DirAssetSource::new(&root);

    let body = source.fetch_text("data/icml.jsonl").await.expect("read");
    assert_eq!(body, "{\"id\":1}\n");

    let err = source.fetch_text("data/cvpr.jsonl").await.expect_err("missing");
    assert!(matches!(err, FetchError::NotFound { .. }));
    assert_eq!(err.path(), "data/cvpr.jsonl");

    fs::remove_dir_all(root).expect("cleanup");
}

#[tokio::test]
async fn dir_source_refuses_paths_outside_the_root() {
    let root = temp_site("dir_escape");
    let source = DirAssetSource::new(root.join("data"));

    let err = source
        .fetch_text("../outside.txt")
        .await
        .expect_err("escape");
    assert!(matches!(err, FetchError::NotFound { .. }));

    fs::remove_dir_all(root).expect("cleanup");
}
