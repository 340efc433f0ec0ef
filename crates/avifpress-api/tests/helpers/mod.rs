//! Shared test setup: a router backed by temp directories plus multipart
//! request builders.

pub mod fixtures;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use avifpress_api::setup::routes::setup_routes;
use avifpress_api::state::AppState;
use avifpress_core::Config;
use avifpress_services::Converter;
use avifpress_storage::ArtifactStore;
use axum::body::Body;
use axum::http::Request;
use axum::Router;
use tempfile::TempDir;

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<ArtifactStore>,
    _tmp: TempDir,
}

pub async fn setup_test_app() -> TestApp {
    let tmp = TempDir::new().unwrap();
    let config = Config {
        incoming_dir: tmp.path().join("tmp").to_string_lossy().into_owned(),
        derived_dir: tmp.path().join("compressed").to_string_lossy().into_owned(),
        ..Config::default()
    };

    let store = Arc::new(
        ArtifactStore::new(&config.incoming_dir, &config.derived_dir)
            .await
            .unwrap(),
    );
    let converter = Converter::new(store.clone(), Duration::from_secs(60));
    let state = Arc::new(AppState {
        config: config.clone(),
        store: store.clone(),
        converter,
    });

    TestApp {
        router: setup_routes(&config, state),
        store,
        _tmp: tmp,
    }
}

/// Build a `POST /compress` multipart request. `percentage` is omitted from
/// the body when `None`.
pub fn multipart_compress_request(
    image: &[u8],
    filename: &str,
    percentage: Option<&str>,
) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(image);
    body.extend_from_slice(b"\r\n");
    if let Some(p) = percentage {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; \
                 name=\"compressionPercentage\"\r\n\r\n{p}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/compress")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn count_entries(dir: &Path) -> usize {
    let mut count = 0;
    let mut entries = tokio::fs::read_dir(dir).await.unwrap();
    while entries.next_entry().await.unwrap().is_some() {
        count += 1;
    }
    count
}
