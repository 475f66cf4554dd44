//! Shared setup for API integration tests.

#![allow(dead_code)]

use axum_test::TestServer;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use courier_core::Config;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TEST_ENDPOINT: &str = "store.test:9000";
pub const TEST_BUCKET: &str = "attachments-test";

pub struct TestApp {
    server: TestServer,
    storage_dir: TempDir,
    work_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Filesystem location of an object advertised at `public_path`.
    pub fn stored_file(&self, public_path: &str) -> PathBuf {
        let prefix = format!("http://{}/", TEST_ENDPOINT);
        let relative = public_path
            .strip_prefix(&prefix)
            .unwrap_or_else(|| panic!("unexpected public path {public_path}"));
        self.storage_dir.path().join(relative)
    }

    pub fn work_dir(&self) -> &Path {
        self.work_dir.path()
    }
}

pub fn create_test_config(storage_dir: &Path, work_dir: &Path, environment: &str) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("ENVIRONMENT", environment.to_string()),
        ("STORAGE_BACKEND", "local".to_string()),
        ("LOCAL_STORAGE_PATH", storage_dir.display().to_string()),
        ("WORK_DIR", work_dir.display().to_string()),
        ("FETCH_TIMEOUT_SECS", "5".to_string()),
        ("MAX_REQUEST_BODY_MB", "1".to_string()),
    ]);
    Config::from_vars(|key| vars.get(key).cloned()).expect("Failed to build test config")
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_in("test")
}

pub fn setup_test_app_in(environment: &str) -> TestApp {
    let storage_dir = tempfile::tempdir().expect("Failed to create storage directory");
    let work_dir = tempfile::tempdir().expect("Failed to create work directory");

    let config = create_test_config(storage_dir.path(), work_dir.path(), environment);
    config.validate().expect("Test config is invalid");

    let state = courier_api::setup::build_state(config).expect("Failed to build app state");
    let app = courier_api::setup::routes::setup_routes(&state.config, state.clone());

    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        storage_dir,
        work_dir,
    }
}

/// A complete request body with everything but the source.
pub fn base_body() -> serde_json::Value {
    serde_json::json!({
        "bucketName": TEST_BUCKET,
        "minioEndPoint": TEST_ENDPOINT,
        "minioAccessKey": "access",
        "minioSecretKey": "secret",
        "fileExtension": ".png",
        "projectName": "proj1",
        "token": "pat-token"
    })
}

pub fn png_base64(width: u32, height: u32) -> String {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
        .expect("Failed to encode PNG");
    STANDARD.encode(buffer)
}

pub fn bad_attachment_json() -> serde_json::Value {
    serde_json::json!({
        "attachmentPath": format!("http://{}/attachments/bad-attachment.png", TEST_ENDPOINT),
        "fileName": "bad-attachment.png"
    })
}
