//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use stratus_auth::{GoogleIdentity, IdTokenVerifier};
use stratus_core::config::{
    AppConfig, AuthConfig, CacheConfig, CorsConfig, DatabaseConfig, GoogleAuthConfig,
    LocalStorageConfig, LoggingConfig, S3StorageConfig, ServerConfig, StorageConfig,
};
use stratus_core::error::AppError;
use stratus_core::result::AppResult;

/// Stub Google verifier: accepts any token and returns a fixed identity.
#[derive(Debug)]
pub struct StubVerifier {
    identity: GoogleIdentity,
}

#[async_trait::async_trait]
impl IdTokenVerifier for StubVerifier {
    async fn verify(&self, id_token: &str) -> AppResult<GoogleIdentity> {
        if id_token == "invalid" {
            return Err(AppError::authentication("Invalid Google token"));
        }
        Ok(self.identity.clone())
    }
}

/// Test application context.
pub struct TestApp {
    /// The axum router for making test requests.
    pub router: Router,
    /// Database pool for direct queries.
    pub db_pool: SqlitePool,
    // Keeps the storage root alive for the test's duration.
    _storage_dir: tempfile::TempDir,
}

impl TestApp {
    /// Create a test application over an in-memory database and a
    /// temp-dir storage backend.
    pub async fn new() -> Self {
        let storage_dir = tempfile::tempdir().expect("create storage dir");
        let config = test_config(storage_dir.path().to_string_lossy().into_owned());

        // A single connection keeps every query on the same in-memory
        // database.
        let db_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("open in-memory database");
        stratus_database::migration::run_migrations(&db_pool)
            .await
            .expect("run migrations");

        let verifier = Arc::new(StubVerifier {
            identity: GoogleIdentity {
                subject: "google-test-subject".to_string(),
                email: Some("gtest@example.com".to_string()),
            },
        });

        let state = stratus_api::app::build_state_with_verifier(config, db_pool.clone(), verifier)
            .await
            .expect("build app state");
        let router = stratus_api::build_router(state);

        Self {
            router,
            db_pool,
            _storage_dir: storage_dir,
        }
    }

    /// Register an account and return its access + refresh tokens.
    pub async fn register(&self, username: &str, password: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": password,
                })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "registration failed: {:?}",
            response.body
        );

        let data = &response.body["data"];
        (
            data["access_token"].as_str().unwrap().to_string(),
            data["refresh_token"].as_str().unwrap().to_string(),
        )
    }

    /// Make a JSON request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req.body(Body::from(body_str)).expect("build request");
        self.send(req).await
    }

    /// Upload a file via the multipart endpoint.
    pub async fn upload(
        &self,
        token: &str,
        filename: &str,
        content_type: &str,
        data: &[u8],
        folder_id: Option<Uuid>,
    ) -> TestResponse {
        const BOUNDARY: &str = "stratus-test-boundary";

        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
                 Content-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
        if let Some(id) = folder_id {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\n\
                     Content-Disposition: form-data; name=\"folder_id\"\r\n\r\n{id}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/files/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("build upload request");

        self.send(req).await
    }

    /// Fetch a raw (non-JSON) response, e.g. a file download.
    pub async fn request_raw(&self, path: &str, token: &str) -> (StatusCode, Vec<u8>) {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("build request");

        let response = self.router.clone().oneshot(req).await.expect("send request");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("read body");
        (status, bytes.to_vec())
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(req).await.expect("send request");
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
        TestResponse { status, body }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}

fn test_config(storage_root: String) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            body_limit_bytes: 50 * 1024 * 1024,
            shutdown_grace_seconds: 5,
            cors: CorsConfig::default(),
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_seconds: 5,
            idle_timeout_seconds: 60,
            create_if_missing: true,
        },
        cache: CacheConfig::default(),
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            jwt_access_ttl_minutes: 15,
            jwt_refresh_ttl_hours: 168,
            password_min_length: 8,
        },
        google: GoogleAuthConfig::default(),
        storage: StorageConfig {
            provider: "local".to_string(),
            download_url_ttl_seconds: 60,
            local: LocalStorageConfig {
                root_path: storage_root,
            },
            s3: S3StorageConfig::default(),
        },
        logging: LoggingConfig::default(),
    }
}
