// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

use std::{env, net::SocketAddr};

use chrono::Utc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use opencourse_server::{
    api::router,
    auth::{hash_password, Role},
    config::{
        DATA_DIR_ENV, DEFAULT_DATA_DIR, DEFAULT_HOST, DEFAULT_PORT, HOST_ENV, LOG_FORMAT_ENV,
        PORT_ENV, SEED_ADMIN_EMAIL_ENV, SEED_ADMIN_PASSWORD_ENV, SESSION_SECRET_ENV,
    },
    state::{AppState, AuthConfig},
    storage::{DocumentStore, StoragePaths, StoredStudent, StudentRepository},
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    match env::var(LOG_FORMAT_ENV).as_deref() {
        Ok("json") => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

/// Create the bootstrap admin account when both seed variables are set
/// and the email is not yet registered.
fn seed_admin(store: &DocumentStore) {
    let (Ok(email), Ok(password)) = (
        env::var(SEED_ADMIN_EMAIL_ENV),
        env::var(SEED_ADMIN_PASSWORD_ENV),
    ) else {
        return;
    };

    let repo = StudentRepository::new(store);
    if repo.find_by_email(&email).is_ok() {
        return;
    }

    let Ok(password_hash) = hash_password(&password) else {
        warn!("could not hash seed admin password, skipping seed");
        return;
    };

    let now = Utc::now();
    let admin = StoredStudent {
        id: Uuid::new_v4().to_string(),
        provider_account_id: None,
        full_name: "Administrator".to_string(),
        email,
        password_hash: Some(password_hash),
        avatar: None,
        age: None,
        role: Role::Admin,
        profile_complete: true,
        courses_enrolled: Vec::new(),
        rank: 0,
        quiz_progress: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    match repo.create(&admin) {
        Ok(()) => info!(admin_id = %admin.id, "seeded admin account"),
        Err(err) => warn!(error = %err, "could not seed admin account"),
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() {
    init_tracing();

    let data_dir = env::var(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let mut store = DocumentStore::new(StoragePaths::new(&data_dir));
    store
        .initialize()
        .expect("Failed to initialize document storage");
    info!(data_dir = %data_dir, "document storage initialized");

    let secret = env::var(SESSION_SECRET_ENV).ok();
    if secret.is_none() {
        // The server still comes up for probes, but no session is valid.
        warn!("{SESSION_SECRET_ENV} is not set; all session tokens will be rejected");
    }

    seed_admin(&store);

    let state = AppState::new(store, AuthConfig::new(secret));
    let app = router(state);

    let host = env::var(HOST_ENV).unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port: u16 = env::var(PORT_ENV)
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    info!("OpenCourse server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}
