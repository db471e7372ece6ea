//! JSON HTTP API
//!
//! Every request opens its own store connection on a blocking thread, so
//! readers never wait on the async runtime and see whole saves only.

use super::query::DEFAULT_CHANGE_LIMIT;
use super::CommandResult;
use crate::config::Settings;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use clap::Args;
use rankwatch_core::errors::{ExError, ExErrorKind};
use rankwatch_core::payload::summarize;
use rankwatch_engine::{run_cycle, HttpFetcher};
use rankwatch_store::RankStore;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5000")]
    pub bind: String,
}

#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppConfig>,
}

#[derive(Debug)]
struct AppConfig {
    db_path: PathBuf,
    api_url: String,
    timeout: Duration,
}

impl AppState {
    pub fn new(db_path: PathBuf, api_url: String, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(AppConfig {
                db_path,
                api_url,
                timeout,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChangesQuery {
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    entity: String,
    category: String,
}

fn status_for(kind: ExErrorKind) -> StatusCode {
    match kind {
        ExErrorKind::NotFound => StatusCode::NOT_FOUND,
        ExErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ExErrorKind::ExternalService | ExErrorKind::Timeout => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({"error": code, "message": message.into()})),
    )
        .into_response()
}

fn json_ok<T: Serialize>(value: &T) -> Response {
    Json(value).into_response()
}

/// Run store work off the async runtime and map the outcome to a response.
async fn blocking<T, F>(state: AppState, work: F) -> Response
where
    T: Serialize + Send + 'static,
    F: FnOnce(&AppConfig, &mut RankStore) -> Result<T, ExError> + Send + 'static,
{
    let joined = tokio::task::spawn_blocking(move || {
        let mut store = RankStore::initialize(&state.inner.db_path)?;
        work(&state.inner, &mut store)
    })
    .await;

    match joined {
        Ok(Ok(value)) => json_ok(&value),
        Ok(Err(err)) => {
            tracing::warn!(err_code = err.code(), error = %err, "API request failed");
            json_error(status_for(err.kind()), err.code(), err.message())
        }
        Err(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            ExErrorKind::Internal.code(),
            format!("store worker join error: {e}"),
        ),
    }
}

async fn api_rankings(State(state): State<AppState>) -> Response {
    blocking(state, |_, store| {
        let latest = store.latest()?.ok_or_else(|| {
            ExError::new(ExErrorKind::NotFound)
                .with_op("api_rankings")
                .with_message("no snapshots stored yet")
        })?;
        summarize(&latest.payload).ok_or_else(|| {
            ExError::new(ExErrorKind::NotFound)
                .with_op("api_rankings")
                .with_snapshot_id(latest.id)
                .with_message("latest snapshot does not contain any rankings")
        })
    })
    .await
}

async fn api_changes(State(state): State<AppState>, Query(query): Query<ChangesQuery>) -> Response {
    let limit = query.limit.unwrap_or(DEFAULT_CHANGE_LIMIT);
    blocking(state, move |_, store| store.recent(limit)).await
}

async fn api_history(State(state): State<AppState>, Query(query): Query<HistoryQuery>) -> Response {
    blocking(state, move |_, store| {
        store.history_for(&query.entity, &query.category)
    })
    .await
}

async fn refresh(State(state): State<AppState>) -> Response {
    blocking(state, |config, store| {
        let fetcher = HttpFetcher::new(config.api_url.clone(), config.timeout)?;
        run_cycle(store, &fetcher)
    })
    .await
}

async fn health() -> impl IntoResponse {
    "ok"
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/rankings", get(api_rankings))
        .route("/api/changes", get(api_changes))
        .route("/api/history", get(api_history))
        .route("/refresh", get(refresh).post(refresh))
        .with_state(state)
}

pub fn execute(args: ServeArgs, settings: &Settings) -> CommandResult {
    // Create the schema up front so a bad path fails before binding.
    RankStore::initialize(&settings.db_path)?;

    let state = AppState::new(
        settings.db_path.clone(),
        settings.api_url.clone(),
        settings.timeout(),
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(args.bind.as_str()).await?;
        tracing::info!(bind = %args.bind, "rankwatch API ready");
        println!("Serving on http://{}", args.bind);

        axum::serve(listener, router(state))
            .with_graceful_shutdown(async {
                tokio::signal::ctrl_c().await.ok();
            })
            .await?;
        Ok::<(), std::io::Error>(())
    })?;

    Ok(())
}
