// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP interface
//!
//! Three routes: a rendered dashboard page, the current metrics as
//! JSON, and the full history as JSON. Fetching current metrics is
//! side-effecting by contract (it appends a history row), so both `/`
//! and `/api/data` go through the same sample command. All failures
//! come back as an error-shaped JSON body with a 500 status.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info};

use crate::command::{BlobwatchHandle, Command, HistoryCommand, SampleCommand};
use crate::metrics::MetricsView;

/// Error-shaped response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable failure description
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal_error(message: impl Into<String>) -> ApiError {
    let message = message.into();
    error!(error = %message, "Request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: message }),
    )
}

/// Submit a sample command and await the resulting view
async fn request_sample(handle: &BlobwatchHandle) -> Result<MetricsView, ApiError> {
    let (responder_tx, responder_rx) = oneshot::channel();

    handle
        .tx
        .send(Command::Sample(SampleCommand {
            responder: responder_tx,
        }))
        .await
        .map_err(|_| internal_error("Metrics task is not running"))?;

    match responder_rx.await {
        Ok(Ok(view)) => Ok(view),
        Ok(Err(err)) => Err(internal_error(err)),
        Err(_) => Err(internal_error("No response from metrics task")),
    }
}

/// Handler for the dashboard page
async fn index(State(handle): State<BlobwatchHandle>) -> Result<Html<String>, ApiError> {
    let view = request_sample(&handle).await?;
    Ok(Html(render_index(&view)))
}

/// Handler for the `/api/data` endpoint
async fn api_data(State(handle): State<BlobwatchHandle>) -> Result<Json<MetricsView>, ApiError> {
    let view = request_sample(&handle).await?;
    Ok(Json(view))
}

/// Handler for the `/api/history` endpoint
async fn api_history(
    State(handle): State<BlobwatchHandle>,
) -> Result<Json<Vec<HashMap<String, String>>>, ApiError> {
    let (responder_tx, responder_rx) = oneshot::channel();

    handle
        .tx
        .send(Command::History(HistoryCommand {
            responder: responder_tx,
        }))
        .await
        .map_err(|_| internal_error("Metrics task is not running"))?;

    match responder_rx.await {
        Ok(Ok(rows)) => Ok(Json(rows)),
        Ok(Err(err)) => Err(internal_error(err)),
        Err(_) => Err(internal_error("No response from metrics task")),
    }
}

/// Render the dashboard page for a metrics view
fn render_index(view: &MetricsView) -> String {
    let fee_note = if view.fee_is_zero {
        "<p class=\"note\">Blob base fee is zero: no blob demand right now.</p>"
    } else {
        ""
    };
    let annual = view
        .annual_revenue_usd
        .as_deref()
        .unwrap_or("collecting data...");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>blobwatch</title>
<style>
body {{ font-family: monospace; margin: 2em auto; max-width: 48em; }}
table {{ border-collapse: collapse; width: 100%; }}
td, th {{ border: 1px solid #ccc; padding: 0.4em 0.8em; text-align: left; }}
.note {{ color: #a60; }}
</style>
</head>
<body>
<h1>blobwatch</h1>
<p>Block {block_number} &middot; {timestamp} UTC</p>
{fee_note}
<table>
<tr><th>Blob base fee</th><td>{blob_fee_wei} wei ({blob_fee_eth} ETH)</td></tr>
<tr><th>Cost per blob</th><td>{cost_per_blob_eth} ETH ({cost_per_blob_usd})</td></tr>
<tr><th>Blob gas used</th><td>{blob_gas_used}</td></tr>
<tr><th>Block blob revenue</th><td>{block_revenue_eth} ETH ({block_revenue_usd})</td></tr>
<tr><th>Base fee burned</th><td>{base_fee_burned_eth} ETH ({base_fee_burned_usd})</td></tr>
<tr><th>ETH price</th><td>{eth_price_usd}</td></tr>
<tr><th>Annualized blob revenue</th><td>{annual}</td></tr>
</table>
<p><a href="/api/data">current JSON</a> &middot; <a href="/api/history">history JSON</a></p>
</body>
</html>
"#,
        block_number = view.block_number,
        timestamp = view.timestamp,
        fee_note = fee_note,
        blob_fee_wei = view.blob_fee_wei,
        blob_fee_eth = view.blob_fee_eth,
        cost_per_blob_eth = view.cost_per_blob_eth,
        cost_per_blob_usd = view.cost_per_blob_usd,
        blob_gas_used = view.blob_gas_used,
        block_revenue_eth = view.block_revenue_eth,
        block_revenue_usd = view.block_revenue_usd,
        base_fee_burned_eth = view.base_fee_burned_eth,
        base_fee_burned_usd = view.base_fee_burned_usd,
        eth_price_usd = view.eth_price_usd,
        annual = annual,
    )
}

/// Starts the API server.
pub async fn serve_api(listener: TcpListener, handle: BlobwatchHandle) -> anyhow::Result<()> {
    let app = Router::new()
        .route("/", get(index))
        .route("/api/data", get(api_data))
        .route("/api/history", get(api_history))
        .with_state(handle);

    let addr = listener.local_addr()?;

    info!(address = ?addr, "Starting server");

    axum::serve(listener, app).await?;

    Ok(())
}
