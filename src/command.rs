// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Command loop serializing access to the metrics engine
//!
//! The engine holds mutable state (the price cache entry and the
//! history log) that must be accessed one request at a time. A single
//! spawned task owns the engine and drains commands from an mpsc
//! channel, so HTTP handlers stay lock-free: they submit a command with
//! a oneshot responder and await the answer.

use std::collections::HashMap;

use alloy_network::AnyNetwork;
use alloy_provider::Provider;
use tokio::sync::{mpsc, oneshot};
use tracing::error;

use crate::metrics::{MetricsEngine, MetricsView};

type Responder<T> = oneshot::Sender<Result<T, String>>;

/// Handle for submitting commands to the metrics task
#[derive(Clone)]
pub struct BlobwatchHandle {
    /// Command channel into the engine task
    pub tx: mpsc::Sender<Command>,
}

/// Commands understood by the metrics task
pub enum Command {
    /// Capture a fresh metrics sample (appends to history)
    Sample(SampleCommand),
    /// Read the full history log
    History(HistoryCommand),
}

/// Request one fresh metrics sample
pub struct SampleCommand {
    /// Channel the resulting view is sent back on
    pub responder: Responder<MetricsView>,
}

/// Request the full history as untyped rows
pub struct HistoryCommand {
    /// Channel the rows are sent back on
    pub responder: Responder<Vec<HashMap<String, String>>>,
}

/// Owns the metrics engine and processes commands sequentially
pub struct CommandHandler<P> {
    engine: MetricsEngine<P>,
}

impl<P> CommandHandler<P>
where
    P: Provider<AnyNetwork> + 'static,
{
    /// Spawn the command loop and return a cloneable handle to it
    pub fn init(engine: MetricsEngine<P>) -> BlobwatchHandle {
        let (tx, mut rx) = mpsc::channel(10);

        let mut handler = CommandHandler { engine };

        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    Command::Sample(cmd) => {
                        let result = handler
                            .engine
                            .sample()
                            .await
                            .map(|report| MetricsView::from(&report))
                            .map_err(|e| e.to_string());

                        if cmd.responder.send(result).is_err() {
                            error!("Failed to send metrics sample response");
                        }
                    }
                    Command::History(cmd) => {
                        let result = handler
                            .engine
                            .history()
                            .read_all()
                            .map_err(|e| e.to_string());

                        if cmd.responder.send(result).is_err() {
                            error!("Failed to send history response");
                        }
                    }
                }
            }
        });

        BlobwatchHandle { tx }
    }
}
