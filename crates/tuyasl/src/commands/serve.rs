//! `tuyasl serve`: host protocol over stdio.
//!
//! Each stdin line is one JSON host command; each result event is written
//! to stdout as one compact JSON line. On EOF, results still pending are
//! flushed before exiting.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use tuyasl_config::Config;
use tuyasl_core::{Dispatcher, HostCommand, HostEvent, Session};

use crate::error::CliError;

const CHANNEL_CAPACITY: usize = 32;

pub async fn handle(cfg: &Config) -> Result<(), CliError> {
    let session = Arc::new(Session::new(cfg.session_options()?)?);
    info!(region = %session.region(), "serving host protocol on stdio");

    let (command_tx, command_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (event_tx, event_rx) = mpsc::channel(CHANNEL_CAPACITY);

    let dispatcher = tokio::spawn(Dispatcher::new(session, event_tx).run(command_rx));
    let writer = tokio::spawn(write_events(event_rx));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        };
        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<HostCommand>(&line) {
            Ok(command) => {
                debug!(?command, "host command");
                if command_tx.send(command).await.is_err() {
                    break;
                }
            }
            Err(e) => warn!(error = %e, "ignoring malformed host command"),
        }
    }

    // The writer ends once every pending timer has dropped its event sender.
    drop(command_tx);
    dispatcher.await.map_err(task_failed)?;
    writer.await.map_err(task_failed)??;
    Ok(())
}

/// A panicked or cancelled task surfaces as an I/O error.
fn task_failed(err: tokio::task::JoinError) -> CliError {
    error!(error = %err, "serve task failed");
    CliError::Io(std::io::Error::other(err))
}

async fn write_events(mut events: mpsc::Receiver<HostEvent>) -> Result<(), CliError> {
    let mut stdout = tokio::io::stdout();
    while let Some(event) = events.recv().await {
        let mut line = serde_json::to_vec(&event)?;
        line.push(b'\n');
        stdout.write_all(&line).await?;
        stdout.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn crash() {
        panic!("dispatcher crashed");
    }

    #[tokio::test]
    async fn panicked_task_becomes_io_error() {
        let joined = tokio::spawn(crash()).await;

        let err = joined.map_err(task_failed).err();

        assert!(matches!(err, Some(CliError::Io(ref e)) if e.to_string().contains("panicked")));
    }
}
