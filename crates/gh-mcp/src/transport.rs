//! Transport loop
//!
//! Newline-delimited JSON over a reader/writer pair. One line in, at most one
//! line out, strictly in order.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::server::McpServer;
use crate::Result;

/// Lifecycle of [`serve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Reading and answering requests
    Running,
    /// Input ended; flushing output before stopping
    Draining,
    /// Terminal
    Stopped,
}

/// Run the read-dispatch-write loop until the input ends.
///
/// Lines that are not valid UTF-8 or not JSON are dropped without a reply.
/// An I/O error on either stream ends the loop with that error.
pub async fn serve<R, W>(engine: &McpServer, mut reader: R, mut writer: W) -> Result<LoopState>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut state = LoopState::Running;
    let mut buf = Vec::new();

    while state != LoopState::Stopped {
        state = match state {
            LoopState::Running => {
                buf.clear();
                let read = reader.read_until(b'\n', &mut buf).await.map_err(|e| {
                    tracing::error!(error = %e, "Failed to read from input stream");
                    e
                })?;
                if read == 0 {
                    LoopState::Draining
                } else {
                    if let Some(reply) = process_line(engine, &buf).await {
                        write_line(&mut writer, &reply).await?;
                    }
                    LoopState::Running
                }
            }
            LoopState::Draining => {
                writer.flush().await.map_err(|e| {
                    tracing::error!(error = %e, "Failed to flush output stream");
                    e
                })?;
                tracing::info!("Input closed, shutting down");
                LoopState::Stopped
            }
            LoopState::Stopped => LoopState::Stopped,
        };
    }

    Ok(state)
}

/// [`serve`] over the process's stdin and stdout.
pub async fn serve_stdio(engine: &McpServer) -> Result<LoopState> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    tracing::info!("MCP server ready, listening on stdio");
    serve(engine, stdin, stdout).await
}

async fn process_line(engine: &McpServer, raw: &[u8]) -> Option<String> {
    let line = match std::str::from_utf8(raw) {
        Ok(line) => line.trim(),
        Err(e) => {
            tracing::debug!(error = %e, "Dropping line that is not valid UTF-8");
            return None;
        }
    };
    if line.is_empty() {
        return None;
    }

    tracing::debug!(request = %line, "Received message");

    match engine.handle_message(line).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::debug!(error = %e, "Dropping unparseable line");
            None
        }
    }
}

async fn write_line<W>(writer: &mut W, reply: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut bytes = Vec::with_capacity(reply.len() + 1);
    bytes.extend_from_slice(reply.as_bytes());
    bytes.push(b'\n');

    let written = async {
        writer.write_all(&bytes).await?;
        writer.flush().await
    }
    .await;

    written.map_err(|e| {
        tracing::error!(error = %e, "Failed to write response");
        e.into()
    })
}
