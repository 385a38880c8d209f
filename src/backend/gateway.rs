//! Submission gateway: one fresh backend process per attempt.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::backend::error::SubmissionError;
use crate::backend::protocol::{Ack, BackendReply, CheckinRequest};
use crate::checkin::record::CheckinRecord;
use crate::config::BackendCommand;

/// Seam between the flow controller and whatever persists a check-in.
#[async_trait]
pub trait SubmitBackend: Send + Sync {
    /// Hand the completed record over and classify the outcome.
    async fn submit(&self, record: &CheckinRecord) -> Result<Ack, SubmissionError>;
}

/// Spawns the configured backend executable for each submission.
///
/// No pooling and no retry: a retry is a new user-triggered finish, which
/// comes back through here as a fresh process. The child is awaited to
/// completion with no timeout.
pub struct ProcessBackend {
    command: BackendCommand,
}

impl ProcessBackend {
    pub fn new(command: BackendCommand) -> Self {
        Self { command }
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.command.program);
        cmd.args(&self.command.args);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd
    }
}

#[async_trait]
impl SubmitBackend for ProcessBackend {
    async fn submit(&self, record: &CheckinRecord) -> Result<Ack, SubmissionError> {
        let body = serde_json::to_vec(&CheckinRequest::from_record(record))?;

        tracing::info!(
            program = %self.command.program.display(),
            "spawning check-in backend"
        );
        let mut child = self.build_command().spawn()?;

        // Write-then-close so the child sees EOF on its input.
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&body).await?;
            stdin.shutdown().await?;
        }

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                match output.status.code() {
                    Some(code) => format!("backend exited with code {code}"),
                    None => "backend terminated by signal".to_string(),
                }
            } else {
                stderr
            };
            return Err(SubmissionError::BackendFailed { detail });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match serde_json::from_str::<BackendReply>(stdout.trim()) {
            Ok(payload) => Ok(Ack { payload }),
            Err(err) => Err(SubmissionError::MalformedResponse {
                detail: err.to_string(),
            }),
        }
    }
}
