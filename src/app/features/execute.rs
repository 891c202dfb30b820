use crate::app::action::Action;
use crate::domain::action::CommandAction;
use crate::domain::models::CommandId;
use chrono::Local;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Runs `action` in the background. Exactly one
/// [`Action::ExecutionFinished`] is sent for every call, even when the action
/// panics, so the palette's loading flag is always released. If the loop has
/// already dropped its receiver the completion is logged and discarded.
pub fn spawn_execution(
    id: CommandId,
    action: Arc<dyn CommandAction>,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(command = %id, "executing command");
        let result = run_guarded(&id, action).await;
        let ok = result.is_ok();
        let finished = Action::ExecutionFinished {
            id: id.clone(),
            result,
            finished_at: Local::now(),
        };
        if tx.send(finished).await.is_err() {
            debug!(command = %id, ok, "completion dropped; palette loop has exited");
        }
    })
}

async fn run_guarded(id: &CommandId, action: Arc<dyn CommandAction>) -> Result<String, String> {
    // `run` is called inside the guarded future so a panic while building the
    // future is caught too.
    match AssertUnwindSafe(async move { action.run().await })
        .catch_unwind()
        .await
    {
        Ok(Ok(msg)) => Ok(msg),
        Ok(Err(e)) => Err(format!("{e:#}")),
        Err(_) => {
            error!(command = %id, "command action panicked");
            Err(format!("{id} panicked"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::action::MockCommandAction;

    async fn run_one(mock: MockCommandAction) -> Action {
        let (tx, mut rx) = mpsc::channel(1);
        spawn_execution(CommandId::new("bet.place"), Arc::new(mock), tx)
            .await
            .unwrap();
        rx.recv().await.unwrap()
    }

    #[tokio::test]
    async fn test_success_reported() {
        let mut mock = MockCommandAction::new();
        mock.expect_run()
            .times(1)
            .returning(|| Ok("placed".to_string()));

        match run_one(mock).await {
            Action::ExecutionFinished { id, result, .. } => {
                assert_eq!(id, CommandId::new("bet.place"));
                assert_eq!(result, Ok("placed".to_string()));
            }
            other => panic!("Expected Action::ExecutionFinished, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_reported_with_context() {
        let mut mock = MockCommandAction::new();
        mock.expect_run()
            .returning(|| Err(anyhow::anyhow!("market closed").context("place bet")));

        match run_one(mock).await {
            Action::ExecutionFinished { result, .. } => {
                assert_eq!(result, Err("place bet: market closed".to_string()));
            }
            other => panic!("Expected Action::ExecutionFinished, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_completion_after_loop_exit_is_discarded() {
        let mut mock = MockCommandAction::new();
        mock.expect_run()
            .times(1)
            .returning(|| Ok("placed".to_string()));

        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let handle = spawn_execution(CommandId::new("bet.place"), Arc::new(mock), tx);
        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn test_panic_still_reports_completion() {
        let mut mock = MockCommandAction::new();
        mock.expect_run().returning(|| panic!("bad odds table"));

        match run_one(mock).await {
            Action::ExecutionFinished { result, .. } => {
                assert_eq!(result, Err("bet.place panicked".to_string()));
            }
            other => panic!("Expected Action::ExecutionFinished, got {other:?}"),
        }
    }
}
