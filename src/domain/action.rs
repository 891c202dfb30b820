use anyhow::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::sync::Arc;

/// The work behind a palette command. Takes no input; on success returns a
/// short status message for the host to display.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandAction: Send + Sync {
    async fn run(&self) -> Result<String>;
}

/// Adapts a closure returning a boxed future into a [`CommandAction`].
pub struct FnAction<F>(F);

impl<F> FnAction<F>
where
    F: Fn() -> BoxFuture<'static, Result<String>> + Send + Sync + 'static,
{
    pub fn new(f: F) -> Arc<dyn CommandAction> {
        Arc::new(Self(f))
    }
}

#[async_trait]
impl<F> CommandAction for FnAction<F>
where
    F: Fn() -> BoxFuture<'static, Result<String>> + Send + Sync + 'static,
{
    async fn run(&self) -> Result<String> {
        (self.0)().await
    }
}
