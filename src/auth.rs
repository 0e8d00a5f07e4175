//! Session token providers. The client asks its provider before every request.

use async_trait::async_trait;
use futures_util::future::BoxFuture;

/// Source of the current bearer token. `None` means no active session.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Option<String>;
}

/// Fixed token (or none), e.g. from `OGS_API_TOKEN`.
#[derive(Clone, Debug, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        StaticToken(Some(token.into()))
    }

    pub fn none() -> Self {
        StaticToken(None)
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Adapts an async closure (typically a session lookup) into a provider.
pub struct SessionFn<F>(pub F);

#[async_trait]
impl<F> TokenProvider for SessionFn<F>
where
    F: Fn() -> BoxFuture<'static, Option<String>> + Send + Sync,
{
    async fn access_token(&self) -> Option<String> {
        (self.0)().await
    }
}
