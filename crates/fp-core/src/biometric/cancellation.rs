use tokio_util::sync::CancellationToken;

/// Cancellation handle for one authentication request.
///
/// 单次认证请求的取消句柄。
///
/// Clones share the same signal. Cancelling is idempotent: cancelling an
/// already cancelled or already finished request does nothing.
#[derive(Debug, Clone, Default)]
pub struct CancellationHandle {
    token: CancellationToken,
}

impl CancellationHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once [`CancellationHandle::cancel`] has been called on any clone.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}
