//! Result sink contract for httpcheck.

use crate::result::CheckResult;

/// Consumer of check results.
///
/// Implementations must tolerate concurrent calls: the dispatcher submits
/// from every check task without serializing. Delivery is best effort;
/// failures are observable to the caller and otherwise ignored.
#[async_trait::async_trait]
pub trait Sink: Send + Sync {
    async fn submit(&self, result: &CheckResult) -> anyhow::Result<()>;
}
