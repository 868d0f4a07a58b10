//! ChatNotifier trait definition.

use herald_types::blocks::Block;
use herald_types::error::NotifyError;

/// Port for a chat webhook that accepts Block Kit payloads.
pub trait ChatNotifier: Send + Sync {
    /// POST the blocks as a single message.
    fn post_blocks(
        &self,
        blocks: &[Block],
    ) -> impl std::future::Future<Output = Result<(), NotifyError>> + Send;
}
