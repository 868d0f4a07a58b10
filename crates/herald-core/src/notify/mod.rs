//! Release announcement to the team chat.

pub mod notifier;

use herald_types::error::NotifyError;
use tracing::info;

use crate::blocks::markdown_to_blocks;

use self::notifier::ChatNotifier;

/// Markdown announcement for a published release.
pub fn announcement_markdown(product_name: &str, release_url: &str) -> String {
    format!(
        "@channel\nNew Release for {product_name} is out! 🎉\nCheck the release notes below:\n[View Release in Github]({release_url})"
    )
}

/// Convert the announcement to blocks and post it to the webhook.
#[tracing::instrument(name = "send_announcement", skip(notifier), fields(product = %product_name))]
pub async fn send_announcement<N: ChatNotifier>(
    notifier: &N,
    product_name: &str,
    release_url: &str,
) -> Result<(), NotifyError> {
    let blocks = markdown_to_blocks(&announcement_markdown(product_name, release_url));
    notifier.post_blocks(&blocks).await?;
    info!(blocks = blocks.len(), "Release announcement sent to chat");
    Ok(())
}
