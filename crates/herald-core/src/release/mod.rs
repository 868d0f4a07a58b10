//! Release creation and update steps.

pub mod host;

use herald_types::error::HostError;
use herald_types::release::{NewRelease, Release};
use tracing::info;

use self::host::ReleaseHost;

/// Create a published release named `Release {tag}` with an empty body.
///
/// Errors propagate unchanged; there is no retry.
#[tracing::instrument(name = "create_release", skip_all, fields(tag = %tag))]
pub async fn create_release_for_tag<H: ReleaseHost>(
    host: &H,
    tag: &str,
) -> Result<Release, HostError> {
    let release = host.create_release(&NewRelease::for_tag(tag)).await?;
    info!(
        release_id = release.id,
        name = %release.display_name(),
        url = %release.html_url,
        "Release created"
    );
    Ok(release)
}

/// Overwrite the release body with generated notes.
#[tracing::instrument(name = "update_release", skip(host, notes), fields(notes_len = notes.len()))]
pub async fn update_release_notes<H: ReleaseHost>(
    host: &H,
    release_id: u64,
    notes: &str,
) -> Result<(), HostError> {
    host.update_release_body(release_id, notes).await?;
    info!("Release notes updated");
    Ok(())
}
