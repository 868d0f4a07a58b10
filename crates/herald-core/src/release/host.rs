//! ReleaseHost trait definition.

use herald_types::error::HostError;
use herald_types::release::{NewRelease, Release};

/// Port for the source-hosting release API.
///
/// An implementation is bound to a single repository.
pub trait ReleaseHost: Send + Sync {
    /// Create a release and return the created record.
    fn create_release(
        &self,
        release: &NewRelease,
    ) -> impl std::future::Future<Output = Result<Release, HostError>> + Send;

    /// Overwrite the body of an existing release.
    fn update_release_body(
        &self,
        release_id: u64,
        body: &str,
    ) -> impl std::future::Future<Output = Result<Release, HostError>> + Send;
}
