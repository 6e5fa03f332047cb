//! Target resolution: classify a configured name as one of the candidate
//! kinds before any loop starts. The poll loops never branch on kind again.

use orangered_core::error::StreamError;
use orangered_core::types::{Target, TargetKind};

use crate::client::ListingClient;

/// Resolve `name` against `candidates`, in order; the first kind whose
/// remote existence check passes wins.
///
/// A transport failure during a check is surfaced as [`StreamError::Resolve`]
/// without retrying; a name matching no candidate is
/// [`StreamError::UnknownTarget`]. Either way no stream instance is started.
pub async fn resolve<C: ListingClient>(
    client: &C,
    name: &str,
    candidates: &[TargetKind],
) -> Result<Target, StreamError> {
    for &kind in candidates {
        match client.exists(kind, name).await {
            Ok(true) => {
                tracing::debug!(kind = kind.as_str(), name, "target resolved");
                return Ok(Target::new(kind, name));
            }
            Ok(false) => {}
            Err(err) => return Err(StreamError::Resolve(err)),
        }
    }
    Err(StreamError::UnknownTarget {
        name: name.to_string(),
    })
}
