use super::{PhotoEncoder, PhotoSource};
use crate::core::Result;
use futures::future::try_join_all;
use tracing::{Instrument, info_span};

/// Converts every source of a batch concurrently.
///
/// Resolves only once all conversions have finished, with the results in
/// submission order regardless of completion order. If any conversion fails
/// the whole batch fails and no result is returned.
pub async fn encode_batch(encoder: &dyn PhotoEncoder, sources: Vec<PhotoSource>) -> Result<Vec<String>> {
    let span = info_span!("photo_batch", count = sources.len());
    try_join_all(sources.into_iter().map(|source| encoder.encode(source)))
        .instrument(span)
        .await
}
