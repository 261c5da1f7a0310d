//! Access to the DNS hosting API
//!
//! The exporter only needs two calls from Route 53: a zone lookup, and a paginated
//! listing of the zone's record sets. Both sit behind [`HostedZoneApi`] so that the
//! export pipeline can be driven by any implementation, including in-memory fakes.

use futures::{Stream, TryStreamExt as _, stream};

use crate::rr::{HostedZone, RecordSet};

#[cfg(feature = "aws")]
pub mod route53;

#[cfg(feature = "aws")]
pub use self::route53::{Route53Client, Route53Configuration};

/// Error type for hosted zone API calls
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no hosted zone with id {0}")]
    NotFound(String),

    #[error("hosted zone request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("record set {name} is malformed: {reason}")]
    Malformed { name: String, reason: &'static str },
}

impl ApiError {
    /// Wrap any client or transport error
    pub fn transport<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        ApiError::Transport(error.into())
    }
}

/// Position from which to continue listing record sets.
///
/// Route 53 continues a truncated listing from a record name, a record type, and,
/// for record sets using a routing policy, a set identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCursor {
    pub name: String,
    pub record_type: String,
    pub identifier: Option<String>,
}

/// One page of a record set listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSetPage {
    pub record_sets: Vec<RecordSet>,

    /// Where the next page starts, or `None` if this was the last page.
    pub next: Option<RecordCursor>,
}

/// The subset of the DNS hosting API used to export a zone
#[async_trait::async_trait]
pub trait HostedZoneApi {
    /// Fetch zone metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no zone has this id.
    async fn get_hosted_zone(&self, id: &str) -> Result<HostedZone, ApiError>;

    /// Fetch a single page of record sets, starting at `start`, or at the
    /// beginning of the zone when `start` is `None`.
    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        start: Option<RecordCursor>,
    ) -> Result<RecordSetPage, ApiError>;
}

#[async_trait::async_trait]
impl<A> HostedZoneApi for &A
where
    A: HostedZoneApi + Sync + ?Sized,
{
    async fn get_hosted_zone(&self, id: &str) -> Result<HostedZone, ApiError> {
        (**self).get_hosted_zone(id).await
    }

    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        start: Option<RecordCursor>,
    ) -> Result<RecordSetPage, ApiError> {
        (**self).list_resource_record_sets(zone_id, start).await
    }
}

/// All record sets in a zone, in the order the API returns them.
///
/// Pages are requested lazily, one at a time, as the stream is polled. Each call
/// starts a fresh listing from the beginning of the zone.
pub fn record_sets<'a, A>(
    api: &'a A,
    zone_id: &'a str,
) -> impl Stream<Item = Result<RecordSet, ApiError>> + Send + 'a
where
    A: HostedZoneApi + Sync + ?Sized,
{
    // `None` once the last page has been fetched, otherwise the start of the next page.
    let initial: Option<Option<RecordCursor>> = Some(None);

    stream::try_unfold(initial, move |state| async move {
        let Some(start) = state else {
            return Ok::<_, ApiError>(None);
        };

        let page = api.list_resource_record_sets(zone_id, start).await?;
        tracing::trace!(
            zone = zone_id,
            count = page.record_sets.len(),
            truncated = page.next.is_some(),
            "fetched record set page"
        );

        let records = stream::iter(page.record_sets.into_iter().map(Ok::<_, ApiError>));
        Ok(Some((records, page.next.map(Some))))
    })
    .try_flatten()
}

/// Collect every record set in a zone.
#[tracing::instrument(skip(api), level = "debug")]
pub async fn fetch_record_sets<A>(api: &A, zone_id: &str) -> Result<Vec<RecordSet>, ApiError>
where
    A: HostedZoneApi + Sync + ?Sized,
{
    record_sets(api, zone_id).try_collect().await
}
