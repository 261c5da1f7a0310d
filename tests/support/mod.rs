#![allow(unused)]

use std::collections::BTreeMap;
use std::sync::{Mutex, Once};

use route53_cloudformation::client::{ApiError, HostedZoneApi, RecordCursor, RecordSetPage};
use route53_cloudformation::rr::{AliasTarget, HostedZone, RecordSet, TimeToLive};

/// Registers a global default tracing subscriber when called for the first time. This is intended
/// for use in tests.
pub fn subscribe() {
    static INSTALL_TRACING_SUBSCRIBER: Once = Once::new();
    INSTALL_TRACING_SUBSCRIBER.call_once(|| {
        let subscriber = tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .finish();
        tracing::subscriber::set_global_default(subscriber).unwrap();
    });
}

/// In-memory stand-in for Route 53, serving record sets in fixed-size pages.
pub struct TestZoneApi {
    zones: BTreeMap<String, (HostedZone, Vec<RecordSet>)>,
    page_size: usize,
    fail_listing: bool,
    requests: Mutex<Vec<(String, Option<RecordCursor>)>>,
}

impl TestZoneApi {
    pub fn new() -> Self {
        Self {
            zones: BTreeMap::new(),
            page_size: 100,
            fail_listing: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_zone(mut self, zone: HostedZone, record_sets: Vec<RecordSet>) -> Self {
        self.zones
            .insert(zone.id().to_owned(), (zone, record_sets));
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Make every listing call fail with a transport error.
    pub fn failing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Listing calls made so far, as (zone id, start cursor).
    pub fn requests(&self) -> Vec<(String, Option<RecordCursor>)> {
        self.requests.lock().expect("poisoned").clone()
    }
}

#[async_trait::async_trait]
impl HostedZoneApi for TestZoneApi {
    async fn get_hosted_zone(&self, id: &str) -> Result<HostedZone, ApiError> {
        self.zones
            .get(id)
            .map(|(zone, _)| zone.clone())
            .ok_or_else(|| ApiError::NotFound(id.to_owned()))
    }

    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        start: Option<RecordCursor>,
    ) -> Result<RecordSetPage, ApiError> {
        self.requests
            .lock()
            .expect("poisoned")
            .push((zone_id.to_owned(), start.clone()));

        if self.fail_listing {
            return Err(ApiError::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            )));
        }

        let (_, record_sets) = self
            .zones
            .get(zone_id)
            .ok_or_else(|| ApiError::NotFound(zone_id.to_owned()))?;

        let offset = match start {
            Some(cursor) => record_sets
                .iter()
                .position(|rset| {
                    rset.name() == cursor.name && rset.record_type() == cursor.record_type
                })
                .unwrap_or(record_sets.len()),
            None => 0,
        };
        let end = (offset + self.page_size).min(record_sets.len());

        let next = record_sets.get(end).map(|rset| RecordCursor {
            name: rset.name().to_owned(),
            record_type: rset.record_type().to_owned(),
            identifier: None,
        });

        Ok(RecordSetPage {
            record_sets: record_sets[offset..end].to_vec(),
            next,
        })
    }
}

pub fn example_zone() -> HostedZone {
    HostedZone::new("ABC123", "example.com.")
}

/// The apex NS and SOA, an apex A record, and an alias.
pub fn example_record_sets() -> Vec<RecordSet> {
    vec![
        RecordSet::with_values("example.com.", "NS", TimeToLive::from_secs(123), ["ignored"]),
        RecordSet::with_values("example.com.", "SOA", TimeToLive::from_secs(123), ["ignored"]),
        RecordSet::with_values("example.com.", "A", TimeToLive::from_secs(123), ["1.2.3.4"]),
        RecordSet::with_alias(
            "alias.example.com.",
            "A",
            AliasTarget {
                dns_name: "alias.example.org".into(),
                hosted_zone_id: "DEF456".into(),
                evaluate_target_health: true,
            },
        ),
    ]
}
