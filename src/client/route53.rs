//! Route 53 implementation of [`HostedZoneApi`] on top of the AWS SDK.

use aws_sdk_route53::config::Region;
use aws_sdk_route53::types::{ResourceRecordSet, RrType};
use serde::Deserialize;

use super::{ApiError, HostedZoneApi, RecordCursor, RecordSetPage};
use crate::rr::{AliasTarget, HostedZone, RecordSet, TimeToLive};

/// How to build the Route 53 client.
///
/// Anything left unset falls back to the default AWS configuration chain
/// (environment, shared config files, instance metadata).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Route53Configuration {
    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub profile: Option<String>,
}

/// A Route 53 client
#[derive(Debug, Clone)]
pub struct Route53Client {
    inner: aws_sdk_route53::Client,
}

impl Route53Client {
    pub fn new(inner: aws_sdk_route53::Client) -> Self {
        Self { inner }
    }

    /// Load AWS configuration and construct a client from it.
    pub async fn from_config(config: &Route53Configuration) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }

        let sdk_config = loader.load().await;
        tracing::debug!(region = ?sdk_config.region(), "loaded aws configuration");
        Self::new(aws_sdk_route53::Client::new(&sdk_config))
    }
}

#[async_trait::async_trait]
impl HostedZoneApi for Route53Client {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn get_hosted_zone(&self, id: &str) -> Result<HostedZone, ApiError> {
        let output = self
            .inner
            .get_hosted_zone()
            .id(id)
            .send()
            .await
            .map_err(|error| {
                let error = error.into_service_error();
                if error.is_no_such_hosted_zone() {
                    ApiError::NotFound(id.to_owned())
                } else {
                    ApiError::transport(error)
                }
            })?;

        let zone = output.hosted_zone().ok_or_else(|| ApiError::Malformed {
            name: id.to_owned(),
            reason: "response carries no hosted zone",
        })?;

        Ok(HostedZone::new(zone.id(), zone.name()))
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        start: Option<RecordCursor>,
    ) -> Result<RecordSetPage, ApiError> {
        let (name, record_type, identifier) = match start {
            Some(cursor) => (
                Some(cursor.name),
                Some(RrType::from(cursor.record_type.as_str())),
                cursor.identifier,
            ),
            None => (None, None, None),
        };

        let output = self
            .inner
            .list_resource_record_sets()
            .hosted_zone_id(zone_id)
            .set_start_record_name(name)
            .set_start_record_type(record_type)
            .set_start_record_identifier(identifier)
            .send()
            .await
            .map_err(|error| {
                let error = error.into_service_error();
                if error.is_no_such_hosted_zone() {
                    ApiError::NotFound(zone_id.to_owned())
                } else {
                    ApiError::transport(error)
                }
            })?;

        let record_sets = output
            .resource_record_sets()
            .iter()
            .map(convert_record_set)
            .collect::<Result<Vec<_>, _>>()?;

        let next = next_cursor(
            zone_id,
            output.is_truncated(),
            output.next_record_name(),
            output.next_record_type(),
            output.next_record_identifier(),
        )?;

        Ok(RecordSetPage { record_sets, next })
    }
}

/// Where a listing continues, given the truncation flag and continuation fields of
/// a `ListResourceRecordSets` response.
fn next_cursor(
    zone_id: &str,
    truncated: bool,
    name: Option<&str>,
    record_type: Option<&RrType>,
    identifier: Option<&str>,
) -> Result<Option<RecordCursor>, ApiError> {
    match (truncated, name, record_type) {
        (true, Some(name), Some(record_type)) => Ok(Some(RecordCursor {
            name: name.to_owned(),
            record_type: record_type.as_str().to_owned(),
            identifier: identifier.map(str::to_owned),
        })),
        (true, _, _) => Err(ApiError::Malformed {
            name: zone_id.to_owned(),
            reason: "truncated listing without a continuation record",
        }),
        (false, _, _) => Ok(None),
    }
}

fn convert_record_set(rset: &ResourceRecordSet) -> Result<RecordSet, ApiError> {
    let name = rset.name();
    let record_type = rset.r#type().as_str();

    if let Some(alias) = rset.alias_target() {
        return Ok(RecordSet::with_alias(
            name,
            record_type,
            AliasTarget {
                dns_name: alias.dns_name().to_owned(),
                hosted_zone_id: alias.hosted_zone_id().to_owned(),
                evaluate_target_health: alias.evaluate_target_health(),
            },
        ));
    }

    let ttl = rset
        .ttl()
        .ok_or_else(|| ApiError::Malformed {
            name: name.to_owned(),
            reason: "record set has neither a TTL nor an alias target",
        })
        .and_then(|ttl| {
            TimeToLive::try_from(ttl).map_err(|_| ApiError::Malformed {
                name: name.to_owned(),
                reason: "TTL out of range",
            })
        })?;

    Ok(RecordSet::with_values(
        name,
        record_type,
        ttl,
        rset.resource_records().iter().map(|record| record.value()),
    ))
}
