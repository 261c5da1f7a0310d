//! CloudFormation template model
//!
//! A [`Template`] declares one `AWS::Route53::HostedZone` resource and one
//! `AWS::Route53::RecordSet` resource per exported record set. Templates are
//! assembled with a [`TemplateBuilder`], which applies the apex filtering rule and
//! the configured [`CollisionPolicy`], and rendered to YAML with [`KeyOrder`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ExportError;
use crate::rr::{self, HostedZone, RecordData, RecordSet, TimeToLive};

mod config;
mod name;
pub mod order;

pub use self::config::{CollisionPolicy, ExportOptions, UnknownPolicy};
pub use self::name::resource_name;
pub use self::order::KeyOrder;

/// The only template format version CloudFormation defines
pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// Logical name of the hosted zone resource, referenced by every record set
pub const HOSTED_ZONE_RESOURCE: &str = "HostedZone";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    format_version: String,
    description: String,
    resources: BTreeMap<String, Resource>,
}

impl Template {
    /// Build the template for a zone from its record sets.
    pub fn for_zone<I>(
        zone: &HostedZone,
        record_sets: I,
        options: &ExportOptions,
    ) -> Result<Self, ExportError>
    where
        I: IntoIterator<Item = RecordSet>,
    {
        let mut builder = TemplateBuilder::new(zone, options);
        for rset in record_sets {
            builder.push(rset)?;
        }
        Ok(builder.finish())
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn resources(&self) -> &BTreeMap<String, Resource> {
        &self.resources
    }

    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    /// The template as a generic YAML document
    pub fn to_value(&self) -> Result<serde_yaml::Value, serde_yaml::Error> {
        serde_yaml::to_value(self)
    }

    /// Render the template as YAML with CloudFormation key ordering.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        KeyOrder::cloudformation().render(self)
    }
}

/// A resource declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "Type", content = "Properties")]
pub enum Resource {
    #[serde(rename = "AWS::Route53::HostedZone")]
    HostedZone(HostedZoneProperties),

    #[serde(rename = "AWS::Route53::RecordSet")]
    RecordSet(RecordSetProperties),
}

impl Resource {
    pub fn hosted_zone(zone: &HostedZone) -> Self {
        Resource::HostedZone(HostedZoneProperties {
            name: zone.name().to_owned(),
            config: HostedZoneConfig {
                comment: zone.name().to_owned(),
            },
        })
    }

    pub fn record_set(rset: &RecordSet) -> Self {
        let data = match rset.data() {
            RecordData::Values { ttl, records } => RecordProperties::Values {
                records: records.clone(),
                ttl: *ttl,
            },
            RecordData::Alias(target) => RecordProperties::Alias {
                target: AliasTargetProperties::from(target),
            },
        };

        Resource::RecordSet(RecordSetProperties {
            hosted_zone_id: Ref::new(HOSTED_ZONE_RESOURCE),
            name: rset.name().to_owned(),
            record_type: rset.record_type().to_owned(),
            data,
        })
    }

    pub fn as_record_set(&self) -> Option<&RecordSetProperties> {
        match self {
            Resource::RecordSet(props) => Some(props),
            Resource::HostedZone(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostedZoneProperties {
    pub name: String,
    #[serde(rename = "HostedZoneConfig")]
    pub config: HostedZoneConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostedZoneConfig {
    pub comment: String,
}

/// `{"Ref": <logical name>}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ref {
    #[serde(rename = "Ref")]
    pub target: String,
}

impl Ref {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordSetProperties {
    pub hosted_zone_id: Ref,
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(flatten)]
    pub data: RecordProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordProperties {
    Values {
        #[serde(rename = "ResourceRecords")]
        records: Vec<String>,
        #[serde(rename = "TTL")]
        ttl: TimeToLive,
    },
    Alias {
        #[serde(rename = "AliasTarget")]
        target: AliasTargetProperties,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasTargetProperties {
    #[serde(rename = "DNSName")]
    pub dns_name: String,
    #[serde(rename = "HostedZoneId")]
    pub hosted_zone_id: String,
    #[serde(rename = "EvaluateTargetHealth")]
    pub evaluate_target_health: bool,
}

impl From<&rr::AliasTarget> for AliasTargetProperties {
    fn from(target: &rr::AliasTarget) -> Self {
        Self {
            dns_name: target.dns_name.clone(),
            hosted_zone_id: target.hosted_zone_id.clone(),
            evaluate_target_health: target.evaluate_target_health,
        }
    }
}

/// Incrementally assembles a [`Template`] as record sets arrive.
#[derive(Debug)]
pub struct TemplateBuilder<'a> {
    zone: &'a HostedZone,
    options: &'a ExportOptions,
    resources: BTreeMap<String, Resource>,
    skipped: usize,
}

impl<'a> TemplateBuilder<'a> {
    pub fn new(zone: &'a HostedZone, options: &'a ExportOptions) -> Self {
        let mut resources = BTreeMap::new();
        resources.insert(HOSTED_ZONE_RESOURCE.to_owned(), Resource::hosted_zone(zone));
        Self {
            zone,
            options,
            resources,
            skipped: 0,
        }
    }

    /// Add a record set to the template.
    ///
    /// The apex NS and SOA record sets are skipped, since Route 53 creates them with
    /// the zone.
    pub fn push(&mut self, rset: RecordSet) -> Result<(), ExportError> {
        if self.zone.is_apex_managed(&rset) {
            tracing::debug!(name = rset.name(), rtype = rset.record_type(), "skipping apex record set");
            self.skipped += 1;
            return Ok(());
        }

        let name = resource_name(rset.name(), rset.record_type());
        let resource = Resource::record_set(&rset);

        if !self.resources.contains_key(&name) {
            self.resources.insert(name, resource);
            return Ok(());
        }

        match self.options.collisions {
            CollisionPolicy::Overwrite => {
                tracing::warn!(resource = %name, "record set replaces an earlier resource with the same name");
                self.resources.insert(name, resource);
            }
            CollisionPolicy::Error => return Err(ExportError::Collision { name }),
            CollisionPolicy::Suffix => {
                let renamed = (2u32..)
                    .map(|n| format!("{name}{n}"))
                    .find(|candidate| !self.resources.contains_key(candidate))
                    .unwrap_or_else(|| name.clone());
                tracing::info!(resource = %name, renamed = %renamed, "renamed colliding resource");
                self.resources.insert(renamed, resource);
            }
        }

        Ok(())
    }

    /// Number of apex record sets left out so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn finish(self) -> Template {
        tracing::debug!(
            resources = self.resources.len(),
            skipped = self.skipped,
            "assembled template"
        );

        let description = self
            .options
            .description
            .clone()
            .unwrap_or_else(|| format!("DNS for {}", self.zone.domain_name()));

        Template {
            format_version: TEMPLATE_FORMAT_VERSION.to_owned(),
            description,
            resources: self.resources,
        }
    }
}
