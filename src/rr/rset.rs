use super::TimeToLive;

/// A single Route 53 resource record set.
///
/// Names are kept exactly as Route 53 reports them, including the trailing dot
/// and any octal escapes (a wildcard label arrives as `\052`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    name: String,
    record_type: String,
    data: RecordData,
}

/// The payload of a record set: either literal values or an alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    Values {
        ttl: TimeToLive,
        records: Vec<String>,
    },
    Alias(AliasTarget),
}

/// Target of an alias record set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTarget {
    pub dns_name: String,
    pub hosted_zone_id: String,
    pub evaluate_target_health: bool,
}

impl RecordSet {
    pub fn new(name: impl Into<String>, record_type: impl Into<String>, data: RecordData) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            data,
        }
    }

    pub fn with_values<I, V>(
        name: impl Into<String>,
        record_type: impl Into<String>,
        ttl: TimeToLive,
        records: I,
    ) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::new(
            name,
            record_type,
            RecordData::Values {
                ttl,
                records: records.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn with_alias(
        name: impl Into<String>,
        record_type: impl Into<String>,
        target: AliasTarget,
    ) -> Self {
        Self::new(name, record_type, RecordData::Alias(target))
    }

    /// Label of the Resource Record Set
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record type, e.g. `A` or `CNAME`
    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    pub fn data(&self) -> &RecordData {
        &self.data
    }
}
