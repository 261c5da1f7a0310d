use super::RecordSet;

/// Hosted zone metadata, as returned by the zone lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedZone {
    id: String,
    name: String,
}

impl HostedZone {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Identifier of the zone, used to page through its record sets
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fully qualified zone name, with the trailing dot
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zone name without the trailing dot
    pub fn domain_name(&self) -> &str {
        self.name.trim_end_matches('.')
    }

    /// The NS and SOA record sets at the apex are created by Route 53 along with
    /// the zone, so they must not be declared again in a template.
    pub fn is_apex_managed(&self, rset: &RecordSet) -> bool {
        rset.name() == self.name && matches!(rset.record_type(), "NS" | "SOA")
    }
}
