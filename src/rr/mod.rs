//! Resource Record Set Definitions for Route 53 hosted zones

mod rset;
mod ttl;
mod zone;

pub use self::rset::{AliasTarget, RecordData, RecordSet};
pub use self::ttl::TimeToLive;
pub use self::zone::HostedZone;
