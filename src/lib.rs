//! Export a Route 53 hosted zone as a CloudFormation YAML template.
//!
//! The zone's record sets are fetched through a [`client::HostedZoneApi`], turned
//! into `AWS::Route53::RecordSet` resources, and rendered with a fixed key order so
//! that repeated exports of the same zone produce identical text.

pub mod client;
pub mod error;
pub mod export;
pub mod rr;
pub mod template;

pub use self::client::{ApiError, HostedZoneApi};
pub use self::error::ExportError;
pub use self::export::Exporter;
pub use self::template::{CollisionPolicy, ExportOptions, Template};
