use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeToLive(u32);

impl TimeToLive {
    pub fn from_secs(secs: u32) -> Self {
        TimeToLive(secs)
    }
}

impl From<u32> for TimeToLive {
    fn from(value: u32) -> Self {
        TimeToLive(value)
    }
}

impl TryFrom<i64> for TimeToLive {
    type Error = std::num::TryFromIntError;

    /// Route 53 reports TTLs as signed 64-bit integers.
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value).map(TimeToLive)
    }
}
