use std::time::Duration;

/// Settings that shape the behavior of the services.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct AuctionConfig {
    /// How long a listing stays open when it is created without an end time
    #[cfg_attr(
        feature = "serde",
        serde(
            default = "default_duration",
            deserialize_with = "humantime_serde::deserialize",
            serialize_with = "humantime_serde::serialize"
        )
    )]
    #[cfg_attr(feature = "schemars", schemars(with = "String"))]
    pub default_duration: Duration,
}

fn default_duration() -> Duration {
    Duration::from_secs(7 * 24 * 60 * 60)
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self {
            default_duration: default_duration(),
        }
    }
}
