//! Tessara daemon configuration.
//!
//! Config structs are strict: an unrecognized key is a deserialization
//! error, so a typo in an operator's file fails loudly at boot instead of
//! silently running with defaults.

mod configs;
#[cfg(test)]
mod tests;

use serde::Deserialize;

pub use configs::{AdmissionConfig, TxPoolConfig};

/// Root configuration of the daemon core, usually a `[admission]` and a
/// `[tx_pool]` table in the node's TOML file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Admission controller options.
    #[serde(default)]
    pub admission: AdmissionConfig,
    /// Transaction pool options.
    #[serde(default)]
    pub tx_pool: TxPoolConfig,
}

impl AppConfig {
    /// Deserialize from raw TOML bytes.
    pub fn load_from_slice(slice: &[u8]) -> Result<Self, toml::de::Error> {
        toml::from_slice(slice)
    }
}
