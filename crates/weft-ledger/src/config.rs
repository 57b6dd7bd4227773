use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Configuration for a ledger access client.
///
/// Endpoint overrides are plain data handed to the client at construction
/// time. Two clients with different configs coexist in one process without
/// observing each other — there is deliberately no process-wide override
/// registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// The network this client reads from (e.g. "mainnet", "testnet").
    pub network: String,
    /// Per-network endpoint overrides. A network absent from this map
    /// uses whatever default the concrete client ships with.
    pub endpoint_overrides: BTreeMap<String, String>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            network: "mainnet".to_string(),
            endpoint_overrides: BTreeMap::new(),
        }
    }
}

impl LedgerConfig {
    /// A config targeting the given network with no overrides.
    pub fn for_network(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            ..Default::default()
        }
    }

    /// Add an endpoint override for a network.
    pub fn with_override(
        mut self,
        network: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        self.endpoint_overrides
            .insert(network.into(), endpoint.into());
        self
    }

    /// The endpoint override for a network, if one is configured.
    pub fn endpoint_for(&self, network: &str) -> Option<&str> {
        self.endpoint_overrides.get(network).map(String::as_str)
    }

    /// The endpoint override for this config's own network.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint_for(&self.network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_mainnet_with_no_overrides() {
        let config = LedgerConfig::default();
        assert_eq!(config.network, "mainnet");
        assert!(config.endpoint().is_none());
    }

    #[test]
    fn override_resolution() {
        let config = LedgerConfig::for_network("testnet")
            .with_override("testnet", "wss://example.test:6006")
            .with_override("mainnet", "wss://example.main:6006");

        assert_eq!(config.endpoint(), Some("wss://example.test:6006"));
        assert_eq!(
            config.endpoint_for("mainnet"),
            Some("wss://example.main:6006")
        );
        assert_eq!(config.endpoint_for("devnet"), None);
    }

    #[test]
    fn configs_are_independent_values() {
        let a = LedgerConfig::default().with_override("mainnet", "wss://a");
        let b = LedgerConfig::default();
        assert_eq!(a.endpoint(), Some("wss://a"));
        assert_eq!(b.endpoint(), None);
    }

    #[test]
    fn serde_roundtrip() {
        let config = LedgerConfig::for_network("devnet").with_override("devnet", "wss://d");
        let json = serde_json::to_string(&config).unwrap();
        let parsed: LedgerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
