use std::fmt;

use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How a client authenticates against an RPC endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub enum RpcAuthentication {
    /// The API key has to be appended to the URI path
    #[serde(rename = "API_KEY_PATH")]
    ApiKeyPath,
    /// The URI can be used as is
    #[default]
    #[serde(rename = "NO_AUTHENTICATION")]
    NoAuthentication,
}

/// Stored configuration of a blockchain network
///
/// This is the internal shape of a chain as it is kept by the store. It is never
/// sent to clients directly; see [`crate::representation`] for the public form.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChainRecord {
    /// EIP-155 chain id, also the primary key
    pub id: u64,

    /// Listing weight, lower values are listed first
    #[serde(default = "default_relevance")]
    pub relevance: u32,

    pub name: String,
    pub short_name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub l2: bool,

    #[serde(default)]
    pub rpc_authentication: RpcAuthentication,
    pub rpc_uri: String,

    #[serde(default)]
    pub safe_apps_rpc_authentication: RpcAuthentication,
    pub safe_apps_rpc_uri: String,

    pub block_explorer_uri_address_template: String,
    pub block_explorer_uri_tx_hash_template: String,
    pub block_explorer_uri_api_template: String,

    pub currency_name: String,
    pub currency_symbol: String,
    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: i32,
    /// Path of the uploaded logo, relative to the media root
    pub currency_logo_uri: String,

    #[serde(default)]
    pub transaction_service_uri: Option<String>,
    pub vpc_transaction_service_uri: String,

    pub theme_text_color: String,
    pub theme_background_color: String,

    #[serde(default)]
    pub ens_registry_address: Option<Address>,

    pub recommended_master_copy_version: String,
}

impl fmt::Display for ChainRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | chain_id={}", self.name, self.id)
    }
}

/// Gas price policy attached to a chain
///
/// A usable record has either an oracle or a fixed value, never both. The store
/// does not enforce this; invalid combinations surface when rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GasPriceRecord {
    /// Chain this policy belongs to
    pub chain_id: u64,

    #[serde(default)]
    pub oracle_uri: Option<String>,

    #[serde(default)]
    pub oracle_parameter: Option<String>,

    #[serde(default = "default_gwei_factor")]
    pub gwei_factor: Decimal,

    #[serde(default)]
    pub fixed_wei_value: Option<String>,

    #[serde(default = "default_rank")]
    pub rank: i32,
}

/// A wallet that can be disabled per chain
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WalletRecord {
    pub key: String,

    /// Chains on which the wallet is enabled
    #[serde(default)]
    pub chains: Vec<u64>,
}

impl WalletRecord {
    pub fn is_enabled_on(&self, chain_id: u64) -> bool {
        self.chains.contains(&chain_id)
    }
}

/// A client feature toggled per chain
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeatureRecord {
    pub key: String,

    /// Chains on which the feature is enabled
    #[serde(default)]
    pub chains: Vec<u64>,
}

impl FeatureRecord {
    pub fn is_enabled_on(&self, chain_id: u64) -> bool {
        self.chains.contains(&chain_id)
    }
}

fn default_relevance() -> u32 {
    100
}

fn default_rank() -> i32 {
    100
}

fn default_currency_decimals() -> i32 {
    18
}

fn default_gwei_factor() -> Decimal {
    Decimal::ONE
}
