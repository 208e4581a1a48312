use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use utoipa::ToSchema;

use crate::models::records::RpcAuthentication;

/// Number of fractional digits used when rendering a gwei factor
pub const GWEI_FACTOR_DECIMAL_PLACES: u32 = 9;

/// Client-facing representation of a chain
///
/// Field order matches the JSON object returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChainResponse {
    #[schema(example = "1")]
    pub chain_id: String,
    pub chain_name: String,
    pub short_name: String,
    pub description: String,
    pub l2: bool,
    pub rpc_uri: RpcUri,
    pub safe_apps_rpc_uri: RpcUri,
    pub block_explorer_uri_template: BlockExplorerUriTemplate,
    pub native_currency: NativeCurrency,
    pub transaction_service: Option<String>,
    pub vpc_transaction_service: String,
    pub theme: Theme,
    pub gas_price: Vec<GasPrice>,
    pub ens_registry_address: Option<String>,
    pub recommended_master_copy_version: String,
    pub disabled_wallets: Vec<String>,
    pub features: Vec<String>,
}

/// RPC endpoint together with the way clients authenticate against it
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RpcUri {
    pub authentication: RpcAuthentication,
    pub value: String,
}

/// URI templates of the block explorer
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BlockExplorerUriTemplate {
    pub address: String,
    pub tx_hash: String,
    pub api: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: i32,
    pub logo_uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Theme {
    pub text_color: String,
    pub background_color: String,
}

/// Gas price policy as seen by clients
///
/// Rendered as an object tagged with `"type": "oracle"` or `"type": "fixed"`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GasPrice {
    /// Gas price is fetched from an external oracle
    Oracle {
        uri: String,
        gas_parameter: Option<String>,
        #[serde(serialize_with = "serialize_gwei_factor")]
        #[schema(value_type = String, example = "1.000000000")]
        gwei_factor: Decimal,
    },
    /// Gas price is a static wei amount
    Fixed {
        #[schema(example = "24000000000")]
        wei_value: String,
    },
}

/// Limit/offset page of results
#[derive(Debug, Clone, Serialize, ToSchema)]
#[aliases(ChainPage = Page<ChainResponse>)]
pub struct Page<T> {
    /// Total number of items across all pages
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Renders a gwei factor as a string with a fixed number of decimal places,
/// e.g. `1` becomes `"1.000000000"`.
pub fn format_gwei_factor(factor: &Decimal) -> String {
    let rounded = factor.round_dp(GWEI_FACTOR_DECIMAL_PLACES);
    format!("{:.*}", GWEI_FACTOR_DECIMAL_PLACES as usize, rounded)
}

fn serialize_gwei_factor<S>(factor: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_gwei_factor(factor))
}
