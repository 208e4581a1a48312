use tracing::{debug, instrument, warn};

use crate::{
    error::ServiceError,
    models::{
        chain::{BlockExplorerUriTemplate, ChainResponse, GasPrice, NativeCurrency, RpcUri, Theme},
        records::{ChainRecord, GasPriceRecord},
    },
    store::ChainStore,
};

/// Default prefix for stored media files such as currency logos
pub const DEFAULT_MEDIA_BASE_URL: &str = "/media/";

/// Turns stored chain records into their client-facing representation
///
/// The serializer itself is stateless apart from the base URL used to expose
/// uploaded files, so a single instance can be shared by all request handlers.
#[derive(Debug, Clone)]
pub struct ChainSerializer {
    media_base_url: String,
}

impl Default for ChainSerializer {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_BASE_URL)
    }
}

impl ChainSerializer {
    /// Creates a serializer exposing media files below `media_base_url`
    pub fn new(media_base_url: impl Into<String>) -> Self {
        Self {
            media_base_url: media_base_url.into(),
        }
    }

    /// Build the representation of a single chain
    ///
    /// Related records are pulled from `store`: gas prices are ordered by rank,
    /// disabled wallets and features by key.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::GasPriceNotConfigured`] when one of the chain's
    /// gas price records is neither a valid oracle nor a valid fixed price.
    #[instrument(skip(self, store, chain), fields(chain_id = chain.id), err)]
    pub fn serialize(
        &self,
        store: &dyn ChainStore,
        chain: &ChainRecord,
    ) -> Result<ChainResponse, ServiceError> {
        let mut ranked_gas_prices = store.gas_prices(chain.id);
        ranked_gas_prices.sort_by_key(|gas_price| gas_price.rank);
        let gas_prices = ranked_gas_prices
            .into_iter()
            .map(|record| gas_price(record, chain))
            .collect::<Result<Vec<_>, _>>()?;

        let mut disabled_wallets: Vec<String> = store
            .disabled_wallets(chain.id)
            .into_iter()
            .map(|wallet| wallet.key.clone())
            .collect();
        disabled_wallets.sort();

        let mut features: Vec<String> = store
            .chain_features(chain.id)
            .into_iter()
            .map(|feature| feature.key.clone())
            .collect();
        features.sort();

        debug!(
            gas_prices = gas_prices.len(),
            disabled_wallets = disabled_wallets.len(),
            features = features.len(),
            "Serialized chain"
        );

        Ok(ChainResponse {
            chain_id: chain.id.to_string(),
            chain_name: chain.name.clone(),
            short_name: chain.short_name.clone(),
            description: chain.description.clone(),
            l2: chain.l2,
            rpc_uri: rpc_uri(chain),
            safe_apps_rpc_uri: safe_apps_rpc_uri(chain),
            block_explorer_uri_template: block_explorer_uri_template(chain),
            native_currency: self.native_currency(chain),
            transaction_service: chain.transaction_service_uri.clone(),
            vpc_transaction_service: chain.vpc_transaction_service_uri.clone(),
            theme: theme(chain),
            gas_price: gas_prices,
            ens_registry_address: chain
                .ens_registry_address
                .map(|address| address.to_checksum(None)),
            recommended_master_copy_version: chain.recommended_master_copy_version.clone(),
            disabled_wallets,
            features,
        })
    }

    /// Serialize several chains, failing on the first misconfigured one
    pub fn serialize_many<'a>(
        &self,
        store: &dyn ChainStore,
        chains: impl IntoIterator<Item = &'a ChainRecord>,
    ) -> Result<Vec<ChainResponse>, ServiceError> {
        chains
            .into_iter()
            .map(|chain| self.serialize(store, chain))
            .collect()
    }

    /// Currency block, with the logo exposed below the media base URL
    fn native_currency(&self, chain: &ChainRecord) -> NativeCurrency {
        NativeCurrency {
            name: chain.currency_name.clone(),
            symbol: chain.currency_symbol.clone(),
            decimals: chain.currency_decimals,
            logo_uri: self.media_url(&chain.currency_logo_uri),
        }
    }

    /// Public URL of a stored media file
    ///
    /// Paths that are already absolute URLs are returned unchanged.
    pub fn media_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.media_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Pick the representation of a gas price record
///
/// A record is an oracle when it has a non-empty `oracle_uri` and no fixed
/// value, and fixed when it has a non-empty `fixed_wei_value` and no oracle.
/// Anything else is rejected with an error naming `chain`.
pub fn gas_price(record: &GasPriceRecord, chain: &ChainRecord) -> Result<GasPrice, ServiceError> {
    match (record.oracle_uri.as_deref(), record.fixed_wei_value.as_deref()) {
        (Some(uri), None) if !uri.is_empty() => Ok(GasPrice::Oracle {
            uri: uri.to_string(),
            gas_parameter: record.oracle_parameter.clone(),
            gwei_factor: record.gwei_factor,
        }),
        (None, Some(wei_value)) if !wei_value.is_empty() => Ok(GasPrice::Fixed {
            wei_value: wei_value.to_string(),
        }),
        _ => {
            warn!(chain = %chain, rank = record.rank, "Gas price is neither an oracle nor fixed");
            Err(ServiceError::GasPriceNotConfigured {
                chain: chain.to_string(),
            })
        }
    }
}

/// RPC endpoint used by the wallet itself
fn rpc_uri(chain: &ChainRecord) -> RpcUri {
    RpcUri {
        authentication: chain.rpc_authentication,
        value: chain.rpc_uri.clone(),
    }
}

/// RPC endpoint handed to embedded apps
fn safe_apps_rpc_uri(chain: &ChainRecord) -> RpcUri {
    RpcUri {
        authentication: chain.safe_apps_rpc_authentication,
        value: chain.safe_apps_rpc_uri.clone(),
    }
}

fn block_explorer_uri_template(chain: &ChainRecord) -> BlockExplorerUriTemplate {
    BlockExplorerUriTemplate {
        address: chain.block_explorer_uri_address_template.clone(),
        tx_hash: chain.block_explorer_uri_tx_hash_template.clone(),
        api: chain.block_explorer_uri_api_template.clone(),
    }
}

fn theme(chain: &ChainRecord) -> Theme {
    Theme {
        text_color: chain.theme_text_color.clone(),
        background_color: chain.theme_background_color.clone(),
    }
}
