use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::{
    error::StoreError,
    models::records::{ChainRecord, FeatureRecord, GasPriceRecord, WalletRecord},
};

/// Read access to the stored chain configuration
///
/// Implementations are shared between request handlers, so they have to be
/// `Send + Sync`. Returned records are borrowed from the store.
pub trait ChainStore: Send + Sync {
    /// All chains ordered by relevance, then name
    fn chains(&self) -> Vec<&ChainRecord>;

    /// The chain with the given id, if any
    fn chain(&self, chain_id: u64) -> Option<&ChainRecord>;

    /// Gas price records attached to a chain, in storage order
    fn gas_prices(&self, chain_id: u64) -> Vec<&GasPriceRecord>;

    fn wallets(&self) -> Vec<&WalletRecord>;

    fn features(&self) -> Vec<&FeatureRecord>;

    /// Wallets that are not enabled on the given chain
    fn disabled_wallets(&self, chain_id: u64) -> Vec<&WalletRecord> {
        self.wallets()
            .into_iter()
            .filter(|wallet| !wallet.is_enabled_on(chain_id))
            .collect()
    }

    /// Features that are enabled on the given chain
    fn chain_features(&self, chain_id: u64) -> Vec<&FeatureRecord> {
        self.features()
            .into_iter()
            .filter(|feature| feature.is_enabled_on(chain_id))
            .collect()
    }
}

/// On-disk layout of the configuration fixture
#[derive(Debug, Default, Deserialize)]
pub struct ChainFixture {
    #[serde(default)]
    pub chains: Vec<ChainRecord>,
    #[serde(default)]
    pub gas_prices: Vec<GasPriceRecord>,
    #[serde(default)]
    pub wallets: Vec<WalletRecord>,
    #[serde(default)]
    pub features: Vec<FeatureRecord>,
}

/// Chain store backed by records held in memory
///
/// Records are validated once at construction and never change afterwards.
#[derive(Debug, Default)]
pub struct InMemoryChainStore {
    /// Sorted by (relevance, name)
    chains: Vec<ChainRecord>,
    chain_index: HashMap<u64, usize>,
    gas_prices: Vec<GasPriceRecord>,
    wallets: Vec<WalletRecord>,
    features: Vec<FeatureRecord>,
}

impl InMemoryChainStore {
    /// Build a store from a fixture, checking keys and chain references
    pub fn from_fixture(fixture: ChainFixture) -> Result<Self, StoreError> {
        let ChainFixture {
            mut chains,
            gas_prices,
            wallets,
            features,
        } = fixture;

        chains.sort_by(|a, b| {
            a.relevance
                .cmp(&b.relevance)
                .then_with(|| a.name.cmp(&b.name))
        });

        let mut chain_index = HashMap::with_capacity(chains.len());
        for (position, chain) in chains.iter().enumerate() {
            if chain_index.insert(chain.id, position).is_some() {
                return Err(StoreError::Duplicate {
                    kind: "chain",
                    key: chain.id.to_string(),
                });
            }
        }

        for gas_price in &gas_prices {
            if !chain_index.contains_key(&gas_price.chain_id) {
                return Err(StoreError::UnknownChain {
                    kind: "gas price",
                    key: format!("rank {}", gas_price.rank),
                    chain_id: gas_price.chain_id,
                });
            }
        }

        check_keyed("wallet", wallets.iter().map(|w| (&w.key, &w.chains)), &chain_index)?;
        check_keyed("feature", features.iter().map(|f| (&f.key, &f.chains)), &chain_index)?;

        debug!(
            chains = chains.len(),
            gas_prices = gas_prices.len(),
            wallets = wallets.len(),
            features = features.len(),
            "Chain store built"
        );

        Ok(Self {
            chains,
            chain_index,
            gas_prices,
            wallets,
            features,
        })
    }

    /// Parse a fixture from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let fixture: ChainFixture = serde_json::from_str(json)?;
        Self::from_fixture(fixture)
    }

    /// Load a fixture from a JSON file
    #[instrument(skip_all, fields(path = %path.as_ref().display()), err)]
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        let store = Self::from_json_str(&contents)?;
        info!("Loaded {} chains", store.chains.len());
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl ChainStore for InMemoryChainStore {
    fn chains(&self) -> Vec<&ChainRecord> {
        self.chains.iter().collect()
    }

    fn chain(&self, chain_id: u64) -> Option<&ChainRecord> {
        self.chain_index
            .get(&chain_id)
            .map(|&position| &self.chains[position])
    }

    fn gas_prices(&self, chain_id: u64) -> Vec<&GasPriceRecord> {
        self.gas_prices
            .iter()
            .filter(|gas_price| gas_price.chain_id == chain_id)
            .collect()
    }

    fn wallets(&self) -> Vec<&WalletRecord> {
        self.wallets.iter().collect()
    }

    fn features(&self) -> Vec<&FeatureRecord> {
        self.features.iter().collect()
    }
}

/// Reject duplicate keys and references to chains missing from the index
fn check_keyed<'a>(
    kind: &'static str,
    records: impl Iterator<Item = (&'a String, &'a Vec<u64>)>,
    chain_index: &HashMap<u64, usize>,
) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    for (key, chains) in records {
        if !seen.insert(key) {
            return Err(StoreError::Duplicate {
                kind,
                key: key.clone(),
            });
        }
        if let Some(&chain_id) = chains.iter().find(|id| !chain_index.contains_key(id)) {
            return Err(StoreError::UnknownChain {
                kind,
                key: key.clone(),
                chain_id,
            });
        }
    }
    Ok(())
}
