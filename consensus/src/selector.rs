//! One-shot network selection and the process-wide parameter set
//!
//! Selection runs once, single-threaded, before the node serves any
//! traffic. After publication the parameter set is read-only; the
//! builder's narrowing toggles exist for test harnesses and are only
//! available before the shared value is handed out.

use log::warn;
use once_cell::sync::OnceCell;

use consensus_core::{ChainParams, ConfigError, DeploymentId, Network};

static CHAIN_PARAMS: OnceCell<ChainParams> = OnceCell::new();

/// Builds a parameter set and optionally narrows the enforced rule set
/// before it becomes immutable.
///
/// The toggles mirror what test harnesses need; production startup goes
/// straight through [`select_params`].
pub struct ChainParamsBuilder {
    params: ChainParams,
}

impl ChainParamsBuilder {
    /// Starts from the fully validated bundle for `network`
    pub fn for_network(network: Network) -> Result<Self, ConfigError> {
        Ok(Self { params: ChainParams::for_network(network)? })
    }

    pub fn disable_segwit(mut self) -> Self {
        warn!("segwit enforcement disabled");
        self.params.consensus.segwit_enabled = false;
        self
    }

    pub fn disable_csv(mut self) -> Self {
        warn!("CSV enforcement disabled");
        self.params.consensus.csv_enabled = false;
        self
    }

    pub fn disable_bip34(mut self) -> Self {
        self.params.consensus.bip34_enabled = false;
        self
    }

    pub fn disable_bip65(mut self) -> Self {
        self.params.consensus.bip65_enabled = false;
        self
    }

    pub fn disable_bip66(mut self) -> Self {
        self.params.consensus.bip66_enabled = false;
        self
    }

    /// Replaces one deployment's signaling window
    pub fn set_deployment_schedule(mut self, id: DeploymentId, start_time: i64, timeout: i64) -> Self {
        let dep = &mut self.params.consensus.deployments[id as usize];
        dep.start_time = start_time;
        dep.timeout = timeout;
        self
    }

    /// Finishes construction, yielding an owned parameter set
    pub fn build(self) -> ChainParams {
        self.params
    }

    /// Publishes the parameter set as the process-wide value. Fails if a
    /// set was already published.
    pub fn publish(self) -> Result<&'static ChainParams, ConfigError> {
        CHAIN_PARAMS.set(self.params).map_err(|_| ConfigError::AlreadySelected)?;
        Ok(params())
    }
}

/// Resolves a network name, builds and verifies its parameter set, and
/// publishes it process-wide. An unknown name fails before any
/// construction; global state is only touched on success.
pub fn select_params(name: &str) -> Result<&'static ChainParams, ConfigError> {
    let network: Network = name.parse()?;
    ChainParamsBuilder::for_network(network)?.publish()
}

/// The published parameter set. Reading before [`select_params`] is a
/// startup-ordering bug and aborts.
pub fn params() -> &'static ChainParams {
    CHAIN_PARAMS.get().expect("chain parameters read before selection")
}

/// Non-aborting probe for the published parameter set
pub fn try_params() -> Option<&'static ChainParams> {
    CHAIN_PARAMS.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_narrows_before_publication() {
        let params = ChainParamsBuilder::for_network(Network::Regtest)
            .unwrap()
            .disable_segwit()
            .disable_csv()
            .disable_bip65()
            .build();
        assert!(!params.segwit_enabled());
        assert!(!params.csv_enabled());
        assert!(!params.bip65());
        // The other flags stay untouched
        assert!(params.bip34());
        assert!(params.bip66());
    }

    #[test]
    fn selection_lifecycle() {
        // Runs as a single test: the published value is process-wide.
        // Unknown names fail without touching global state.
        match select_params("mainnet") {
            Err(ConfigError::UnknownChain(name)) => assert_eq!(name, "mainnet"),
            other => panic!("expected unknown chain, got {:?}", other.map(|p| p.network)),
        }
        assert!(try_params().is_none());

        let published = select_params("regtest").unwrap();
        assert_eq!(published.network, Network::Regtest);
        assert_eq!(params().genesis_hash, published.genesis_hash);

        // Selection happens exactly once per process
        assert!(matches!(select_params("main"), Err(ConfigError::AlreadySelected)));
        assert!(matches!(
            ChainParamsBuilder::for_network(Network::Main).unwrap().publish(),
            Err(ConfigError::AlreadySelected)
        ));
    }
}
