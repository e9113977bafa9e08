//! Deep-reorganization backpressure
//!
//! A reorganization deeper than the network limit is only followed when
//! enough independent peers corroborate the competing chain and its tip
//! is recent. This is a heuristic guard against a single adversarial
//! source rewriting history, not a consensus rule.

use consensus_core::ChainParams;

/// Verdict on whether a candidate chain switch may proceed
#[derive(Debug, Clone, Copy)]
pub struct ReorgGuard {
    max_depth: u64,
    min_peers: u32,
    min_age: u64,
}

impl ReorgGuard {
    pub fn new(max_depth: u64, min_peers: u32, min_age: u64) -> Self {
        Self { max_depth, min_peers, min_age }
    }

    pub fn from_params(params: &ChainParams) -> Self {
        Self::new(params.max_reorg_depth, params.min_reorg_peers, params.min_reorg_age)
    }

    /// Allows any reorganization within the depth limit; deeper ones
    /// need at least `min_peers` corroborating peers and a competing tip
    /// younger than `min_age` seconds
    pub fn allows(&self, depth: u64, peers: u32, age_secs: u64) -> bool {
        if depth <= self.max_depth {
            return true;
        }
        peers >= self.min_peers && age_secs < self.min_age
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consensus_core::Network;

    fn guard() -> ReorgGuard {
        let params = ChainParams::for_network(Network::Main).unwrap();
        ReorgGuard::from_params(&params)
    }

    #[test]
    fn shallow_reorgs_always_pass() {
        let guard = guard();
        assert!(guard.allows(0, 0, u64::MAX));
        assert!(guard.allows(1, 0, u64::MAX));
        assert!(guard.allows(60, 0, u64::MAX));
    }

    #[test]
    fn deep_reorg_needs_peers_and_freshness() {
        let guard = guard();
        // 12 hours minus a second is still fresh
        assert!(guard.allows(61, 4, 43_199));
        assert!(guard.allows(1000, 10, 0));

        // Too few peers
        assert!(!guard.allows(61, 3, 0));
        // Fresh enough but uncorroborated
        assert!(!guard.allows(61, 0, 100));
        // Corroborated but stale
        assert!(!guard.allows(61, 4, 43_200));
        assert!(!guard.allows(61, 100, u64::MAX));
    }
}
