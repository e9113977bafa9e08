//! Soft-fork deployment signaling over block version bits
//!
//! Each optional rule owns one bit of the block version field. Signals
//! are tallied once per confirmation window: the state of the window
//! containing a height is derived from the state of the previous window,
//! the median time past of that window's last block, and the signal count
//! across its blocks. `Active` and `Failed` are terminal.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use consensus_core::{ChainParams, DeploymentId, Hash};

use crate::chain::ChainHistory;

/// Reserved pattern the top version bits must carry while signaling
pub const VERSIONBITS_TOP_BITS: i32 = 0x2000_0000;
/// Mask selecting the reserved top bits
pub const VERSIONBITS_TOP_MASK: i32 = 0xE000_0000_u32 as i32;
/// Number of usable signal bits below the reserved pattern
pub const VERSIONBITS_NUM_BITS: u8 = 29;

/// Per-window life cycle of one deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdState {
    /// Signaling has not begun
    Defined,
    /// Signals are being tallied
    Started,
    /// Threshold reached; one grace window before enforcement
    LockedIn,
    /// Rule enforced from here on, regardless of later signaling
    Active,
    /// Timed out before reaching threshold
    Failed,
}

impl ThresholdState {
    /// Terminal states never transition again
    pub fn is_terminal(&self) -> bool {
        matches!(self, ThresholdState::Active | ThresholdState::Failed)
    }
}

/// True when `version` signals readiness for the given bit
pub fn signals_bit(version: i32, bit: u8) -> bool {
    (version & VERSIONBITS_TOP_MASK) == VERSIONBITS_TOP_BITS && version & (1 << bit) != 0
}

/// Window-aligned deployment state evaluation with memoization.
///
/// Results are cached per (deployment, window-boundary block hash); a
/// reorganization that replaces the blocks of a window replaces the
/// boundary hash too, so stale entries can never be served. Safe for
/// concurrent use by multiple validation threads.
#[derive(Debug, Default)]
pub struct DeploymentStates {
    cache: Mutex<HashMap<(DeploymentId, Hash), ThresholdState>>,
}

impl DeploymentStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all memoized results
    pub fn clear(&self) {
        self.cache.lock().unwrap().clear();
    }

    /// The state of `id` for the window containing `height`.
    ///
    /// Only completed windows feed the result: the state is derived by
    /// replaying window transitions from the most recent cached (or
    /// `Defined`) boundary forward, using the median time past of each
    /// previous window's final block as the time reference.
    pub fn state(
        &self,
        chain: &impl ChainHistory,
        params: &ChainParams,
        id: DeploymentId,
        height: u64,
    ) -> ThresholdState {
        let dep = params.deployment(id);
        if dep.is_disabled() {
            return ThresholdState::Defined;
        }
        let window = params.window(id) as u64;
        let threshold = params.threshold(id);

        let mut cache = self.cache.lock().unwrap();

        // Walk back window by window until a cached boundary, a window
        // predating the start time, or the genesis window.
        let mut index = height / window;
        let mut state = ThresholdState::Defined;
        let mut pending = Vec::new();
        while index > 0 {
            let boundary = index * window - 1;
            let Some(anchor) = chain.block_at(boundary) else {
                // The chain does not reach this window's base yet
                return ThresholdState::Defined;
            };
            if let Some(&cached) = cache.get(&(id, anchor.hash)) {
                state = cached;
                break;
            }
            let Some(mtp) = chain.median_time_past(boundary) else {
                return ThresholdState::Defined;
            };
            if mtp < dep.start_time {
                cache.insert((id, anchor.hash), ThresholdState::Defined);
                break;
            }
            pending.push((index, anchor, mtp));
            index -= 1;
        }

        // Replay forward, applying one transition per window boundary
        while let Some((index, anchor, mtp)) = pending.pop() {
            state = match state {
                ThresholdState::Defined => {
                    if mtp >= dep.start_time {
                        ThresholdState::Started
                    } else {
                        ThresholdState::Defined
                    }
                }
                ThresholdState::Started => {
                    if mtp >= dep.timeout {
                        ThresholdState::Failed
                    } else {
                        // Tally the window that just completed
                        let first = (index - 1) * window;
                        let mut count = 0u32;
                        for h in first..index * window {
                            if let Some(block) = chain.block_at(h) {
                                if signals_bit(block.version, dep.bit) {
                                    count += 1;
                                }
                            }
                        }
                        if count >= threshold {
                            ThresholdState::LockedIn
                        } else {
                            ThresholdState::Started
                        }
                    }
                }
                ThresholdState::LockedIn => ThresholdState::Active,
                terminal => terminal,
            };
            cache.insert((id, anchor.hash), state);
        }

        state
    }

    /// True once the deployment is enforced at `height`
    pub fn is_active(
        &self,
        chain: &impl ChainHistory,
        params: &ChainParams,
        id: DeploymentId,
        height: u64,
    ) -> bool {
        self.state(chain, params, id, height) == ThresholdState::Active
    }

    /// The version a miner should publish for a block at `height`:
    /// the reserved top bits plus the bit of every deployment currently
    /// tallying or locked in
    pub fn compute_block_version(
        &self,
        chain: &impl ChainHistory,
        params: &ChainParams,
        height: u64,
    ) -> i32 {
        let mut version = VERSIONBITS_TOP_BITS;
        for id in DeploymentId::iter() {
            let dep = params.deployment(id);
            if dep.is_disabled() {
                continue;
            }
            match self.state(chain, params, id, height) {
                ThresholdState::Started | ThresholdState::LockedIn => {
                    version |= 1 << dep.bit;
                }
                _ => {}
            }
        }
        version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::MemoryChain;
    use crate::selector::ChainParamsBuilder;
    use consensus_core::Network;

    const DEP: DeploymentId = DeploymentId::TestDummy;
    const WINDOW: u64 = 144;
    const THRESHOLD: u32 = 108;

    fn regtest_params() -> ChainParams {
        ChainParamsBuilder::for_network(Network::Regtest).unwrap().build()
    }

    fn signaling() -> i32 {
        VERSIONBITS_TOP_BITS | 1 << 28
    }

    /// Pushes one full window, `signals` blocks of which signal the bit
    fn push_window(chain: &mut MemoryChain, signals: u32) {
        for i in 0..WINDOW {
            let version = if (i as u32) < signals { signaling() } else { VERSIONBITS_TOP_BITS };
            let height = chain.len() as u32;
            chain.push(version, 1000 + height);
        }
    }

    #[test]
    fn signal_requires_top_bits() {
        assert!(signals_bit(VERSIONBITS_TOP_BITS | 1 << 5, 5));
        assert!(!signals_bit(VERSIONBITS_TOP_BITS, 5));
        // Legacy version numbers never count, even with the bit set
        assert!(!signals_bit(4 | 1 << 5, 5));
        assert!(!signals_bit(0x4000_0000 | 1 << 5, 5));
    }

    #[test]
    fn genesis_window_is_defined() {
        let params = regtest_params();
        let states = DeploymentStates::new();
        let mut chain = MemoryChain::new();
        push_window(&mut chain, WINDOW as u32);

        // Signals inside the first window cannot take effect before it closes
        assert_eq!(states.state(&chain, &params, DEP, 0), ThresholdState::Defined);
        assert_eq!(states.state(&chain, &params, DEP, 143), ThresholdState::Defined);
    }

    #[test]
    fn full_lifecycle_to_active() {
        let params = regtest_params();
        let states = DeploymentStates::new();
        let mut chain = MemoryChain::new();

        push_window(&mut chain, 0); // window 0: quiet
        push_window(&mut chain, THRESHOLD); // window 1: exactly at threshold
        push_window(&mut chain, 0); // window 2: grace period
        push_window(&mut chain, 0); // window 3: enforced

        assert_eq!(states.state(&chain, &params, DEP, 144), ThresholdState::Started);
        assert_eq!(states.state(&chain, &params, DEP, 288), ThresholdState::LockedIn);
        assert_eq!(states.state(&chain, &params, DEP, 432), ThresholdState::Active);
        assert!(states.is_active(&chain, &params, DEP, 432));

        // Active persists without any further signaling
        push_window(&mut chain, 0);
        push_window(&mut chain, 0);
        assert_eq!(states.state(&chain, &params, DEP, 700), ThresholdState::Active);
    }

    #[test]
    fn below_threshold_stays_started() {
        let params = regtest_params();
        let states = DeploymentStates::new();
        let mut chain = MemoryChain::new();

        push_window(&mut chain, 0);
        push_window(&mut chain, THRESHOLD - 1); // one signal short
        push_window(&mut chain, 0);

        assert_eq!(states.state(&chain, &params, DEP, 288), ThresholdState::Started);
        assert_eq!(states.state(&chain, &params, DEP, 432), ThresholdState::Started);
    }

    #[test]
    fn timeout_fails_despite_signals() {
        // Timestamps run 1000, 1001, ... so the second boundary's median
        // time is past this timeout while the first is not
        let params = ChainParamsBuilder::for_network(Network::Regtest)
            .unwrap()
            .set_deployment_schedule(DEP, 0, 1200)
            .build();
        let states = DeploymentStates::new();
        let mut chain = MemoryChain::new();

        push_window(&mut chain, 0);
        push_window(&mut chain, WINDOW as u32); // unanimous, but too late
        push_window(&mut chain, WINDOW as u32);
        push_window(&mut chain, WINDOW as u32);

        assert_eq!(states.state(&chain, &params, DEP, 144), ThresholdState::Started);
        assert_eq!(states.state(&chain, &params, DEP, 288), ThresholdState::Failed);
        // Failed is terminal no matter how later windows signal
        assert_eq!(states.state(&chain, &params, DEP, 432), ThresholdState::Failed);
        assert_eq!(states.state(&chain, &params, DEP, 576), ThresholdState::Failed);
    }

    #[test]
    fn lock_in_beats_later_timeout() {
        // Threshold reached in window 1, timeout passes during window 2:
        // the grace window still completes and the rule activates
        let params = ChainParamsBuilder::for_network(Network::Regtest)
            .unwrap()
            .set_deployment_schedule(DEP, 0, 1400)
            .build();
        let states = DeploymentStates::new();
        let mut chain = MemoryChain::new();

        push_window(&mut chain, 0);
        push_window(&mut chain, WINDOW as u32);
        push_window(&mut chain, 0);
        push_window(&mut chain, 0);

        assert_eq!(states.state(&chain, &params, DEP, 288), ThresholdState::LockedIn);
        assert_eq!(states.state(&chain, &params, DEP, 432), ThresholdState::Active);
    }

    #[test]
    fn future_start_time_stays_defined() {
        let params = ChainParamsBuilder::for_network(Network::Regtest)
            .unwrap()
            .set_deployment_schedule(DEP, 2_000_000_000, 2_100_000_000)
            .build();
        let states = DeploymentStates::new();
        let mut chain = MemoryChain::new();
        for _ in 0..4 {
            push_window(&mut chain, WINDOW as u32);
        }
        assert_eq!(states.state(&chain, &params, DEP, 576), ThresholdState::Defined);
    }

    #[test]
    fn disabled_deployment_never_leaves_defined() {
        let params = ChainParamsBuilder::for_network(Network::Regtest)
            .unwrap()
            .set_deployment_schedule(
                DEP,
                consensus_core::DeploymentSchedule::NEVER,
                consensus_core::DeploymentSchedule::NEVER,
            )
            .build();
        let states = DeploymentStates::new();
        let mut chain = MemoryChain::new();
        for _ in 0..4 {
            push_window(&mut chain, WINDOW as u32);
        }
        assert_eq!(states.state(&chain, &params, DEP, 576), ThresholdState::Defined);
    }

    #[test]
    fn reorg_across_window_boundary_recomputes() {
        let params = regtest_params();
        let states = DeploymentStates::new();
        let mut chain = MemoryChain::new();

        push_window(&mut chain, 0);
        push_window(&mut chain, WINDOW as u32);
        push_window(&mut chain, 0);
        assert_eq!(states.state(&chain, &params, DEP, 288), ThresholdState::LockedIn);

        // Reorganize away the signaling window; replacement blocks are
        // quiet, and their boundary hash misses the old cache entries
        chain.truncate(150);
        while chain.len() < 3 * WINDOW as usize {
            let height = chain.len() as u32;
            chain.push(VERSIONBITS_TOP_BITS, 2000 + height);
        }
        assert_eq!(states.state(&chain, &params, DEP, 288), ThresholdState::Started);
    }

    #[test]
    fn cached_state_is_stable_across_queries() {
        let params = regtest_params();
        let states = DeploymentStates::new();
        let mut chain = MemoryChain::new();
        push_window(&mut chain, 0);
        push_window(&mut chain, THRESHOLD);
        push_window(&mut chain, 0);
        push_window(&mut chain, 0);

        for _ in 0..3 {
            assert_eq!(states.state(&chain, &params, DEP, 432), ThresholdState::Active);
        }
        states.clear();
        assert_eq!(states.state(&chain, &params, DEP, 432), ThresholdState::Active);
    }

    #[test]
    fn miner_version_reflects_live_deployments() {
        let params = regtest_params();
        let states = DeploymentStates::new();
        let mut chain = MemoryChain::new();
        push_window(&mut chain, 0);
        push_window(&mut chain, 0);

        // Every regtest deployment with start time 0 is Started by now,
        // except CoinbaseAssets whose 500-block window has not closed
        let version = states.compute_block_version(&chain, &params, 288);
        assert_eq!(version & VERSIONBITS_TOP_MASK, VERSIONBITS_TOP_BITS);
        assert_ne!(version & (1 << 28), 0);
        assert_ne!(version & (1 << 6), 0);
        assert_ne!(version & (1 << 9), 0);
    }
}
