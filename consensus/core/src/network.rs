use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

/// Network identifies the chain a node is operating on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    /// Main network
    Main,
    /// Test network
    Test,
    /// Regression test network
    Regtest,
}

impl Network {
    /// The canonical name used on the command line and in config files
    pub fn name(&self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
            Network::Regtest => "regtest",
        }
    }

    /// Returns an iterator over all Network variants
    pub fn iter() -> impl Iterator<Item = Network> {
        [Network::Main, Network::Test, Network::Regtest].into_iter()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(Network::Main),
            "test" => Ok(Network::Test),
            "regtest" => Ok(Network::Regtest),
            other => Err(ConfigError::UnknownChain(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_names() {
        assert_eq!("main".parse::<Network>().unwrap(), Network::Main);
        assert_eq!("test".parse::<Network>().unwrap(), Network::Test);
        assert_eq!("regtest".parse::<Network>().unwrap(), Network::Regtest);
    }

    #[test]
    fn parse_rejects_aliases() {
        for bad in ["mainnet", "testnet", "reg", "MAIN", ""] {
            match bad.parse::<Network>() {
                Err(ConfigError::UnknownChain(name)) => assert_eq!(name, bad),
                other => panic!("expected unknown chain error, got {:?}", other.map(|n| n.name())),
            }
        }
    }

    #[test]
    fn name_round_trips() {
        for network in Network::iter() {
            assert_eq!(network.name().parse::<Network>().unwrap(), network);
        }
    }
}
