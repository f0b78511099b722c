use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// A supported TRON network.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Network {
    #[default]
    Mainnet,
    Shasta,
    Nile,
}

impl Network {
    /// Returns the public full node endpoint for the network.
    pub fn default_endpoint(self) -> &'static str {
        match self {
            Network::Mainnet => "https://api.trongrid.io",
            Network::Shasta => "https://api.shasta.trongrid.io",
            Network::Nile => "https://nile.trongrid.io",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Shasta => "shasta",
            Network::Nile => "nile",
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = UnsupportedNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "shasta" => Ok(Self::Shasta),
            "nile" => Ok(Self::Nile),
            _ => Err(UnsupportedNetwork),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported network")]
pub struct UnsupportedNetwork;
