mod address;
mod network;

pub use {
    self::{
        address::{Address, InvalidAddress},
        network::Network,
    },
    alloy::primitives::U256,
};

use {crate::util::conv, bigdecimal::BigDecimal};

/// Number of decimals of the native coin: 1 TRX = 10^6 sun.
pub const TRX_DECIMALS: u32 = 6;

/// An amount of the native coin in sun, its smallest unit.
///
/// The node represents native amounts as signed 64-bit integers, so every
/// value of this type is guaranteed to fit into an `i64`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Sun(u64);

impl Sun {
    pub const MAX: Self = Self(i64::MAX as u64);

    pub fn new(value: u64) -> Option<Self> {
        (value <= Self::MAX.0).then_some(Self(value))
    }

    /// Converts a TRX amount into sun, truncating anything below one sun.
    pub fn from_trx(trx: &BigDecimal) -> Option<Self> {
        let sun = conv::decimal_to_base_units(trx, TRX_DECIMALS)?;
        Self::new(u64::try_from(sun).ok()?)
    }

    pub fn to_trx(self) -> BigDecimal {
        conv::base_units_to_decimal(&U256::from(self.0), TRX_DECIMALS)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Sun {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} sun", self.0)
    }
}
