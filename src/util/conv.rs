//! Conversion utilities.

use {
    alloy::primitives::U256,
    bigdecimal::BigDecimal,
    num::{BigInt, BigUint, Signed},
};

/// Scales a decimal amount by `10^decimals` and truncates the fractional
/// remainder. Returns `None` for negative values and for results that do not
/// fit into a `U256`.
pub fn decimal_to_base_units(d: &BigDecimal, decimals: u32) -> Option<U256> {
    let (int, exp) = d.as_bigint_and_exponent();
    if int.is_negative() {
        return None;
    }

    // `d == int * 10^-exp`, so the scaled value is `int * 10^(decimals - exp)`.
    let shift = i64::from(decimals).checked_sub(exp)?;
    let scaled = if shift >= 0 {
        int * pow10(shift.unsigned_abs())?
    } else {
        int / pow10(shift.unsigned_abs())?
    };

    bigint_to_u256(&scaled)
}

/// Converts an integer amount of base units back into a decimal amount.
pub fn base_units_to_decimal(amount: &U256, decimals: u32) -> BigDecimal {
    BigDecimal::new(u256_to_biguint(amount).into(), i64::from(decimals))
}

fn pow10(exp: u64) -> Option<BigInt> {
    // Bounded so that inputs like `1e-100000` don't allocate huge integers;
    // such amounts are reported as unrepresentable.
    let exp = u32::try_from(exp).ok().filter(|exp| *exp <= 1024)?;
    Some(BigInt::from(10_u8).pow(exp))
}

pub fn biguint_to_u256(i: &BigUint) -> Option<U256> {
    let bytes = i.to_bytes_be();
    if bytes.len() > 32 {
        return None;
    }
    Some(U256::from_be_slice(&bytes))
}

pub fn u256_to_biguint(i: &U256) -> BigUint {
    BigUint::from_bytes_be(&i.to_be_bytes::<32>())
}

pub fn bigint_to_u256(i: &BigInt) -> Option<U256> {
    if i.is_negative() {
        return None;
    }
    biguint_to_u256(i.magnitude())
}
