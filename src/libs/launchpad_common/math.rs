use ethnum::U256;
use pendzl::math::{
    errors::MathError,
    operations::{mul_div, Rounding},
};

pub const BPS_DENOMINATOR: u16 = 10_000;
pub const E12_U128: u128 = 10_u128.pow(12);

/// `amount * bps / 10_000`, rounded down.
pub fn mul_bps(amount: u128, bps: u16) -> Result<u128, MathError> {
    mul_div(amount, bps as u128, BPS_DENOMINATOR as u128, Rounding::Down)
}

pub fn mul_denom_e12(a: u128, b: u128, rounding: Rounding) -> Result<u128, MathError> {
    mul_div(a, b, E12_U128, rounding)
}

/// Computes `x * y * z / (d1 * d2)` rounded down with a 256 bit intermediate.
pub fn mul_mul_div_r_down(x: u128, y: u128, z: u128, d1: u128, d2: u128) -> Result<u128, MathError> {
    if d1 == 0 || d2 == 0 {
        return Err(MathError::DivByZero);
    }

    if x == 0 || y == 0 || z == 0 {
        return Ok(0);
    }

    let numerator = U256::from(x)
        .checked_mul(U256::from(y))
        .ok_or(MathError::Overflow)?
        .checked_mul(U256::from(z))
        .ok_or(MathError::Overflow)?;
    // two u128 factors always fit
    let denominator = U256::from(d1) * U256::from(d2);

    u128::try_from(numerator / denominator).map_err(|_| MathError::Overflow)
}
