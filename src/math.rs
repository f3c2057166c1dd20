// 2.0 math.rs: fixed-point helpers. products are taken in 512 bits so that
// quantity * price never wraps for any pair of U256 inputs.

use alloy_primitives::{Uint, U256};

/// Intermediate width for products of two `U256` values.
pub type U512 = Uint<512, 8>;

pub fn widen(value: U256) -> U512 {
    let limbs = value.as_limbs();
    U512::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3], 0, 0, 0, 0])
}

/// `None` when the value does not fit back into 256 bits.
pub fn narrow(value: U512) -> Option<U256> {
    let limbs = value.as_limbs();
    if limbs[4..].iter().any(|limb| *limb != 0) {
        return None;
    }
    Some(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// floor(a * b / denominator). Returns `None` on a zero denominator or when the
/// quotient exceeds `U256::MAX`.
pub fn mul_div_floor(a: U256, b: U256, denominator: U256) -> Option<U256> {
    if denominator.is_zero() {
        return None;
    }
    // 256 x 256 bits always fits in 512
    let product = widen(a) * widen(b);
    narrow(product / widen(denominator))
}

pub fn pow10(exp: u8) -> Option<U256> {
    let ten = U256::from(10u64);
    (0..exp).try_fold(U256::from(1u64), |acc, _| acc.checked_mul(ten))
}
