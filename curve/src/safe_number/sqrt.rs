use alloy_primitives::U256;

/// Integer square root, `floor(sqrt(value))`, by Newton's method.
///
/// Matches the Babylonian `sqrt` used by the FLIP contracts: the result is
/// exact for every `U256`, with no floating point involved.
pub fn sqrt(value: U256) -> U256 {
    if value < U256::from(2u64) {
        return value;
    }

    // 2^ceil(bits / 2) is always >= sqrt(value), so the iteration decreases
    // monotonically until it reaches the floor.
    let mut x = U256::from(1u64) << ((value.bit_len() + 1) / 2);
    loop {
        let y = (x + value / x) >> 1usize;
        if y >= x {
            return x;
        }
        x = y;
    }
}
