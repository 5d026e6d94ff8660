//! Sine ease-in/ease-out step timing.
//!
//! A timed move follows the velocity profile `v(x) = sqrt(1 - x²)` where `x`
//! runs from -1 at the start of the move to +1 at its end. That is the
//! derivative of a half-cosine position curve, so the motor starts and stops
//! at zero speed. Everything is fixed-point with `x` scaled by 1000, which
//! keeps every intermediate inside 32 bits.

/// Fixed-point scale of the normalized position term.
const SCALE: i32 = 1000;

/// `SCALE²`: the squared speed at the middle of the move.
const SCALE_SQUARED: u32 = 1_000_000;

/// Integer square root: `floor(sqrt(x))`.
///
/// Binary digit-by-digit method, exact for every `u32`.
pub fn isqrt(x: u32) -> u32 {
    let mut op = x;
    let mut res: u32 = 0;

    // Highest power of four <= x.
    let mut one: u32 = 1 << 30;
    while one > op {
        one >>= 2;
    }

    while one != 0 {
        if op >= res + one {
            op -= res + one;
            res = (res >> 1) + one;
        } else {
            res >>= 1;
        }
        one >>= 2;
    }

    res
}

/// Microsecond delay before the next step of an eased move.
///
/// * `remaining` - steps left to the target
/// * `total` - steps of the whole move
/// * `duration_ms` - planned duration of the whole move
///
/// Summed over the whole move the delays come to roughly `duration_ms`. The
/// speed term is zero at the very ends of the move; there, and for an empty
/// move, the delay is `u32::MAX` and callers clamp it to their slowest rate.
pub fn ease_in_out_delay(remaining: u32, total: u32, duration_ms: u32) -> u32 {
    if total == 0 {
        return u32::MAX;
    }
    let remaining = remaining.min(total);

    // x in [-SCALE, SCALE]; the product is widened, the quotient is <= 2000.
    let covered = (u64::from(remaining) * 2 * SCALE as u64 / u64::from(total)) as i32;
    let x = SCALE - covered;
    let x_squared = (x * x) as u32;

    let speed = isqrt(SCALE_SQUARED - x_squared);
    if speed == 0 {
        return u32::MAX;
    }

    // Divide first: SCALE_SQUARED * duration_ms would overflow 32 bits for
    // any duration past ~4 s.
    (SCALE_SQUARED / speed)
        .saturating_mul(duration_ms)
        .saturating_mul(2)
        / total
        / 3
}
