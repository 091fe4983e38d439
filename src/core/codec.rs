// one-byte quantization of bounded fractions and small counts
//
// all four functions are total: out-of-range input saturates, nothing fails.

/// Largest code a quantized value can take.
pub const MAX_CODE: u8 = u8::MAX;

const SCALE: f32 = MAX_CODE as f32;

/// Map a fraction in [0,1] to [0,255] by flooring `f * 255`.
///
/// Negative input (and NaN) gives 0, anything above 1 gives 255.
pub fn encode_fraction(frac: f32) -> u8 {
    // float -> int `as` casts saturate and send NaN to 0
    (frac * SCALE).floor().clamp(0.0, SCALE) as u8
}

/// Inverse of [`encode_fraction`] up to the 1/255 quantization step.
pub fn decode_fraction(code: u8) -> f32 {
    f32::from(code) / SCALE
}

/// Store a non-negative count in one byte; counts above 255 read back as 255.
pub fn encode_count(count: i32) -> u8 {
    count.clamp(0, i32::from(MAX_CODE)) as u8
}

pub fn decode_count(code: u8) -> i32 {
    i32::from(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_edges_map_to_code_edges() {
        assert_eq!(encode_fraction(0.0), 0);
        assert_eq!(encode_fraction(1.0), 255);
        assert_eq!(encode_fraction(0.5), 127);
        assert_eq!(decode_fraction(0), 0.0);
        assert_eq!(decode_fraction(255), 1.0);
    }

    #[test]
    fn fraction_out_of_range_is_clamped() {
        assert_eq!(encode_fraction(-0.3), 0);
        assert_eq!(encode_fraction(-1e9), 0);
        assert_eq!(encode_fraction(1.7), 255);
        assert_eq!(encode_fraction(f32::INFINITY), 255);
        assert_eq!(encode_fraction(f32::NAN), 0);
    }

    #[test]
    fn fraction_round_trip_stays_within_one_step() {
        for i in 0..=1000 {
            let f = i as f32 / 1000.0;
            let back = decode_fraction(encode_fraction(f));
            assert!((back - f).abs() <= 1.0 / 255.0 + 1e-6, "f = {f}, back = {back}");
        }
    }

    #[test]
    fn count_saturates_at_255() {
        assert_eq!(encode_count(0), 0);
        assert_eq!(encode_count(17), 17);
        assert_eq!(encode_count(255), 255);
        assert_eq!(encode_count(300), 255);
        assert_eq!(encode_count(-4), 0);
        assert_eq!(decode_count(encode_count(42)), 42);
    }
}
