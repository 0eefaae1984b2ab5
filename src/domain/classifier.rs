//! Deviation-to-multiplier classification.
//!
//! Maps the relative distance between price and its moving average,
//! `(price - ma) / ma`, to an investment multiplier through an ordered
//! band table. Upper bounds are inclusive, so a deviation of exactly
//! -0.20 falls in the deepest-undervaluation band.

/// Ordered `(upper_bound, multiplier)` bands. A deviation above the last
/// bound pauses investment entirely.
const BANDS: [(f64, f64); 6] = [
    (-0.20, 2.2),
    (-0.10, 1.8),
    (0.0, 1.4),
    (0.05, 1.0),
    (0.15, 0.5),
    (0.25, 0.2),
];

const PAUSE_MULTIPLIER: f64 = 0.0;

/// Investment multiplier for a price/moving-average deviation ratio.
///
/// Total over all reals and monotonically non-increasing: a higher
/// deviation never yields a higher multiplier.
pub fn classify(deviation: f64) -> f64 {
    for (upper, multiplier) in BANDS {
        if deviation <= upper {
            return multiplier;
        }
    }
    PAUSE_MULTIPLIER
}
