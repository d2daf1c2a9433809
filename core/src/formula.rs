//! Brewing unit conversions.

/// Convert specific gravity to degrees Plato.
///
/// Cubic approximation, good to about 0.1 °P over normal wort gravities
/// (1.000 to 1.150).
pub fn sg_to_plato(sg: f64) -> f64 {
    -616.868 + 1111.14 * sg - 630.272 * sg.powi(2) + 135.997 * sg.powi(3)
}
