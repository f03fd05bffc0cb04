//! Dimension math: width capping and contain fitting.
//!
//! Both functions keep the binding dimension exact and floor the free
//! dimension, so a 16:9 source fitted to a 1000px-wide region comes out
//! 1000x562, never 1000x563. Sub-pixel results clamp to 1px.

use snapbooth_photo_model::Dimensions;

/// Proportionally shrink `source` so its width does not exceed
/// `max_width`. Narrower sources are returned unchanged, whatever their
/// height; a `max_width` of zero disables capping.
pub fn cap_width(source: Dimensions, max_width: u32) -> Dimensions {
    if max_width == 0 || source.width <= max_width {
        return source;
    }
    let height = (source.height as f64 * max_width as f64 / source.width as f64).floor() as u32;
    Dimensions::new(max_width, height.max(1))
}

/// The largest aspect-preserving size of `source` that fits entirely
/// within `bounds`. One dimension always equals its bound.
///
/// Both inputs must be positive; the planner validates before calling.
pub fn contain_fit(source: Dimensions, bounds: Dimensions) -> Dimensions {
    // Pick the binding axis by cross-multiplication, which stays exact
    // where a quotient comparison would not.
    let width_binds = (bounds.width as u64 * source.height as u64)
        <= (bounds.height as u64 * source.width as u64);
    if width_binds {
        let height =
            (source.height as f64 * bounds.width as f64 / source.width as f64).floor() as u32;
        Dimensions::new(bounds.width, height.clamp(1, bounds.height))
    } else {
        let width =
            (source.width as f64 * bounds.height as f64 / source.height as f64).floor() as u32;
        Dimensions::new(width.clamp(1, bounds.width), bounds.height)
    }
}
