//! Label balancing.
//!
//! A long single-line label forces its column very wide while using a
//! single line of height. Balancing trades width for height: the label's
//! wrapping cap is pulled from its natural width toward the width that
//! makes the wrapped block roughly square, which reads much better in
//! wide diagrams.

/// Returns the balanced wrapping width for content whose intrinsic widths
/// are `min_width` (longest unbreakable word) and `max_width` (natural
/// unwrapped width).
///
/// The result is `min_width * sqrt(max_width / min_width)`: the geometric
/// compromise between the two, which wraps the content into roughly
/// `sqrt(max/min)` lines of equal width. Degenerate inputs (no wrappable
/// content, or nothing to gain) return `max_width` unchanged.
pub fn balanced_max_width(min_width: f32, max_width: f32) -> f32 {
    if min_width <= 0.0 || max_width <= min_width || !max_width.is_finite() {
        return max_width;
    }
    (max_width / min_width).sqrt() * min_width
}
