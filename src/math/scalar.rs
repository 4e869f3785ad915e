/// Linearly remap `x` from the range `[a1, a2]` onto `[b1, b2]`.
pub fn map_linear(x: f32, a1: f32, a2: f32, b1: f32, b2: f32) -> f32 {
    b1 + (x - a1) * (b2 - b1) / (a2 - a1)
}

/// Clamp without `f32::clamp`'s `min <= max` assertion: an inverted range
/// resolves to `min`.
pub fn clamp_unordered(value: f32, min: f32, max: f32) -> f32 {
    min.max(max.min(value))
}
