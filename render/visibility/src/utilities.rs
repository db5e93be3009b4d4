use glam::{Vec2, Vec4};

/// Perspective divide followed by the viewport transform. Screen y grows
/// downward. `clip.w` must be positive; clipped geometry guarantees it.
pub fn clip_to_screen(clip: Vec4, width: f32, height: f32) -> Vec2 {
    let inv_w = 1.0 / clip.w;
    Vec2::new(
        (clip.x * inv_w + 1.0) * 0.5 * width,
        (1.0 - clip.y * inv_w) * 0.5 * height,
    )
}
