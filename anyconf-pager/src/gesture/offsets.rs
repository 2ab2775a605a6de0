/// Overlay opacity while the current page is pulled up by `-offset_y`.
///
/// Starts at 1 and approaches 0 as the page travels a full page height.
pub fn forward_overlay_opacity(
    offset_y: f32,
    page_height: f32,
    decimals: u32,
) -> f32 {
    let amount = -offset_y / page_height;
    round_to(1.0 - amount, decimals).clamp(0.0, 1.0)
}

/// Translation of the previous page while it is pulled down by `offset_y`.
///
/// The reveal is amplified by `gain` and capped at fully revealed (0).
pub fn backward_drag_offset(offset_y: f32, page_height: f32, gain: f32) -> f32 {
    (-page_height + offset_y * gain).min(0.0)
}

fn round_to(value: f32, decimals: u32) -> f32 {
    let scale = 10f32.powi(decimals as i32);
    (value * scale).round() / scale
}
