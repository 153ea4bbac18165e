//! Inline styles for the overlay container and its transient effects.

use crate::layer::LayerKind;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    Beam,
    Burst,
}

/// A straight beam from `start` to `end` in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Beam {
    pub start: Vec2,
    pub end: Vec2,
}

impl Beam {
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Rotation in degrees, clockwise from +x in screen space.
    pub fn angle_deg(&self) -> f32 {
        let d = self.end - self.start;
        d.y.atan2(d.x).to_degrees()
    }

    pub fn css(&self, thickness: f32, duration_ms: u128) -> String {
        format!(
            "position: fixed; height: {thickness}px; \
             background: linear-gradient(90deg, red, orange, yellow); \
             box-shadow: 0 0 10px rgba(255,0,0,0.8); transform-origin: 0 50%; \
             pointer-events: none; z-index: 99999; left: {:.1}px; top: {:.1}px; \
             width: {:.1}px; transform: rotate({:.2}deg); \
             animation: laserBeam {duration_ms}ms ease-out",
            self.start.x,
            self.start.y,
            self.length(),
            self.angle_deg()
        )
    }
}

pub fn burst_css(center: Vec2, size: f32, duration_ms: u128) -> String {
    format!(
        "position: fixed; left: {:.1}px; top: {:.1}px; width: {size}px; height: {size}px; \
         border: 3px solid violet; border-radius: 50%; transform: translate(-50%, -50%); \
         pointer-events: none; z-index: 99998; \
         animation: explosion {duration_ms}ms ease-out forwards",
        center.x, center.y
    )
}

pub fn container_css(top_left: Vec2, size: f32, z_index: u32) -> String {
    format!(
        "position: fixed; left: {:.1}px; top: {:.1}px; width: {size}px; height: {size}px; \
         z-index: {z_index}; cursor: move; user-select: none;",
        top_left.x, top_left.y
    )
}

pub const CONTENT_CSS: &str = "width: 100%; height: 100%; position: relative;";

pub fn layer_css(kind: LayerKind) -> String {
    let base = format!("position: absolute; inset: 0; z-index: {};", kind.z_index());
    match kind {
        LayerKind::Eyes => base + " transition: transform 0.1s ease;",
        _ => base,
    }
}

pub fn eye_transform(offset_px: Vec2) -> String {
    format!("translate({:.2}px, {:.2}px)", offset_px.x, offset_px.y)
}

/// Keyframes the effect styles refer to; mounted inside each overlay container.
pub const EFFECT_KEYFRAMES: &str = "\
@keyframes laserBeam { from { opacity: 0; } to { opacity: 1; } }
@keyframes explosion {
  0% { transform: translate(-50%, -50%) scale(0.5); opacity: 1; }
  100% { transform: translate(-50%, -50%) scale(1.5); opacity: 0; }
}
svg circle, svg path, svg ellipse { transition: fill 0.1s ease, stroke 0.1s ease; }";
