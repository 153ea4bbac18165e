//! Damped-spring eye tracker.
//!
//! Offsets are expressed as fractions of the tracked element's size. The
//! tracker is stepped once per display frame by whoever owns it; it never
//! settles or stops on its own.

use crate::constants::*;
use glam::Vec2;
use std::ops::ControlFlow;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    pub strength: f32,
    pub damping: f32,
    pub max_velocity: f32,
    pub max_distance: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            strength: SPRING_STRENGTH,
            damping: SPRING_DAMPING,
            max_velocity: MAX_VELOCITY,
            max_distance: MAX_DISTANCE,
        }
    }
}

impl SpringParams {
    /// Whether the unclamped per-frame update decays toward the target.
    ///
    /// With error `e = p - target` the step is linear in `(e, v)` with matrix
    /// `[[1 - d*k, d], [-d*k, d]]`; both eigenvalues lie inside the unit circle
    /// iff `0 <= d < 1` and `0 < d*k < 2*(1 + d)`.
    pub fn is_stable(&self) -> bool {
        let d = self.damping;
        let dk = self.damping * self.strength;
        (0.0..1.0).contains(&d)
            && dk > 0.0
            && dk < 2.0 * (1.0 + d)
            && self.max_velocity > 0.0
            && self.max_distance > 0.0
    }
}

/// Lissajous-style wander used when no pointer target is available.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdleParams {
    pub radius: f32,
    pub angular_speed: f32,
}

impl Default for IdleParams {
    fn default() -> Self {
        Self {
            radius: IDLE_RADIUS,
            angular_speed: IDLE_ANGULAR_SPEED,
        }
    }
}

impl IdleParams {
    pub fn target_at(&self, time_ms: f64) -> Vec2 {
        let angle = (time_ms * self.angular_speed as f64) as f32;
        Vec2::new(
            angle.cos() * self.radius,
            (angle * IDLE_Y_FREQUENCY_RATIO).sin() * self.radius,
        )
    }
}

/// Computes the eye target for a pointer at `pointer`, seen from an element
/// centred at `center`. Pointers at or beyond `reach` get the full deflection.
/// Returns `None` when the pointer sits exactly on the centre.
pub fn aim(center: Vec2, pointer: Vec2, reach: f32, max_distance: f32) -> Option<Vec2> {
    let delta = pointer - center;
    let distance = delta.length();
    if distance == 0.0 || !distance.is_finite() || reach <= 0.0 {
        return None;
    }
    let scale = (distance / reach).min(1.0);
    let target = delta / distance * max_distance * scale;
    Some(target.clamp(Vec2::splat(-max_distance), Vec2::splat(max_distance)))
}

#[derive(Clone, Debug)]
pub struct PointerTracker {
    pub params: SpringParams,
    pub idle: Option<IdleParams>,
    position: Vec2,
    velocity: Vec2,
    target: Vec2,
    pointer_seen: bool,
    last_timestamp: Option<f64>,
    running: bool,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(SpringParams::default())
    }
}

impl PointerTracker {
    pub fn new(params: SpringParams) -> Self {
        Self {
            params,
            idle: None,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            target: Vec2::ZERO,
            pointer_seen: false,
            last_timestamp: None,
            running: true,
        }
    }

    /// Enables the idle wander until the first pointer target arrives.
    pub fn with_idle(mut self, idle: IdleParams) -> Self {
        self.idle = Some(idle);
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
        self.pointer_seen = true;
    }

    /// Points the eyes at `pointer`. See [`aim`].
    pub fn aim_at(&mut self, center: Vec2, pointer: Vec2, reach: f32) {
        if let Some(t) = aim(center, pointer, reach, self.params.max_distance) {
            self.set_target(t);
        }
    }

    /// One spring update; clamps velocity then position, direction-preserving.
    pub fn step(&mut self) {
        let p = self.params;
        let delta = self.target - self.position;
        self.velocity += delta * p.strength;
        self.velocity *= p.damping;
        self.velocity = self.velocity.clamp_length_max(p.max_velocity);
        self.position = (self.position + self.velocity).clamp_length_max(p.max_distance);
    }

    /// Frame callback. Advances the idle wander when no pointer has been seen,
    /// steps the spring, and tells the caller whether to request another frame.
    pub fn tick(&mut self, timestamp_ms: f64) -> ControlFlow<()> {
        if !self.running {
            return ControlFlow::Break(());
        }
        self.last_timestamp = Some(timestamp_ms);
        if !self.pointer_seen {
            if let Some(idle) = self.idle {
                self.target = idle.target_at(timestamp_ms);
            }
        }
        self.step();
        ControlFlow::Continue(())
    }

    /// Cancels the loop; the next `tick` returns `Break` and does nothing.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Drops all motion and the pointer target. A stopped tracker stays stopped.
    pub fn reset(&mut self) {
        *self = Self {
            params: self.params,
            idle: self.idle,
            running: self.running,
            ..Self::new(self.params)
        };
    }
}
