//! Floating avatar projected onto a host page.
//!
//! The controller owns at most one [`OverlayEntity`]. `show` hands back an
//! [`EntityHandle`]; the same handle must be presented to `hide` and to the
//! frame loop, so a loop started for a replaced entity stops on its next tick.

use crate::constants::*;
use crate::effects::{self, Beam, EffectKind};
use crate::error::HostError;
use crate::layer::{AvatarLayers, LayerKind};
use crate::page::{Deferred, HostPage};
use crate::spring::{PointerTracker, SpringParams};
use glam::Vec2;
use smallvec::SmallVec;
use std::ops::ControlFlow;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    pub size: f32,
    pub margin: f32,
    pub z_index: u32,
    pub effect_duration: Duration,
    pub flash_color: String,
    pub eye_translate_px: f32,
    pub tracking_reach: f32,
    pub beam_origins: [[f32; 2]; 2],
    pub cue_url: String,
    pub cue_volume: f64,
    pub spring: SpringParams,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            size: OVERLAY_SIZE_PX,
            margin: OVERLAY_MARGIN_PX,
            z_index: OVERLAY_Z_INDEX,
            effect_duration: EFFECT_DURATION,
            flash_color: FLASH_COLOR.to_string(),
            eye_translate_px: EYE_TRANSLATE_PX,
            tracking_reach: OVERLAY_TRACKING_REACH_PX,
            beam_origins: BEAM_ORIGINS,
            cue_url: LASER_CUE_PATH.to_string(),
            cue_volume: LASER_CUE_VOLUME,
            spring: SpringParams::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityHandle(u64);

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// `grab` is the pointer position relative to the container's top-left.
    Dragging { grab: Vec2 },
}

#[derive(Debug)]
pub struct OverlayEntity<N> {
    handle: EntityHandle,
    pub container: N,
    pub eyes_layer: N,
    position: Vec2,
    tracker: PointerTracker,
    drag: DragState,
}

impl<N> OverlayEntity<N> {
    pub fn handle(&self) -> EntityHandle {
        self.handle
    }

    /// Top-left corner in viewport pixels.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }
}

/// How a click on the host page is treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    /// Inside the overlay itself.
    Overlay,
    /// Document structure, or an ancestor of the overlay.
    Protected,
    Destructible,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Effect<N> {
    pub kind: EffectKind,
    pub node: N,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome<N> {
    Ignored,
    Destroyed {
        effects: SmallVec<[Effect<N>; 3]>,
        flashed: usize,
    },
}

impl<N> ClickOutcome<N> {
    /// Whether the host should cancel the page's own handling of the click.
    pub fn prevents_default(&self) -> bool {
        matches!(self, ClickOutcome::Destroyed { .. })
    }
}

pub struct OverlayController<P: HostPage> {
    page: P,
    config: OverlayConfig,
    entity: Option<OverlayEntity<P::Node>>,
    next_handle: u64,
}

impl<P: HostPage> OverlayController<P> {
    pub fn new(page: P, config: OverlayConfig) -> Self {
        Self {
            page,
            config,
            entity: None,
            next_handle: 1,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn entity(&self) -> Option<&OverlayEntity<P::Node>> {
        self.entity.as_ref()
    }

    pub fn current(&self) -> Option<EntityHandle> {
        self.entity.as_ref().map(|e| e.handle)
    }

    /// Current eye offset in tracker units, zero when nothing is shown.
    pub fn eye_offset(&self) -> Vec2 {
        self.entity
            .as_ref()
            .map_or(Vec2::ZERO, |e| e.tracker.position())
    }

    /// Mounts a fresh overlay, tearing down any existing one first.
    pub fn show(&mut self, layers: &AvatarLayers) -> Result<EntityHandle, HostError> {
        if let Some(old) = self.entity.take() {
            log::info!("[overlay] replacing #{}", old.handle.0);
            self.teardown(old);
        }

        let page = &self.page;
        let size = self.config.size;
        let viewport = page.viewport();
        let position = (viewport - Vec2::splat(size + self.config.margin)).max(Vec2::ZERO);

        let container = page.create_element("div")?;
        page.set_style(
            &container,
            &effects::container_css(position, size, self.config.z_index),
        );
        let content = page.create_element("div")?;
        page.set_style(&content, effects::CONTENT_CSS);

        let keyframes = page.create_element("style")?;
        page.set_inner_markup(&keyframes, effects::EFFECT_KEYFRAMES);
        page.append_child(&content, &keyframes);

        let mut eyes_layer = None;
        for kind in LayerKind::STACK {
            let layer = page.create_element("div")?;
            page.set_style(&layer, &effects::layer_css(kind));
            page.set_inner_markup(&layer, layers.get(kind));
            page.append_child(&content, &layer);
            if kind == LayerKind::Eyes {
                eyes_layer = Some(layer);
            }
        }
        let eyes_layer = eyes_layer.ok_or_else(|| HostError::CreateElement("div".to_string()))?;

        page.append_child(&container, &content);
        page.append_to_body(&container);

        let handle = EntityHandle(self.next_handle);
        self.next_handle += 1;
        self.entity = Some(OverlayEntity {
            handle,
            container,
            eyes_layer,
            position,
            tracker: PointerTracker::new(self.config.spring),
            drag: DragState::Idle,
        });
        log::info!("[overlay] shown #{}", handle.0);
        Ok(handle)
    }

    /// Removes the entity `handle` refers to. Stale handles are ignored.
    pub fn hide(&mut self, handle: EntityHandle) -> bool {
        match self.entity.take() {
            Some(e) if e.handle == handle => {
                log::info!("[overlay] hidden #{}", handle.0);
                self.teardown(e);
                true
            }
            other => {
                self.entity = other;
                false
            }
        }
    }

    fn teardown(&self, mut entity: OverlayEntity<P::Node>) {
        entity.tracker.stop();
        self.page.remove(&entity.container);
    }

    /// Frame callback for the entity's tracking loop.
    pub fn tick(&mut self, handle: EntityHandle, timestamp_ms: f64) -> ControlFlow<()> {
        let Some(entity) = self.entity.as_mut().filter(|e| e.handle == handle) else {
            return ControlFlow::Break(());
        };
        entity.tracker.tick(timestamp_ms)?;
        let offset = entity.tracker.position() * self.config.eye_translate_px;
        self.page.set_style_property(
            &entity.eyes_layer,
            "transform",
            &effects::eye_transform(offset),
        );
        ControlFlow::Continue(())
    }

    /// Press on the page. Starts a drag when it lands on the overlay.
    pub fn pointer_down(&mut self, target: &P::Node, pointer: Vec2) -> bool {
        let Some(entity) = self.entity.as_mut() else {
            return false;
        };
        if !self.page.contains(&entity.container, target) {
            return false;
        }
        entity.drag = DragState::Dragging {
            grab: pointer - entity.position,
        };
        true
    }

    /// Pointer movement anywhere on the page: drags the container while a
    /// drag is active and re-aims the eyes from the container centre.
    pub fn pointer_move(&mut self, pointer: Vec2) {
        let size = self.config.size;
        let reach = self.config.tracking_reach;
        let viewport = self.page.viewport();
        let Some(entity) = self.entity.as_mut() else {
            return;
        };
        if let DragState::Dragging { grab } = entity.drag {
            let max = (viewport - Vec2::splat(size)).max(Vec2::ZERO);
            entity.position = (pointer - grab).clamp(Vec2::ZERO, max);
            self.page
                .set_style_property(&entity.container, "left", &format!("{:.1}px", entity.position.x));
            self.page
                .set_style_property(&entity.container, "top", &format!("{:.1}px", entity.position.y));
        }
        let center = entity.position + Vec2::splat(size * 0.5);
        entity.tracker.aim_at(center, pointer, reach);
    }

    pub fn pointer_up(&mut self) {
        if let Some(entity) = self.entity.as_mut() {
            entity.drag = DragState::Idle;
        }
    }

    pub fn classify(&self, target: &P::Node) -> ClickTarget {
        let Some(entity) = self.entity.as_ref() else {
            return ClickTarget::Protected;
        };
        if self.page.contains(&entity.container, target) {
            return ClickTarget::Overlay;
        }
        let tag = self.page.tag_name(target).to_ascii_lowercase();
        if PROTECTED_TAGS.contains(&tag.as_str()) || self.page.contains(target, &entity.container)
        {
            return ClickTarget::Protected;
        }
        ClickTarget::Destructible
    }

    pub fn is_destructible(&self, target: &P::Node) -> bool {
        self.classify(target) == ClickTarget::Destructible
    }

    /// Click anywhere on the page: zaps destructible targets.
    pub fn click(&mut self, target: &P::Node, pointer: Vec2) -> ClickOutcome<P::Node> {
        if self.classify(target) != ClickTarget::Destructible {
            return ClickOutcome::Ignored;
        }
        let Some(entity) = self.entity.as_ref() else {
            return ClickOutcome::Ignored;
        };
        let page = &self.page;
        let cfg = &self.config;
        let duration = cfg.effect_duration;

        let highlights = page.find_paths(&entity.eyes_layer, HIGHLIGHT_FILL, HIGHLIGHT_PATH_FRAGMENT);
        for path in &highlights {
            // A path still flashing from an earlier click restores to no override.
            let fill = page.inline_fill(path).filter(|f| *f != cfg.flash_color);
            page.set_fill(path, Some(&cfg.flash_color));
            page.defer(
                duration,
                Deferred::RestoreFill {
                    node: path.clone(),
                    fill,
                },
            );
        }

        let mut spawned = SmallVec::new();
        let eye_px = entity.tracker.position() * cfg.eye_translate_px;
        for [fx, fy] in cfg.beam_origins {
            let start = entity.position + Vec2::new(fx, fy) * cfg.size + eye_px;
            let beam = Beam {
                start,
                end: pointer,
            };
            let css = beam.css(BEAM_THICKNESS_PX, duration.as_millis());
            if let Some(node) = self.spawn_effect(&css, duration) {
                spawned.push(Effect {
                    kind: EffectKind::Beam,
                    node,
                });
            }
        }
        let css = effects::burst_css(pointer, BURST_SIZE_PX, duration.as_millis());
        if let Some(node) = self.spawn_effect(&css, duration) {
            spawned.push(Effect {
                kind: EffectKind::Burst,
                node,
            });
        }

        if let Err(e) = page.play_sound(&cfg.cue_url, cfg.cue_volume) {
            log::debug!("[audio] cue skipped: {e}");
        }

        let secs = duration.as_secs_f32();
        page.set_style_property(target, "transition", &format!("all {secs}s ease-out"));
        page.set_style_property(target, "transform", "scale(0.8)");
        page.set_style_property(target, "opacity", "0");
        page.defer(duration, Deferred::Remove(target.clone()));

        log::info!(
            "[overlay] zapped <{}> at ({:.0},{:.0})",
            page.tag_name(target),
            pointer.x,
            pointer.y
        );
        ClickOutcome::Destroyed {
            effects: spawned,
            flashed: highlights.len(),
        }
    }

    fn spawn_effect(&self, css: &str, lifetime: Duration) -> Option<P::Node> {
        match self.page.create_element("div") {
            Ok(node) => {
                self.page.set_style(&node, css);
                self.page.append_to_body(&node);
                self.page.defer(lifetime, Deferred::Remove(node.clone()));
                Some(node)
            }
            Err(e) => {
                log::warn!("[overlay] effect skipped: {e}");
                None
            }
        }
    }
}
