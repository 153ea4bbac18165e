use std::time::Duration;

// Shared tuning constants used by the designer view and the page overlay.

// Spring eye tracker (units: fraction of tracked-element size per frame)
pub const SPRING_STRENGTH: f32 = 0.2;
pub const SPRING_DAMPING: f32 = 0.8; // must stay below 1
pub const MAX_VELOCITY: f32 = 0.3;
pub const MAX_DISTANCE: f32 = 0.2;

// Idle wander oscillator
pub const IDLE_RADIUS: f32 = 0.2;
pub const IDLE_ANGULAR_SPEED: f32 = 0.001; // radians per millisecond
pub const IDLE_Y_FREQUENCY_RATIO: f32 = 1.5;

// Eye layer translation, pixels per unit of tracker offset
pub const EYE_TRANSLATE_PX: f32 = 10.0;

// Overlay container
pub const OVERLAY_SIZE_PX: f32 = 200.0;
pub const OVERLAY_MARGIN_PX: f32 = 20.0;
pub const OVERLAY_Z_INDEX: u32 = 9999;
pub const OVERLAY_TRACKING_REACH_PX: f32 = 300.0; // full eye deflection at this distance

// Laser beam origins as fractions of the container box
pub const BEAM_ORIGINS: [[f32; 2]; 2] = [[0.35, 0.4], [0.65, 0.4]];
pub const BEAM_THICKNESS_PX: f32 = 3.0;
pub const BURST_SIZE_PX: f32 = 30.0;

// Every transient effect (flash, beam, burst, removal) lasts this long
pub const EFFECT_DURATION: Duration = Duration::from_millis(300);
pub const FLASH_COLOR: &str = "red";

// Eye highlight selection; tied to the stock eye artwork
pub const HIGHLIGHT_FILL: &str = "#fff";
pub const HIGHLIGHT_PATH_FRAGMENT: &str = "129.7 129.7";

// Audio cue
pub const LASER_CUE_PATH: &str = "sounds/laser.mp3";
pub const LASER_CUE_VOLUME: f64 = 0.4;

// Preference persistence quiet period
pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(1000);

// Tags that are never destroyed by the overlay
pub const PROTECTED_TAGS: [&str; 7] = ["html", "body", "head", "script", "style", "link", "meta"];
