//! Platform-independent core of laser-kitty: the trait and palette model,
//! the recoloring engine, the spring eye tracker, avatar composition and the
//! page overlay controller.
//!
//! Nothing here touches a browser. Rendering goes through [`page::HostPage`],
//! timing comes from whoever calls `tick`.

pub mod catalog;
pub mod compositor;
pub mod constants;
pub mod designer;
pub mod effects;
pub mod error;
pub mod layer;
pub mod memory;
pub mod message;
pub mod overlay;
pub mod page;
pub mod palette;
pub mod prefs;
pub mod recolor;
pub mod session;
pub mod spring;

pub use catalog::{BodyShape, Choice, EyeStyle, MouthStyle, Pattern, TraitSelection};
pub use compositor::{AvatarSnapshot, AvatarStatus, Compositor, LoadTicket};
pub use designer::Designer;
pub use error::{AssetError, CatalogError, HostError, PreferenceError};
pub use layer::{AssetKey, AssetSource, AvatarLayers, LayerKeys, LayerKind, RawLayers};
pub use memory::MemoryPage;
pub use message::OverlayMessage;
pub use overlay::{ClickOutcome, ClickTarget, EntityHandle, OverlayConfig, OverlayController};
pub use page::{Deferred, HostPage};
pub use palette::{PaletteSelection, Slot, Swatch};
pub use prefs::{MemoryStore, PreferenceStore, Preferences, SaveDebouncer};
pub use recolor::recolor;
pub use session::{Identity, Session};
pub use spring::{IdleParams, PointerTracker, SpringParams};
