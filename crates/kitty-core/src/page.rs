//! The render target the overlay controller drives.
//!
//! A host page accepts raw markup and displays it verbatim; how it reaches
//! pixels is the implementor's business. The browser binding lives in the web
//! front-end, [`crate::memory::MemoryPage`] is an in-memory stand-in.

use crate::error::HostError;
use glam::Vec2;
use std::fmt;
use std::time::Duration;

/// Fire-and-forget work a page runs after a delay. Acting on a node that has
/// meanwhile left the document must be a silent no-op.
#[derive(Clone, Debug, PartialEq)]
pub enum Deferred<N> {
    Remove(N),
    RestoreFill { node: N, fill: Option<String> },
}

pub trait HostPage {
    type Node: Clone + PartialEq + fmt::Debug;

    /// Size of the visible viewport in CSS pixels.
    fn viewport(&self) -> Vec2;

    fn create_element(&self, tag: &str) -> Result<Self::Node, HostError>;
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);
    fn append_to_body(&self, node: &Self::Node);
    /// Detaches `node`; detached nodes are ignored.
    fn remove(&self, node: &Self::Node);
    fn is_attached(&self, node: &Self::Node) -> bool;
    /// Inclusive: a node contains itself.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;
    /// Lowercase tag name.
    fn tag_name(&self, node: &Self::Node) -> String;

    /// Replaces the whole inline style.
    fn set_style(&self, node: &Self::Node, css: &str);
    fn set_style_property(&self, node: &Self::Node, name: &str, value: &str);
    fn set_inner_markup(&self, node: &Self::Node, markup: &str);

    /// `<path>` descendants of `root` whose fill attribute equals `fill` and
    /// whose path data contains `data_fragment`.
    fn find_paths(&self, root: &Self::Node, fill: &str, data_fragment: &str) -> Vec<Self::Node>;
    /// Fill set through the inline style, ignoring the attribute.
    fn inline_fill(&self, node: &Self::Node) -> Option<String>;
    /// Sets the inline fill, or clears it with `None`.
    fn set_fill(&self, node: &Self::Node, fill: Option<&str>);

    fn play_sound(&self, url: &str, volume: f64) -> Result<(), HostError>;
    fn defer(&self, delay: Duration, task: Deferred<Self::Node>);

    /// Runs a deferred task now. Shared by implementors' timer callbacks.
    fn run_deferred(&self, task: Deferred<Self::Node>) {
        match task {
            Deferred::Remove(node) => self.remove(&node),
            Deferred::RestoreFill { node, fill } => {
                if self.is_attached(&node) {
                    self.set_fill(&node, fill.as_deref());
                }
            }
        }
    }
}
