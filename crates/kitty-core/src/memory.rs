//! In-memory host page: a minimal element tree with inline styles, a virtual
//! timer queue and a recorded audio channel. Used for headless runs and tests.
//!
//! Inner markup is not parsed into a real tree; every opening tag found in it
//! becomes a flat child of the element it was set on, which is enough for the
//! path lookups the overlay performs.

use crate::error::HostError;
use crate::page::{Deferred, HostPage};
use fnv::FnvHashMap;
use glam::Vec2;
use regex::Regex;
use std::cell::RefCell;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    attrs: FnvHashMap<String, String>,
    style: FnvHashMap<String, String>,
    markup: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

struct Timer {
    due: Duration,
    seq: u64,
    task: Deferred<NodeId>,
}

struct Inner {
    nodes: FnvHashMap<NodeId, NodeData>,
    next_id: u32,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    viewport: Vec2,
    now: Duration,
    timers: Vec<Timer>,
    timer_seq: u64,
    sounds: Vec<(String, f64)>,
    audio_blocked: bool,
}

impl Inner {
    fn alloc(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            NodeData {
                tag: tag.to_ascii_lowercase(),
                ..NodeData::default()
            },
        );
        id
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get_mut(&node).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.retain(|c| *c != node);
        }
    }

    fn append(&mut self, parent: NodeId, child: NodeId) {
        if !self.nodes.contains_key(&parent) || self.is_ancestor(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(child);
        }
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(n) = self.nodes.get(&id) {
                for c in n.children.iter().rev() {
                    out.push(*c);
                    stack.push(*c);
                }
            }
        }
        out
    }
}

pub struct MemoryPage {
    inner: RefCell<Inner>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new(Vec2::new(1280.0, 800.0))
    }
}

impl MemoryPage {
    /// An empty `<html><head/><body/></html>` document.
    pub fn new(viewport: Vec2) -> Self {
        let mut inner = Inner {
            nodes: FnvHashMap::default(),
            next_id: 0,
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            viewport,
            now: Duration::ZERO,
            timers: Vec::new(),
            timer_seq: 0,
            sounds: Vec::new(),
            audio_blocked: false,
        };
        let root = inner.alloc("html");
        let head = inner.alloc("head");
        let body = inner.alloc("body");
        inner.append(root, head);
        inner.append(root, body);
        inner.root = root;
        inner.head = head;
        inner.body = body;
        Self {
            inner: RefCell::new(inner),
        }
    }

    pub fn document_element(&self) -> NodeId {
        self.inner.borrow().root
    }

    pub fn head(&self) -> NodeId {
        self.inner.borrow().head
    }

    pub fn body(&self) -> NodeId {
        self.inner.borrow().body
    }

    /// Creates a `<tag>` and appends it to `parent`.
    pub fn append_new(&self, parent: NodeId, tag: &str) -> NodeId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.alloc(tag);
        inner.append(parent, id);
        id
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(n) = self.inner.borrow_mut().nodes.get_mut(&node) {
            n.attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.inner.borrow().nodes.get(&node)?.attrs.get(name).cloned()
    }

    pub fn style_property(&self, node: NodeId, name: &str) -> Option<String> {
        self.inner.borrow().nodes.get(&node)?.style.get(name).cloned()
    }

    pub fn inner_markup(&self, node: NodeId) -> Option<String> {
        self.inner.borrow().nodes.get(&node).map(|n| n.markup.clone())
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.inner
            .borrow()
            .nodes
            .get(&node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.inner.borrow().nodes.get(&node)?.parent
    }

    pub fn set_viewport(&self, viewport: Vec2) {
        self.inner.borrow_mut().viewport = viewport;
    }

    /// Makes every subsequent `play_sound` fail, like a blocked autoplay.
    pub fn set_audio_blocked(&self, blocked: bool) {
        self.inner.borrow_mut().audio_blocked = blocked;
    }

    pub fn sounds_played(&self) -> Vec<(String, f64)> {
        self.inner.borrow().sounds.clone()
    }

    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Moves the virtual clock forward, running every timer that falls due in
    /// scheduling order.
    pub fn advance(&self, by: Duration) {
        let target = self.inner.borrow().now + by;
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let due = inner
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                due.map(|i| {
                    let timer = inner.timers.remove(i);
                    inner.now = timer.due;
                    timer.task
                })
            };
            match next {
                Some(task) => self.run_deferred(task),
                None => break,
            }
        }
        self.inner.borrow_mut().now = target;
    }
}

fn tag_pattern() -> Option<&'static Regex> {
    static TAG: OnceLock<Option<Regex>> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<([a-zA-Z][\w-]*)\b([^>]*)>").ok())
        .as_ref()
}

fn attr_pattern() -> Option<&'static Regex> {
    static ATTR: OnceLock<Option<Regex>> = OnceLock::new();
    ATTR.get_or_init(|| Regex::new(r#"([\w:-]+)\s*=\s*"([^"]*)""#).ok())
        .as_ref()
}

fn parse_css(css: &str) -> FnvHashMap<String, String> {
    css.split(';')
        .filter_map(|decl| decl.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}

impl HostPage for MemoryPage {
    type Node = NodeId;

    fn viewport(&self) -> Vec2 {
        self.inner.borrow().viewport
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, HostError> {
        if tag.is_empty() {
            return Err(HostError::CreateElement(tag.to_string()));
        }
        Ok(self.inner.borrow_mut().alloc(tag))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        self.inner.borrow_mut().append(*parent, *child);
    }

    fn append_to_body(&self, node: &NodeId) {
        let mut inner = self.inner.borrow_mut();
        let body = inner.body;
        inner.append(body, *node);
    }

    fn remove(&self, node: &NodeId) {
        self.inner.borrow_mut().detach(*node);
    }

    fn is_attached(&self, node: &NodeId) -> bool {
        let inner = self.inner.borrow();
        inner.is_ancestor(inner.root, *node)
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        self.inner.borrow().is_ancestor(*ancestor, *node)
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.inner
            .borrow()
            .nodes
            .get(node)
            .map(|n| n.tag.clone())
            .unwrap_or_default()
    }

    fn set_style(&self, node: &NodeId, css: &str) {
        if let Some(n) = self.inner.borrow_mut().nodes.get_mut(node) {
            n.style = parse_css(css);
        }
    }

    fn set_style_property(&self, node: &NodeId, name: &str, value: &str) {
        if let Some(n) = self.inner.borrow_mut().nodes.get_mut(node) {
            n.style.insert(name.to_string(), value.to_string());
        }
    }

    fn set_inner_markup(&self, node: &NodeId, markup: &str) {
        let mut inner = self.inner.borrow_mut();
        let old = match inner.nodes.get_mut(node) {
            Some(n) => {
                n.markup = markup.to_string();
                std::mem::take(&mut n.children)
            }
            None => return,
        };
        for child in old {
            if let Some(c) = inner.nodes.get_mut(&child) {
                c.parent = None;
            }
        }
        let (Some(tag_re), Some(attr_re)) = (tag_pattern(), attr_pattern()) else {
            return;
        };
        for tag in tag_re.captures_iter(markup) {
            let id = inner.alloc(&tag[1]);
            if let Some(n) = inner.nodes.get_mut(&id) {
                n.attrs = attr_re
                    .captures_iter(&tag[2])
                    .map(|a| (a[1].to_string(), a[2].to_string()))
                    .collect();
            }
            inner.append(*node, id);
        }
    }

    fn find_paths(&self, root: &NodeId, fill: &str, data_fragment: &str) -> Vec<NodeId> {
        let inner = self.inner.borrow();
        inner
            .descendants(*root)
            .into_iter()
            .filter(|id| {
                inner.nodes.get(id).is_some_and(|n| {
                    n.tag == "path"
                        && n.attrs.get("fill").map(String::as_str) == Some(fill)
                        && n.attrs.get("d").is_some_and(|d| d.contains(data_fragment))
                })
            })
            .collect()
    }

    fn inline_fill(&self, node: &NodeId) -> Option<String> {
        self.style_property(*node, "fill")
    }

    fn set_fill(&self, node: &NodeId, fill: Option<&str>) {
        if let Some(n) = self.inner.borrow_mut().nodes.get_mut(node) {
            match fill {
                Some(f) => {
                    n.style.insert("fill".to_string(), f.to_string());
                }
                None => {
                    n.style.remove("fill");
                }
            }
        }
    }

    fn play_sound(&self, url: &str, volume: f64) -> Result<(), HostError> {
        let mut inner = self.inner.borrow_mut();
        if inner.audio_blocked {
            return Err(HostError::Audio("playback blocked".to_string()));
        }
        inner.sounds.push((url.to_string(), volume));
        Ok(())
    }

    fn defer(&self, delay: Duration, task: Deferred<NodeId>) {
        let mut inner = self.inner.borrow_mut();
        let seq = inner.timer_seq;
        inner.timer_seq += 1;
        let due = inner.now + delay;
        inner.timers.push(Timer { due, seq, task });
    }
}
