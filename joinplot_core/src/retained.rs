// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Surface`] that retains the element tree.
//!
//! This is what the demo renders to SVG and what the tests inspect. It keeps:
//! - committed attribute values per node,
//! - measured client sizes supplied by the host environment, and
//! - in-flight attribute transitions, progressed with [`RetainedSurface::advance`].

extern crate alloc;

use alloc::vec::Vec;
use core::time::Duration;

use hashbrown::HashMap;
use kurbo::Size;

use crate::node::{Attr, AttrValue, ElementKind, NodeId, Selector};
use crate::surface::{Surface, SurfaceError};

#[derive(Debug)]
struct Node {
    kind: ElementKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attrs: HashMap<Attr, AttrValue>,
}

impl Node {
    fn new(kind: ElementKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            attrs: HashMap::new(),
        }
    }
}

/// An attribute transition that has not finished yet.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Animated node.
    pub node: NodeId,
    /// Animated attribute.
    pub attr: Attr,
    /// Displayed value when the transition started.
    pub from: AttrValue,
    /// Committed end value.
    pub to: AttrValue,
    /// Total duration.
    pub duration: Duration,
    /// Time elapsed so far.
    pub elapsed: Duration,
}

impl Transition {
    /// Returns the eased progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        ease_cubic_in_out(t)
    }

    /// Returns the interpolated value at the current progress.
    pub fn value(&self) -> AttrValue {
        AttrValue::lerp(&self.from, &self.to, self.progress())
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// A retained element tree implementing [`Surface`].
#[derive(Debug)]
pub struct RetainedSurface {
    root: NodeId,
    next_id: u64,
    nodes: HashMap<NodeId, Node>,
    client_sizes: HashMap<NodeId, Size>,
    transitions: Vec<Transition>,
}

impl Default for RetainedSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RetainedSurface {
    /// Creates a surface holding a single [`ElementKind::Host`] root.
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new(ElementKind::Host, None));
        Self {
            root,
            next_id: 1,
            nodes,
            client_sizes: HashMap::new(),
            transitions: Vec::new(),
        }
    }

    /// Creates a host root with a mounted `svg` child measuring `size`.
    ///
    /// Returns the surface and the `svg` node.
    pub fn with_svg(size: Size) -> (Self, NodeId) {
        let mut surface = Self::new();
        let root = surface.root;
        let svg = surface.alloc(root, ElementKind::Svg);
        surface.client_sizes.insert(svg, size);
        (surface, svg)
    }

    /// Records the box the host environment measured for `node`.
    pub fn set_client_size(&mut self, node: NodeId, size: Size) -> Result<(), SurfaceError> {
        if !self.nodes.contains_key(&node) {
            return Err(SurfaceError::UnknownNode(node));
        }
        self.client_sizes.insert(node, size);
        Ok(())
    }

    /// Returns `true` if `node` exists.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Returns the children of `node` in document order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(&node).map_or(&[][..], |n| n.children.as_slice())
    }

    /// Returns the parent of `node`.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    /// Returns all committed attributes of `node`, sorted by attribute.
    pub fn attrs(&self, node: NodeId) -> Vec<(Attr, &AttrValue)> {
        let mut out: Vec<_> = self
            .nodes
            .get(&node)
            .map(|n| n.attrs.iter().map(|(a, v)| (*a, v)).collect())
            .unwrap_or_default();
        out.sort_by_key(|(a, _)| *a);
        out
    }

    /// Returns the number of live nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the value currently on screen, accounting for in-flight transitions.
    pub fn displayed_attr(&self, node: NodeId, attr: Attr) -> Option<AttrValue> {
        if let Some(t) = self.transition(node, attr) {
            return Some(t.value());
        }
        self.attr(node, attr).cloned()
    }

    /// Returns the in-flight transition for `(node, attr)`, if any.
    pub fn transition(&self, node: NodeId, attr: Attr) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.node == node && t.attr == attr)
    }

    /// Returns `true` while any transition is in flight.
    pub fn is_animating(&self) -> bool {
        !self.transitions.is_empty()
    }

    /// Progresses all transitions by `dt`, dropping the ones that finished.
    pub fn advance(&mut self, dt: Duration) {
        for t in &mut self.transitions {
            t.elapsed = t.elapsed.saturating_add(dt);
        }
        self.transitions.retain(|t| !t.is_finished());
    }

    /// Completes every in-flight transition.
    pub fn settle(&mut self) {
        if !self.transitions.is_empty() {
            log::trace!(
                target: "joinplot_core",
                "settling {} transitions",
                self.transitions.len()
            );
        }
        self.transitions.clear();
    }

    fn alloc(&mut self, parent: NodeId, kind: ElementKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(kind, Some(parent)));
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
        }
        id
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut Node, SurfaceError> {
        self.nodes
            .get_mut(&node)
            .ok_or(SurfaceError::UnknownNode(node))
    }

    fn cancel_transition(&mut self, node: NodeId, attr: Attr) {
        self.transitions
            .retain(|t| !(t.node == node && t.attr == attr));
    }

    fn collect_matches(&self, node: NodeId, selector: Selector<'_>, out: &mut Vec<NodeId>) {
        let Some(n) = self.nodes.get(&node) else {
            return;
        };
        for &child in &n.children {
            if let Some(c) = self.nodes.get(&child) {
                let class = c.attrs.get(&Attr::Class).and_then(AttrValue::as_text);
                if selector.matches(c.kind, class) {
                    out.push(child);
                }
            }
            self.collect_matches(child, selector, out);
        }
    }

    fn collect_subtree(&self, node: NodeId, out: &mut Vec<NodeId>) {
        out.push(node);
        for &child in self.children(node) {
            self.collect_subtree(child, out);
        }
    }
}

impl Surface for RetainedSurface {
    fn root(&self) -> NodeId {
        self.root
    }

    fn kind(&self, node: NodeId) -> Option<ElementKind> {
        self.nodes.get(&node).map(|n| n.kind)
    }

    fn client_size(&self, node: NodeId) -> Result<Size, SurfaceError> {
        if !self.nodes.contains_key(&node) {
            return Err(SurfaceError::UnknownNode(node));
        }
        Ok(self.client_sizes.get(&node).copied().unwrap_or(Size::ZERO))
    }

    fn create_child(&mut self, parent: NodeId, kind: ElementKind) -> Result<NodeId, SurfaceError> {
        if !self.nodes.contains_key(&parent) {
            return Err(SurfaceError::UnknownNode(parent));
        }
        Ok(self.alloc(parent, kind))
    }

    fn set_attr(&mut self, node: NodeId, attr: Attr, value: AttrValue) -> Result<(), SurfaceError> {
        self.node_mut(node)?.attrs.insert(attr, value);
        self.cancel_transition(node, attr);
        Ok(())
    }

    fn attr(&self, node: NodeId, attr: Attr) -> Option<&AttrValue> {
        self.nodes.get(&node)?.attrs.get(&attr)
    }

    fn select_all(&self, scope: NodeId, selector: Selector<'_>) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_matches(scope, selector, &mut out);
        out
    }

    fn remove(&mut self, node: NodeId) -> Result<(), SurfaceError> {
        if node == self.root {
            return Err(SurfaceError::RootRemoval);
        }
        let parent = self
            .nodes
            .get(&node)
            .ok_or(SurfaceError::UnknownNode(node))?
            .parent;
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            p.children.retain(|&c| c != node);
        }
        let mut doomed = Vec::new();
        self.collect_subtree(node, &mut doomed);
        for id in &doomed {
            self.nodes.remove(id);
            self.client_sizes.remove(id);
        }
        self.transitions.retain(|t| !doomed.contains(&t.node));
        Ok(())
    }

    fn animate_attr(
        &mut self,
        node: NodeId,
        attr: Attr,
        value: AttrValue,
        duration: Duration,
    ) -> Result<(), SurfaceError> {
        if duration.is_zero() {
            return self.set_attr(node, attr, value);
        }
        let from = self.displayed_attr(node, attr);
        self.node_mut(node)?.attrs.insert(attr, value.clone());
        self.cancel_transition(node, attr);
        if let Some(from) = from
            && from != value
        {
            self.transitions.push(Transition {
                node,
                attr,
                from,
                to: value,
                duration,
                elapsed: Duration::ZERO,
            });
        }
        Ok(())
    }
}
