// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing-surface capability.

extern crate alloc;

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Size;

use crate::node::{Attr, AttrValue, ElementKind, NodeId, Selector};

/// Errors returned by [`Surface`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The node does not exist (never created, or already removed).
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
    /// The surface root cannot be removed.
    #[error("the surface root cannot be removed")]
    RootRemoval,
}

/// A mutable tree of typed elements that charts render into.
///
/// This is the whole contract a chart needs from its host environment:
/// create children, write attributes, query descendants, remove elements and
/// animate attribute writes. Implementations own the tree exclusively; every
/// call runs to completion before the next one.
pub trait Surface {
    /// Returns the root node.
    fn root(&self) -> NodeId;

    /// Returns the kind of `node`, or `None` if it does not exist.
    fn kind(&self, node: NodeId) -> Option<ElementKind>;

    /// Returns the measured bounding box of `node`.
    fn client_size(&self, node: NodeId) -> Result<Size, SurfaceError>;

    /// Appends a new element of `kind` as the last child of `parent`.
    fn create_child(&mut self, parent: NodeId, kind: ElementKind) -> Result<NodeId, SurfaceError>;

    /// Writes an attribute immediately.
    fn set_attr(&mut self, node: NodeId, attr: Attr, value: AttrValue) -> Result<(), SurfaceError>;

    /// Reads the committed value of an attribute.
    fn attr(&self, node: NodeId, attr: Attr) -> Option<&AttrValue>;

    /// Returns all descendants of `scope` matching `selector`, in document order.
    fn select_all(&self, scope: NodeId, selector: Selector<'_>) -> Vec<NodeId>;

    /// Returns the first descendant of `scope` matching `selector`.
    fn select(&self, scope: NodeId, selector: Selector<'_>) -> Option<NodeId> {
        self.select_all(scope, selector).into_iter().next()
    }

    /// Removes `node` and its subtree.
    fn remove(&mut self, node: NodeId) -> Result<(), SurfaceError>;

    /// Writes an attribute, transitioning from the displayed value over `duration`.
    ///
    /// The committed value (what [`Surface::attr`] returns) is `value` as soon as
    /// this returns; only the displayed value animates. A zero duration is the
    /// same as [`Surface::set_attr`].
    fn animate_attr(
        &mut self,
        node: NodeId,
        attr: Attr,
        value: AttrValue,
        duration: Duration,
    ) -> Result<(), SurfaceError>;
}
