// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positional enter/update/exit reconciliation.
//!
//! A join matches the elements currently under a parent (found with a
//! [`Selector`]) against a data slice **by index**. There is no data key:
//! element `i` is bound to datum `i`, whatever it was bound to before.
//!
//! With `m` existing elements and `n` data:
//! - **enter** creates elements for indices `m..n`,
//! - **update** refreshes every element with index `< n` (entered ones included),
//! - **exit** removes existing elements with index `>= n`.

extern crate alloc;

use alloc::vec::Vec;

use crate::node::{Attr, NodeId, Selector};
use crate::surface::{Surface, SurfaceError};

/// Counts produced by one [`join`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoinSummary {
    /// Elements created.
    pub entered: usize,
    /// Elements refreshed by the update phase (including entered ones).
    pub updated: usize,
    /// Elements removed.
    pub exited: usize,
}

impl JoinSummary {
    /// Number of elements bound to data after the pass.
    pub fn bound(&self) -> usize {
        self.updated
    }

    /// Returns `true` if the pass neither created nor removed elements.
    pub fn is_stable(&self) -> bool {
        self.entered == 0 && self.exited == 0
    }
}

/// Reconciles the elements under `parent` matching `selector` with `data`.
///
/// `enter` runs once per created element, before the update phase, and is
/// where per-element constants belong. `update` runs for every bound element
/// in index order. Entered elements get the selector's class so the next
/// pass finds them again.
pub fn join<S, T, E, U>(
    surface: &mut S,
    parent: NodeId,
    selector: Selector<'_>,
    data: &[T],
    mut enter: E,
    mut update: U,
) -> Result<JoinSummary, SurfaceError>
where
    S: Surface + ?Sized,
    E: FnMut(&mut S, NodeId, usize, &T) -> Result<(), SurfaceError>,
    U: FnMut(&mut S, NodeId, usize, &T) -> Result<(), SurfaceError>,
{
    let existing = surface.select_all(parent, selector);
    let n = data.len();
    let m = existing.len();

    let mut bound: Vec<NodeId> = existing.iter().copied().take(n).collect();
    for (i, datum) in data.iter().enumerate().skip(m) {
        let node = surface.create_child(parent, selector.kind)?;
        if let Some(class) = selector.class {
            surface.set_attr(node, Attr::Class, class.into())?;
        }
        enter(surface, node, i, datum)?;
        bound.push(node);
    }

    for (i, (node, datum)) in bound.iter().zip(data).enumerate() {
        update(surface, *node, i, datum)?;
    }

    for node in existing.iter().skip(n) {
        surface.remove(*node)?;
    }

    let summary = JoinSummary {
        entered: n.saturating_sub(m),
        updated: n,
        exited: m.saturating_sub(n),
    };
    log::trace!(target: "joinplot_core", "join {:?}: {summary:?}", selector);
    Ok(summary)
}
