// Copyright 2025 the joinplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host element adapter.

use joinplot_core::{ElementKind, NodeId, Selector, Surface};
use kurbo::Size;

use crate::error::ChartError;

/// The surface a chart renders into, plus the container element it was mounted in.
///
/// The drawing surface is the first `svg` element below `container`. It must
/// exist before [`Host::acquire_surface`] is called.
#[derive(Debug)]
pub struct Host<S> {
    surface: S,
    container: NodeId,
    svg: Option<NodeId>,
}

impl<S: Surface> Host<S> {
    /// Wraps `surface`, with `container` as the host element.
    pub fn new(surface: S, container: NodeId) -> Self {
        Self {
            surface,
            container,
            svg: None,
        }
    }

    /// Wraps `surface`, using its root as the host element.
    pub fn from_root(surface: S) -> Self {
        let container = surface.root();
        Self::new(surface, container)
    }

    /// Finds (and remembers) the drawing surface under the container.
    pub fn acquire_surface(&mut self) -> Result<NodeId, ChartError> {
        let svg = self
            .surface
            .select(self.container, Selector::new(ElementKind::Svg))
            .ok_or(ChartError::MissingSurface(self.container))?;
        self.svg = Some(svg);
        Ok(svg)
    }

    /// The drawing surface node, once acquired.
    pub fn svg(&self) -> Option<NodeId> {
        self.svg
    }

    /// The host element.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Measured size of the drawing surface.
    pub fn bounding_dimensions(&self) -> Result<Size, ChartError> {
        let svg = self.svg.ok_or(ChartError::MissingSurface(self.container))?;
        Ok(self.surface.client_size(svg)?)
    }

    /// Shared access to the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Returns the wrapped surface.
    pub fn into_inner(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use joinplot_core::RetainedSurface;

    use super::*;

    #[test]
    fn acquires_the_mounted_svg() {
        let (s, svg) = RetainedSurface::with_svg(Size::new(640.0, 480.0));
        let mut host = Host::from_root(s);
        assert_eq!(host.acquire_surface(), Ok(svg));
        assert_eq!(host.bounding_dimensions(), Ok(Size::new(640.0, 480.0)));
    }

    #[test]
    fn missing_svg_is_an_error() {
        let s = RetainedSurface::new();
        let root = s.root();
        let mut host = Host::new(s, root);
        assert_eq!(
            host.acquire_surface(),
            Err(ChartError::MissingSurface(root))
        );
        assert_eq!(
            host.bounding_dimensions(),
            Err(ChartError::MissingSurface(root))
        );
    }

    #[test]
    fn measurement_tracks_resizes() {
        let (s, svg) = RetainedSurface::with_svg(Size::new(100.0, 100.0));
        let mut host = Host::from_root(s);
        host.acquire_surface().unwrap();
        host.surface_mut()
            .set_client_size(svg, Size::new(300.0, 150.0))
            .unwrap();
        assert_eq!(host.bounding_dimensions(), Ok(Size::new(300.0, 150.0)));
    }
}
