// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use kurbo::{Point, Rect, Vec2};

use crate::{ScaleExtent, Transition, ViewTransform};

/// Default duration for programmatic moves.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(750);

/// Animated requests closer than this to the current transform snap instead.
const SNAP_EPSILON: f64 = 1e-9;

/// Receives every transform commit, synchronously, before the committing call returns.
pub trait TransformObserver {
    /// Called after `viewport.transform()` has changed.
    fn transform_committed(&mut self, viewport: &Viewport);
}

impl TransformObserver for () {
    fn transform_committed(&mut self, _viewport: &Viewport) {}
}

/// How a requested transform is reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    /// Commit immediately.
    Snap,
    /// Interpolate over the given duration, committing on each [`Viewport::advance`].
    Animate(Duration),
}

impl Motion {
    /// `Snap` for a zero duration, `Animate` otherwise.
    #[must_use]
    pub fn over(duration: Duration) -> Self {
        if duration.is_zero() {
            Self::Snap
        } else {
            Self::Animate(duration)
        }
    }
}

/// Pan/zoom state over a display surface.
///
/// `Viewport` owns the current [`ViewTransform`] and the display surface
/// rectangle (in absolute/window coordinates). It can be used to:
/// - Convert points and rectangles between content, display and absolute space.
/// - Center a content point at a zoom level, fit a content rect, or reset.
/// - Run an interruptible transition towards a target transform.
///
/// Scale is clamped into the configured [`ScaleExtent`] on every commit.
#[derive(Clone, Debug)]
pub struct Viewport {
    surface: Rect,
    transform: ViewTransform,
    extent: ScaleExtent,
    transition: Option<Transition>,
    revision: u64,
}

impl Viewport {
    /// Creates a viewport over `surface` at the identity transform.
    ///
    /// The scale extent defaults to `[0.5, 4.0]`.
    #[must_use]
    pub fn new(surface: Rect) -> Self {
        Self {
            surface,
            transform: ViewTransform::IDENTITY,
            extent: ScaleExtent::default(),
            transition: None,
            revision: 0,
        }
    }

    /// Display surface in absolute coordinates.
    #[must_use]
    pub fn surface(&self) -> Rect {
        self.surface
    }

    /// Replaces the display surface rect, returning `true` if it changed.
    ///
    /// The transform is left untouched; a resize moves content relative to
    /// the window but does not pan or zoom it.
    pub fn set_surface(&mut self, surface: Rect) -> bool {
        if self.surface == surface {
            return false;
        }
        self.surface = surface;
        true
    }

    /// Current scale range.
    #[must_use]
    pub fn extent(&self) -> ScaleExtent {
        self.extent
    }

    /// Replaces the scale range and re-clamps the current transform.
    pub fn set_extent(&mut self, extent: ScaleExtent, observer: &mut impl TransformObserver) {
        self.extent = extent;
        let current = self.transform;
        self.commit(current, observer);
    }

    /// Current transform.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Current scale (`k`).
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    /// Number of commits so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Where the in-flight transition will land, if any.
    #[must_use]
    pub fn target(&self) -> Option<ViewTransform> {
        self.transition.map(|t| t.target())
    }

    /// Requests `transform`, clamped into the scale extent.
    ///
    /// Any in-flight transition is dropped: a snap replaces it, an animated
    /// request retargets from wherever the previous one had reached.
    pub fn apply_transform(
        &mut self,
        transform: ViewTransform,
        motion: Motion,
        observer: &mut impl TransformObserver,
    ) {
        let target = self.clamped(transform);
        self.transition = None;
        match motion {
            Motion::Snap => self.commit(target, observer),
            Motion::Animate(_) if target.approx_eq(&self.transform, SNAP_EPSILON) => {
                self.commit(target, observer);
            }
            Motion::Animate(duration) => {
                self.transition = Some(Transition::new(self.transform, target, duration));
            }
        }
    }

    /// Transform that puts content point `focal` at the surface center at `scale`.
    ///
    /// `scale` is clamped first so the centering holds for the committed scale.
    #[must_use]
    pub fn centered_on(&self, focal: Point, scale: f64) -> ViewTransform {
        let k = self.extent.clamp(scale);
        let size = self.surface.size();
        ViewTransform::new(
            size.width / 2.0 - focal.x * k,
            size.height / 2.0 - focal.y * k,
            k,
        )
    }

    /// Moves content point `focal` to the surface center at `scale`.
    ///
    /// Snaps when `duration` is zero, animates otherwise.
    pub fn pan_zoom_to(
        &mut self,
        focal: Point,
        scale: f64,
        duration: Duration,
        observer: &mut impl TransformObserver,
    ) {
        let target = self.centered_on(focal, scale);
        self.apply_transform(target, Motion::over(duration), observer);
    }

    /// Moves back to the identity transform.
    pub fn center_and_reset(&mut self, duration: Duration, observer: &mut impl TransformObserver) {
        self.apply_transform(ViewTransform::IDENTITY, Motion::over(duration), observer);
    }

    /// Fits the given content-space rectangle into the surface, centered.
    ///
    /// The scale is the largest one that shows all of `rect`, clamped into the
    /// extent. Degenerate rects or surfaces are ignored.
    pub fn fit_rect(
        &mut self,
        rect: Rect,
        duration: Duration,
        observer: &mut impl TransformObserver,
    ) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let size = self.surface.size();
        if size.width <= 0.0 || size.height <= 0.0 {
            return;
        }

        let sx = size.width / rect.width();
        let sy = size.height / rect.height();
        let target = self.centered_on(rect.center(), sx.min(sy));
        self.apply_transform(target, Motion::over(duration), observer);
    }

    /// Advances the in-flight transition by `dt` and commits the sampled
    /// transform. Returns `true` if a commit happened.
    pub fn advance(&mut self, dt: Duration, observer: &mut impl TransformObserver) -> bool {
        let Some(mut transition) = self.transition.take() else {
            return false;
        };
        transition.tick(dt);
        if !transition.is_complete() {
            self.transition = Some(transition);
        }
        let before = self.revision;
        self.commit(transition.sample(), observer);
        self.revision != before
    }

    /// Content point → display point.
    #[must_use]
    pub fn content_to_display_point(&self, pt: Point) -> Point {
        self.transform.apply(pt)
    }

    /// Display point → content point.
    #[must_use]
    pub fn display_to_content_point(&self, pt: Point) -> Point {
        self.transform.invert(pt)
    }

    /// Absolute point → content point.
    #[must_use]
    pub fn absolute_to_content_point(&self, pt: Point) -> Point {
        self.transform.invert(pt - self.surface_origin())
    }

    /// Content rect → display rect.
    ///
    /// Scale is uniform and positive, so mapping the two corners suffices.
    #[must_use]
    pub fn content_to_display_rect(&self, rect: Rect) -> Rect {
        let p0 = self.transform.apply(Point::new(rect.x0, rect.y0));
        let p1 = self.transform.apply(Point::new(rect.x1, rect.y1));
        Rect::from_points(p0, p1)
    }

    /// Content rect → absolute rect, as a host would measure it on screen.
    #[must_use]
    pub fn content_to_absolute_rect(&self, rect: Rect) -> Rect {
        self.content_to_display_rect(rect) + self.surface_origin()
    }

    /// Content-space rectangle currently visible through the surface.
    #[must_use]
    pub fn visible_content_rect(&self) -> Rect {
        let size = self.surface.size();
        let p0 = self.transform.invert(Point::ZERO);
        let p1 = self.transform.invert(Point::new(size.width, size.height));
        Rect::from_points(p0, p1)
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            surface: self.surface,
            transform: self.transform,
            target: self.target(),
            visible_content_rect: self.visible_content_rect(),
            extent: self.extent,
            revision: self.revision,
        }
    }

    fn surface_origin(&self) -> Vec2 {
        self.surface.origin().to_vec2()
    }

    fn clamped(&self, transform: ViewTransform) -> ViewTransform {
        ViewTransform {
            scale: self.extent.clamp(transform.scale),
            ..transform
        }
    }

    fn commit(&mut self, transform: ViewTransform, observer: &mut impl TransformObserver) {
        let next = self.clamped(transform);
        if next == self.transform {
            return;
        }
        self.transform = next;
        self.revision += 1;
        observer.transform_committed(self);
    }
}

/// Debug snapshot of a [`Viewport`] state.
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Display surface in absolute coordinates.
    pub surface: Rect,
    /// Committed transform.
    pub transform: ViewTransform,
    /// Target of the in-flight transition, if any.
    pub target: Option<ViewTransform>,
    /// Content-space rectangle visible through the surface.
    pub visible_content_rect: Rect,
    /// Scale range.
    pub extent: ScaleExtent,
    /// Number of commits so far.
    pub revision: u64,
}
