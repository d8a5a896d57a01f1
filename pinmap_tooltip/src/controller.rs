// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Vec2};

use crate::{ContentHandle, Placement, TooltipConfig, TooltipNotice, TooltipOverlay};

/// Invalid tooltip requests. These are reported, never raised as panics.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TooltipError {
    /// Asked to close an overlay that is not open.
    #[error("no open tooltip matches {0}")]
    NotOpen(String),
}

/// Outcome of [`TooltipController::reposition`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Repositioned {
    /// The overlay now sits at this absolute anchor point.
    Moved(Point),
    /// The anchor left the bounded surface; the overlay was removed.
    Removed,
    /// No overlay is open for the key.
    NotOpen,
}

/// Owner of all tooltip overlays, keyed by `K` (a marker id).
#[derive(Clone, Debug)]
pub struct TooltipController<K> {
    overlays: HashMap<K, TooltipOverlay<K>>,
    config: TooltipConfig,
    frame: Rect,
    next_handle: u64,
    next_seq: u64,
    notices: Vec<TooltipNotice<K>>,
}

impl<K: Copy + Eq + Hash + Debug> TooltipController<K> {
    /// Creates an empty controller clamping content to `frame` (the window, in
    /// absolute coordinates).
    pub fn new(config: TooltipConfig, frame: Rect) -> Self {
        Self {
            overlays: HashMap::new(),
            config,
            frame,
            next_handle: 1,
            next_seq: 0,
            notices: Vec::new(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    /// Whether several overlays may be open at once.
    pub fn is_multi_selection(&self) -> bool {
        self.config.multi_selection
    }

    /// Window frame used for clamping.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Replaces the window frame and re-clamps every overlay.
    pub fn set_frame(&mut self, frame: Rect) {
        if self.frame == frame {
            return;
        }
        self.frame = frame;
        let inset = self.config.clamp_inset;
        for overlay in self.overlays.values_mut() {
            overlay.correction = correction_for(overlay, frame, inset);
        }
    }

    /// Number of open overlays.
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    /// Returns `true` if no overlay is open.
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Returns `true` if an overlay is open for `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.overlays.contains_key(key)
    }

    /// Overlay for `key`, if open.
    pub fn get(&self, key: &K) -> Option<&TooltipOverlay<K>> {
        self.overlays.get(key)
    }

    /// Keys of open overlays, oldest first.
    pub fn keys(&self) -> Vec<K> {
        sorted_by_seq(self.overlays.values())
            .into_iter()
            .map(|o| o.key)
            .collect()
    }

    /// Open overlays, oldest first.
    pub fn overlays(&self) -> Vec<&TooltipOverlay<K>> {
        sorted_by_seq(self.overlays.values())
    }

    /// Opens an overlay for `key` anchored on `anchor` (absolute coordinates).
    ///
    /// In single-selection mode every other overlay is removed first, oldest
    /// first, each queuing a [`TooltipNotice::Hidden`]. An overlay already open
    /// for `key` is replaced. Queues a [`TooltipNotice::Shown`] for the new one.
    pub fn open(&mut self, key: K, anchor: Rect, tooltip_offset: Vec2) -> ContentHandle {
        if !self.config.multi_selection {
            self.close_all();
        } else if self.overlays.contains_key(&key) {
            self.remove(&key);
        }

        let content = ContentHandle(self.next_handle);
        self.next_handle += 1;
        let seq = self.next_seq;
        self.next_seq += 1;

        let position = self.anchor_point(anchor, tooltip_offset);
        self.overlays.insert(
            key,
            TooltipOverlay {
                key,
                position,
                tooltip_offset,
                content,
                visible: true,
                content_bounds: None,
                correction: Vec2::ZERO,
                seq,
            },
        );
        self.notices.push(TooltipNotice::Shown {
            key,
            content,
            position,
        });
        self.clamp_to_viewport(content);
        content
    }

    /// Removes the overlay for `key`.
    ///
    /// Closing an overlay that is not open is reported through `tracing` and
    /// returned as an error; nothing else happens.
    pub fn close(&mut self, key: &K) -> Result<ContentHandle, TooltipError> {
        match self.remove(key) {
            Some(content) => Ok(content),
            None => {
                tracing::error!(?key, "no matching tooltip open");
                Err(TooltipError::NotOpen(format!("{key:?}")))
            }
        }
    }

    /// Removes every overlay, oldest first. Returns how many were removed.
    pub fn close_all(&mut self) -> usize {
        let keys = self.keys();
        for key in &keys {
            self.remove(key);
        }
        keys.len()
    }

    /// Moves the overlay for `key` to follow `anchor`, or removes it when the
    /// anchor lies entirely outside `surface` shrunk by the boundary margin.
    ///
    /// Both rects are in absolute coordinates.
    pub fn reposition(&mut self, key: &K, anchor: Rect, surface: Rect) -> Repositioned {
        if !self.overlays.contains_key(key) {
            return Repositioned::NotOpen;
        }
        if is_outside(anchor, surface, self.config.boundary) {
            self.remove(key);
            return Repositioned::Removed;
        }

        let placement = self.config.placement;
        let (frame, inset) = (self.frame, self.config.clamp_inset);
        let Some(overlay) = self.overlays.get_mut(key) else {
            return Repositioned::NotOpen;
        };
        overlay.position = anchor_point(placement, anchor, overlay.tooltip_offset);
        overlay.correction = correction_for(overlay, frame, inset);
        Repositioned::Moved(overlay.position)
    }

    /// Records the measured content box for `content`, relative to the overlay's
    /// anchor point, and re-clamps. Unknown handles are ignored.
    pub fn set_content_bounds(&mut self, content: ContentHandle, bounds: Rect) {
        if let Some(overlay) = self.overlay_for_handle_mut(content) {
            overlay.content_bounds = Some(bounds);
        }
        self.clamp_to_viewport(content);
    }

    /// Recomputes the corrective translation for `content` against the frame.
    ///
    /// If the positioned content box overflows any frame edge, the correction
    /// moves that edge back to the clamp inset; a fully on-screen (or not yet
    /// measured) box has its correction cleared. Returns the new correction,
    /// or `None` for an unknown handle.
    pub fn clamp_to_viewport(&mut self, content: ContentHandle) -> Option<Vec2> {
        let (frame, inset) = (self.frame, self.config.clamp_inset);
        let overlay = self.overlay_for_handle_mut(content)?;
        overlay.correction = correction_for(overlay, frame, inset);
        Some(overlay.correction)
    }

    /// Takes every queued notice, in the order they happened.
    pub fn drain_notices(&mut self) -> Vec<TooltipNotice<K>> {
        core::mem::take(&mut self.notices)
    }

    fn anchor_point(&self, anchor: Rect, tooltip_offset: Vec2) -> Point {
        anchor_point(self.config.placement, anchor, tooltip_offset)
    }

    fn overlay_for_handle_mut(&mut self, content: ContentHandle) -> Option<&mut TooltipOverlay<K>> {
        self.overlays.values_mut().find(|o| o.content == content)
    }

    fn remove(&mut self, key: &K) -> Option<ContentHandle> {
        let overlay = self.overlays.remove(key)?;
        self.notices.push(TooltipNotice::Hidden {
            key: overlay.key,
            content: overlay.content,
        });
        Some(overlay.content)
    }
}

fn anchor_point(placement: Placement, anchor: Rect, offset: Vec2) -> Point {
    let y = match placement {
        Placement::Below => anchor.y1,
        Placement::Above => anchor.y0,
    };
    Point::new(anchor.center().x + offset.x, y + offset.y)
}

fn is_outside(anchor: Rect, surface: Rect, boundary: f64) -> bool {
    anchor.x1 < surface.x0 + boundary
        || anchor.x0 > surface.x1 - boundary
        || anchor.y1 < surface.y0 + boundary
        || anchor.y0 > surface.y1 - boundary
}

fn correction_for<K>(overlay: &TooltipOverlay<K>, frame: Rect, inset: f64) -> Vec2 {
    let Some(bounds) = overlay.content_bounds else {
        return Vec2::ZERO;
    };
    let rect = bounds + overlay.position.to_vec2();

    let dx = if rect.x0 < frame.x0 {
        frame.x0 + inset - rect.x0
    } else if rect.x1 > frame.x1 {
        frame.x1 - inset - rect.x1
    } else {
        0.0
    };
    let dy = if rect.y0 < frame.y0 {
        frame.y0 + inset - rect.y0
    } else if rect.y1 > frame.y1 {
        frame.y1 - inset - rect.y1
    } else {
        0.0
    };
    Vec2::new(dx, dy)
}

fn sorted_by_seq<'a, K: 'a>(
    overlays: impl Iterator<Item = &'a TooltipOverlay<K>>,
) -> Vec<&'a TooltipOverlay<K>> {
    let mut v: Vec<_> = overlays.collect();
    v.sort_by_key(|o| o.seq);
    v
}
