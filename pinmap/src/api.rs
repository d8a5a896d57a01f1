// Copyright 2025 the Pinmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public actions, events, and their payloads.

use pinmap_bus::{BusError, Message, Topic};
use pinmap_markers::{Marker, MarkerError, MarkerId};
use pinmap_tooltip::{ContentHandle, TooltipError};
use pinmap_view::ViewTransform;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Names of the commands a host can issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionTopic {
    /// `zoomToMarker`
    ZoomToMarker,
    /// `zoomToContainElement`
    ZoomToContainElement,
    /// `zoomToPosition`
    ZoomToPosition,
    /// `centerMap`
    CenterMap,
    /// `removeTooltip`
    RemoveTooltip,
    /// `showTooltip`
    ShowTooltip,
}

impl Topic for ActionTopic {
    const ALL: &'static [Self] = &[
        Self::ZoomToMarker,
        Self::ZoomToContainElement,
        Self::ZoomToPosition,
        Self::CenterMap,
        Self::RemoveTooltip,
        Self::ShowTooltip,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::ZoomToMarker => "zoomToMarker",
            Self::ZoomToContainElement => "zoomToContainElement",
            Self::ZoomToPosition => "zoomToPosition",
            Self::CenterMap => "centerMap",
            Self::RemoveTooltip => "removeTooltip",
            Self::ShowTooltip => "showTooltip",
        }
    }
}

/// Names of the notifications a host can listen to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventTopic {
    /// `onImageLoad`
    ImageLoad,
    /// `onAssetLoad`
    AssetLoad,
    /// `onLoad`
    Load,
    /// `onMarkerClick`
    MarkerClick,
    /// `onPanZoom`
    PanZoom,
    /// `onTooltipShow`
    TooltipShow,
    /// `onTooltipHide`
    TooltipHide,
}

impl Topic for EventTopic {
    const ALL: &'static [Self] = &[
        Self::ImageLoad,
        Self::AssetLoad,
        Self::Load,
        Self::MarkerClick,
        Self::PanZoom,
        Self::TooltipShow,
        Self::TooltipHide,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::ImageLoad => "onImageLoad",
            Self::AssetLoad => "onAssetLoad",
            Self::Load => "onLoad",
            Self::MarkerClick => "onMarkerClick",
            Self::PanZoom => "onPanZoom",
            Self::TooltipShow => "onTooltipShow",
            Self::TooltipHide => "onTooltipHide",
        }
    }
}

/// Payload of `zoomToPosition`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomTarget {
    /// Content x to center.
    pub x: f64,
    /// Content y to center.
    pub y: f64,
    /// Requested scale; clamped into the viewport's extent.
    pub zoom_level: f64,
}

/// A command from the host.
///
/// Serialized externally tagged by action name, e.g. `{"zoomToMarker": 1}` or
/// `"centerMap"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Center a marker at zoom level 3.
    ZoomToMarker(MarkerId),
    /// Fit a marker's footprint into the surface.
    ZoomToContainElement(MarkerId),
    /// Center a content point at a zoom level.
    ZoomToPosition(ZoomTarget),
    /// Return to the identity transform.
    CenterMap,
    /// Close a marker's tooltip.
    RemoveTooltip(MarkerId),
    /// Open a marker's tooltip.
    ShowTooltip(MarkerId),
}

impl Message for Action {
    type Topic = ActionTopic;

    fn topic(&self) -> ActionTopic {
        match self {
            Self::ZoomToMarker(_) => ActionTopic::ZoomToMarker,
            Self::ZoomToContainElement(_) => ActionTopic::ZoomToContainElement,
            Self::ZoomToPosition(_) => ActionTopic::ZoomToPosition,
            Self::CenterMap => ActionTopic::CenterMap,
            Self::RemoveTooltip(_) => ActionTopic::RemoveTooltip,
            Self::ShowTooltip(_) => ActionTopic::ShowTooltip,
        }
    }
}

/// Returns `true` for a `null` or empty-object payload.
pub(crate) fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Wraps a named payload in the externally tagged shape [`Action`] and
/// [`Event`] deserialize from.
///
/// An empty payload names a unit variant.
pub(crate) fn tagged(name: &str, payload: Value) -> Value {
    if is_empty_payload(&payload) {
        Value::String(name.to_owned())
    } else {
        let mut map = serde_json::Map::with_capacity(1);
        map.insert(name.to_owned(), payload);
        Value::Object(map)
    }
}

/// Payload of `onAssetLoad`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetLoadEvent {
    /// Registered asset kinds, sorted.
    pub kinds: Vec<String>,
}

/// Payload of `onMarkerClick`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerClickEvent {
    /// The clicked marker, with `x`/`y` replaced by its offset-adjusted position.
    pub data: Marker,
    /// `true` if the click opened the tooltip.
    #[serde(rename = "tooltipOpened")]
    pub tooltip_opened: bool,
}

/// Payload of `onPanZoom`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanZoomEvent {
    /// Transform after the change.
    pub transform: ViewTransform,
}

/// Absolute anchor of a shown tooltip.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TooltipPosition {
    /// Absolute y.
    pub top: f64,
    /// Absolute x.
    pub left: f64,
}

/// Payload of `onTooltipShow`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TooltipShowEvent {
    /// Marker the tooltip belongs to.
    pub data: Marker,
    /// Handle of the content box to populate.
    pub content: ContentHandle,
    /// Where the tooltip is anchored.
    pub position: TooltipPosition,
}

/// Payload of `onTooltipHide`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TooltipHideEvent {
    /// Marker the tooltip belonged to.
    pub data: Marker,
    /// Handle that is no longer valid.
    pub content: ContentHandle,
}

/// A notification to the host.
///
/// Serialized externally tagged by event name, e.g. `"onLoad"` or
/// `{"onPanZoom": {"transform": {...}}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Background image loaded.
    #[serde(rename = "onImageLoad")]
    ImageLoad,
    /// Marker symbols registered.
    #[serde(rename = "onAssetLoad")]
    AssetLoad(AssetLoadEvent),
    /// Image and assets both loaded; markers are drawn.
    #[serde(rename = "onLoad")]
    Load,
    /// A marker was clicked.
    #[serde(rename = "onMarkerClick")]
    MarkerClick(MarkerClickEvent),
    /// The transform changed.
    #[serde(rename = "onPanZoom")]
    PanZoom(PanZoomEvent),
    /// A tooltip opened.
    #[serde(rename = "onTooltipShow")]
    TooltipShow(TooltipShowEvent),
    /// A tooltip closed.
    #[serde(rename = "onTooltipHide")]
    TooltipHide(TooltipHideEvent),
}

impl Message for Event {
    type Topic = EventTopic;

    fn topic(&self) -> EventTopic {
        match self {
            Self::ImageLoad => EventTopic::ImageLoad,
            Self::AssetLoad(_) => EventTopic::AssetLoad,
            Self::Load => EventTopic::Load,
            Self::MarkerClick(_) => EventTopic::MarkerClick,
            Self::PanZoom(_) => EventTopic::PanZoom,
            Self::TooltipShow(_) => EventTopic::TooltipShow,
            Self::TooltipHide(_) => EventTopic::TooltipHide,
        }
    }
}

/// Errors from the public API. All of them are also logged.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The name is neither an action nor an event.
    #[error(transparent)]
    Bus(#[from] BusError),
    /// The payload does not fit the action or event.
    #[error("invalid payload for `{name}`: {source}")]
    Payload {
        /// Action or event name.
        name: String,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The action refers to a marker that does not exist.
    #[error(transparent)]
    Marker(#[from] MarkerError),
    /// The action refers to a tooltip that is not open.
    #[error(transparent)]
    Tooltip(#[from] TooltipError),
}

#[cfg(test)]
mod tests {
    use pinmap_bus::Topic;
    use pinmap_markers::MarkerId;
    use serde_json::json;

    use pinmap_view::ViewTransform;

    use super::{Action, ActionTopic, Event, EventTopic, PanZoomEvent, ZoomTarget, tagged};

    #[test]
    fn action_names_round_trip_through_lookup() {
        for t in ActionTopic::ALL {
            assert_eq!(ActionTopic::from_name(t.name()), Some(*t));
            assert_eq!(EventTopic::from_name(t.name()), None);
        }
        for t in EventTopic::ALL {
            assert_eq!(EventTopic::from_name(t.name()), Some(*t));
        }
    }

    #[test]
    fn tagged_payloads_decode() {
        let a: Action =
            serde_json::from_value(tagged("zoomToMarker", json!(1))).expect("id payload");
        assert_eq!(a, Action::ZoomToMarker(MarkerId(1)));

        let a: Action = serde_json::from_value(tagged(
            "zoomToPosition",
            json!({"x": 100, "y": 100, "zoomLevel": 3}),
        ))
        .expect("position payload");
        assert_eq!(
            a,
            Action::ZoomToPosition(ZoomTarget {
                x: 100.0,
                y: 100.0,
                zoom_level: 3.0
            })
        );

        let a: Action =
            serde_json::from_value(tagged("centerMap", json!({}))).expect("unit payload");
        assert_eq!(a, Action::CenterMap);
        let a: Action =
            serde_json::from_value(tagged("centerMap", json!(null))).expect("unit payload");
        assert_eq!(a, Action::CenterMap);
    }

    #[test]
    fn events_decode_from_named_payloads() {
        let e: Event = serde_json::from_value(tagged("onLoad", json!(null))).expect("unit event");
        assert_eq!(e, Event::Load);

        let e: Event = serde_json::from_value(tagged(
            "onPanZoom",
            json!({"transform": {"translateX": 5, "translateY": 0, "scale": 2}}),
        ))
        .expect("transform payload");
        assert_eq!(
            e,
            Event::PanZoom(PanZoomEvent {
                transform: ViewTransform::new(5.0, 0.0, 2.0)
            })
        );
    }

    #[test]
    fn wrong_payload_shape_fails() {
        let r: Result<Action, _> =
            serde_json::from_value(tagged("zoomToMarker", json!({"x": 1})));
        assert!(r.is_err());
    }
}
