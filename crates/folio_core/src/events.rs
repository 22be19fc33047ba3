//! Event dispatch system
//!
//! Every component is driven by one of a handful of event sources:
//! pointer movement, a fixed-interval clock, scroll position, and
//! viewport-intersection changes. Hosts translate their native events
//! into [`Event`]s and hand them to an [`EventDispatcher`].

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::content::ItemId;
use crate::geometry::{Point, Rect};

new_key_type! {
    /// Identifier of a mounted component
    pub struct WidgetId;
    /// Identifier of a registered listener
    pub struct ListenerId;
}

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    /// Touch movement; only the first active touch point is used
    pub const TOUCH_MOVE: EventType = 6;
    pub const FOCUS_IN: EventType = 10;
    pub const FOCUS_OUT: EventType = 11;
    pub const WHEEL: EventType = 30;
    pub const SCROLL: EventType = 31;
    pub const RESIZE: EventType = 40;
    /// Intersection ratio of the target with the viewport changed
    pub const VISIBILITY: EventType = 41;
    /// Measured content of the target changed (list grew, text reflowed)
    pub const CONTENT_CHANGED: EventType = 42;
    /// Visible ratio crossed the component's threshold upward
    pub const VIEW_ENTER: EventType = 43;
    /// Visible ratio dropped below the component's threshold
    pub const VIEW_LEAVE: EventType = 44;

    // Orbit selection
    pub const NODE_CLICK: EventType = 50;
    pub const BACKGROUND_CLICK: EventType = 51;
    pub const RELATED_CLICK: EventType = 52;

    // Carousel navigation
    pub const NAV_PREV: EventType = 55;
    pub const NAV_NEXT: EventType = 56;
    pub const NAV_TO: EventType = 57;

    // Element lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: WidgetId,
    pub data: EventData,
    pub timestamp: u64,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
    },
    Touch {
        /// Active touch points in the order the host reports them
        touches: SmallVec<[Point; 2]>,
    },
    Wheel {
        delta_y: f32,
        /// Ctrl-wheel is a browser zoom gesture and is never smoothed
        ctrl: bool,
    },
    Scroll {
        scroll_y: f32,
        /// Viewport height at the time of the scroll
        viewport_height: f32,
        /// Target's bounding rect in viewport coordinates
        target: Rect,
    },
    Resize {
        width: f32,
        height: f32,
    },
    Visibility {
        /// Fraction of the target inside the viewport (0.0 to 1.0)
        ratio: f32,
    },
    Content {
        /// Newly measured content height in pixels
        height: f32,
    },
    Item {
        id: ItemId,
        /// Item whose detail panel the click came from, if any
        source: Option<ItemId>,
    },
    Index(usize),
    None,
}

impl Event {
    pub fn new(event_type: EventType, target: WidgetId, data: EventData) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp: 0,
            propagation_stopped: false,
        }
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Pointer position carried by this event.
    ///
    /// Touch events resolve to their first touch point; a touch event
    /// with no active touches has no position.
    pub fn primary_point(&self) -> Option<Point> {
        match &self.data {
            EventData::Pointer { x, y } => Some(Point::new(*x, *y)),
            EventData::Touch { touches } => touches.first().copied(),
            _ => None,
        }
    }
}

/// Event handler function type
pub type EventHandler = Box<dyn Fn(&Event) + Send + Sync>;

struct Listener {
    widget: WidgetId,
    event_type: EventType,
    handler: EventHandler,
}

/// Dispatches events to registered handlers.
///
/// Listeners are owned by the widget they were registered for; tearing a
/// widget down removes all of them so no callback outlives its component.
pub struct EventDispatcher {
    listeners: SlotMap<ListenerId, Listener>,
    index: FxHashMap<(WidgetId, EventType), SmallVec<[ListenerId; 2]>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            index: FxHashMap::default(),
        }
    }

    /// Register an event handler for a widget and event type
    pub fn register<F>(&mut self, widget: WidgetId, event_type: EventType, handler: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let id = self.listeners.insert(Listener {
            widget,
            event_type,
            handler: Box::new(handler),
        });
        self.index.entry((widget, event_type)).or_default().push(id);
        id
    }

    /// Remove a single listener. Returns false if it was already gone.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let Some(listener) = self.listeners.remove(id) else {
            return false;
        };

        let key = (listener.widget, listener.event_type);
        if let Some(ids) = self.index.get_mut(&key) {
            ids.retain(|l| *l != id);
            if ids.is_empty() {
                self.index.remove(&key);
            }
        }
        true
    }

    /// Remove every listener registered for `widget`, returning how many
    pub fn teardown(&mut self, widget: WidgetId) -> usize {
        let ids: Vec<ListenerId> = self
            .listeners
            .iter()
            .filter(|(_, l)| l.widget == widget)
            .map(|(id, _)| id)
            .collect();

        for id in &ids {
            self.unregister(*id);
        }

        if !ids.is_empty() {
            tracing::debug!(removed = ids.len(), "listeners torn down");
        }
        ids.len()
    }

    /// Dispatch an event to all registered handlers, returning how many ran
    pub fn dispatch(&self, event: &mut Event) -> usize {
        let Some(ids) = self.index.get(&(event.target, event.event_type)) else {
            return 0;
        };

        let mut handled = 0;
        for id in ids {
            if event.propagation_stopped {
                break;
            }
            if let Some(listener) = self.listeners.get(*id) {
                (listener.handler)(event);
                handled += 1;
            }
        }
        handled
    }

    /// Number of live listeners across all widgets
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of live listeners for one widget
    pub fn listeners_for(&self, widget: WidgetId) -> usize {
        self.listeners
            .iter()
            .filter(|(_, l)| l.widget == widget)
            .count()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
