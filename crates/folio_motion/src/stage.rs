//! Stage: mounts components, routes events, ticks frames
//!
//! Each mounted component gets a [`WidgetId`] and one listener per event
//! type it understands. Unmounting removes the component and every
//! listener registered for it, so no callback can reach a disposed
//! component and frame ticks stop immediately.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use folio_core::events::{event_types, Event, EventDispatcher, EventType, WidgetId};
use slotmap::SlotMap;

use crate::carousel::Carousel;
use crate::orbit::OrbitalLayout;
use crate::page::NavVisibility;
use crate::reveal::RevealGroup;
use crate::scroll_progress::ScrollProgress;
use crate::tilt::TiltCard;
use crate::trail::PointerTracker;
use crate::wheel::WheelSmoother;

/// Largest frame delta handed to components
const MAX_FRAME_DT: f32 = 0.25;

/// Any component the stage can host
pub enum Component {
    Trail(PointerTracker),
    Tilt(TiltCard),
    Orbit(OrbitalLayout),
    Timeline(ScrollProgress),
    Carousel(Carousel),
    Nav(NavVisibility),
    Wheel(WheelSmoother),
    Reveal(RevealGroup),
}

impl Component {
    pub fn kind(&self) -> &'static str {
        match self {
            Component::Trail(_) => "trail",
            Component::Tilt(_) => "tilt",
            Component::Orbit(_) => "orbit",
            Component::Timeline(_) => "timeline",
            Component::Carousel(_) => "carousel",
            Component::Nav(_) => "nav",
            Component::Wheel(_) => "wheel",
            Component::Reveal(_) => "reveal",
        }
    }

    /// Event types this component listens for
    pub fn event_types(&self) -> &'static [EventType] {
        use event_types::*;
        match self {
            Component::Trail(_) => &[POINTER_MOVE, TOUCH_MOVE],
            Component::Tilt(_) => &[POINTER_ENTER, POINTER_MOVE, POINTER_LEAVE],
            Component::Orbit(_) => &[NODE_CLICK, RELATED_CLICK, BACKGROUND_CLICK, VISIBILITY],
            Component::Timeline(_) => &[SCROLL, CONTENT_CHANGED],
            Component::Carousel(_) => &[
                POINTER_ENTER,
                POINTER_LEAVE,
                FOCUS_IN,
                VISIBILITY,
                NAV_PREV,
                NAV_NEXT,
                NAV_TO,
            ],
            Component::Nav(_) => &[SCROLL, RESIZE],
            Component::Wheel(_) => &[WHEEL, SCROLL],
            // Reveal groups are driven with element tops, not events
            Component::Reveal(_) => &[],
        }
    }

    pub fn on_event(&mut self, event: &Event) -> bool {
        match self {
            Component::Trail(c) => c.on_event(event),
            Component::Tilt(c) => c.on_event(event),
            Component::Orbit(c) => c.on_event(event),
            Component::Timeline(c) => c.on_event(event),
            Component::Carousel(c) => c.on_event(event),
            Component::Nav(c) => c.on_event(event),
            Component::Wheel(c) => c.on_event(event),
            Component::Reveal(_) => false,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        match self {
            Component::Trail(c) => c.tick(dt),
            Component::Tilt(c) => c.tick(dt),
            Component::Orbit(c) => c.tick(dt),
            // Progress is a pure function of the last scroll event
            Component::Timeline(_) => {}
            Component::Carousel(c) => c.tick(dt),
            Component::Nav(c) => {
                c.frame();
            }
            Component::Wheel(c) => c.tick(dt),
            Component::Reveal(c) => c.tick(dt),
        }
    }

    pub fn is_animating(&self) -> bool {
        match self {
            Component::Trail(c) => c.is_animating(),
            Component::Tilt(c) => c.is_animating(),
            Component::Orbit(c) => c.is_animating(),
            Component::Timeline(_) | Component::Nav(_) => false,
            Component::Carousel(c) => c.is_animating(),
            Component::Wheel(c) => c.is_animating(),
            Component::Reveal(c) => c.is_animating(),
        }
    }
}

macro_rules! impl_from_component {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Component {
                fn from(c: $ty) -> Self {
                    Component::$variant(c)
                }
            }
        )*
    };
}

impl_from_component!(
    Trail(PointerTracker),
    Tilt(TiltCard),
    Orbit(OrbitalLayout),
    Timeline(ScrollProgress),
    Carousel(Carousel),
    Nav(NavVisibility),
    Wheel(WheelSmoother),
    Reveal(RevealGroup),
);

/// Shared handle to a mounted component
pub type SharedComponent = Arc<Mutex<Component>>;

fn lock(component: &SharedComponent) -> MutexGuard<'_, Component> {
    // A panicking handler leaves plain data behind; keep using it
    component.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Hosts mounted components
pub struct Stage {
    widgets: SlotMap<WidgetId, SharedComponent>,
    dispatcher: EventDispatcher,
}

impl Stage {
    pub fn new() -> Self {
        Self {
            widgets: SlotMap::with_key(),
            dispatcher: EventDispatcher::new(),
        }
    }

    /// Mount a component and register its listeners
    pub fn mount(&mut self, component: impl Into<Component>) -> WidgetId {
        let component = component.into();
        let kind = component.kind();
        let types = component.event_types();
        let shared: SharedComponent = Arc::new(Mutex::new(component));
        let id = self.widgets.insert(Arc::clone(&shared));

        for &event_type in types {
            let handle = Arc::clone(&shared);
            self.dispatcher.register(id, event_type, move |event| {
                lock(&handle).on_event(event);
            });
        }

        tracing::debug!(kind, listeners = types.len(), "component mounted");
        id
    }

    /// Remove a component, its listeners and its timers. Returns false if
    /// it was not mounted.
    pub fn unmount(&mut self, id: WidgetId) -> bool {
        let Some(component) = self.widgets.remove(id) else {
            return false;
        };
        let removed = self.dispatcher.teardown(id);
        tracing::debug!(kind = lock(&component).kind(), removed, "component unmounted");
        true
    }

    pub fn is_mounted(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.dispatcher.listener_count()
    }

    /// Shared handle to a mounted component
    pub fn component(&self, id: WidgetId) -> Option<SharedComponent> {
        self.widgets.get(id).cloned()
    }

    /// Run `f` against a mounted component
    pub fn with_component<R>(
        &self,
        id: WidgetId,
        f: impl FnOnce(&mut Component) -> R,
    ) -> Option<R> {
        let component = self.widgets.get(id)?;
        let mut guard = lock(component);
        Some(f(&mut guard))
    }

    /// Route an event to its target's listeners; returns how many ran.
    /// Events for unmounted widgets are dropped.
    pub fn dispatch(&self, mut event: Event) -> usize {
        if !self.widgets.contains_key(event.target) {
            tracing::trace!(event_type = event.event_type, "event for unmounted widget dropped");
            return 0;
        }
        self.dispatcher.dispatch(&mut event)
    }

    /// Advance every mounted component by `dt` seconds; returns how many
    /// are still animating
    pub fn frame(&mut self, dt: f32) -> usize {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };

        let mut animating = 0;
        for (_, component) in self.widgets.iter() {
            let mut component = lock(component);
            component.tick(dt);
            if component.is_animating() {
                animating += 1;
            }
        }
        animating
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::OrbitConfig;
    use crate::trail::TrailConfig;
    use folio_core::content::TimelineItem;
    use folio_core::events::EventData;

    #[test]
    fn test_mount_registers_listeners() {
        let mut stage = Stage::new();
        let trail = stage.mount(PointerTracker::new(&TrailConfig::default()));
        assert!(stage.is_mounted(trail));
        assert_eq!(stage.listener_count(), 2);
    }

    #[test]
    fn test_dispatch_reaches_component() {
        let mut stage = Stage::new();
        let trail = stage.mount(PointerTracker::new(&TrailConfig::default()));

        let handled = stage.dispatch(Event::new(
            event_types::POINTER_MOVE,
            trail,
            EventData::Pointer { x: 40.0, y: 50.0 },
        ));
        assert_eq!(handled, 1);

        let target = stage.with_component(trail, |c| match c {
            Component::Trail(t) => Some(t.nodes()[0].target_x),
            _ => None,
        });
        assert_eq!(target, Some(Some(40.0)));
    }

    #[test]
    fn test_frame_ticks_components() {
        let mut stage = Stage::new();
        let orbit = stage.mount(OrbitalLayout::new(
            OrbitConfig::default(),
            vec![TimelineItem::new(1, "A"), TimelineItem::new(2, "B")],
        ));

        for _ in 0..10 {
            assert_eq!(stage.frame(0.05), 1);
        }
        let rotation = stage.with_component(orbit, |c| match c {
            Component::Orbit(o) => o.state().rotation,
            _ => 0.0,
        });
        assert!((rotation.unwrap_or(0.0) - 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_unmount_twice() {
        let mut stage = Stage::new();
        let id = stage.mount(PointerTracker::new(&TrailConfig::default()));
        assert!(stage.unmount(id));
        assert!(!stage.unmount(id));
        assert!(stage.is_empty());
    }
}
