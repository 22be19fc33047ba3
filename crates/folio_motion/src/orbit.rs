//! Radial orbital timeline
//!
//! Items sit evenly spaced on a circle that slowly rotates. Clicking an
//! item expands it, stops the rotation, highlights its related items and
//! turns the circle so the item lands at the top (270°). Clicking it again
//! or clicking the empty background resumes rotation.
//!
//! All selection logic lives in [`OrbitState`], a plain value updated by
//! pure transitions. [`OrbitalLayout`] owns the items, the rotation timer
//! and the visibility observer, and feeds events through those
//! transitions.

use folio_animation::{round3, IntervalTimer};
use folio_core::content::{ItemId, TimelineItem};
use folio_core::events::{event_types, Event, EventData};
use folio_core::geometry::Rect;
use folio_core::related::RelatedGraph;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::visibility::VisibilityObserver;

/// Angle at which a selected item is parked (top of the circle)
pub const FOCUS_ANGLE: f32 = 270.0;

/// Stacking order of an expanded item, above every orbiting item
pub const EXPANDED_Z_INDEX: i32 = 200;

fn default_radius() -> f32 {
    // 440px orbit diameter, pulled in by 30% of a node
    440.0 / 2.0 - default_node_size() * 0.3
}

fn default_rotation_step() -> f32 {
    0.3
}

fn default_tick_interval_ms() -> u32 {
    50
}

fn default_visibility_threshold() -> f32 {
    0.2
}

fn default_node_size() -> f32 {
    56.0
}

fn default_glow_extra() -> f32 {
    28.0
}

fn default_min_height() -> f32 {
    512.0
}

/// Orbit configuration (`[orbit]` in `folio.toml`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitConfig {
    /// Distance from the orbit centre to each node centre, in pixels
    #[serde(default = "default_radius")]
    pub radius: f32,

    /// Degrees added per timer tick while auto-rotating
    #[serde(default = "default_rotation_step")]
    pub rotation_step_deg: f32,

    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u32,

    /// Visible fraction needed for the orbit to keep rotating
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f32,

    #[serde(default = "default_node_size")]
    pub node_size: f32,

    #[serde(default = "default_glow_extra")]
    pub glow_extra: f32,

    /// Minimum height of the orbit container, in pixels
    #[serde(default = "default_min_height")]
    pub min_height: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            rotation_step_deg: default_rotation_step(),
            tick_interval_ms: default_tick_interval_ms(),
            visibility_threshold: default_visibility_threshold(),
            node_size: default_node_size(),
            glow_extra: default_glow_extra(),
            min_height: default_min_height(),
        }
    }
}

/// Angle in degrees of item `index` out of `total`, for a given rotation.
/// Always in `[0, 360)`.
pub fn orbit_angle(index: usize, total: usize, rotation: f32) -> f32 {
    let total = total.max(1) as f32;
    let angle = (index as f32 / total * 360.0 + rotation).rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if angle >= 360.0 {
        0.0
    } else {
        angle
    }
}

/// Rotation that parks item `index` at [`FOCUS_ANGLE`]
pub fn focus_rotation(index: usize, total: usize) -> f32 {
    let total = total.max(1) as f32;
    (FOCUS_ANGLE - index as f32 / total * 360.0).rem_euclid(360.0)
}

/// Where one item sits on the circle this frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OrbitPosition {
    /// Offset from the orbit centre, rounded to 3 decimals
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    /// Near side of the circle stacks above the far side
    pub z_index: i32,
}

impl OrbitPosition {
    pub fn compute(index: usize, total: usize, rotation: f32, radius: f32) -> Self {
        let angle = orbit_angle(index, total, rotation);
        let radians = angle.to_radians();
        Self {
            x: round3(radius * radians.cos()),
            y: round3(radius * radians.sin()),
            angle,
            z_index: (100.0 + 50.0 * radians.cos()).round() as i32,
        }
    }
}

/// Selection and rotation state of the orbit
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitState {
    /// Global rotation in degrees, `[0, 360)`
    pub rotation: f32,
    pub auto_rotating: bool,
    /// The single expanded item, if any
    pub expanded: Option<ItemId>,
    /// Related items of the expanded one
    pub pulsing: FxHashSet<ItemId>,
    pub in_view: bool,
}

impl Default for OrbitState {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            auto_rotating: true,
            expanded: None,
            pulsing: FxHashSet::default(),
            in_view: true,
        }
    }
}

impl OrbitState {
    pub fn is_expanded(&self, id: ItemId) -> bool {
        self.expanded == Some(id)
    }

    /// Whether the rotation timer should be running
    pub fn should_rotate(&self) -> bool {
        self.auto_rotating && self.in_view
    }

    /// Click on an item: collapse it if it is the expanded one, otherwise
    /// expand it (collapsing any other) and park it at the top.
    ///
    /// Ids not present in `items` leave the state unchanged.
    pub fn toggled(&self, items: &[TimelineItem], graph: &RelatedGraph, id: ItemId) -> Self {
        let Some(index) = items.iter().position(|item| item.id == id) else {
            return self.clone();
        };

        if self.is_expanded(id) {
            return Self {
                expanded: None,
                pulsing: FxHashSet::default(),
                auto_rotating: true,
                ..self.clone()
            };
        }

        Self {
            rotation: focus_rotation(index, items.len()),
            auto_rotating: false,
            expanded: Some(id),
            pulsing: graph.related(id).iter().copied().collect(),
            in_view: self.in_view,
        }
    }

    /// Background click: collapse everything and resume rotation.
    /// The current angle and visibility are kept.
    pub fn reset(&self) -> Self {
        Self {
            rotation: self.rotation,
            in_view: self.in_view,
            ..Self::default()
        }
    }

    /// Apply `ticks` rotation steps of `step` degrees
    pub fn rotated(&self, ticks: u32, step: f32) -> Self {
        let advance = (f64::from(step) * f64::from(ticks)).rem_euclid(360.0) as f32;
        let rotation = round3((self.rotation + advance).rem_euclid(360.0));
        let rotation = if rotation >= 360.0 { 0.0 } else { rotation };
        Self {
            rotation,
            ..self.clone()
        }
    }

    pub fn with_in_view(&self, in_view: bool) -> Self {
        Self {
            in_view,
            ..self.clone()
        }
    }
}

/// Everything needed to render one orbit node
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeView {
    pub id: ItemId,
    pub position: OrbitPosition,
    /// Effective stacking order; the expanded node always wins
    pub z_index: i32,
    /// Diameter of the energy glow behind the node
    pub glow_size: f32,
    pub expanded: bool,
    /// Listed by the expanded item
    pub related: bool,
    pub pulsing: bool,
}

/// The orbit component
#[derive(Clone, Debug)]
pub struct OrbitalLayout {
    config: OrbitConfig,
    items: Vec<TimelineItem>,
    index: FxHashMap<ItemId, usize>,
    graph: RelatedGraph,
    state: OrbitState,
    timer: IntervalTimer,
    visibility: VisibilityObserver,
}

impl OrbitalLayout {
    pub fn new(config: OrbitConfig, items: Vec<TimelineItem>) -> Self {
        let mut index = FxHashMap::default();
        for (i, item) in items.iter().enumerate() {
            if index.contains_key(&item.id) {
                tracing::warn!(id = item.id, "duplicate orbit item id; first entry wins");
                continue;
            }
            index.insert(item.id, i);
        }

        let graph = RelatedGraph::from_items(&items);
        let timer = IntervalTimer::from_millis(config.tick_interval_ms);
        let visibility = VisibilityObserver::new(config.visibility_threshold, true);

        tracing::debug!(items = items.len(), edges = graph.edge_count(), "orbit created");

        Self {
            config,
            items,
            index,
            graph,
            state: OrbitState::default(),
            timer,
            visibility,
        }
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&TimelineItem> {
        self.index.get(&id).and_then(|&i| self.items.get(i))
    }

    pub fn state(&self) -> &OrbitState {
        &self.state
    }

    pub fn graph(&self) -> &RelatedGraph {
        &self.graph
    }

    fn apply(&mut self, next: OrbitState) {
        if next.expanded != self.state.expanded {
            tracing::debug!(
                from = ?self.state.expanded,
                to = ?next.expanded,
                "orbit selection changed"
            );
        }
        self.state = next;
        self.sync_timer();
    }

    fn sync_timer(&mut self) {
        let should_run = self.state.should_rotate();
        if should_run && !self.timer.is_running() {
            self.timer.resume();
        } else if !should_run && self.timer.is_running() {
            self.timer.pause();
        }
    }

    /// Click on a node
    pub fn toggle(&mut self, id: ItemId) {
        if !self.index.contains_key(&id) {
            tracing::debug!(id, "click on unknown orbit item ignored");
            return;
        }
        let next = self.state.toggled(&self.items, &self.graph, id);
        self.apply(next);
    }

    /// Click on a related item's link inside the expanded panel
    pub fn select_related(&mut self, id: ItemId) {
        self.toggle(id);
    }

    /// Click on empty orbit background
    pub fn background_click(&mut self) {
        let next = self.state.reset();
        self.apply(next);
    }

    pub fn set_in_view(&mut self, in_view: bool) {
        if in_view != self.state.in_view {
            let next = self.state.with_in_view(in_view);
            self.apply(next);
        }
    }

    /// Feed a visible ratio from the host's intersection measurement
    pub fn observe_ratio(&mut self, ratio: f32) {
        if let Some(in_view) = self.visibility.observe_ratio(ratio) {
            self.set_in_view(in_view);
        }
    }

    /// Measure the container against the viewport; unmeasured rects are skipped
    pub fn observe(&mut self, container: &Rect, viewport: &Rect) {
        if let Some(in_view) = self.visibility.observe(container, viewport) {
            self.set_in_view(in_view);
        }
    }

    /// Handle node, related and background clicks plus visibility
    pub fn on_event(&mut self, event: &Event) -> bool {
        match (event.event_type, &event.data) {
            (event_types::NODE_CLICK, EventData::Item { id, .. }) => {
                self.toggle(*id);
                true
            }
            (event_types::RELATED_CLICK, EventData::Item { id, .. }) => {
                self.select_related(*id);
                true
            }
            (event_types::BACKGROUND_CLICK, _) => {
                self.background_click();
                true
            }
            (event_types::VISIBILITY, EventData::Visibility { ratio }) => {
                self.observe_ratio(*ratio);
                true
            }
            _ => false,
        }
    }

    /// Advance the rotation timer by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if !self.state.should_rotate() {
            return;
        }
        let fires = self.timer.tick(dt);
        if fires > 0 {
            self.state = self.state.rotated(fires, self.config.rotation_step_deg);
            tracing::trace!(rotation = self.state.rotation, fires, "orbit rotated");
        }
    }

    pub fn is_animating(&self) -> bool {
        self.state.should_rotate()
    }

    /// Positions of all items, in item order
    pub fn positions(&self) -> Vec<OrbitPosition> {
        let total = self.items.len();
        (0..total)
            .map(|i| OrbitPosition::compute(i, total, self.state.rotation, self.config.radius))
            .collect()
    }

    pub fn node_view(&self, id: ItemId) -> Option<NodeView> {
        let &i = self.index.get(&id)?;
        let item = self.items.get(i)?;
        let position =
            OrbitPosition::compute(i, self.items.len(), self.state.rotation, self.config.radius);
        let expanded = self.state.is_expanded(id);
        let related = self
            .state
            .expanded
            .is_some_and(|active| self.graph.is_related(active, id));

        Some(NodeView {
            id,
            position,
            z_index: if expanded {
                EXPANDED_Z_INDEX
            } else {
                position.z_index
            },
            glow_size: item.energy as f32 * 0.45 + self.config.node_size + self.config.glow_extra,
            expanded,
            related,
            pulsing: self.state.pulsing.contains(&id),
        })
    }

    /// Render views of every node, in item order
    pub fn node_views(&self) -> Vec<NodeView> {
        self.items
            .iter()
            .filter_map(|item| self.node_view(item.id))
            .collect()
    }

    /// Resolved related items of `id`, for its detail panel
    pub fn related_items(&self, id: ItemId) -> Vec<&TimelineItem> {
        self.graph
            .related(id)
            .iter()
            .filter_map(|&related| self.item(related))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills() -> Vec<TimelineItem> {
        vec![
            TimelineItem::new(1, "Front-end").with_related([2, 3]),
            TimelineItem::new(2, "Back-end").with_related([1, 99]),
            TimelineItem::new(3, "Design").with_related([1]).with_energy(80),
            TimelineItem::new(4, "DevOps"),
        ]
    }

    #[test]
    fn test_initial_state() {
        let orbit = OrbitalLayout::new(OrbitConfig::default(), skills());
        let state = orbit.state();
        assert!(state.auto_rotating);
        assert!(state.in_view);
        assert_eq!(state.expanded, None);
        assert!(state.pulsing.is_empty());
        assert!(orbit.is_animating());
    }

    #[test]
    fn test_default_radius() {
        assert!((OrbitConfig::default().radius - 203.2).abs() < 1e-4);
    }

    #[test]
    fn test_positions_and_depth() {
        let orbit = OrbitalLayout::new(OrbitConfig::default(), skills());
        let positions = orbit.positions();
        assert_eq!(positions.len(), 4);

        // Index 0 at angle 0: rightmost, nearest
        assert_eq!(positions[0].angle, 0.0);
        assert_eq!(positions[0].x, round3(203.2));
        assert_eq!(positions[0].y, 0.0);
        assert_eq!(positions[0].z_index, 150);

        // Index 2 at 180°: far side
        assert_eq!(positions[2].angle, 180.0);
        assert_eq!(positions[2].z_index, 50);
        assert_eq!(positions[1].z_index, 100);
    }

    #[test]
    fn test_toggle_expands_and_recentres() {
        let mut orbit = OrbitalLayout::new(OrbitConfig::default(), skills());
        orbit.toggle(2);

        let state = orbit.state();
        assert_eq!(state.expanded, Some(2));
        assert!(!state.auto_rotating);
        // Unresolved 99 is dropped
        let expected: FxHashSet<ItemId> = [1].into_iter().collect();
        assert_eq!(state.pulsing, expected);
        assert_eq!(state.rotation, 180.0);
        assert_eq!(orbit.positions()[1].angle, 270.0);
        assert!(!orbit.is_animating());
    }

    #[test]
    fn test_toggle_same_item_collapses() {
        let mut orbit = OrbitalLayout::new(OrbitConfig::default(), skills());
        orbit.toggle(3);
        let rotation = orbit.state().rotation;
        orbit.toggle(3);

        let state = orbit.state();
        assert_eq!(state.expanded, None);
        assert!(state.pulsing.is_empty());
        assert!(state.auto_rotating);
        assert_eq!(state.rotation, rotation);

        // The timer resumed from the re-centred angle
        orbit.tick(0.05);
        assert!((orbit.state().rotation - (rotation + 0.3)).abs() < 1e-3);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut orbit = OrbitalLayout::new(OrbitConfig::default(), skills());
        orbit.toggle(1);
        let before = orbit.state().clone();
        orbit.toggle(42);
        orbit.select_related(42);
        assert_eq!(orbit.state(), &before);
        assert!(orbit.node_view(42).is_none());
    }

    #[test]
    fn test_auto_rotation_ticks() {
        let mut orbit = OrbitalLayout::new(OrbitConfig::default(), skills());
        // 20 ticks of 50ms
        for _ in 0..20 {
            orbit.tick(0.05);
        }
        assert!((orbit.state().rotation - 6.0).abs() < 0.01);
    }

    #[test]
    fn test_rotation_wraps() {
        let state = OrbitState {
            rotation: 359.9,
            ..OrbitState::default()
        };
        let next = state.rotated(1, 0.3);
        assert!((next.rotation - 0.2).abs() < 1e-3);
    }

    #[test]
    fn test_long_gap_rotates_in_one_step() {
        let state = OrbitState::default();
        let next = state.rotated(u32::MAX, 0.3);
        assert!(next.rotation >= 0.0 && next.rotation < 360.0);
        // 1200 ticks of 0.3° is exactly one turn
        assert!(state.rotated(1200, 0.3).rotation.abs() < 1e-3);

        let mut orbit = OrbitalLayout::new(OrbitConfig::default(), skills());
        orbit.tick(1.0e6);
        let rotation = orbit.state().rotation;
        assert!((0.0..360.0).contains(&rotation));
    }

    #[test]
    fn test_rotation_stops_out_of_view() {
        let mut orbit = OrbitalLayout::new(OrbitConfig::default(), skills());
        orbit.observe_ratio(0.1);
        assert!(!orbit.state().in_view);

        orbit.tick(1.0);
        assert_eq!(orbit.state().rotation, 0.0);

        orbit.observe_ratio(0.5);
        assert!(orbit.is_animating());
        orbit.tick(0.05);
        assert!((orbit.state().rotation - 0.3).abs() < 1e-3);
    }

    #[test]
    fn test_node_view_flags() {
        let mut orbit = OrbitalLayout::new(OrbitConfig::default(), skills());
        orbit.toggle(1);

        let active = orbit.node_view(1).unwrap();
        assert!(active.expanded);
        assert_eq!(active.z_index, EXPANDED_Z_INDEX);

        let design = orbit.node_view(3).unwrap();
        assert!(design.related);
        assert!(design.pulsing);
        assert_eq!(design.glow_size, 80.0 * 0.45 + 56.0 + 28.0);

        let devops = orbit.node_view(4).unwrap();
        assert!(!devops.related && !devops.pulsing && !devops.expanded);
    }

    #[test]
    fn test_related_items_resolve() {
        let orbit = OrbitalLayout::new(OrbitConfig::default(), skills());
        let titles: Vec<&str> = orbit
            .related_items(2)
            .iter()
            .map(|item| item.title.as_str())
            .collect();
        assert_eq!(titles, ["Front-end"]);
    }

    #[test]
    fn test_config_from_toml() {
        let config: OrbitConfig = toml::from_str("rotation_step_deg = 0.5").unwrap();
        assert_eq!(config.rotation_step_deg, 0.5);
        assert_eq!(config.tick_interval_ms, 50);
        assert_eq!(config.visibility_threshold, 0.2);
    }
}
