//! Tilted card
//!
//! Rotates a card in 3D toward the pointer. The raw angle is proportional
//! to the pointer's offset from the card centre, normalized by the half
//! extents, so the corners reach `±amplitude`:
//!
//! ```text
//! rotate_x = -(offset_y / (height / 2)) * amplitude
//! rotate_y =  (offset_x / (width / 2))  * amplitude
//! ```
//!
//! Raw angles and the hover scale are spring targets; the rendered values
//! lag and smooth the pointer. Leaving the card springs everything back
//! to identity.

use folio_animation::{Spring, SpringConfig};
use folio_core::events::{event_types, Event};
use folio_core::fsm::{HoverState, Machine};
use folio_core::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Tilt card configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Maximum tilt in degrees, reached at the card edges
    pub rotate_amplitude: f32,
    /// Scale while hovered
    pub scale_on_hover: f32,
    pub spring: SpringConfig,
    /// Depth of the overlay layer above the image, in pixels
    pub overlay_depth: f32,
    /// CSS perspective of the card's container, in pixels
    pub perspective: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            rotate_amplitude: 14.0,
            scale_on_hover: 1.1,
            spring: SpringConfig::new(100.0, 30.0, 2.0),
            overlay_depth: 30.0,
            perspective: 800.0,
        }
    }
}

/// Raw rotation in degrees before smoothing
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TiltAngles {
    pub rotate_x: f32,
    pub rotate_y: f32,
}

/// Raw tilt for a pointer over `surface`.
///
/// Returns `None` while the surface has no width or height.
pub fn tilt_angles(surface: &Rect, pointer: Point, amplitude: f32) -> Option<TiltAngles> {
    if !surface.is_measured() {
        return None;
    }

    let offset = pointer.offset_from(surface.center());
    let rotate_x = -(offset.y / (surface.height / 2.0)) * amplitude;
    let rotate_y = (offset.x / (surface.width / 2.0)) * amplitude;

    Some(TiltAngles {
        // Avoid -0.0 leaking into transforms at the exact centre
        rotate_x: rotate_x + 0.0,
        rotate_y: rotate_y + 0.0,
    })
}

/// Transform to apply to the card this frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TiltTransform {
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub scale: f32,
    pub perspective: f32,
    /// `translateZ` of the overlay, present only when it is displayed
    pub overlay_translate_z: Option<f32>,
}

/// A card that tilts toward the pointer
#[derive(Clone, Debug)]
pub struct TiltCard {
    config: TiltConfig,
    image_source: String,
    overlay: Option<String>,
    display_overlay: bool,
    surface: Rect,
    hover: Machine<HoverState>,
    rotate_x: Spring,
    rotate_y: Spring,
    scale: Spring,
}

impl TiltCard {
    pub fn new(config: TiltConfig, image_source: impl Into<String>) -> Self {
        let spring = config.spring;
        Self {
            config,
            image_source: image_source.into(),
            overlay: None,
            display_overlay: false,
            surface: Rect::default(),
            hover: Machine::new(HoverState::Idle),
            rotate_x: Spring::new(spring, 0.0),
            rotate_y: Spring::new(spring, 0.0),
            scale: Spring::new(spring, 1.0),
        }
    }

    /// Attach overlay content rendered above the image
    pub fn with_overlay(mut self, content: impl Into<String>, display: bool) -> Self {
        self.overlay = Some(content.into());
        self.display_overlay = display;
        self
    }

    pub fn image_source(&self) -> &str {
        &self.image_source
    }

    pub fn overlay(&self) -> Option<&str> {
        self.overlay.as_deref()
    }

    pub fn config(&self) -> &TiltConfig {
        &self.config
    }

    pub fn hover_state(&self) -> HoverState {
        self.hover.current()
    }

    /// Update the card's bounding rect after layout
    pub fn set_surface(&mut self, surface: Rect) {
        self.surface = surface;
    }

    pub fn on_pointer_enter(&mut self) {
        if self.hover.send(event_types::POINTER_ENTER).is_some() {
            self.scale.set_target(self.config.scale_on_hover);
        }
    }

    /// Retarget the tilt; skipped while the surface is unmeasured
    pub fn on_pointer_move(&mut self, pointer: Point) {
        let Some(angles) = tilt_angles(&self.surface, pointer, self.config.rotate_amplitude) else {
            tracing::trace!("tilt skipped: surface not measured");
            return;
        };
        self.rotate_x.set_target(angles.rotate_x);
        self.rotate_y.set_target(angles.rotate_y);
    }

    pub fn on_pointer_leave(&mut self) {
        self.hover.send(event_types::POINTER_LEAVE);
        self.rotate_x.set_target(0.0);
        self.rotate_y.set_target(0.0);
        self.scale.set_target(1.0);
    }

    /// Handle pointer enter/move/leave; returns true if consumed
    pub fn on_event(&mut self, event: &Event) -> bool {
        match event.event_type {
            event_types::POINTER_ENTER => {
                self.on_pointer_enter();
                true
            }
            event_types::POINTER_MOVE => match event.primary_point() {
                Some(point) => {
                    self.on_pointer_move(point);
                    true
                }
                None => false,
            },
            event_types::POINTER_LEAVE => {
                self.on_pointer_leave();
                true
            }
            _ => false,
        }
    }

    /// Advance the springs by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.rotate_x.step(dt);
        self.rotate_y.step(dt);
        self.scale.step(dt);
    }

    pub fn is_animating(&self) -> bool {
        !(self.rotate_x.is_settled() && self.rotate_y.is_settled() && self.scale.is_settled())
    }

    /// Raw (unsmoothed) rotation currently targeted
    pub fn target_angles(&self) -> TiltAngles {
        TiltAngles {
            rotate_x: self.rotate_x.target(),
            rotate_y: self.rotate_y.target(),
        }
    }

    pub fn transform(&self) -> TiltTransform {
        let overlay_visible = self.display_overlay && self.overlay.is_some();
        TiltTransform {
            rotate_x: self.rotate_x.value(),
            rotate_y: self.rotate_y.value(),
            scale: self.scale.value(),
            perspective: self.config.perspective,
            overlay_translate_z: overlay_visible.then_some(self.config.overlay_depth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> TiltCard {
        let mut card = TiltCard::new(TiltConfig::default(), "portrait.png");
        card.set_surface(Rect::new(100.0, 100.0, 300.0, 400.0));
        card
    }

    fn settle(card: &mut TiltCard) {
        for _ in 0..600 {
            card.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn test_centre_is_flat() {
        let surface = Rect::new(0.0, 0.0, 200.0, 100.0);
        let angles = tilt_angles(&surface, surface.center(), 14.0).unwrap();
        assert_eq!(angles, TiltAngles::default());
    }

    #[test]
    fn test_corner_reaches_amplitude() {
        let surface = Rect::new(0.0, 0.0, 200.0, 100.0);
        let angles = tilt_angles(&surface, Point::new(200.0, 100.0), 12.0).unwrap();
        assert_eq!(angles.rotate_x, -12.0);
        assert_eq!(angles.rotate_y, 12.0);
    }

    #[test]
    fn test_unmeasured_surface_is_skipped() {
        let surface = Rect::new(0.0, 0.0, 0.0, 100.0);
        assert_eq!(tilt_angles(&surface, Point::new(5.0, 5.0), 14.0), None);

        let mut card = TiltCard::new(TiltConfig::default(), "x.png");
        card.on_pointer_move(Point::new(5.0, 5.0));
        assert_eq!(card.target_angles(), TiltAngles::default());
    }

    #[test]
    fn test_spring_lags_pointer() {
        let mut card = card();
        card.on_pointer_enter();
        card.on_pointer_move(Point::new(400.0, 500.0));

        assert_eq!(card.target_angles().rotate_y, 14.0);
        card.tick(1.0 / 60.0);
        let t = card.transform();
        assert!(t.rotate_y > 0.0 && t.rotate_y < 14.0);
        assert!(t.rotate_x < 0.0 && t.rotate_x > -14.0);

        settle(&mut card);
        let t = card.transform();
        assert!((t.rotate_y - 14.0).abs() < 1e-2);
        assert!((t.scale - 1.1).abs() < 1e-2);
    }

    #[test]
    fn test_leave_returns_to_identity() {
        let mut card = card();
        card.on_pointer_enter();
        card.on_pointer_move(Point::new(100.0, 100.0));
        settle(&mut card);
        assert_eq!(card.hover_state(), HoverState::Hovered);

        card.on_pointer_leave();
        assert_eq!(card.hover_state(), HoverState::Idle);
        assert!(card.is_animating());
        settle(&mut card);

        let t = card.transform();
        assert!(t.rotate_x.abs() < 1e-2);
        assert!(t.rotate_y.abs() < 1e-2);
        assert!((t.scale - 1.0).abs() < 1e-2);
        assert!(!card.is_animating());
    }

    #[test]
    fn test_overlay_needs_content_and_flag() {
        let plain = card();
        assert_eq!(plain.transform().overlay_translate_z, None);

        let hidden = TiltCard::new(TiltConfig::default(), "a.png").with_overlay("caption", false);
        assert_eq!(hidden.transform().overlay_translate_z, None);

        let shown = TiltCard::new(TiltConfig::default(), "a.png").with_overlay("caption", true);
        assert_eq!(shown.transform().overlay_translate_z, Some(30.0));
        assert_eq!(shown.overlay(), Some("caption"));
    }
}
