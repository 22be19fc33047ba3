//! Folio Motion
//!
//! The animated pieces of the portfolio page, as headless state objects.
//! Each component is fed events and frame deltas and produces plain
//! render values; nothing here touches a DOM or a GPU.
//!
//! - [`PointerTracker`]: blob trail chasing the pointer
//! - [`TiltCard`]: spring-smoothed 3D tilt toward the pointer
//! - [`OrbitalLayout`]: rotating radial timeline with selection
//! - [`ScrollProgress`]: scroll-synced timeline line
//! - [`Carousel`]: auto-scrolling project gallery
//! - [`NavVisibility`], [`WheelSmoother`], [`RevealGroup`]: page chrome
//! - [`Stage`]: mounts components, routes events, ticks frames, and
//!   tears everything down on unmount
//!
//! # Example
//!
//! ```rust
//! use folio_core::content::TimelineItem;
//! use folio_motion::orbit::{OrbitConfig, OrbitalLayout};
//!
//! let items: Vec<TimelineItem> = (1..=6)
//!     .map(|id| TimelineItem::new(id, format!("Skill {id}")))
//!     .collect();
//! let mut orbit = OrbitalLayout::new(OrbitConfig::default(), items);
//!
//! orbit.toggle(3);
//! assert!((orbit.state().rotation - 150.0).abs() < 1e-3);
//! assert!(!orbit.state().auto_rotating);
//! ```

pub mod carousel;
pub mod orbit;
pub mod page;
pub mod reveal;
pub mod scroll_progress;
pub mod stage;
pub mod tilt;
pub mod trail;
pub mod visibility;
pub mod wheel;

pub use carousel::{Carousel, CarouselConfig, CarouselFrame, PlaybackState};
pub use orbit::{NodeView, OrbitConfig, OrbitPosition, OrbitState, OrbitalLayout};
pub use page::{NavVisibility, PageConfig, SectionSpan};
pub use reveal::{RevealFrame, RevealGroup, RevealStyle};
pub use scroll_progress::{ProgressFrame, ScrollProgress, TimelineConfig};
pub use stage::{Component, SharedComponent, Stage};
pub use tilt::{TiltAngles, TiltCard, TiltConfig, TiltTransform};
pub use trail::{PointerTracker, PointerTrailNode, TrailConfig};
pub use visibility::VisibilityObserver;
pub use wheel::WheelSmoother;
