//! Folio Core
//!
//! Foundational pieces shared by the folio motion components:
//!
//! - **Geometry**: viewport points and rects, with an explicit "not yet
//!   measured" state
//! - **Events**: event types, payloads, and a dispatcher whose listeners
//!   are torn down with their widget
//! - **State Machines**: flat transition tables for interaction states
//! - **Content**: orbit items, timeline entries, gallery cards, and the
//!   related-items graph
//! - **Contact**: form validation and the submission interface
//!
//! # Example
//!
//! ```rust
//! use folio_core::content::TimelineItem;
//! use folio_core::related::RelatedGraph;
//!
//! let items = vec![
//!     TimelineItem::new(1, "Front-end").with_related([2]),
//!     TimelineItem::new(2, "Design"),
//! ];
//! let graph = RelatedGraph::from_items(&items);
//! assert!(graph.is_related(1, 2));
//! assert!(!graph.is_related(2, 1));
//! ```

pub mod contact;
pub mod content;
pub mod error;
pub mod events;
pub mod fsm;
pub mod geometry;
pub mod related;

pub use contact::{ContactForm, ContactMessage, ContactSink, Delivery, DiscardSink, FormStatus};
pub use content::{
    GalleryCard, GallerySection, ItemId, ItemStatus, Portfolio, TimelineEntry, TimelineItem,
    TimelineSection,
};
pub use error::{ContactError, ContentError};
pub use events::{Event, EventData, EventDispatcher, EventType, ListenerId, WidgetId};
pub use fsm::{HoverState, Machine, StateTransitions};
pub use geometry::{Point, Rect, Size};
pub use related::RelatedGraph;
