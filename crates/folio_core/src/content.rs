//! Portfolio content model
//!
//! Static content handed to the motion components: orbit items (skills),
//! the experience timeline, and the project gallery. Content is read-only
//! during a session; per-item view state (expanded, pulsing) lives in the
//! components, keyed by [`ItemId`].

use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ContentError;

/// Identifier of an orbit item
pub type ItemId = u32;

/// Progress status shown on an orbit item's detail card
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    #[serde(alias = "completo")]
    Complete,
    #[serde(alias = "em-progresso")]
    InProgress,
    #[default]
    #[serde(alias = "pendente")]
    Pending,
}

impl ItemStatus {
    /// Badge text for the detail card
    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Complete => "COMPLETE",
            ItemStatus::InProgress => "IN PROGRESS",
            ItemStatus::Pending => "PENDING",
        }
    }
}

/// One item placed on the orbital layout
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: ItemId,
    pub title: String,
    #[serde(alias = "date", default)]
    pub date_label: String,
    #[serde(alias = "content", default)]
    pub body: String,
    #[serde(default)]
    pub category: String,
    /// Icon name resolved by the host
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub related_ids: Vec<ItemId>,
    #[serde(default)]
    pub status: ItemStatus,
    /// Experience level, clamped to 0..=100
    #[serde(deserialize_with = "deserialize_energy", default)]
    pub energy: u8,
}

fn deserialize_energy<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, 100) as u8)
}

impl TimelineItem {
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            date_label: String::new(),
            body: String::new(),
            category: String::new(),
            icon: String::new(),
            related_ids: Vec::new(),
            status: ItemStatus::default(),
            energy: 0,
        }
    }

    pub fn with_related(mut self, ids: impl IntoIterator<Item = ItemId>) -> Self {
        self.related_ids = ids.into_iter().collect();
        self
    }

    pub fn with_energy(mut self, energy: i64) -> Self {
        self.energy = energy.clamp(0, 100) as u8;
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    /// Width of the experience bar as a fraction (0.0 to 1.0)
    pub fn energy_fraction(&self) -> f32 {
        self.energy.min(100) as f32 / 100.0
    }

    /// Drop self references and repeated ids, keeping declaration order
    fn normalize_related(&mut self) {
        let own = self.id;
        let mut seen = FxHashSet::default();
        let before = self.related_ids.len();
        self.related_ids.retain(|id| *id != own && seen.insert(*id));
        if self.related_ids.len() != before {
            tracing::warn!(item = own, "dropped self or repeated related ids");
        }
    }
}

/// One entry of the scroll-synced experience timeline
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub content: String,
}

/// Experience timeline with optional header text
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineSection {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub entries: Vec<TimelineEntry>,
}

/// A project card in the auto-scrolling gallery
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalleryCard {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "image", default)]
    pub image_ref: String,
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(alias = "href", default)]
    pub link: Option<String>,
    #[serde(default)]
    pub highlight_label: Option<String>,
}

impl GalleryCard {
    /// Links with a scheme or protocol-relative prefix open in a new tab
    pub fn is_external_link(&self) -> bool {
        self.link.as_deref().is_some_and(|href| {
            href.starts_with("http://") || href.starts_with("https://") || href.starts_with("//")
        })
    }
}

/// Project gallery with optional header text
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GallerySection {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<GalleryCard>,
}

/// All content the page animates
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default)]
    pub skills: Vec<TimelineItem>,
    #[serde(default)]
    pub experience: TimelineSection,
    #[serde(default)]
    pub projects: GallerySection,
}

impl Portfolio {
    /// Check ids and titles, and normalize related-id lists
    pub fn validated(mut self) -> Result<Self, ContentError> {
        let mut ids = FxHashSet::default();
        for (index, item) in self.skills.iter_mut().enumerate() {
            if !ids.insert(item.id) {
                return Err(ContentError::DuplicateId(item.id));
            }
            if item.title.trim().is_empty() {
                return Err(ContentError::EmptyTitle {
                    section: "skills",
                    index,
                });
            }
            item.normalize_related();
        }

        for (index, entry) in self.experience.entries.iter().enumerate() {
            if entry.title.trim().is_empty() {
                return Err(ContentError::EmptyTitle {
                    section: "experience",
                    index,
                });
            }
        }

        let mut card_ids = FxHashSet::default();
        for (index, card) in self.projects.items.iter().enumerate() {
            if !card_ids.insert(card.id.as_str()) {
                return Err(ContentError::DuplicateCardId(card.id.clone()));
            }
            if card.title.trim().is_empty() {
                return Err(ContentError::EmptyTitle {
                    section: "projects",
                    index,
                });
            }
        }

        Ok(self)
    }

    /// Related ids that point at no existing item, as `(from, to)` pairs
    pub fn unresolved_related(&self) -> Vec<(ItemId, ItemId)> {
        let ids: FxHashSet<ItemId> = self.skills.iter().map(|i| i.id).collect();
        self.skills
            .iter()
            .flat_map(|item| {
                item.related_ids
                    .iter()
                    .filter(|id| !ids.contains(id))
                    .map(move |id| (item.id, *id))
            })
            .collect()
    }
}
