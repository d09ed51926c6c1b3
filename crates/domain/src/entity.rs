//! Host entities — device categories and the monitored-entity wrapper.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::EntityId;

mod state;

pub use state::EntityState;

/// Device category, derived from an entity id's domain prefix.
///
/// Derived exactly once when an entity enters the watch list, so decision
/// points dispatch on the tag rather than re-parsing id strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Light,
    Switch,
    Cover,
    Group,
    /// Any other domain prefix, kept verbatim for logging.
    Other(String),
}

impl Category {
    /// Categorize a domain prefix (`light`, `switch`, ...).
    #[must_use]
    pub fn from_domain(domain: &str) -> Self {
        match domain {
            "light" => Self::Light,
            "switch" => Self::Switch,
            "cover" => Self::Cover,
            "group" => Self::Group,
            other => Self::Other(other.to_string()),
        }
    }

    /// Categorize the domain prefix of an entity id.
    #[must_use]
    pub fn of(id: &EntityId) -> Self {
        Self::from_domain(id.domain())
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Switch => f.write_str("switch"),
            Self::Cover => f.write_str("cover"),
            Self::Group => f.write_str("group"),
            Self::Other(domain) => f.write_str(domain),
        }
    }
}

/// Which leaf categories a group flattening keeps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Keep every non-group leaf.
    #[default]
    All,
    /// Keep only leaves in the given set; groups are still traversed.
    Only(HashSet<Category>),
}

impl CategoryFilter {
    /// Build a filter from an explicit category list.
    #[must_use]
    pub fn only<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = Category>,
    {
        Self::Only(categories.into_iter().collect())
    }

    /// Whether a leaf of the given category passes the filter.
    #[must_use]
    pub fn accepts(&self, category: &Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(set) => set.contains(category),
        }
    }
}

/// An entity on the engine's watch list, with its category resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredEntity {
    id: EntityId,
    category: Category,
}

impl MonitoredEntity {
    /// Wrap an entity id, deriving its category from the domain prefix.
    #[must_use]
    pub fn new(id: EntityId) -> Self {
        let category = Category::of(&id);
        Self { id, category }
    }

    #[must_use]
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Whether the given state counts as *active* for this entity.
    ///
    /// Covers are active while open; everything else is active while on.
    #[must_use]
    pub fn is_active(&self, state: EntityState) -> bool {
        match self.category {
            Category::Cover => state == EntityState::Open,
            _ => state == EntityState::On,
        }
    }

    /// Whether the `old` to `new` transition is this entity's activation
    /// edge: `off` to `on`, or `closed` to `open` for covers. Nothing else
    /// counts, including transitions out of `unavailable`.
    #[must_use]
    pub fn is_activation(&self, old: EntityState, new: EntityState) -> bool {
        match self.category {
            Category::Cover => old == EntityState::Closed && new == EntityState::Open,
            _ => old == EntityState::Off && new == EntityState::On,
        }
    }
}
