//! Items and scenery objects found in rooms.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::ObjectId;

/// Broad category of a room object, used for display grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Keys and other unlocking devices.
    Key,
    /// Hand tools.
    Tool,
    /// Papers, pages, maps, and journals.
    Document,
    /// Vials, potions, and reagents.
    Chemical,
    /// Arcane or magical objects.
    Mystical,
    /// Boxes, drawers, and other containers.
    Container,
    /// Fixed scenery that cannot be picked up.
    Scenery,
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Key => "key",
            Self::Tool => "tool",
            Self::Document => "document",
            Self::Chemical => "chemical",
            Self::Mystical => "mystical",
            Self::Container => "container",
            Self::Scenery => "scenery",
        };
        write!(f, "{name}")
    }
}

/// An object placed in a room: either a collectible item or scenery.
///
/// Item definitions are reference data owned by room content. The only
/// field mutated at runtime is `is_collected`, via the room store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier referenced by combination rules and puzzles.
    pub id: ObjectId,
    /// Display name.
    pub name: String,
    /// Text shown when the object is examined.
    #[serde(default)]
    pub description: String,
    /// Display category.
    pub category: ItemCategory,
    /// Whether the object can be added to the inventory.
    #[serde(default)]
    pub is_collectible: bool,
    /// Whether the object has been collected in the current playthrough.
    #[serde(default)]
    pub is_collected: bool,
    /// Items this object is advertised to combine with (UI affordance;
    /// the combination table is authoritative).
    #[serde(default)]
    pub combines_with: Vec<ObjectId>,
    /// Clue text revealed when this object takes part in a combination.
    #[serde(default)]
    pub reveals_clue: Option<String>,
}

impl Item {
    /// Create a new object with empty description and no affordances.
    pub fn new(id: impl Into<ObjectId>, name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category,
            is_collectible: false,
            is_collected: false,
            combines_with: Vec::new(),
            reveals_clue: None,
        }
    }

    /// Set the examination description.
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Mark the object as collectible.
    pub fn collectible(mut self) -> Self {
        self.is_collectible = true;
        self
    }

    /// Advertise combination partners.
    pub fn combines_with<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ObjectId>,
    {
        self.combines_with = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Set the clue text revealed on combination.
    pub fn reveals_clue(mut self, text: impl Into<String>) -> Self {
        self.reveals_clue = Some(text.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let item = Item::new("ancient-key", "Ancient Key", ItemCategory::Key)
            .with_description("A tarnished bronze key.")
            .collectible()
            .combines_with(["mysterious-box"])
            .reveals_clue("The key bears a chamber sigil.");

        assert_eq!(item.id.as_str(), "ancient-key");
        assert!(item.is_collectible);
        assert!(!item.is_collected);
        assert_eq!(item.combines_with, vec![ObjectId::new("mysterious-box")]);
        assert!(item.reveals_clue.is_some());
    }

    #[test]
    fn serde_defaults_optional_fields() {
        let json = r#"{"id":"bookshelf","name":"Bookshelf","category":"scenery"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert!(!item.is_collectible);
        assert!(item.combines_with.is_empty());
        assert!(item.reveals_clue.is_none());
    }
}
