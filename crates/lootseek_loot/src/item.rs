//! # Items
//!
//! Compact item ids and the registry that names them.
//!
//! Names are stored without their `minecraft:` namespace. Lookups accept
//! either form.

use std::collections::HashMap;

/// Namespace prefix stripped from item names.
pub const NAMESPACE: &str = "minecraft:";

/// Unique identifier for an item type within one ruleset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

/// A stack of items in a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemStack {
    /// The item type.
    pub item: ItemId,
    /// Number of items in this stack.
    pub count: u32,
}

/// Generated contents of one container, in generation order.
pub type ContainerContents = Vec<ItemStack>;

/// Strips the `minecraft:` namespace, if present.
#[inline]
#[must_use]
pub fn display_name(name: &str) -> &str {
    name.strip_prefix(NAMESPACE).unwrap_or(name)
}

/// Bidirectional map between item names and ids.
///
/// Ids are assigned densely in registration order, so `ItemId(n)` indexes
/// `names[n]` directly.
#[derive(Clone, Debug, Default)]
pub struct ItemRegistry {
    names: Vec<String>,
    ids: HashMap<String, ItemId>,
}

impl ItemRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` and returns its id. Registering a name twice
    /// returns the existing id.
    pub fn register(&mut self, name: &str) -> ItemId {
        let key = display_name(name);
        if let Some(&id) = self.ids.get(key) {
            return id;
        }
        let id = ItemId(self.names.len() as u32);
        self.names.push(key.to_owned());
        self.ids.insert(key.to_owned(), id);
        id
    }

    /// Id for `name`, with or without namespace.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<ItemId> {
        self.ids.get(display_name(name)).copied()
    }

    /// Display name (no namespace) for `id`.
    #[must_use]
    pub fn name(&self, id: ItemId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    /// Number of registered items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
