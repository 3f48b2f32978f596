//! The category catalog: ordered `{key, name, color}` entries.

use serde::{Deserialize, Serialize};

/// One catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryDef {
    /// Key stored on transactions
    pub key: String,
    /// Display name
    pub name: String,
    /// Display color (`#RRGGBB`)
    pub color: String,
}

impl CategoryDef {
    pub fn new(key: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Ordered, read-only list of known categories.
///
/// Order matters: aggregation output follows catalog order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CategoryCatalog {
    entries: Vec<CategoryDef>,
}

impl CategoryCatalog {
    pub fn new(entries: Vec<CategoryDef>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryDef> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&CategoryDef> {
        self.entries.iter().find(|c| c.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl Default for CategoryCatalog {
    /// The catalog the mobile app ships with.
    fn default() -> Self {
        Self::new(vec![
            CategoryDef::new("purchases", "Compras", "#5636D3"),
            CategoryDef::new("food", "Alimentação", "#FF872C"),
            CategoryDef::new("salary", "Salário", "#12A454"),
            CategoryDef::new("car", "Carro", "#E83F5B"),
            CategoryDef::new("leisure", "Lazer", "#26195C"),
            CategoryDef::new("studies", "Estudos", "#9C001A"),
        ])
    }
}

impl FromIterator<CategoryDef> for CategoryCatalog {
    fn from_iter<I: IntoIterator<Item = CategoryDef>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
