//! Product Group & Catalog Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartLine;

/// Predicate of a dynamic group. Every condition that is set must hold;
/// a predicate with no condition set matches nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupPredicate {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    /// Product must carry at least one of these tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
    /// Case-insensitive substring of the product name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_contains: Option<String>,
}

impl GroupPredicate {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.tags.is_empty()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.name_contains.is_none()
    }
}

/// Group membership, tagged by `kind`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GroupMembership {
    /// Explicit list of line ids and/or category names
    Static { members: Vec<String> },
    /// Evaluated against the current catalog
    Dynamic { predicate: GroupPredicate },
}

/// Product group entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductGroup {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub membership: GroupMembership,
}

impl ProductGroup {
    pub fn fixed(id: impl Into<String>, name: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            membership: GroupMembership::Static { members },
        }
    }

    pub fn dynamic(id: impl Into<String>, name: impl Into<String>, predicate: GroupPredicate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            membership: GroupMembership::Dynamic { predicate },
        }
    }
}

/// Catalog product as seen by the group resolver
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<&CartLine> for CatalogProduct {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.clone(),
            name: line.name.clone(),
            category: line.category.clone(),
            price: line.price,
            tags: line.tags.clone(),
        }
    }
}
