//! Group/Scope Resolver
//!
//! Resolves product groups to the set of line ids and categories they
//! cover. Static groups return their explicit membership; dynamic groups
//! evaluate their predicate against the catalog. An unknown group id
//! resolves to an empty set so the dependent campaign or rule simply does
//! not fire.

use std::collections::{BTreeSet, HashMap};

use shared::models::{
    CartLine, CartSnapshot, CatalogProduct, GroupMembership, GroupPredicate, ProductGroup,
};

/// Products a dynamic group predicate is evaluated against
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<CatalogProduct>,
}

impl Catalog {
    pub fn new(products: Vec<CatalogProduct>) -> Self {
        Self { products }
    }

    /// Catalog made of the products present in the cart
    pub fn from_cart(cart: &CartSnapshot) -> Self {
        Self {
            products: cart.lines().iter().map(CatalogProduct::from).collect(),
        }
    }

    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }
}

/// Resolve a single group to its members (line ids and/or categories)
pub fn resolve(group: &ProductGroup, catalog: &Catalog) -> BTreeSet<String> {
    match &group.membership {
        GroupMembership::Static { members } => members.iter().cloned().collect(),
        GroupMembership::Dynamic { predicate } => catalog
            .products()
            .iter()
            .filter(|product| matches_predicate(predicate, product))
            .map(|product| product.id.clone())
            .collect(),
    }
}

/// Every populated criterion must hold. An empty predicate matches nothing.
fn matches_predicate(predicate: &GroupPredicate, product: &CatalogProduct) -> bool {
    if predicate.is_empty() {
        return false;
    }
    if !predicate.categories.is_empty() && !predicate.categories.contains(&product.category) {
        return false;
    }
    if !predicate.tags.is_empty() && !product.tags.iter().any(|t| predicate.tags.contains(t)) {
        return false;
    }
    if predicate.min_price.is_some_and(|min| product.price < min) {
        return false;
    }
    if predicate.max_price.is_some_and(|max| product.price > max) {
        return false;
    }
    if let Some(needle) = &predicate.name_contains
        && !product
            .name
            .to_lowercase()
            .contains(&needle.to_lowercase())
    {
        return false;
    }
    true
}

/// Resolved membership of every configured group, keyed by group id
#[derive(Debug, Clone, Default)]
pub struct GroupMembers {
    members: HashMap<String, BTreeSet<String>>,
}

impl GroupMembers {
    /// Resolve all groups against the catalog
    pub fn build(groups: &[ProductGroup], catalog: &Catalog) -> Self {
        let mut members = HashMap::with_capacity(groups.len());
        for group in groups {
            // First definition of an id wins
            members
                .entry(group.id.clone())
                .or_insert_with(|| resolve(group, catalog));
        }
        Self { members }
    }

    /// Members of a group; unknown ids resolve to `None`
    pub fn get(&self, group_id: &str) -> Option<&BTreeSet<String>> {
        self.members.get(group_id)
    }

    /// Whether the line belongs to the group, by line id or category
    pub fn contains(&self, group_id: &str, line: &CartLine) -> bool {
        match self.get(group_id) {
            Some(members) => members.contains(&line.id) || members.contains(&line.category),
            None => {
                tracing::debug!(group_id, "Unknown product group, resolving to empty");
                false
            }
        }
    }

    /// Whether the line belongs to any of the given groups
    pub fn contains_any(&self, group_ids: &[String], line: &CartLine) -> bool {
        group_ids.iter().any(|id| self.contains(id, line))
    }
}
