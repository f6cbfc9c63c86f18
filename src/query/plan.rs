//! # Query Plan
//!
//! The compiled, store-agnostic form of one request. Built per request
//! and dropped once the store call returns.

use std::collections::BTreeMap;

use serde::Serialize;

use super::order::OrderToken;
use super::range::RangePredicate;

/// Field → include flag. Keys are always drawn from a whitelist.
pub type Projection = BTreeMap<String, bool>;

/// Relation → include flag. Keys are always drawn from a whitelist.
pub type Relations = BTreeMap<String, bool>;

/// Compiled query handed to the store
///
/// Every field left unset means "store default": no projection returns
/// all scalar fields, no order means insertion order, and so on.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<Projection>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relations: Option<Relations>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<OrderToken>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<RangePredicate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_range: Option<RangePredicate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,

    /// Restrict to featured records
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub featured_only: bool,
}

impl QueryPlan {
    /// True when the plan returns the whole collection in store order
    pub fn is_unfiltered(&self) -> bool {
        *self == Self::default()
    }

    /// Same plan restricted to featured records
    pub fn featured(mut self) -> Self {
        self.featured_only = true;
        self
    }

    /// Whether `relation` was requested
    pub fn includes(&self, relation: &str) -> bool {
        self.relations
            .as_ref()
            .and_then(|relations| relations.get(relation))
            .copied()
            .unwrap_or(false)
    }

    /// Case-insensitive substring match of the search term against any of
    /// `haystacks`. Always true when the plan has no search term.
    pub fn search_matches<'a, I>(&self, haystacks: I) -> bool
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let Some(term) = &self.search_term else {
            return true;
        };
        let needle = term.to_lowercase();

        haystacks
            .into_iter()
            .flatten()
            .any(|text| text.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_is_unfiltered() {
        let plan = QueryPlan::default();
        assert!(plan.is_unfiltered());
        assert_eq!(serde_json::to_value(&plan).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_featured_is_not_unfiltered() {
        assert!(!QueryPlan::default().featured().is_unfiltered());
    }

    #[test]
    fn test_includes() {
        let plan = QueryPlan {
            relations: Some(Relations::from([("tags".to_string(), true)])),
            ..Default::default()
        };
        assert!(plan.includes("tags"));
        assert!(!plan.includes("category"));
    }

    #[test]
    fn test_search_matches_any_field() {
        let plan = QueryPlan {
            search_term: Some("RED".to_string()),
            ..Default::default()
        };
        assert!(plan.search_matches([Some("Blue Flats"), None, Some("a red sole")]));
        assert!(!plan.search_matches([Some("Blue Flats"), Some("navy")]));
        assert!(QueryPlan::default().search_matches([None]));
    }
}
