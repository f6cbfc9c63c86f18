//! # Entity Profiles
//!
//! Per-entity whitelists the compiler validates against.

use super::plan::Projection;

/// Whitelists and filter capabilities of one queryable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityProfile {
    /// Entity name, used in logs and not-found errors
    pub name: &'static str,

    /// Scalar fields `select` may name
    pub scalar_fields: &'static [&'static str],

    /// Relations `include` may name
    pub relations: &'static [&'static str],

    /// Fields a search term is matched against (OR)
    pub text_fields: &'static [&'static str],

    /// Whether price/stock/category/search are honoured
    pub filterable: bool,
}

/// Relations a product list may include
pub const PRODUCT_RELATIONS: &[&str] = &["tags", "category"];

pub const PRODUCT: EntityProfile = EntityProfile {
    name: "product",
    scalar_fields: &[
        "id",
        "name",
        "price",
        "discountPercent",
        "description",
        "detail",
        "image1",
        "image2",
        "stock",
        "categoryId",
        "featured",
        "createdAt",
        "updatedAt",
    ],
    relations: PRODUCT_RELATIONS,
    text_fields: &["name", "description", "detail"],
    filterable: true,
};

pub const SWIPER: EntityProfile = EntityProfile {
    name: "swiper",
    scalar_fields: &["id", "title", "filePath"],
    relations: &[],
    text_fields: &[],
    filterable: false,
};

impl EntityProfile {
    /// Look up a profile by entity name
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "product" | "products" => Some(PRODUCT),
            "swiper" | "swipers" => Some(SWIPER),
            _ => None,
        }
    }

    /// Projection selecting every scalar field
    pub fn all_scalars(&self) -> Projection {
        self.scalar_fields
            .iter()
            .map(|field| (field.to_string(), true))
            .collect()
    }
}
