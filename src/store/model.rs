//! # Catalog Records
//!
//! Records are serialized with camelCase keys; those keys are the field
//! names the query compiler whitelists.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

impl Tag {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,

    #[serde(default)]
    pub discount_percent: f64,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub detail: Option<String>,

    #[serde(default)]
    pub image1: String,

    #[serde(default)]
    pub image2: String,

    #[serde(default)]
    pub stock: Option<i64>,

    #[serde(default)]
    pub category_id: Option<i64>,

    #[serde(default)]
    pub featured: bool,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Tag links; exposed only through the `tags` relation
    #[serde(default, skip_serializing)]
    pub tag_ids: Vec<i64>,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            discount_percent: 0.0,
            description: String::new(),
            detail: None,
            image1: String::new(),
            image2: String::new(),
            stock: None,
            category_id: None,
            featured: false,
            created_at: Utc::now(),
            updated_at: None,
            tag_ids: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_tags(mut self, tag_ids: Vec<i64>) -> Self {
        self.tag_ids = tag_ids;
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }
}

/// Home-page banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swiper {
    pub id: i64,
    pub title: String,

    #[serde(default)]
    pub file_path: String,
}

impl Swiper {
    pub fn new(id: i64, title: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            file_path: file_path.into(),
        }
    }
}

/// Initial store contents, loaded from a JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(default)]
    pub products: Vec<Product>,

    #[serde(default)]
    pub swipers: Vec<Swiper>,
}

impl CatalogSeed {
    /// Load a seed from a JSON file
    pub fn load(path: &Path) -> StoreResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| StoreError::SeedRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| StoreError::SeedParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product::new(1, "Red Runner", 20.0)
            .with_stock(4)
            .with_category(3)
            .with_tags(vec![1, 2]);
        let value = serde_json::to_value(&product).unwrap();

        assert_eq!(value["discountPercent"], json!(0.0));
        assert_eq!(value["categoryId"], json!(3));
        assert_eq!(value["stock"], json!(4));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("tagIds").is_none());
    }

    #[test]
    fn test_seed_defaults() {
        let seed: CatalogSeed = serde_json::from_value(json!({
            "categories": [{"id": 3, "name": "Shoes"}],
            "products": [{"id": 1, "name": "Red Runner", "price": 20, "tagIds": [7]}]
        }))
        .unwrap();

        assert_eq!(seed.categories, vec![Category::new(3, "Shoes")]);
        assert_eq!(seed.products[0].tag_ids, vec![7]);
        assert_eq!(seed.products[0].stock, None);
        assert!(seed.swipers.is_empty());
    }

    #[test]
    fn test_seed_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"swipers": [{{"id": 1, "title": "sale"}}]}}"#).unwrap();

        let seed = CatalogSeed::load(file.path()).unwrap();
        assert_eq!(seed.swipers, vec![Swiper::new(1, "sale", "")]);
    }

    #[test]
    fn test_seed_load_errors() {
        let missing = CatalogSeed::load(Path::new("/nonexistent/seed.json"));
        assert!(matches!(missing, Err(StoreError::SeedRead { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let invalid = CatalogSeed::load(file.path());
        assert!(matches!(invalid, Err(StoreError::SeedParse { .. })));
    }
}
