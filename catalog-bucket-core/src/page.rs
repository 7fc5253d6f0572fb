use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FetchError;

/// Store/locale parameters sent with every page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogLocale {
    pub store: String,
    pub country: String,
    pub sort: String,
    pub currency: String,
    pub size_schema: String,
    pub lang: String,
}

impl Default for CatalogLocale {
    fn default() -> Self {
        Self {
            store: "US".to_string(),
            country: "US".to_string(),
            sort: "freshness".to_string(),
            currency: "USD".to_string(),
            size_schema: "US".to_string(),
            lang: "en-US".to_string(),
        }
    }
}

/// Query for one page of a category listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub locale: CatalogLocale,
    pub category_id: u64,
    pub offset: u64,
    pub limit: u64,
}

impl PageQuery {
    pub fn new(locale: &CatalogLocale, category_id: u64, offset: u64, limit: u64) -> Self {
        Self {
            locale: locale.clone(),
            category_id,
            offset,
            limit,
        }
    }

    /// Query string pairs, all values rendered as strings.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("store", self.locale.store.clone()),
            ("offset", self.offset.to_string()),
            ("categoryId", self.category_id.to_string()),
            ("country", self.locale.country.clone()),
            ("sort", self.locale.sort.clone()),
            ("currency", self.locale.currency.clone()),
            ("sizeSchema", self.locale.size_schema.clone()),
            ("limit", self.limit.to_string()),
            ("lang", self.locale.lang.clone()),
        ]
    }
}

#[derive(Deserialize)]
struct PageShape {
    #[serde(rename = "itemCount")]
    item_count: u64,
    products: Vec<Value>,
}

/// One catalog response: the declared total, the items on this page and the untouched body.
#[derive(Debug, Clone)]
pub struct Page {
    pub item_count: u64,
    pub products: Vec<Value>,
    pub body: Value,
}

impl Page {
    pub fn from_json(body: Value) -> Result<Self, FetchError> {
        let shape: PageShape = serde_json::from_value(body.clone())
            .map_err(|e| FetchError::UnexpectedShape(e.to_string()))?;
        Ok(Self {
            item_count: shape.item_count,
            products: shape.products,
            body,
        })
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, FetchError> {
        let body: Value = serde_json::from_slice(bytes)
            .map_err(|e| FetchError::UnexpectedShape(format!("body is not valid JSON: {e}")))?;
        Self::from_json(body)
    }

    /// Two-space indented UTF-8 JSON of the full body, in the API's field order.
    pub fn to_pretty_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(&self.body)
    }
}
