use serde::{Deserialize, Serialize};

use crate::store::SliceState;

/// A product as served by the product data service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub product_name: String,
    pub product_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub star_rating: f32,
}

impl Product {
    /// Blank product used when the user starts creating a new one.
    pub fn blank() -> Self {
        Self {
            id: 0,
            product_name: String::new(),
            product_code: "New".to_string(),
            description: String::new(),
            star_rating: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductState {
    pub show_product_code: bool,
    pub current_product_id: Option<u32>,
    pub current_product: Option<Product>,
    pub products: Vec<Product>,
    /// Message of the last failed load; empty when the last load succeeded.
    pub error: String,
}

impl Default for ProductState {
    fn default() -> Self {
        Self {
            show_product_code: true,
            current_product_id: None,
            current_product: None,
            products: Vec::new(),
            error: String::new(),
        }
    }
}

impl SliceState for ProductState {}
