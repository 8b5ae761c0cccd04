use crate::store::{create_feature_selector, create_selector, create_selector2, Selector};

use super::state::{Product, ProductState};
use super::FEATURE;

/// Read-views over the products slice.
///
/// Build one set per consumer and keep it for the consumer's lifetime; the
/// memo slots live inside.
#[derive(Clone)]
pub struct ProductSelectors {
    pub feature: Selector<ProductState>,
    pub show_product_code: Selector<bool>,
    pub current_product: Selector<Option<Product>>,
    pub current_product_id: Selector<Option<u32>>,
    /// The current product looked up by id in the loaded list.
    pub current_product_using_id: Selector<Option<Product>>,
    pub products: Selector<Vec<Product>>,
    pub error: Selector<String>,
}

impl ProductSelectors {
    pub fn new() -> Self {
        let feature = create_feature_selector::<ProductState>(FEATURE);
        let show_product_code = create_selector(&feature, |state: &ProductState| {
            state.show_product_code
        });
        let current_product = create_selector(&feature, |state: &ProductState| {
            state.current_product.clone()
        });
        let current_product_id = create_selector(&feature, |state: &ProductState| {
            state.current_product_id
        });
        let current_product_using_id = create_selector2(
            &feature,
            &current_product_id,
            |state: &ProductState, id: &Option<u32>| {
                id.and_then(|id| state.products.iter().find(|p| p.id == id).cloned())
            },
        );
        let products = create_selector(&feature, |state: &ProductState| state.products.clone());
        let error = create_selector(&feature, |state: &ProductState| state.error.clone());

        Self {
            feature,
            show_product_code,
            current_product,
            current_product_id,
            current_product_using_id,
            products,
            error,
        }
    }
}

impl Default for ProductSelectors {
    fn default() -> Self {
        Self::new()
    }
}
