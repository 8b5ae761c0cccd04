use crate::store::Reducer;

use super::action::ProductAction;
use super::state::{Product, ProductState};

pub struct ProductReducer;

impl Reducer for ProductReducer {
    type State = ProductState;
    type Action = ProductAction;

    fn reduce(&self, state: &Self::State, action: &Self::Action) -> Option<Self::State> {
        match action {
            ProductAction::ToggleProductCode => Some(ProductState {
                show_product_code: !state.show_product_code,
                ..state.clone()
            }),
            ProductAction::SetCurrentProduct { product } => Some(ProductState {
                current_product_id: Some(product.id),
                current_product: Some(product.clone()),
                ..state.clone()
            }),
            ProductAction::ClearCurrentProduct => Some(ProductState {
                current_product_id: None,
                current_product: None,
                ..state.clone()
            }),
            ProductAction::InitializeCurrentProduct => {
                let product = Product::blank();
                Some(ProductState {
                    current_product_id: Some(product.id),
                    current_product: Some(product),
                    ..state.clone()
                })
            }
            // Side effects happen outside the store.
            ProductAction::Load => None,
            // The list is replaced wholesale, never merged.
            ProductAction::LoadSuccess { products } => Some(ProductState {
                products: products.clone(),
                error: String::new(),
                ..state.clone()
            }),
            ProductAction::LoadFailure { error } => Some(ProductState {
                products: Vec::new(),
                error: error.clone(),
                ..state.clone()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product {
            id: 5,
            product_name: "Hammer".to_string(),
            product_code: "TBX-0048".to_string(),
            description: "Curved claw steel hammer".to_string(),
            star_rating: 4.8,
        }
    }

    #[test]
    fn toggle_flips_only_the_code_flag() {
        let state = ProductState {
            products: vec![widget()],
            ..ProductState::default()
        };
        let next = ProductReducer
            .reduce(&state, &ProductAction::ToggleProductCode)
            .unwrap();
        assert!(!next.show_product_code);
        assert_eq!(next.products, state.products);
    }

    #[test]
    fn load_leaves_the_slice_alone() {
        assert!(ProductReducer
            .reduce(&ProductState::default(), &ProductAction::Load)
            .is_none());
    }

    #[test]
    fn initialize_current_product_uses_a_blank_product() {
        let next = ProductReducer
            .reduce(&ProductState::default(), &ProductAction::InitializeCurrentProduct)
            .unwrap();
        assert_eq!(next.current_product_id, Some(0));
        assert_eq!(next.current_product, Some(Product::blank()));
    }
}
