use crate::features::products::state::Product;

crate::actions! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum ProductAction {
        ToggleProductCode = "[Product] Toggle Product Code",
        SetCurrentProduct { product: Product } = "[Product] Set Current Product",
        ClearCurrentProduct = "[Product] Clear Current Product",
        InitializeCurrentProduct = "[Product] Initialize Current Product",
        /// Picked up by the data service, which answers with `LoadSuccess` or `LoadFailure`.
        Load = "[Product] Load",
        LoadSuccess { products: Vec<Product> } = "[Product] Load Success",
        LoadFailure { error: String } = "[Product] Load Fail",
    }
}
