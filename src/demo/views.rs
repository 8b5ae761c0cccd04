use std::sync::Arc;

use parking_lot::Mutex;

use crate::features::products::{Product, ProductSelectors};
use crate::features::users::{User, UserSelectors};
use crate::store::{create_selector2, Selector, Store, Subscription};

/// Lines the views have rendered, shared by every view of the demo.
#[derive(Clone, Default)]
pub struct Screen {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Screen {
    pub fn push(&self, line: impl Into<String>) {
        self.lines.lock().push(line.into());
    }

    /// Everything rendered so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Everything rendered since the last call.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }
}

/// The product list page.
///
/// Subscriptions are released when the view is dropped.
pub struct ProductListView {
    selectors: ProductSelectors,
    rows: Selector<Vec<String>>,
    _subscriptions: Vec<Subscription>,
}

impl ProductListView {
    pub fn attach(store: &Store, screen: Screen) -> Self {
        let selectors = ProductSelectors::new();
        let rows: Selector<Vec<String>> = create_selector2(
            &selectors.products,
            &selectors.show_product_code,
            |products: &Vec<Product>, show_code: &bool| {
                products
                    .iter()
                    .map(|product| {
                        if *show_code {
                            format!("{} ({})", product.product_name, product.product_code)
                        } else {
                            product.product_name.clone()
                        }
                    })
                    .collect()
            },
        );

        let subscriptions = vec![
            store.select(&selectors.show_product_code).subscribe({
                let screen = screen.clone();
                move |show: &bool| screen.push(format!("[product list] display code: {show}"))
            }),
            store.select(&rows).subscribe({
                let screen = screen.clone();
                move |rows: &Vec<String>| {
                    screen.push(format!("[product list] {} products", rows.len()));
                    for row in rows {
                        screen.push(format!("[product list]   {row}"));
                    }
                }
            }),
            store.select(&selectors.current_product).subscribe({
                let screen = screen.clone();
                move |product: &Option<Product>| match product {
                    Some(product) if product.id == 0 => {
                        screen.push("[product list] editing a new product")
                    }
                    Some(product) => screen.push(format!(
                        "[product list] selected: {}",
                        product.product_name
                    )),
                    None => screen.push("[product list] no product selected"),
                }
            }),
            store.select(&selectors.error).subscribe(move |error: &String| {
                if !error.is_empty() {
                    screen.push(format!("[product list] error: {error}"));
                }
            }),
        ];

        Self {
            selectors,
            rows,
            _subscriptions: subscriptions,
        }
    }

    pub fn selectors(&self) -> &ProductSelectors {
        &self.selectors
    }

    /// Rows as currently rendered for `store`.
    pub fn rows(&self, store: &Store) -> Arc<Vec<String>> {
        self.rows.select(&store.get_state())
    }
}

/// The login page.
pub struct LoginView {
    selectors: UserSelectors,
    _subscriptions: Vec<Subscription>,
}

impl LoginView {
    pub fn attach(store: &Store, screen: Screen) -> Self {
        let selectors = UserSelectors::new();
        let subscriptions = vec![
            store.select(&selectors.mask_user_name).subscribe({
                let screen = screen.clone();
                move |mask: &bool| screen.push(format!("[login] mask user name: {mask}"))
            }),
            store
                .select(&selectors.current_user)
                .subscribe(move |user: &Option<User>| match user {
                    Some(user) => screen.push(format!("[login] signed in as {}", user.user_name)),
                    None => screen.push("[login] signed out"),
                }),
        ];

        Self {
            selectors,
            _subscriptions: subscriptions,
        }
    }

    pub fn selectors(&self) -> &UserSelectors {
        &self.selectors
    }
}
