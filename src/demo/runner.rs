use anyhow::{bail, Context};

use crate::config::StoreConfig;
use crate::features::products::{self, ProductAction, ProductState};
use crate::features::users::{self, User, UserAction, UserState};
use crate::store::{ReducerRegistry, Store};

use super::args::Step;
use super::service::ProductDataService;
use super::views::{LoginView, ProductListView, Screen};

/// A store with both features registered and both views attached.
pub struct Demo {
    store: Store,
    screen: Screen,
    product_list: ProductListView,
    login: LoginView,
}

impl Demo {
    /// Build an empty root store, then register the features lazily, the way
    /// feature modules do when they are first loaded.
    pub fn start(config: StoreConfig) -> anyhow::Result<Self> {
        let store = Store::with_config(config, ReducerRegistry::new())
            .context("Failed to create store")?;
        products::register(&store).context("Failed to register products")?;
        users::register(&store).context("Failed to register users")?;

        let screen = Screen::default();
        let product_list = ProductListView::attach(&store, screen.clone());
        let login = LoginView::attach(&store, screen.clone());

        Ok(Self {
            store,
            screen,
            product_list,
            login,
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn product_list(&self) -> &ProductListView {
        &self.product_list
    }

    pub fn login(&self) -> &LoginView {
        &self.login
    }

    /// Both feature slices as pretty-printed JSON.
    pub fn state_json(&self) -> anyhow::Result<String> {
        let state = self.store.get_state();
        let snapshot = serde_json::json!({
            "products": state.slice::<ProductState>(products::FEATURE).as_deref(),
            "users": state.slice::<UserState>(users::FEATURE).as_deref(),
        });
        serde_json::to_string_pretty(&snapshot).context("Failed to serialize state")
    }

    pub fn run(&self, step: &Step) -> anyhow::Result<()> {
        tracing::debug!(?step, "Running step");
        match step {
            Step::ToggleCode => self.store.dispatch(ProductAction::ToggleProductCode)?,
            Step::MaskUserName => self.store.dispatch(UserAction::ToggleMaskUserName)?,
            Step::Load(path) => {
                self.store.dispatch(ProductAction::Load)?;
                self.store.dispatch(ProductDataService::load(path))?;
            }
            Step::LoadFail(message) => {
                self.store.dispatch(ProductAction::Load)?;
                self.store.dispatch(ProductAction::LoadFailure {
                    error: message.clone(),
                })?;
            }
            Step::Select(id) => {
                let state = self.store.get_state();
                let products = self.product_list.selectors().products.select(&state);
                let Some(product) = products.iter().find(|p| p.id == *id) else {
                    bail!("No product with id {id}");
                };
                self.store.dispatch(ProductAction::SetCurrentProduct {
                    product: product.clone(),
                })?;
            }
            Step::NewProduct => self
                .store
                .dispatch(ProductAction::InitializeCurrentProduct)?,
            Step::Clear => self.store.dispatch(ProductAction::ClearCurrentProduct)?,
            Step::Login(name) => self.store.dispatch(UserAction::SetCurrentUser {
                user: User {
                    id: 1,
                    user_name: name.clone(),
                    is_admin: false,
                },
            })?,
            Step::Logout => self.store.dispatch(UserAction::ClearCurrentUser)?,
        }
        Ok(())
    }
}
