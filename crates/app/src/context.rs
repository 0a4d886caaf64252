//! App Context

use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use bistro::fixtures::{FixtureError, MenuFixture, sample_menu};
use thiserror::Error;
use tracing::info;

use crate::{
    config::AppConfig,
    domain::{
        booking::BookingStore,
        cart::{CartStorage, CartStore, FileStorage},
        posts::{HttpPostsService, PostsService},
        products::{FixtureProductsService, HttpProductsService, ProductsService},
    },
    http::{ApiClient, ApiError},
};

/// Errors raised while wiring up the client.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The HTTP client could not be built.
    #[error("failed to build API client")]
    Api(#[from] ApiError),

    /// The offline menu could not be loaded.
    #[error("failed to load menu fixture")]
    Fixture(#[from] FixtureError),
}

/// Services shared by every command.
#[derive(Clone)]
pub struct AppContext {
    /// Product catalog
    pub products: Arc<dyn ProductsService>,

    /// News posts
    pub posts: Arc<dyn PostsService>,

    /// The session cart
    pub cart: Arc<CartStore>,

    /// Table booking state
    pub bookings: Arc<BookingStore>,
}

impl AppContext {
    /// Build the context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built or an offline
    /// menu fails to load.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let client = ApiClient::new(&config.api)?;
        let storage: Arc<dyn CartStorage> = Arc::new(FileStorage::new(&config.storage.data_dir));

        let products: Arc<dyn ProductsService> = match (&config.menu.menu_fixture, config.menu.offline) {
            (Some(path), _) => {
                info!(path = %path.display(), "serving products from menu fixture");

                Arc::new(FixtureProductsService::new(MenuFixture::from_path(path)?))
            }
            (None, true) => {
                info!("serving products from the sample menu");

                Arc::new(FixtureProductsService::new(sample_menu()?))
            }
            (None, false) => Arc::new(HttpProductsService::new(client.clone())),
        };

        Ok(Self {
            products,
            posts: Arc::new(HttpPostsService::new(client)),
            cart: Arc::new(CartStore::open(Arc::clone(&storage))),
            bookings: Arc::new(BookingStore::new(storage)),
        })
    }
}

impl Debug for AppContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("cart", &self.cart)
            .field("bookings", &self.bookings)
            .finish_non_exhaustive()
    }
}
