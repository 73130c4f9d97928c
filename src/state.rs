use std::{ops::Deref, sync::Arc};

use crate::{
    error::ErrorVerbosity,
    inventory::Inventory,
    traits::{ErrorVerbosityProvider, InventoryProvider},
};

#[derive(Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    pub fn new(error_verbosity: ErrorVerbosity, inventory: Inventory) -> Self {
        Self {
            inner: Arc::new(ApiStateInner {
                error_verbosity,
                inventory,
            }),
        }
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct ApiStateInner {
    error_verbosity: ErrorVerbosity,
    inventory: Inventory,
}

impl ErrorVerbosityProvider for ApiState {
    fn error_verbosity(&self) -> ErrorVerbosity {
        self.error_verbosity
    }
}

impl InventoryProvider for ApiState {
    fn inventory(&self) -> &Inventory {
        &self.inventory
    }
}
