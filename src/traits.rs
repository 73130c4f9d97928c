use crate::{error::ErrorVerbosity, inventory::Inventory};

pub trait ErrorVerbosityProvider {
    /// Returns the error verbosity.
    fn error_verbosity(&self) -> ErrorVerbosity;
}

pub trait InventoryProvider {
    /// Returns the book store shared by all handlers.
    fn inventory(&self) -> &Inventory;
}
