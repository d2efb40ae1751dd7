use patro_core::store::Store;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    // Artifacts are read from disk on every request, so a scrape running
    // alongside the server is picked up without a restart.
    store: Store,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        AppState { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}
