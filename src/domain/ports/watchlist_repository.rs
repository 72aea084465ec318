use crate::domain::entities::watchlist::Watchlist;
use crate::domain::error::StoreError;

/// Durable storage for the watchlist. `save` replaces the whole stored list.
pub trait WatchlistRepository: Send + Sync {
    fn load(&self) -> Result<Watchlist, StoreError>;
    fn save(&self, watchlist: &Watchlist) -> Result<(), StoreError>;
}
