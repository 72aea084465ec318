pub mod market_data;
pub mod watchlist_repository;
