pub mod price_series;
pub mod quote_record;
pub mod watchlist;
