pub mod direction;
pub mod history_period;
pub mod symbol;
