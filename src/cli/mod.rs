pub mod commands;
pub mod menu;
pub mod style;
pub mod table;
