pub mod config;
pub mod geo;
pub mod theme;
