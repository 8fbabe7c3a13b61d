pub mod config;
pub mod consolidator;
pub mod forecast;
pub mod output;
pub mod utils;
