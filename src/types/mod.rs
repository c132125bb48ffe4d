pub mod config;
pub mod forecast;
pub mod formula;
pub mod index;
pub mod snapshot;
