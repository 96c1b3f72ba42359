pub mod config;
pub mod error;
pub mod event;
pub mod input;
pub mod market;
pub mod model;
pub mod store;
pub mod ui;
