pub mod category;
pub mod chart;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod filter;
pub mod geo;
pub mod logging;
pub mod manifest;
pub mod map;
pub mod record;
pub mod render;
pub mod source;
pub mod stats;
pub mod ui;
