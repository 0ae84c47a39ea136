pub mod config;
pub mod widget;
