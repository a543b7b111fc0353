#![allow(clippy::implicit_hasher)]
#![allow(unknown_lints)]

pub mod logging;
pub mod color;
pub mod components;
pub mod config;
pub mod constants;
pub mod data;
pub mod fan_out;
pub mod filter;
pub mod geometry;
pub mod grouping;
pub mod leaflet;
pub mod markers;
pub mod models;
pub mod panes;
pub mod render;
pub mod search;
pub mod theme;
pub mod view_state;

pub use components::app::App;
