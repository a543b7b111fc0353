#![allow(clippy::needless_pass_by_value)]

pub mod app;
pub mod club_map;
pub mod country_dock;
pub mod filter_panel;
pub mod info_panel;
pub mod search_box;
