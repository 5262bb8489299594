pub mod async_task;
pub mod candidates;
pub mod catalog;
pub mod cli;
pub mod collection_index;
pub mod config;
pub mod error;
pub mod event;
pub mod identity;
pub mod main_lib;
pub mod model;
pub mod navigator;
pub mod permissions;
pub mod picker;
pub mod sample;
pub mod screenshot;
pub mod selection;
pub mod sources;
pub mod theme;
pub mod ui;
pub mod visibility;
