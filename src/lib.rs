pub mod catalog;
pub mod config;
pub mod registry;
pub mod update;
pub mod version;
