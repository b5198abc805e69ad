//! Usage: Infrastructure adapters (filesystem paths, persistence, OS integration).

pub(crate) mod app_paths;
pub(crate) mod db;
pub(crate) mod settings;
pub(crate) mod window_state;
