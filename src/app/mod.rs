//! Usage: Application layer (Tauri-managed state, tray/window lifecycle, startup wiring).

pub(crate) mod app_state;
pub(crate) mod cleanup;
pub(crate) mod logging;
pub(crate) mod notice;
pub(crate) mod resident;
pub(crate) mod ticker;
