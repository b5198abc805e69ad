//! Usage: Tauri command surface; thin IPC wrappers over `domain/*` and `infra/*`.

mod app;
mod sessions;
mod settings;
mod timer;
mod window;

pub(crate) use app::*;
pub(crate) use sessions::*;
pub(crate) use settings::*;
pub(crate) use timer::*;
pub(crate) use window::*;
