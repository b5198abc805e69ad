//! Usage: Shared Tauri state types and DB initialization gate used by `commands/*`.

use crate::timer::TimerEngine;
use crate::{blocking, db};
use std::sync::Mutex;
use tokio::sync::OnceCell;

#[derive(Default)]
pub(crate) struct TimerEngineState(pub(crate) Mutex<TimerEngine>);

#[derive(Default)]
pub(crate) struct DbInitState(pub(crate) OnceCell<Result<db::Db, String>>);

pub(crate) async fn ensure_db_ready(
    app: tauri::AppHandle,
    state: &DbInitState,
) -> Result<db::Db, String> {
    state
        .0
        .get_or_init(|| async move { blocking::run("db_init", move || db::init(&app)).await })
        .await
        .clone()
}
