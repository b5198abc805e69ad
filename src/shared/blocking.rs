//! Usage: Run filesystem/SQLite work on the blocking pool, keeping command handlers async-safe.

pub(crate) async fn run<T, F>(task_name: &'static str, task: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, String> + Send + 'static,
{
    tauri::async_runtime::spawn_blocking(task)
        .await
        .map_err(|e| format!("TASK_JOIN: blocking task {task_name} failed: {e}"))?
}
