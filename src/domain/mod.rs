pub(crate) mod session_stats;
pub(crate) mod sessions;
pub(crate) mod timer;
