//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod paths;
pub mod search;
pub mod settings;

pub use paths::ensure_log_dir;
pub use search::{
    CancelToken, CompiledPattern, GlobalSearchService, GlobalSearchTask, IgnoreRules,
    LineMatcher, PathScanner, SearchSession, SearchWorker, WorkerOptions, WorkerState,
};
pub use settings::{ensure_settings_file, get_settings_path, load_settings, load_settings_from};
