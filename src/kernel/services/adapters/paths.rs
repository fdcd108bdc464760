//! 日志目录与设置所在的缓存目录
//!
//! - 日志：`$XDG_DATA_HOME/zsearch/logs`（Linux）、`~/Library/Application Support/zsearch/logs`（macOS）、
//!   `%APPDATA%\zsearch\logs`（Windows）
//! - 缓存：`$XDG_CACHE_HOME` 或 `~/.cache`、`~/Library/Caches`、`%LOCALAPPDATA%`

use std::path::PathBuf;

const APP_NAME: &str = "zsearch";

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn home_join(rel: &str) -> Option<PathBuf> {
    env_dir("HOME").map(|home| home.join(rel))
}

fn log_dir() -> Option<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        home_join("Library/Application Support")
    } else if cfg!(windows) {
        env_dir("APPDATA")
    } else {
        env_dir("XDG_DATA_HOME").or_else(|| home_join(".local/share"))
    };
    base.map(|dir| dir.join(APP_NAME).join("logs"))
}

pub(crate) fn get_cache_dir() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        home_join("Library/Caches")
    } else if cfg!(windows) {
        env_dir("LOCALAPPDATA").or_else(|| env_dir("APPDATA"))
    } else {
        env_dir("XDG_CACHE_HOME").or_else(|| home_join(".cache"))
    }
}

/// 确保日志目录存在
pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine log directory",
        )
    })?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
