//! 搜索设置的读取与初始化
//!
//! 设置文件位于 `<cache>/.zsearch/settings.json`，缺失字段使用默认值。

use super::paths::get_cache_dir;
use crate::kernel::services::ports::SearchSettings;
use std::path::{Path, PathBuf};

const SETTINGS_DIR: &str = ".zsearch";
const SETTINGS_FILE: &str = "settings.json";

pub fn get_settings_path() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    write_default_settings(&path)?;
    Ok(path)
}

fn write_default_settings(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content = serde_json::to_string_pretty(&SearchSettings::default())
            .unwrap_or_else(|_| "{}".to_string());
        std::fs::write(path, content)?;
    }
    Ok(())
}

/// 读取设置；文件不存在时返回 `None`，格式错误时记录警告并返回 `None`
pub fn load_settings_from(path: &Path) -> Option<SearchSettings> {
    let data = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "invalid settings file, using defaults"
            );
            None
        }
    }
}

/// 启动时读取设置；设置文件缺失时先写入默认值
pub fn load_settings() -> SearchSettings {
    match ensure_settings_file() {
        Ok(path) => load_settings_from(&path).unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "ensure_settings_file failed, using defaults");
            SearchSettings::default()
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
