//! 忽略规则：跳过的目录名与文件扩展名
//!
//! 只读配置，加载一次后通过 `Arc` 在所有搜索间共享。

use crate::kernel::services::ports::SearchSettings;
use rustc_hash::FxHashSet;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreRules {
    ignored_dir_names: FxHashSet<String>,
    ignored_extensions: FxHashSet<String>,
}

impl IgnoreRules {
    pub fn new<D, E>(dirs: D, extensions: E) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            ignored_dir_names: dirs.into_iter().map(Into::into).collect(),
            ignored_extensions: extensions
                .into_iter()
                .map(|ext| normalize_ext(ext.as_ref()))
                .filter(|ext| !ext.is_empty())
                .collect(),
        }
    }

    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self::new(
            settings.ignored_dirs.iter().cloned(),
            settings.ignored_extensions.iter(),
        )
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dir_names.contains(name)
    }

    /// 扩展名比较忽略大小写，前导 `.` 可有可无
    pub fn is_ignored_ext(&self, ext: &str) -> bool {
        if self.ignored_extensions.is_empty() {
            return false;
        }
        self.ignored_extensions.contains(&normalize_ext(ext))
    }

    pub fn is_ignored_file(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| self.is_ignored_ext(&ext.to_string_lossy()))
            .unwrap_or(false)
    }
}

fn normalize_ext(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}
