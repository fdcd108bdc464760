use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_ignored_dirs")]
    pub ignored_dirs: Vec<String>,
    #[serde(default = "default_ignored_extensions")]
    pub ignored_extensions: Vec<String>,
    #[serde(default = "default_true")]
    pub include_hidden: bool,
    #[serde(default)]
    pub respect_gitignore: bool,
    #[serde(default)]
    pub report_unreadable_files: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_ignored_dirs() -> Vec<String> {
    [".git", "node_modules", "__pycache__", "venv", ".vscode"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_ignored_extensions() -> Vec<String> {
    [
        // 编译产物
        ".pyc", ".pyo", ".o", ".so",
        // 可执行文件
        ".dll", ".exe",
        // 数据库
        ".db", ".sqlite3",
        // 镜像
        ".img", ".iso", ".bin",
        // 图片
        ".jpg", ".jpeg", ".png", ".gif",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_true() -> bool {
    true
}

fn default_channel_capacity() -> usize {
    1024
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            ignored_dirs: default_ignored_dirs(),
            ignored_extensions: default_ignored_extensions(),
            include_hidden: true,
            respect_gitignore: false,
            report_unreadable_files: false,
            timeout_ms: None,
            channel_capacity: default_channel_capacity(),
        }
    }
}
