//! 目录遍历
//!
//! 基于 ignore crate 的顺序遍历（深度优先，按文件名排序），在进入目录之前应用忽略规则。
//! 读目录失败的子树直接跳过，不作为错误上报。

use super::ignore_rules::IgnoreRules;
use super::task::CancelToken;
use ignore::{Walk, WalkBuilder};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub include_hidden: bool,
    pub respect_gitignore: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            include_hidden: true,
            respect_gitignore: false,
        }
    }
}

/// 根目录本身的名字被忽略时，整个搜索直接结束
///
/// `.`、`..` 这类路径没有文件名，先解析成真实路径再取名字。
pub fn is_ignored_root(root: &Path, rules: &IgnoreRules) -> bool {
    let resolved = std::fs::canonicalize(root).ok();
    resolved
        .as_deref()
        .unwrap_or(root)
        .file_name()
        .map(|name| rules.is_ignored_dir(&name.to_string_lossy()))
        .unwrap_or(false)
}

/// 惰性的候选文件序列
///
/// 每次 `next` 都会在消费目录项之间检查取消标志。
pub struct PathScanner {
    walk: Walk,
    cancel: Option<CancelToken>,
    dirs_visited: u64,
}

impl PathScanner {
    pub fn new(root: &Path, rules: Arc<IgnoreRules>, options: ScanOptions) -> Self {
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .hidden(!options.include_hidden)
            .git_ignore(options.respect_gitignore)
            .git_global(options.respect_gitignore)
            .git_exclude(options.respect_gitignore)
            .ignore(options.respect_gitignore)
            .parents(options.respect_gitignore)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let name = entry.file_name().to_string_lossy();
                match entry.file_type() {
                    Some(ft) if ft.is_dir() => !rules.is_ignored_dir(&name),
                    Some(ft) if ft.is_file() => !rules.is_ignored_file(entry.path()),
                    _ => true,
                }
            });

        Self {
            walk: builder.build(),
            cancel: None,
            dirs_visited: 0,
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn dirs_visited(&self) -> u64 {
        self.dirs_visited
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

impl Iterator for PathScanner {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            if self.is_cancelled() {
                return None;
            }

            let entry = match self.walk.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::trace!(error = %err, "skip unreadable entry");
                    continue;
                }
            };

            match entry.file_type() {
                Some(ft) if ft.is_dir() => {
                    self.dirs_visited += 1;
                }
                Some(ft) if ft.is_file() => return Some(entry.into_path()),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/scanner.rs"]
mod tests;
