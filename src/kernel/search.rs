use crate::kernel::services::ports::{
    GlobalSearchMessage, Generation, Match, SearchError, SearchRequest, SearchSummary,
};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct SearchFileResult {
    pub path: PathBuf,
    pub matches: Vec<Match>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Completed(SearchSummary),
    Cancelled,
    Failed,
}

/// 搜索结果模型（消费端）
///
/// 只接受 `active_generation` 的事件，按文件聚合匹配项。
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub use_regex: bool,
    pub searching: bool,
    pub active_generation: Option<Generation>,
    pub files: Vec<SearchFileResult>,
    pub total_matches: usize,
    pub outcome: Option<SearchOutcome>,
    pub last_error: Option<String>,
    pub file_errors: Vec<SearchError>,
    file_index: FxHashMap<PathBuf, usize>,
}

impl SearchState {
    /// 根据当前查询构造请求；查询去掉首尾空白后为空时不搜索
    pub fn request(&self, root: &Path) -> Option<SearchRequest> {
        let term = self.query.trim();
        if term.is_empty() {
            return None;
        }
        Some(
            SearchRequest::new(root, term)
                .case_sensitive(self.case_sensitive)
                .whole_word(self.whole_word)
                .use_regex(self.use_regex),
        )
    }

    pub fn begin_search(&mut self, generation: Generation) {
        self.searching = true;
        self.active_generation = Some(generation);
        self.files.clear();
        self.file_index.clear();
        self.total_matches = 0;
        self.outcome = None;
        self.last_error = None;
        self.file_errors.clear();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn toggle_case_sensitive(&mut self) -> bool {
        self.case_sensitive = !self.case_sensitive;
        true
    }

    pub fn toggle_whole_word(&mut self) -> bool {
        self.whole_word = !self.whole_word;
        true
    }

    pub fn toggle_regex(&mut self) -> bool {
        self.use_regex = !self.use_regex;
        true
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn summary(&self) -> Option<SearchSummary> {
        match self.outcome {
            Some(SearchOutcome::Completed(summary)) => Some(summary),
            _ => None,
        }
    }

    /// "打开结果"需要的位置：文件路径与 1 起始的行号
    pub fn location(&self, file_index: usize, match_index: usize) -> Option<(&Path, usize)> {
        let file = self.files.get(file_index)?;
        let m = file.matches.get(match_index)?;
        Some((file.path.as_path(), m.line_number))
    }

    /// 应用一条搜索事件，返回状态是否改变
    pub fn apply_message(&mut self, msg: GlobalSearchMessage) -> bool {
        if self.active_generation != Some(msg.generation()) || !self.searching {
            return false;
        }

        match msg {
            GlobalSearchMessage::Match { item, .. } => {
                self.total_matches += 1;
                let idx = match self.file_index.get(&item.file_path).copied() {
                    Some(idx) => idx,
                    None => {
                        let idx = self.files.len();
                        self.file_index.insert(item.file_path.clone(), idx);
                        self.files.push(SearchFileResult {
                            path: item.file_path.clone(),
                            matches: Vec::new(),
                        });
                        idx
                    }
                };
                self.files[idx].matches.push(item);
                true
            }
            GlobalSearchMessage::FileError { error, .. } => {
                self.file_errors.push(error);
                true
            }
            GlobalSearchMessage::Summary { summary, .. } => {
                self.searching = false;
                self.outcome = Some(SearchOutcome::Completed(summary));
                true
            }
            GlobalSearchMessage::Cancelled { .. } => {
                self.searching = false;
                self.outcome = Some(SearchOutcome::Cancelled);
                true
            }
            GlobalSearchMessage::Error { error, .. } => {
                self.searching = false;
                self.outcome = Some(SearchOutcome::Failed);
                self.last_error = Some(error.to_string());
                true
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/search.rs"]
mod tests;
