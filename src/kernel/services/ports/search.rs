use serde::Serialize;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, SearchError>;

/// 搜索代数：每次提交新搜索递增，用于丢弃过期事件
pub type Generation = u64;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("IO error at {}: {reason}", .path.display())]
    Io { path: PathBuf, reason: String },
    #[error("Search task failed: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchErrorKind {
    InvalidPattern,
    Io,
    Internal,
}

impl SearchError {
    pub fn io(path: &Path, err: &std::io::Error) -> Self {
        SearchError::Io {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    pub fn kind(&self) -> SearchErrorKind {
        match self {
            SearchError::InvalidPattern(_) => SearchErrorKind::InvalidPattern,
            SearchError::Io { .. } => SearchErrorKind::Io,
            SearchError::Internal(_) => SearchErrorKind::Internal,
        }
    }
}

impl From<regex::Error> for SearchError {
    fn from(e: regex::Error) -> Self {
        SearchError::InvalidPattern(e.to_string())
    }
}

/// 一次搜索请求，提交后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub root_path: PathBuf,
    pub term: String,
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub use_regex: bool,
}

impl SearchRequest {
    pub fn new(root_path: impl Into<PathBuf>, term: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            term: term.into(),
            case_sensitive: false,
            whole_word: false,
            use_regex: false,
        }
    }

    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = value;
        self
    }

    pub fn whole_word(mut self, value: bool) -> Self {
        self.whole_word = value;
        self
    }

    pub fn use_regex(mut self, value: bool) -> Self {
        self.use_regex = value;
        self
    }
}

/// 单个匹配项
///
/// `line_number` 从 1 开始；`match_start`/`match_end` 是 `line_text` 中的字符偏移（半开区间）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub file_path: PathBuf,
    pub line_number: usize,
    pub line_text: String,
    pub match_start: usize,
    pub match_end: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchSummary {
    pub files_scanned: u64,
    pub matches_found: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalSearchMessage {
    Match {
        generation: Generation,
        item: Match,
    },
    /// 非致命的单文件错误，仅在 `report_unreadable_files` 打开时发送
    FileError {
        generation: Generation,
        error: SearchError,
    },
    Summary {
        generation: Generation,
        summary: SearchSummary,
    },
    Cancelled {
        generation: Generation,
    },
    Error {
        generation: Generation,
        error: SearchError,
    },
}

impl GlobalSearchMessage {
    pub fn generation(&self) -> Generation {
        match self {
            GlobalSearchMessage::Match { generation, .. }
            | GlobalSearchMessage::FileError { generation, .. }
            | GlobalSearchMessage::Summary { generation, .. }
            | GlobalSearchMessage::Cancelled { generation }
            | GlobalSearchMessage::Error { generation, .. } => *generation,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GlobalSearchMessage::Summary { .. }
                | GlobalSearchMessage::Cancelled { .. }
                | GlobalSearchMessage::Error { .. }
        )
    }
}
