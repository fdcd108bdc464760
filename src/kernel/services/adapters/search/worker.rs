//! 全局搜索工作者
//!
//! 状态机：Idle -> Compiling -> Scanning -> (Completed | Cancelled | Errored)
//!
//! 运行在阻塞线程中，所有事件都带上创建时分配的代数。

use super::ignore_rules::IgnoreRules;
use super::line_matcher::{FileOutcome, LineMatcher};
use super::pattern::CompiledPattern;
use super::scanner::{is_ignored_root, PathScanner, ScanOptions};
use super::task::CancelToken;
use crate::kernel::services::ports::{
    GlobalSearchMessage, Generation, SearchError, SearchRequest, SearchSummary,
};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Compiling,
    Scanning,
    Completed,
    Cancelled,
    Errored,
}

impl WorkerState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            WorkerState::Completed | WorkerState::Cancelled | WorkerState::Errored
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerOptions {
    pub scan: ScanOptions,
    pub report_unreadable_files: bool,
}

pub struct SearchWorker {
    request: SearchRequest,
    rules: Arc<IgnoreRules>,
    options: WorkerOptions,
    cancel: CancelToken,
    tx: SyncSender<GlobalSearchMessage>,
    state: WorkerState,
}

/// 接收端已关闭
struct Disconnected;

impl SearchWorker {
    pub fn new(
        request: SearchRequest,
        rules: Arc<IgnoreRules>,
        options: WorkerOptions,
        cancel: CancelToken,
        tx: SyncSender<GlobalSearchMessage>,
    ) -> Self {
        Self {
            request,
            rules,
            options,
            cancel,
            tx,
            state: WorkerState::Idle,
        }
    }

    pub fn generation(&self) -> Generation {
        self.cancel.generation()
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// 阻塞执行直到终止状态，返回最终状态
    pub fn run(mut self) -> WorkerState {
        let generation = self.generation();

        if self.request.term.is_empty() {
            self.finish(SearchSummary::default());
            return self.state;
        }

        self.transition(WorkerState::Compiling);
        let pattern = match CompiledPattern::from_request(&self.request) {
            Ok(pattern) => pattern,
            Err(error) => {
                tracing::debug!(generation, error = %error, "pattern rejected");
                let _ = self.tx.send(GlobalSearchMessage::Error { generation, error });
                self.transition(WorkerState::Errored);
                return self.state;
            }
        };
        tracing::debug!(generation, pattern = pattern.as_str(), "pattern compiled");

        if is_ignored_root(&self.request.root_path, &self.rules) {
            tracing::debug!(
                generation,
                root = %self.request.root_path.display(),
                "root is ignored"
            );
            self.finish(SearchSummary::default());
            return self.state;
        }

        self.transition(WorkerState::Scanning);
        match self.scan(&pattern) {
            Ok(summary) if !self.cancel.is_cancelled() => self.finish(summary),
            Ok(_) => {
                let _ = self.tx.send(GlobalSearchMessage::Cancelled { generation });
                self.transition(WorkerState::Cancelled);
            }
            Err(Disconnected) => {
                tracing::debug!(generation, "receiver dropped, stop scanning");
                self.transition(WorkerState::Cancelled);
            }
        }

        self.state
    }

    fn scan(&self, pattern: &CompiledPattern) -> Result<SearchSummary, Disconnected> {
        let generation = self.generation();
        let mut summary = SearchSummary::default();
        let mut scanner = PathScanner::new(
            &self.request.root_path,
            self.rules.clone(),
            self.options.scan,
        )
        .with_cancel(self.cancel.clone());
        let matcher = LineMatcher::new(pattern).with_cancel(&self.cancel);

        for path in scanner.by_ref() {
            let matches = match matcher.match_file(&path) {
                Ok(FileOutcome::Scanned(matches)) => matches,
                Ok(FileOutcome::Binary) => {
                    tracing::trace!(path = %path.display(), "skip binary file");
                    continue;
                }
                Ok(FileOutcome::Cancelled) => break,
                Err(err) => {
                    tracing::trace!(path = %path.display(), error = %err, "skip unreadable file");
                    if self.options.report_unreadable_files {
                        self.send(GlobalSearchMessage::FileError {
                            generation,
                            error: SearchError::io(&path, &err),
                        })?;
                    }
                    continue;
                }
            };

            summary.files_scanned += 1;
            for item in matches {
                if self.cancel.is_cancelled() {
                    return Ok(summary);
                }
                summary.matches_found += 1;
                self.send(GlobalSearchMessage::Match { generation, item })?;
            }
        }

        tracing::debug!(
            generation,
            files_scanned = summary.files_scanned,
            matches_found = summary.matches_found,
            dirs_visited = scanner.dirs_visited(),
            "scan finished"
        );
        Ok(summary)
    }

    fn finish(&mut self, summary: SearchSummary) {
        let generation = self.generation();
        let _ = self.tx.send(GlobalSearchMessage::Summary {
            generation,
            summary,
        });
        self.transition(WorkerState::Completed);
    }

    fn send(&self, msg: GlobalSearchMessage) -> Result<(), Disconnected> {
        self.tx.send(msg).map_err(|_| Disconnected)
    }

    fn transition(&mut self, next: WorkerState) {
        tracing::debug!(
            generation = self.generation(),
            from = ?self.state,
            to = ?next,
            "search worker state"
        );
        self.state = next;
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/worker.rs"]
mod tests;
