//! 全局搜索服务：把工作者放到 tokio 阻塞线程池中执行

use super::ignore_rules::IgnoreRules;
use super::scanner::ScanOptions;
use super::task::{CancelToken, GlobalSearchTask};
use super::worker::{SearchWorker, WorkerOptions};
use crate::kernel::services::ports::{
    GlobalSearchMessage, SearchError, SearchRequest, SearchSettings,
};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;
use std::time::Duration;

pub struct GlobalSearchService {
    runtime: tokio::runtime::Handle,
    rules: Arc<IgnoreRules>,
    options: WorkerOptions,
    timeout: Option<Duration>,
}

impl GlobalSearchService {
    pub fn new(runtime: tokio::runtime::Handle, rules: Arc<IgnoreRules>) -> Self {
        Self {
            runtime,
            rules,
            options: WorkerOptions::default(),
            timeout: None,
        }
    }

    pub fn from_settings(runtime: tokio::runtime::Handle, settings: &SearchSettings) -> Self {
        let mut service = Self::new(runtime, Arc::new(IgnoreRules::from_settings(settings)));
        service.options = WorkerOptions {
            scan: ScanOptions {
                include_hidden: settings.include_hidden,
                respect_gitignore: settings.respect_gitignore,
            },
            report_unreadable_files: settings.report_unreadable_files,
        };
        service.timeout = settings.timeout_ms.map(Duration::from_millis);
        service
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// 启动一次搜索，立即返回任务句柄
    pub fn search_in_dir(
        &self,
        request: SearchRequest,
        token: CancelToken,
        tx: SyncSender<GlobalSearchMessage>,
    ) -> GlobalSearchTask {
        let task = GlobalSearchTask::new(token.clone());
        let generation = token.generation();

        if let Some(timeout) = self.timeout {
            let watchdog = task.token();
            self.runtime.spawn(async move {
                tokio::time::sleep(timeout).await;
                if !watchdog.is_cancelled() {
                    tracing::debug!(generation, ?timeout, "search timed out");
                    watchdog.cancel();
                }
            });
        }

        let worker = SearchWorker::new(
            request,
            self.rules.clone(),
            self.options,
            token,
            tx.clone(),
        );
        self.runtime.spawn(async move {
            let result = tokio::task::spawn_blocking(move || worker.run()).await;
            match result {
                Ok(state) => debug_assert!(state.is_terminal()),
                Err(e) => {
                    tracing::error!(generation, error = %e, "global search task failed");
                    let _ = tx.send(GlobalSearchMessage::Error {
                        generation,
                        error: SearchError::Internal(e.to_string()),
                    });
                }
            }
        });

        task
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/service.rs"]
mod tests;
