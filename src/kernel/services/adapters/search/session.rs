//! 搜索会话：维护"当前搜索"
//!
//! - 提交新搜索前取消上一次搜索（协作式，不等待旧任务结束）
//! - 每次提交分配单调递增的代数
//! - 接收事件时丢弃代数不等于当前代数的事件

use super::service::GlobalSearchService;
use super::task::{CancelToken, GlobalSearchTask};
use crate::kernel::services::ports::{GlobalSearchMessage, Generation, SearchRequest};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 代数 0 表示没有任何搜索
const NO_GENERATION: Generation = 0;

pub struct SearchSession {
    service: GlobalSearchService,
    tx: SyncSender<GlobalSearchMessage>,
    rx: Receiver<GlobalSearchMessage>,
    current: Arc<AtomicU64>,
    active: Option<GlobalSearchTask>,
    /// 当前代数已被显式停止：之后只放行终止事件
    stopped: bool,
}

impl SearchSession {
    pub fn new(service: GlobalSearchService, channel_capacity: usize) -> Self {
        let (tx, rx) = mpsc::sync_channel(channel_capacity.max(1));
        Self {
            service,
            tx,
            rx,
            current: Arc::new(AtomicU64::new(NO_GENERATION)),
            active: None,
            stopped: false,
        }
    }

    /// 当前代数；尚未提交过搜索时为 `None`
    pub fn current_generation(&self) -> Option<Generation> {
        match self.current.load(Ordering::Acquire) {
            NO_GENERATION => None,
            generation => Some(generation),
        }
    }

    /// 当前代数的搜索是否还未收到终止事件
    pub fn is_searching(&self) -> bool {
        self.active.is_some()
    }

    pub fn submit(&mut self, request: SearchRequest) -> Generation {
        if let Some(prev) = self.active.take() {
            prev.cancel();
            tracing::debug!(generation = prev.generation(), "search superseded");
        }

        let generation = self.current.load(Ordering::Acquire) + 1;
        self.current.store(generation, Ordering::Release);
        self.stopped = false;

        tracing::info!(
            generation,
            root = %request.root_path.display(),
            term = %request.term,
            case_sensitive = request.case_sensitive,
            whole_word = request.whole_word,
            use_regex = request.use_regex,
            "search submitted"
        );

        let token = CancelToken::tracking(generation, self.current.clone());
        let task = self.service.search_in_dir(request, token, self.tx.clone());
        self.active = Some(task);
        generation
    }

    /// 停止指定代数的搜索；只有它仍是当前且未结束的搜索时返回 `true`
    pub fn cancel(&mut self, generation: Generation) -> bool {
        match &self.active {
            Some(task) if task.generation() == generation && !self.stopped => {
                task.cancel();
                self.stopped = true;
                tracing::debug!(generation, "search cancelled");
                true
            }
            _ => false,
        }
    }

    /// 阻塞等待当前搜索的下一个事件；没有进行中的搜索时返回 `None`
    pub fn recv(&mut self) -> Option<GlobalSearchMessage> {
        while self.active.is_some() {
            let msg = self.rx.recv().ok()?;
            if let Some(msg) = self.admit(msg) {
                return Some(msg);
            }
        }
        None
    }

    pub fn try_recv(&mut self) -> Option<GlobalSearchMessage> {
        loop {
            match self.rx.try_recv() {
                Ok(msg) => {
                    if let Some(msg) = self.admit(msg) {
                        return Some(msg);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }

    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<GlobalSearchMessage> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(msg) => {
                    if let Some(msg) = self.admit(msg) {
                        return Some(msg);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None
                }
            }
        }
    }

    /// 过滤边界：过期代数的事件全部丢弃；被停止（显式取消或超时）的代数只放行终止事件，
    /// 已经产生的 `Summary` 会被改写为 `Cancelled`。
    fn admit(&mut self, msg: GlobalSearchMessage) -> Option<GlobalSearchMessage> {
        let generation = msg.generation();
        if self.current_generation() != Some(generation) || self.active.is_none() {
            tracing::trace!(generation, "drop stale search event");
            return None;
        }

        // 超时看门狗同样通过任务标志取消，会话这边按已停止处理
        let stopped = self.stopped
            || self
                .active
                .as_ref()
                .is_some_and(GlobalSearchTask::is_cancelled);
        let msg = if stopped {
            match msg {
                GlobalSearchMessage::Match { .. } | GlobalSearchMessage::FileError { .. } => {
                    return None
                }
                GlobalSearchMessage::Summary { .. } => {
                    GlobalSearchMessage::Cancelled { generation }
                }
                other => other,
            }
        } else {
            msg
        };

        if msg.is_terminal() {
            self.active = None;
            self.stopped = false;
        }
        Some(msg)
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        if let Some(task) = self.active.take() {
            task.cancel();
        }
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/session.rs"]
mod tests;
