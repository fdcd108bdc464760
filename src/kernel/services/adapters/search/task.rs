//! 搜索任务句柄与协作式取消

use crate::kernel::services::ports::Generation;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// 工作线程侧的取消检查
///
/// 两种情况视为取消：任务自身的标志被置位，或会话的当前代数已经不是本任务的代数。
#[derive(Debug, Clone)]
pub struct CancelToken {
    generation: Generation,
    cancelled: Arc<AtomicBool>,
    current: Option<Arc<AtomicU64>>,
}

impl CancelToken {
    pub fn new(generation: Generation) -> Self {
        Self {
            generation,
            cancelled: Arc::new(AtomicBool::new(false)),
            current: None,
        }
    }

    /// 绑定会话的当前代数，被新搜索取代时立即视为取消
    pub fn tracking(generation: Generation, current: Arc<AtomicU64>) -> Self {
        Self {
            current: Some(current),
            ..Self::new(generation)
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        if self.cancelled.load(Ordering::Relaxed) {
            return true;
        }
        match &self.current {
            Some(current) => current.load(Ordering::Acquire) != self.generation,
            None => false,
        }
    }
}

/// 调用方持有的任务句柄
pub struct GlobalSearchTask {
    token: CancelToken,
}

impl GlobalSearchTask {
    pub(crate) fn new(token: CancelToken) -> Self {
        Self { token }
    }

    pub fn generation(&self) -> Generation {
        self.token.generation()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub(crate) fn token(&self) -> CancelToken {
        self.token.clone()
    }
}
