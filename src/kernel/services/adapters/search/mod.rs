//! 全局搜索模块
//!
//! - IgnoreRules: 跳过的目录名与扩展名
//! - CompiledPattern: 搜索词编译（Literal / Regex / 全词 / 大小写）
//! - PathScanner: 可取消的深度优先目录遍历
//! - LineMatcher: 单文件逐行匹配
//! - SearchWorker: 编译 + 遍历 + 匹配的状态机
//! - GlobalSearchService: 在 tokio 阻塞线程池上运行 SearchWorker
//! - SearchSession: 当前搜索 + 代数过滤

mod ignore_rules;
mod line_matcher;
mod pattern;
mod scanner;
mod service;
mod session;
mod task;
mod worker;

pub use ignore_rules::IgnoreRules;
pub use line_matcher::{is_likely_binary, FileOutcome, LineMatcher};
pub use pattern::{CompiledPattern, Span};
pub use scanner::{is_ignored_root, PathScanner, ScanOptions};
pub use service::GlobalSearchService;
pub use session::SearchSession;
pub use task::{CancelToken, GlobalSearchTask};
pub use worker::{SearchWorker, WorkerOptions, WorkerState};
