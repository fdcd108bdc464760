//! zsearch - 工作区异步文本搜索引擎
//!
//! 模块结构：
//! - kernel::services::ports: 数据契约（SearchRequest, Match, GlobalSearchMessage, SearchSettings）
//! - kernel::services::adapters: 搜索实现（遍历、匹配、工作者、会话）与设置/目录
//! - kernel::search: 消费端结果模型

pub mod kernel;
