//! 搜索模式编译
//!
//! - Literal 模式：先转义所有元字符，再交给 regex 编译
//! - 全词匹配：两侧加 `\b`
//! - 大小写通过编译选项控制，保证匹配区间与原文一致

use crate::kernel::services::ports::search::{Result, SearchError, SearchRequest};
use regex::{Regex, RegexBuilder};

/// 行内匹配区间（字符偏移，半开区间）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// 编译好的匹配器，只暴露"在一行中查找所有不重叠匹配"
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
}

impl CompiledPattern {
    pub fn compile(
        term: &str,
        case_sensitive: bool,
        whole_word: bool,
        use_regex: bool,
    ) -> Result<Self> {
        let body = if use_regex {
            term.to_string()
        } else {
            regex::escape(term)
        };
        let source = if whole_word {
            format!(r"\b(?:{})\b", body)
        } else {
            body
        };

        let regex = RegexBuilder::new(&source)
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| match e {
                regex::Error::Syntax(msg) => SearchError::InvalidPattern(msg),
                other => SearchError::from(other),
            })?;
        Ok(Self { regex })
    }

    pub fn from_request(request: &SearchRequest) -> Result<Self> {
        Self::compile(
            &request.term,
            request.case_sensitive,
            request.whole_word,
            request.use_regex,
        )
    }

    /// 返回 `line` 中所有不重叠匹配的字符区间，按起点升序
    ///
    /// 空匹配（如 `x*`）不会产生区间。
    pub fn find_spans(&self, line: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        // 字节偏移 -> 字符偏移，增量计算
        let mut byte_pos = 0usize;
        let mut char_pos = 0usize;

        for mat in self.regex.find_iter(line) {
            if mat.start() == mat.end() {
                continue;
            }
            char_pos += line[byte_pos..mat.start()].chars().count();
            let start = char_pos;
            char_pos += line[mat.start()..mat.end()].chars().count();
            byte_pos = mat.end();
            spans.push(Span {
                start,
                end: char_pos,
            });
        }

        spans
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/pattern.rs"]
mod tests;
