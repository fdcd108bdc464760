//! 逐行匹配
//!
//! 文件按字节逐行读取，无效 UTF-8 以替换字符解码；支持 `\n`、`\r\n` 和单独的 `\r` 换行。
//! 同一行的多个匹配各生成一个 `Match`，共享同一份 `line_text`。

use super::pattern::CompiledPattern;
use super::task::CancelToken;
use crate::kernel::services::ports::Match;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

const PREVIEW_SIZE: usize = 8192;

#[derive(Debug, PartialEq, Eq)]
pub enum FileOutcome {
    /// 文件完整读完，可能没有匹配
    Scanned(Vec<Match>),
    /// 疑似二进制文件，未搜索
    Binary,
    Cancelled,
}

pub fn is_likely_binary(content: &[u8]) -> bool {
    memchr::memchr(0, content).is_some()
}

pub struct LineMatcher<'a> {
    pattern: &'a CompiledPattern,
    cancel: Option<&'a CancelToken>,
}

impl<'a> LineMatcher<'a> {
    pub fn new(pattern: &'a CompiledPattern) -> Self {
        Self {
            pattern,
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, cancel: &'a CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn match_file(&self, path: &Path) -> io::Result<FileOutcome> {
        let mut file = File::open(path)?;

        let mut preview = [0u8; PREVIEW_SIZE];
        let preview_len = read_full(&mut file, &mut preview)?;
        if is_likely_binary(&preview[..preview_len]) {
            return Ok(FileOutcome::Binary);
        }

        let reader = BufReader::new(io::Cursor::new(&preview[..preview_len]).chain(file));
        self.match_reader(path, reader)
    }

    pub fn match_reader<R: BufRead>(&self, path: &Path, mut reader: R) -> io::Result<FileOutcome> {
        let mut matches = Vec::new();
        let mut buf = Vec::new();
        let mut line_number = 0usize;

        loop {
            if self.is_cancelled() {
                return Ok(FileOutcome::Cancelled);
            }

            buf.clear();
            let n = reader.read_until(b'\n', &mut buf)?;
            if n == 0 {
                break;
            }

            let chunk = buf.strip_suffix(b"\n").unwrap_or(&buf);
            let chunk = chunk.strip_suffix(b"\r").unwrap_or(chunk);
            // 单独的 `\r` 也是换行
            for raw in chunk.split(|&b| b == b'\r') {
                line_number += 1;
                let line = String::from_utf8_lossy(raw);
                self.match_line(path, line_number, &line, &mut matches);
            }
        }

        Ok(FileOutcome::Scanned(matches))
    }

    fn match_line(&self, path: &Path, line_number: usize, line: &str, out: &mut Vec<Match>) {
        let spans = self.pattern.find_spans(line);
        if spans.is_empty() {
            return;
        }
        out.reserve(spans.len());
        for span in spans {
            out.push(Match {
                file_path: path.to_path_buf(),
                line_number,
                line_text: line.to_string(),
                match_start: span.start,
                match_end: span.end,
            });
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(CancelToken::is_cancelled)
    }
}

fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0usize;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/line_matcher.rs"]
mod tests;
