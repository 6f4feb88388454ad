//! 短码生成
//!
//! 随机生成 6 位短码并查库去重，最多尝试 5 次。与固定路由同名的候选
//! （例如 `health`）视为冲突。
//!
//! 查重与插入不是原子操作：两个并发的创建请求都可能通过查重，最终由
//! short_code 的唯一约束裁决，失败的一方在插入时得到 `QrError::Conflict`。
//! 这里的查重只是减少冲突的提示，不能替代唯一约束。

use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::{QrError, Result};
use crate::storage::ShortCodeLookup;
use crate::utils::{SHORT_CODE_LENGTH, generate_random_code, is_route_segment};

/// 最大尝试次数（含第一次）
pub const MAX_ATTEMPTS: usize = 5;

#[derive(Clone)]
pub struct ShortCodeGenerator {
    lookup: Arc<dyn ShortCodeLookup>,
    length: usize,
    max_attempts: usize,
    candidates: fn(usize) -> String,
}

impl ShortCodeGenerator {
    pub fn new(lookup: Arc<dyn ShortCodeLookup>) -> Self {
        Self {
            lookup,
            length: SHORT_CODE_LENGTH,
            max_attempts: MAX_ATTEMPTS,
            candidates: generate_random_code,
        }
    }

    #[cfg(test)]
    fn with_candidates(lookup: Arc<dyn ShortCodeLookup>, candidates: fn(usize) -> String) -> Self {
        Self {
            candidates,
            ..Self::new(lookup)
        }
    }

    /// 生成一个当前未被占用的短码
    ///
    /// 全部候选都冲突时返回 `QrError::CodeExhausted`，不会退化为更长的短码。
    pub async fn generate(&self) -> Result<String> {
        for attempt in 1..=self.max_attempts {
            let candidate = (self.candidates)(self.length);
            if is_route_segment(&candidate) {
                debug!("Short code {} shadowed by a route (attempt {})", candidate, attempt);
                continue;
            }
            if !self.lookup.short_code_exists(&candidate).await? {
                debug!("Generated short code {} (attempt {})", candidate, attempt);
                return Ok(candidate);
            }
            debug!("Short code collision on {} (attempt {})", candidate, attempt);
        }

        warn!(
            "Failed to generate a unique short code after {} attempts",
            self.max_attempts
        );
        Err(QrError::code_exhausted(format!(
            "Failed to generate unique code after {} attempts",
            self.max_attempts
        )))
    }
}
