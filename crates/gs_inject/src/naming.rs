// crates/gs_inject/src/naming.rs

//! 子区域命名
//!
//! 新子区域名为 `<父区域>##<id>`，已被占用时依次尝试
//! `<父区域>##<id>###1`、`###2` ……，最多 [`MAX_NAME_ATTEMPTS`] 次。

use crate::error::{InjectError, InjectResult};

/// 生成唯一名称的最大尝试次数
pub const MAX_NAME_ATTEMPTS: usize = 1000;

/// 生成未被占用的子区域名
pub fn unique_name<F>(parent: &str, id: &str, is_taken: F) -> InjectResult<String>
where
    F: Fn(&str) -> bool,
{
    let base = format!("{parent}##{id}");
    if !is_taken(&base) {
        return Ok(base);
    }
    for attempt in 1..MAX_NAME_ATTEMPTS {
        let candidate = format!("{base}###{attempt}");
        if !is_taken(&candidate) {
            return Ok(candidate);
        }
    }
    Err(InjectError::NameExhausted {
        base,
        attempts: MAX_NAME_ATTEMPTS,
    })
}
