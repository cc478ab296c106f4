//! 单行处理上下文
//!
//! 封装"正在评价哪位老师、第几次尝试"这一信息

use std::fmt::Display;

#[derive(Debug, Clone)]
pub struct RowCtx {
    /// 教师显示名
    pub name: String,
    /// 本轮开始时剩余的待评价人数（含当前这位）
    pub remaining: usize,
    /// 本次运行中对该老师的第几次尝试（从1开始）
    pub attempt: u32,
}

impl RowCtx {
    pub fn new(name: String, remaining: usize, attempt: u32) -> Self {
        Self {
            name,
            remaining,
            attempt,
        }
    }
}

impl Display for RowCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.attempt > 1 {
            write!(f, "[{} 第{}次]", self.name, self.attempt)
        } else {
            write!(f, "[{}]", self.name)
        }
    }
}
