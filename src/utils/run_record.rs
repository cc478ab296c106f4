//! 评价记录文件
//!
//! 每处理完一位老师追加一行，写失败只记日志，不影响评价流程

use chrono::Local;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{AppError, AppResult};

pub struct RunRecord {
    path: String,
}

impl RunRecord {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// 清空文件并写入带时间的标题
    pub async fn start(&self) -> AppResult<()> {
        let header = format!(
            "{}\n批量评教记录 - {}\n{}\n\n",
            "=".repeat(60),
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            "=".repeat(60)
        );
        tokio::fs::write(&self.path, header)
            .await
            .map_err(|e| AppError::file(&self.path, e))
    }

    /// 追加一行：`时间 | 教师 | 结果`
    pub async fn append(&self, teacher: &str, result: &str) -> AppResult<()> {
        debug!("写入评价记录: {} | {}", teacher, result);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| AppError::file(&self.path, e))?;

        let line = format!(
            "{} | {} | {}\n",
            Local::now().format("%H:%M:%S"),
            teacher,
            result
        );
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| AppError::file(&self.path, e))
    }
}
