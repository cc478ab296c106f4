use serde::Deserialize;

/// "未评价"状态标记
pub const PENDING_MARKER: &str = "未评价";

/// 表格中的一行（一位老师），每轮重新读取，不做缓存
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// 在所有表格行中的位置（文档顺序）
    pub index: usize,
    /// 教师姓名，页面上为空时为空串
    #[serde(default)]
    pub name: String,
    /// 状态单元格文本
    #[serde(default)]
    pub status: String,
    /// 是否有评价按钮
    #[serde(default)]
    pub has_action: bool,
}

impl TableRow {
    /// 状态文本包含"未评价"即视为待评价
    pub fn is_pending(&self) -> bool {
        self.status.contains(PENDING_MARKER)
    }

    /// 用于日志和尝试计数的显示名
    pub fn display_name(&self) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            format!("教师 {}", self.index + 1)
        } else {
            name.to_string()
        }
    }
}
