/// 处理一行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// 已点击提交
    Submitted,
    /// 找不到评价按钮
    MissingAction,
    /// 超时未找到评分输入框
    NoInputs,
    /// 找不到提交按钮
    MissingSubmit,
    /// 页面脚本执行出错
    Failed(String),
}

impl RowOutcome {
    pub fn describe(&self) -> String {
        match self {
            RowOutcome::Submitted => "已提交".to_string(),
            RowOutcome::MissingAction => "找不到评价按钮".to_string(),
            RowOutcome::NoInputs => "未找到评分输入框".to_string(),
            RowOutcome::MissingSubmit => "找不到提交按钮".to_string(),
            RowOutcome::Failed(reason) => format!("出错: {}", reason),
        }
    }
}

/// 一次运行的统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub iterations: usize,
    pub submitted: usize,
    pub missing_action: usize,
    pub no_inputs: usize,
    pub missing_submit: usize,
    pub failed: usize,
    /// 超过尝试次数上限而放弃的老师
    pub abandoned: Vec<String>,
    /// 是否被停止信号中断
    pub interrupted: bool,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Submitted => self.submitted += 1,
            RowOutcome::MissingAction => self.missing_action += 1,
            RowOutcome::NoInputs => self.no_inputs += 1,
            RowOutcome::MissingSubmit => self.missing_submit += 1,
            RowOutcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn skipped(&self) -> usize {
        self.missing_action + self.no_inputs + self.missing_submit + self.failed
    }

    /// 表格中已没有待评价的行
    pub fn is_complete(&self) -> bool {
        self.abandoned.is_empty() && !self.interrupted
    }
}
