use serde::Deserialize;

/// 弹窗中的一个评分输入框，只以它在合格输入框列表中的位置标识
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RatingInput {
    pub index: usize,
    /// 评分项标签文本
    #[serde(default)]
    pub label: String,
}

/// 写入一个输入框的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputWrite {
    /// 已写入并触发 input / change 事件
    Applied,
    /// 输入框只读，未改动
    ReadOnly,
    /// 输入框已不存在（弹窗被重新渲染或关闭）
    Missing,
}

/// 打分策略给出的一组分数，与输入框一一对应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSheet {
    pub scores: Vec<u8>,
    /// 被扣分的输入框位置
    pub docked_index: Option<usize>,
}

impl ScoreSheet {
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
