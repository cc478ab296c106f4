//! 内存中的评教页面，用于驱动器测试

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use teacher_eval::{AppError, AppResult, EvaluationPage, InputWrite, RatingInput, TableRow};
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct MockRow {
    pub name: String,
    pub reviewed: bool,
    pub has_action: bool,
    /// 读表时有评价按钮，点击时已消失
    pub stale_action: bool,
    /// 弹窗中合格输入框的数量
    pub inputs: usize,
    /// 列出后在写入时变成只读的输入框
    pub read_only: Vec<usize>,
    pub has_submit: bool,
}

impl MockRow {
    pub fn pending(name: &str, inputs: usize) -> Self {
        Self {
            name: name.to_string(),
            reviewed: false,
            has_action: true,
            stale_action: false,
            inputs,
            read_only: Vec::new(),
            has_submit: true,
        }
    }

    pub fn reviewed(name: &str) -> Self {
        Self {
            reviewed: true,
            ..Self::pending(name, 3)
        }
    }

    pub fn without_action(mut self) -> Self {
        self.has_action = false;
        self
    }

    pub fn with_stale_action(mut self) -> Self {
        self.stale_action = true;
        self
    }

    pub fn without_submit(mut self) -> Self {
        self.has_submit = false;
        self
    }

    pub fn with_read_only(mut self, index: usize) -> Self {
        self.read_only.push(index);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Open(String),
    Find,
    Set { index: usize, value: u8 },
    Submit,
    Dismiss,
}

#[derive(Debug, Default)]
struct State {
    rows: Vec<MockRow>,
    open: Option<usize>,
    /// 弹窗打开后，前几次查找返回空
    inputs_delay: usize,
    finds_since_open: usize,
    /// 当前弹窗的输入框取值，`None` 为未写入
    values: Vec<Option<u8>>,
    submitted_values: Vec<(String, Vec<Option<u8>>)>,
    calls: Vec<(Instant, Call)>,
    submit_marks_reviewed: bool,
    fail_next_find: bool,
    fail_list: bool,
}

pub struct MockPage {
    state: Mutex<State>,
}

fn script_error() -> AppError {
    AppError::PageData(serde_json::from_str::<u8>("页面已刷新").unwrap_err())
}

impl MockPage {
    pub fn new(rows: Vec<MockRow>) -> Self {
        Self {
            state: Mutex::new(State {
                rows,
                submit_marks_reviewed: true,
                ..State::default()
            }),
        }
    }

    /// 提交后不把行标记为已评价（模拟提交静默失败）
    pub fn submit_has_no_effect(self) -> Self {
        self.state.lock().unwrap().submit_marks_reviewed = false;
        self
    }

    pub fn inputs_appear_after(self, finds: usize) -> Self {
        self.state.lock().unwrap().inputs_delay = finds;
        self
    }

    pub fn fail_next_find(self) -> Self {
        self.state.lock().unwrap().fail_next_find = true;
        self
    }

    pub fn fail_list(self) -> Self {
        self.state.lock().unwrap().fail_list = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn timed_calls(&self) -> Vec<(Instant, Call)> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn opened(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Open(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn submitted_values(&self) -> Vec<(String, Vec<Option<u8>>)> {
        self.state.lock().unwrap().submitted_values.clone()
    }

    pub fn current_values(&self) -> Vec<Option<u8>> {
        self.state.lock().unwrap().values.clone()
    }

    pub fn dialog_open(&self) -> bool {
        self.state.lock().unwrap().open.is_some()
    }

    fn log(state: &mut State, call: Call) {
        state.calls.push((Instant::now(), call));
    }
}

#[async_trait]
impl EvaluationPage for MockPage {
    async fn list_rows(&self) -> AppResult<Vec<TableRow>> {
        let state = self.state.lock().unwrap();
        if state.fail_list {
            return Err(script_error());
        }
        Ok(state
            .rows
            .iter()
            .enumerate()
            .map(|(index, r)| TableRow {
                index,
                name: r.name.clone(),
                status: if r.reviewed { "已评价" } else { "未评价" }.to_string(),
                has_action: r.has_action,
            })
            .collect())
    }

    async fn open_review(&self, row: &TableRow) -> AppResult<bool> {
        let mut state = self.state.lock().unwrap();
        let target = state.rows[row.index].clone();
        Self::log(&mut state, Call::Open(target.name.clone()));
        if !target.has_action || target.stale_action {
            return Ok(false);
        }
        state.open = Some(row.index);
        state.finds_since_open = 0;
        state.values = vec![None; target.inputs];
        Ok(true)
    }

    async fn find_rating_inputs(&self) -> AppResult<Vec<RatingInput>> {
        let mut state = self.state.lock().unwrap();
        Self::log(&mut state, Call::Find);
        if state.fail_next_find {
            state.fail_next_find = false;
            return Err(script_error());
        }
        let Some(open) = state.open else {
            return Ok(Vec::new());
        };
        state.finds_since_open += 1;
        if state.finds_since_open <= state.inputs_delay {
            return Ok(Vec::new());
        }
        Ok((0..state.rows[open].inputs)
            .map(|index| RatingInput {
                index,
                label: format!("评分项{}", index + 1),
            })
            .collect())
    }

    async fn set_rating_value(&self, input: &RatingInput, value: u8) -> AppResult<InputWrite> {
        let mut state = self.state.lock().unwrap();
        let Some(open) = state.open else {
            return Ok(InputWrite::Missing);
        };
        if state.rows[open].read_only.contains(&input.index) {
            return Ok(InputWrite::ReadOnly);
        }
        Self::log(
            &mut state,
            Call::Set {
                index: input.index,
                value,
            },
        );
        match state.values.get_mut(input.index) {
            Some(slot) => {
                *slot = Some(value);
                Ok(InputWrite::Applied)
            }
            None => Ok(InputWrite::Missing),
        }
    }

    async fn submit(&self) -> AppResult<bool> {
        let mut state = self.state.lock().unwrap();
        Self::log(&mut state, Call::Submit);
        let Some(open) = state.open else {
            return Ok(false);
        };
        if !state.rows[open].has_submit {
            return Ok(false);
        }
        let name = state.rows[open].name.clone();
        let values = state.values.clone();
        state.submitted_values.push((name, values));
        if state.submit_marks_reviewed {
            state.rows[open].reviewed = true;
        }
        Ok(true)
    }

    async fn dismiss(&self) -> AppResult<bool> {
        let mut state = self.state.lock().unwrap();
        Self::log(&mut state, Call::Dismiss);
        Ok(state.open.take().is_some())
    }

    async fn dialog_visible(&self) -> AppResult<bool> {
        Ok(self.state.lock().unwrap().open.is_some())
    }
}
