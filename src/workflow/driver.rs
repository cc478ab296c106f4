//! 评价驱动器 - 流程层
//!
//! 每一轮：
//! 1. 等待列表稳定
//! 2. 读取"未评价"的行，没有则结束
//! 3. 取第一行 → 点击评价 → 等待评分输入框
//! 4. 按打分策略填分 → 提交 → 等待 → 关闭弹窗
//!
//! 找不到按钮、输入框超时都只记日志并进入下一轮，唯一的正常出口是"没有待评价的行"。

use std::collections::HashMap;
use std::future::Future;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::DriverConfig;
use crate::error::AppResult;
use crate::models::{InputWrite, TableRow};
use crate::page::EvaluationPage;
use crate::polling::{poll_for_items, poll_until};
use crate::scoring::ScoringStrategy;
use crate::utils::RunRecord;
use crate::workflow::outcome::{RowOutcome, RunSummary};
use crate::workflow::row_ctx::RowCtx;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Finished,
}

/// 评价驱动器
///
/// - 只通过 [`EvaluationPage`] 操作页面，不认识任何选择器
/// - 分数由 [`ScoringStrategy`] 决定
/// - 严格顺序执行，同一时刻只有一个操作在进行
pub struct EvaluationDriver<P, S> {
    page: P,
    scoring: S,
    config: DriverConfig,
    record: Option<RunRecord>,
    attempts: HashMap<String, u32>,
}

impl<P, S> EvaluationDriver<P, S>
where
    P: EvaluationPage,
    S: ScoringStrategy,
{
    pub fn new(page: P, scoring: S, config: DriverConfig) -> Self {
        Self {
            page,
            scoring,
            config,
            record: None,
            attempts: HashMap::new(),
        }
    }

    /// 每处理完一行，向记录文件追加一行结果
    pub fn with_record(mut self, record: RunRecord) -> Self {
        self.record = Some(record);
        self
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// 运行直到没有待评价的行
    pub async fn run(&mut self) -> AppResult<RunSummary> {
        self.run_until(std::future::pending()).await
    }

    /// 运行直到没有待评价的行，或 `shutdown` 完成
    ///
    /// 读取表格失败时返回错误；单行处理中的错误不会中断运行
    pub async fn run_until<F>(&mut self, shutdown: F) -> AppResult<RunSummary>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut summary = RunSummary::default();

        loop {
            let step = tokio::select! {
                biased;
                _ = &mut shutdown => None,
                step = self.step(&mut summary) => Some(step?),
            };

            match step {
                None => {
                    warn!("⏹ 收到停止信号，评价中断");
                    summary.interrupted = true;
                    return Ok(summary);
                }
                Some(Step::Finished) => return Ok(summary),
                Some(Step::Continue) => {}
            }
        }
    }

    async fn step(&mut self, summary: &mut RunSummary) -> AppResult<Step> {
        sleep(self.config.settle_delay).await;

        let pending = self.page.list_pending_rows().await?;
        if pending.is_empty() {
            info!("\n✅ 所有老师均已评价完成！程序结束。");
            return Ok(Step::Finished);
        }

        let Some(row) = self.select_row(&pending) else {
            summary.abandoned = pending.iter().map(TableRow::display_name).collect();
            warn!(
                "⚠️ 剩余 {} 位老师均已达到尝试上限，放弃: {}",
                pending.len(),
                summary.abandoned.join("、")
            );
            return Ok(Step::Finished);
        };

        let name = row.display_name();
        let attempt = self.bump_attempt(&name);
        let ctx = RowCtx::new(name, pending.len(), attempt);
        summary.iterations += 1;

        info!("\n👉 (剩余 {} 位) 开始评价：{}", ctx.remaining, ctx.name);
        if ctx.attempt > 1 {
            debug!("{} 重新尝试", ctx);
        }

        let outcome = match self.process_row(&row, &ctx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("{} ❌ 处理过程中发生错误: {}", ctx, e);
                self.dismiss_quietly().await;
                sleep(self.config.post_action_cooldown).await;
                RowOutcome::Failed(e.to_string())
            }
        };

        summary.record(&outcome);
        self.write_record(&ctx, &outcome).await;
        Ok(Step::Continue)
    }

    /// 第一个未超过尝试上限的待评价行，上限为 0 视为不限
    fn select_row(&self, pending: &[TableRow]) -> Option<TableRow> {
        match self.config.max_attempts_per_row.filter(|&n| n > 0) {
            None => pending.first().cloned(),
            Some(limit) => pending
                .iter()
                .find(|row| self.attempts.get(&row.display_name()).copied().unwrap_or(0) < limit)
                .cloned(),
        }
    }

    fn bump_attempt(&mut self, name: &str) -> u32 {
        let count = self.attempts.entry(name.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    async fn process_row(&mut self, row: &TableRow, ctx: &RowCtx) -> AppResult<RowOutcome> {
        let cooldown = self.config.post_action_cooldown;

        // 1. 点击评价按钮（读表时已知没有按钮的行不再点击）
        if !row.has_action || !self.page.open_review(row).await? {
            error!("❌ 找不到 {} 的评价按钮，本次跳过。", ctx.name);
            sleep(cooldown).await;
            return Ok(RowOutcome::MissingAction);
        }

        // 2. 等待评分输入框出现
        sleep(self.config.dialog_open_delay).await;
        let page = &self.page;
        let inputs = poll_for_items(self.config.poll_interval, self.config.input_timeout, || {
            page.find_rating_inputs()
        })
        .await?;

        if inputs.is_empty() {
            warn!(
                "⚠️ 找不到 {} 的评分输入框（{}秒超时），跳过.",
                ctx.name,
                self.config.input_timeout.as_secs_f64()
            );
            self.dismiss_quietly().await;
            sleep(cooldown).await;
            return Ok(RowOutcome::NoInputs);
        }

        // 3. 填写分数
        let sheet = self.scoring.score(inputs.len());
        if sheet.len() != inputs.len() {
            error!(
                "{} ❌ 打分策略给出 {} 个分数，但有 {} 个评分项，本次不提交",
                ctx,
                sheet.len(),
                inputs.len()
            );
            self.dismiss_quietly().await;
            sleep(cooldown).await;
            return Ok(RowOutcome::Failed(format!(
                "分数数量 {} 与评分项数量 {} 不一致",
                sheet.len(),
                inputs.len()
            )));
        }
        for (input, &score) in inputs.iter().zip(&sheet.scores) {
            match self.page.set_rating_value(input, score).await? {
                InputWrite::Applied => {
                    if self.config.verbose_logging {
                        info!("{}   {}. {} = {}", ctx, input.index + 1, input.label, score);
                    }
                }
                InputWrite::ReadOnly => {
                    warn!("{} ⚠️ 第 {} 项为只读，未修改", ctx, input.index + 1);
                }
                InputWrite::Missing => {
                    warn!("{} ⚠️ 第 {} 项输入框已消失", ctx, input.index + 1);
                }
            }
        }

        match sheet.docked_index.and_then(|i| sheet.scores.get(i).map(|s| (i, s))) {
            Some((i, score)) => info!(
                "✔ 分数模拟完成，共 {} 项。随机给第 {} 项打了 {} 分。",
                sheet.len(),
                i + 1,
                score
            ),
            None => info!("✔ 分数模拟完成，共 {} 项（{}）。", sheet.len(), self.scoring.name()),
        }
        sleep(self.config.pre_submit_delay).await;

        // 4. 提交
        if !self.page.submit().await? {
            error!("❌ 找不到提交按钮！跳过本轮评价.");
            self.dismiss_quietly().await;
            sleep(cooldown).await;
            return Ok(RowOutcome::MissingSubmit);
        }
        info!("✔ 已点击提交按钮");

        // 5. 不查找确认框，留给系统自动处理或用户手动确认
        info!("⏸ 等待 {} 秒后继续...", cooldown.as_secs_f64());
        sleep(cooldown).await;

        self.close_dialog().await;
        Ok(RowOutcome::Submitted)
    }

    /// 尝试点击关闭按钮，失败或不存在都忽略
    async fn dismiss_quietly(&self) {
        match self.page.dismiss().await {
            Ok(true) => debug!("已点击弹窗关闭按钮"),
            Ok(false) => debug!("弹窗关闭按钮不存在"),
            Err(e) => debug!("关闭弹窗失败: {}", e),
        }
    }

    /// 关闭弹窗并等待它消失，超时不算失败
    async fn close_dialog(&self) {
        self.dismiss_quietly().await;

        let page = &self.page;
        let closed = poll_until(
            self.config.poll_interval,
            self.config.dialog_close_timeout,
            || async move { Ok((!page.dialog_visible().await?).then_some(())) },
        )
        .await;

        match closed {
            Ok(Some(())) => {}
            Ok(None) => debug!("弹窗在 {:?} 内未关闭", self.config.dialog_close_timeout),
            Err(e) => debug!("检查弹窗状态失败: {}", e),
        }
    }

    async fn write_record(&self, ctx: &RowCtx, outcome: &RowOutcome) {
        if let Some(record) = &self.record {
            if let Err(e) = record.append(&ctx.name, &outcome.describe()).await {
                warn!("⚠️ 写入评价记录失败: {}", e);
            }
        }
    }
}
