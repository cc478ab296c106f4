//! 打分策略
//!
//! 驱动器只拿到一组分数，不关心分数怎么来的

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{Config, ScoringMode};
use crate::models::ScoreSheet;

/// 为一个弹窗里的 `count` 个评分项给出分数
pub trait ScoringStrategy: Send {
    fn name(&self) -> &'static str;

    fn score(&mut self, count: usize) -> ScoreSheet;
}

impl<S: ScoringStrategy + ?Sized> ScoringStrategy for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn score(&mut self, count: usize) -> ScoreSheet {
        (**self).score(count)
    }
}

/// 随机挑一项打 `docked_score`，其余打 `max_score`
pub struct DockOneAtRandom<R = StdRng> {
    rng: R,
    max_score: u8,
    docked_score: u8,
}

impl DockOneAtRandom<StdRng> {
    pub fn new(max_score: u8, docked_score: u8) -> Self {
        Self::with_rng(StdRng::from_os_rng(), max_score, docked_score)
    }
}

impl<R: Rng> DockOneAtRandom<R> {
    pub fn with_rng(rng: R, max_score: u8, docked_score: u8) -> Self {
        Self {
            rng,
            max_score,
            docked_score,
        }
    }
}

impl<R: Rng + Send> ScoringStrategy for DockOneAtRandom<R> {
    fn name(&self) -> &'static str {
        "随机一项扣分"
    }

    fn score(&mut self, count: usize) -> ScoreSheet {
        if count == 0 {
            return ScoreSheet {
                scores: Vec::new(),
                docked_index: None,
            };
        }

        let docked = self.rng.random_range(0..count);
        let scores = (0..count)
            .map(|i| if i == docked { self.docked_score } else { self.max_score })
            .collect();

        ScoreSheet {
            scores,
            docked_index: Some(docked),
        }
    }
}

/// 全部满分
pub struct FullMarks {
    max_score: u8,
}

impl FullMarks {
    pub fn new(max_score: u8) -> Self {
        Self { max_score }
    }
}

impl ScoringStrategy for FullMarks {
    fn name(&self) -> &'static str {
        "全部满分"
    }

    fn score(&mut self, count: usize) -> ScoreSheet {
        ScoreSheet {
            scores: vec![self.max_score; count],
            docked_index: None,
        }
    }
}

/// 按配置创建打分策略
pub fn strategy_from_config(config: &Config) -> Box<dyn ScoringStrategy> {
    match config.scoring_mode {
        ScoringMode::DockOneAtRandom => {
            Box::new(DockOneAtRandom::new(config.max_score, config.docked_score))
        }
        ScoringMode::FullMarks => Box::new(FullMarks::new(config.max_score)),
    }
}
