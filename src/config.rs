//! 程序配置
//!
//! 加载顺序：内置默认值 → `evaluate.toml`（可由 `EVAL_CONFIG` 指定路径）→ 环境变量

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_FILE: &str = "evaluate.toml";

/// 打分策略
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// 随机挑一项扣分，其余满分
    #[default]
    DockOneAtRandom,
    /// 全部满分
    FullMarks,
}

impl FromStr for ScoringMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dock_one_at_random" => Ok(ScoringMode::DockOneAtRandom),
            "full_marks" => Ok(ScoringMode::FullMarks),
            _ => Err(()),
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 目标页面 URL（用于匹配已打开的标签页，找不到时新开）
    pub target_url: Option<String>,
    /// 目标页面标题关键字
    pub target_title: Option<String>,
    /// 查找间隔
    pub poll_interval_ms: u64,
    /// 评分输入框查找容错时间
    pub input_timeout_ms: u64,
    /// 提交/跳过后等待进入下一轮的时间
    pub post_action_cooldown_ms: u64,
    /// 每轮开始前等待列表稳定的时间
    pub settle_delay_ms: u64,
    /// 点击评价按钮后的初始等待
    pub dialog_open_delay_ms: u64,
    /// 填完分数到点击提交之间的等待
    pub pre_submit_delay_ms: u64,
    /// 关闭弹窗后等待其消失的最长时间
    pub dialog_close_timeout_ms: u64,
    pub max_score: u8,
    pub docked_score: u8,
    pub scoring_mode: ScoringMode,
    /// 单个老师最多尝试次数，`None` 表示不限
    pub max_attempts_per_row: Option<u32>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_debug_port: 9222,
            target_url: None,
            target_title: None,
            poll_interval_ms: 200,
            input_timeout_ms: 8000,
            post_action_cooldown_ms: 4000,
            settle_delay_ms: 500,
            dialog_open_delay_ms: 500,
            pre_submit_delay_ms: 500,
            dialog_close_timeout_ms: 1000,
            max_score: 10,
            docked_score: 9,
            scoring_mode: ScoringMode::default(),
            max_attempts_per_row: None,
            verbose_logging: false,
            output_log_file: "evaluate_log.txt".to_string(),
        }
    }
}

impl Config {
    /// 按默认顺序加载配置：配置文件（存在时）+ 环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("EVAL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let base = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        let config = base.with_env_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件读取，缺省字段取默认值
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::FileParseFailed {
            path: path.display().to_string(),
            source,
        })?;
        // 与环境变量一致：0 表示不限次数
        config.max_attempts_per_row = config.max_attempts_per_row.filter(|&n| n > 0);
        Ok(config)
    }

    /// 用环境变量覆盖配置项
    ///
    /// `lookup` 通常是 `std::env::var`，测试中可以传入固定表
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvReader { lookup };

        env.parse("BROWSER_DEBUG_PORT", "u16", &mut self.browser_debug_port)?;
        if let Some(url) = env.string("TARGET_URL") {
            self.target_url = Some(url);
        }
        if let Some(title) = env.string("TARGET_TITLE") {
            self.target_title = Some(title);
        }
        env.parse("POLL_INTERVAL_MS", "u64", &mut self.poll_interval_ms)?;
        env.parse("INPUT_TIMEOUT_MS", "u64", &mut self.input_timeout_ms)?;
        env.parse("POST_ACTION_COOLDOWN_MS", "u64", &mut self.post_action_cooldown_ms)?;
        env.parse("SETTLE_DELAY_MS", "u64", &mut self.settle_delay_ms)?;
        env.parse("DIALOG_OPEN_DELAY_MS", "u64", &mut self.dialog_open_delay_ms)?;
        env.parse("PRE_SUBMIT_DELAY_MS", "u64", &mut self.pre_submit_delay_ms)?;
        env.parse("DIALOG_CLOSE_TIMEOUT_MS", "u64", &mut self.dialog_close_timeout_ms)?;
        env.parse("MAX_SCORE", "u8", &mut self.max_score)?;
        env.parse("DOCKED_SCORE", "u8", &mut self.docked_score)?;
        env.parse("SCORING_MODE", "dock_one_at_random | full_marks", &mut self.scoring_mode)?;
        if let Some(raw) = env.string("MAX_ATTEMPTS_PER_ROW") {
            self.max_attempts_per_row = match raw.trim() {
                "" | "0" | "none" => None,
                value => Some(value.parse().map_err(|_| ConfigError::EnvVarParseFailed {
                    var_name: "MAX_ATTEMPTS_PER_ROW".to_string(),
                    value: raw.clone(),
                    expected_type: "u32".to_string(),
                })?),
            };
        }
        env.parse("VERBOSE_LOGGING", "bool", &mut self.verbose_logging)?;
        if let Some(path) = env.string("OUTPUT_LOG_FILE") {
            self.output_log_file = path;
        }

        Ok(self)
    }

    /// 检查配置项之间的约束
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::invalid("poll_interval_ms", "查找间隔必须大于 0"));
        }
        if self.docked_score > self.max_score {
            return Err(ConfigError::invalid(
                "docked_score",
                format!("扣分项分数 {} 不能高于满分 {}", self.docked_score, self.max_score),
            ));
        }
        if self.max_score == 0 {
            return Err(ConfigError::invalid("max_score", "满分必须大于 0"));
        }
        Ok(())
    }

    /// 驱动循环使用的时间参数
    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            input_timeout: Duration::from_millis(self.input_timeout_ms),
            post_action_cooldown: Duration::from_millis(self.post_action_cooldown_ms),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            dialog_open_delay: Duration::from_millis(self.dialog_open_delay_ms),
            pre_submit_delay: Duration::from_millis(self.pre_submit_delay_ms),
            dialog_close_timeout: Duration::from_millis(self.dialog_close_timeout_ms),
            max_attempts_per_row: self.max_attempts_per_row.filter(|&n| n > 0),
            verbose_logging: self.verbose_logging,
        }
    }
}

/// 评价驱动器的时间与重试参数
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    pub poll_interval: Duration,
    pub input_timeout: Duration,
    pub post_action_cooldown: Duration,
    pub settle_delay: Duration,
    pub dialog_open_delay: Duration,
    pub pre_submit_delay: Duration,
    pub dialog_close_timeout: Duration,
    pub max_attempts_per_row: Option<u32>,
    pub verbose_logging: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Config::default().driver_config()
    }
}

struct EnvReader<F> {
    lookup: F,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn string(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
    }

    fn parse<T: FromStr>(&self, name: &str, expected: &str, slot: &mut T) -> Result<(), ConfigError> {
        if let Some(raw) = self.string(name) {
            *slot = raw.trim().parse().map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: name.to_string(),
                value: raw.clone(),
                expected_type: expected.to_string(),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_match_fixed_timings() {
        let driver = Config::default().driver_config();
        assert_eq!(driver.poll_interval, Duration::from_millis(200));
        assert_eq!(driver.input_timeout, Duration::from_millis(8000));
        assert_eq!(driver.post_action_cooldown, Duration::from_millis(4000));
        assert_eq!(driver.settle_delay, Duration::from_millis(500));
        assert_eq!(driver.max_attempts_per_row, None);
    }

    #[test]
    fn env_overrides_apply() {
        let config = Config::default()
            .with_env_overrides(env(&[
                ("INPUT_TIMEOUT_MS", "3000"),
                ("TARGET_URL", "https://jw.example.edu/pj"),
                ("SCORING_MODE", "full_marks"),
                ("MAX_ATTEMPTS_PER_ROW", "3"),
                ("VERBOSE_LOGGING", "true"),
            ]))
            .unwrap();

        assert_eq!(config.input_timeout_ms, 3000);
        assert_eq!(config.target_url.as_deref(), Some("https://jw.example.edu/pj"));
        assert_eq!(config.scoring_mode, ScoringMode::FullMarks);
        assert_eq!(config.max_attempts_per_row, Some(3));
        assert!(config.verbose_logging);
        assert_eq!(config.poll_interval_ms, 200);
    }

    #[test]
    fn bad_env_value_is_reported() {
        let err = Config::default()
            .with_env_overrides(env(&[("POLL_INTERVAL_MS", "fast")]))
            .unwrap_err();
        match err {
            ConfigError::EnvVarParseFailed { var_name, value, .. } => {
                assert_eq!(var_name, "POLL_INTERVAL_MS");
                assert_eq!(value, "fast");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_attempt_limit_means_unbounded() {
        let config = Config::default()
            .with_env_overrides(env(&[("MAX_ATTEMPTS_PER_ROW", "0")]))
            .unwrap();
        assert_eq!(config.max_attempts_per_row, None);
    }

    #[test]
    fn validate_rejects_inverted_scores() {
        let config = Config {
            docked_score: 11,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));

        let config = Config {
            poll_interval_ms: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn file_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evaluate.toml");
        std::fs::write(
            &path,
            "browser_debug_port = 2001\ntarget_title = \"评教\"\nscoring_mode = \"full_marks\"\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.browser_debug_port, 2001);
        assert_eq!(config.target_title.as_deref(), Some("评教"));
        assert_eq!(config.scoring_mode, ScoringMode::FullMarks);
        assert_eq!(config.input_timeout_ms, 8000);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evaluate.toml");
        std::fs::write(&path, "max_score = \"ten\"").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::FileParseFailed { .. })
        ));
    }

    #[test]
    fn zero_attempt_limit_in_file_means_unbounded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evaluate.toml");
        std::fs::write(&path, "max_attempts_per_row = 0\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.max_attempts_per_row, None);
        assert!(config.validate().is_ok());
        assert_eq!(config.driver_config().max_attempts_per_row, None);

        let set_directly = Config {
            max_attempts_per_row: Some(0),
            ..Config::default()
        };
        assert_eq!(set_directly.driver_config().max_attempts_per_row, None);
    }
}
