use chrono::NaiveDate;
use chrono_tz::Tz;
use shared::{AppError, ErrorCode};
use std::time::Duration;
use thiserror::Error;

use crate::availability::{BlockingPolicy, PolicyError};
use crate::utils::time::{parse_timezone, today_in};

/// 引擎配置 - booking engine 的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | RENTAL_BLOCKING_STATUSES | pending,confirmed,completed | 占用日期的预订状态 |
/// | RENTAL_TIMEZONE | (系统本地时区) | 计算"今天"的 IANA 时区 |
/// | RENTAL_CURRENCY | USD | 价格显示货币 |
/// | RENTAL_PAYMENT_DELAY_MS | 2000 | 模拟支付延迟(毫秒) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 日志目录 |
///
/// # 示例
///
/// ```ignore
/// RENTAL_BLOCKING_STATUSES=confirmed RENTAL_TIMEZONE=Europe/Madrid cargo test
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// 哪些预订状态会占用日期
    pub blocking_policy: BlockingPolicy,
    /// "今天"所在时区，`None` 使用系统本地时区
    pub timezone: Option<Tz>,
    /// 价格显示货币代码
    pub currency: String,
    /// 模拟支付网关的延迟
    pub payment_delay_ms: u64,
    /// 日志级别
    pub log_level: String,
    /// 日志目录 (存在时写入滚动日志文件)
    pub log_dir: Option<String>,
}

/// Malformed configuration value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}: unknown reservation status '{value}'")]
    InvalidStatus { var: &'static str, value: String },

    #[error("{var}: at least one reservation status must block")]
    EmptyStatusList { var: &'static str },

    #[error("{var}: unknown time zone '{value}'")]
    InvalidTimezone { var: &'static str, value: String },

    #[error("{var}: expected a number, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::with_message(ErrorCode::ConfigError, err.to_string())
    }
}

const BLOCKING_STATUSES: &str = "RENTAL_BLOCKING_STATUSES";
const TIMEZONE: &str = "RENTAL_TIMEZONE";
const CURRENCY: &str = "RENTAL_CURRENCY";
const PAYMENT_DELAY_MS: &str = "RENTAL_PAYMENT_DELAY_MS";
const LOG_LEVEL: &str = "LOG_LEVEL";
const LOG_DIR: &str = "LOG_DIR";

const DEFAULT_CURRENCY: &str = "USD";
const DEFAULT_PAYMENT_DELAY_MS: u64 = 2000;
const DEFAULT_LOG_LEVEL: &str = "info";

impl EngineConfig {
    /// 从环境变量加载配置
    ///
    /// 无效值回退到默认值并记录警告
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::load(|var| std::env::var(var).ok(), false).unwrap_or_default()
    }

    /// 从环境变量加载配置，无效值返回错误
    pub fn try_from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::load(|var| std::env::var(var).ok(), true)
    }

    /// 从任意键值来源加载 (测试用)
    pub fn try_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Self::load(lookup, true)
    }

    /// 宽松加载：无效值回退到默认值
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::load(lookup, false).unwrap_or_default()
    }

    fn load(lookup: impl Fn(&str) -> Option<String>, strict: bool) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let blocking_policy = resolve(
            strict,
            lookup(BLOCKING_STATUSES)
                .map(|raw| {
                    BlockingPolicy::parse(&raw).map_err(|e| match e {
                        PolicyError::UnknownStatus(unknown) => ConfigError::InvalidStatus {
                            var: BLOCKING_STATUSES,
                            value: unknown.0,
                        },
                        PolicyError::Empty => ConfigError::EmptyStatusList {
                            var: BLOCKING_STATUSES,
                        },
                    })
                })
                .transpose(),
            defaults.blocking_policy,
        )?;

        let timezone = resolve(
            strict,
            lookup(TIMEZONE)
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| {
                    parse_timezone(&raw)
                        .map(Some)
                        .ok_or(ConfigError::InvalidTimezone {
                            var: TIMEZONE,
                            value: raw,
                        })
                })
                .transpose(),
            defaults.timezone,
        )?;

        let payment_delay_ms = resolve(
            strict,
            lookup(PAYMENT_DELAY_MS)
                .map(|raw| match raw.trim().parse::<u64>() {
                    Ok(ms) => Ok(ms),
                    Err(_) => Err(ConfigError::InvalidNumber {
                        var: PAYMENT_DELAY_MS,
                        value: raw,
                    }),
                })
                .transpose(),
            defaults.payment_delay_ms,
        )?;

        Ok(Self {
            blocking_policy,
            timezone,
            currency: lookup(CURRENCY)
                .map(|c| c.trim().to_ascii_uppercase())
                .filter(|c| !c.is_empty())
                .unwrap_or(defaults.currency),
            payment_delay_ms,
            log_level: lookup(LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: lookup(LOG_DIR).filter(|d| !d.trim().is_empty()),
        })
    }

    /// 使用指定的占用策略
    pub fn with_blocking_policy(mut self, policy: BlockingPolicy) -> Self {
        self.blocking_policy = policy;
        self
    }

    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.timezone = Some(tz);
        self
    }

    pub fn with_payment_delay(mut self, delay: Duration) -> Self {
        self.payment_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// 当前日历日 (配置时区)
    pub fn today(&self) -> NaiveDate {
        today_in(self.timezone)
    }

    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }
}

/// Parsed value, its default when unset, or the error (strict) / default with a warning
fn resolve<T>(strict: bool, parsed: Result<Option<T>, ConfigError>, default: T) -> Result<T, ConfigError> {
    match parsed {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Ok(default),
        Err(e) if strict => Err(e),
        Err(e) => {
            tracing::warn!("Invalid configuration, using default: {}", e);
            Ok(default)
        }
    }
}

impl Default for EngineConfig {
    /// 内置默认值 (不读取环境变量)
    fn default() -> Self {
        Self {
            blocking_policy: BlockingPolicy::default(),
            timezone: None,
            currency: DEFAULT_CURRENCY.into(),
            payment_delay_ms: DEFAULT_PAYMENT_DELAY_MS,
            log_level: DEFAULT_LOG_LEVEL.into(),
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ReservationStatus;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::try_from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.blocking_policy, BlockingPolicy::default());
        assert_eq!(config.timezone, None);
        assert_eq!(config.currency, "USD");
        assert_eq!(config.payment_delay(), Duration::from_millis(2000));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn test_overrides() {
        let config = EngineConfig::try_from_lookup(lookup(&[
            (BLOCKING_STATUSES, "confirmed"),
            (TIMEZONE, "Europe/Madrid"),
            (CURRENCY, "eur"),
            (PAYMENT_DELAY_MS, "0"),
            (LOG_DIR, "/tmp/logs"),
        ]))
        .unwrap();
        assert!(config.blocking_policy.blocks(ReservationStatus::Confirmed));
        assert!(!config.blocking_policy.blocks(ReservationStatus::Pending));
        assert_eq!(config.timezone, Some(chrono_tz::Europe::Madrid));
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.payment_delay_ms, 0);
        assert_eq!(config.log_dir.as_deref(), Some("/tmp/logs"));
    }

    #[test]
    fn test_strict_rejects_malformed_values() {
        let err = EngineConfig::try_from_lookup(lookup(&[(BLOCKING_STATUSES, "confirmed,held")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidStatus {
                var: BLOCKING_STATUSES,
                value: "held".into()
            }
        );

        let err = EngineConfig::try_from_lookup(lookup(&[(TIMEZONE, "Mars/Olympus")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimezone { .. }));

        let err = EngineConfig::try_from_lookup(lookup(&[(PAYMENT_DELAY_MS, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
        assert_eq!(AppError::from(err).code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_lenient_falls_back_per_field() {
        let config = EngineConfig::from_lookup(lookup(&[
            (BLOCKING_STATUSES, "held"),
            (PAYMENT_DELAY_MS, "50"),
        ]));
        assert_eq!(config.blocking_policy, BlockingPolicy::default());
        assert_eq!(config.payment_delay_ms, 50);
    }

    #[test]
    fn test_payment_delay_saturates() {
        let config = EngineConfig::default().with_payment_delay(Duration::MAX);
        assert_eq!(config.payment_delay_ms, u64::MAX);
        let config = EngineConfig::default().with_payment_delay(Duration::from_millis(250));
        assert_eq!(config.payment_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_empty_status_list_never_unblocks() {
        for raw in ["", " , "] {
            let err = EngineConfig::try_from_lookup(lookup(&[(BLOCKING_STATUSES, raw)])).unwrap_err();
            assert_eq!(err, ConfigError::EmptyStatusList { var: BLOCKING_STATUSES });

            let config = EngineConfig::from_lookup(lookup(&[(BLOCKING_STATUSES, raw)]));
            assert_eq!(config.blocking_policy, BlockingPolicy::default());
            assert!(config.blocking_policy.blocks(ReservationStatus::Confirmed));
        }
    }
}
