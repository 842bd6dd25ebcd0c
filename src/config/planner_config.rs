// ==========================================
// 泊位分配系统 - 规划参数配置
// ==========================================
// 职责: 靠泊/离泊/单证时长、安全间隔、ETA 提前量、作业日起始时刻
// 存储: JSON 文件 (可选), 缺省字段取默认值
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::OperatingHours;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ==========================================
// PlannerConfig - 规划参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub berthing_hours: f64,              // 靠泊作业时长
    pub unberthing_hours: f64,            // 离泊作业时长
    pub clearance_hours: f64,             // 单证/放行时长
    pub safety_buffer_hours: f64,         // 相邻槽位安全间隔
    pub eta_lead_hours: f64,              // ETA 相对靠泊开始的提前量
    pub continuous_day_start: NaiveTime,  // 24h 泊位作业日起始
    pub restricted_day_start: NaiveTime,  // 限时泊位作业日起始
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            berthing_hours: 2.0,
            unberthing_hours: 1.0,
            clearance_hours: 2.0,
            safety_buffer_hours: 2.0,
            eta_lead_hours: 2.0,
            continuous_day_start: NaiveTime::MIN,
            restricted_day_start: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl PlannerConfig {
    /// 从 JSON 文件加载, 加载后校验
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: PlannerConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 时长类参数不得为负或非有限值
    pub fn validate(&self) -> ConfigResult<()> {
        let durations = [
            ("berthing_hours", self.berthing_hours),
            ("unberthing_hours", self.unberthing_hours),
            ("clearance_hours", self.clearance_hours),
            ("safety_buffer_hours", self.safety_buffer_hours),
            ("eta_lead_hours", self.eta_lead_hours),
        ];
        for (key, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ConfigValueError {
                    key: key.to_string(),
                    value: value.to_string(),
                    message: "必须为非负有限小时数".to_string(),
                });
            }
        }
        Ok(())
    }

    /// 作业日起始时刻
    pub fn day_start(&self, operating_hours: OperatingHours) -> NaiveTime {
        match operating_hours {
            OperatingHours::Continuous => self.continuous_day_start,
            OperatingHours::Restricted => self.restricted_day_start,
        }
    }

    /// 泊位占用总时长 = 靠泊 + 装载 + 离泊 + 单证
    pub fn occupancy_hours(&self, loading_hours: f64) -> f64 {
        self.berthing_hours + loading_hours + self.unberthing_hours + self.clearance_hours
    }
}
