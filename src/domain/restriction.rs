// ==========================================
// 泊位分配系统 - 作业限制领域模型
// ==========================================
// 红线: High 严重度限制为阻断, 覆盖日期对相关泊位完全不可用
// ==========================================

use crate::domain::types::{RestrictionSeverity, RestrictionType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Restriction - 作业限制
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restriction {
    pub restriction_id: String,
    pub restriction_type: RestrictionType,
    pub start_date: NaiveDate,       // 起 (含)
    pub end_date: NaiveDate,         // 止 (含)
    pub berth_id: Option<String>,    // 作用泊位, None = 全部泊位
    pub severity: RestrictionSeverity,
    #[serde(default)]
    pub description: Option<String>,
}

impl Restriction {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn applies_to(&self, berth_id: &str) -> bool {
        match &self.berth_id {
            None => true,
            Some(scope) => scope == berth_id,
        }
    }

    /// 是否阻断指定泊位在指定日期的作业
    pub fn blocks(&self, berth_id: &str, date: NaiveDate) -> bool {
        self.severity.is_blocking() && self.applies_to(berth_id) && self.covers(date)
    }
}
