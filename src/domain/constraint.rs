// ==========================================
// 泊位分配系统 - 泊位约束集领域模型
// ==========================================
// 职责: 单泊位的高级规则层（尺度/时间窗/并发/隔离/优先级/季节封航/黑白名单）
// 红线: 约束集存在时即为权威, 不与泊位基础字段合并
// ==========================================

use crate::domain::types::OperationType;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// VesselSizeConstraint - 尺度约束
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VesselSizeConstraint {
    pub max_loa_m: f64,
    pub max_beam_m: f64,
    pub max_draft_m: f64,
    #[serde(default)]
    pub allow_overhang: bool,      // 是否允许船长外伸
    #[serde(default)]
    pub max_overhang_m: f64,       // 允许外伸长度
}

impl VesselSizeConstraint {
    /// 允许的最大船长（含外伸）
    pub fn effective_max_loa(&self) -> f64 {
        if self.allow_overhang {
            self.max_loa_m + self.max_overhang_m.max(0.0)
        } else {
            self.max_loa_m
        }
    }
}

// ==========================================
// TimeWindow - 作业时间窗
// ==========================================
// 支持跨午夜的时段（start_time > end_time）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeWindow {
    pub name: String,
    pub days_of_week: Vec<Weekday>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub allowed_operations: Vec<OperationType>,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
}

impl TimeWindow {
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.valid_from.map_or(true, |from| date >= from)
            && self.valid_until.map_or(true, |until| date <= until)
    }

    pub fn covers_time(&self, time: NaiveTime) -> bool {
        if self.start_time <= self.end_time {
            self.start_time <= time && time <= self.end_time
        } else {
            // 跨午夜: 22:00-06:00
            time >= self.start_time || time <= self.end_time
        }
    }

    /// 时间窗是否接受该时刻的该类作业
    pub fn accepts(&self, at: NaiveDateTime, operation: OperationType) -> bool {
        self.days_of_week.contains(&at.weekday())
            && self.is_valid_on(at.date())
            && self.covers_time(at.time())
            && self.allowed_operations.contains(&operation)
    }
}

// ==========================================
// ConcurrencyLimit - 并发作业上限
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcurrencyLimit {
    pub max_vessels: u32,
    pub max_berthing_ops: u32,
    pub max_loading_ops: u32,
    pub max_unberthing_ops: u32,
    #[serde(default)]
    pub max_cargo_t: Option<f64>,
}

/// 某一时刻的泊位并发快照
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActiveOperations {
    pub vessels: u32,
    pub berthing_ops: u32,
    pub loading_ops: u32,
    pub unberthing_ops: u32,
    pub cargo_t: f64,
}

// ==========================================
// SegregationRule - 货类隔离规则
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegregationRule {
    #[serde(default)]
    pub incompatible_pairs: Vec<(String, String)>,
    #[serde(default)]
    pub min_separation_hours: f64,
    #[serde(default)]
    pub cleaning_required: Vec<(String, String)>,
    #[serde(default)]
    pub cleaning_hours: f64,
}

fn pair_matches(pair: &(String, String), a: &str, b: &str) -> bool {
    pair.0.eq_ignore_ascii_case(a) && pair.1.eq_ignore_ascii_case(b)
}

impl SegregationRule {
    /// 不兼容货类对（不区分顺序）
    pub fn is_incompatible(&self, a: &str, b: &str) -> bool {
        self.incompatible_pairs
            .iter()
            .any(|p| pair_matches(p, a, b) || pair_matches(p, b, a))
    }

    /// 是否需要清洗（正序或反序命中）
    pub fn requires_cleaning(&self, from: &str, to: &str) -> bool {
        self.cleaning_required
            .iter()
            .any(|p| pair_matches(p, from, to) || pair_matches(p, to, from))
    }
}

// ==========================================
// PriorityRule - 船级优先级规则
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriorityRule {
    #[serde(default)]
    pub vessel_class_priority: HashMap<String, u32>,
    #[serde(default)]
    pub allow_preemption: bool,
    #[serde(default)]
    pub preemption_min_priority_gap: Option<u32>,
}

// ==========================================
// SeasonalRestriction - 季节性封航
// ==========================================
// 始终为强制级
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalRestriction {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

impl SeasonalRestriction {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

// ==========================================
// ConstraintSet - 泊位约束集
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstraintSet {
    #[serde(default)]
    pub vessel_size: Option<VesselSizeConstraint>,
    #[serde(default)]
    pub time_windows: Vec<TimeWindow>,
    #[serde(default)]
    pub concurrency: Option<ConcurrencyLimit>,
    #[serde(default)]
    pub segregation: Option<SegregationRule>,
    #[serde(default)]
    pub priority: Option<PriorityRule>,

    // ===== 黑白名单 =====
    #[serde(default)]
    pub allowed_cargo_types: Vec<String>,
    #[serde(default)]
    pub prohibited_cargo_types: Vec<String>,
    #[serde(default)]
    pub allowed_vessel_classes: Vec<String>,
    #[serde(default)]
    pub prohibited_vessel_classes: Vec<String>,

    #[serde(default)]
    pub seasonal_restrictions: Vec<SeasonalRestriction>,
}
