// ==========================================
// 泊位分配系统 - 领域类型定义
// ==========================================
// 职责: 泊位/船舶/限制/冲突/约束相关的封闭枚举
// 序列化格式: snake_case (与输入文件、输出报表一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 泊位类别 (Berth Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BerthType {
    Liquid, // 液货泊位
    Dry,    // 干货泊位
}

impl fmt::Display for BerthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl BerthType {
    /// 从字符串解析泊位类别
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "liquid" => Some(BerthType::Liquid),
            "dry" => Some(BerthType::Dry),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BerthType::Liquid => "liquid",
            BerthType::Dry => "dry",
        }
    }
}

// ==========================================
// 船型 (Vessel Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VesselType {
    Barge,    // 驳船
    DryCargo, // 干货船
}

impl fmt::Display for VesselType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl VesselType {
    /// 从字符串解析船型（兼容 dry-cargo / dry_cargo 两种写法）
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "barge" => Some(VesselType::Barge),
            "dry_cargo" => Some(VesselType::DryCargo),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VesselType::Barge => "barge",
            VesselType::DryCargo => "dry_cargo",
        }
    }
}

// ==========================================
// 作业时间类别 (Operating Hours)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingHours {
    #[serde(rename = "24h")]
    Continuous, // 24 小时作业
    Restricted, // 限时作业
}

impl fmt::Display for OperatingHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatingHours::Continuous => write!(f, "24h"),
            OperatingHours::Restricted => write!(f, "restricted"),
        }
    }
}

impl OperatingHours {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "24h" | "24/7" | "continuous" => Some(OperatingHours::Continuous),
            "restricted" | "day" => Some(OperatingHours::Restricted),
            _ => None,
        }
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self, OperatingHours::Continuous)
    }
}

// ==========================================
// 限制类型 (Restriction Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionType {
    Weather,     // 天气
    WaterLevel,  // 水位
    Maintenance, // 检修
    Holiday,     // 节假日
}

impl fmt::Display for RestrictionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RestrictionType::Weather => "weather",
            RestrictionType::WaterLevel => "water_level",
            RestrictionType::Maintenance => "maintenance",
            RestrictionType::Holiday => "holiday",
        };
        write!(f, "{}", s)
    }
}

impl RestrictionType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weather" => Some(RestrictionType::Weather),
            "water_level" | "water-level" => Some(RestrictionType::WaterLevel),
            "maintenance" => Some(RestrictionType::Maintenance),
            "holiday" => Some(RestrictionType::Holiday),
            _ => None,
        }
    }
}

// ==========================================
// 限制严重度 (Restriction Severity)
// ==========================================
// 顺序: Low < Medium < High, 仅 High 为阻断
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionSeverity {
    Low,
    Medium,
    High,
}

impl fmt::Display for RestrictionSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RestrictionSeverity::Low => "low",
            RestrictionSeverity::Medium => "medium",
            RestrictionSeverity::High => "high",
        };
        write!(f, "{}", s)
    }
}

impl RestrictionSeverity {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(RestrictionSeverity::Low),
            "medium" => Some(RestrictionSeverity::Medium),
            "high" => Some(RestrictionSeverity::High),
            _ => None,
        }
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self, RestrictionSeverity::High)
    }
}

// ==========================================
// 泊位作业类型 (Operation Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Berthing,   // 靠泊
    Loading,    // 装载
    Unberthing, // 离泊
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationType::Berthing => "berthing",
            OperationType::Loading => "loading",
            OperationType::Unberthing => "unberthing",
        };
        write!(f, "{}", s)
    }
}

// ==========================================
// 排程槽位状态 (Slot Status)
// ==========================================
// 仅用于展示, 引擎生成的槽位均为 Planned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Planned,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SlotStatus::Planned => "planned",
            SlotStatus::Confirmed => "confirmed",
            SlotStatus::InProgress => "in_progress",
            SlotStatus::Completed => "completed",
            SlotStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

// ==========================================
// 计划冲突类别 (Conflict Type)
// ==========================================
// 封闭集合, 数据承载而非异常
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    NoVessel,
    NoBerth,
    NoWindow,
    ConstraintViolation,
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConflictType::NoVessel => "no_vessel",
            ConflictType::NoBerth => "no_berth",
            ConflictType::NoWindow => "no_window",
            ConflictType::ConstraintViolation => "constraint_violation",
        };
        write!(f, "{}", s)
    }
}

impl ConflictType {
    /// 冲突类别对应的严重度: 船舶/泊位缺失为终止性错误, 其余为警告
    pub fn severity(&self) -> ConflictSeverity {
        match self {
            ConflictType::NoVessel | ConflictType::NoBerth => ConflictSeverity::Error,
            ConflictType::NoWindow | ConflictType::ConstraintViolation => {
                ConflictSeverity::Warning
            }
        }
    }
}

// ==========================================
// 冲突严重度 (Conflict Severity)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSeverity {
    Error,
    Warning,
}

impl fmt::Display for ConflictSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictSeverity::Error => write!(f, "error"),
            ConflictSeverity::Warning => write!(f, "warning"),
        }
    }
}

// ==========================================
// 约束违规类型 (Violation Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    VesselSize,
    CargoType,
    VesselClass,
    SeasonalRestriction,
    TimeWindow,
    Concurrency,
    Segregation,
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViolationType::VesselSize => "vessel_size",
            ViolationType::CargoType => "cargo_type",
            ViolationType::VesselClass => "vessel_class",
            ViolationType::SeasonalRestriction => "seasonal_restriction",
            ViolationType::TimeWindow => "time_window",
            ViolationType::Concurrency => "concurrency",
            ViolationType::Segregation => "segregation",
        };
        write!(f, "{}", s)
    }
}

// ==========================================
// 违规严重度 (Violation Severity)
// ==========================================
// Mandatory 违规使校验失败, Advisory 仅记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    #[default]
    Mandatory,
    Advisory,
}

impl fmt::Display for ViolationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationSeverity::Mandatory => write!(f, "mandatory"),
            ViolationSeverity::Advisory => write!(f, "advisory"),
        }
    }
}
