// ==========================================
// 泊位分配系统 - 泊位领域模型
// ==========================================
// 职责: 泊位物理参数与基础准入检查
// 红线: 泊位挂接约束集时, 约束集校验优先于本文件的基础检查
// ==========================================

use crate::domain::types::{BerthType, OperatingHours};
use serde::{Deserialize, Serialize};

// ==========================================
// Berth - 泊位
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Berth {
    pub berth_id: String,                 // 泊位ID
    pub name: String,                     // 显示名称
    pub berth_type: BerthType,            // 泊位类别

    // ===== 尺度上限 =====
    pub max_loa_m: f64,                   // 最大船长 (米)
    pub max_beam_m: f64,                  // 最大船宽 (米)
    pub max_draft_m: f64,                 // 最大吃水 (米)

    // ===== 作业能力 =====
    pub cargo_types: Vec<String>,         // 可作业货类
    pub load_rate_t_per_day: f64,         // 装载效率 (吨/天)
    pub operating_hours: OperatingHours,  // 作业时间类别

    // ===== 高级约束 =====
    #[serde(default)]
    pub constraint_set: Option<String>,   // 挂接的约束集键（缺省即仅做基础检查）
}

impl Berth {
    /// 基础货类检查（无约束集时使用）
    pub fn handles_cargo(&self, cargo_type: &str) -> bool {
        self.cargo_types
            .iter()
            .any(|c| c.eq_ignore_ascii_case(cargo_type))
    }

    /// 基础尺度检查（无约束集时使用）
    pub fn fits_vessel(&self, loa_m: f64, beam_m: f64, draft_m: f64) -> bool {
        loa_m <= self.max_loa_m && beam_m <= self.max_beam_m && draft_m <= self.max_draft_m
    }

    /// 挂接的约束集键
    pub fn constraint_key(&self) -> Option<&str> {
        self.constraint_set.as_deref()
    }

    /// 装载小时数 = 吨位 / 日装载效率 × 24
    pub fn loading_hours(&self, quantity_t: f64) -> f64 {
        quantity_t / self.load_rate_t_per_day * 24.0
    }
}
