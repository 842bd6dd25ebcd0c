// ==========================================
// 泊位分配系统 - 排程领域模型
// ==========================================
// 职责: 靠泊槽位 / 泊位排程 / 排程簿 / 计划冲突
// 红线: 同一泊位排程内 [berthing_start, departure) 区间互不重叠
// 红线: 槽位只由规划器在搜索成功时创建, 之后不再修改
// ==========================================

use crate::domain::types::{ConflictSeverity, ConflictType, SlotStatus};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// BerthingSlot - 靠泊槽位
// ==========================================
// 时间戳严格有序:
// eta <= berthing_start <= loading_start <= loading_end <= departure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BerthingSlot {
    pub slot_id: String,
    pub berth_id: String,
    pub vessel_id: String,
    pub cargo_id: String,
    pub cargo_type: String,
    pub quantity_t: f64,
    pub destination: String,

    // ===== 时间线 =====
    pub eta: NaiveDateTime,
    pub berthing_start: NaiveDateTime,
    pub loading_start: NaiveDateTime,
    pub loading_end: NaiveDateTime,
    pub departure: NaiveDateTime,

    // ===== 派生指标 =====
    pub waiting_hours: f64,
    pub loading_hours: f64,

    pub status: SlotStatus,
}

impl BerthingSlot {
    /// 与半开区间 [start, end) 是否重叠
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.berthing_start < end && start < self.departure
    }

    /// 泊位占用小时数 (berthing_start → departure)
    pub fn occupied_hours(&self) -> f64 {
        (self.departure - self.berthing_start).num_seconds() as f64 / 3600.0
    }

    /// 时间线是否有序
    pub fn is_well_ordered(&self) -> bool {
        self.eta <= self.berthing_start
            && self.berthing_start <= self.loading_start
            && self.loading_start <= self.loading_end
            && self.loading_end <= self.departure
    }
}

// ==========================================
// BerthSchedule - 单泊位排程
// ==========================================
// 按追加顺序保存槽位
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BerthSchedule {
    pub berth_id: String,
    pub slots: Vec<BerthingSlot>,
}

impl BerthSchedule {
    pub fn new(berth_id: &str) -> Self {
        Self {
            berth_id: berth_id.to_string(),
            slots: Vec::new(),
        }
    }

    /// 最近追加的槽位（用于货类切换判断）
    pub fn last_slot(&self) -> Option<&BerthingSlot> {
        self.slots.last()
    }

    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.slots.iter().any(|s| s.overlaps(start, end))
    }

    /// 离泊晚于 `at` 的槽位中最晚的离泊时刻（含 `at` 之后才开始的槽位）
    pub fn release_after(&self, at: NaiveDateTime) -> Option<NaiveDateTime> {
        self.slots
            .iter()
            .filter(|s| s.departure > at)
            .map(|s| s.departure)
            .max()
    }

    pub fn occupied_hours(&self) -> f64 {
        self.slots.iter().map(|s| s.occupied_hours()).sum()
    }

    pub fn push(&mut self, slot: BerthingSlot) {
        self.slots.push(slot);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

// ==========================================
// ScheduleBook - 排程簿（单次运行的累加器）
// ==========================================
// 以引用显式传入规划器, 不同运行各持一份, 互不干扰
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleBook {
    pub schedules: BTreeMap<String, BerthSchedule>,
}

impl ScheduleBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取得泊位排程, 不存在时创建空排程
    pub fn schedule_mut(&mut self, berth_id: &str) -> &mut BerthSchedule {
        self.schedules
            .entry(berth_id.to_string())
            .or_insert_with(|| BerthSchedule::new(berth_id))
    }

    pub fn schedule(&self, berth_id: &str) -> Option<&BerthSchedule> {
        self.schedules.get(berth_id)
    }

    /// 预置已有承诺（运行前的既有靠泊）
    pub fn seed(&mut self, slot: BerthingSlot) {
        let berth_id = slot.berth_id.clone();
        self.schedule_mut(&berth_id).push(slot);
    }

    pub fn all_slots(&self) -> impl Iterator<Item = &BerthingSlot> {
        self.schedules.values().flat_map(|s| s.slots.iter())
    }

    pub fn slot_count(&self) -> usize {
        self.schedules.values().map(|s| s.len()).sum()
    }

    /// 船舶在 [from, to) 内是否已有任一泊位的靠泊任务
    pub fn vessel_busy(&self, vessel_id: &str, from: NaiveDateTime, to: NaiveDateTime) -> bool {
        self.all_slots()
            .any(|s| s.vessel_id == vessel_id && s.overlaps(from, to))
    }
}

// ==========================================
// PlanningConflict - 计划冲突
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningConflict {
    pub cargo_id: String,
    pub conflict_type: ConflictType,
    pub description: String,
    pub severity: ConflictSeverity,
}

impl PlanningConflict {
    /// 严重度由冲突类别决定
    pub fn new(cargo_id: &str, conflict_type: ConflictType, description: String) -> Self {
        Self {
            cargo_id: cargo_id.to_string(),
            conflict_type,
            description,
            severity: conflict_type.severity(),
        }
    }
}
