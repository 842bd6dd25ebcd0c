// ==========================================
// 泊位分配系统 - 规划汇总统计
// ==========================================
// 职责: 由排程簿与未分配/冲突列表计算汇总, 不修改任何输入
// ==========================================

use crate::domain::{CargoPlan, ConflictSeverity, PlanningConflict, ScheduleBook};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 单泊位汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BerthSummary {
    pub slot_count: usize,
    pub total_quantity_t: f64,
    pub occupied_hours: f64,
}

/// 单航线汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DestinationSummary {
    pub slot_count: usize,
    pub total_quantity_t: f64,
}

// ==========================================
// PlanningSummary - 规划汇总
// ==========================================
// 统计口径包含排程簿中预置的既有靠泊
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanningSummary {
    pub total_slots: usize,
    pub total_assigned_t: f64,
    pub unassigned_count: usize,
    pub conflict_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub total_waiting_hours: f64,
    pub by_berth: BTreeMap<String, BerthSummary>,
    pub by_destination: BTreeMap<String, DestinationSummary>,
}

impl PlanningSummary {
    pub fn build(
        book: &ScheduleBook,
        unassigned: &[CargoPlan],
        conflicts: &[PlanningConflict],
    ) -> Self {
        let mut summary = PlanningSummary {
            unassigned_count: unassigned.len(),
            conflict_count: conflicts.len(),
            ..Default::default()
        };

        for conflict in conflicts {
            match conflict.severity {
                ConflictSeverity::Error => summary.error_count += 1,
                ConflictSeverity::Warning => summary.warning_count += 1,
            }
        }

        for (berth_id, schedule) in &book.schedules {
            // 空排程也列出, 便于报表显示闲置泊位
            let entry = summary.by_berth.entry(berth_id.clone()).or_default();
            for slot in &schedule.slots {
                entry.slot_count += 1;
                entry.total_quantity_t += slot.quantity_t;
                entry.occupied_hours += slot.occupied_hours();

                let dest = summary
                    .by_destination
                    .entry(slot.destination.clone())
                    .or_default();
                dest.slot_count += 1;
                dest.total_quantity_t += slot.quantity_t;

                summary.total_slots += 1;
                summary.total_assigned_t += slot.quantity_t;
                summary.total_waiting_hours += slot.waiting_hours;
            }
        }

        summary
    }
}
