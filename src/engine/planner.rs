// ==========================================
// 泊位分配系统 - 泊位分配规划器
// ==========================================
// 职责: 按优先级逐票货运计划 → 选船 → 选泊位 → 逐日搜索可行时段
// 红线: 贪心、首个可行即落位, 已落位结果不回溯、不重排
// 红线: 排程簿以显式引用传入, 不使用全局可变状态
// ==========================================
// 输入: 泊位 + 船舶 + 货运计划 + 作业限制 (+ 约束校验器)
// 输出: 泊位排程 + 未分配货运计划 + 计划冲突 + 汇总统计
// ==========================================

mod matching;
mod slot_search;
pub mod summary;

use crate::config::PlannerConfig;
use crate::domain::{
    Berth, CargoPlan, ConflictSeverity, ConflictType, PlanningConflict, Restriction,
    ScheduleBook, Vessel, ViolationType,
};
use crate::engine::constraint_validator::ConstraintValidator;
use crate::engine::error::{PlannerError, PlannerResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

pub use summary::{BerthSummary, DestinationSummary, PlanningSummary};

// ==========================================
// PlanningInput - 规划输入快照
// ==========================================
// 由外部加载器生成, 标识一致性由加载器保证
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanningInput {
    pub berths: Vec<Berth>,
    pub vessels: Vec<Vessel>,
    pub cargo_plans: Vec<CargoPlan>,
    pub restrictions: Vec<Restriction>,
}

// ==========================================
// PlanningReport - 单次运行报告（不含排程簿）
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningReport {
    pub unassigned: Vec<CargoPlan>,
    pub conflicts: Vec<PlanningConflict>,
    pub summary: PlanningSummary,
}

// ==========================================
// PlanningResult - 完整规划结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningResult {
    pub run_id: String,
    pub schedules: ScheduleBook,
    pub unassigned: Vec<CargoPlan>,
    pub conflicts: Vec<PlanningConflict>,
    pub summary: PlanningSummary,
    pub violation_summary: BTreeMap<ViolationType, usize>,
}

// ==========================================
// BerthPlanner - 泊位分配规划器
// ==========================================
pub struct BerthPlanner {
    config: PlannerConfig,
    validator: ConstraintValidator,
}

impl BerthPlanner {
    /// # 参数
    /// - `config`: 规划参数
    /// - `validator`: 约束校验器（持有各泊位约束集与违规历史）
    pub fn new(config: PlannerConfig, validator: ConstraintValidator) -> Self {
        Self { config, validator }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn validator(&self) -> &ConstraintValidator {
        &self.validator
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 对输入快照执行一次完整规划（空排程簿起步）
    pub fn plan(&mut self, input: &PlanningInput) -> PlannerResult<PlanningResult> {
        let mut book = ScheduleBook::new();
        let report = self.plan_into(input, &mut book)?;

        Ok(PlanningResult {
            run_id: Uuid::new_v4().to_string(),
            schedules: book,
            unassigned: report.unassigned,
            conflicts: report.conflicts,
            summary: report.summary,
            violation_summary: self.validator.violation_summary(),
        })
    }

    /// 在给定排程簿上规划（排程簿可预置既有靠泊）
    ///
    /// 处理顺序: 优先级升序, 同优先级按受载期起升序。
    /// 每票货运计划或落位为槽位, 或进入未分配列表, 二者必居其一。
    #[instrument(skip(self, input, book), fields(
        berths = input.berths.len(),
        vessels = input.vessels.len(),
        cargo_plans = input.cargo_plans.len(),
        restrictions = input.restrictions.len()
    ))]
    pub fn plan_into(
        &mut self,
        input: &PlanningInput,
        book: &mut ScheduleBook,
    ) -> PlannerResult<PlanningReport> {
        self.config.validate()?;
        validate_berths(&input.berths, &self.validator)?;

        info!("开始泊位分配规划");

        for berth in &input.berths {
            book.schedule_mut(&berth.berth_id);
        }

        let mut ordered: Vec<&CargoPlan> = input.cargo_plans.iter().collect();
        ordered.sort_by(|a, b| CargoPlan::planning_order(a, b));

        let mut unassigned = Vec::new();
        let mut conflicts = Vec::new();

        for cargo in ordered {
            let placed = self.plan_cargo(cargo, input, book, &mut conflicts);
            if !placed {
                unassigned.push(cargo.clone());
            }
        }

        let summary = PlanningSummary::build(book, &unassigned, &conflicts);
        info!(
            slots = summary.total_slots,
            assigned_t = summary.total_assigned_t,
            unassigned = summary.unassigned_count,
            conflicts = summary.conflict_count,
            "泊位分配规划完成"
        );

        Ok(PlanningReport {
            unassigned,
            conflicts,
            summary,
        })
    }

    /// 单票货运计划: 选船 → 选泊位 → 时段搜索
    ///
    /// # 返回
    /// 是否落位成功
    #[instrument(skip(self, cargo, input, book, conflicts), fields(
        cargo_id = %cargo.cargo_id,
        priority = cargo.priority
    ))]
    fn plan_cargo(
        &mut self,
        cargo: &CargoPlan,
        input: &PlanningInput,
        book: &mut ScheduleBook,
        conflicts: &mut Vec<PlanningConflict>,
    ) -> bool {
        // 1. 选船
        let vessel = match self.select_vessel(cargo, &input.vessels, book) {
            Some(vessel) => vessel,
            None => {
                record(
                    conflicts,
                    PlanningConflict::new(
                        &cargo.cargo_id,
                        ConflictType::NoVessel,
                        format!(
                            "NO_VESSEL: no free vessel for cargo_type={}, destination={}, quantity_t={}",
                            cargo.cargo_type, cargo.destination, cargo.quantity_t
                        ),
                    ),
                );
                return false;
            }
        };

        // 2. 选泊位
        let berth = match self.select_berth(cargo, vessel, &input.berths) {
            Some(berth) => berth,
            None => {
                record(
                    conflicts,
                    PlanningConflict::new(
                        &cargo.cargo_id,
                        ConflictType::NoBerth,
                        format!(
                            "NO_BERTH: no berth handles cargo_type={} for vessel {} (LOA {:.1}m, beam {:.1}m, draft {:.2}m)",
                            cargo.cargo_type,
                            vessel.vessel_id,
                            vessel.loa_m,
                            vessel.beam_m,
                            vessel.draft_m
                        ),
                    ),
                );
                return false;
            }
        };

        // 3. 时段搜索
        let conflicts_before = conflicts.len();
        let slot = {
            let schedule = book.schedule_mut(&berth.berth_id);
            let slot =
                self.search_slot(cargo, vessel, berth, &input.restrictions, schedule, conflicts);
            if let Some(slot) = &slot {
                schedule.push(slot.clone());
            }
            slot
        };

        match slot {
            Some(slot) => {
                debug!(
                    slot_id = %slot.slot_id,
                    berth_id = %slot.berth_id,
                    vessel_id = %slot.vessel_id,
                    berthing_start = %slot.berthing_start,
                    departure = %slot.departure,
                    "货运计划已落位"
                );
                true
            }
            None => {
                // 搜索期间已记录约束违规时不再追加窗口耗尽冲突
                if conflicts.len() == conflicts_before {
                    record(
                        conflicts,
                        PlanningConflict::new(
                            &cargo.cargo_id,
                            ConflictType::NoWindow,
                            format!(
                                "NO_WINDOW: no feasible slot on berth {} between {} and {}",
                                berth.berth_id, cargo.earliest_date, cargo.latest_date
                            ),
                        ),
                    );
                }
                false
            }
        }
    }
}

/// 记录冲突并按严重度输出日志
fn record(conflicts: &mut Vec<PlanningConflict>, conflict: PlanningConflict) {
    match conflict.severity {
        ConflictSeverity::Error => warn!(
            cargo_id = %conflict.cargo_id,
            conflict_type = %conflict.conflict_type,
            "{}",
            conflict.description
        ),
        ConflictSeverity::Warning => debug!(
            cargo_id = %conflict.cargo_id,
            conflict_type = %conflict.conflict_type,
            "{}",
            conflict.description
        ),
    }
    conflicts.push(conflict);
}

/// 输入快照检查: 泊位ID唯一, 装载效率为正, 挂接的约束集已登记
fn validate_berths(berths: &[Berth], validator: &ConstraintValidator) -> PlannerResult<()> {
    let mut seen = HashSet::new();
    for berth in berths {
        if !seen.insert(berth.berth_id.as_str()) {
            return Err(PlannerError::DuplicateBerth(berth.berth_id.clone()));
        }
        if !(berth.load_rate_t_per_day.is_finite() && berth.load_rate_t_per_day > 0.0) {
            return Err(PlannerError::InvalidLoadRate {
                berth_id: berth.berth_id.clone(),
                load_rate: berth.load_rate_t_per_day,
            });
        }
        if let Some(key) = berth.constraint_key() {
            if !validator.has_constraints(key) {
                return Err(PlannerError::UnknownConstraintSet {
                    berth_id: berth.berth_id.clone(),
                    constraint_set: key.to_string(),
                });
            }
        }
    }
    Ok(())
}
