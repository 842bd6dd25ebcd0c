// ==========================================
// 泊位分配系统 - 靠泊时段搜索
// ==========================================
// 职责: 在受载期内逐日寻找首个可行靠泊时段, 生成靠泊槽位
// 红线: 首个可行日期即落位, 不比较后续日期的优劣
// 红线: 约束违规只推进到下一日期, 不终止搜索
// ==========================================

use super::{record, BerthPlanner};
use crate::domain::{
    Berth, BerthSchedule, BerthingSlot, CargoPlan, ConflictType, OperationType, PlanningConflict,
    Restriction, SlotStatus, Vessel,
};
use crate::engine::constraint_validator::BerthingRequest;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use tracing::{debug, trace};

impl BerthPlanner {
    /// 逐日搜索靠泊时段
    ///
    /// # 参数
    /// - `schedule`: 目标泊位当前排程（只读, 落位由调用方追加）
    /// - `conflicts`: 约束违规以 constraint_violation 冲突追加于此
    ///
    /// # 返回
    /// - Some(slot): 首个可行时段
    /// - None: 受载期内无可行时段
    pub(super) fn search_slot(
        &mut self,
        cargo: &CargoPlan,
        vessel: &Vessel,
        berth: &Berth,
        restrictions: &[Restriction],
        schedule: &BerthSchedule,
        conflicts: &mut Vec<PlanningConflict>,
    ) -> Option<BerthingSlot> {
        let berth_id = berth.berth_id.as_str();
        let constraint_key = berth.constraint_key();

        let loading_hours = berth.loading_hours(cargo.quantity_t);

        // 货类切换时长只看最近追加的槽位, 且仅在泊位挂接约束集时生效
        let transition_h = match (constraint_key, schedule.last_slot()) {
            (Some(key), Some(last)) => {
                self.validator
                    .transition_hours(key, &last.cargo_type, &cargo.cargo_type)
            }
            _ => 0.0,
        };

        let durations = (
            hours(self.config.occupancy_hours(loading_hours)),
            hours(transition_h),
            hours(self.config.safety_buffer_hours),
        );
        let (occupancy, transition, buffer) = match durations {
            (Some(occupancy), Some(transition), Some(buffer)) => (occupancy, transition, buffer),
            _ => {
                debug!(berth_id, loading_hours, transition_h, "占用时长超出可表示范围");
                return None;
            }
        };
        let day_start_time = self.config.day_start(berth.operating_hours);

        let blocked = |date: NaiveDate| restrictions.iter().any(|r| r.blocks(berth_id, date));

        for date in cargo
            .earliest_date
            .iter_days()
            .take_while(|d| *d <= cargo.latest_date)
        {
            if blocked(date) {
                trace!(berth_id, %date, "作业限制封锁, 跳过");
                continue;
            }

            // 1. 候选开始时刻: 晚于当日起点仍未离泊的承诺一律顺延
            let day_start = date.and_time(day_start_time);
            let shifted = match schedule.release_after(day_start) {
                Some(release) => release
                    .checked_add_signed(buffer)
                    .and_then(|t| t.checked_add_signed(transition)),
                None => day_start.checked_add_signed(transition),
            };
            let Some(start) = shifted else {
                trace!(berth_id, %date, "开始时刻溢出, 跳过");
                continue;
            };

            // 2. 时间窗预检
            if let Some(key) = constraint_key {
                if self
                    .validator
                    .check_time_window(key, start, OperationType::Berthing)
                    .is_some()
                {
                    trace!(berth_id, %start, "不在时间窗内, 跳过");
                    continue;
                }
            }

            // 3. 占用区间
            let Some(end) = start.checked_add_signed(occupancy) else {
                trace!(berth_id, %start, "离泊时刻溢出, 跳过");
                continue;
            };
            if end.date() > cargo.latest_date {
                trace!(berth_id, %end, "离泊晚于受载期末, 跳过");
                continue;
            }
            if schedule.overlaps(start, end) {
                trace!(berth_id, %start, %end, "与既有槽位重叠, 跳过");
                continue;
            }
            if span_blocked(start, end, &blocked) {
                trace!(berth_id, %start, %end, "占用区间遇作业限制, 跳过");
                continue;
            }

            // 4. 强制约束校验（仅挂接约束集的泊位）
            if let Some(key) = constraint_key {
                let request = BerthingRequest {
                    berth_id: key,
                    vessel_id: &vessel.vessel_id,
                    vessel_class: &vessel.vessel_class,
                    loa_m: vessel.loa_m,
                    beam_m: vessel.beam_m,
                    draft_m: vessel.draft_m,
                    cargo_type: &cargo.cargo_type,
                    berthing_time: start,
                    priority: cargo.priority,
                };
                let outcome = self.validator.validate_berthing(&request);
                if !outcome.ok {
                    for violation in outcome.violations {
                        record(
                            conflicts,
                            PlanningConflict::new(
                                &cargo.cargo_id,
                                ConflictType::ConstraintViolation,
                                format!(
                                    "CONSTRAINT_VIOLATION[{}] {} on berth {}: {}",
                                    violation.violation_type, date, berth_id, violation.message
                                ),
                            ),
                        );
                    }
                    continue;
                }
            }

            // 5. 落位
            let built = self.build_slot(cargo, vessel, berth, schedule, start, loading_hours);
            let Some(slot) = built else {
                trace!(berth_id, %start, "时间线溢出, 跳过");
                continue;
            };
            debug!(
                berth_id,
                %date,
                transition_hours = transition_h,
                "找到可行靠泊时段"
            );
            return Some(slot);
        }

        None
    }

    /// 由靠泊开始时刻推导完整时间线, 任一时刻溢出时返回 None
    fn build_slot(
        &self,
        cargo: &CargoPlan,
        vessel: &Vessel,
        berth: &Berth,
        schedule: &BerthSchedule,
        start: NaiveDateTime,
        loading_hours: f64,
    ) -> Option<BerthingSlot> {
        let eta = start.checked_sub_signed(hours(self.config.eta_lead_hours)?)?;
        let loading_start = start.checked_add_signed(hours(self.config.berthing_hours)?)?;
        let loading_end = loading_start.checked_add_signed(hours(loading_hours)?)?;
        let departure = loading_end
            .checked_add_signed(hours(self.config.unberthing_hours)?)?
            .checked_add_signed(hours(self.config.clearance_hours)?)?;

        let waiting = cargo.window_start().signed_duration_since(eta);
        let waiting_hours = (waiting.num_seconds() as f64 / 3600.0).max(0.0);

        Some(BerthingSlot {
            slot_id: format!("SLOT-{}-{:04}", berth.berth_id, schedule.len() + 1),
            berth_id: berth.berth_id.clone(),
            vessel_id: vessel.vessel_id.clone(),
            cargo_id: cargo.cargo_id.clone(),
            cargo_type: cargo.cargo_type.clone(),
            quantity_t: cargo.quantity_t,
            destination: cargo.destination.clone(),
            eta,
            berthing_start: start,
            loading_start,
            loading_end,
            departure,
            waiting_hours,
            loading_hours,
            status: SlotStatus::Planned,
        })
    }
}

/// 小时数 → TimeDelta（按秒取整）, 非有限值或超出范围时返回 None
fn hours(h: f64) -> Option<TimeDelta> {
    if !h.is_finite() {
        return None;
    }
    let seconds = (h * 3600.0).round();
    if seconds.abs() >= i64::MAX as f64 {
        return None;
    }
    TimeDelta::try_seconds(seconds as i64)
}

/// 占用区间覆盖的任一自然日被封锁
fn span_blocked<F>(start: NaiveDateTime, end: NaiveDateTime, blocked: &F) -> bool
where
    F: Fn(NaiveDate) -> bool,
{
    start
        .date()
        .iter_days()
        .take_while(|d| *d <= end.date())
        .any(blocked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::domain::constraint::{ConstraintSet, SeasonalRestriction, SegregationRule};
    use crate::domain::types::{
        BerthType, OperatingHours, RestrictionSeverity, RestrictionType, VesselType,
    };
    use crate::engine::constraint_validator::ConstraintValidator;
    use chrono::Duration;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        d(day).and_hms_opt(hour, 0, 0).unwrap()
    }

    fn berth(hours: OperatingHours) -> Berth {
        Berth {
            berth_id: "B01".to_string(),
            name: "Berth 1".to_string(),
            berth_type: BerthType::Dry,
            max_loa_m: 110.0,
            max_beam_m: 11.5,
            max_draft_m: 3.5,
            cargo_types: vec!["SFO".to_string(), "MEAL".to_string()],
            load_rate_t_per_day: 2500.0,
            operating_hours: hours,
            constraint_set: None,
        }
    }

    fn constrained_berth() -> Berth {
        Berth {
            constraint_set: Some("B01".to_string()),
            ..berth(OperatingHours::Continuous)
        }
    }

    fn vessel() -> Vessel {
        Vessel {
            vessel_id: "V1".to_string(),
            name: "MV One".to_string(),
            vessel_type: VesselType::Barge,
            vessel_class: "CEMT-Va".to_string(),
            cargo_type: "SFO".to_string(),
            capacity_t: 3000.0,
            loa_m: 100.0,
            beam_m: 11.0,
            draft_m: 3.0,
            speed_kn: 10.0,
            destination: "ROTTERDAM".to_string(),
        }
    }

    fn cargo(cargo_type: &str, first: u32, last: u32) -> CargoPlan {
        CargoPlan {
            cargo_id: "C1".to_string(),
            cargo_type: cargo_type.to_string(),
            quantity_t: 1000.0,
            destination: "ROTTERDAM".to_string(),
            priority: 1,
            earliest_date: d(first),
            latest_date: d(last),
            preferred_vessel_id: None,
        }
    }

    fn restriction(first: u32, last: u32) -> Restriction {
        Restriction {
            restriction_id: "R1".to_string(),
            restriction_type: RestrictionType::WaterLevel,
            start_date: d(first),
            end_date: d(last),
            berth_id: None,
            severity: RestrictionSeverity::High,
            description: None,
        }
    }

    fn committed(start: NaiveDateTime, departure: NaiveDateTime) -> BerthingSlot {
        BerthingSlot {
            slot_id: "E1".to_string(),
            berth_id: "B01".to_string(),
            vessel_id: "V_OTHER".to_string(),
            cargo_id: "C0".to_string(),
            cargo_type: "SFO".to_string(),
            quantity_t: 500.0,
            destination: "ROTTERDAM".to_string(),
            eta: start,
            berthing_start: start,
            loading_start: start,
            loading_end: departure,
            departure,
            waiting_hours: 0.0,
            loading_hours: 0.0,
            status: SlotStatus::Confirmed,
        }
    }

    fn planner(validator: ConstraintValidator) -> BerthPlanner {
        BerthPlanner::new(PlannerConfig::default(), validator)
    }

    // 测试: 24h 泊位首日 00:00 落位, 时间线按默认时长推导
    #[test]
    fn test_timeline_on_first_day() {
        let mut p = planner(ConstraintValidator::default());
        let schedule = BerthSchedule::new("B01");
        let mut conflicts = Vec::new();
        let b = berth(OperatingHours::Continuous);

        let slot = p
            .search_slot(&cargo("SFO", 2, 6), &vessel(), &b, &[], &schedule, &mut conflicts)
            .unwrap();

        assert_eq!(slot.slot_id, "SLOT-B01-0001");
        assert_eq!(slot.berthing_start, at(2, 0));
        assert_eq!(slot.eta, at(1, 22));
        assert_eq!(slot.loading_start, at(2, 2));
        assert!((slot.loading_hours - 9.6).abs() < 1e-9);
        assert_eq!(slot.loading_end, at(2, 2) + Duration::minutes(576));
        assert_eq!(slot.departure, slot.loading_end + Duration::hours(3));
        assert!((slot.waiting_hours - 2.0).abs() < 1e-9);
        assert_eq!(slot.status, SlotStatus::Planned);
        assert!(slot.is_well_ordered());
        assert!(conflicts.is_empty());
    }

    // 测试: 限时泊位从 06:00 起算, 等待时长为 0
    #[test]
    fn test_restricted_berth_starts_at_six() {
        let mut p = planner(ConstraintValidator::default());
        let schedule = BerthSchedule::new("B01");
        let mut conflicts = Vec::new();
        let b = berth(OperatingHours::Restricted);

        let slot = p
            .search_slot(&cargo("SFO", 2, 6), &vessel(), &b, &[], &schedule, &mut conflicts)
            .unwrap();
        assert_eq!(slot.berthing_start, at(2, 6));
        assert_eq!(slot.waiting_hours, 0.0);
    }

    // 测试: 封锁日期被跳过
    #[test]
    fn test_blocked_dates_skipped() {
        let mut p = planner(ConstraintValidator::default());
        let schedule = BerthSchedule::new("B01");
        let mut conflicts = Vec::new();
        let b = berth(OperatingHours::Continuous);
        let blocked = [restriction(2, 3)];

        let slot = p
            .search_slot(&cargo("SFO", 2, 6), &vessel(), &b, &blocked, &schedule, &mut conflicts)
            .unwrap();
        assert_eq!(slot.berthing_start.date(), d(4));
    }

    // 测试: 离泊晚于受载期末则无解, 且不记录冲突
    #[test]
    fn test_deadline_exceeded() {
        let mut p = planner(ConstraintValidator::default());
        let mut schedule = BerthSchedule::new("B01");
        let mut conflicts = Vec::new();
        let b = berth(OperatingHours::Continuous);

        // 先占满当日, 使开始时刻顺延至 18:00 以后
        let mut c = cargo("SFO", 2, 2);
        let first = p
            .search_slot(&c, &vessel(), &b, &[], &schedule, &mut conflicts)
            .unwrap();
        schedule.push(first);

        c.cargo_id = "C2".to_string();
        let second = p.search_slot(&c, &vessel(), &b, &[], &schedule, &mut conflicts);
        assert!(second.is_none());
        assert!(conflicts.is_empty());
    }

    // 测试: 前一日离泊的槽位不影响次日起点
    #[test]
    fn test_previous_day_slot_does_not_shift_start() {
        let mut p = planner(ConstraintValidator::default());
        let mut schedule = BerthSchedule::new("B01");
        let mut conflicts = Vec::new();
        let b = berth(OperatingHours::Continuous);

        let mut c = cargo("SFO", 2, 6);
        let first = p
            .search_slot(&c, &vessel(), &b, &[], &schedule, &mut conflicts)
            .unwrap();
        let first_departure = first.departure;
        schedule.push(first);

        // 下一票从 3 日开始: 3 日 00:00 泊位空闲
        c.earliest_date = d(3);
        let second = p
            .search_slot(&c, &vessel(), &b, &[], &schedule, &mut conflicts)
            .unwrap();
        assert_eq!(second.berthing_start, at(3, 0));
        assert_eq!(second.slot_id, "SLOT-B01-0002");
        assert!(second.berthing_start >= first_departure);
    }

    // 测试: 当日稍后才开始的承诺同样顺延开始时刻, 当日仍可落位
    #[test]
    fn test_later_commitment_same_day_shifts_start() {
        let mut p = planner(ConstraintValidator::default());
        let mut schedule = BerthSchedule::new("B01");
        schedule.push(committed(at(2, 8), at(2, 14)));
        let mut conflicts = Vec::new();
        let b = berth(OperatingHours::Restricted);

        let mut c = cargo("SFO", 2, 2);
        c.quantity_t = 100.0;
        let slot = p
            .search_slot(&c, &vessel(), &b, &[], &schedule, &mut conflicts)
            .unwrap();

        // 14:00 离泊 + 2h 安全间隔
        assert_eq!(slot.berthing_start, at(2, 16));
        assert!(!schedule.overlaps(slot.berthing_start, slot.departure));
        assert!(conflicts.is_empty());
    }

    // 测试: 吨位过大导致时长溢出时按无可行时段处理, 不 panic
    #[test]
    fn test_oversized_quantity_yields_no_slot() {
        let mut p = planner(ConstraintValidator::default());
        let schedule = BerthSchedule::new("B01");
        let mut conflicts = Vec::new();
        let b = berth(OperatingHours::Continuous);

        for quantity in [1e13, 1e15, f64::INFINITY] {
            let mut c = cargo("SFO", 2, 6);
            c.quantity_t = quantity;
            let slot = p.search_slot(&c, &vessel(), &b, &[], &schedule, &mut conflicts);
            assert!(slot.is_none(), "quantity={}", quantity);
        }
        assert!(conflicts.is_empty());
    }

    // 测试: 季节封航产生 constraint_violation 冲突, 含封航原因
    #[test]
    fn test_seasonal_violation_recorded() {
        let mut validator = ConstraintValidator::default();
        validator.register(
            "B01",
            ConstraintSet {
                seasonal_restrictions: vec![SeasonalRestriction {
                    start_date: d(1),
                    end_date: d(31),
                    reason: "ice season".to_string(),
                }],
                ..Default::default()
            },
        );
        let mut p = planner(validator);
        let schedule = BerthSchedule::new("B01");
        let mut conflicts = Vec::new();
        let b = constrained_berth();

        let c = cargo("SFO", 2, 4);
        let slot = p.search_slot(&c, &vessel(), &b, &[], &schedule, &mut conflicts);
        assert!(slot.is_none());
        assert_eq!(conflicts.len(), 3);
        assert!(conflicts.iter().all(|c| {
            c.conflict_type == ConflictType::ConstraintViolation
                && c.description.contains("ice season")
        }));
    }

    // 测试: 已登记约束集但泊位未挂接时不做约束校验
    #[test]
    fn test_unattached_berth_skips_constraint_set() {
        let mut validator = ConstraintValidator::default();
        validator.register(
            "B01",
            ConstraintSet {
                seasonal_restrictions: vec![SeasonalRestriction {
                    start_date: d(1),
                    end_date: d(31),
                    reason: "ice season".to_string(),
                }],
                ..Default::default()
            },
        );
        let mut p = planner(validator);
        let schedule = BerthSchedule::new("B01");
        let mut conflicts = Vec::new();
        let b = berth(OperatingHours::Continuous);

        let c = cargo("SFO", 2, 4);
        let slot = p.search_slot(&c, &vessel(), &b, &[], &schedule, &mut conflicts);
        assert!(slot.is_some());
        assert!(conflicts.is_empty());
    }

    // 测试: 货类切换时长 = 间隔 + 清洗
    #[test]
    fn test_transition_applied_after_last_slot() {
        let mut validator = ConstraintValidator::default();
        validator.register(
            "B01",
            ConstraintSet {
                segregation: Some(SegregationRule {
                    incompatible_pairs: vec![],
                    cleaning_required: vec![("SFO".to_string(), "MEAL".to_string())],
                    min_separation_hours: 2.0,
                    cleaning_hours: 4.0,
                }),
                ..Default::default()
            },
        );
        let mut p = planner(validator);
        let b = constrained_berth();
        let mut schedule = BerthSchedule::new("B01");
        let mut conflicts = Vec::new();

        let first = p
            .search_slot(&cargo("SFO", 2, 6), &vessel(), &b, &[], &schedule, &mut conflicts)
            .unwrap();
        schedule.push(first.clone());

        // 同日再排 MEAL: 前一离泊 + 2h 安全间隔 + 6h 切换
        let mut meal = cargo("MEAL", 2, 6);
        meal.cargo_id = "C2".to_string();
        let second = p
            .search_slot(&meal, &vessel(), &b, &[], &schedule, &mut conflicts)
            .unwrap();
        assert_eq!(second.berthing_start, first.departure + Duration::hours(8));
    }

    #[test]
    fn test_hours_rejects_unrepresentable_values() {
        assert_eq!(hours(1.5), Some(Duration::minutes(90)));
        assert_eq!(hours(f64::NAN), None);
        assert_eq!(hours(1e20), None);
    }

    #[test]
    fn test_span_blocked() {
        let blocked = |date: NaiveDate| date == d(3);
        assert!(span_blocked(at(2, 20), at(3, 4), &blocked));
        assert!(!span_blocked(at(2, 0), at(2, 20), &blocked));
    }
}
