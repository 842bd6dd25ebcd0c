// ==========================================
// 泊位分配系统 - 约束校验引擎
// ==========================================
// 职责: 按泊位约束集校验靠泊请求, 输出通过/失败 + 违规明细
// 红线: 泊位未注册约束集时一律放行, 基础尺度/货类检查由调用方负责
// 红线: 任一强制级违规即失败; 违规累计于校验器自身的历史中
// ==========================================

use crate::domain::constraint::{ActiveOperations, ConstraintSet};
use crate::domain::types::{OperationType, ViolationSeverity, ViolationType};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// 单条约束违规
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    pub violation_type: ViolationType,
    pub severity: ViolationSeverity,
    pub berth_id: String,
    pub message: String,
}

impl ConstraintViolation {
    fn mandatory(violation_type: ViolationType, berth_id: &str, message: String) -> Self {
        Self {
            violation_type,
            severity: ViolationSeverity::Mandatory,
            berth_id: berth_id.to_string(),
            message,
        }
    }

    /// 降级为建议级（不影响校验结论, 仅记录）
    pub fn advisory(mut self) -> Self {
        self.severity = ViolationSeverity::Advisory;
        self
    }

    pub fn is_mandatory(&self) -> bool {
        self.severity == ViolationSeverity::Mandatory
    }
}

/// 靠泊校验请求
#[derive(Debug, Clone)]
pub struct BerthingRequest<'a> {
    pub berth_id: &'a str,
    pub vessel_id: &'a str,
    pub vessel_class: &'a str,
    pub loa_m: f64,
    pub beam_m: f64,
    pub draft_m: f64,
    pub cargo_type: &'a str,
    pub berthing_time: NaiveDateTime,
    pub priority: u32,
}

/// 校验结论
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub ok: bool,
    pub violations: Vec<ConstraintViolation>,
}

impl ValidationOutcome {
    fn passed() -> Self {
        Self {
            ok: true,
            violations: Vec::new(),
        }
    }
}

/// 货类隔离检查结果
#[derive(Debug, Clone, PartialEq)]
pub struct SegregationCheck {
    pub compatible: bool,
    pub reason: Option<String>,
}

// ==========================================
// ConstraintValidator - 约束校验引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConstraintValidator {
    constraint_sets: HashMap<String, ConstraintSet>,
    history: Vec<ConstraintViolation>,
}

impl ConstraintValidator {
    /// # 参数
    /// - `constraint_sets`: 泊位ID → 约束集
    pub fn new(constraint_sets: HashMap<String, ConstraintSet>) -> Self {
        Self {
            constraint_sets,
            history: Vec::new(),
        }
    }

    pub fn register(&mut self, berth_id: &str, set: ConstraintSet) {
        self.constraint_sets.insert(berth_id.to_string(), set);
    }

    pub fn constraint_set(&self, berth_id: &str) -> Option<&ConstraintSet> {
        self.constraint_sets.get(berth_id)
    }

    pub fn has_constraints(&self, berth_id: &str) -> bool {
        self.constraint_sets.contains_key(berth_id)
    }

    // ==========================================
    // 强制门控
    // ==========================================

    /// 校验靠泊请求
    ///
    /// 依次检查尺度、货类、船级、季节封航、时间窗, 各项独立累计违规后再判定。
    /// 返回的违规同时追加到校验器历史。
    pub fn validate_berthing(&mut self, request: &BerthingRequest<'_>) -> ValidationOutcome {
        if !self.has_constraints(request.berth_id) {
            return ValidationOutcome::passed();
        }

        let berth_id = request.berth_id;
        let mut violations =
            self.check_vessel_size(berth_id, request.loa_m, request.beam_m, request.draft_m);
        violations.extend(self.check_cargo_type(berth_id, request.cargo_type));
        violations.extend(self.check_vessel_class(berth_id, request.vessel_class));
        violations.extend(self.check_seasonal(berth_id, request.berthing_time.date()));
        violations.extend(self.check_time_window(
            berth_id,
            request.berthing_time,
            OperationType::Berthing,
        ));

        let ok = !violations.iter().any(|v| v.is_mandatory());
        if !ok {
            debug!(
                berth_id,
                vessel_id = request.vessel_id,
                priority = request.priority,
                berthing_time = %request.berthing_time,
                violations = violations.len(),
                "靠泊校验未通过"
            );
        }

        self.history.extend(violations.iter().cloned());
        ValidationOutcome { ok, violations }
    }

    // ==========================================
    // 单项检查（纯函数）
    // ==========================================

    /// 尺度检查: 船长允许在配置外伸范围内超限
    pub fn check_vessel_size(
        &self,
        berth_id: &str,
        loa_m: f64,
        beam_m: f64,
        draft_m: f64,
    ) -> Vec<ConstraintViolation> {
        let size = match self.constraint_set(berth_id).and_then(|s| s.vessel_size.as_ref()) {
            Some(size) => size,
            None => return Vec::new(),
        };

        let mut violations = Vec::new();
        if loa_m > size.effective_max_loa() {
            violations.push(ConstraintViolation::mandatory(
                ViolationType::VesselSize,
                berth_id,
                format!(
                    "LOA {:.1}m exceeds max {:.1}m (overhang allowed: {})",
                    loa_m, size.max_loa_m, size.allow_overhang
                ),
            ));
        }
        if beam_m > size.max_beam_m {
            violations.push(ConstraintViolation::mandatory(
                ViolationType::VesselSize,
                berth_id,
                format!("beam {:.1}m exceeds max {:.1}m", beam_m, size.max_beam_m),
            ));
        }
        if draft_m > size.max_draft_m {
            violations.push(ConstraintViolation::mandatory(
                ViolationType::VesselSize,
                berth_id,
                format!("draft {:.2}m exceeds max {:.2}m", draft_m, size.max_draft_m),
            ));
        }
        violations
    }

    /// 货类黑白名单
    pub fn check_cargo_type(
        &self,
        berth_id: &str,
        cargo_type: &str,
    ) -> Option<ConstraintViolation> {
        let set = self.constraint_set(berth_id)?;
        check_lists(
            &set.allowed_cargo_types,
            &set.prohibited_cargo_types,
            cargo_type,
        )
        .map(|reason| {
            ConstraintViolation::mandatory(
                ViolationType::CargoType,
                berth_id,
                format!("cargo type {} {}", cargo_type, reason),
            )
        })
    }

    /// 船级黑白名单
    pub fn check_vessel_class(
        &self,
        berth_id: &str,
        vessel_class: &str,
    ) -> Option<ConstraintViolation> {
        let set = self.constraint_set(berth_id)?;
        check_lists(
            &set.allowed_vessel_classes,
            &set.prohibited_vessel_classes,
            vessel_class,
        )
        .map(|reason| {
            ConstraintViolation::mandatory(
                ViolationType::VesselClass,
                berth_id,
                format!("vessel class {} {}", vessel_class, reason),
            )
        })
    }

    /// 季节封航（始终为强制级）
    pub fn check_seasonal(&self, berth_id: &str, date: NaiveDate) -> Option<ConstraintViolation> {
        let set = self.constraint_set(berth_id)?;
        set.seasonal_restrictions
            .iter()
            .find(|r| r.covers(date))
            .map(|r| {
                ConstraintViolation::mandatory(
                    ViolationType::SeasonalRestriction,
                    berth_id,
                    format!(
                        "seasonal restriction {}..{} on {}: {}",
                        r.start_date, r.end_date, date, r.reason
                    ),
                )
            })
    }

    /// 时间窗检查: 未配置时间窗则跳过; 否则至少一个时间窗接受该时刻与作业类型
    pub fn check_time_window(
        &self,
        berth_id: &str,
        at: NaiveDateTime,
        operation: OperationType,
    ) -> Option<ConstraintViolation> {
        let set = self.constraint_set(berth_id)?;
        if set.time_windows.is_empty() {
            return None;
        }
        if set.time_windows.iter().any(|w| w.accepts(at, operation)) {
            return None;
        }
        Some(ConstraintViolation::mandatory(
            ViolationType::TimeWindow,
            berth_id,
            format!("no time window accepts {} at {}", operation, at),
        ))
    }

    // ==========================================
    // 辅助查询（不参与强制门控）
    // ==========================================

    /// 两货类是否可相邻作业
    pub fn check_segregation(
        &self,
        berth_id: &str,
        cargo_a: &str,
        cargo_b: &str,
    ) -> SegregationCheck {
        let rule = self
            .constraint_set(berth_id)
            .and_then(|s| s.segregation.as_ref());
        match rule {
            Some(rule) if rule.is_incompatible(cargo_a, cargo_b) => SegregationCheck {
                compatible: false,
                reason: Some(format!(
                    "{} and {} are incompatible (min separation {}h)",
                    cargo_a, cargo_b, rule.min_separation_hours
                )),
            },
            _ => SegregationCheck {
                compatible: true,
                reason: None,
            },
        }
    }

    /// 货类切换所需小时数 = 最小间隔 + (需清洗时) 清洗时长; 同货类为 0
    pub fn transition_hours(&self, berth_id: &str, from_cargo: &str, to_cargo: &str) -> f64 {
        if from_cargo.eq_ignore_ascii_case(to_cargo) {
            return 0.0;
        }
        let rule = match self
            .constraint_set(berth_id)
            .and_then(|s| s.segregation.as_ref())
        {
            Some(rule) => rule,
            None => return 0.0,
        };

        let mut hours = rule.min_separation_hours.max(0.0);
        if rule.requires_cleaning(from_cargo, to_cargo) {
            hours += rule.cleaning_hours.max(0.0);
        }
        hours
    }

    /// 并发上限检查（`active` 为加入新船后的并发快照）
    pub fn check_concurrency(
        &self,
        berth_id: &str,
        active: &ActiveOperations,
    ) -> Vec<ConstraintViolation> {
        let limit = match self
            .constraint_set(berth_id)
            .and_then(|s| s.concurrency.as_ref())
        {
            Some(limit) => limit,
            None => return Vec::new(),
        };

        let checks = [
            ("vessels", active.vessels, limit.max_vessels),
            ("berthing ops", active.berthing_ops, limit.max_berthing_ops),
            ("loading ops", active.loading_ops, limit.max_loading_ops),
            ("unberthing ops", active.unberthing_ops, limit.max_unberthing_ops),
        ];

        let mut violations: Vec<ConstraintViolation> = checks
            .iter()
            .filter(|(_, value, max)| value > max)
            .map(|(label, value, max)| {
                ConstraintViolation::mandatory(
                    ViolationType::Concurrency,
                    berth_id,
                    format!("simultaneous {} {} exceeds limit {}", label, value, max),
                )
            })
            .collect();

        if let Some(max_cargo_t) = limit.max_cargo_t {
            if active.cargo_t > max_cargo_t {
                violations.push(ConstraintViolation::mandatory(
                    ViolationType::Concurrency,
                    berth_id,
                    format!(
                        "simultaneous cargo {:.1}t exceeds limit {:.1}t",
                        active.cargo_t, max_cargo_t
                    ),
                ));
            }
        }
        violations
    }

    /// 船级优先级（来自优先级规则, 未配置返回 None）
    pub fn vessel_class_priority(&self, berth_id: &str, vessel_class: &str) -> Option<u32> {
        self.constraint_set(berth_id)?
            .priority
            .as_ref()?
            .vessel_class_priority
            .get(vessel_class)
            .copied()
    }

    // ==========================================
    // 违规历史
    // ==========================================

    pub fn history(&self) -> &[ConstraintViolation] {
        &self.history
    }

    /// 按违规类型汇总计数
    pub fn violation_summary(&self) -> BTreeMap<ViolationType, usize> {
        let mut summary = BTreeMap::new();
        for v in &self.history {
            *summary.entry(v.violation_type).or_insert(0) += 1;
        }
        summary
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

/// 黑白名单判定: 命中黑名单, 或配置了白名单但不在其中
fn check_lists(allowed: &[String], prohibited: &[String], value: &str) -> Option<&'static str> {
    if prohibited.iter().any(|p| p.eq_ignore_ascii_case(value)) {
        return Some("is prohibited");
    }
    if !allowed.is_empty() && !allowed.iter().any(|a| a.eq_ignore_ascii_case(value)) {
        return Some("is not in the allowed list");
    }
    None
}
