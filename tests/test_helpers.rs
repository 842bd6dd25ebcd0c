// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 领域对象构建器 + 排程不变量检查
// ==========================================
#![allow(dead_code)]

use berth_planner::domain::types::{
    BerthType, OperatingHours, RestrictionSeverity, RestrictionType, SlotStatus, VesselType,
};
use berth_planner::domain::{Berth, BerthingSlot, CargoPlan, Restriction, Vessel};
use chrono::{NaiveDate, NaiveDateTime};

/// 2026 年 3 月的某日（3 月 2 日为周一）
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

pub fn at(d: u32, hour: u32, minute: u32) -> NaiveDateTime {
    day(d).and_hms_opt(hour, minute, 0).unwrap()
}

// ==========================================
// Berth 构建器
// ==========================================
pub struct BerthBuilder {
    berth: Berth,
}

impl BerthBuilder {
    pub fn new(berth_id: &str) -> Self {
        Self {
            berth: Berth {
                berth_id: berth_id.to_string(),
                name: format!("Berth {}", berth_id),
                berth_type: BerthType::Dry,
                max_loa_m: 110.0,
                max_beam_m: 11.5,
                max_draft_m: 3.5,
                cargo_types: vec!["SFO".to_string()],
                load_rate_t_per_day: 2500.0,
                operating_hours: OperatingHours::Continuous,
                constraint_set: None,
            },
        }
    }

    pub fn cargo_types(mut self, types: &[&str]) -> Self {
        self.berth.cargo_types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn load_rate(mut self, rate: f64) -> Self {
        self.berth.load_rate_t_per_day = rate;
        self
    }

    pub fn max_loa(mut self, loa: f64) -> Self {
        self.berth.max_loa_m = loa;
        self
    }

    /// 挂接与泊位同名的约束集
    pub fn with_constraints(mut self) -> Self {
        self.berth.constraint_set = Some(self.berth.berth_id.clone());
        self
    }

    pub fn restricted_hours(mut self) -> Self {
        self.berth.operating_hours = OperatingHours::Restricted;
        self
    }

    pub fn build(self) -> Berth {
        self.berth
    }
}

// ==========================================
// Vessel 构建器
// ==========================================
pub struct VesselBuilder {
    vessel: Vessel,
}

impl VesselBuilder {
    pub fn new(vessel_id: &str) -> Self {
        Self {
            vessel: Vessel {
                vessel_id: vessel_id.to_string(),
                name: format!("MV {}", vessel_id),
                vessel_type: VesselType::Barge,
                vessel_class: "CEMT-Va".to_string(),
                cargo_type: "SFO".to_string(),
                capacity_t: 3000.0,
                loa_m: 100.0,
                beam_m: 11.0,
                draft_m: 3.0,
                speed_kn: 10.0,
                destination: "ROTTERDAM".to_string(),
            },
        }
    }

    pub fn cargo_type(mut self, cargo_type: &str) -> Self {
        self.vessel.cargo_type = cargo_type.to_string();
        self
    }

    pub fn destination(mut self, destination: &str) -> Self {
        self.vessel.destination = destination.to_string();
        self
    }

    pub fn capacity(mut self, capacity: f64) -> Self {
        self.vessel.capacity_t = capacity;
        self
    }

    pub fn loa(mut self, loa: f64) -> Self {
        self.vessel.loa_m = loa;
        self
    }

    pub fn vessel_class(mut self, class: &str) -> Self {
        self.vessel.vessel_class = class.to_string();
        self
    }

    pub fn build(self) -> Vessel {
        self.vessel
    }
}

// ==========================================
// CargoPlan 构建器
// ==========================================
pub struct CargoBuilder {
    cargo: CargoPlan,
}

impl CargoBuilder {
    pub fn new(cargo_id: &str) -> Self {
        Self {
            cargo: CargoPlan {
                cargo_id: cargo_id.to_string(),
                cargo_type: "SFO".to_string(),
                quantity_t: 1000.0,
                destination: "ROTTERDAM".to_string(),
                priority: 1,
                earliest_date: day(2),
                latest_date: day(6),
                preferred_vessel_id: None,
            },
        }
    }

    pub fn cargo_type(mut self, cargo_type: &str) -> Self {
        self.cargo.cargo_type = cargo_type.to_string();
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.cargo.quantity_t = quantity;
        self
    }

    pub fn destination(mut self, destination: &str) -> Self {
        self.cargo.destination = destination.to_string();
        self
    }

    pub fn priority(mut self, priority: u32) -> Self {
        self.cargo.priority = priority;
        self
    }

    pub fn window(mut self, first: u32, last: u32) -> Self {
        self.cargo.earliest_date = day(first);
        self.cargo.latest_date = day(last);
        self
    }

    pub fn preferred_vessel(mut self, vessel_id: &str) -> Self {
        self.cargo.preferred_vessel_id = Some(vessel_id.to_string());
        self
    }

    pub fn build(self) -> CargoPlan {
        self.cargo
    }
}

/// 作业限制
pub fn restriction(
    id: &str,
    berth_id: Option<&str>,
    first: u32,
    last: u32,
    severity: RestrictionSeverity,
) -> Restriction {
    Restriction {
        restriction_id: id.to_string(),
        restriction_type: RestrictionType::Maintenance,
        start_date: day(first),
        end_date: day(last),
        berth_id: berth_id.map(|b| b.to_string()),
        severity,
        description: None,
    }
}

/// 预置的既有靠泊
pub fn existing_slot(
    slot_id: &str,
    berth_id: &str,
    vessel_id: &str,
    cargo_type: &str,
    start: NaiveDateTime,
    departure: NaiveDateTime,
) -> BerthingSlot {
    BerthingSlot {
        slot_id: slot_id.to_string(),
        berth_id: berth_id.to_string(),
        vessel_id: vessel_id.to_string(),
        cargo_id: format!("EXISTING-{}", slot_id),
        cargo_type: cargo_type.to_string(),
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
