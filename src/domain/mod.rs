// ==========================================
// 泊位分配系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含搜索逻辑, 不含 I/O
// ==========================================

pub mod berth;
pub mod cargo;
pub mod constraint;
pub mod restriction;
pub mod schedule;
pub mod types;
pub mod vessel;

// 重导出核心类型
pub use berth::Berth;
pub use cargo::CargoPlan;
pub use constraint::{
    ActiveOperations, ConcurrencyLimit, ConstraintSet, PriorityRule, SeasonalRestriction,
    SegregationRule, TimeWindow, VesselSizeConstraint,
};
pub use restriction::Restriction;
pub use schedule::{BerthSchedule, BerthingSlot, PlanningConflict, ScheduleBook};
pub use types::{
    BerthType, ConflictSeverity, ConflictType, OperatingHours, OperationType, RestrictionSeverity,
    RestrictionType, SlotStatus, VesselType, ViolationSeverity, ViolationType,
};
pub use vessel::Vessel;
