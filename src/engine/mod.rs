// ==========================================
// 泊位分配系统 - 引擎层
// ==========================================
// 职责: 约束校验 + 贪心泊位分配
// 红线: 引擎内无 I/O, 所有落位失败必须输出冲突与原因
// ==========================================

pub mod constraint_validator;
pub mod error;
pub mod planner;

// 重导出核心引擎
pub use constraint_validator::{
    BerthingRequest, ConstraintValidator, ConstraintViolation, SegregationCheck,
    ValidationOutcome,
};
pub use error::{PlannerError, PlannerResult};
pub use planner::{
    BerthPlanner, BerthSummary, DestinationSummary, PlanningInput, PlanningReport,
    PlanningResult, PlanningSummary,
};
