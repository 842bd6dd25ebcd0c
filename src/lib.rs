// ==========================================
// 泊位分配系统 - 核心库
// ==========================================
// 职责: 货运计划 → 船舶 → 泊位 → 靠泊时段 的贪心分配
// 技术栈: Rust + serde + chrono + tracing
// 系统定位: 决策支持 (单次运行, 纯内存计算)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 约束校验与泊位分配
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 规划参数与约束集
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    BerthType, ConflictSeverity, ConflictType, OperatingHours, OperationType,
    RestrictionSeverity, RestrictionType, SlotStatus, VesselType, ViolationSeverity,
    ViolationType,
};

// 领域实体
pub use domain::{
    Berth, BerthSchedule, BerthingSlot, CargoPlan, ConstraintSet, PlanningConflict,
    Restriction, ScheduleBook, Vessel,
};

// 引擎
pub use engine::{
    BerthPlanner, BerthingRequest, ConstraintValidator, ConstraintViolation, PlannerError,
    PlannerResult, PlanningInput, PlanningReport, PlanningResult, PlanningSummary,
    ValidationOutcome,
};

// 配置与导入
pub use config::{ConstraintStore, PlannerConfig};
pub use importer::{PlanningSnapshot, SnapshotImporter};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "泊位分配系统";
