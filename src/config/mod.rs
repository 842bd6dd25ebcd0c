// ==========================================
// 泊位分配系统 - 配置层
// ==========================================
// 职责: 规划参数与泊位约束集的加载
// 存储: JSON 文件
// ==========================================

pub mod constraint_store;
pub mod error;
pub mod planner_config;

// 重导出
pub use constraint_store::ConstraintStore;
pub use error::{ConfigError, ConfigResult};
pub use planner_config::PlannerConfig;
