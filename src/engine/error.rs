// ==========================================
// 泊位分配系统 - 引擎层错误类型
// ==========================================
// 红线: 落位失败不是错误, 以 PlanningConflict 数据返回
// 仅输入快照本身不合法时报错
// ==========================================

use crate::config::ConfigError;
use thiserror::Error;

/// 规划引擎错误类型
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("泊位装载效率无效: berth_id={berth_id}, load_rate={load_rate}")]
    InvalidLoadRate { berth_id: String, load_rate: f64 },

    #[error("泊位ID重复: {0}")]
    DuplicateBerth(String),

    #[error("泊位挂接的约束集未登记: berth_id={berth_id}, constraint_set={constraint_set}")]
    UnknownConstraintSet {
        berth_id: String,
        constraint_set: String,
    },

    #[error("规划配置无效: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Result 类型别名
pub type PlannerResult<T> = Result<T, PlannerError>;
