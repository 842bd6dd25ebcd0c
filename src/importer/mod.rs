// ==========================================
// 泊位分配系统 - 导入层
// ==========================================
// 职责: 外部数据文件 → 规划输入快照
// 支持: 分号分隔 CSV + 约束集 JSON
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod snapshot;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ParsedTable, RawRow};
pub use snapshot::{PlanningSnapshot, SnapshotImporter};
