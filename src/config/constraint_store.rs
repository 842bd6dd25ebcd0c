// ==========================================
// 泊位分配系统 - 泊位约束集读取
// ==========================================
// 格式: JSON 对象, 泊位ID → ConstraintSet
// 红线: 只读, 不负责回写
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::constraint::ConstraintSet;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

// ==========================================
// ConstraintStore - 泊位约束集仓
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConstraintStore {
    sets: HashMap<String, ConstraintSet>,
}

impl ConstraintStore {
    /// 解析约束集 JSON
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let sets: HashMap<String, ConstraintSet> = serde_json::from_str(json)?;
        Ok(Self { sets })
    }

    /// 从文件读取约束集
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let store = Self::from_json(&raw)?;
        info!(path = %path.display(), berths = store.len(), "已加载泊位约束集");
        Ok(store)
    }

    pub fn get(&self, berth_id: &str) -> Option<&ConstraintSet> {
        self.sets.get(berth_id)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// 交出全部约束集（用于构建校验器）
    pub fn into_sets(self) -> HashMap<String, ConstraintSet> {
        self.sets
    }
}
