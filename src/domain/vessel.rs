// ==========================================
// 泊位分配系统 - 船舶领域模型
// ==========================================
// 红线: 船舶为只读输入, 引擎不创建也不修改船舶
// ==========================================

use crate::domain::types::VesselType;
use serde::{Deserialize, Serialize};

// ==========================================
// Vessel - 船舶
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vessel {
    pub vessel_id: String,        // 船舶ID
    pub name: String,             // 船名
    pub vessel_type: VesselType,  // 船型
    pub vessel_class: String,     // 船级标签
    pub cargo_type: String,       // 主营货类

    // ===== 载重与尺度 =====
    pub capacity_t: f64,          // 载重 (吨)
    pub loa_m: f64,               // 船长 (米)
    pub beam_m: f64,              // 船宽 (米)
    pub draft_m: f64,             // 吃水 (米)
    pub speed_kn: f64,            // 航速 (节)

    pub destination: String,      // 航线/目的地归属
}

impl Vessel {
    pub fn carries(&self, cargo_type: &str) -> bool {
        self.cargo_type.eq_ignore_ascii_case(cargo_type)
    }

    pub fn serves(&self, destination: &str) -> bool {
        self.destination.trim().eq_ignore_ascii_case(destination.trim())
    }
}
