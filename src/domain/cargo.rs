// ==========================================
// 泊位分配系统 - 货运计划领域模型
// ==========================================
// 生命周期: 由外部读取, 被规划器恰好消费一次
// (落位为 BerthingSlot 或进入未分配列表), 不被修改
// ==========================================

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ==========================================
// CargoPlan - 货运计划
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CargoPlan {
    pub cargo_id: String,                    // 货运计划ID
    pub cargo_type: String,                  // 货类
    pub quantity_t: f64,                     // 数量 (吨)
    pub destination: String,                 // 目的地
    pub priority: u32,                       // 优先级 (1 = 最高)
    pub earliest_date: NaiveDate,            // 受载期起
    pub latest_date: NaiveDate,              // 受载期止
    pub preferred_vessel_id: Option<String>, // 指定船舶 (可选)
}

impl CargoPlan {
    /// 受载期起始时刻 (earliest_date 00:00)
    pub fn window_start(&self) -> NaiveDateTime {
        self.earliest_date.and_time(NaiveTime::MIN)
    }

    /// 受载期结束时刻 (latest_date 次日 00:00, 开区间)
    pub fn window_end(&self) -> NaiveDateTime {
        self.latest_date
            .succ_opt()
            .unwrap_or(self.latest_date)
            .and_time(NaiveTime::MIN)
    }

    /// 规划顺序: 优先级升序, 再按受载期起升序
    pub fn planning_order(a: &CargoPlan, b: &CargoPlan) -> Ordering {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.earliest_date.cmp(&b.earliest_date))
    }
}
