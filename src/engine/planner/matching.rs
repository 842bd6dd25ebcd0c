// ==========================================
// 泊位分配系统 - 船舶/泊位匹配
// ==========================================
// 选船: 指定船优先, 否则首个满足货类/航线/载重/空闲的船
// 选泊位: 约束集存在时以约束集为准, 否则用泊位基础字段
// 排序: 24h 作业优先, 其次装载效率高者优先
// ==========================================

use super::BerthPlanner;
use crate::domain::{Berth, CargoPlan, ScheduleBook, Vessel};
use std::cmp::Ordering;
use tracing::debug;

impl BerthPlanner {
    /// 选船
    ///
    /// 指定船舶需货类一致且受载期内无其他靠泊任务; 不满足时退回全量扫描。
    pub(super) fn select_vessel<'a>(
        &self,
        cargo: &CargoPlan,
        vessels: &'a [Vessel],
        book: &ScheduleBook,
    ) -> Option<&'a Vessel> {
        let window_start = cargo.window_start();
        let window_end = cargo.window_end();
        let is_free =
            |vessel: &Vessel| !book.vessel_busy(&vessel.vessel_id, window_start, window_end);

        if let Some(preferred_id) = cargo.preferred_vessel_id.as_deref() {
            match vessels.iter().find(|v| v.vessel_id == preferred_id) {
                Some(vessel) if vessel.carries(&cargo.cargo_type) && is_free(vessel) => {
                    return Some(vessel);
                }
                Some(_) => debug!(
                    cargo_id = %cargo.cargo_id,
                    preferred_vessel_id = preferred_id,
                    "指定船舶货类不符或已被占用, 转为全量匹配"
                ),
                None => debug!(
                    cargo_id = %cargo.cargo_id,
                    preferred_vessel_id = preferred_id,
                    "指定船舶不存在, 按未指定处理"
                ),
            }
        }

        vessels.iter().find(|v| {
            v.carries(&cargo.cargo_type)
                && v.serves(&cargo.destination)
                && v.capacity_t >= cargo.quantity_t
                && is_free(*v)
        })
    }

    /// 选泊位
    pub(super) fn select_berth<'a>(
        &self,
        cargo: &CargoPlan,
        vessel: &Vessel,
        berths: &'a [Berth],
    ) -> Option<&'a Berth> {
        let mut candidates: Vec<&Berth> = berths
            .iter()
            .filter(|b| self.berth_accepts_cargo(b, &cargo.cargo_type))
            .filter(|b| self.berth_fits_vessel(b, vessel))
            .collect();

        candidates.sort_by(|a, b| compare_berths(a, b));
        candidates.first().copied()
    }

    fn berth_accepts_cargo(&self, berth: &Berth, cargo_type: &str) -> bool {
        match berth.constraint_key() {
            Some(key) => self.validator.check_cargo_type(key, cargo_type).is_none(),
            None => berth.handles_cargo(cargo_type),
        }
    }

    fn berth_fits_vessel(&self, berth: &Berth, vessel: &Vessel) -> bool {
        match berth.constraint_key() {
            Some(key) => self
                .validator
                .check_vessel_size(key, vessel.loa_m, vessel.beam_m, vessel.draft_m)
                .is_empty(),
            None => berth.fits_vessel(vessel.loa_m, vessel.beam_m, vessel.draft_m),
        }
    }
}

/// 24h 作业优先, 再按装载效率降序; 其余保持输入顺序
fn compare_berths(a: &Berth, b: &Berth) -> Ordering {
    b.operating_hours
        .is_continuous()
        .cmp(&a.operating_hours.is_continuous())
        .then_with(|| {
            b.load_rate_t_per_day
                .partial_cmp(&a.load_rate_t_per_day)
                .unwrap_or(Ordering::Equal)
        })
}
