// ==========================================
// 泊位分配系统 - 规划快照导入
// ==========================================
// 职责: 从数据目录组装 PlanningInput + 约束集
// 文件: berths.csv / vessels.csv / cargo_plans.csv (必需)
//       restrictions.csv / constraints.json (可选)
// 红线: 任一数据错误立即失败, 不做部分导入
// ==========================================

use crate::config::ConstraintStore;
use crate::domain::{Berth, CargoPlan, Vessel};
use crate::engine::PlanningInput;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{
    FieldMapper, BERTH_COLUMNS, CARGO_PLAN_COLUMNS, RESTRICTION_COLUMNS, VESSEL_COLUMNS,
};
use crate::importer::file_parser::{CsvParser, RawRow};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, instrument, warn};

pub const BERTHS_FILE: &str = "berths.csv";
pub const VESSELS_FILE: &str = "vessels.csv";
pub const CARGO_PLANS_FILE: &str = "cargo_plans.csv";
pub const RESTRICTIONS_FILE: &str = "restrictions.csv";
pub const CONSTRAINTS_FILE: &str = "constraints.json";

/// 导入结果: 规划输入 + 泊位约束集
#[derive(Debug, Clone, Default)]
pub struct PlanningSnapshot {
    pub input: PlanningInput,
    pub constraints: ConstraintStore,
}

// ==========================================
// SnapshotImporter
// ==========================================
pub struct SnapshotImporter {
    parser: CsvParser,
    mapper: FieldMapper,
}

impl Default for SnapshotImporter {
    fn default() -> Self {
        Self::new(CsvParser::default())
    }
}

impl SnapshotImporter {
    pub fn new(parser: CsvParser) -> Self {
        Self {
            parser,
            mapper: FieldMapper,
        }
    }

    /// 读取数据目录
    #[instrument(skip(self, dir), fields(dir = %dir.as_ref().display()))]
    pub fn load_dir<P: AsRef<Path>>(&self, dir: P) -> ImportResult<PlanningSnapshot> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ImportError::FileNotFound(dir.display().to_string()));
        }

        let mut berths =
            self.load_table(dir, BERTHS_FILE, BERTH_COLUMNS, |r| self.mapper.map_berth(r))?;
        let vessels =
            self.load_table(dir, VESSELS_FILE, VESSEL_COLUMNS, |r| self.mapper.map_vessel(r))?;
        let mut cargo_plans = self.load_table(dir, CARGO_PLANS_FILE, CARGO_PLAN_COLUMNS, |r| {
            self.mapper.map_cargo_plan(r)
        })?;

        let restrictions = if dir.join(RESTRICTIONS_FILE).exists() {
            self.load_table(dir, RESTRICTIONS_FILE, RESTRICTION_COLUMNS, |r| {
                self.mapper.map_restriction(r)
            })?
        } else {
            Vec::new()
        };

        let constraints_path = dir.join(CONSTRAINTS_FILE);
        let constraints = if constraints_path.exists() {
            ConstraintStore::load_from_file(&constraints_path)?
        } else {
            ConstraintStore::default()
        };

        attach_constraint_sets(&mut berths, &constraints);
        drop_unknown_preferred_vessels(&mut cargo_plans, &vessels);

        info!(
            berths = berths.len(),
            vessels = vessels.len(),
            cargo_plans = cargo_plans.len(),
            restrictions = restrictions.len(),
            constraint_sets = constraints.len(),
            "规划快照导入完成"
        );

        Ok(PlanningSnapshot {
            input: PlanningInput {
                berths,
                vessels,
                cargo_plans,
                restrictions,
            },
            constraints,
        })
    }

    fn load_table<T, F>(
        &self,
        dir: &Path,
        file: &str,
        columns: &[&str],
        map: F,
    ) -> ImportResult<Vec<T>>
    where
        F: Fn(&RawRow) -> ImportResult<T>,
    {
        let table = self.parser.parse_file(dir.join(file))?;
        table.require_columns(file, columns)?;
        table.rows.iter().map(map).collect()
    }
}

/// 泊位挂接约束集
///
/// berths.csv 未指定 constraint_set 列时, 以泊位ID查找约束集;
/// 指定的约束集不存在时按未挂接处理。
fn attach_constraint_sets(berths: &mut [Berth], constraints: &ConstraintStore) {
    for berth in berths.iter_mut() {
        match berth.constraint_set.as_deref() {
            Some(key) if constraints.get(key).is_none() => {
                warn!(
                    berth_id = %berth.berth_id,
                    constraint_set = key,
                    "挂接的约束集不存在, 已忽略"
                );
                berth.constraint_set = None;
            }
            Some(_) => {}
            None => {
                if constraints.get(&berth.berth_id).is_some() {
                    berth.constraint_set = Some(berth.berth_id.clone());
                }
            }
        }
    }
}

/// 指定船舶不在船舶表中时按未指定处理
fn drop_unknown_preferred_vessels(cargo_plans: &mut [CargoPlan], vessels: &[Vessel]) {
    let known: HashSet<&str> = vessels.iter().map(|v| v.vessel_id.as_str()).collect();
    for cargo in cargo_plans.iter_mut() {
        let unknown =
            matches!(&cargo.preferred_vessel_id, Some(id) if !known.contains(id.as_str()));
        if unknown {
            warn!(
                cargo_id = %cargo.cargo_id,
                preferred_vessel_id = ?cargo.preferred_vessel_id,
                "指定船舶不存在, 已忽略"
            );
            cargo.preferred_vessel_id = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn minimal_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            BERTHS_FILE,
            "berth_id;name;berth_type;max_loa_m;max_beam_m;max_draft_m;cargo_types;load_rate_t_per_day;operating_hours\n\
             B01;Berth 1;dry;110;11.5;3.5;SFO,MEAL;2500;24h\n",
        );
        write(
            dir.path(),
            VESSELS_FILE,
            "vessel_id;vessel_type;cargo_type;capacity_t;loa_m;beam_m;draft_m;destination\n\
             V1;barge;SFO;3000;100;11;3;ROTTERDAM\n",
        );
        write(
            dir.path(),
            CARGO_PLANS_FILE,
            "cargo_id;cargo_type;quantity_t;destination;priority;earliest_date;latest_date;preferred_vessel_id\n\
             C1;SFO;1000;ROTTERDAM;1;2026-03-02;2026-03-06;V9\n",
        );
        dir
    }

    #[test]
    fn test_load_minimal_dir() {
        let dir = minimal_dir();
        let snapshot = SnapshotImporter::default().load_dir(dir.path()).unwrap();

        assert_eq!(snapshot.input.berths.len(), 1);
        assert_eq!(snapshot.input.vessels.len(), 1);
        assert!(snapshot.input.restrictions.is_empty());
        assert!(snapshot.constraints.is_empty());
        // 未知指定船舶被清除
        assert_eq!(snapshot.input.cargo_plans[0].preferred_vessel_id, None);
    }

    #[test]
    fn test_missing_required_file() {
        let dir = minimal_dir();
        fs::remove_file(dir.path().join(VESSELS_FILE)).unwrap();
        assert!(matches!(
            SnapshotImporter::default().load_dir(dir.path()),
            Err(ImportError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_missing_column() {
        let dir = minimal_dir();
        write(
            dir.path(),
            RESTRICTIONS_FILE,
            "restriction_id;start_date;end_date\nR1;2026-03-02;2026-03-03\n",
        );
        assert!(matches!(
            SnapshotImporter::default().load_dir(dir.path()),
            Err(ImportError::MissingColumn { ref column, .. }) if column == "restriction_type"
        ));
    }

    // 测试: 显式挂接、按泊位ID挂接、挂接不存在的约束集
    #[test]
    fn test_constraint_sets_attached_to_berths() {
        let dir = minimal_dir();
        write(
            dir.path(),
            BERTHS_FILE,
            "berth_id;berth_type;max_loa_m;max_beam_m;max_draft_m;cargo_types;load_rate_t_per_day;constraint_set\n\
             B01;dry;110;11.5;3.5;SFO;2500;RIVER\n\
             B02;dry;110;11.5;3.5;SFO;2500;GHOST\n\
             B03;dry;110;11.5;3.5;SFO;2500;\n\
             B04;dry;110;11.5;3.5;SFO;2500;\n",
        );
        write(dir.path(), CONSTRAINTS_FILE, r#"{"RIVER": {}, "B03": {}}"#);

        let snapshot = SnapshotImporter::default().load_dir(dir.path()).unwrap();
        let keys: Vec<Option<&str>> = snapshot
            .input
            .berths
            .iter()
            .map(|b| b.constraint_key())
            .collect();
        assert_eq!(keys, vec![Some("RIVER"), None, Some("B03"), None]);
    }

    #[test]
    fn test_bad_constraints_json() {
        let dir = minimal_dir();
        write(dir.path(), CONSTRAINTS_FILE, "{ broken");
        assert!(matches!(
            SnapshotImporter::default().load_dir(dir.path()),
            Err(ImportError::Config(_))
        ));
    }
}
