// ==========================================
// 泊位分配系统 - 字段映射器
// ==========================================
// 职责: 原始行 → 领域记录, 类型转换 + 缺省值替换
// 缺省: 作业时间 24h / 限制严重度 medium / 限制范围空 = 全部泊位
// 缺省: 船级 = 船型 / 航速 10 节 / 优先级 5 / 名称 = ID
// ==========================================

use crate::domain::{
    Berth, BerthType, CargoPlan, OperatingHours, Restriction, RestrictionSeverity,
    RestrictionType, Vessel, VesselType,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRow;
use chrono::NaiveDate;

pub const DEFAULT_SPEED_KN: f64 = 10.0;
pub const DEFAULT_PRIORITY: u32 = 5;

pub const BERTH_COLUMNS: &[&str] = &[
    "berth_id",
    "berth_type",
    "max_loa_m",
    "max_beam_m",
    "max_draft_m",
    "cargo_types",
    "load_rate_t_per_day",
];
pub const VESSEL_COLUMNS: &[&str] = &[
    "vessel_id",
    "vessel_type",
    "cargo_type",
    "capacity_t",
    "loa_m",
    "beam_m",
    "draft_m",
    "destination",
];
pub const CARGO_PLAN_COLUMNS: &[&str] = &[
    "cargo_id",
    "cargo_type",
    "quantity_t",
    "destination",
    "earliest_date",
    "latest_date",
];
pub const RESTRICTION_COLUMNS: &[&str] = &[
    "restriction_id",
    "restriction_type",
    "start_date",
    "end_date",
];

pub struct FieldMapper;

impl FieldMapper {
    // ==========================================
    // 记录映射
    // ==========================================

    pub fn map_berth(&self, row: &RawRow) -> ImportResult<Berth> {
        let berth_id = self.require_string(row, "berth_id")?;
        Ok(Berth {
            name: self.get_string(row, "name").unwrap_or_else(|| berth_id.clone()),
            berth_type: self.require_enum(row, "berth_type", BerthType::from_str)?,
            max_loa_m: self.require_f64(row, "max_loa_m")?,
            max_beam_m: self.require_f64(row, "max_beam_m")?,
            max_draft_m: self.require_f64(row, "max_draft_m")?,
            cargo_types: self.parse_list(row, "cargo_types"),
            load_rate_t_per_day: self.require_f64(row, "load_rate_t_per_day")?,
            operating_hours: self
                .parse_enum(row, "operating_hours", OperatingHours::from_str)?
                .unwrap_or(OperatingHours::Continuous),
            constraint_set: self.get_string(row, "constraint_set"),
            berth_id,
        })
    }

    pub fn map_vessel(&self, row: &RawRow) -> ImportResult<Vessel> {
        let vessel_id = self.require_string(row, "vessel_id")?;
        let vessel_type = self.require_enum(row, "vessel_type", VesselType::from_str)?;
        Ok(Vessel {
            name: self.get_string(row, "name").unwrap_or_else(|| vessel_id.clone()),
            vessel_class: self
                .get_string(row, "vessel_class")
                .unwrap_or_else(|| vessel_type.as_str().to_string()),
            vessel_type,
            cargo_type: self.require_string(row, "cargo_type")?,
            capacity_t: self.require_f64(row, "capacity_t")?,
            loa_m: self.require_f64(row, "loa_m")?,
            beam_m: self.require_f64(row, "beam_m")?,
            draft_m: self.require_f64(row, "draft_m")?,
            speed_kn: self.parse_f64(row, "speed_kn")?.unwrap_or(DEFAULT_SPEED_KN),
            destination: self.require_string(row, "destination")?,
            vessel_id,
        })
    }

    pub fn map_cargo_plan(&self, row: &RawRow) -> ImportResult<CargoPlan> {
        let earliest_date = self.require_date(row, "earliest_date")?;
        let latest_date = self.require_date(row, "latest_date")?;
        if earliest_date > latest_date {
            return Err(ImportError::InvalidDateRange {
                row: row.row_number,
                start: earliest_date.to_string(),
                end: latest_date.to_string(),
            });
        }

        Ok(CargoPlan {
            cargo_id: self.require_string(row, "cargo_id")?,
            cargo_type: self.require_string(row, "cargo_type")?,
            quantity_t: self.require_f64(row, "quantity_t")?,
            destination: self.require_string(row, "destination")?,
            priority: self.parse_u32(row, "priority")?.unwrap_or(DEFAULT_PRIORITY),
            earliest_date,
            latest_date,
            preferred_vessel_id: self.get_string(row, "preferred_vessel_id"),
        })
    }

    pub fn map_restriction(&self, row: &RawRow) -> ImportResult<Restriction> {
        let start_date = self.require_date(row, "start_date")?;
        let end_date = self.require_date(row, "end_date")?;
        if start_date > end_date {
            return Err(ImportError::InvalidDateRange {
                row: row.row_number,
                start: start_date.to_string(),
                end: end_date.to_string(),
            });
        }

        Ok(Restriction {
            restriction_id: self.require_string(row, "restriction_id")?,
            restriction_type: self.require_enum(
                row,
                "restriction_type",
                RestrictionType::from_str,
            )?,
            start_date,
            end_date,
            berth_id: self.get_string(row, "berth_id"),
            severity: self
                .parse_enum(row, "severity", RestrictionSeverity::from_str)?
                .unwrap_or(RestrictionSeverity::Medium),
            description: self.get_string(row, "description"),
        })
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        row.get(key).map(|v| v.to_string())
    }

    fn require_string(&self, row: &RawRow, key: &str) -> ImportResult<String> {
        self.get_string(row, key)
            .ok_or_else(|| missing(row, key))
    }

    /// 解析浮点数
    fn parse_f64(&self, row: &RawRow, key: &str) -> ImportResult<Option<f64>> {
        match row.get(key) {
            None => Ok(None),
            Some(value) => value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Some)
                .ok_or_else(|| ImportError::TypeConversionError {
                    row: row.row_number,
                    field: key.to_string(),
                    message: format!("无法解析为浮点数: {}", value),
                }),
        }
    }

    fn require_f64(&self, row: &RawRow, key: &str) -> ImportResult<f64> {
        self.parse_f64(row, key)?.ok_or_else(|| missing(row, key))
    }

    /// 解析非负整数
    fn parse_u32(&self, row: &RawRow, key: &str) -> ImportResult<Option<u32>> {
        match row.get(key) {
            None => Ok(None),
            Some(value) => value
                .parse::<u32>()
                .map(Some)
                .map_err(|_| ImportError::TypeConversionError {
                    row: row.row_number,
                    field: key.to_string(),
                    message: format!("无法解析为非负整数: {}", value),
                }),
        }
    }

    /// 解析日期（YYYY-MM-DD, 兼容 YYYYMMDD）
    fn parse_date(&self, row: &RawRow, key: &str) -> ImportResult<Option<NaiveDate>> {
        match row.get(key) {
            None => Ok(None),
            Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(value, "%Y%m%d"))
                .map(Some)
                .map_err(|_| ImportError::DateFormatError {
                    row: row.row_number,
                    field: key.to_string(),
                    value: value.to_string(),
                }),
        }
    }

    fn require_date(&self, row: &RawRow, key: &str) -> ImportResult<NaiveDate> {
        self.parse_date(row, key)?.ok_or_else(|| missing(row, key))
    }

    fn parse_enum<T>(
        &self,
        row: &RawRow,
        key: &str,
        parse: fn(&str) -> Option<T>,
    ) -> ImportResult<Option<T>> {
        match row.get(key) {
            None => Ok(None),
            Some(value) => parse(value)
                .map(Some)
                .ok_or_else(|| ImportError::TypeConversionError {
                    row: row.row_number,
                    field: key.to_string(),
                    message: format!("未知取值: {}", value),
                }),
        }
    }

    fn require_enum<T>(
        &self,
        row: &RawRow,
        key: &str,
        parse: fn(&str) -> Option<T>,
    ) -> ImportResult<T> {
        self.parse_enum(row, key, parse)?
            .ok_or_else(|| missing(row, key))
    }

    /// 逗号分隔列表, 忽略空项
    fn parse_list(&self, row: &RawRow, key: &str) -> Vec<String> {
        row.get(key)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn missing(row: &RawRow, key: &str) -> ImportError {
    ImportError::MissingField {
        row: row.row_number,
        field: key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        RawRow {
            row_number: 2,
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn test_map_berth_with_defaults() {
        let r = row(&[
            ("berth_id", "B01"),
            ("berth_type", "dry"),
            ("max_loa_m", "110"),
            ("max_beam_m", "11.45"),
            ("max_draft_m", "3.5"),
            ("cargo_types", "SFO, MEAL,,"),
            ("load_rate_t_per_day", "2500"),
        ]);
        let berth = FieldMapper.map_berth(&r).unwrap();

        assert_eq!(berth.name, "B01");
        assert_eq!(berth.cargo_types, vec!["SFO", "MEAL"]);
        assert_eq!(berth.operating_hours, OperatingHours::Continuous);
        assert_eq!(berth.max_beam_m, 11.45);
    }

    #[test]
    fn test_map_vessel_defaults() {
        let r = row(&[
            ("vessel_id", "V1"),
            ("vessel_type", "dry-cargo"),
            ("cargo_type", "SFO"),
            ("capacity_t", "3000"),
            ("loa_m", "100"),
            ("beam_m", "11"),
            ("draft_m", "3"),
            ("destination", "ROTTERDAM"),
        ]);
        let vessel = FieldMapper.map_vessel(&r).unwrap();

        assert_eq!(vessel.vessel_type, VesselType::DryCargo);
        assert_eq!(vessel.vessel_class, "dry_cargo");
        assert_eq!(vessel.speed_kn, DEFAULT_SPEED_KN);
    }

    #[test]
    fn test_map_cargo_plan_dates_and_priority() {
        let r = row(&[
            ("cargo_id", "C1"),
            ("cargo_type", "SFO"),
            ("quantity_t", "1000"),
            ("destination", "ROTTERDAM"),
            ("earliest_date", "2026-03-02"),
            ("latest_date", "20260306"),
            ("preferred_vessel_id", ""),
        ]);
        let cargo = FieldMapper.map_cargo_plan(&r).unwrap();

        assert_eq!(cargo.priority, DEFAULT_PRIORITY);
        assert_eq!(cargo.latest_date, NaiveDate::from_ymd_opt(2026, 3, 6).unwrap());
        assert_eq!(cargo.preferred_vessel_id, None);
    }

    #[test]
    fn test_inverted_cargo_window_rejected() {
        let r = row(&[
            ("cargo_id", "C1"),
            ("cargo_type", "SFO"),
            ("quantity_t", "1000"),
            ("destination", "ROTTERDAM"),
            ("earliest_date", "2026-03-06"),
            ("latest_date", "2026-03-02"),
        ]);
        assert!(matches!(
            FieldMapper.map_cargo_plan(&r),
            Err(ImportError::InvalidDateRange { row: 2, .. })
        ));
    }

    #[test]
    fn test_map_restriction_defaults() {
        let r = row(&[
            ("restriction_id", "R1"),
            ("restriction_type", "water-level"),
            ("start_date", "2026-03-02"),
            ("end_date", "2026-03-03"),
        ]);
        let restriction = FieldMapper.map_restriction(&r).unwrap();

        assert_eq!(restriction.restriction_type, RestrictionType::WaterLevel);
        assert_eq!(restriction.severity, RestrictionSeverity::Medium);
        assert_eq!(restriction.berth_id, None);
    }

    #[test]
    fn test_bad_values_report_row_and_field() {
        let r = row(&[
            ("restriction_id", "R1"),
            ("restriction_type", "weather"),
            ("start_date", "03/02/2026"),
        ]);
        assert!(matches!(
            FieldMapper.map_restriction(&r),
            Err(ImportError::DateFormatError { row: 2, ref field, .. }) if field == "start_date"
        ));

        let r = row(&[("berth_id", "B01"), ("berth_type", "dry"), ("max_loa_m", "abc")]);
        assert!(matches!(
            FieldMapper.map_berth(&r),
            Err(ImportError::TypeConversionError { ref field, .. }) if field == "max_loa_m"
        ));

        let r = row(&[("berth_id", "B01"), ("berth_type", "floating")]);
        assert!(matches!(
            FieldMapper.map_berth(&r),
            Err(ImportError::TypeConversionError { ref field, .. }) if field == "berth_type"
        ));
    }

    #[test]
    fn test_missing_required_field() {
        let r = row(&[("vessel_id", "V1"), ("vessel_type", "barge")]);
        assert!(matches!(
            FieldMapper.map_vessel(&r),
            Err(ImportError::MissingField { ref field, .. }) if field == "cargo_type"
        ));
    }
}
