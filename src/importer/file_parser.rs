// ==========================================
// 泊位分配系统 - CSV 文件解析器
// ==========================================
// 格式: 分号分隔, 首行为表头, 值去除首尾空白
// 红线: 完全空白的行跳过; 缺少必需列立即报错
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 原始行: 表头 → 去空白后的值
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub row_number: usize, // 文件行号（表头为第 1 行）
    pub fields: HashMap<String, String>,
}

impl RawRow {
    /// 取字段值, 空串视为缺失
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty())
    }
}

/// 解析后的表
#[derive(Debug, Clone, Default)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl ParsedTable {
    /// 检查必需列
    pub fn require_columns(&self, file: &str, columns: &[&str]) -> ImportResult<()> {
        for column in columns {
            if !self.headers.iter().any(|h| h == column) {
                return Err(ImportError::MissingColumn {
                    file: file.to_string(),
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }
}

// ==========================================
// CsvParser
// ==========================================
pub struct CsvParser {
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { delimiter: b';' }
    }
}

impl CsvParser {
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> ImportResult<ParsedTable> {
        let path = path.as_ref();

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        self.parse_reader(file)
    }

    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<ParsedTable> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let row_number = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2);

            let fields: HashMap<String, String> = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.clone(), v.trim().to_string()))
                .collect();

            // 跳过完全空白的行
            if fields.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(RawRow { row_number, fields });
        }

        Ok(ParsedTable { headers, rows })
    }
}
