// ==========================================
// 泊位分配系统 - 命令行入口
// ==========================================
// 用法: berth-planner <data_dir> [planner_config.json]
// 输出: 规划结果 JSON (stdout), 日志 (stderr)
// ==========================================

use anyhow::{bail, Context, Result};
use berth_planner::{
    logging, BerthPlanner, ConstraintValidator, PlannerConfig, SnapshotImporter, APP_NAME,
    VERSION,
};
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    logging::init();

    let mut args = env::args().skip(1);
    let data_dir = match args.next() {
        Some(dir) => PathBuf::from(dir),
        None => bail!("用法: berth-planner <data_dir> [planner_config.json]"),
    };
    let config_path = args.next().map(PathBuf::from);

    tracing::info!("{} v{}", APP_NAME, VERSION);

    let config = match &config_path {
        Some(path) => PlannerConfig::load_from_file(path)
            .with_context(|| format!("读取规划参数失败: {}", path.display()))?,
        None => PlannerConfig::default(),
    };

    let snapshot = SnapshotImporter::default()
        .load_dir(&data_dir)
        .with_context(|| format!("导入数据目录失败: {}", data_dir.display()))?;

    let validator = ConstraintValidator::new(snapshot.constraints.into_sets());
    let mut planner = BerthPlanner::new(config, validator);
    let result = planner.plan(&snapshot.input).context("泊位分配规划失败")?;

    let json = serde_json::to_string_pretty(&result).context("规划结果序列化失败")?;
    println!("{}", json);

    Ok(())
}
