// ==========================================
// 捐赠税务申报 - 命令行入口
// ==========================================
// 用法: oppgave-loader --year 2023 [--db path]
// 每次运行处理一批（最多 1000 个联系人），由调度器重复触发直到全部处理完
// ==========================================

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use oppgave_loader::api::TaxYearApi;
use oppgave_loader::db::{ensure_job_schema, open_sqlite_connection};
use oppgave_loader::logging;

/// 命令行参数
struct CliArgs {
    year: Option<String>,
    db_path: Option<String>,
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = CliArgs {
        year: None,
        db_path: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--year" | "-y" => {
                args.year = Some(iter.next().ok_or("--year 需要参数")?);
            }
            "--db" => {
                args.db_path = Some(iter.next().ok_or("--db 需要参数")?);
            }
            "--help" | "-h" => {
                return Err("用法: oppgave-loader --year <YYYY> [--db <path>]".to_string());
            }
            other => return Err(format!("未知参数: {}", other)),
        }
    }
    Ok(args)
}

/// 获取默认数据库路径
///
/// 优先级: --db > OPPGAVE_LOADER_DB_PATH > 用户数据目录
fn default_db_path() -> String {
    if let Ok(path) = std::env::var("OPPGAVE_LOADER_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./oppgave.db");
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("oppgave-loader");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("oppgave.db");
        }
    }
    path.to_string_lossy().into_owned()
}

fn run(args: CliArgs) -> anyhow::Result<String> {
    let db_path = args.db_path.unwrap_or_else(default_db_path);
    tracing::info!("使用数据库: {}", db_path);

    let conn = open_sqlite_connection(&db_path)?;
    ensure_job_schema(&conn)?;
    let api = TaxYearApi::new(Arc::new(Mutex::new(conn)));

    let mut params = serde_json::Map::new();
    if let Some(year) = args.year {
        params.insert("year".to_string(), serde_json::Value::String(year));
    }

    let response = api.load(&params)?;
    Ok(serde_json::to_string_pretty(&response)?)
}

fn main() -> ExitCode {
    logging::init();
    tracing::info!("{} v{}", oppgave_loader::APP_NAME, oppgave_loader::VERSION);

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("TaxYear.Load 失败: {}", e);
            let envelope = serde_json::json!({
                "is_error": 1,
                "error_message": e.to_string(),
            });
            println!("{}", envelope);
            ExitCode::FAILURE
        }
    }
}
