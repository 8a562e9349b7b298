use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use loadcheck::probe::{self, ProbeOptions};
use loadcheck::report::{Reporter, Summary};
use loadcheck::{
    CheckRegistry, Config, ConfigLoader, MetricsRecorder, ResponseValidator, replay,
};
use tracing::{debug, info};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 配置文件路径（默认在当前目录及父目录查找 loadcheck.toml）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 响应时间阈值（毫秒），覆盖配置文件与环境变量
    #[arg(long, global = true)]
    pub max_response_time_ms: Option<f64>,

    /// 关闭彩色输出
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 校验 JSON Lines 文件中记录的响应
    Replay {
        path: PathBuf,

        /// 将结果导出为 JSON 文件
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// 对 URL 发送 GET 请求并校验
    Probe {
        url: String,

        #[arg(long, default_value = "probe")]
        name: String,

        /// 期望状态码
        #[arg(long)]
        expect: Option<u16>,

        #[arg(long, default_value_t = 1)]
        count: usize,

        /// 按异常路径校验（期望错误状态码与错误信息）
        #[arg(long)]
        error: bool,

        /// 单个请求超时（秒）
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },
}

/// 配置优先级：CLI > 环境变量 > 配置文件 > 默认值
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_path(path)?,
        None => ConfigLoader::find_and_load().unwrap_or_default(),
    };
    ConfigLoader::apply_env_overrides(&mut config);

    if let Some(ms) = cli.max_response_time_ms {
        anyhow::ensure!(
            ms.is_finite() && ms > 0.0,
            "--max-response-time-ms must be positive"
        );
        config.validation.max_response_time_ms = ms;
    }

    debug!(?config, "Resolved config");
    Ok(config)
}

/// 运行命令，返回是否全部检查通过
pub async fn run(cli: Cli) -> Result<bool> {
    let config = resolve_config(&cli)?;
    let validator =
        ResponseValidator::new(config.validation, MetricsRecorder::new(), CheckRegistry::new());
    let reporter = Reporter::new(!cli.no_color);

    match cli.command {
        Commands::Replay { path, export } => {
            let records = replay::load_records(&path)?;
            info!(path = %path.display(), count = records.len(), "Replaying responses");
            replay::run(&records, &validator);

            let summary = Summary::collect(validator.checks(), validator.metrics());
            reporter.print_summary(&summary);
            if let Some(export) = export {
                reporter.export_json(&summary, export)?;
            }
            Ok(summary.all_passed())
        }
        Commands::Probe {
            url,
            name,
            expect,
            count,
            error,
            timeout,
        } => {
            let client = probe::build_client(Duration::from_secs(timeout))?;
            let options = ProbeOptions {
                test_name: name,
                expected_status: expect,
                count,
                expect_error: error,
            };
            probe::run(&client, &url, &options, &validator).await;

            let summary = Summary::collect(validator.checks(), validator.metrics());
            reporter.print_summary(&summary);
            Ok(summary.all_passed())
        }
    }
}
