mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志系统
    loadcheck::logger::init_logger();

    let cli = Cli::parse();
    if !cli::run(cli).await? {
        std::process::exit(1);
    }
    Ok(())
}
