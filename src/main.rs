use clap::Parser;

use qrlinker::config::{Cli, Command, StaticConfig, init_config};
use qrlinker::runtime::run_server;
use qrlinker::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.command() == &Command::GenerateConfig {
        println!("{}", StaticConfig::generate_sample_config());
        return Ok(());
    }

    let config = init_config(cli.config.as_deref());
    if let Err(e) = config.validate() {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }

    // guard 必须活到进程结束，否则非阻塞日志会丢失
    let _log_guard = init_logging(&config.logging)?;

    run_server(&config).await
}
