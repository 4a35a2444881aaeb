//! 밸류에이션 스크리너 CLI.

use anyhow::Context;
use clap::{Parser, Subcommand};
use screener_collector::{modules, CollectorConfig};
use screener_core::{init_logging, LogConfig, LogFormat};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "screener")]
#[command(about = "Stock valuation screener: P/E discount/premium against historical median", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, default_value = "compact", global = true)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// 워크북의 모든 심볼을 처리하고 결과 컬럼을 추가
    Run {
        /// 입력 파일 경로 (생략 시 입력 요청)
        path: Option<PathBuf>,

        /// 심볼 간 딜레이 (밀리초)
        #[arg(long)]
        delay_ms: Option<u64>,

        /// 차트 수집 끄기 (Median PE는 Error로 기록)
        #[arg(long)]
        no_chart: bool,
    },

    /// 심볼 하나를 처리하고 결과를 JSON으로 출력 (파일 변경 없음)
    Probe {
        /// 티커 또는 종목 페이지 URL
        symbol: String,

        /// 차트 수집 끄기
        #[arg(long)]
        no_chart: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 로깅 초기화
    init_logging(
        LogConfig::new(format!("{},chromiumoxide=warn", cli.log_level)).with_format(cli.log_format),
    )
    .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    // 설정 로드
    let mut config = CollectorConfig::from_env()?;
    tracing::debug!(?config, "설정 로드 완료");

    match cli.command {
        Commands::Run {
            path,
            delay_ms,
            no_chart,
        } => {
            if let Some(delay_ms) = delay_ms {
                config.request_delay_ms = delay_ms;
            }
            if no_chart {
                config.chart.enabled = false;
            }

            let path = match path {
                Some(path) => path,
                None => prompt_path()?,
            };

            tracing::info!("Screener 시작");
            modules::sync_workbook(&path, &config)
                .await
                .with_context(|| format!("처리 실패: {}", path.display()))?;
            tracing::info!("Screener 종료");
        }
        Commands::Probe { symbol, no_chart } => {
            if no_chart {
                config.chart.enabled = false;
            }

            let report = modules::probe_symbol(&symbol, &config).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// 표준 입력에서 파일 경로를 입력받습니다.
fn prompt_path() -> anyhow::Result<PathBuf> {
    print!("Enter the path of the stock list file: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    // 탐색기에서 복사한 경로의 따옴표 제거
    let path = line.trim().trim_matches(|c| c == '"' || c == '\'');
    if path.is_empty() {
        anyhow::bail!("입력 파일 경로가 비어 있습니다");
    }

    Ok(PathBuf::from(path))
}
