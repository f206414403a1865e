//! koaug - 한국어 텍스트 데이터 증강 CLI

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};

use koaug::config::{load_config, save_config, PipelineConfig};
use koaug::dataset::run_pipeline;
use koaug::{Augmenter, Mode, Strategy};

#[derive(Parser)]
#[command(name = "koaug")]
#[command(about = "한국어 텍스트 노이즈/증강 도구")]
#[command(version)]
struct Cli {
    /// 디버그 로그 출력
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// CSV 데이터셋을 분리/증강해 train.tsv, val.tsv로 저장
    Run {
        /// 입력 CSV
        input: PathBuf,

        /// 출력 디렉토리
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// 설정 파일 (없으면 기본값)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// 시드 (설정 파일 값보다 우선)
        #[arg(short, long)]
        seed: Option<u64>,

        /// 증강 모드, 여러 번 지정 가능 (설정 파일 값보다 우선)
        #[arg(short, long = "mode")]
        modes: Vec<Mode>,

        /// 글자 단위 노이즈 확률
        #[arg(short, long)]
        probability: Option<f64>,
    },

    /// 문장 하나를 증강해 출력
    Text {
        /// 증강할 문장
        text: String,

        /// 증강 모드
        #[arg(short, long, default_value = "jamo split")]
        mode: Mode,

        /// 노이즈 확률
        #[arg(short, long, default_value = "1.0")]
        probability: f64,

        /// 시드
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// 기본 설정 파일 생성
    InitConfig {
        /// 저장 경로
        #[arg(default_value = "koaug.json")]
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = execute(cli.command) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn execute(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Run {
            input,
            out_dir,
            config,
            seed,
            modes,
            probability,
        } => {
            let mut config = match config {
                Some(path) => load_config(&path)
                    .with_context(|| format!("설정 파일 로드 실패: {}", path.display()))?,
                None => PipelineConfig::default(),
            };
            if let Some(seed) = seed {
                config.seed = seed;
            }
            if !modes.is_empty() {
                config.modes = modes;
            }
            if let Some(probability) = probability {
                config.probability = probability;
            }
            log::debug!("설정: {:?}", config);

            let split = run_pipeline(&config, &input, &out_dir)
                .with_context(|| format!("증강 실패: {}", input.display()))?;
            println!(
                "train.tsv {}행, val.tsv {}행 -> {}",
                split.train.len(),
                split.validation.len(),
                out_dir.display()
            );
        }
        Commands::Text {
            text,
            mode,
            probability,
            seed,
        } => {
            let mut augmenter = Augmenter::new(Strategy::from_mode(mode, probability)?)?;
            if let Some(seed) = seed {
                augmenter = augmenter.with_seed(seed);
            }
            println!("{}", augmenter.augment(&text)?);
        }
        Commands::InitConfig { path } => {
            save_config(&path, &PipelineConfig::default())
                .with_context(|| format!("설정 파일 저장 실패: {}", path.display()))?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
