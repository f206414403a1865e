//! 파이프라인 설정 파일 로드/저장 (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::augmenter::Mode;
use crate::error::DatasetError;

/// 데이터셋 증강 파이프라인 설정
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// 텍스트 컬럼 이름
    #[serde(default = "default_text_column")]
    pub text_column: String,
    /// 라벨 컬럼 이름
    #[serde(default = "default_label_column")]
    pub label_column: String,
    /// 저장할 때 쓰는 텍스트 컬럼 이름
    #[serde(default = "default_output_text_column")]
    pub output_text_column: String,
    /// 검증 데이터 비율
    #[serde(default = "default_validation_ratio")]
    pub validation_ratio: f64,
    /// 분리/증강/끼워 넣기에 쓰는 시드
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// 글자 단위 노이즈 확률
    #[serde(default = "default_probability")]
    pub probability: f64,
    /// 학습 행마다 순서대로 적용할 모드
    #[serde(default = "default_modes")]
    pub modes: Vec<Mode>,
}

fn default_text_column() -> String {
    "paragraph".to_string()
}

fn default_label_column() -> String {
    "label".to_string()
}

fn default_output_text_column() -> String {
    "news".to_string()
}

fn default_validation_ratio() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    42
}

fn default_probability() -> f64 {
    1.0
}

fn default_modes() -> Vec<Mode> {
    vec![
        Mode::WordPerturbation,
        Mode::DotInsertion,
        Mode::SlangSubstitution,
        Mode::VowelSubstitution,
        Mode::SplittingNoise,
    ]
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            text_column: default_text_column(),
            label_column: default_label_column(),
            output_text_column: default_output_text_column(),
            validation_ratio: default_validation_ratio(),
            seed: default_seed(),
            probability: default_probability(),
            modes: default_modes(),
        }
    }
}

/// 설정 파일 로드 (파일 없으면 기본값, 파싱 실패는 에러)
pub fn load_config(path: impl AsRef<Path>) -> Result<PipelineConfig, DatasetError> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("설정 파일 없음, 기본값 사용: {}", path.display());
            Ok(PipelineConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// 설정 파일 저장
pub fn save_config(path: impl AsRef<Path>, config: &PipelineConfig) -> Result<(), DatasetError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}
