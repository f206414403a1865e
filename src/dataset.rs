//! 라벨/텍스트 데이터셋 처리
//!
//! CSV 로드, 학습/검증 분리, 증강 행 끼워 넣기, TSV 저장.
//! 증강은 학습 데이터에만 적용되고 검증 데이터는 그대로 유지된다.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::augmenter::{Augmenter, Mode, Strategy};
use crate::config::PipelineConfig;
use crate::error::{AugmentError, DatasetError, ServiceError};

/// (라벨, 텍스트) 한 행
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    pub label: String,
    pub text: String,
}

impl TextRecord {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// 학습/검증 분리 결과
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<TextRecord>,
    pub validation: Vec<TextRecord>,
}

/// CSV에서 지정한 두 컬럼을 읽는다 (첫 행은 헤더)
pub fn load_records(
    path: impl AsRef<Path>,
    text_column: &str,
    label_column: &str,
) -> Result<Vec<TextRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path.as_ref())?;

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    };
    let text_idx = column(text_column)?;
    let label_idx = column(label_column)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let text = row
            .get(text_idx)
            .ok_or_else(|| DatasetError::MissingColumn(text_column.to_string()))?;
        let label = row
            .get(label_idx)
            .ok_or_else(|| DatasetError::MissingColumn(label_column.to_string()))?;
        records.push(TextRecord::new(label, text));
    }
    log::info!("{}: {}행 로드", path.as_ref().display(), records.len());
    Ok(records)
}

/// 0부터 다시 매긴 인덱스 컬럼과 함께 TSV로 저장
pub fn save_records_tsv(
    path: impl AsRef<Path>,
    records: &[TextRecord],
    text_column: &str,
    label_column: &str,
) -> Result<(), DatasetError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path.as_ref())?;
    writer.write_record(["", text_column, label_column])?;
    for (idx, record) in records.iter().enumerate() {
        writer.write_record([
            idx.to_string().as_str(),
            record.text.as_str(),
            record.label.as_str(),
        ])?;
    }
    writer.flush()?;
    log::info!("{}: {}행 저장", path.as_ref().display(), records.len());
    Ok(())
}

/// 섞은 뒤 `ceil(n × validation_ratio)`개를 검증 데이터로 분리
///
/// 학습 데이터는 입력 순서로 되돌려 반환하고, 검증 데이터는 섞인 순서 그대로 둔다.
pub fn train_validation_split<R: Rng + ?Sized>(
    records: Vec<TextRecord>,
    validation_ratio: f64,
    rng: &mut R,
) -> Result<Split, DatasetError> {
    if !(validation_ratio > 0.0 && validation_ratio < 1.0) {
        return Err(DatasetError::InvalidSplit(validation_ratio));
    }
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.shuffle(rng);
    let n_validation = ((order.len() as f64 * validation_ratio).ceil() as usize).min(order.len());
    let validation_idx = order.split_off(order.len() - n_validation);
    let mut train_idx = order;
    train_idx.sort_unstable();

    let mut slots: Vec<Option<TextRecord>> = records.into_iter().map(Some).collect();
    let mut take = |indices: &[usize]| -> Vec<TextRecord> {
        indices.iter().filter_map(|&i| slots[i].take()).collect()
    };
    let train = take(&train_idx);
    let validation = take(&validation_idx);
    Ok(Split { train, validation })
}

/// 라벨마다 최대 `per_label`개를 무작위로 남긴다 (원래 순서 유지)
pub fn sample_per_label<R: Rng + ?Sized>(
    records: &[TextRecord],
    per_label: usize,
    rng: &mut R,
) -> Vec<TextRecord> {
    let mut by_label: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, record) in records.iter().enumerate() {
        by_label.entry(record.label.as_str()).or_default().push(idx);
    }

    let keep: HashSet<usize> = by_label
        .values()
        .flat_map(|indices| indices.choose_multiple(rng, per_label).copied().collect::<Vec<_>>())
        .collect();

    records
        .iter()
        .enumerate()
        .filter(|(idx, _)| keep.contains(idx))
        .map(|(_, record)| record.clone())
        .collect()
}

/// 증강 행을 원본 사이에 끼워 넣는다
///
/// `originals`는 입력 순서대로 주어져야 한다. 증강 행은 임의의 원본 행 바로
/// 뒤(원본 위치 + 0.5)에 놓이고, 위치 기준 안정 정렬 후 0부터 다시 번호가
/// 매겨진다. 같은 원본 뒤에 놓인 증강 행들은 추가된 순서를 유지한다.
/// 원본이 없으면 증강 행만 순서대로 반환한다.
pub fn interleave<R: Rng + ?Sized>(
    originals: Vec<TextRecord>,
    synthetic: Vec<TextRecord>,
    rng: &mut R,
) -> Vec<TextRecord> {
    if originals.is_empty() {
        return synthetic;
    }
    let n = originals.len();

    // 위치를 두 배로 잡아 정수로 정렬: 원본 i -> 2i, 증강 -> 2k + 1
    let mut positioned: Vec<(usize, TextRecord)> = originals
        .into_iter()
        .enumerate()
        .map(|(i, record)| (2 * i, record))
        .collect();
    for record in synthetic {
        let anchor = rng.gen_range(0..n);
        positioned.push((2 * anchor + 1, record));
    }
    positioned.sort_by_key(|(pos, _)| *pos);
    positioned.into_iter().map(|(_, record)| record).collect()
}

/// 학습 행마다 모든 증강기를 순서대로 적용해 증강 행을 만든다
///
/// 증강 행은 원래 행의 라벨을 그대로 가진다.
pub fn synthesize(
    train: &[TextRecord],
    augmenters: &mut [Augmenter],
) -> Result<Vec<TextRecord>, AugmentError> {
    let mut synthetic = Vec::with_capacity(train.len() * augmenters.len());
    for record in train {
        for augmenter in augmenters.iter_mut() {
            let text = augmenter.augment(&record.text)?;
            synthetic.push(TextRecord::new(record.label.clone(), text));
        }
    }
    Ok(synthetic)
}

/// 분리 -> 증강 -> 끼워 넣기
pub fn augment_dataset<R: Rng + ?Sized>(
    records: Vec<TextRecord>,
    augmenters: &mut [Augmenter],
    validation_ratio: f64,
    rng: &mut R,
) -> Result<Split, DatasetError> {
    let Split { train, validation } = train_validation_split(records, validation_ratio, rng)?;
    log::info!("학습 {}행, 검증 {}행", train.len(), validation.len());

    let synthetic = synthesize(&train, augmenters)?;
    log::info!("증강 {}행 생성", synthetic.len());

    Ok(Split {
        train: interleave(train, synthetic, rng),
        validation,
    })
}

/// 설정의 모드마다 증강기를 만든다 (모드별로 시드를 달리함)
///
/// 외부 서비스가 필요한 모드는 파이프라인에서 쓸 수 없다.
pub fn build_augmenters(config: &PipelineConfig) -> Result<Vec<Augmenter>, AugmentError> {
    config
        .modes
        .iter()
        .enumerate()
        .map(|(i, &mode)| -> Result<Augmenter, AugmentError> {
            if mode.needs_service() {
                return Err(ServiceError::MissingService(service_name(mode)).into());
            }
            let strategy = Strategy::from_mode(mode, config.probability)?;
            Ok(Augmenter::new(strategy)?.with_seed(config.seed.wrapping_add(i as u64 + 1)))
        })
        .collect()
}

fn service_name(mode: Mode) -> &'static str {
    match mode {
        Mode::BackTranslation => "translator",
        _ => "mask filler",
    }
}

/// 입력 CSV를 증강해 `out_dir`에 `train.tsv`, `val.tsv`로 저장
pub fn run_pipeline(
    config: &PipelineConfig,
    input: impl AsRef<Path>,
    out_dir: impl AsRef<Path>,
) -> Result<Split, DatasetError> {
    let out_dir = out_dir.as_ref();
    let records = load_records(input, &config.text_column, &config.label_column)?;
    let mut augmenters = build_augmenters(config)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let split = augment_dataset(records, &mut augmenters, config.validation_ratio, &mut rng)?;

    std::fs::create_dir_all(out_dir)?;
    save_records_tsv(
        out_dir.join("train.tsv"),
        &split.train,
        &config.output_text_column,
        &config.label_column,
    )?;
    save_records_tsv(
        out_dir.join("val.tsv"),
        &split.validation,
        &config.output_text_column,
        &config.label_column,
    )?;
    Ok(split)
}
