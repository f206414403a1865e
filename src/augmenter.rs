//! 증강 전략 선택 및 실행

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::dataset::{sample_per_label, TextRecord};
use crate::eda::{eda_with, DELETION_PROBABILITY};
use crate::error::{AugmentError, Result, ServiceError};
use crate::noise::{insert_dots, latin_noise, slang_noise, splitting_noise, vowel_noise};
use crate::service::{
    back_translate, model_fill, Credentials, MaskFiller, Tokenizer, Translator,
    WhitespaceTokenizer,
};

/// 역번역 기본 경유 언어
pub const DEFAULT_TARGET_LANG: &str = "en";

/// 증강 모드 이름
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mode {
    /// 자모 분리 (`jamo split`)
    SplittingNoise,
    /// 짝 모음 치환 (`vowel change`)
    VowelSubstitution,
    /// 라틴 문자 치환 (`kor2eng`)
    LatinSubstitution,
    /// 야민정음 (`yamin`)
    SlangSubstitution,
    /// 마침표 삽입 (`add dot`)
    DotInsertion,
    /// EDA (`eda`)
    WordPerturbation,
    /// 역번역 (`back translation`)
    BackTranslation,
    /// 마스크 언어 모델 (`bert`)
    ModelFill,
}

impl Mode {
    pub const ALL: [Mode; 8] = [
        Mode::SplittingNoise,
        Mode::VowelSubstitution,
        Mode::LatinSubstitution,
        Mode::SlangSubstitution,
        Mode::DotInsertion,
        Mode::WordPerturbation,
        Mode::BackTranslation,
        Mode::ModelFill,
    ];

    /// 설정 파일과 CLI에서 쓰는 이름
    pub fn name(&self) -> &'static str {
        match self {
            Mode::SplittingNoise => "jamo split",
            Mode::VowelSubstitution => "vowel change",
            Mode::LatinSubstitution => "kor2eng",
            Mode::SlangSubstitution => "yamin",
            Mode::DotInsertion => "add dot",
            Mode::WordPerturbation => "eda",
            Mode::BackTranslation => "back translation",
            Mode::ModelFill => "bert",
        }
    }

    /// 외부 서비스가 필요한 모드인지
    pub fn needs_service(&self) -> bool {
        matches!(self, Mode::BackTranslation | Mode::ModelFill)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = AugmentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "jamo split" | "splitting-noise" => Ok(Mode::SplittingNoise),
            "vowel change" | "vowel-substitution" => Ok(Mode::VowelSubstitution),
            "kor2eng" | "latin-substitution" => Ok(Mode::LatinSubstitution),
            "yamin" | "slang-substitution" => Ok(Mode::SlangSubstitution),
            "add dot" | "dot-insertion" => Ok(Mode::DotInsertion),
            "eda" | "word-perturbation" => Ok(Mode::WordPerturbation),
            "back translation" | "back-translation" => Ok(Mode::BackTranslation),
            "bert" | "model-fill" => Ok(Mode::ModelFill),
            other => Err(AugmentError::UnknownMode(other.to_string())),
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = AugmentError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.name().to_string()
    }
}

/// 전략별 설정
///
/// 각 변형은 자기 전략에 필요한 설정만 가진다.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    SplittingNoise { probability: f64 },
    VowelSubstitution { probability: f64 },
    LatinSubstitution { probability: f64 },
    SlangSubstitution { probability: f64 },
    DotInsertion { probability: f64 },
    WordPerturbation { deletion_probability: f64 },
    BackTranslation { credentials: Credentials, target_lang: String },
    ModelFill,
}

impl Strategy {
    /// 모드와 확률로 전략 생성
    ///
    /// EDA는 `probability` 대신 기본 삭제 확률을 쓰고, 역번역은 빈 인증 정보와
    /// 기본 경유 언어로 만들어진다 ([`Strategy::back_translation`] 참고).
    pub fn from_mode(mode: Mode, probability: f64) -> Result<Self> {
        check_probability(probability)?;
        Ok(match mode {
            Mode::SplittingNoise => Strategy::SplittingNoise { probability },
            Mode::VowelSubstitution => Strategy::VowelSubstitution { probability },
            Mode::LatinSubstitution => Strategy::LatinSubstitution { probability },
            Mode::SlangSubstitution => Strategy::SlangSubstitution { probability },
            Mode::DotInsertion => Strategy::DotInsertion { probability },
            Mode::WordPerturbation => Strategy::WordPerturbation {
                deletion_probability: DELETION_PROBABILITY,
            },
            Mode::BackTranslation => {
                Strategy::back_translation(Credentials::default(), DEFAULT_TARGET_LANG)
            }
            Mode::ModelFill => Strategy::ModelFill,
        })
    }

    pub fn back_translation(credentials: Credentials, target_lang: impl Into<String>) -> Self {
        Strategy::BackTranslation {
            credentials,
            target_lang: target_lang.into(),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Strategy::SplittingNoise { .. } => Mode::SplittingNoise,
            Strategy::VowelSubstitution { .. } => Mode::VowelSubstitution,
            Strategy::LatinSubstitution { .. } => Mode::LatinSubstitution,
            Strategy::SlangSubstitution { .. } => Mode::SlangSubstitution,
            Strategy::DotInsertion { .. } => Mode::DotInsertion,
            Strategy::WordPerturbation { .. } => Mode::WordPerturbation,
            Strategy::BackTranslation { .. } => Mode::BackTranslation,
            Strategy::ModelFill => Mode::ModelFill,
        }
    }

    /// 확률 값 검사
    pub fn validate(&self) -> Result<()> {
        match self {
            Strategy::SplittingNoise { probability }
            | Strategy::VowelSubstitution { probability }
            | Strategy::LatinSubstitution { probability }
            | Strategy::SlangSubstitution { probability }
            | Strategy::DotInsertion { probability } => check_probability(*probability),
            Strategy::WordPerturbation {
                deletion_probability,
            } => check_probability(*deletion_probability),
            Strategy::BackTranslation { .. } | Strategy::ModelFill => Ok(()),
        }
    }
}

fn check_probability(probability: f64) -> Result<()> {
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(AugmentError::InvalidProbability(probability))
    }
}

/// 전략 하나를 텍스트에 적용하는 증강기
///
/// 난수 생성기를 하나 소유하므로 같은 시드로 만든 증강기는 같은 결과를 낸다.
/// 여러 스레드에서 돌릴 때는 스레드마다 다른 시드로 증강기를 만든다.
pub struct Augmenter {
    strategy: Strategy,
    rng: StdRng,
    translator: Option<Box<dyn Translator>>,
    mask_filler: Option<Box<dyn MaskFiller>>,
    tokenizer: Box<dyn Tokenizer>,
}

impl Augmenter {
    /// 엔트로피 시드로 증강기 생성
    pub fn new(strategy: Strategy) -> Result<Self> {
        strategy.validate()?;
        Ok(Self {
            strategy,
            rng: StdRng::from_entropy(),
            translator: None,
            mask_filler: None,
            tokenizer: Box::new(WhitespaceTokenizer),
        })
    }

    /// 모드 이름과 확률로 증강기 생성
    pub fn from_mode_name(mode: &str, probability: f64) -> Result<Self> {
        Self::new(Strategy::from_mode(mode.parse()?, probability)?)
    }

    /// 고정 시드 설정
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// 역번역에 쓸 번역기 등록
    pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Some(Box::new(translator));
        self
    }

    /// 마스크 채우기 모델 등록
    pub fn with_mask_filler(mut self, filler: impl MaskFiller + 'static) -> Self {
        self.mask_filler = Some(Box::new(filler));
        self
    }

    /// 마스크 위치를 고를 토크나이저 교체
    pub fn with_tokenizer(mut self, tokenizer: impl Tokenizer + 'static) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn mode(&self) -> Mode {
        self.strategy.mode()
    }

    /// 텍스트 하나에 전략 적용
    pub fn augment(&mut self, text: &str) -> Result<String> {
        log::debug!("{} 적용: {} 글자", self.mode(), text.chars().count());
        let rng = &mut self.rng;
        match &self.strategy {
            Strategy::SplittingNoise { probability } => Ok(splitting_noise(text, *probability, rng)),
            Strategy::VowelSubstitution { probability } => {
                Ok(vowel_noise(text, *probability, rng)?)
            }
            Strategy::LatinSubstitution { probability } => Ok(latin_noise(text, *probability, rng)),
            Strategy::SlangSubstitution { probability } => {
                Ok(slang_noise(text, *probability, rng)?)
            }
            Strategy::DotInsertion { probability } => Ok(insert_dots(text, *probability, rng)),
            Strategy::WordPerturbation {
                deletion_probability,
            } => Ok(eda_with(text, *deletion_probability, rng)),
            Strategy::BackTranslation {
                credentials,
                target_lang,
            } => {
                let translator = self
                    .translator
                    .as_deref()
                    .ok_or(ServiceError::MissingService("translator"))?;
                Ok(back_translate(translator, text, target_lang, credentials)?)
            }
            Strategy::ModelFill => {
                let filler = self
                    .mask_filler
                    .as_deref()
                    .ok_or(ServiceError::MissingService("mask filler"))?;
                Ok(model_fill(filler, self.tokenizer.as_ref(), text, rng)?)
            }
        }
    }

    /// 모든 행의 텍스트에 전략 적용 (행 순서 유지, 라벨은 건드리지 않음)
    pub fn augment_batch(&mut self, rows: &[TextRecord]) -> Result<Vec<String>> {
        rows.iter().map(|row| self.augment(&row.text)).collect()
    }

    /// 라벨당 최대 `num_per_label`개를 뽑은 뒤 증강 (None이면 전체)
    pub fn generate(
        &mut self,
        rows: &[TextRecord],
        num_per_label: Option<usize>,
    ) -> Result<Vec<String>> {
        match num_per_label {
            Some(n) => {
                let sampled = sample_per_label(rows, n, &mut self.rng);
                self.augment_batch(&sampled)
            }
            None => self.augment_batch(rows),
        }
    }
}

/// 외부 서비스 없이 모드 하나를 적용하는 간편 함수
///
/// 역번역/마스크 채우기 모드는 [`ServiceError::MissingService`]로 실패한다.
pub fn augment_text(text: &str, mode: Mode, probability: f64) -> Result<String> {
    Augmenter::new(Strategy::from_mode(mode, probability)?)?.augment(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fakes::{FailingTranslator, FixedFiller, RecordingTranslator};

    fn records(texts: &[&str]) -> Vec<TextRecord> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| TextRecord::new(format!("label{}", i % 2), *t))
            .collect()
    }

    #[test]
    fn test_mode_names() {
        for mode in Mode::ALL {
            assert_eq!(mode.name().parse::<Mode>().unwrap(), mode);
            assert_eq!(mode.to_string(), mode.name());
        }
        assert_eq!("dot-insertion".parse::<Mode>().unwrap(), Mode::DotInsertion);
        assert_eq!(" yamin ".parse::<Mode>().unwrap(), Mode::SlangSubstitution);
    }

    #[test]
    fn test_unknown_mode() {
        assert_eq!(
            "gpt".parse::<Mode>(),
            Err(AugmentError::UnknownMode("gpt".into()))
        );
        assert!(matches!(
            Augmenter::from_mode_name("jamo-split", 1.0),
            Err(AugmentError::UnknownMode(_))
        ));
    }

    #[test]
    fn test_mode_serde() {
        let json = serde_json::to_string(&Mode::DotInsertion).unwrap();
        assert_eq!(json, "\"add dot\"");
        let mode: Mode = serde_json::from_str("\"kor2eng\"").unwrap();
        assert_eq!(mode, Mode::LatinSubstitution);
        assert!(serde_json::from_str::<Mode>("\"gpt\"").is_err());
    }

    #[test]
    fn test_invalid_probability() {
        assert_eq!(
            Strategy::from_mode(Mode::DotInsertion, 1.5),
            Err(AugmentError::InvalidProbability(1.5))
        );
        assert!(Strategy::from_mode(Mode::DotInsertion, -0.1).is_err());
        assert!(Strategy::from_mode(Mode::DotInsertion, f64::NAN).is_err());
        assert!(Augmenter::new(Strategy::VowelSubstitution { probability: 2.0 }).is_err());
    }

    #[test]
    fn test_strategy_mode() {
        for mode in Mode::ALL {
            assert_eq!(Strategy::from_mode(mode, 0.5).unwrap().mode(), mode);
        }
        assert_eq!(
            Strategy::from_mode(Mode::WordPerturbation, 0.9).unwrap(),
            Strategy::WordPerturbation {
                deletion_probability: DELETION_PROBABILITY
            }
        );
    }

    #[test]
    fn test_dispatch() {
        let mut aug = Augmenter::from_mode_name("add dot", 1.0).unwrap().with_seed(1);
        assert_eq!(aug.augment("abc").unwrap(), "a.b.c.");

        let mut aug = Augmenter::from_mode_name("vowel change", 1.0).unwrap().with_seed(1);
        assert_eq!(aug.augment("가나").unwrap(), "갸냐");

        let mut aug = Augmenter::from_mode_name("jamo split", 1.0).unwrap().with_seed(1);
        assert_eq!(aug.augment("가나").unwrap(), "ㄱㅏㄴㅏ");

        let mut aug = Augmenter::from_mode_name("kor2eng", 1.0).unwrap().with_seed(1);
        assert_eq!(aug.augment("가이").unwrap(), "7rOl");

        let mut aug = Augmenter::from_mode_name("yamin", 1.0).unwrap().with_seed(1);
        assert_eq!(aug.augment("댕댕이").unwrap(), "멍멍이");
    }

    #[test]
    fn test_seed_reproducible() {
        let text = "오늘은 날씨가 정말 좋아서 친구와 함께 공원에 갔다";
        let mut a = Augmenter::from_mode_name("eda", 1.0).unwrap().with_seed(99);
        let mut b = Augmenter::from_mode_name("eda", 1.0).unwrap().with_seed(99);
        for _ in 0..5 {
            assert_eq!(a.augment(text).unwrap(), b.augment(text).unwrap());
        }
    }

    #[test]
    fn test_augment_batch_preserves_order() {
        let rows = records(&["가", "나", "다"]);
        let mut aug = Augmenter::from_mode_name("vowel change", 1.0).unwrap();
        assert_eq!(aug.augment_batch(&rows).unwrap(), vec!["갸", "냐", "댜"]);
        assert_eq!(rows[0].text, "가");
    }

    #[test]
    fn test_generate_sampled() {
        let rows = records(&["가", "나", "다", "라", "마"]);
        let mut aug = Augmenter::from_mode_name("add dot", 1.0).unwrap().with_seed(3);
        assert_eq!(aug.generate(&rows, None).unwrap().len(), 5);
        // label0: 가 다 마, label1: 나 라
        assert_eq!(aug.generate(&rows, Some(1)).unwrap().len(), 2);
    }

    #[test]
    fn test_back_translation() {
        let strategy = Strategy::back_translation(Credentials::new("id", "secret"), "en");
        let mut aug = Augmenter::new(strategy)
            .unwrap()
            .with_translator(RecordingTranslator::default());
        assert_eq!(aug.augment("안녕하세요").unwrap(), "안녕하세요");

        let mut failing = Augmenter::from_mode_name("back translation", 1.0)
            .unwrap()
            .with_translator(FailingTranslator(429));
        assert_eq!(
            failing.augment("안녕"),
            Err(AugmentError::Service(ServiceError::Status(429)))
        );
    }

    #[test]
    fn test_missing_service() {
        assert_eq!(
            augment_text("안녕", Mode::BackTranslation, 1.0),
            Err(AugmentError::Service(ServiceError::MissingService("translator")))
        );
        assert_eq!(
            augment_text("안녕", Mode::ModelFill, 1.0),
            Err(AugmentError::Service(ServiceError::MissingService("mask filler")))
        );
    }

    #[test]
    fn test_model_fill() {
        let mut aug = Augmenter::from_mode_name("bert", 1.0)
            .unwrap()
            .with_seed(0)
            .with_mask_filler(FixedFiller("학교"));
        assert_eq!(aug.augment("집").unwrap(), "학교");
    }

    #[test]
    fn test_augment_text() {
        assert_eq!(augment_text("abc", Mode::DotInsertion, 1.0).unwrap(), "a.b.c.");
        assert_eq!(augment_text("abc", Mode::SplittingNoise, 1.0).unwrap(), "abc");
    }
}
