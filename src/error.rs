//! 에러 타입

use thiserror::Error;

/// 음절 분해/조합 에러
///
/// 두 경우 모두 호출 측의 논리 오류를 뜻한다. 분해 전에는 항상
/// [`classify`](crate::core::syllable::classify)를 거쳐야 하고,
/// 조합 실패는 치환 테이블이 잘못 만들어졌다는 신호다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// 완성형 한글 음절이 아닌 문자를 분해하려 함
    #[error("완성형 한글 음절이 아님: {0:?}")]
    NotSyllable(char),
    /// 자모가 해당 위치의 자모 목록에 없음
    #[error("{slot} 목록에 없는 자모: {jamo:?}")]
    InvalidJamo { slot: JamoSlot, jamo: char },
    /// 중성 없이 종성만 있는 구성
    #[error("중성 없이 종성이 있는 음절 구성: {0:?}")]
    MalformedParts(String),
}

/// 음절 내 자모 위치
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JamoSlot {
    Choseong,
    Jungseong,
    Jongseong,
}

impl std::fmt::Display for JamoSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JamoSlot::Choseong => write!(f, "초성"),
            JamoSlot::Jungseong => write!(f, "중성"),
            JamoSlot::Jongseong => write!(f, "종성"),
        }
    }
}

/// 외부 서비스(번역, 마스크 채우기) 에러
///
/// 성공했지만 빈 결과는 에러가 아니라 `Ok(String::new())`로 표현한다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// 서비스가 성공이 아닌 상태 코드를 반환
    #[error("서비스 응답 실패 (status {0})")]
    Status(u16),
    /// 서비스 호출 자체가 실패
    #[error("서비스 사용 불가: {0}")]
    Unavailable(String),
    /// 전략에 필요한 서비스가 등록되지 않음
    #[error("등록되지 않은 서비스: {0}")]
    MissingService(&'static str),
}

/// 증강 에러
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AugmentError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    /// 알 수 없는 증강 모드 이름
    #[error("알 수 없는 증강 모드: {0:?}")]
    UnknownMode(String),
    /// [0, 1] 범위를 벗어난 확률
    #[error("확률은 0.0 ~ 1.0 이어야 함: {0}")]
    InvalidProbability(f64),
}

/// 데이터셋 입출력/파이프라인 에러
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("파일 읽기/쓰기 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV 오류: {0}")]
    Csv(#[from] csv::Error),
    #[error("설정 파싱 오류: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Augment(#[from] AugmentError),
    /// 필수 컬럼이 헤더에 없음
    #[error("컬럼 없음: {0}")]
    MissingColumn(String),
    /// 검증 비율이 (0, 1) 범위 밖
    #[error("검증 데이터 비율은 0.0 ~ 1.0 사이여야 함: {0}")]
    InvalidSplit(f64),
}

pub type Result<T, E = AugmentError> = std::result::Result<T, E>;
