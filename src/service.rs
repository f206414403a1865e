//! 외부 서비스 연동 (역번역, 마스크 언어 모델)
//!
//! 번역 API와 마스크 언어 모델은 이 crate 밖의 구현이다. 여기서는
//! `텍스트 -> 텍스트` 형태의 좁은 인터페이스만 정의하고, 그 위에서
//! 역번역과 마스크 채우기 전략을 조립한다.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// 마스크 자리 표시 토큰
pub const MASK_TOKEN: &str = "[MASK]";
/// 원문 언어 코드
pub const SOURCE_LANG: &str = "ko";

/// 번역 API 인증 정보
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

/// 번역 요청 한 건
#[derive(Debug, Clone, Copy)]
pub struct TranslationRequest<'a> {
    pub text: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub credentials: &'a Credentials,
}

/// 번역 서비스
///
/// 성공 응답의 빈 번역은 `Ok(String::new())`, 실패는 반드시 `Err`로 구분한다.
pub trait Translator {
    fn translate(&self, request: TranslationRequest<'_>) -> Result<String, ServiceError>;
}

/// 마스크 언어 모델: 마스크가 하나 들어간 문장의 최상위 채움 결과를 반환
pub trait MaskFiller {
    fn fill_mask(&self, masked: &str) -> Result<String, ServiceError>;
}

/// 형태소 단위 토크나이저
pub trait Tokenizer {
    fn morphs(&self, text: &str) -> Vec<String>;
}

/// 공백 기준 토크나이저 (형태소 분석기가 없을 때 기본값)
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn morphs(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

/// 역번역: ko -> target -> ko
pub fn back_translate(
    translator: &dyn Translator,
    text: &str,
    target: &str,
    credentials: &Credentials,
) -> Result<String, ServiceError> {
    let forward = translator
        .translate(TranslationRequest {
            text,
            source: SOURCE_LANG,
            target,
            credentials,
        })
        .inspect_err(|e| log::warn!("번역 실패 ({} -> {}): {}", SOURCE_LANG, target, e))?;

    translator
        .translate(TranslationRequest {
            text: &forward,
            source: target,
            target: SOURCE_LANG,
            credentials,
        })
        .inspect_err(|e| log::warn!("번역 실패 ({} -> {}): {}", target, SOURCE_LANG, e))
}

/// 토큰 하나를 [`MASK_TOKEN`]으로 바꾼 문장
///
/// 토큰이 하나뿐이면 그 토큰을, 아니면 임의의 위치를 가린다. 토큰이 없으면 None.
pub fn mask_random_token<R: Rng + ?Sized>(
    tokenizer: &dyn Tokenizer,
    text: &str,
    rng: &mut R,
) -> Option<String> {
    let mut tokens = tokenizer.morphs(text);
    let masked_idx = match tokens.len() {
        0 => return None,
        1 => 0,
        n => rng.gen_range(0..n),
    };
    tokens[masked_idx] = MASK_TOKEN.to_string();
    Some(tokens.join(" "))
}

/// 마스크 채우기: 토큰 하나를 가리고 모델이 채운 문장을 반환
///
/// 가릴 토큰이 없으면 원문을 그대로 반환한다.
pub fn model_fill<R: Rng + ?Sized>(
    filler: &dyn MaskFiller,
    tokenizer: &dyn Tokenizer,
    text: &str,
    rng: &mut R,
) -> Result<String, ServiceError> {
    let Some(masked) = mask_random_token(tokenizer, text, rng) else {
        log::debug!("마스크할 토큰 없음: {:?}", text);
        return Ok(text.to_string());
    };
    filler
        .fill_mask(&masked)
        .inspect_err(|e| log::warn!("마스크 채우기 실패: {}", e))
}
