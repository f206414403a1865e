//! 짝 모음 치환 (ㅏ <-> ㅑ, ㅓ <-> ㅕ, ㅗ <-> ㅛ, ㅜ <-> ㅠ)

use rand::Rng;

use super::perturb_syllables;
use crate::core::syllable::{compose, SyllableParts};
use crate::core::tables::paired_vowel;
use crate::error::CodecError;

/// 종성 없는 음절의 모음을 확률적으로 짝 모음으로 바꾼다
pub fn vowel_noise<R: Rng + ?Sized>(
    text: &str,
    probability: f64,
    rng: &mut R,
) -> Result<String, CodecError> {
    let condition = |parts: &SyllableParts| {
        parts.is_open() && parts.jungseong.and_then(paired_vowel).is_some()
    };
    perturb_syllables(text, probability, rng, condition, |parts| -> Result<String, CodecError> {
        let swapped = SyllableParts {
            jungseong: parts.jungseong.and_then(paired_vowel),
            ..*parts
        };
        Ok(compose(&swapped)?.to_string())
    })
}
