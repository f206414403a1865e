//! 자모 분리 노이즈 (가 -> ㄱㅏ)

use std::convert::Infallible;

use rand::Rng;

use super::perturb_syllables;
use crate::core::syllable::SyllableParts;
use crate::core::tables::is_exception_vowel;

/// 종성 없는 음절을 확률적으로 자모 문자열로 풀어 쓴다
///
/// 예외 모음(ㅗ, ㅜ, 이중모음 등)을 가진 음절은 건드리지 않는다.
pub fn splitting_noise<R: Rng + ?Sized>(text: &str, probability: f64, rng: &mut R) -> String {
    let condition = |parts: &SyllableParts| {
        parts.is_open() && !parts.jungseong.is_some_and(is_exception_vowel)
    };
    perturb_syllables(text, probability, rng, condition, |parts| Ok(parts.render_split()))
        .unwrap_or_else(|never: Infallible| match never {})
}
