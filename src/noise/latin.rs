//! 한글 -> 비슷한 모양의 라틴 문자 치환 (가 -> 7r)

use std::convert::Infallible;

use rand::Rng;

use super::perturb_syllables;
use crate::core::syllable::SyllableParts;
use crate::core::tables::{is_exception_vowel, LATIN_CHOSEONG, LATIN_JUNGSEONG};

/// 초성이나 중성에 라틴 대응이 있는 종성 없는 음절을 확률적으로 치환한다
///
/// 대응이 없는 쪽 자모는 그대로 두므로 결과에 자모와 라틴 문자가 섞일 수 있다 (하 -> ㅎr).
pub fn latin_noise<R: Rng + ?Sized>(text: &str, probability: f64, rng: &mut R) -> String {
    let condition = |parts: &SyllableParts| {
        let Some(jung) = parts.jungseong else {
            return false;
        };
        parts.is_open()
            && (LATIN_JUNGSEONG.contains_key(&jung) || LATIN_CHOSEONG.contains_key(&parts.choseong))
            && !is_exception_vowel(jung)
    };
    let rewrite = |parts: &SyllableParts| {
        let mapped = SyllableParts {
            choseong: LATIN_CHOSEONG
                .get(&parts.choseong)
                .copied()
                .unwrap_or(parts.choseong),
            jungseong: parts
                .jungseong
                .map(|j| LATIN_JUNGSEONG.get(&j).copied().unwrap_or(j)),
            jongseong: None,
        };
        Ok(mapped.render_split())
    };
    perturb_syllables(text, probability, rng, condition, rewrite)
        .unwrap_or_else(|never: Infallible| match never {})
}
