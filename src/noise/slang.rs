//! 야민정음 치환 (댕댕이 -> 멍멍이)

use rand::Rng;

use super::perturb_syllables;
use crate::core::syllable::{compose, SyllableParts};
use crate::core::tables::SLANG_TABLE;
use crate::error::CodecError;

/// 음절 하나의 자모 문자열에 야민정음 테이블을 적용
///
/// 테이블을 순서대로 검사해 처음 포함되는 키 하나만 치환한다.
/// 일치하는 키가 없으면 원래 음절을 다시 조합해 돌려준다.
pub fn apply_slang(parts: &SyllableParts) -> Result<char, CodecError> {
    let jamo = parts.jamo_string();
    let Some((key, value)) = SLANG_TABLE.iter().find(|(key, _)| jamo.contains(key)) else {
        return compose(parts);
    };
    let replaced = jamo.replace(key, value);
    // 키와 값의 길이가 같으므로 세 글자 자모 문자열이 유지됨
    let swapped =
        SyllableParts::from_jamo_str(&replaced).ok_or(CodecError::MalformedParts(replaced))?;
    compose(&swapped)
}

/// 종성 있는 음절에 확률적으로 야민정음 치환을 적용한다
///
/// 테이블 검사는 음절 하나의 자모 안에서만 이루어진다. 두 음절에 걸친
/// 자모 나열은 일치 대상이 아니다.
pub fn slang_noise<R: Rng + ?Sized>(
    text: &str,
    probability: f64,
    rng: &mut R,
) -> Result<String, CodecError> {
    perturb_syllables(text, probability, rng, SyllableParts::is_closed, |parts| {
        apply_slang(parts).map(String::from)
    })
}
