//! 글자 단위 노이즈 전략
//!
//! 모든 전략은 같은 모양으로 동작한다:
//!
//! 1. 입력의 각 문자를 [`classify`]로 (초성, 중성, 종성)으로 나눈다
//! 2. 구조 조건이 맞는 문자에 대해서만 `probability` 확률로 난수를 뽑는다
//! 3. 당첨되면 다시 쓰고, 아니면 원래 문자를 그대로 둔다
//!
//! 한글 음절이 아닌 문자는 어떤 전략에서도 바뀌지 않는다.
//! 결과는 매 호출마다 달라질 수 있다.

mod dot;
mod latin;
mod slang;
mod split;
mod vowel;

pub use dot::insert_dots;
pub use latin::latin_noise;
pub use slang::{apply_slang, slang_noise};
pub use split::splitting_noise;
pub use vowel::vowel_noise;

use rand::Rng;

use crate::core::syllable::{classify, SyllableParts};

/// 조건에 맞는 음절을 확률적으로 다시 쓰는 공통 루프
pub(crate) fn perturb_syllables<R, C, W, E>(
    text: &str,
    probability: f64,
    rng: &mut R,
    condition: C,
    mut rewrite: W,
) -> Result<String, E>
where
    R: Rng + ?Sized,
    C: Fn(&SyllableParts) -> bool,
    W: FnMut(&SyllableParts) -> Result<String, E>,
{
    let mut output = String::with_capacity(text.len());
    for ch in text.chars() {
        let parts = classify(ch);
        if condition(&parts) && rng.gen::<f64>() < probability {
            output.push_str(&rewrite(&parts)?);
        } else {
            output.push(ch);
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const NON_HANGUL: &str = "abc XYZ 123 !?.,\t\nㄱㅏ";

    #[test]
    fn test_non_hangul_untouched_by_every_strategy() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(splitting_noise(NON_HANGUL, 1.0, &mut rng), NON_HANGUL);
        assert_eq!(vowel_noise(NON_HANGUL, 1.0, &mut rng).unwrap(), NON_HANGUL);
        assert_eq!(latin_noise(NON_HANGUL, 1.0, &mut rng), NON_HANGUL);
        assert_eq!(slang_noise(NON_HANGUL, 1.0, &mut rng).unwrap(), NON_HANGUL);
    }

    #[test]
    fn test_zero_probability_is_identity() {
        let mut rng = StdRng::seed_from_u64(7);
        let text = "대학교 가나다라 파티 유리 굿";
        assert_eq!(splitting_noise(text, 0.0, &mut rng), text);
        assert_eq!(vowel_noise(text, 0.0, &mut rng).unwrap(), text);
        assert_eq!(latin_noise(text, 0.0, &mut rng), text);
        assert_eq!(slang_noise(text, 0.0, &mut rng).unwrap(), text);
        assert_eq!(insert_dots(text, 0.0, &mut rng), text);
    }

    #[test]
    fn test_perturb_syllables_condition_gates_draw() {
        let mut rng = StdRng::seed_from_u64(1);
        let out: Result<String, CodecError> =
            perturb_syllables("가각", 1.0, &mut rng, |p| p.is_closed(), |_| Ok("X".into()));
        assert_eq!(out.unwrap(), "가X");
    }

    #[test]
    fn test_perturb_syllables_propagates_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = perturb_syllables(
            "가",
            1.0,
            &mut rng,
            |_| true,
            |_| Err(CodecError::NotSyllable('?')),
        );
        assert_eq!(result, Err(CodecError::NotSyllable('?')));
    }
}
