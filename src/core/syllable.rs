//! 음절 단위 분해/조합 (초성, 중성, 종성 triple)

use crate::core::unicode::{
    choseong_index, compose_syllable, decompose_syllable, is_hangul_syllable, jongseong_index,
    jungseong_index, CHOSEONG, JONGSEONG, JUNGSEONG,
};
use crate::error::{CodecError, JamoSlot};

/// 종성 없음을 자모 문자열로 펼칠 때 쓰는 자리 표시 문자
pub const BLANK_JONGSEONG: char = ' ';

/// 음절 하나의 (초성, 중성, 종성) 구성
///
/// 한글이 아닌 문자는 `(문자, None, None)` 형태의 퇴화된 구성으로 표현되며
/// [`compose`]가 그대로 돌려준다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyllableParts {
    pub choseong: char,
    pub jungseong: Option<char>,
    pub jongseong: Option<char>,
}

impl SyllableParts {
    pub fn new(choseong: char, jungseong: char, jongseong: Option<char>) -> Self {
        Self {
            choseong,
            jungseong: Some(jungseong),
            jongseong,
        }
    }

    /// 한글이 아닌 문자를 감싸는 퇴화된 구성
    pub fn passthrough(c: char) -> Self {
        Self {
            choseong: c,
            jungseong: None,
            jongseong: None,
        }
    }

    /// 퇴화된 구성인지 (한글 음절이 아닌 문자)
    pub fn is_passthrough(&self) -> bool {
        self.jungseong.is_none() && self.jongseong.is_none()
    }

    /// 종성 없는 한글 음절 (예: 가, 나)
    pub fn is_open(&self) -> bool {
        self.jungseong.is_some() && self.jongseong.is_none()
    }

    /// 종성 있는 한글 음절 (예: 각, 닭)
    pub fn is_closed(&self) -> bool {
        self.jungseong.is_some() && self.jongseong.is_some()
    }

    /// 자모를 그대로 이어 붙인 문자열
    ///
    /// 한글 음절은 항상 세 글자이며 종성 없음은 [`BLANK_JONGSEONG`]으로 채운다.
    /// 퇴화된 구성은 원래 문자 한 글자.
    pub fn jamo_string(&self) -> String {
        let mut out = String::with_capacity(9);
        out.push(self.choseong);
        if let Some(jung) = self.jungseong {
            out.push(jung);
            out.push(self.jongseong.unwrap_or(BLANK_JONGSEONG));
        }
        out
    }

    /// 자모 문자열에서 뒤쪽 공백을 제거한 형태 (가 -> "ㄱㅏ")
    pub fn render_split(&self) -> String {
        self.jamo_string().trim_end().to_string()
    }

    /// [`jamo_string`](Self::jamo_string)의 역변환
    ///
    /// 정확히 세 글자가 아니면 None. 세 번째 글자가 [`BLANK_JONGSEONG`]이면 종성 없음.
    pub fn from_jamo_str(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let (cho, jung, jong) = (chars.next()?, chars.next()?, chars.next()?);
        if chars.next().is_some() {
            return None;
        }
        let jong = (jong != BLANK_JONGSEONG).then_some(jong);
        Some(Self::new(cho, jung, jong))
    }
}

/// 완성형 한글 음절을 (초성, 중성, 종성)으로 분해
///
/// 완성형 음절이 아니면 [`CodecError::NotSyllable`]. 임의의 문자에는 [`classify`]를 사용.
pub fn decompose(c: char) -> Result<SyllableParts, CodecError> {
    let (cho, jung, jong) = decompose_syllable(c).ok_or(CodecError::NotSyllable(c))?;
    Ok(SyllableParts {
        choseong: CHOSEONG[cho as usize],
        jungseong: Some(JUNGSEONG[jung as usize]),
        jongseong: JONGSEONG[jong as usize],
    })
}

/// (초성, 중성, 종성)을 완성형 음절로 조합
///
/// 중성과 종성이 모두 없으면 초성 자리의 문자를 그대로 반환한다.
pub fn compose(parts: &SyllableParts) -> Result<char, CodecError> {
    let Some(jung) = parts.jungseong else {
        return match parts.jongseong {
            None => Ok(parts.choseong),
            Some(_) => Err(CodecError::MalformedParts(parts.jamo_string())),
        };
    };

    let cho_idx = choseong_index(parts.choseong).ok_or(CodecError::InvalidJamo {
        slot: JamoSlot::Choseong,
        jamo: parts.choseong,
    })?;
    let jung_idx = jungseong_index(jung).ok_or(CodecError::InvalidJamo {
        slot: JamoSlot::Jungseong,
        jamo: jung,
    })?;
    let jong_idx = jongseong_index(parts.jongseong).ok_or(CodecError::InvalidJamo {
        slot: JamoSlot::Jongseong,
        jamo: parts.jongseong.unwrap_or(BLANK_JONGSEONG),
    })?;

    // 모든 인덱스가 범위 안이므로 항상 Some
    compose_syllable(cho_idx, jung_idx, jong_idx).ok_or(CodecError::InvalidJamo {
        slot: JamoSlot::Choseong,
        jamo: parts.choseong,
    })
}

/// 문자 하나를 분류: 완성형 음절이면 분해, 아니면 퇴화된 구성
pub fn classify(c: char) -> SyllableParts {
    if is_hangul_syllable(c) {
        decompose(c).unwrap_or(SyllableParts::passthrough(c))
    } else {
        SyllableParts::passthrough(c)
    }
}
