//! 치환 테이블
//!
//! 모두 프로세스 전역 상수이며 최초 접근 시 한 번만 만들어진다.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// 짝 모음 테이블 (대칭: 두 번 적용하면 원래 모음)
pub static VOWEL_PAIRS: LazyLock<HashMap<char, char>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (a, b) in [('ㅏ', 'ㅑ'), ('ㅓ', 'ㅕ'), ('ㅗ', 'ㅛ'), ('ㅜ', 'ㅠ')] {
        map.insert(a, b);
        map.insert(b, a);
    }
    map
});

/// 종성 자리를 드러내지 않는 모음 (이중모음 및 ㅗ/ㅜ 계열)
pub static EXCEPTION_VOWELS: LazyLock<HashSet<char>> = LazyLock::new(|| {
    ['ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ', 'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅗ']
        .into_iter()
        .collect()
});

/// 초성 -> 비슷하게 생긴 라틴 문자/숫자
pub static LATIN_CHOSEONG: LazyLock<HashMap<char, char>> = LazyLock::new(|| {
    [('ㅌ', 'E'), ('ㄱ', '7'), ('ㄴ', 'L'), ('ㅇ', 'O')]
        .into_iter()
        .collect()
});

/// 중성 -> 비슷하게 생긴 라틴 문자
pub static LATIN_JUNGSEONG: LazyLock<HashMap<char, char>> = LazyLock::new(|| {
    [('ㅏ', 'r'), ('ㅣ', 'l'), ('ㅐ', 'H')].into_iter().collect()
});

/// 야민정음 치환 테이블 (자모 문자열, 순서대로 검사하여 첫 일치만 적용)
///
/// 키와 값은 길이가 같아서 치환 후에도 세 글자 자모 문자열이 유지된다.
/// 세 번째 자리의 공백은 종성 없음.
///
/// `"ㅇㅠ "` 항목은 종성 없는 음절에만 맞으므로 받침 있는 음절만 보는
/// [`slang_noise`](crate::noise::slang_noise)로는 적용되지 않고
/// [`apply_slang`](crate::noise::apply_slang)을 직접 호출할 때만 쓰인다.
pub const SLANG_TABLE: &[(&str, &str)] = &[
    ("ㄷㅐ", "ㅁㅓ"),
    ("ㅁㅕ", "ㄸㅣ"),
    ("ㄱㅟ", "ㅋㅓ"),
    ("ㅍㅏ", "ㄱㅘ"),
    ("ㅍㅣ", "ㄲㅢ"),
    ("ㅇㅠ ", "ㅇㅡㄲ"),
    ("ㄱㅜㅅ", "ㄱㅡㅅ"),
];

/// 짝 모음 조회
pub fn paired_vowel(vowel: char) -> Option<char> {
    VOWEL_PAIRS.get(&vowel).copied()
}

/// 예외 모음인지 확인
pub fn is_exception_vowel(vowel: char) -> bool {
    EXCEPTION_VOWELS.contains(&vowel)
}
