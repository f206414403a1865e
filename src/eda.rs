//! 단어 단위 노이즈 (EDA: random swap + random deletion)

use rand::Rng;

use crate::core::unicode::{is_compat_jamo, is_hangul_syllable};

/// 문장 길이 대비 swap 횟수 비율
pub const SWAP_RATIO: f64 = 0.1;
/// 기본 단어 삭제 확률
pub const DELETION_PROBABILITY: f64 = 0.1;
/// 두 번째 위치를 뽑는 최대 시도 횟수
const MAX_SWAP_ATTEMPTS: usize = 3;

/// 완성형 음절, 호환용 자모, 공백만 남긴다
///
/// 공백은 단어 경계를 유지하기 위해 남겨 둔다.
pub fn hangul_only(text: &str) -> String {
    text.chars()
        .filter(|&c| is_hangul_syllable(c) || is_compat_jamo(c) || c.is_whitespace())
        .collect()
}

/// 공백으로 나눈 단어 목록 (빈 단어 제외)
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// 서로 다른 두 위치를 골라 교환
///
/// 두 번째 위치가 연속으로 첫 번째와 같으면 포기하고 그대로 둔다.
fn swap_word<R: Rng + ?Sized>(words: &mut [String], rng: &mut R) {
    if words.is_empty() {
        return;
    }
    let first = rng.gen_range(0..words.len());
    for _ in 0..MAX_SWAP_ATTEMPTS {
        let second = rng.gen_range(0..words.len());
        if second != first {
            words.swap(first, second);
            return;
        }
    }
}

/// 두 단어의 위치를 바꾸는 작업을 `n`번 반복
pub fn random_swap<R: Rng + ?Sized>(words: &[String], n: usize, rng: &mut R) -> Vec<String> {
    let mut new_words = words.to_vec();
    for _ in 0..n {
        swap_word(&mut new_words, rng);
    }
    new_words
}

/// 각 단어를 `probability` 확률로 삭제
///
/// 모든 단어가 삭제되면 임의의 단어 하나를 남긴다. 빈 입력은 빈 결과.
pub fn random_deletion<R: Rng + ?Sized>(
    words: &[String],
    probability: f64,
    rng: &mut R,
) -> Vec<String> {
    if words.is_empty() {
        return Vec::new();
    }

    let kept: Vec<String> = words
        .iter()
        .filter(|_| rng.gen::<f64>() > probability)
        .cloned()
        .collect();

    if kept.is_empty() {
        let idx = rng.gen_range(0..words.len());
        return vec![words[idx].clone()];
    }
    kept
}

/// swap 횟수: `max(1, floor(단어 수 × SWAP_RATIO))`
pub fn swap_count(num_words: usize) -> usize {
    ((num_words as f64 * SWAP_RATIO).floor() as usize).max(1)
}

/// 한글 필터 -> random swap -> random deletion
pub fn eda<R: Rng + ?Sized>(sentence: &str, rng: &mut R) -> String {
    eda_with(sentence, DELETION_PROBABILITY, rng)
}

/// [`eda`]에서 삭제 확률을 지정
pub fn eda_with<R: Rng + ?Sized>(sentence: &str, deletion_probability: f64, rng: &mut R) -> String {
    let words = tokenize(&hangul_only(sentence));
    let swapped = random_swap(&words, swap_count(words.len()), rng).join(" ");

    let words = tokenize(&swapped);
    random_deletion(&words, deletion_probability, rng).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words(s: &str) -> Vec<String> {
        tokenize(s)
    }

    #[test]
    fn test_hangul_only() {
        assert_eq!(hangul_only("안녕 hello 세상!"), "안녕  세상");
        assert_eq!(hangul_only("ㅋㅋㅋ 123"), "ㅋㅋㅋ ");
        assert_eq!(hangul_only("abc"), "");
    }

    #[test]
    fn test_tokenize_drops_empty() {
        assert_eq!(tokenize("  가  나 다 "), words("가 나 다"));
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_swap_count() {
        assert_eq!(swap_count(0), 1);
        assert_eq!(swap_count(9), 1);
        assert_eq!(swap_count(10), 1);
        assert_eq!(swap_count(25), 2);
    }

    #[test]
    fn test_random_swap_zero_is_noop() {
        let mut rng = StdRng::seed_from_u64(0);
        let input = words("가 나 다 라");
        assert_eq!(random_swap(&input, 0, &mut rng), input);
    }

    #[test]
    fn test_random_swap_single_word_is_noop() {
        let mut rng = StdRng::seed_from_u64(0);
        let input = words("가");
        assert_eq!(random_swap(&input, 5, &mut rng), input);
        assert!(random_swap(&[], 5, &mut rng).is_empty());
    }

    #[test]
    fn test_random_swap_is_permutation() {
        let mut rng = StdRng::seed_from_u64(9);
        let input = words("하나 둘 셋 넷 다섯 여섯");
        let mut out = random_swap(&input, 3, &mut rng);
        out.sort();
        let mut sorted = input.clone();
        sorted.sort();
        assert_eq!(out, sorted);
    }

    #[test]
    fn test_random_swap_two_words() {
        // 두 단어면 교환 시도가 모두 실패하지 않는 한 순서가 바뀜
        let mut rng = StdRng::seed_from_u64(5);
        let input = words("가 나");
        let results: Vec<Vec<String>> = (0..20).map(|_| random_swap(&input, 1, &mut rng)).collect();
        assert!(results.iter().any(|r| *r == words("나 가")));
        assert!(results.iter().all(|r| *r == words("나 가") || *r == input));
    }

    #[test]
    fn test_random_deletion_never_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        let input = words("가 나 다 라 마");
        for p in [0.0, 0.3, 0.7, 1.0] {
            for _ in 0..50 {
                let out = random_deletion(&input, p, &mut rng);
                assert!(!out.is_empty());
                assert!(out.iter().all(|w| input.contains(w)));
            }
        }
    }

    #[test]
    fn test_random_deletion_zero_keeps_all() {
        let mut rng = StdRng::seed_from_u64(0);
        let input = words("가 나 다");
        assert_eq!(random_deletion(&input, 0.0, &mut rng), input);
    }

    #[test]
    fn test_random_deletion_forced_fallback() {
        // 모든 난수가 0x8000...: 실수 draw = 0.5, gen_range(0..3) = 1
        let mut rng = StepRng::new(1 << 63, 0);
        let input = words("a b c");
        assert_eq!(random_deletion(&input, 1.0, &mut rng), words("b"));
    }

    #[test]
    fn test_random_deletion_empty_input() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(random_deletion(&[], 0.5, &mut rng).is_empty());
    }

    #[test]
    fn test_eda() {
        let mut rng = StdRng::seed_from_u64(21);
        let sentence = "오늘 날씨가 정말 좋아서 산책을 나갔다 (sunny)";
        let out = eda(sentence, &mut rng);
        let out_words = tokenize(&out);
        assert!(!out_words.is_empty());
        assert!(out_words.len() <= 6);
        assert!(out_words.iter().all(|w| sentence.contains(w.as_str())));
        assert!(!out.contains("sunny"));
    }

    #[test]
    fn test_eda_without_deletion_is_permutation() {
        let mut rng = StdRng::seed_from_u64(2);
        let out = eda_with("가 나 다 라", 0.0, &mut rng);
        let mut out_words = tokenize(&out);
        out_words.sort();
        assert_eq!(out_words, words("가 나 다 라"));
    }

    #[test]
    fn test_eda_no_hangul() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(eda("hello world", &mut rng), "");
    }
}
