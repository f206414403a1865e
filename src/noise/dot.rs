//! 마침표 끼워 넣기

use rand::seq::index;
use rand::Rng;

/// `floor(글자 수 × probability)`개의 서로 다른 위치를 고르고
/// 각 위치의 문자 바로 뒤에 `.`을 넣는다
pub fn insert_dots<R: Rng + ?Sized>(text: &str, probability: f64, rng: &mut R) -> String {
    let chars: Vec<char> = text.chars().collect();
    let amount = ((chars.len() as f64 * probability).floor() as usize).min(chars.len());
    let mut chosen = vec![false; chars.len()];
    for i in index::sample(rng, chars.len(), amount) {
        chosen[i] = true;
    }

    let mut output = String::with_capacity(text.len() + amount);
    for (c, dot) in chars.into_iter().zip(chosen) {
        output.push(c);
        if dot {
            output.push('.');
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_all_positions() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(insert_dots("abc", 1.0, &mut rng), "a.b.c.");
        assert_eq!(insert_dots("가나", 1.0, &mut rng), "가.나.");
    }

    #[test]
    fn test_dot_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let text = "안녕하세요 반갑습니다";
        for p in [0.0, 0.1, 0.3, 0.5, 0.99] {
            let out = insert_dots(text, p, &mut rng);
            let expected = (text.chars().count() as f64 * p).floor() as usize;
            assert_eq!(out.chars().filter(|&c| c == '.').count(), expected, "p = {}", p);
            // 마침표를 지우면 원문
            assert_eq!(out.replace('.', ""), text);
        }
    }

    #[test]
    fn test_empty_text() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(insert_dots("", 0.5, &mut rng), "");
    }

    #[test]
    fn test_randomized() {
        let mut rng = StdRng::seed_from_u64(11);
        let text = "가나다라마바사아자차카타파하";
        let outputs: std::collections::HashSet<String> =
            (0..20).map(|_| insert_dots(text, 0.3, &mut rng)).collect();
        assert!(outputs.len() > 1);
    }
}
