//! Keyword-counting emotion scorer.
//!
//! Used whenever the trained classifier is unavailable or fails. The jitter
//! makes it non-deterministic unless the caller seeds the RNG.

use rand::Rng;

use super::{
    normalize, Prediction, PredictionSource, KEYWORD_CONFIDENCE_MAX, KEYWORD_CONFIDENCE_MIN,
    KEYWORD_JITTER, NO_SIGNAL_CONFIDENCE,
};
use crate::emotion::Emotion;

/// Count, per emotion, how many of its keywords occur in `text`.
///
/// Indexed like [`Emotion::ALL`]. Text and keywords are both normalized
/// first, so `was-was` in the input still matches the `was-was` keyword.
pub fn keyword_scores(text: &str) -> [u32; 4] {
    let text = normalize(text);
    let mut scores = [0u32; 4];

    for emotion in Emotion::ALL {
        scores[emotion.index()] = emotion
            .info()
            .keywords
            .iter()
            .filter(|kw| text.contains(normalize(kw).as_str()))
            .count() as u32;
    }

    scores
}

/// Predict an emotion from keyword counts.
///
/// With no keyword hits the emotion is drawn uniformly and the confidence
/// lands in the low no-signal band. Otherwise the first emotion with the
/// highest count wins, in [`Emotion::ALL`] order.
pub fn predict<R: Rng>(text: &str, rng: &mut R) -> Prediction {
    let scores = keyword_scores(text);
    let total: u32 = scores.iter().sum();

    if total == 0 {
        let emotion = Emotion::ALL[rng.random_range(0..Emotion::ALL.len())];
        let confidence = rng.random_range(NO_SIGNAL_CONFIDENCE) as f32;
        return Prediction {
            emotion,
            confidence,
            source: PredictionSource::Heuristic,
        };
    }

    let mut best = Emotion::ALL[0];
    for emotion in Emotion::ALL {
        if scores[emotion.index()] > scores[best.index()] {
            best = emotion;
        }
    }

    let ratio = scores[best.index()] as f32 / total as f32 * 100.0;
    let jitter = rng.random_range(KEYWORD_JITTER) as f32;
    let confidence = (ratio + jitter)
        .clamp(KEYWORD_CONFIDENCE_MIN, KEYWORD_CONFIDENCE_MAX)
        .trunc();

    Prediction {
        emotion: best,
        confidence,
        source: PredictionSource::Heuristic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_keyword_scores() {
        let scores = keyword_scores("aku bahagia senang gembira cinta");
        assert_eq!(scores, [4, 0, 0, 0]);

        let scores = keyword_scores("Aku MARAH dan takut");
        assert_eq!(scores, [0, 0, 1, 1]);
    }

    #[test]
    fn test_keywords_match_as_substrings() {
        // "hati" is a sad keyword and matches inside "hatiku"
        assert_eq!(keyword_scores("hatiku")[Emotion::Sad.index()], 1);
    }

    #[test]
    fn test_hyphenated_keyword_matches() {
        assert_eq!(keyword_scores("aku was-was")[Emotion::Fearful.index()], 1);
        assert_eq!(keyword_scores("aku waswas")[Emotion::Fearful.index()], 1);
    }

    #[test]
    fn test_clear_signal_is_happy() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let p = predict("aku bahagia senang gembira cinta", &mut rng);
            assert_eq!(p.emotion, Emotion::Happy);
            assert!((70.0..=95.0).contains(&p.confidence), "{}", p.confidence);
            assert_eq!(p.confidence.fract(), 0.0);
            assert_eq!(p.source, PredictionSource::Heuristic);
        }
    }

    #[test]
    fn test_single_emotion_saturates_at_max() {
        // ratio 100 + jitter >= 5 always clamps to the ceiling
        let mut rng = StdRng::seed_from_u64(2);
        let p = predict("hatiku sedih dan sepi", &mut rng);
        assert_eq!(p.emotion, Emotion::Sad);
        assert_eq!(p.confidence, KEYWORD_CONFIDENCE_MAX);
    }

    #[test]
    fn test_no_signal_band() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let p = predict("lorem ipsum dolor sit amet", &mut rng);
            assert!(Emotion::ALL.contains(&p.emotion));
            assert!((45.0..65.0).contains(&p.confidence), "{}", p.confidence);
        }
    }

    #[test]
    fn test_no_signal_draws_every_emotion() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut seen = [false; 4];
        for _ in 0..500 {
            seen[predict("xyz", &mut rng).emotion.index()] = true;
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn test_tie_goes_to_first_in_order() {
        let mut rng = StdRng::seed_from_u64(5);
        // one angry hit, one fearful hit
        let p = predict("marah takut", &mut rng);
        assert_eq!(p.emotion, Emotion::Angry);

        // one happy hit, one sad hit
        let p = predict("cinta rindu", &mut rng);
        assert_eq!(p.emotion, Emotion::Happy);
    }

    #[test]
    fn test_split_signal_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..200 {
            // 2 sad, 1 angry, 1 fearful -> 50% + jitter
            let p = predict("sedih rindu marah takut", &mut rng);
            assert_eq!(p.emotion, Emotion::Sad);
            assert!((70.0..=95.0).contains(&p.confidence));
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let text = "aku tidak tahu harus kemana";
        let a = predict(text, &mut StdRng::seed_from_u64(42));
        let b = predict(text, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
