use lexiscale::{
    analyze_readability, extract_metrics, score, target_grade_range, DifficultyTier, GradeBand,
    ReadabilityEngine, ScoringConfig, TextMetrics,
};
use lexiscale::config::GradeThresholds;
use lexiscale::scorer::classify_grade;
use pretty_assertions::assert_eq;

const SAMPLE: &str = "The sun was shining brightly in the clear blue sky. Birds were singing in \
    the trees. It was a perfect day for a picnic in the park.";

#[test]
fn sample_passage_is_beginner() {
    let report = analyze_readability(SAMPLE);
    assert_eq!(report.sentence_count(), 3);
    assert!(report.word_count() > 0);
    assert_eq!(report.difficulty_level, DifficultyTier::Beginner);
}

#[test]
fn empty_input_is_safe() {
    assert_eq!(
        extract_metrics(""),
        TextMetrics {
            word_count: 0,
            sentence_count: 1,
            syllable_count: 0,
        }
    );
    let report = score(extract_metrics(""));
    assert_eq!(report.flesch_reading_ease, 0.0);
    assert_eq!(report.flesch_kincaid_grade, 0.0);

    for text in ["   ", "\n\n\t", "!!!", "no delimiters here"] {
        let report = analyze_readability(text);
        assert_eq!(report.sentence_count(), 1);
        assert!(report.flesch_kincaid_grade.is_finite());
    }
}

#[test]
fn simple_text_scores_lower_grade_than_dense_text() {
    let simple = "The cat sat. The dog ran. I see a cat. We can run. It is hot.";
    let dense = "Institutional accountability necessitates comprehensive organizational \
        transparency regarding administrative responsibilities, particularly considering \
        unprecedented technological innovations affecting everybody";

    let simple_report = analyze_readability(simple);
    let dense_report = analyze_readability(dense);

    assert_eq!(simple_report.word_count(), dense_report.word_count());
    assert!(simple_report.flesch_kincaid_grade < dense_report.flesch_kincaid_grade);
    assert!(simple_report.flesch_reading_ease > dense_report.flesch_reading_ease);
    assert_eq!(simple_report.difficulty_level, DifficultyTier::Beginner);
    assert_eq!(dense_report.difficulty_level, DifficultyTier::Advanced);
    assert_eq!(dense_report.grade_band, GradeBand::Adult);
}

#[test]
fn grade_at_or_below_five_is_elementary() {
    // 10 words per sentence and 1.4 syllables per word: 3.9 + 16.52 - 15.59 = 4.83
    let report = score(TextMetrics {
        word_count: 10,
        sentence_count: 1,
        syllable_count: 14,
    });
    assert!((report.flesch_kincaid_grade - 4.83).abs() < 1e-9);
    assert_eq!(report.difficulty_level, DifficultyTier::Beginner);
    assert_eq!(report.grade_band, GradeBand::Elementary);

    let thresholds = GradeThresholds::default();
    assert_eq!(
        classify_grade(5.0, &thresholds),
        (DifficultyTier::Beginner, GradeBand::Elementary)
    );
    assert_eq!(
        classify_grade(8.0, &thresholds),
        (DifficultyTier::Intermediate, GradeBand::Middle)
    );
    assert_eq!(
        classify_grade(8.1, &thresholds),
        (DifficultyTier::Advanced, GradeBand::High)
    );
}

#[test]
fn grades_around_eight_split_middle_and_high() {
    // 20 words per sentence and 1.5 syllables per word: 7.8 + 17.7 - 15.59 = 9.91
    let high = score(TextMetrics {
        word_count: 20,
        sentence_count: 1,
        syllable_count: 30,
    });
    assert_eq!(high.difficulty_level, DifficultyTier::Advanced);
    assert_eq!(high.grade_band, GradeBand::High);

    // 10 words per sentence and 1.6 syllables per word: 3.9 + 18.88 - 15.59 = 7.19
    let middle = score(TextMetrics {
        word_count: 10,
        sentence_count: 1,
        syllable_count: 16,
    });
    assert_eq!(middle.difficulty_level, DifficultyTier::Intermediate);
    assert_eq!(middle.grade_band, GradeBand::Middle);
}

#[test]
fn calibrator_range_laws() {
    assert_eq!(target_grade_range("beginner", Some("appropriate")), (2.0, 5.0));
    assert_eq!(target_grade_range("beginner", Some("easier")), (1.0, 3.0));
    assert_eq!(target_grade_range("advanced", Some("challenging")), (11.0, 14.0));
    assert_eq!(
        target_grade_range("nonsense_tier", Some("appropriate")),
        target_grade_range("intermediate", Some("appropriate"))
    );
    assert_eq!(target_grade_range("nonsense_tier", Some("appropriate")), (6.0, 8.0));
}

#[test]
fn concurrent_scoring_matches_sequential() {
    let engine = std::sync::Arc::new(ReadabilityEngine::new());
    let expected = engine.analyze(SAMPLE);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = std::sync::Arc::clone(&engine);
            std::thread::spawn(move || engine.analyze(SAMPLE))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn config_overrides_without_globals() {
    let config = ScoringConfig {
        words_per_minute: 9.0,
        ..Default::default()
    };
    let engine = ReadabilityEngine::with_config(config).unwrap();
    // 27 words at 9 wpm
    assert_eq!(engine.analyze(SAMPLE).estimated_minutes, 3);
    assert_eq!(analyze_readability(SAMPLE).estimated_minutes, 1);
}

#[test]
fn reading_time_halves_round_to_even() {
    // 375 words at 150 wpm is 2.5 minutes
    let report = analyze_readability(&"cat ".repeat(375));
    assert_eq!(report.word_count(), 375);
    assert_eq!(report.estimated_minutes, 2);

    // 525 words is 3.5 minutes
    assert_eq!(analyze_readability(&"cat ".repeat(525)).estimated_minutes, 4);
}
