//! Weighted milestone progress aggregation.

use planwise_core::Milestone;

/// Weight used when a milestone has no usable weight.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Compute a goal's completion percentage from its milestones.
///
/// Each milestone contributes `1.0` when done, otherwise its score clamped to
/// `[0, 1]` (missing or NaN reads as `0`), multiplied by its weight (missing,
/// non-finite or non-positive reads as `1`). The weighted mean is scaled to a
/// percentage and rounded half-up. An empty list is `0`.
pub fn compute_progress(milestones: &[Milestone]) -> u8 {
    if milestones.is_empty() {
        return 0;
    }

    // Relative to the largest weight, so sums of huge weights stay finite.
    let max_weight = milestones
        .iter()
        .map(effective_weight)
        .fold(0.0, f64::max);

    let mut total_weight = 0.0;
    let mut earned = 0.0;
    for milestone in milestones {
        let weight = effective_weight(milestone) / max_weight;
        total_weight += weight;
        earned += contribution(milestone) * weight;
    }

    if !(total_weight.is_finite() && total_weight > 0.0) {
        return 0;
    }

    let percent = (100.0 * earned / total_weight).round();
    if percent.is_nan() {
        0
    } else {
        percent.clamp(0.0, 100.0) as u8
    }
}

/// Weight a milestone counts with.
pub fn effective_weight(milestone: &Milestone) -> f64 {
    match milestone.weight {
        Some(w) if w.is_finite() && w > 0.0 => w,
        _ => DEFAULT_WEIGHT,
    }
}

/// Completion fraction of a single milestone, in `[0, 1]`.
pub fn contribution(milestone: &Milestone) -> f64 {
    if milestone.done {
        return 1.0;
    }
    match milestone.score {
        Some(s) if !s.is_nan() => s.clamp(0.0, 1.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(score: f64, weight: f64) -> Milestone {
        Milestone::new("m").score(score).weight(weight)
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(compute_progress(&[]), 0);
    }

    #[test]
    fn test_weighted_example() {
        let milestones = vec![
            Milestone::new("a").done().weight(2.0),
            open(0.25, 2.0),
        ];
        // round(100 * (1*2 + 0.25*2) / 4) = round(62.5)
        assert_eq!(compute_progress(&milestones), 63);
    }

    #[test]
    fn test_unit_weights_are_simple_average() {
        let scores = [0.0, 0.1, 0.5, 0.8, 1.0];
        let milestones: Vec<_> = scores.iter().map(|s| Milestone::new("m").score(*s)).collect();
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        assert_eq!(compute_progress(&milestones), (mean * 100.0).round() as u8);
    }

    #[test]
    fn test_scale_invariance() {
        let base = vec![open(0.3, 1.0), open(0.9, 3.0), Milestone::new("d").done().weight(0.5)];
        let expected = compute_progress(&base);
        for factor in [1e-300, 0.01, 2.0, 7.5, 1000.0, 1e300] {
            let scaled: Vec<_> = base
                .iter()
                .cloned()
                .map(|mut m| {
                    m.weight = m.weight.map(|w| w * factor);
                    m
                })
                .collect();
            assert_eq!(compute_progress(&scaled), expected, "factor {factor}");
        }
    }

    #[test]
    fn test_done_overrides_score() {
        let milestones = vec![Milestone::new("a").done().score(0.1)];
        assert_eq!(compute_progress(&milestones), 100);
    }

    #[test]
    fn test_malformed_weights_default_to_one() {
        let milestones = vec![
            Milestone::new("a").done().weight(-4.0),
            Milestone::new("b").weight(f64::NAN),
            Milestone::new("c").weight(f64::INFINITY),
            Milestone::new("d").weight(0.0).done(),
        ];
        assert_eq!(compute_progress(&milestones), 50);
    }

    #[test]
    fn test_malformed_scores() {
        let milestones = vec![
            Milestone::new("a").score(f64::NAN),
            Milestone::new("b").score(4.0),
            Milestone::new("c").score(-1.0),
            Milestone::new("d"),
        ];
        assert_eq!(compute_progress(&milestones), 25);
    }

    #[test]
    fn test_huge_weights_do_not_overflow() {
        let huge = vec![
            Milestone::new("a").done().weight(1e308),
            Milestone::new("b").done().weight(1e308),
        ];
        let small = vec![Milestone::new("a").done().weight(1.0), Milestone::new("b").done().weight(1.0)];
        assert_eq!(compute_progress(&huge), 100);
        assert_eq!(compute_progress(&huge), compute_progress(&small));

        let mixed = vec![
            Milestone::new("a").done().weight(f64::MAX),
            open(0.0, f64::MAX / 3.0),
        ];
        assert_eq!(compute_progress(&mixed), 75);
        assert_eq!(compute_progress(&[open(0.5, f64::MAX), open(0.5, f64::MAX)]), 50);
    }

    #[test]
    fn test_all_done_is_hundred() {
        let milestones = vec![Milestone::new("a").done(), Milestone::new("b").done().weight(9.0)];
        assert_eq!(compute_progress(&milestones), 100);
    }

    #[test]
    fn test_from_backend_json() {
        let json = r#"[
            {"title": "draft", "weight": "2", "done": true},
            {"title": "review", "weight": 2, "score": 0.25}
        ]"#;
        let milestones: Vec<Milestone> = serde_json::from_str(json).unwrap();
        assert_eq!(compute_progress(&milestones), 63);
    }
}
