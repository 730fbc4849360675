use std::collections::HashSet;

use crate::models::{ScoringWeights, Skill, SkillMatch};

/// Score how well a held skill set covers a required one
///
/// Scoring formula:
/// score = common / required + common * overlap_bonus
///
/// An empty requirement set scores `empty_requirement_score`. The result is
/// not normalised: full coverage of many skills goes above 1.0. Duplicate
/// skills in either set count once.
pub fn score_skills(required: &[Skill], held: &[Skill], weights: &ScoringWeights) -> SkillMatch {
    let held_ids: HashSet<i64> = held.iter().map(|skill| skill.id).collect();

    let mut seen = HashSet::new();
    let mut common = Vec::new();
    let mut missing = Vec::new();

    for skill in required {
        if !seen.insert(skill.id) {
            continue;
        }
        if held_ids.contains(&skill.id) {
            common.push(skill.name.clone());
        } else {
            missing.push(skill.name.clone());
        }
    }

    let required_count = seen.len();
    let score = if required_count == 0 {
        weights.empty_requirement_score
    } else {
        let common_count = common.len() as f64;
        common_count / required_count as f64 + common_count * weights.overlap_bonus
    };

    SkillMatch { score, common, missing }
}

/// Sort descending by score; equal scores keep their input order
pub fn rank_by_score<T>(items: &mut [T], score: impl Fn(&T) -> f64) {
    // sort_by is stable
    items.sort_by(|a, b| {
        score(b)
            .partial_cmp(&score(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
