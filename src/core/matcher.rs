use crate::core::{
    filters::DistanceFilter,
    scoring::{rank_by_score, score_skills},
};
use crate::models::{Job, Profile, RankedCandidate, RankedJob, ScoringWeights};

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult<T> {
    pub matches: Vec<T>,
    pub total_candidates: usize,
}

/// Recommendation orchestrator, used in both directions
///
/// # Pipeline Stages
/// 1. Commute filter (annotate distance, drop entries beyond the radius)
/// 2. Skill match scoring
/// 3. Minimum score cut
/// 4. Stable ranking and truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    min_score: f64,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, min_score: f64) -> Self {
        Self { weights, min_score }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), 0.0)
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank jobs for a seeker: job requirements against the profile's skills
    pub fn recommend_jobs(
        &self,
        profile: &Profile,
        jobs: Vec<Job>,
        filter: &DistanceFilter,
        limit: usize,
    ) -> MatchResult<RankedJob> {
        let total_candidates = jobs.len();

        let mut ranked: Vec<RankedJob> = filter
            .apply(jobs)
            .into_iter()
            .filter(|entry| entry.item.approved)
            .map(|entry| RankedJob {
                skill_match: score_skills(&entry.item.skills, &profile.skills, &self.weights),
                job: entry.item,
                distance_miles: entry.distance_miles,
            })
            .filter(|ranked| ranked.skill_match.score >= self.min_score)
            .collect();

        rank_by_score(&mut ranked, |r| r.skill_match.score);
        ranked.truncate(limit);

        MatchResult {
            matches: ranked,
            total_candidates,
        }
    }

    /// Rank candidates for a job: the same scorer, seen from the recruiter side
    pub fn recommend_candidates(
        &self,
        job: &Job,
        profiles: Vec<Profile>,
        filter: &DistanceFilter,
        limit: usize,
    ) -> MatchResult<RankedCandidate> {
        let total_candidates = profiles.len();

        let mut ranked: Vec<RankedCandidate> = filter
            .apply(profiles)
            .into_iter()
            .filter(|entry| entry.item.visible)
            .map(|entry| RankedCandidate {
                skill_match: score_skills(&job.skills, &entry.item.skills, &self.weights),
                profile: entry.item,
                distance_miles: entry.distance_miles,
            })
            .filter(|ranked| ranked.skill_match.score >= self.min_score)
            .collect();

        rank_by_score(&mut ranked, |r| r.skill_match.score);
        ranked.truncate(limit);

        MatchResult {
            matches: ranked,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
