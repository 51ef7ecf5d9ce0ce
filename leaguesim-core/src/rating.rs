//! Rating and outcome model.
//!
//! Turns base strengths plus matchup context into effective ratings, maps the
//! rating gap onto an Elo win probability, and samples the outcome and a
//! scoreline.
//!
//! The stored ratings are pre-noise: the probability noise and the score noise
//! never feed back into them, so they are safe to use as training features.
//! Scores are sampled independently of the outcome and can disagree with it.

use rand_distr::Normal;

use crate::config::{ConfigError, RatingConfig, ScoreConfig};
use crate::context::MatchupContext;
use crate::rng::SimRng;

/// Adjusted ratings for both sides of a matchup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveRatings {
    pub home: f64,
    pub away: f64,
}

impl EffectiveRatings {
    pub fn diff(&self) -> f64 {
        self.home - self.away
    }
}

/// Logistic Elo curve: probability that a side rated `diff` points higher wins.
pub fn elo_probability(diff: f64, scale: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf(-diff / scale))
}

#[derive(Debug, Clone)]
pub struct RatingModel {
    rating: RatingConfig,
    score: ScoreConfig,
    score_noise: Normal<f64>,
}

impl RatingModel {
    pub fn new(rating: RatingConfig, score: ScoreConfig) -> Result<Self, ConfigError> {
        let score_noise =
            Normal::new(0.0, score.spread).map_err(|_| ConfigError::NotPositive {
                field: "score.spread",
                value: score.spread,
            })?;
        Ok(Self {
            rating,
            score,
            score_noise,
        })
    }

    pub fn effective_ratings(
        &self,
        home_base: i64,
        away_base: i64,
        ctx: &MatchupContext,
    ) -> EffectiveRatings {
        let rest_effect = self.rating.rest_weight * (ctx.home_rest - ctx.away_rest) as f64;
        let form_effect = self.rating.form_weight * (ctx.home_form - ctx.away_form);

        let home = home_base as f64 + self.rating.home_court_bonus + rest_effect + form_effect
            - f64::from(ctx.home_injury);
        let away = away_base as f64 - rest_effect - form_effect - f64::from(ctx.away_injury);

        EffectiveRatings { home, away }
    }

    /// Elo probability, jittered by uniform noise and clamped.
    pub fn win_probability(&self, ratings: &EffectiveRatings, rng: &mut SimRng) -> f64 {
        let p = elo_probability(ratings.diff(), self.rating.elo_scale);
        let noise = self.rating.probability_noise;
        let jitter = if noise > 0.0 {
            rng.float_inclusive(-noise, noise)
        } else {
            0.0
        };
        (p + jitter).clamp(self.rating.probability_floor, self.rating.probability_ceiling)
    }

    /// Home wins iff a uniform `[0, 1)` draw lands below `p`.
    pub fn sample_outcome(&self, p: f64, rng: &mut SimRng) -> bool {
        rng.chance(p)
    }

    /// Home and away scores, each shifted by the rating gap plus gaussian
    /// noise, rounded and clamped.
    pub fn sample_scores(&self, rating_diff: f64, rng: &mut SimRng) -> (u32, u32) {
        let shift = rating_diff / self.score.rating_divisor;
        let home = self.score.base_points + shift + rng.sample(&self.score_noise);
        let away = self.score.base_points - shift + rng.sample(&self.score_noise);
        (self.clamp_score(home), self.clamp_score(away))
    }

    fn clamp_score(&self, raw: f64) -> u32 {
        let min = f64::from(self.score.min_score);
        let max = f64::from(self.score.max_score);
        raw.round().clamp(min, max) as u32
    }
}
