//! Team registry: the entity store for every simulated team.
//!
//! Teams live in a dense `Vec` indexed by [`TeamId`]. The registry is owned by
//! the season loop for the whole run; other components only ever see `&self`.

use chrono::NaiveDate;

use crate::config::IntRange;
use crate::domain::{Team, TeamId};
use crate::rng::SimRng;

#[derive(Debug, Clone)]
pub struct TeamRegistry {
    teams: Vec<Team>,
}

impl TeamRegistry {
    /// Create one team per code, drawing each base strength uniformly from
    /// `strength` in roster order.
    pub fn initialize<S: AsRef<str>>(codes: &[S], strength: IntRange, rng: &mut SimRng) -> Self {
        let teams = codes
            .iter()
            .enumerate()
            .map(|(idx, code)| {
                let base = rng.int_inclusive(strength.min, strength.max);
                Team::new(TeamId(idx), code.as_ref(), base)
            })
            .collect();
        Self { teams }
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = TeamId> + '_ {
        self.teams.iter().map(|t| t.id)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn get(&self, id: TeamId) -> &Team {
        &self.teams[id.index()]
    }

    pub fn find(&self, code: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.code == code)
    }

    pub fn code(&self, id: TeamId) -> &str {
        &self.get(id).code
    }

    pub fn base_strength(&self, id: TeamId) -> i64 {
        self.get(id).base_strength
    }

    pub fn last_played(&self, id: TeamId) -> Option<NaiveDate> {
        self.get(id).last_played
    }

    /// Win rate over the team's form window; 0.5 with no games this season.
    pub fn recent_win_rate(&self, id: TeamId) -> f64 {
        self.get(id).recent_win_rate()
    }

    /// Perturb every team's base strength by an independent draw from `drift`.
    pub fn apply_season_drift(&mut self, drift: IntRange, rng: &mut SimRng) {
        for team in &mut self.teams {
            team.base_strength += rng.int_inclusive(drift.min, drift.max);
        }
    }

    pub fn reset_for_season(&mut self) {
        for team in &mut self.teams {
            team.reset_for_season();
        }
    }

    pub fn record_game_result(&mut self, id: TeamId, won: bool) {
        self.teams[id.index()].recent_results.push(won);
    }

    pub fn mark_played(&mut self, id: TeamId, date: NaiveDate) {
        self.teams[id.index()].last_played = Some(date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FORM_WINDOW_CAPACITY;

    fn registry(seed: u64) -> TeamRegistry {
        let mut rng = SimRng::seeded(seed);
        TeamRegistry::initialize(&["LAL", "BOS", "GSW"], IntRange::new(1480, 1620), &mut rng)
    }

    #[test]
    fn initialize_assigns_dense_ids_and_codes() {
        let reg = registry(42);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.ids().collect::<Vec<_>>(), vec![TeamId(0), TeamId(1), TeamId(2)]);
        assert_eq!(reg.code(TeamId(1)), "BOS");
        assert_eq!(reg.find("GSW").map(|t| t.id), Some(TeamId(2)));
        assert!(reg.find("XXX").is_none());
    }

    #[test]
    fn initial_strength_within_range() {
        for seed in 0..50 {
            let reg = registry(seed);
            for team in reg.teams() {
                assert!((1480..=1620).contains(&team.base_strength));
                assert!(team.last_played.is_none());
                assert!(team.recent_results.is_empty());
            }
        }
    }

    #[test]
    fn initialize_is_reproducible() {
        let a = registry(42);
        let b = registry(42);
        assert_eq!(a.teams(), b.teams());
    }

    #[test]
    fn drift_is_bounded() {
        let mut reg = registry(42);
        let before: Vec<i64> = reg.teams().iter().map(|t| t.base_strength).collect();
        let mut rng = SimRng::seeded(5);
        reg.apply_season_drift(IntRange::new(-25, 25), &mut rng);
        for (team, old) in reg.teams().iter().zip(before) {
            assert!((team.base_strength - old).abs() <= 25);
        }
    }

    #[test]
    fn zero_width_drift_is_noop() {
        let mut reg = registry(42);
        let before: Vec<i64> = reg.teams().iter().map(|t| t.base_strength).collect();
        let mut rng = SimRng::seeded(5);
        reg.apply_season_drift(IntRange::new(0, 0), &mut rng);
        let after: Vec<i64> = reg.teams().iter().map(|t| t.base_strength).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn record_result_caps_window() {
        let mut reg = registry(42);
        for i in 0..25 {
            reg.record_game_result(TeamId(0), i % 3 == 0);
            assert!(reg.get(TeamId(0)).recent_results.len() <= FORM_WINDOW_CAPACITY);
        }
        assert_eq!(reg.get(TeamId(0)).recent_results.len(), FORM_WINDOW_CAPACITY);
    }

    #[test]
    fn ten_straight_wins_rate_is_one() {
        let mut reg = registry(42);
        for _ in 0..10 {
            reg.record_game_result(TeamId(2), true);
        }
        assert_eq!(reg.recent_win_rate(TeamId(2)), 1.0);
        assert_eq!(reg.recent_win_rate(TeamId(1)), 0.5);
    }

    #[test]
    fn reset_clears_form_and_schedule() {
        let mut reg = registry(42);
        let date = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        reg.record_game_result(TeamId(0), true);
        reg.mark_played(TeamId(0), date);
        assert_eq!(reg.last_played(TeamId(0)), Some(date));

        reg.reset_for_season();
        assert!(reg.last_played(TeamId(0)).is_none());
        assert!(reg.get(TeamId(0)).recent_results.is_empty());
        assert_eq!(reg.recent_win_rate(TeamId(0)), 0.5);
    }
}
