//! Season orchestrator: the sequential game loop.
//!
//! Per game, in strict order:
//! 1. pick two distinct teams, maybe skip an idle day
//! 2. build matchup context from the current registry + calendar
//! 3. compute effective ratings, win probability, outcome, scores
//! 4. record both results and the played date in the registry
//! 5. advance the calendar
//! 6. hand the record, stamped with the advanced date, to the sink
//!
//! Later games read the state earlier games wrote, so this loop is
//! single-threaded by construction. The generator is owned here and lent to
//! every sampling call.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};

use crate::calendar::CalendarAdvancer;
use crate::config::{ConfigError, SimulationConfig};
use crate::context::{InjuryModel, MatchupContextBuilder};
use crate::domain::{GameRecord, TeamId};
use crate::rating::RatingModel;
use crate::registry::TeamRegistry;
use crate::rng::SimRng;

/// Failure reported by a [`RecordSink`].
#[derive(Debug, Error)]
#[error("{context}: {source}")]
pub struct SinkError {
    context: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl SinkError {
    pub fn new(
        context: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            context: context.into(),
            source: source.into(),
        }
    }
}

impl From<std::io::Error> for SinkError {
    fn from(e: std::io::Error) -> Self {
        Self::new("sink I/O failed", e)
    }
}

/// Errors from a simulation run.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("record sink failed: {0}")]
    Sink(#[from] SinkError),
}

/// Destination for completed game records, called in game order.
pub trait RecordSink {
    fn accept(&mut self, record: &GameRecord) -> Result<(), SinkError>;

    /// Called once after the last record.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl RecordSink for Vec<GameRecord> {
    fn accept(&mut self, record: &GameRecord) -> Result<(), SinkError> {
        self.push(record.clone());
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn accept(&mut self, record: &GameRecord) -> Result<(), SinkError> {
        (**self).accept(record)
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        (**self).finish()
    }
}

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub seasons: u32,
    pub games: u64,
    pub final_date: NaiveDate,
}

pub struct SeasonOrchestrator {
    config: SimulationConfig,
    rng: SimRng,
    registry: TeamRegistry,
    calendar: CalendarAdvancer,
    injuries: InjuryModel,
    model: RatingModel,
    season: u32,
}

impl SeasonOrchestrator {
    /// Validate the config, seed the generator, and draw initial strengths.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = SimRng::seeded(config.seed);
        let registry = TeamRegistry::initialize(&config.teams, config.strength.initial, &mut rng);
        let calendar = CalendarAdvancer::new(config.base_date);
        let injuries = InjuryModel::from_config(&config.injury);
        let model = RatingModel::new(config.rating.clone(), config.score.clone())?;
        Ok(Self {
            config,
            rng,
            registry,
            calendar,
            injuries,
            model,
            season: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn registry(&self) -> &TeamRegistry {
        &self.registry
    }

    pub fn calendar(&self) -> &CalendarAdvancer {
        &self.calendar
    }

    /// Season currently in progress (1-based), or 0 before the first.
    pub fn season(&self) -> u32 {
        self.season
    }

    /// Start the next season: drift strengths, then clear form and schedule.
    pub fn begin_season(&mut self) -> u32 {
        self.season += 1;
        self.registry
            .apply_season_drift(self.config.strength.season_drift, &mut self.rng);
        self.registry.reset_for_season();
        self.season
    }

    /// Simulate one game of the current season and update all state.
    pub fn play_game(&mut self) -> GameRecord {
        let (h, a) = self.rng.distinct_pair(self.registry.len());
        let (home, away) = (TeamId(h), TeamId(a));

        self.calendar
            .maybe_skip_day(self.config.schedule.skip_day_probability, &mut self.rng);
        let played_on = self.calendar.current();

        let ctx = MatchupContextBuilder::new(&self.registry, &self.calendar, &self.injuries)
            .build(home, away, &mut self.rng);

        let ratings = self.model.effective_ratings(
            self.registry.base_strength(home),
            self.registry.base_strength(away),
            &ctx,
        );
        let home_win_prob = self.model.win_probability(&ratings, &mut self.rng);
        let home_win = self.model.sample_outcome(home_win_prob, &mut self.rng);
        let (home_score, away_score) = self.model.sample_scores(ratings.diff(), &mut self.rng);

        self.registry.record_game_result(home, home_win);
        self.registry.record_game_result(away, !home_win);
        self.registry.mark_played(home, played_on);
        self.registry.mark_played(away, played_on);

        self.calendar
            .advance_after_game(self.config.schedule.advance_day_probability, &mut self.rng);

        GameRecord {
            season: self.season,
            date: self.calendar.current(),
            home_team: self.registry.code(home).to_string(),
            away_team: self.registry.code(away).to_string(),
            home_rating: ratings.home,
            away_rating: ratings.away,
            home_rest_days: ctx.home_rest,
            away_rest_days: ctx.away_rest,
            home_injury_impact: ctx.home_injury,
            away_injury_impact: ctx.away_injury,
            home_recent_winrate: ctx.home_form,
            away_recent_winrate: ctx.away_form,
            home_win_prob,
            home_score,
            away_score,
            home_win,
        }
    }

    /// Close the current season with the off-season gap.
    pub fn end_season(&mut self) {
        self.calendar
            .advance_between_seasons(self.config.schedule.offseason_gap_days);
    }

    /// Run every season and stream each record into `sink`.
    pub fn run<S: RecordSink + ?Sized>(
        mut self,
        sink: &mut S,
    ) -> Result<RunStats, SimulationError> {
        info!(
            seed = self.config.seed,
            teams = self.registry.len(),
            seasons = self.config.seasons,
            games_per_season = self.config.games_per_season,
            start = %self.calendar.current(),
            "starting league simulation"
        );

        let mut games = 0u64;
        for _ in 0..self.config.seasons {
            let season = self.begin_season();
            for _ in 0..self.config.games_per_season {
                let record = self.play_game();
                sink.accept(&record)?;
                games += 1;
            }
            debug!(season, games, date = %self.calendar.current(), "season complete");
            self.end_season();
        }
        sink.finish()?;

        info!(games, final_date = %self.calendar.current(), "simulation finished");
        Ok(RunStats {
            seasons: self.season,
            games,
            final_date: self.calendar.current(),
        })
    }
}

/// Run a full simulation and collect every record in memory.
pub fn simulate(config: SimulationConfig) -> Result<Vec<GameRecord>, SimulationError> {
    let orchestrator = SeasonOrchestrator::new(config)?;
    let mut records = Vec::new();
    orchestrator.run(&mut records)?;
    Ok(records)
}
