//! End-to-end: config file -> simulation -> CSV on disk -> features.

use std::fs;

use leaguesim_core::schema::{validate_header, GAME_RECORD_COLUMNS};
use leaguesim_core::SimulationConfig;
use leaguesim_runner::{
    extract_features_from_path, hash_records, run_seed_sweep, run_simulation, write_features_csv,
    write_games_csv, DatasetSchema, RunConfig, RunError,
};

fn small() -> SimulationConfig {
    SimulationConfig {
        seasons: 2,
        games_per_season: 150,
        ..SimulationConfig::default()
    }
}

// ── Determinism ──

#[test]
fn same_seed_gives_byte_identical_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.csv");
    let b = dir.path().join("b.csv");

    let ra = write_games_csv(&a, &small()).unwrap();
    let rb = write_games_csv(&b, &small()).unwrap();

    assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
    assert_eq!(ra.summary.dataset_hash, rb.summary.dataset_hash);
}

#[test]
fn file_hash_matches_in_memory_hash() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("games.csv");
    let report = write_games_csv(&path, &small()).unwrap();
    let records = leaguesim_core::simulate(small()).unwrap();
    assert_eq!(report.summary.dataset_hash, hash_records(&records));
}

// ── Output contract ──

#[test]
fn written_file_follows_the_contract() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out/games.csv");
    let report = write_games_csv(&path, &small()).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let header: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
    assert!(validate_header(&header).is_valid);
    assert_eq!(header, GAME_RECORD_COLUMNS);

    let rows: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 300);
    assert_eq!(report.stats.games, 300);

    for row in &rows {
        assert_eq!(row.len(), 16);
        assert!(row[0] == *"1" || row[0] == *"2");
        assert!(row[15] == *"0" || row[15] == *"1");
        let prob: f64 = row[12].parse().unwrap();
        assert!((0.01..=0.99).contains(&prob));
        let rest: i64 = row[6].parse().unwrap();
        assert!((0..=7).contains(&rest));
        // Ratings are whole numbers.
        row[4].parse::<i64>().unwrap();
        row[5].parse::<i64>().unwrap();
    }
}

#[test]
fn invalid_config_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.csv");
    let config = SimulationConfig {
        teams: vec!["AAA".into(), "AAA".into()],
        ..small()
    };
    let err = write_games_csv(&path, &config).unwrap_err();
    assert!(matches!(err, RunError::Config(_)));
    assert!(!path.exists());
}

// ── TOML config ──

#[test]
fn toml_config_drives_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("from_toml.csv");
    let toml = format!(
        "[simulation]\nteams = [\"AAA\", \"BBB\", \"CCC\", \"DDD\"]\nseasons = 1\ngames_per_season = 25\nseed = 3\n\n[output]\npath = {:?}\n",
        out.display().to_string()
    );
    let cfg_path = dir.path().join("league.toml");
    fs::write(&cfg_path, toml).unwrap();

    let run = RunConfig::from_file(&cfg_path).unwrap();
    let sim = run.simulation_config().unwrap();
    let report = run_simulation(&sim, Some(run.output_path().as_path())).unwrap();

    assert_eq!(report.summary.rows, 25);
    assert_eq!(report.summary.seed, 3);
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.lines().skip(1).all(|l| {
        let cols: Vec<&str> = l.split(',').collect();
        ["AAA", "BBB", "CCC", "DDD"].contains(&cols[2])
    }));
}

// ── Features ──

#[test]
fn generated_dataset_feeds_feature_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let games = dir.path().join("games.csv");
    write_games_csv(&games, &small()).unwrap();

    let set = extract_features_from_path(&games).unwrap();
    assert_eq!(set.schema, DatasetSchema::Mock);
    assert_eq!(set.len(), 300);
    assert_eq!(set.dropped, 0);
    assert_eq!(set.optional_columns.len(), 7);
    for row in &set.rows {
        assert_eq!(row.elo_diff, row.home_elo - row.away_elo);
    }

    let features = dir.path().join("features.csv");
    write_features_csv(&set, fs::File::create(&features).unwrap()).unwrap();
    let text = fs::read_to_string(&features).unwrap();
    assert_eq!(
        text.lines().next().unwrap(),
        "home_elo,away_elo,elo_diff,home_rest_days,away_rest_days,home_injury_impact,\
away_injury_impact,home_recent_winrate,away_recent_winrate,home_win_prob,home_win"
    );
    assert_eq!(text.lines().count(), 301);
}

#[test]
fn fivethirtyeight_file_is_recognized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nba_elo.csv");
    fs::write(
        &path,
        "date,team1,team2,elo1_pre,elo2_pre,score1,score2\n\
         2019-10-22,TOR,NOP,1631.7,1545.9,130,122\n\
         2019-10-22,LAC,LAL,1628.2,1594.5,112,102\n\
         2019-10-23,CHI,CHA,1401.0,1380.4,125,126\n\
         2019-10-23,DET,IND,1497.5,1547.2,,\n",
    )
    .unwrap();

    let set = extract_features_from_path(&path).unwrap();
    assert_eq!(set.schema, DatasetSchema::FiveThirtyEight);
    assert_eq!(set.len(), 3);
    assert_eq!(set.dropped, 1);
    let wins: Vec<u8> = set.rows.iter().map(|r| r.home_win).collect();
    assert_eq!(wins, vec![1, 1, 0]);
}

#[test]
fn unrecognized_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("box_scores.csv");
    fs::write(&path, "player,points,rebounds\nX,30,10\n").unwrap();
    let err = extract_features_from_path(&path).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("unrecognized dataset schema"));
    assert!(msg.contains("player, points, rebounds"));
}

// ── Sweeps ──

#[test]
fn sweep_files_match_single_runs() {
    let dir = tempfile::tempdir().unwrap();
    let base = SimulationConfig {
        seasons: 1,
        games_per_season: 60,
        ..SimulationConfig::default()
    };
    let seeds = [100, 200, 300];
    let reports = run_seed_sweep(&base, &seeds, Some(dir.path())).unwrap();

    for (report, &seed) in reports.iter().zip(&seeds) {
        let single = dir.path().join(format!("single_{seed}.csv"));
        write_games_csv(&single, &base.clone().with_seed(seed)).unwrap();
        let swept = report.output.as_ref().unwrap();
        assert_eq!(fs::read(swept).unwrap(), fs::read(&single).unwrap());
    }
}
