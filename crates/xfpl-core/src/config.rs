// Configuration loading and parsing (scoring.toml, analysis.toml).

use crate::player::Position;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Built-in copies of the default config files, written to the per-user
/// config directory when no project directory is available.
const EMBEDDED_DEFAULTS: &[(&str, &str)] = &[
    ("scoring.toml", include_str!("../../../defaults/scoring.toml")),
    ("analysis.toml", include_str!("../../../defaults/analysis.toml")),
];

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub analysis: AnalysisConfig,
    pub source: SourceConfig,
    pub cache_ttl_secs: u64,
    pub export_dir: String,
}

// ---------------------------------------------------------------------------
// scoring.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire scoring.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ScoringFile {
    goals: PositionPoints,
    clean_sheets: PositionPoints,
    assists: AssistsSection,
    appearance: AppearanceConfig,
    bonus: BonusSection,
}

#[derive(Debug, Clone, Deserialize)]
struct AssistsSection {
    points: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct BonusSection {
    per_100_bps_per_match: f64,
}

/// Point values keyed by position. Field names match the TOML keys
/// (GKP, DEF, MID, FWD).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[allow(non_snake_case)]
pub struct PositionPoints {
    pub GKP: f64,
    pub DEF: f64,
    pub MID: f64,
    pub FWD: f64,
}

impl PositionPoints {
    pub fn for_position(&self, position: Position) -> f64 {
        match position {
            Position::Goalkeeper => self.GKP,
            Position::Defender => self.DEF,
            Position::Midfielder => self.MID,
            Position::Forward => self.FWD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AppearanceConfig {
    /// Points for a start (assumed to reach the 60-minute threshold).
    pub start_points: f64,
    /// Points credited per `sub_minutes_per_point` substitute minutes.
    pub sub_points: f64,
    /// Minutes a start is assumed to account for.
    pub start_minutes: f64,
    pub sub_minutes_per_point: f64,
}

/// Constants of the expected-points model.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub goal_points: PositionPoints,
    pub clean_sheet_points: PositionPoints,
    pub assist_points: f64,
    pub appearance: AppearanceConfig,
    /// Expected bonus points per 100 BPS accumulated in one match.
    pub bonus_per_100_bps_per_match: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            goal_points: PositionPoints {
                GKP: 10.0,
                DEF: 6.0,
                MID: 5.0,
                FWD: 4.0,
            },
            clean_sheet_points: PositionPoints {
                GKP: 4.0,
                DEF: 4.0,
                MID: 1.0,
                FWD: 0.0,
            },
            assist_points: 3.0,
            appearance: AppearanceConfig {
                start_points: 2.0,
                sub_points: 1.0,
                start_minutes: 60.0,
                sub_minutes_per_point: 30.0,
            },
            bonus_per_100_bps_per_match: 0.035,
        }
    }
}

// ---------------------------------------------------------------------------
// analysis.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire analysis.toml file.
#[derive(Debug, Clone, Deserialize)]
struct AnalysisFile {
    pools: PoolsSection,
    buy: BuyCriteria,
    sell: SellCriteria,
    display: DisplaySection,
    source: SourceConfig,
    cache: CacheSection,
    export: ExportSection,
}

#[derive(Debug, Clone, Deserialize)]
struct PoolsSection {
    regular_minutes: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct DisplaySection {
    max_recommendations: usize,
}

#[derive(Debug, Clone, Deserialize)]
struct CacheSection {
    ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct ExportSection {
    dir: String,
}

/// Underperformers with strong underlying numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BuyCriteria {
    /// Quantile of the regular pool's xFPL90 a target must exceed.
    pub xfpl90_quantile: f64,
    pub min_points: i32,
    pub max_delta: f64,
    pub min_minutes: u32,
}

/// Overperformers with weak underlying numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SellCriteria {
    pub max_xfpl90: f64,
    pub min_points: i32,
    pub min_delta: f64,
    pub min_performance_pct: f64,
}

/// The public analysis config assembled from the analysis.toml sections.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub regular_minutes: u32,
    pub buy: BuyCriteria,
    pub sell: SellCriteria,
    pub max_recommendations: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            regular_minutes: 900,
            buy: BuyCriteria {
                xfpl90_quantile: 0.75,
                min_points: 45,
                max_delta: -8.0,
                min_minutes: 900,
            },
            sell: SellCriteria {
                max_xfpl90: 4.0,
                min_points: 35,
                min_delta: 12.0,
                min_performance_pct: 125.0,
            },
            max_recommendations: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceConfig {
    pub url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            url: "https://fantasy.premierleague.com/api/bootstrap-static/".into(),
            timeout_secs: 10,
            user_agent: "xfpl/0.1".into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scoring: ScoringConfig::default(),
            analysis: AnalysisConfig::default(),
            source: SourceConfig::default(),
            cache_ttl_secs: 3600,
            export_dir: "exports".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/scoring.toml` and
/// `config/analysis.toml`, relative to the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- scoring.toml (required) ---
    let scoring_path = config_dir.join("scoring.toml");
    let scoring_text = read_file(&scoring_path)?;
    let scoring_file: ScoringFile =
        toml::from_str(&scoring_text).map_err(|e| ConfigError::ParseError {
            path: scoring_path.clone(),
            source: e,
        })?;

    let scoring = ScoringConfig {
        goal_points: scoring_file.goals,
        clean_sheet_points: scoring_file.clean_sheets,
        assist_points: scoring_file.assists.points,
        appearance: scoring_file.appearance,
        bonus_per_100_bps_per_match: scoring_file.bonus.per_100_bps_per_match,
    };

    // --- analysis.toml (required) ---
    let analysis_path = config_dir.join("analysis.toml");
    let analysis_text = read_file(&analysis_path)?;
    let analysis_file: AnalysisFile =
        toml::from_str(&analysis_text).map_err(|e| ConfigError::ParseError {
            path: analysis_path.clone(),
            source: e,
        })?;

    let analysis = AnalysisConfig {
        regular_minutes: analysis_file.pools.regular_minutes,
        buy: analysis_file.buy,
        sell: analysis_file.sell,
        max_recommendations: analysis_file.display.max_recommendations,
    };

    let config = Config {
        scoring,
        analysis,
        source: analysis_file.source,
        cache_ttl_secs: analysis_file.cache.ttl_secs,
        export_dir: analysis_file.export.dir,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Write the built-in default files into `base_dir/defaults/`, leaving
/// existing files untouched.
pub fn install_embedded_defaults(base_dir: &Path) -> Result<(), ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    std::fs::create_dir_all(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create {}: {e}", defaults_dir.display()),
    })?;
    for (name, content) in EMBEDDED_DEFAULTS {
        let target = defaults_dir.join(name);
        if target.exists() {
            continue;
        }
        std::fs::write(&target, content).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to write {}: {e}", target.display()),
        })?;
    }
    Ok(())
}

/// Pick the directory config is loaded relative to: the working directory
/// when it looks like a project checkout, otherwise the per-user config
/// directory.
pub fn resolve_base_dir(cwd: &Path) -> PathBuf {
    if cwd.join("config").exists() || cwd.join("defaults").exists() {
        return cwd.to_path_buf();
    }
    match directories::ProjectDirs::from("", "", "xfpl") {
        Some(dirs) => dirs.config_dir().to_path_buf(),
        None => cwd.to_path_buf(),
    }
}

/// Convenience wrapper: resolves the base directory from the current working
/// directory, ensures default config files exist, then loads them.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    let base = resolve_base_dir(&cwd);
    if base != cwd {
        info!("using per-user config directory {}", base.display());
        install_embedded_defaults(&base)?;
    }
    ensure_config_files(&base)?;
    load_config_from(&base)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn non_negative(field: &str, val: f64) -> Result<(), ConfigError> {
    if !val.is_finite() || val < 0.0 {
        return Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: format!("must be a finite value >= 0, got {val}"),
        });
    }
    Ok(())
}

fn positive(field: &str, val: f64) -> Result<(), ConfigError> {
    if !val.is_finite() || val <= 0.0 {
        return Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: format!("must be > 0, got {val}"),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let s = &config.scoring;

    let point_fields: &[(&str, f64)] = &[
        ("goals.GKP", s.goal_points.GKP),
        ("goals.DEF", s.goal_points.DEF),
        ("goals.MID", s.goal_points.MID),
        ("goals.FWD", s.goal_points.FWD),
        ("clean_sheets.GKP", s.clean_sheet_points.GKP),
        ("clean_sheets.DEF", s.clean_sheet_points.DEF),
        ("clean_sheets.MID", s.clean_sheet_points.MID),
        ("clean_sheets.FWD", s.clean_sheet_points.FWD),
        ("assists.points", s.assist_points),
        ("appearance.start_points", s.appearance.start_points),
        ("appearance.sub_points", s.appearance.sub_points),
        ("bonus.per_100_bps_per_match", s.bonus_per_100_bps_per_match),
    ];
    for (name, val) in point_fields {
        non_negative(name, *val)?;
    }

    if s.clean_sheet_points.FWD != 0.0 {
        return Err(ConfigError::ValidationError {
            field: "clean_sheets.FWD".into(),
            message: format!("forwards earn no clean sheet points, got {}", s.clean_sheet_points.FWD),
        });
    }

    positive("appearance.start_minutes", s.appearance.start_minutes)?;
    positive(
        "appearance.sub_minutes_per_point",
        s.appearance.sub_minutes_per_point,
    )?;

    let a = &config.analysis;
    let q = a.buy.xfpl90_quantile;
    if !(0.0..=1.0).contains(&q) {
        return Err(ConfigError::ValidationError {
            field: "buy.xfpl90_quantile".into(),
            message: format!("must be between 0.0 and 1.0 inclusive, got {q}"),
        });
    }

    if a.max_recommendations == 0 {
        return Err(ConfigError::ValidationError {
            field: "display.max_recommendations".into(),
            message: "must be > 0".into(),
        });
    }

    if config.source.url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "source.url".into(),
            message: "must not be empty".into(),
        });
    }

    if config.source.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "source.timeout_secs".into(),
            message: "must be > 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    /// Helper: returns the workspace root containing `defaults/`, searching
    /// upwards from the CWD (cargo runs unit tests from the crate directory).
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        cwd.ancestors()
            .find(|dir| dir.join("defaults/scoring.toml").exists())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| panic!("Cannot locate defaults/ directory from CWD {:?}", cwd))
    }

    /// Helper: fresh scratch dir with both default files copied into config/.
    fn scratch_with_defaults(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();

        let root = project_root();
        fs::copy(root.join("defaults/scoring.toml"), config_dir.join("scoring.toml")).unwrap();
        fs::copy(
            root.join("defaults/analysis.toml"),
            config_dir.join("analysis.toml"),
        )
        .unwrap();
        tmp
    }

    fn assert_validation_field(err: ConfigError, expected: &str) {
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, expected),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn load_valid_config_from_default_files() {
        let tmp = scratch_with_defaults("xfpl_config_test_valid");
        let config = load_config_from(&tmp).expect("should load valid config");

        assert_eq!(config.scoring, ScoringConfig::default());
        assert_eq!(config.analysis, AnalysisConfig::default());
        assert_eq!(config.source, SourceConfig::default());

        assert_eq!(
            config.source.url,
            "https://fantasy.premierleague.com/api/bootstrap-static/"
        );
        assert_eq!(config.source.timeout_secs, 10);
        assert_eq!(config.cache_ttl_secs, 3600);
        assert_eq!(config.export_dir, "exports");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn position_points_lookup() {
        let scoring = ScoringConfig::default();
        assert_eq!(scoring.goal_points.for_position(Position::Goalkeeper), 10.0);
        assert_eq!(scoring.goal_points.for_position(Position::Forward), 4.0);
        assert_eq!(scoring.clean_sheet_points.for_position(Position::Midfielder), 1.0);
        assert_eq!(scoring.clean_sheet_points.for_position(Position::Forward), 0.0);
    }

    #[test]
    fn rejects_negative_goal_points() {
        let tmp = scratch_with_defaults("xfpl_config_test_negative_goal");
        let path = tmp.join("config/scoring.toml");
        let text = fs::read_to_string(&path).unwrap();
        fs::write(&path, text.replace("DEF = 6.0", "DEF = -6.0")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        assert_validation_field(err, "goals.DEF");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_forward_clean_sheet_points() {
        let tmp = scratch_with_defaults("xfpl_config_test_fwd_clean_sheet");
        let path = tmp.join("config/scoring.toml");
        let text = fs::read_to_string(&path).unwrap();
        fs::write(&path, text.replace("FWD = 0.0", "FWD = 1.0")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        assert_validation_field(err, "clean_sheets.FWD");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_sub_minutes_per_point() {
        let tmp = scratch_with_defaults("xfpl_config_test_zero_sub_minutes");
        let path = tmp.join("config/scoring.toml");
        let text = fs::read_to_string(&path).unwrap();
        fs::write(
            &path,
            text.replace("sub_minutes_per_point = 30.0", "sub_minutes_per_point = 0.0"),
        )
        .unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        assert_validation_field(err, "appearance.sub_minutes_per_point");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_quantile_above_one() {
        let tmp = scratch_with_defaults("xfpl_config_test_quantile");
        let path = tmp.join("config/analysis.toml");
        let text = fs::read_to_string(&path).unwrap();
        fs::write(
            &path,
            text.replace("xfpl90_quantile = 0.75", "xfpl90_quantile = 1.5"),
        )
        .unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        assert_validation_field(err, "buy.xfpl90_quantile");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_recommendations() {
        let tmp = scratch_with_defaults("xfpl_config_test_zero_recs");
        let path = tmp.join("config/analysis.toml");
        let text = fs::read_to_string(&path).unwrap();
        fs::write(
            &path,
            text.replace("max_recommendations = 20", "max_recommendations = 0"),
        )
        .unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        assert_validation_field(err, "display.max_recommendations");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_timeout() {
        let tmp = scratch_with_defaults("xfpl_config_test_zero_timeout");
        let path = tmp.join("config/analysis.toml");
        let text = fs::read_to_string(&path).unwrap();
        fs::write(&path, text.replace("timeout_secs = 10", "timeout_secs = 0")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        assert_validation_field(err, "source.timeout_secs");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_scoring_toml() {
        let tmp = scratch_with_defaults("xfpl_config_test_missing_scoring");
        fs::remove_file(tmp.join("config/scoring.toml")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("scoring.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = scratch_with_defaults("xfpl_config_test_invalid_toml");
        fs::write(tmp.join("config/analysis.toml"), "this is not valid [[[ toml").unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("analysis.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_files() {
        let tmp = std::env::temp_dir().join("xfpl_config_test_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();

        let root = project_root();
        fs::copy(root.join("defaults/scoring.toml"), defaults_dir.join("scoring.toml")).unwrap();
        fs::copy(root.join("defaults/analysis.toml"), defaults_dir.join("analysis.toml")).unwrap();
        fs::write(defaults_dir.join("local.toml.example"), "# example\n").unwrap();

        assert!(!tmp.join("config").exists());

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 2);
        assert!(tmp.join("config/scoring.toml").exists());
        assert!(tmp.join("config/analysis.toml").exists());
        assert!(!tmp.join("config/local.toml.example").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = std::env::temp_dir().join("xfpl_config_test_ensure_skips");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        let config_dir = tmp.join("config");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::create_dir_all(&config_dir).unwrap();

        let root = project_root();
        fs::copy(root.join("defaults/scoring.toml"), defaults_dir.join("scoring.toml")).unwrap();
        fs::copy(root.join("defaults/analysis.toml"), defaults_dir.join("analysis.toml")).unwrap();
        fs::write(config_dir.join("scoring.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(copied[0].ends_with("analysis.toml"));

        let content = fs::read_to_string(config_dir.join("scoring.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("xfpl_config_test_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn embedded_defaults_load_cleanly() {
        let tmp = std::env::temp_dir().join("xfpl_config_test_embedded");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        install_embedded_defaults(&tmp).expect("should write defaults");
        ensure_config_files(&tmp).expect("should copy defaults");
        let config = load_config_from(&tmp).expect("embedded defaults should be valid");
        assert_eq!(config.scoring, ScoringConfig::default());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn resolve_base_dir_prefers_project_checkout() {
        let root = project_root();
        assert_eq!(resolve_base_dir(&root), root);
    }
}
