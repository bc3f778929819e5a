//! Loading terrain from CSV files and running a full analysis on it

use bushfire_core::analysis::TerrainReport;
use bushfire_core::{
    compare, load_bushfire, write_bushfire, BushfireError, FireState, RiskMatrix, SimulationConfig,
    SpreadMode, SpreadSimulation, TerrainLayers, VegetationType,
};
use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};

const VEGETATION: &str = "\
Shrubland,Shrubland,Pine Forest,,Golf Course
Shrubland,Arboretum,Pine Forest,Urban Vegetation,Golf Course
,Arboretum,Shrubland,Shrubland,Grassland
";

const DENSITY: &str = "\
0.5,0.6,0.9,,0.1
0.4,0.3,0.8,0.2,0.1
,0.3,0.7,0.5,0.6
";

const WIND: &str = "\
0,1.5,2,,0
,3,2.5,1,0
0,0,1,,4
";

const BUSHFIRE: &str = "\
0,0,0,,0
0,1,0,0,0
,0,0,0,0
";

/// Scenario directory under the system temp dir, removed on drop
struct ScenarioDir(PathBuf);

impl Deref for ScenarioDir {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

impl Drop for ScenarioDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn write_scenario(name: &str) -> ScenarioDir {
    let dir = std::env::temp_dir().join(format!("bushfire-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("vegetation_type.csv"), VEGETATION).unwrap();
    fs::write(dir.join("vegetation_density.csv"), DENSITY).unwrap();
    fs::write(dir.join("wind.csv"), WIND).unwrap();
    fs::write(dir.join("bushfire.csv"), BUSHFIRE).unwrap();
    ScenarioDir(dir)
}

fn load_terrain(dir: &Path) -> TerrainLayers {
    TerrainLayers::load(
        dir.join("vegetation_type.csv"),
        dir.join("vegetation_density.csv"),
        dir.join("wind.csv"),
    )
    .unwrap()
}

#[test]
fn test_load_terrain_from_files() {
    let dir = write_scenario("load");
    let terrain = load_terrain(&dir);

    assert_eq!(terrain.dimensions(), (3, 5));
    assert_eq!(terrain.vegetation_type()[(0, 3)], None);
    assert_eq!(
        terrain.vegetation_type()[(1, 3)],
        Some(VegetationType::UrbanVegetation)
    );
    assert_eq!(terrain.vegetation_density()[(2, 0)], None);
    assert_eq!(terrain.wind_speed()[(1, 0)], None);
    assert_eq!(terrain.wind_speed()[(2, 4)], Some(4.0));
}

#[test]
fn test_missing_layer_is_not_found() {
    let dir = write_scenario("missing");
    let err = TerrainLayers::load(
        dir.join("vegetation_type.csv"),
        dir.join("vegetation_density.csv"),
        dir.join("no_such_wind.csv"),
    )
    .unwrap_err();
    assert!(matches!(err, BushfireError::NotFound { .. }));
}

#[test]
fn test_mismatched_layer_files_rejected() {
    let dir = write_scenario("mismatch");
    fs::write(dir.join("wind.csv"), "0,0\n0,0\n").unwrap();
    let err = TerrainLayers::load(
        dir.join("vegetation_type.csv"),
        dir.join("vegetation_density.csv"),
        dir.join("wind.csv"),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        BushfireError::DimensionMismatch {
            layer: "wind_speed",
            ..
        }
    ));
}

#[test]
fn test_deterministic_run_from_files_and_back() {
    let dir = write_scenario("roundtrip");
    let terrain = load_terrain(&dir);
    let fire = load_bushfire(dir.join("bushfire.csv")).unwrap();

    let config = SimulationConfig {
        steps: 1,
        ..SimulationConfig::default()
    };
    let mut sim = SpreadSimulation::from_config(fire, &terrain, &config).unwrap();
    sim.run(config.steps, &mut config.rng());
    let result = sim.into_fire_state();

    // (1, 1) spreads to its 8 neighbours; (2, 0) is blank
    assert_eq!(result[(0, 0)], Some(FireState::Burning));
    assert_eq!(result[(2, 2)], Some(FireState::Burning));
    assert_eq!(result[(2, 0)], None);
    assert_eq!(result[(0, 3)], None);
    assert_eq!(result[(1, 3)], Some(FireState::Unburnt));

    let out = dir.join("result.csv");
    write_bushfire(&out, &result).unwrap();
    let reloaded = load_bushfire(&out).unwrap();
    assert_eq!(compare(&result, &reloaded).unwrap(), 1.0);
}

#[test]
fn test_stochastic_run_from_json_config() {
    let dir = write_scenario("stochastic");
    fs::write(
        dir.join("config.json"),
        r#"{"steps": 3, "mode": "stochastic", "exclusion": "source-cell-only", "seed": 5}"#,
    )
    .unwrap();

    let terrain = load_terrain(&dir);
    let config = SimulationConfig::from_json_file(dir.join("config.json")).unwrap();
    assert_eq!(config.mode, SpreadMode::Stochastic);

    let fire = load_bushfire(dir.join("bushfire.csv")).unwrap();
    let reference = fire.clone();
    let run = || {
        let mut sim = SpreadSimulation::from_config(fire.clone(), &terrain, &config).unwrap();
        sim.run(config.steps, &mut config.rng());
        sim.into_fire_state()
    };
    let first = run();
    assert_eq!(first, run());

    let score = compare(&reference, &first).unwrap();
    assert!((0.0..=1.0).contains(&score));
    assert_eq!(first[(1, 1)], Some(FireState::Burning));
}

#[test]
fn test_risk_matrix_and_report_from_files() {
    let dir = write_scenario("report");
    let terrain = load_terrain(&dir);

    let matrix = RiskMatrix::from_terrain(&terrain);
    assert!(matrix.max_risk() > 0.0);
    assert!(matrix.grid().as_slice().iter().all(|r| *r >= 0.0));

    let report = TerrainReport::from_terrain(&terrain);
    assert_eq!(report.blank_vegetation_cells, 2);
    assert_eq!(report.highest_wind_speed, Some(4.0));
    let shrub = report
        .vegetation
        .iter()
        .find(|t| t.vegetation_type == "Shrubland")
        .unwrap();
    assert_eq!(shrub.cells, 5);
}

#[test]
fn test_scenario_files_removed_after_use() {
    let dir = write_scenario("cleanup");
    let path = dir.to_path_buf();
    assert!(path.join("bushfire.csv").exists());
    drop(dir);
    assert!(!path.exists());
}
