//! Colony run configuration, loaded from YAML.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use delve::act::PlanActConfig;
use delve::core::Cell;
use delve::plan::{PlanServiceConfig, MIN_RESPONSE_CAPACITY};
use delve::task::SchedulerConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub seed: u64,

    /// Ticks to simulate before stopping.
    pub ticks: u64,

    pub dt_seconds: f32,

    /// Stop as soon as every ore vein has been mined.
    pub stop_when_mined: bool,

    pub map: MapConfig,
    pub colonists: ColonistConfig,
    pub planner: PlanServiceConfig,
    pub plan: PlanActConfig,
    pub scheduler: SchedulerConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            ticks: 600,
            dt_seconds: 0.1,
            stop_when_mined: true,
            map: MapConfig::default(),
            colonists: ColonistConfig::default(),
            planner: PlanServiceConfig::default(),
            plan: PlanActConfig::default(),
            scheduler: SchedulerConfig {
                max_attempts: Some(4),
                record_trace: true,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: u32,
    pub height: u32,
    pub depth: u32,

    /// Solid boxes, inclusive corners.
    pub walls: Vec<[Cell; 2]>,

    /// Solid cells the colonists are asked to dig out.
    pub ore: Vec<Cell>,

    pub ladders: Vec<Cell>,

    /// Cells flooded to full depth.
    pub water: Vec<Cell>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 24,
            height: 4,
            depth: 24,
            walls: vec![[Cell::new(12, 0, 0), Cell::new(12, 1, 18)]],
            ore: vec![
                Cell::new(20, 0, 3),
                Cell::new(18, 0, 20),
                Cell::new(3, 0, 21),
                Cell::new(15, 0, 10),
            ],
            ladders: Vec::new(),
            water: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonistConfig {
    pub count: u32,

    /// Colonists spawn along the x axis from here.
    pub spawn: Cell,

    /// How far an idle colonist strolls from where it stands.
    pub wander_radius: u32,

    /// Ticks spent swinging the pick once next to the ore.
    pub dig_ticks: u32,

    pub ticks_per_step: u32,
}

impl Default for ColonistConfig {
    fn default() -> Self {
        Self {
            count: 3,
            spawn: Cell::new(1, 0, 1),
            wander_radius: 4,
            dig_ticks: 5,
            ticks_per_step: 1,
        }
    }
}

impl SimConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let map = &self.map;
        ensure!(
            map.width > 0 && map.height > 0 && map.depth > 0,
            "map dimensions must be positive"
        );
        let spawn = self.colonists.spawn;
        let last_x = spawn.x as i64 + i64::from(self.colonists.count.saturating_sub(1));
        ensure!(
            spawn.x >= 0
                && spawn.y >= 0
                && spawn.z >= 0
                && last_x < i64::from(map.width)
                && spawn.y < map.height as i32
                && spawn.z < map.depth as i32,
            "colonists must spawn inside the map"
        );
        ensure!(self.dt_seconds > 0.0, "dt_seconds must be positive");
        ensure!(
            self.plan.heuristic_weight >= 1.0,
            "plan.heuristic_weight must be at least 1.0"
        );
        ensure!(
            self.plan.weight_escalation >= 1.0,
            "plan.weight_escalation must be at least 1.0"
        );
        ensure!(
            self.planner.response_capacity >= MIN_RESPONSE_CAPACITY,
            "planner.response_capacity must be at least {MIN_RESPONSE_CAPACITY}"
        );
        Ok(())
    }
}
