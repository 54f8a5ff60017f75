use std::{
    ffi::OsString,
    fs::{self, File},
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::{Context, ensure};
use chrono::{DateTime, Utc};
use neurosnake_network::NetworkTopology;
use neurosnake_training::{
    engine::{EngineConfig, EvolutionEngine},
    genome::Genome,
    statistics::PopulationStats,
};
use serde::{Deserialize, Serialize};

pub(crate) const SNAPSHOT_VERSION: u32 = 1;

/// Snapshot file name for a population size and hidden-layer shape.
pub(crate) fn file_name(
    population_size: usize,
    hidden_layers: usize,
    neurons_per_hidden_layer: usize,
) -> String {
    format!("{population_size}-pop-{hidden_layers}x{neurons_per_hidden_layer}.json")
}

/// Everything needed to resume training where it stopped.
///
/// `stats` describe the last evaluated generation, `population` is the
/// generation bred from it and not yet evaluated.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub(crate) struct TrainingSnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub topology: NetworkTopology,
    pub config: EngineConfig,
    pub generation: usize,
    pub stats: PopulationStats,
    pub population: Vec<Genome>,
}

impl TrainingSnapshot {
    pub(crate) fn capture(engine: &EvolutionEngine, topology: NetworkTopology) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            topology,
            config: *engine.config(),
            generation: engine.generation(),
            stats: *engine.stats(),
            population: engine.population().to_vec(),
        }
    }

    pub(crate) fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open snapshot file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let snapshot = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;

        Ok(snapshot)
    }

    /// Writes the snapshot next to `path` and renames it into place, so an
    /// interrupted save never leaves a truncated snapshot behind.
    pub(crate) fn save<P>(&self, path: P) -> anyhow::Result<()>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let tmp_path = staging_path(path);

        let file = File::create(&tmp_path)
            .with_context(|| format!("Failed to create snapshot file: {}", tmp_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)
            .with_context(|| format!("Failed to write snapshot to {}", tmp_path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush snapshot to {}", tmp_path.display()))?;
        drop(writer);

        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to move snapshot from {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;
        Ok(())
    }

    /// Rebuilds an engine, refusing snapshots taken with other settings.
    pub(crate) fn into_engine(
        self,
        topology: NetworkTopology,
        config: &EngineConfig,
    ) -> anyhow::Result<EvolutionEngine> {
        ensure!(
            self.version == SNAPSHOT_VERSION,
            "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
            self.version
        );
        ensure!(
            self.topology == topology,
            "snapshot topology {:?} differs from {topology:?}",
            self.topology
        );
        ensure!(
            self.config == *config,
            "snapshot configuration {:?} differs from {config:?}",
            self.config
        );
        let engine =
            EvolutionEngine::restore(self.config, self.generation, self.population, self.stats)?;
        Ok(engine)
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".new");
    PathBuf::from(name)
}

/// Resumes from the snapshot at `path`, or returns `None` to start fresh.
pub(crate) fn load_engine(
    path: &Path,
    topology: NetworkTopology,
    config: &EngineConfig,
) -> Option<EvolutionEngine> {
    if !path.exists() {
        log::info!("no snapshot at {}, starting fresh", path.display());
        return None;
    }
    match TrainingSnapshot::open(path).and_then(|s| s.into_engine(topology, config)) {
        Ok(engine) => {
            log::info!(
                "resuming at generation {} from {}",
                engine.generation(),
                path.display()
            );
            Some(engine)
        }
        Err(e) => {
            log::warn!("ignoring snapshot {}: {e:#}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{env, process};

    use neurosnake_training::random::RandomSource;

    use super::*;

    const TOPOLOGY: NetworkTopology = NetworkTopology::new(6, 4, 1, 2);

    fn config() -> EngineConfig {
        EngineConfig::new(6, TOPOLOGY.number_of_weights())
    }

    fn trained_engine() -> EvolutionEngine {
        let mut rng = RandomSource::seed_from_u64(5);
        let mut engine = EvolutionEngine::new(config(), &mut rng).unwrap();
        let mut population = engine.population().to_vec();
        for (i, genome) in population.iter_mut().enumerate() {
            genome.set_fitness(f64::from(u32::try_from(i).unwrap()));
        }
        engine.epoch(population, &mut rng).unwrap();
        engine
    }

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("neurosnake-{}-{name}.json", process::id()))
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(20, 2, 8), "20-pop-2x8.json");
    }

    #[test]
    fn test_staging_path() {
        assert_eq!(
            staging_path(Path::new("dir/20-pop-2x8.json")),
            Path::new("dir/20-pop-2x8.json.new")
        );
    }

    #[test]
    fn test_save_and_resume() {
        let engine = trained_engine();
        let path = temp_path("resume");
        TrainingSnapshot::capture(&engine, TOPOLOGY)
            .save(&path)
            .unwrap();
        assert!(!staging_path(&path).exists());

        let restored = load_engine(&path, TOPOLOGY, &config()).unwrap();
        assert_eq!(restored.generation(), engine.generation());
        assert_eq!(restored.population(), engine.population());
        assert_eq!(restored.stats(), engine.stats());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_snapshot_starts_fresh() {
        let path = temp_path("missing");
        assert!(load_engine(&path, TOPOLOGY, &config()).is_none());
    }

    #[test]
    fn test_corrupt_snapshot_starts_fresh() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_engine(&path, TOPOLOGY, &config()).is_none());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_mismatched_snapshot_is_rejected() {
        let snapshot = TrainingSnapshot::capture(&trained_engine(), TOPOLOGY);

        let other_topology = NetworkTopology::new(6, 4, 1, 3);
        assert!(snapshot.clone().into_engine(other_topology, &config()).is_err());

        let other_config = EngineConfig {
            mutation_rate: 0.5,
            ..config()
        };
        assert!(snapshot.clone().into_engine(TOPOLOGY, &other_config).is_err());

        let old_version = TrainingSnapshot {
            version: SNAPSHOT_VERSION + 1,
            ..snapshot.clone()
        };
        assert!(old_version.into_engine(TOPOLOGY, &config()).is_err());

        assert!(snapshot.into_engine(TOPOLOGY, &config()).is_ok());
    }

    #[test]
    fn test_snapshot_json_fields() {
        let snapshot = TrainingSnapshot::capture(&trained_engine(), TOPOLOGY);
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["generation"], 1);
        assert_eq!(value["population"].as_array().unwrap().len(), 6);
        assert_eq!(value["config"]["selection"], "Roulette");
    }
}
