//! Batch draw simulation.
//!
//! Runs many independent draws over the same field and tallies where each
//! team lands, for estimating group-composition odds. Records every run,
//! including deadlocks, and can export them as JSONL for external tooling.

use std::collections::BTreeMap;
use std::io::Write;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::draw::{DrawEngine, DrawError, DrawRules};
use crate::field::{Confederation, GroupId, HostSeat, PotSet, GROUP_COUNT, TEAM_COUNT};

/// Configuration for batch simulation.
#[derive(Clone)]
pub struct SimulationConfig {
    /// Number of draws to run.
    pub runs: usize,
    /// Number of parallel threads for concurrent draws.
    pub threads: usize,
    /// Base random seed (0 = use entropy). Run `i` draws with seed
    /// `seed.wrapping_add(i)`, so results do not depend on thread count.
    pub seed: u64,
    /// Suppress per-run progress output.
    pub quiet: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            runs: 100,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// One committed seat in a recorded draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementRecord {
    pub team: String,
    pub confederation: Confederation,
    pub group: GroupId,
    pub slot: u8,
    pub pot: u8,
}

/// A single recorded draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawRecord {
    /// Sequential run ID.
    pub run_id: usize,
    /// All 48 placements in draw order; empty if the run failed.
    pub placements: Vec<PlacementRecord>,
    /// Deadlock description, if the run failed.
    pub failure: Option<String>,
}

impl DrawRecord {
    pub fn completed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Aggregated outcome counts over a batch of draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub runs: usize,
    pub completed: usize,
    pub deadlocks: usize,
    /// Per team code, how often it landed in each group (index = group).
    counts: BTreeMap<String, [u32; GROUP_COUNT]>,
}

impl SimulationReport {
    fn new() -> SimulationReport {
        SimulationReport {
            runs: 0,
            completed: 0,
            deadlocks: 0,
            counts: BTreeMap::new(),
        }
    }

    /// Folds one record into the tallies. Failed runs count toward
    /// `deadlocks` and contribute no placements.
    fn absorb(&mut self, record: &DrawRecord) {
        self.runs += 1;
        if !record.completed() {
            self.deadlocks += 1;
            return;
        }
        self.completed += 1;
        for p in &record.placements {
            self.counts.entry(p.team.clone()).or_insert([0; GROUP_COUNT])
                [p.group as usize] += 1;
        }
    }

    /// How often the team landed in the group across the batch.
    pub fn group_count(&self, code: &str, group: GroupId) -> u32 {
        self.counts
            .get(code)
            .map(|row| row[group as usize])
            .unwrap_or(0)
    }

    /// Per-team landing counts, keyed by team code.
    pub fn frequencies(&self) -> &BTreeMap<String, [u32; GROUP_COUNT]> {
        &self.counts
    }
}

/// Runs a batch of draws and returns the aggregated report.
pub fn simulate(
    pots: &PotSet,
    hosts: &[HostSeat],
    rules: &DrawRules,
    config: &SimulationConfig,
) -> Result<SimulationReport, DrawError> {
    let mut report = SimulationReport::new();
    run_draws_with_callback(pots, hosts, rules, config, |record| {
        report.absorb(&record);
    })?;
    Ok(report)
}

/// Runs a batch of draws, returning every record in run order.
pub fn run_draws(
    pots: &PotSet,
    hosts: &[HostSeat],
    rules: &DrawRules,
    config: &SimulationConfig,
) -> Result<Vec<DrawRecord>, DrawError> {
    let mut records = Vec::with_capacity(config.runs);
    run_draws_with_callback(pots, hosts, rules, config, |record| {
        records.push(record);
    })?;
    records.sort_by_key(|r| r.run_id);
    Ok(records)
}

/// Runs a batch of draws, calling `on_record` with each completed record.
///
/// Field and rule problems surface once, before any draw runs; per-run
/// deadlocks are reported inside the records. Record delivery order is
/// unspecified when `config.threads > 1`.
pub fn run_draws_with_callback<F>(
    pots: &PotSet,
    hosts: &[HostSeat],
    rules: &DrawRules,
    config: &SimulationConfig,
    on_record: F,
) -> Result<(), DrawError>
where
    F: FnMut(DrawRecord) + Send,
{
    // Validate up front so a malformed field fails fast instead of once per run.
    DrawEngine::new(
        pots.clone(),
        hosts.to_vec(),
        *rules,
        SmallRng::seed_from_u64(0),
    )?;

    if config.threads > 1 {
        run_parallel(pots, hosts, rules, config, on_record);
    } else {
        run_sequential(pots, hosts, rules, config, on_record);
    }
    Ok(())
}

/// Plays one draw and records its outcome.
fn play_draw(
    pots: PotSet,
    hosts: Vec<HostSeat>,
    rules: DrawRules,
    run_id: usize,
    rng: SmallRng,
) -> DrawRecord {
    let engine = match DrawEngine::new(pots, hosts, rules, rng) {
        Ok(engine) => engine,
        Err(e) => {
            return DrawRecord {
                run_id,
                placements: Vec::new(),
                failure: Some(e.to_string()),
            }
        }
    };

    let mut placements = Vec::with_capacity(TEAM_COUNT);
    let mut failure = None;
    for step in engine.events() {
        match step {
            Ok(event) => placements.push(PlacementRecord {
                team: event.team.code.clone(),
                confederation: event.team.confederation,
                group: event.group,
                slot: event.slot,
                pot: event.pot,
            }),
            Err(e) => {
                placements.clear();
                failure = Some(e.to_string());
                break;
            }
        }
    }
    DrawRecord {
        run_id,
        placements,
        failure,
    }
}

/// Per-run generator: derived from the base seed, or entropy when unseeded.
fn run_rng(config: &SimulationConfig, run_id: usize) -> SmallRng {
    if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(run_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Sequential batch: one draw at a time.
fn run_sequential<F>(
    pots: &PotSet,
    hosts: &[HostSeat],
    rules: &DrawRules,
    config: &SimulationConfig,
    mut on_record: F,
) where
    F: FnMut(DrawRecord),
{
    for i in 0..config.runs {
        let record = play_draw(pots.clone(), hosts.to_vec(), *rules, i, run_rng(config, i));
        if !config.quiet {
            report_progress(&record, config.runs);
        }
        on_record(record);
    }
}

/// Parallel batch: draws run concurrently on a rayon pool, with a channel
/// delivering records to the callback on the calling thread.
fn run_parallel<F>(
    pots: &PotSet,
    hosts: &[HostSeat],
    rules: &DrawRules,
    config: &SimulationConfig,
    mut on_record: F,
) where
    F: FnMut(DrawRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let (tx, rx) = mpsc::channel::<DrawRecord>();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .expect("failed to build rayon thread pool");

    let pots = pots.clone();
    let hosts = hosts.to_vec();
    let rules = *rules;
    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        pool.install(|| {
            (0..config_clone.runs)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let record = play_draw(
                        pots.clone(),
                        hosts.clone(),
                        rules,
                        i,
                        run_rng(&config_clone, i),
                    );
                    if !config_clone.quiet {
                        report_progress(&record, config_clone.runs);
                    }
                    let _ = tx.send(record);
                });
        });
    });

    for record in rx {
        on_record(record);
    }

    handle.join().expect("simulation worker thread panicked");
}

/// One stderr line per finished run.
fn report_progress(record: &DrawRecord, runs: usize) {
    match &record.failure {
        None => eprintln!("Draw {}/{}: completed", record.run_id + 1, runs),
        Some(reason) => eprintln!("Draw {}/{}: {}", record.run_id + 1, runs, reason),
    }
}

/// Writes draw records as JSONL (one JSON object per line).
pub fn write_jsonl<W: Write>(records: &[DrawRecord], out: &mut W) -> std::io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    out.flush()
}
