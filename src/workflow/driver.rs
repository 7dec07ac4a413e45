// src/workflow/driver.rs

//! Iteration driver: MAPPING -> POLISHING -> CHECK, repeated `max_iter`
//! times.
//!
//! There is no convergence detection; the loop ends purely on the iteration
//! count. A polished assembly missing at CHECK aborts the run with
//! [`PolishError::MissingOutput`] and no further iterations.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::anyhow;
use tracing::{debug, error, info};

use crate::errors::{PolishError, Result};
use crate::exec::{Executor, ExecutorBackend};
use crate::fs::{FileSystem, absolutize};
use crate::types::Minimap2Setting;
use crate::workflow::mapping::{Alignment, map_reads};
use crate::workflow::polish::polish_assembly;
use crate::workflow::OutputNaming;

/// Driver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Init,
    Mapping,
    Polishing,
    Check,
    Terminated,
}

/// Inputs of one polishing run.
#[derive(Debug, Clone)]
pub struct PolishPlan {
    pub contigs: PathBuf,
    pub reads: Vec<PathBuf>,
    pub out_dir: PathBuf,
    pub prefix: String,
    pub max_iter: usize,
    pub ram_gb: u32,
    pub mapping_setting: Minimap2Setting,
}

/// Mutable loop state, owned by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationState {
    /// Number of completed polishing rounds; also the index of the next one.
    pub iteration: usize,
    /// Assembly the next mapping runs against.
    pub contigs: PathBuf,
    pub alignment: Option<Alignment>,
    /// Assembly produced by the last polishing round, awaiting CHECK.
    pub polished: Option<PathBuf>,
}

impl IterationState {
    fn new(contigs: PathBuf) -> Self {
        Self {
            iteration: 0,
            contigs,
            alignment: None,
            polished: None,
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSummary {
    pub iterations: usize,
    /// Polished assemblies in iteration order.
    pub assemblies: Vec<PathBuf>,
}

impl WorkflowSummary {
    pub fn final_assembly(&self) -> Option<&PathBuf> {
        self.assemblies.last()
    }
}

pub struct PolishWorkflow<B: ExecutorBackend> {
    plan: PolishPlan,
    naming: OutputNaming,
    reads: Vec<PathBuf>,
    executor: Executor<B>,
    fs: Arc<dyn FileSystem>,
    state: DriverState,
    current: IterationState,
    assemblies: Vec<PathBuf>,
}

impl<B: ExecutorBackend> PolishWorkflow<B> {
    pub fn new(plan: PolishPlan, executor: Executor<B>, fs: Arc<dyn FileSystem>) -> Result<Self> {
        if plan.max_iter == 0 {
            return Err(PolishError::ConfigError(
                "max_iter must be >= 1 (got 0)".to_string(),
            ));
        }
        if plan.reads.is_empty() {
            return Err(PolishError::ConfigError(
                "at least one short-read file is required for polishing".to_string(),
            ));
        }

        let naming = OutputNaming::new(&plan.out_dir, plan.prefix.clone())?;
        let reads = plan
            .reads
            .iter()
            .map(absolutize)
            .collect::<Result<Vec<_>>>()?;
        let contigs = absolutize(&plan.contigs)?;

        Ok(Self {
            plan,
            naming,
            reads,
            executor,
            fs,
            state: DriverState::Init,
            current: IterationState::new(contigs),
            assemblies: Vec::new(),
        })
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn current(&self) -> &IterationState {
        &self.current
    }

    pub fn executor(&self) -> &Executor<B> {
        &self.executor
    }

    /// Drive the state machine until TERMINATED.
    pub async fn run(&mut self) -> Result<WorkflowSummary> {
        while self.state != DriverState::Terminated {
            self.step().await?;
        }

        info!(
            iterations = self.current.iteration,
            final_assembly = ?self.assemblies.last(),
            "polishing finished"
        );

        Ok(WorkflowSummary {
            iterations: self.current.iteration,
            assemblies: self.assemblies.clone(),
        })
    }

    /// Perform one transition and return the new state.
    pub async fn step(&mut self) -> Result<DriverState> {
        let next = match self.state {
            DriverState::Init => {
                self.current = IterationState::new(absolutize(&self.plan.contigs)?);
                self.assemblies.clear();
                DriverState::Mapping
            }

            DriverState::Mapping => {
                let alignment = map_reads(
                    &mut self.executor,
                    &self.naming,
                    self.plan.mapping_setting,
                    &self.current.contigs,
                    &self.reads,
                    self.current.iteration,
                )
                .await?;
                self.current.alignment = Some(alignment);
                DriverState::Polishing
            }

            DriverState::Polishing => {
                let Some(alignment) = self.current.alignment.take() else {
                    return Err(PolishError::Other(anyhow!(
                        "polishing iteration {} started without an alignment",
                        self.current.iteration
                    )));
                };
                let assembly = polish_assembly(
                    &mut self.executor,
                    self.fs.as_ref(),
                    &self.current.contigs,
                    &alignment.bam,
                    &self.naming.stem(self.current.iteration),
                    self.naming.out_dir(),
                    self.plan.ram_gb,
                )
                .await?;
                self.current.polished = Some(assembly);
                self.current.iteration += 1;
                DriverState::Check
            }

            DriverState::Check => {
                let Some(assembly) = self.current.polished.take() else {
                    return Err(PolishError::Other(anyhow!(
                        "no polished assembly recorded for iteration {}",
                        self.current.iteration
                    )));
                };
                if !self.fs.is_file(&assembly) {
                    error!(assembly = ?assembly, "polished assembly does not exist");
                    return Err(PolishError::MissingOutput(assembly));
                }
                info!(
                    iteration = self.current.iteration,
                    assembly = ?assembly,
                    "polished assembly exists"
                );
                self.current.contigs = assembly.clone();
                self.assemblies.push(assembly);

                if self.current.iteration < self.plan.max_iter {
                    DriverState::Mapping
                } else {
                    DriverState::Terminated
                }
            }

            DriverState::Terminated => DriverState::Terminated,
        };

        debug!(from = ?self.state, to = ?next, iteration = self.current.iteration, "driver transition");
        self.state = next;
        Ok(next)
    }
}
