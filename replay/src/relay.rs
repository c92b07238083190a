//! 跨线程中继。
//!
//! 生产者线程把 tick 推入有界通道；消费者线程独占 `Pipeline`，把每根砖的输出推入
//! 第二条有界通道供读取端消费。流水线本身不加锁，单写者由线程归属保证。

use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver};
use renkoflow::{IngestError, Pipeline, PipelineOutput, Tick};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayConfig {
    /// Capacity of the producer -> pipeline channel.
    pub tick_capacity: usize,
    /// Capacity of the pipeline -> reader channel.
    pub output_capacity: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            tick_capacity: 1024,
            output_capacity: 1024,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error("{0} thread panicked")]
    WorkerPanicked(&'static str),
}

pub struct RelayHandle {
    outputs: Receiver<PipelineOutput>,
    producer: JoinHandle<usize>,
    consumer: JoinHandle<Result<Pipeline, IngestError>>,
}

impl RelayHandle {
    pub fn outputs(&self) -> &Receiver<PipelineOutput> {
        &self.outputs
    }

    /// Waits for both workers and hands the pipeline back.
    pub fn join(self) -> Result<Pipeline, RelayError> {
        drop(self.outputs);
        let sent = self
            .producer
            .join()
            .map_err(|_| RelayError::WorkerPanicked("producer"))?;
        let pipeline = self
            .consumer
            .join()
            .map_err(|_| RelayError::WorkerPanicked("consumer"))??;
        debug!(sent, bricks = pipeline.brick_count(), "relay finished");
        Ok(pipeline)
    }
}

pub fn spawn_relay<I>(mut pipeline: Pipeline, ticks: I, config: RelayConfig) -> RelayHandle
where
    I: IntoIterator<Item = Tick> + Send + 'static,
{
    let (tick_tx, tick_rx) = channel::bounded::<Tick>(config.tick_capacity.max(1));
    let (out_tx, out_rx) = channel::bounded::<PipelineOutput>(config.output_capacity.max(1));

    let producer = thread::spawn(move || {
        let mut sent = 0usize;
        for tick in ticks {
            if tick_tx.send(tick).is_err() {
                break;
            }
            sent += 1;
        }
        sent
    });

    let consumer = thread::spawn(move || -> Result<Pipeline, IngestError> {
        for tick in tick_rx.iter() {
            let outputs = pipeline.ingest(&tick).inspect_err(|error| {
                warn!(%error, "relay stopped on rejected tick");
            })?;
            for output in outputs {
                // a departed reader does not stop ingestion
                let _ = out_tx.send(output);
            }
        }
        Ok(pipeline)
    });

    RelayHandle {
        outputs: out_rx,
        producer,
        consumer,
    }
}

/// Runs a relay to completion and collects every output in order.
pub fn run_relay(
    pipeline: Pipeline,
    ticks: Vec<Tick>,
    config: RelayConfig,
) -> Result<(Pipeline, Vec<PipelineOutput>), RelayError> {
    let handle = spawn_relay(pipeline, ticks, config);
    let outputs: Vec<PipelineOutput> = handle.outputs().iter().collect();
    let pipeline = handle.join()?;
    Ok((pipeline, outputs))
}
