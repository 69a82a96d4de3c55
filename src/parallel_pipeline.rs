// THEORY:
// Each analysis run is independent and side-effect-free on immutable inputs, so
// whole images can be processed in parallel with no shared mutable state. This
// module is the concurrency shell around the sequential `AnalysisPipeline`: a
// pool of worker tasks, each owning its own pipeline, fed round-robin by a
// dispatcher. Parallelism lives *across* images, never inside a run — every
// individual report stays bit-identical to what the sequential pipeline would
// produce, and `analyze_batch` returns results in submission order.

use futures::future::join_all;
use tokio::sync::{mpsc, oneshot};

use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::error::{AnalysisError, AnalysisResult};
use crate::pipeline::{AnalysisPipeline, AnalysisReport, ClassificationConfig};

/// Upper bound on worker tasks. Past this, dispatch overhead beats the gain
/// for typical image sizes.
const MAX_WORKER_POOL_SIZE: usize = 8;

/// One queued image together with the channel its report returns on.
struct ImageTask {
    buffer: PixelBuffer,
    result_sender: oneshot::Sender<AnalysisResult<AnalysisReport>>,
}

/// A worker pool that analyzes independent images concurrently.
pub struct ParallelPipeline {
    task_sender: mpsc::UnboundedSender<ImageTask>,
    workers: Vec<tokio::task::JoinHandle<()>>,
    worker_count: usize,
}

impl ParallelPipeline {
    /// Builds the pool, validating the config once up front. Pool size follows
    /// the machine's logical CPU count, capped at `MAX_WORKER_POOL_SIZE`.
    pub fn new(config: ClassificationConfig) -> AnalysisResult<Self> {
        let pipeline = AnalysisPipeline::new(config)?;
        let worker_count = num_cpus::get().clamp(1, MAX_WORKER_POOL_SIZE);

        let (task_sender, mut task_receiver) = mpsc::unbounded_channel::<ImageTask>();

        // A single dispatcher distributes tasks to workers round-robin.
        let (worker_senders, worker_receivers): (Vec<_>, Vec<_>) = (0..worker_count)
            .map(|_| mpsc::unbounded_channel::<ImageTask>())
            .unzip();

        tokio::spawn(async move {
            let mut worker_idx = 0;
            while let Some(task) = task_receiver.recv().await {
                let _ = worker_senders[worker_idx].send(task);
                worker_idx = (worker_idx + 1) % worker_senders.len();
            }
        });

        // Each worker owns its pipeline clone; runs share nothing mutable.
        let mut workers = Vec::with_capacity(worker_count);
        for mut worker_receiver in worker_receivers {
            let worker_pipeline = pipeline.clone();
            workers.push(tokio::spawn(async move {
                while let Some(task) = worker_receiver.recv().await {
                    let report = worker_pipeline.analyze(&task.buffer);
                    let _ = task.result_sender.send(report);
                }
            }));
        }

        Ok(Self {
            task_sender,
            workers,
            worker_count,
        })
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Queues one image and awaits its report.
    pub async fn analyze(&self, buffer: PixelBuffer) -> AnalysisResult<AnalysisReport> {
        let (result_sender, result_receiver) = oneshot::channel();
        let task = ImageTask {
            buffer,
            result_sender,
        };

        self.task_sender
            .send(task)
            .map_err(|_| AnalysisError::WorkerUnavailable)?;

        result_receiver
            .await
            .map_err(|_| AnalysisError::WorkerUnavailable)?
    }

    /// Analyzes a batch of independent images concurrently. Results come back
    /// in submission order, each one exactly what the sequential pipeline
    /// would have produced.
    pub async fn analyze_batch(
        &self,
        buffers: Vec<PixelBuffer>,
    ) -> Vec<AnalysisResult<AnalysisReport>> {
        join_all(buffers.into_iter().map(|buffer| self.analyze(buffer))).await
    }

    /// Stops accepting new work and lets in-flight tasks finish. Dropping the
    /// pool has the same effect; this makes it explicit.
    pub async fn shutdown(self) {
        drop(self.task_sender);
        for worker in self.workers {
            let _ = worker.await;
        }
    }
}
