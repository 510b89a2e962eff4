//! Fork-join distribution of fractal requests over a long-lived worker pool.
//!
//! A request's rows are split into bands (see [`partition`]); every band is
//! one task writing into its own disjoint slice of the output buffer, so no
//! locking is involved. The pool outlives requests and is reused by all of
//! them until [`Scheduler::shutdown`].

use std::{
    any::Any,
    ops::Range,
    panic::{self, AssertUnwindSafe},
};

use anyhow::Context;

use crate::{Error, FractalImage, NewtonFractal, Result, Viewport};

mod cancel;
pub use cancel::CancellationToken;
mod partition;
pub use partition::partition;

/// What to do with a band whose task failed or panicked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and leave the band's rows at 0 ("no root"). The
    /// request still succeeds.
    #[default]
    SwallowAndDefault,

    /// Fail the whole request with [`Error::WorkerFailure`].
    Propagate,
}

/// Configures and starts a [`Scheduler`].
#[derive(Clone, Debug)]
pub struct SchedulerBuilder {
    threads: Option<usize>,
    bands_per_thread: usize,
    failure_policy: FailurePolicy,
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self {
            threads: None,
            bands_per_thread: 8,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl SchedulerBuilder {
    /// Number of worker threads. Defaults to the number of logical CPUs.
    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Bands per request are `threads * bands_per_thread`.
    #[must_use]
    pub const fn with_bands_per_thread(mut self, bands_per_thread: usize) -> Self {
        self.bands_per_thread = bands_per_thread;
        self
    }

    #[must_use]
    pub const fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Start the worker pool.
    ///
    /// # Errors
    /// - [`Error::InvalidArgument`] if the thread or band count is zero
    /// - [`Error::Other`] if the operating system refuses to spawn threads
    pub fn build(self) -> Result<Scheduler> {
        let threads = self.threads.unwrap_or_else(num_cpus::get);
        if threads == 0 {
            return Err(Error::invalid("a scheduler needs at least one thread"));
        }
        if self.bands_per_thread == 0 {
            return Err(Error::invalid("bands_per_thread must be at least 1"));
        }
        let bands = threads
            .checked_mul(self.bands_per_thread)
            .ok_or_else(|| Error::invalid("band count overflows"))?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("newton-worker-{i}"))
            .build()
            .context("could not start worker pool")?;
        log::info!(
            "started worker pool {{threads: {threads}, bands: {bands}, policy: {:?}}}",
            self.failure_policy
        );

        Ok(Scheduler {
            pool,
            threads,
            bands,
            failure_policy: self.failure_policy,
        })
    }
}

enum BandOutcome {
    Done,
    Cancelled,
    Failed(String),
}

/// Owns the worker pool and fans requests out over it.
#[derive(Debug)]
pub struct Scheduler {
    pool: rayon::ThreadPool,
    threads: usize,
    bands: usize,
    failure_policy: FailurePolicy,
}

impl Scheduler {
    #[must_use]
    pub fn builder() -> SchedulerBuilder {
        SchedulerBuilder::default()
    }

    /// A scheduler with the default configuration.
    ///
    /// # Errors
    /// See [`SchedulerBuilder::build`].
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    #[must_use]
    pub const fn threads(&self) -> usize {
        self.threads
    }

    /// Number of bands each request is split into.
    #[must_use]
    pub const fn bands(&self) -> usize {
        self.bands
    }

    #[must_use]
    pub const fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Classify every pixel of `viewport`.
    ///
    /// The result does not depend on the number of threads or bands.
    ///
    /// # Errors
    /// [`Error::WorkerFailure`] if a band fails under
    /// [`FailurePolicy::Propagate`].
    pub fn produce(&self, fractal: &NewtonFractal, viewport: &Viewport) -> Result<FractalImage> {
        self.produce_inner(fractal, viewport, None)
    }

    /// Like [`Scheduler::produce`], but gives up once `token` is cancelled.
    ///
    /// # Errors
    /// [`Error::Cancelled`] if the token was cancelled before every band
    /// finished, plus the errors of [`Scheduler::produce`].
    pub fn produce_with_cancel(
        &self,
        fractal: &NewtonFractal,
        viewport: &Viewport,
        token: &CancellationToken,
    ) -> Result<FractalImage> {
        self.produce_inner(fractal, viewport, Some(token))
    }

    fn produce_inner(
        &self,
        fractal: &NewtonFractal,
        viewport: &Viewport,
        token: Option<&CancellationToken>,
    ) -> Result<FractalImage> {
        log::debug!(
            "producing request {} {{size: {}x{}}}",
            viewport.request_id(),
            viewport.width(),
            viewport.height()
        );
        let mut indices = vec![0; viewport.len()];
        self.run_bands(
            viewport.request_id(),
            &mut indices,
            viewport.width(),
            token,
            |y, row| {
                fractal.render_row(viewport, y, row);
                Ok(())
            },
        )?;
        Ok(fractal.image(viewport, indices))
    }

    /// Run `row_fn` over every row of `buffer` (rows of `width` cells),
    /// one task per band, and wait for all of them.
    ///
    /// `row_fn` receives the row number and the row's cells. An error or a
    /// panic inside `row_fn` fails the band it happened in and is handled
    /// according to the scheduler's [`FailurePolicy`]; a failed band's rows
    /// are reset to 0.
    ///
    /// # Errors
    /// - [`Error::InvalidArgument`] if `buffer` is not a whole number of rows
    /// - [`Error::Cancelled`] if `token` was cancelled
    /// - [`Error::WorkerFailure`] under [`FailurePolicy::Propagate`]
    pub fn run_bands<F>(
        &self,
        request_id: u64,
        buffer: &mut [u16],
        width: usize,
        token: Option<&CancellationToken>,
        row_fn: F,
    ) -> Result<()>
    where
        F: Fn(usize, &mut [u16]) -> Result<()> + Sync,
    {
        if width == 0 || buffer.len() % width != 0 {
            return Err(Error::invalid(format!(
                "buffer of {} cells is not a whole number of rows of width {width}",
                buffer.len()
            )));
        }
        let height = buffer.len() / width;
        let ranges = partition(height, self.bands)?;
        let mut outcomes: Vec<BandOutcome> = ranges.iter().map(|_| BandOutcome::Done).collect();

        self.pool.scope(|scope| {
            let row_fn = &row_fn;
            let mut rest: &mut [u16] = &mut *buffer;
            for ((band, rows), outcome) in ranges.iter().enumerate().zip(outcomes.iter_mut()) {
                let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(rows.len() * width);
                rest = tail;
                if rows.is_empty() {
                    continue;
                }
                let rows = rows.clone();
                scope.spawn(move |_| {
                    *outcome = run_band(rows, chunk, width, token, row_fn);
                    log::trace!("band {band} finished");
                });
            }
        });

        if token.is_some_and(CancellationToken::is_cancelled)
            || outcomes.iter().any(|o| matches!(o, BandOutcome::Cancelled))
        {
            log::debug!("request {request_id} cancelled");
            return Err(Error::Cancelled { request_id });
        }

        for (band, (rows, outcome)) in ranges.into_iter().zip(outcomes).enumerate() {
            let BandOutcome::Failed(reason) = outcome else {
                continue;
            };
            match self.failure_policy {
                FailurePolicy::Propagate => {
                    return Err(Error::WorkerFailure { band, rows, reason });
                }
                FailurePolicy::SwallowAndDefault => {
                    log::warn!(
                        "request {request_id}: band {band} (rows {rows:?}) failed, leaving it empty: {reason}"
                    );
                    buffer[rows.start * width..rows.end * width].fill(0);
                }
            }
        }
        log::debug!("request {request_id} complete");
        Ok(())
    }

    /// Stop the worker pool. Requests must not be in flight; this is
    /// enforced by taking `self` by value.
    pub fn shutdown(self) {
        log::info!("shutting down worker pool {{threads: {}}}", self.threads);
        drop(self.pool);
    }
}

fn run_band<F>(
    rows: Range<usize>,
    chunk: &mut [u16],
    width: usize,
    token: Option<&CancellationToken>,
    row_fn: &F,
) -> BandOutcome
where
    F: Fn(usize, &mut [u16]) -> Result<()>,
{
    let result = panic::catch_unwind(AssertUnwindSafe(|| -> Result<BandOutcome> {
        for (y, row) in rows.zip(chunk.chunks_mut(width)) {
            if token.is_some_and(CancellationToken::is_cancelled) {
                return Ok(BandOutcome::Cancelled);
            }
            row_fn(y, row)?;
        }
        Ok(BandOutcome::Done)
    }));
    match result {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => BandOutcome::Failed(e.to_string()),
        Err(payload) => BandOutcome::Failed(format!("panicked: {}", panic_message(&*payload))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic payload"
    }
}
