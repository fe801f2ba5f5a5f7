//! Batch resizing of selected assets.
//!
//! A batch validates everything up front and then processes entries one by
//! one. A failing entry is recorded and skipped; entries already written stay
//! written.

use crate::error::{FileError, ResizeError, ValidationError};
use crate::report::BatchReport;
use crate::request::{Resampling, ResizeMode, ResizeRequest};
use crate::state::{WorkspaceState, lock_workspace};
use crate::{image_loader, image_writer};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A validated resize batch, ready to run.
#[derive(Debug, Clone)]
pub struct ResizeJob {
    directory: PathBuf,
    selection: Vec<String>,
    request: ResizeRequest,
    mode: ResizeMode,
}

fn validate_target(
    directory: Option<&Path>,
    selection: &[String],
    mode: &ResizeMode,
) -> Result<PathBuf, ValidationError> {
    if let ResizeMode::SaveAs(_) = mode {
        if selection.len() != 1 {
            return Err(ValidationError::SaveAsSelection {
                count: selection.len(),
            });
        }
    }
    if selection.is_empty() {
        return Err(ValidationError::EmptySelection);
    }
    directory
        .map(Path::to_path_buf)
        .ok_or(ValidationError::NoDirectory)
}

impl ResizeJob {
    /// Validates a batch without touching any file.
    pub fn new(
        directory: Option<&Path>,
        selection: Vec<String>,
        request: ResizeRequest,
        mode: ResizeMode,
    ) -> Result<Self, ValidationError> {
        let directory = validate_target(directory, &selection, &mode)?;
        Ok(Self {
            directory,
            selection,
            request,
            mode,
        })
    }

    /// Validates a batch from the raw width and height texts.
    ///
    /// Selection and directory are checked before the dimensions are parsed.
    pub fn from_input(
        directory: Option<&Path>,
        selection: Vec<String>,
        width: &str,
        height: &str,
        mode: ResizeMode,
    ) -> Result<Self, ValidationError> {
        let directory = validate_target(directory, &selection, &mode)?;
        let request = ResizeRequest::parse(width, height)?;
        Ok(Self {
            directory,
            selection,
            request,
            mode,
        })
    }

    pub fn with_resampling(mut self, resampling: Resampling) -> Self {
        self.request = self.request.with_resampling(resampling);
        self
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Processes every entry in selection order and aggregates the failures.
    pub fn run(&self) -> BatchReport {
        let mut report = BatchReport::default();
        for name in &self.selection {
            match self.process(name) {
                Ok(()) => report.record_success(name),
                Err(reason) => {
                    warn!("Could not resize {}: {}", name, reason);
                    report.record_failure(name, reason);
                }
            }
        }
        info!(
            "Resized {} of {} assets to {}x{}",
            report.resized.len(),
            self.selection.len(),
            self.request.width(),
            self.request.height()
        );
        report
    }

    fn process(&self, name: &str) -> Result<(), FileError> {
        let source = self.directory.join(name);
        let image = image_loader::decode(&source)?;
        debug!(
            "Resizing {} from {}x{}",
            name,
            image.width(),
            image.height()
        );
        let resized = image_writer::resize(image, &self.request)?;

        // The format always comes from the source name, also for save-as.
        let format = image_writer::format_for_name(name)?;
        let destination = match &self.mode {
            ResizeMode::Overwrite => source,
            ResizeMode::SaveAs(path) => path.clone(),
        };
        image_writer::write_image(&resized, format, &destination)
    }
}

/// Validates and runs a batch in one call.
///
/// `width` and `height` are the raw texts entered by the user. Any
/// validation failure is returned before a single file is read.
pub fn resize_batch(
    directory: Option<&Path>,
    selection: Vec<String>,
    width: &str,
    height: &str,
    mode: ResizeMode,
) -> Result<BatchReport, ValidationError> {
    Ok(ResizeJob::from_input(directory, selection, width, height, mode)?.run())
}

/// Clears the in-flight flag when dropped.
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs resize batches against the current workspace, at most one at a time.
#[derive(Clone)]
pub struct ResizeService {
    workspace: Arc<Mutex<WorkspaceState>>,
    in_flight: Arc<AtomicBool>,
}

impl ResizeService {
    pub fn new(workspace: Arc<Mutex<WorkspaceState>>) -> Self {
        Self {
            workspace,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Builds a job for `selection` in the directory that is current now.
    pub fn prepare(
        &self,
        selection: Vec<String>,
        width: &str,
        height: &str,
        mode: ResizeMode,
    ) -> Result<ResizeJob, ValidationError> {
        let directory = lock_workspace(&self.workspace)
            .current_directory()
            .map(Path::to_path_buf);
        ResizeJob::from_input(directory.as_deref(), selection, width, height, mode)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn acquire(&self) -> Result<InFlight, ResizeError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlight(self.in_flight.clone()))
            .map_err(|_| {
                warn!("Resize requested while another batch is running");
                ResizeError::Busy
            })
    }

    /// Runs `job` on the calling thread.
    pub fn run(&self, job: ResizeJob) -> Result<BatchReport, ResizeError> {
        let _guard = self.acquire()?;
        Ok(job.run())
    }

    /// Runs `job` on a worker thread and hands the report to `on_complete`.
    ///
    /// The batch counts as finished before `on_complete` is called, so the
    /// callback may submit the next batch.
    pub fn submit<F>(&self, job: ResizeJob, on_complete: F) -> Result<(), ResizeError>
    where
        F: FnOnce(BatchReport) + Send + 'static,
    {
        let guard = self.acquire()?;
        rayon::spawn(move || {
            let report = job.run();
            drop(guard);
            on_complete(report);
        });
        Ok(())
    }
}
