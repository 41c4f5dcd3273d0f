//! Background commit worker
//!
//! Document writes are handed to a worker thread so the UI thread never
//! blocks on disk. Completions are collected by polling, the same way the
//! file watcher reports its events.

use crate::error::{Error, Result};
use log::{debug, warn};
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A write waiting for the worker.
#[derive(Debug)]
struct CommitJob {
    path: PathBuf,
    contents: String,
}

/// Result of one commit.
#[derive(Debug)]
pub struct CommitCompletion {
    pub path: PathBuf,
    /// The exact text that was written (or failed to be)
    pub contents: String,
    pub result: Result<()>,
}

/// Owns the writer thread and the channels to and from it.
#[derive(Debug)]
pub struct CommitWorker {
    sender: Option<Sender<CommitJob>>,
    receiver: Receiver<CommitCompletion>,
    handle: Option<JoinHandle<()>>,
    /// Jobs submitted but not yet polled back
    pending: usize,
}

impl Default for CommitWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitWorker {
    /// Start the writer thread.
    pub fn new() -> Self {
        let (job_tx, job_rx) = channel::<CommitJob>();
        let (done_tx, done_rx) = channel();

        let handle = thread::spawn(move || {
            // Exits once every sender is dropped
            for job in job_rx {
                let result = write_document(&job);
                if done_tx
                    .send(CommitCompletion {
                        path: job.path,
                        contents: job.contents,
                        result,
                    })
                    .is_err()
                {
                    break;
                }
            }
        });

        Self {
            sender: Some(job_tx),
            receiver: done_rx,
            handle: Some(handle),
            pending: 0,
        }
    }

    /// Queue a write. Returns immediately.
    pub fn submit(&mut self, path: PathBuf, contents: String) {
        let Some(sender) = &self.sender else {
            return;
        };
        debug!("Queueing commit of {}", path.display());
        match sender.send(CommitJob { path, contents }) {
            Ok(()) => self.pending += 1,
            Err(err) => warn!("Commit worker is gone, dropping write: {}", err.0.path.display()),
        }
    }

    /// Number of commits that have not been polled back yet.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Collect finished commits without blocking.
    pub fn poll(&mut self) -> Vec<CommitCompletion> {
        let mut done = Vec::new();
        while let Ok(completion) = self.receiver.try_recv() {
            done.push(completion);
        }
        self.pending = self.pending.saturating_sub(done.len());
        done
    }

    /// Block until every pending commit finished or `timeout` elapsed.
    pub fn wait(&mut self, timeout: Duration) -> Vec<CommitCompletion> {
        let deadline = Instant::now() + timeout;
        let mut done = Vec::new();
        while self.pending > done.len() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(completion) => done.push(completion),
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        self.pending = self.pending.saturating_sub(done.len());
        done
    }
}

impl Drop for CommitWorker {
    fn drop(&mut self) {
        // Closing the job channel lets the thread drain queued writes and exit
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Commit worker thread panicked");
            }
        }
    }
}

fn write_document(job: &CommitJob) -> Result<()> {
    fs::write(&job.path, &job.contents).map_err(|e| Error::FileWrite {
        path: job.path.clone(),
        source: e,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
