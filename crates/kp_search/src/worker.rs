//! Background execution of a search with progress streaming.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use kp_config::KpConfig;

use crate::ephemeris::Ephemeris;
use crate::error::SearchError;
use crate::pipeline::run_search;
use crate::progress::{CancelToken, ChannelSink, Progress};
use crate::search_types::{SearchReport, SearchRequest};

/// A search running on its own thread.
#[derive(Debug)]
pub struct SearchHandle {
    cancel: CancelToken,
    progress: Receiver<Progress>,
    thread: JoinHandle<Result<SearchReport, SearchError>>,
}

impl SearchHandle {
    /// Ask the worker to stop at its next step boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Progress samples sent so far or in the future.
    pub fn progress(&self) -> &Receiver<Progress> {
        &self.progress
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the final report.
    pub fn join(self) -> Result<SearchReport, SearchError> {
        self.thread.join().map_err(|_| SearchError::WorkerPanicked)?
    }
}

/// Start `request` on a dedicated thread.
pub fn spawn_search(
    ephemeris: Arc<dyn Ephemeris>,
    request: SearchRequest,
    config: KpConfig,
) -> Result<SearchHandle, SearchError> {
    let cancel = CancelToken::new();
    let (tx, rx) = mpsc::channel();
    let token = cancel.clone();
    let thread = thread::Builder::new()
        .name("kp-search".into())
        .spawn(move || {
            let mut sink = ChannelSink(tx);
            run_search(ephemeris.as_ref(), &request, &config, &token, &mut sink)
        })?;
    Ok(SearchHandle {
        cancel,
        progress: rx,
        thread,
    })
}
