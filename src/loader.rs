use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::obj::{ObjParser, ParseError, ParseOptions, ParseOutcome};

/// One-shot cancellation flag shared between a parse and its callers.
///
/// Cloning hands out another handle to the same flag. The parser polls it
/// once per input line, so a cancelled parse stops within one line of
/// input instead of blocking on adversarial or truncated streams.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Handle to a parse running on a worker thread.
pub struct LoadHandle {
    worker: JoinHandle<Result<ParseOutcome, ParseError>>,
    cancel: CancelToken,
}

impl LoadHandle {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Blocks until the worker finishes and hands over the full outcome
    /// atomically; there is no partial or streaming consumption.
    pub fn wait(self) -> Result<ParseOutcome, ParseError> {
        self.worker.join().expect("mesh loader thread panicked")
    }
}

/// Parses `path` on a dedicated worker thread so the caller's thread stays
/// free, mirroring how a viewer keeps its presentation loop responsive
/// while a model loads.
pub fn load_in_background(path: String, options: ParseOptions) -> LoadHandle {
    let parser = ObjParser::new(options);
    let cancel = parser.cancel_token();
    let worker = thread::spawn(move || {
        let start = Instant::now();
        let outcome = parser.parse_file(&path)?;
        log::debug!("loaded {path} in {} ms", start.elapsed().as_millis());
        Ok(outcome)
    });
    LoadHandle { worker, cancel }
}
