use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::mpsc::{self, Receiver, TryRecvError};

use crate::foundation::error::{MockupError, MockupResult};
use crate::raster::encode::EncodedImage;

/// Handle to a generation running on the rayon pool.
///
/// Dropping the handle abandons the result; the worker finishes and discards it.
#[derive(Debug)]
pub struct GenerationTask {
    rx: Receiver<MockupResult<EncodedImage>>,
    taken: bool,
}

impl GenerationTask {
    pub(crate) fn spawn<J>(job: J) -> Self
    where
        J: FnOnce() -> MockupResult<EncodedImage> + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(1);
        rayon::spawn(move || {
            let result = catch_unwind(AssertUnwindSafe(job)).unwrap_or_else(|_| {
                Err(MockupError::resource("generation worker panicked"))
            });
            // The receiver may already be gone; that is how callers cancel.
            let _ = tx.send(result);
        });
        Self { rx, taken: false }
    }

    /// Block until the generation finishes.
    pub fn wait(self) -> MockupResult<EncodedImage> {
        if self.taken {
            return Err(MockupError::resource("generation result was already taken"));
        }
        self.rx
            .recv()
            .map_err(|_| MockupError::resource("generation worker exited without a result"))?
    }

    /// Result if finished, `None` while still running. Yields `Some` at most once.
    pub fn try_take(&mut self) -> Option<MockupResult<EncodedImage>> {
        if self.taken {
            return None;
        }
        let out = match self.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(MockupError::resource(
                "generation worker exited without a result",
            )),
        };
        self.taken = true;
        Some(out)
    }

    /// True once [`GenerationTask::try_take`] has handed out the result.
    pub fn is_taken(&self) -> bool {
        self.taken
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mockup/task.rs"]
mod tests;
