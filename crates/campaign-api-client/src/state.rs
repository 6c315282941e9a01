use campaign_core::{AlreadyPending, SubmissionOutcome};
use tokio::sync::watch;

/// Current outcome of one orchestrator, observable through a `watch` channel.
#[derive(Debug)]
pub(crate) struct OutcomeCell<T> {
    tx: watch::Sender<SubmissionOutcome<T>>,
}

impl<T: Clone> OutcomeCell<T> {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(SubmissionOutcome::Idle);
        Self { tx }
    }

    pub(crate) fn get(&self) -> SubmissionOutcome<T> {
        self.tx.borrow().clone()
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.tx.borrow().is_pending()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<SubmissionOutcome<T>> {
        self.tx.subscribe()
    }

    /// Replace the outcome without going through `Pending`.
    pub(crate) fn set(&self, outcome: SubmissionOutcome<T>) {
        self.tx.send_replace(outcome);
    }

    pub(crate) fn acknowledge(&self) -> bool {
        self.tx.send_if_modified(|outcome| outcome.acknowledge())
    }

    /// Move to `Pending`. The returned guard must be completed with the
    /// final outcome; if it is dropped first the cell falls back to `Idle`.
    pub(crate) fn begin(&self) -> Result<PendingGuard<'_, T>, AlreadyPending> {
        let mut transition = Ok(());
        self.tx.send_if_modified(|outcome| {
            transition = outcome.begin();
            transition.is_ok()
        });
        transition?;
        Ok(PendingGuard {
            tx: &self.tx,
            armed: true,
        })
    }
}

pub(crate) struct PendingGuard<'a, T> {
    tx: &'a watch::Sender<SubmissionOutcome<T>>,
    armed: bool,
}

impl<T> PendingGuard<'_, T> {
    pub(crate) fn complete(mut self, outcome: SubmissionOutcome<T>) {
        self.armed = false;
        self.tx.send_replace(outcome);
    }
}

impl<T> Drop for PendingGuard<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!("Submission dropped before completion");
            self.tx.send_if_modified(|outcome| {
                if outcome.is_pending() {
                    *outcome = SubmissionOutcome::Idle;
                    true
                } else {
                    false
                }
            });
        }
    }
}
