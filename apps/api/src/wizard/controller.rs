//! Step controller: the validation-gated index of a wizard.
//!
//! The index and the in-flight marker are atomics so a session can be shared
//! behind an `Arc` without holding a lock across the validation await. Only one
//! advance runs at a time per controller; an overlapping request (a double
//! click) is reported as `Ignored` and leaves the index alone.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::wizard::steps::{status_of, StepStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdvanceOutcome {
    /// Validation passed; `step` is the new index.
    Advanced { step: usize },
    /// Validation resolved false; index unchanged.
    Rejected { step: usize },
    /// Another advance was in flight, or the index moved underneath us.
    Ignored { step: usize },
}

#[derive(Debug)]
pub struct StepController {
    current: AtomicUsize,
    /// Number of steps. `current == total` means every step is done.
    total: usize,
    in_flight: AtomicBool,
}

/// Clears the in-flight marker on every exit path, including a dropped future.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl StepController {
    pub fn new(total: usize) -> Self {
        Self {
            current: AtomicUsize::new(0),
            total,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn current(&self) -> usize {
        self.current.load(Ordering::Acquire)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        self.current() >= self.total
    }

    /// Runs `validate` for the active step and moves forward one step only if
    /// it resolves `true`. The validator is handed the index it gates, read
    /// after the in-flight marker is taken; the advance lands only if the index
    /// is still that step afterwards. An `Err` from `validate` is returned
    /// unchanged and the index stays put.
    pub async fn advance<F, Fut, E>(&self, validate: F) -> Result<AdvanceOutcome, E>
    where
        F: FnOnce(usize) -> Fut,
        Fut: Future<Output = Result<bool, E>>,
        E: From<AppError>,
    {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Advance already in flight, ignoring request");
            return Ok(AdvanceOutcome::Ignored {
                step: self.current(),
            });
        }
        let _guard = InFlight(&self.in_flight);

        let step = self.current();
        if step >= self.total {
            return Err(AppError::StepOutOfRange(format!(
                "all {} steps are already completed",
                self.total
            ))
            .into());
        }

        if !validate(step).await? {
            return Ok(AdvanceOutcome::Rejected { step });
        }

        // A reset may have landed while validating; never clobber it.
        match self
            .current
            .compare_exchange(step, step + 1, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Ok(AdvanceOutcome::Advanced { step: step + 1 }),
            Err(now) => Ok(AdvanceOutcome::Ignored { step: now }),
        }
    }

    /// Undoes an advance that landed on `step`. A no-op returning `false` if
    /// the index has moved since.
    pub fn revert(&self, step: usize) -> bool {
        let Some(previous) = step.checked_sub(1) else {
            return false;
        };
        self.current
            .compare_exchange(step, previous, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Steps back once. Disabled on the first step.
    pub fn retreat(&self) -> Result<usize, AppError> {
        self.current
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |c| c.checked_sub(1))
            .map(|previous| previous - 1)
            .map_err(|_| AppError::StepOutOfRange("already on the first step".to_string()))
    }

    pub fn reset(&self) {
        self.current.store(0, Ordering::Release);
    }

    /// Status of every step against the current index, computed fresh.
    pub fn statuses(&self) -> Vec<StepStatus> {
        let current = self.current();
        (0..self.total).map(|i| status_of(i, current)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    async fn pass(_step: usize) -> Result<bool, AppError> {
        Ok(true)
    }

    async fn fail(_step: usize) -> Result<bool, AppError> {
        Ok(false)
    }

    #[tokio::test]
    async fn test_advance_only_on_true() {
        let controller = StepController::new(3);

        let outcome = controller.advance(fail).await.unwrap();
        assert_eq!(outcome, AdvanceOutcome::Rejected { step: 0 });
        assert_eq!(controller.current(), 0);

        let outcome = controller.advance(pass).await.unwrap();
        assert_eq!(outcome, AdvanceOutcome::Advanced { step: 1 });
        assert_eq!(controller.current(), 1);
    }

    #[tokio::test]
    async fn test_validation_error_leaves_index() {
        let controller = StepController::new(3);
        let result = controller
            .advance(|_| async { Err::<bool, _>(AppError::FieldValidation(vec![])) })
            .await;
        assert!(matches!(result, Err(AppError::FieldValidation(_))));
        assert_eq!(controller.current(), 0);
        // The in-flight marker was released.
        assert!(controller.advance(pass).await.is_ok());
        assert_eq!(controller.current(), 1);
    }

    #[tokio::test]
    async fn test_cannot_advance_past_completion() {
        let controller = StepController::new(1);
        controller.advance(pass).await.unwrap();
        assert!(controller.is_complete());

        let result = controller.advance(pass).await;
        assert!(matches!(result, Err(AppError::StepOutOfRange(_))));
        assert_eq!(controller.current(), 1);
    }

    #[tokio::test]
    async fn test_overlapping_advance_is_ignored() {
        let controller = StepController::new(6);
        let ctrl = &controller;
        let (tx, rx) = oneshot::channel::<()>();

        let first = ctrl.advance(|_| async move {
            rx.await.ok();
            Ok::<_, AppError>(true)
        });
        let second = async move {
            let outcome = ctrl.advance(pass).await;
            tx.send(()).ok();
            outcome
        };

        let (first, second) = tokio::join!(first, second);
        assert_eq!(first.unwrap(), AdvanceOutcome::Advanced { step: 1 });
        assert_eq!(second.unwrap(), AdvanceOutcome::Ignored { step: 0 });
        assert_eq!(controller.current(), 1);
    }

    #[tokio::test]
    async fn test_reset_during_validation_wins() {
        let controller = StepController::new(6);
        controller.advance(pass).await.unwrap();
        let ctrl = &controller;

        let outcome = ctrl
            .advance(|_| async move {
                ctrl.reset();
                Ok::<_, AppError>(true)
            })
            .await
            .unwrap();
        assert_eq!(outcome, AdvanceOutcome::Ignored { step: 0 });
        assert_eq!(controller.current(), 0);
    }

    #[tokio::test]
    async fn test_dropped_validation_releases_marker() {
        let controller = StepController::new(3);
        let stalled = controller.advance(|_| std::future::pending::<Result<bool, AppError>>());
        assert!(tokio::time::timeout(Duration::from_millis(10), stalled)
            .await
            .is_err());

        let outcome = controller.advance(pass).await.unwrap();
        assert_eq!(outcome, AdvanceOutcome::Advanced { step: 1 });
    }

    #[tokio::test]
    async fn test_validator_sees_gated_step() {
        let controller = StepController::new(4);
        controller.advance(pass).await.unwrap();
        controller.advance(pass).await.unwrap();

        let outcome = controller
            .advance(|step| async move { Ok::<_, AppError>(step == 2) })
            .await
            .unwrap();
        assert_eq!(outcome, AdvanceOutcome::Advanced { step: 3 });
    }

    #[tokio::test]
    async fn test_retreat_during_validation_wins() {
        let controller = StepController::new(6);
        controller.advance(pass).await.unwrap();
        controller.advance(pass).await.unwrap();
        let ctrl = &controller;

        let outcome = ctrl
            .advance(|_| async move {
                ctrl.retreat().unwrap();
                Ok::<_, AppError>(true)
            })
            .await
            .unwrap();
        assert_eq!(outcome, AdvanceOutcome::Ignored { step: 1 });
        assert_eq!(controller.current(), 1);
    }

    #[tokio::test]
    async fn test_revert_only_from_landed_step() {
        let controller = StepController::new(2);
        controller.advance(pass).await.unwrap();
        controller.advance(pass).await.unwrap();
        assert!(controller.revert(2));
        assert_eq!(controller.current(), 1);

        // Index moved since the advance: nothing to undo.
        controller.reset();
        assert!(!controller.revert(1));
        assert_eq!(controller.current(), 0);
        assert!(!controller.revert(0));
    }

    #[test]
    fn test_retreat_disabled_on_first_step() {
        let controller = StepController::new(3);
        assert!(matches!(
            controller.retreat(),
            Err(AppError::StepOutOfRange(_))
        ));
        assert_eq!(controller.current(), 0);
    }

    #[tokio::test]
    async fn test_retreat_and_statuses() {
        let controller = StepController::new(4);
        controller.advance(pass).await.unwrap();
        controller.advance(pass).await.unwrap();
        assert_eq!(
            controller.statuses(),
            vec![
                StepStatus::Done,
                StepStatus::Done,
                StepStatus::Active,
                StepStatus::Next
            ]
        );

        assert_eq!(controller.retreat().unwrap(), 1);
        assert_eq!(controller.statuses()[1], StepStatus::Active);
    }

    #[tokio::test]
    async fn test_reset_returns_to_start() {
        let controller = StepController::new(2);
        controller.advance(pass).await.unwrap();
        controller.advance(pass).await.unwrap();
        assert!(controller.is_complete());
        assert!(controller.statuses().iter().all(|s| *s == StepStatus::Done));

        controller.reset();
        assert_eq!(controller.current(), 0);
    }
}
