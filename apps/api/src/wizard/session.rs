use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::form::FormState;
use crate::models::output::NormalizedOutput;
use crate::schema::{FieldError, FormSchema};
use crate::submission::{transform, SubmissionSink};
use crate::wizard::controller::{AdvanceOutcome, StepController};
use crate::wizard::steps::{resume_steps, Step, StepStatus};

/// One resume wizard in progress.
///
/// The locks are never held across the validation await; concurrent advance
/// requests are arbitrated by the controller alone.
pub struct WizardSession {
    pub id: Uuid,
    schema: Arc<FormSchema>,
    steps: Vec<Step>,
    controller: StepController,
    form: RwLock<FormState>,
    errors: RwLock<Vec<FieldError>>,
    output: RwLock<Option<NormalizedOutput>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub index: usize,
    pub title: &'static str,
    pub status: StepStatus,
}

/// Everything a client needs to draw the wizard.
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub id: Uuid,
    pub current_step: usize,
    pub total_steps: usize,
    pub completed: bool,
    pub steps: Vec<StepView>,
    pub form: FormState,
    pub errors: Vec<FieldError>,
}

impl WizardSession {
    pub fn new(schema: Arc<FormSchema>, steps: Vec<Step>) -> Self {
        Self {
            id: Uuid::new_v4(),
            schema,
            controller: StepController::new(steps.len()),
            steps,
            form: RwLock::new(FormState::default()),
            errors: RwLock::new(Vec::new()),
            output: RwLock::new(None),
        }
    }

    pub async fn update_form(&self, form: FormState) {
        *self.form.write().await = form;
    }

    /// Validates the active step's fields and moves on if they all pass.
    /// The last step is left through `finish`, never through `next`.
    pub async fn next(&self) -> Result<AdvanceOutcome, AppError> {
        let last = self.steps.len().saturating_sub(1);
        let outcome = self
            .controller
            .advance::<_, _, AppError>(|step| async move {
                if step >= last {
                    return Err(AppError::StepOutOfRange(
                        "the last step is completed by finishing the wizard".to_string(),
                    ));
                }
                let form = self.form_value().await?;
                let errors = self.schema.validate(&form, &self.steps[step].fields);
                let passed = errors.is_empty();
                *self.errors.write().await = errors;
                Ok(passed)
            })
            .await?;

        self.rejected_as_error(outcome).await
    }

    /// Validates the whole form, normalizes it, and hands the result to
    /// `sink` once the wizard has moved past the last step. Only allowed on
    /// the last step. A sink failure puts the wizard back on the last step.
    pub async fn finish(&self, sink: &dyn SubmissionSink) -> Result<AdvanceOutcome, AppError> {
        let last = self.steps.len().saturating_sub(1);
        let mut normalized = None;
        let slot = &mut normalized;

        let outcome = self
            .controller
            .advance::<_, _, AppError>(|step| async move {
                if step != last {
                    return Err(AppError::StepOutOfRange(format!(
                        "finish is only available on step {last}"
                    )));
                }
                let form = self.form.read().await.clone();
                let form_value = serde_json::to_value(&form).map_err(anyhow::Error::from)?;
                let errors = self.schema.validate_all(&form_value);
                let passed = errors.is_empty();
                *self.errors.write().await = errors;
                if passed {
                    *slot = Some(transform(&form));
                }
                Ok(passed)
            })
            .await?;

        let (AdvanceOutcome::Advanced { step }, Some(output)) = (outcome, normalized) else {
            return self.rejected_as_error(outcome).await;
        };

        if let Err(err) = sink.accept(self.id, &output).await {
            self.controller.revert(step);
            warn!("Wizard {} submission failed: {err}", self.id);
            return Err(err);
        }
        *self.output.write().await = Some(output);
        info!("Wizard {} finished", self.id);
        Ok(outcome)
    }

    pub async fn back(&self) -> Result<usize, AppError> {
        let step = self.controller.retreat()?;
        self.errors.write().await.clear();
        Ok(step)
    }

    /// Back to the first step. Entered data and any produced output are kept.
    pub async fn reset(&self) {
        self.controller.reset();
        self.errors.write().await.clear();
    }

    pub async fn output(&self) -> Option<NormalizedOutput> {
        self.output.read().await.clone()
    }

    pub async fn view(&self) -> WizardView {
        let statuses = self.controller.statuses();
        WizardView {
            id: self.id,
            current_step: self.controller.current(),
            total_steps: self.controller.total(),
            completed: self.controller.is_complete(),
            steps: self
                .steps
                .iter()
                .zip(statuses)
                .enumerate()
                .map(|(index, (step, status))| StepView {
                    index,
                    title: step.title,
                    status,
                })
                .collect(),
            form: self.form.read().await.clone(),
            errors: self.errors.read().await.clone(),
        }
    }

    async fn form_value(&self) -> Result<Value, AppError> {
        Ok(serde_json::to_value(&*self.form.read().await).map_err(anyhow::Error::from)?)
    }

    async fn rejected_as_error(&self, outcome: AdvanceOutcome) -> Result<AdvanceOutcome, AppError> {
        match outcome {
            AdvanceOutcome::Rejected { step } => {
                let errors = self.errors.read().await.clone();
                warn!(
                    "Wizard {} step {step} rejected with {} field error(s)",
                    self.id,
                    errors.len()
                );
                Err(AppError::FieldValidation(errors))
            }
            other => Ok(other),
        }
    }
}

/// All live wizard sessions, keyed by id.
pub struct WizardRegistry {
    schema: Arc<FormSchema>,
    sessions: RwLock<HashMap<Uuid, Arc<WizardSession>>>,
}

impl WizardRegistry {
    pub fn new(schema: FormSchema) -> Self {
        Self {
            schema: Arc::new(schema),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create(&self) -> Arc<WizardSession> {
        let session = Arc::new(WizardSession::new(self.schema.clone(), resume_steps()));
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        info!("Created wizard session {}", session.id);
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<WizardSession>, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Wizard {id} not found")))
    }
}
