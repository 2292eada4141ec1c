use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use agentlead_contact::ContactSubmission;
use strum::VariantArray;
use tracing::{debug, info, warn};

use crate::ContactApi;

/// How long the success banner stays up before the form is shown again.
pub const RESET_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, VariantArray)]
pub enum Field {
    Name,
    Email,
    Phone,
    Company,
    Message,
}

impl Field {
    pub fn is_required(self) -> bool {
        matches!(self, Self::Name | Self::Email | Self::Message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub message: String,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Company => &self.company,
            Field::Message => &self.message,
        }
    }

    fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Company => &mut self.company,
            Field::Message => &mut self.message,
        };
        *slot = value;
    }

    /// Required fields that are still empty, in form order.
    pub fn missing_required(&self) -> Vec<Field> {
        Field::VARIANTS
            .iter()
            .copied()
            .filter(|field| field.is_required() && self.get(*field).is_empty())
            .collect()
    }

    fn to_submission(&self) -> ContactSubmission {
        let optional = |value: &str| Some(value.to_owned()).filter(|v| !v.is_empty());

        ContactSubmission {
            name: self.name.to_owned(),
            email: self.email.to_owned(),
            phone: optional(&self.phone),
            company: optional(&self.company),
            message: self.message.to_owned(),
        }
    }
}

/// Snapshot of everything the form needs to render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormView {
    pub status: FormStatus,
    pub values: FormValues,
    pub error: Option<String>,
}

impl FormView {
    pub fn submit_enabled(&self) -> bool {
        self.status != FormStatus::Submitting
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Sent,
    Failed(String),
    MissingFields(Vec<Field>),
    /// A submission was already in flight.
    Ignored,
}

#[derive(Default)]
struct Inner {
    view: FormView,
    submissions: u64,
}

/// Returns the form to idle when a submit future is dropped mid-request.
struct InFlight {
    inner: Arc<Mutex<Inner>>,
    ticket: u64,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.submissions == self.ticket && inner.view.status == FormStatus::Submitting {
            debug!("Contact form submit abandoned, back to idle");
            inner.view.status = FormStatus::Idle;
        }
    }
}

pub struct ContactForm<A> {
    api: Arc<A>,
    inner: Arc<Mutex<Inner>>,
}

impl<A> Clone for ContactForm<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: ContactApi> ContactForm<A> {
    pub fn new(api: A) -> Self {
        Self {
            api: Arc::new(api),
            inner: Arc::default(),
        }
    }

    pub fn view(&self) -> FormView {
        self.lock().view.clone()
    }

    pub fn update(&self, field: Field, value: impl Into<String>) {
        self.lock().view.values.set(field, value.into());
    }

    /// Sends the current values once.
    ///
    /// Fields are kept on failure so the visitor can retry; on success they
    /// are cleared and the form returns to idle after [`RESET_AFTER`].
    /// Dropping the future before it completes leaves the form idle with its
    /// values intact.
    pub async fn submit(&self) -> SubmitOutcome {
        let (submission, ticket) = {
            let mut inner = self.lock();

            if inner.view.status == FormStatus::Submitting {
                debug!("Contact form already submitting, ignoring submit");
                return SubmitOutcome::Ignored;
            }

            let missing = inner.view.values.missing_required();
            if !missing.is_empty() {
                return SubmitOutcome::MissingFields(missing);
            }

            inner.view.status = FormStatus::Submitting;
            inner.view.error = None;
            inner.submissions += 1;
            (inner.view.values.to_submission(), inner.submissions)
        };

        // Declared before the lock below so it is dropped after it.
        let _in_flight = InFlight {
            inner: Arc::clone(&self.inner),
            ticket,
        };
        let result = self.api.submit(&submission).await;

        let mut inner = self.lock();
        match result {
            Ok(()) => {
                info!(email = %submission.email, "Contact form submitted");

                inner.view.values = FormValues::default();
                inner.view.status = FormStatus::Submitted;
                drop(inner);

                self.schedule_reset(ticket);
                SubmitOutcome::Sent
            }
            Err(e) => {
                warn!(error = %e, "Contact form submission failed");

                let message = e.user_message();
                inner.view.status = FormStatus::Idle;
                inner.view.error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    fn schedule_reset(&self, ticket: u64) {
        let inner = Arc::clone(&self.inner);

        tokio::spawn(async move {
            tokio::time::sleep(RESET_AFTER).await;

            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            // A newer submission owns the state now.
            if inner.submissions == ticket && inner.view.status == FormStatus::Submitted {
                inner.view.status = FormStatus::Idle;
            }
        });
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
