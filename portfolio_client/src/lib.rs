//! Headless controller behind the contact page.
//!
//! The page is in one of three states. It starts in [`ContactPageState::Form`],
//! moves to [`ContactPageState::Success`] or [`ContactPageState::Error`]
//! depending on the outcome of a single submit, and returns to the form via
//! [`ContactPageController::retry`] or [`ContactPageController::reset`].

use std::collections::{BTreeMap, BTreeSet};

use portfolio_extern_contracts::contact::ContactApiService;
use portfolio_models::{
    contact::{ContactField, ContactForm, FieldErrors, SubjectPolicy},
    language::Language,
};
use tracing::{debug, warn};


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContactPageState {
    #[default]
    Form,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The endpoint accepted the message.
    Sent { id: Option<String> },
    /// Local validation failed, nothing was sent.
    Invalid,
    /// The request failed or the endpoint answered with a non-2xx status.
    Failed,
    /// The page is not showing the form or a request is already in flight.
    Ignored,
}

#[derive(Debug)]
pub struct ContactPageController<ContactApi> {
    contact_api: ContactApi,
    subject_policy: SubjectPolicy,
    state: ContactPageState,
    form: ContactForm,
    errors: FieldErrors,
    touched: BTreeSet<ContactField>,
    attempted: bool,
    submitting: bool,
    last_error: Option<String>,
}

impl<ContactApi> ContactPageController<ContactApi>
where
    ContactApi: ContactApiService,
{
    pub fn new(contact_api: ContactApi, subject_policy: SubjectPolicy, language: Language) -> Self {
        let form = ContactForm {
            language,
            ..Default::default()
        };
        let errors = validate(&form, subject_policy);

        Self {
            contact_api,
            subject_policy,
            state: ContactPageState::Form,
            form,
            errors,
            touched: BTreeSet::new(),
            attempted: false,
            submitting: false,
            last_error: None,
        }
    }

    pub fn state(&self) -> ContactPageState {
        self.state
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// All current validation errors, including those of untouched fields.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Localized errors for the fields the user has edited, or for every
    /// field once a submit has been attempted.
    pub fn visible_errors(&self) -> BTreeMap<ContactField, String> {
        self.errors
            .iter()
            .filter(|(field, _)| self.attempted || self.touched.contains(field))
            .map(|(field, error)| (field, error.message(field, self.form.language)))
            .collect()
    }

    /// Detail of the last failed submit, for diagnostics only.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn can_submit(&self) -> bool {
        self.state == ContactPageState::Form && !self.submitting
    }

    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        self.form.set(field, value);
        self.touched.insert(field);
        self.errors = validate(&self.form, self.subject_policy);
    }

    pub fn set_language(&mut self, language: Language) {
        self.form.language = language;
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.can_submit() {
            return SubmitOutcome::Ignored;
        }

        self.attempted = true;
        self.errors = validate(&self.form, self.subject_policy);
        if !self.errors.is_empty() {
            debug!(errors = %self.errors, "not submitting invalid contact form");
            return SubmitOutcome::Invalid;
        }

        let in_flight = InFlight::start(&mut self.submitting);
        let result = self.contact_api.send_contact_form(self.form.clone()).await;
        drop(in_flight);

        match result {
            Ok(response) => {
                self.state = ContactPageState::Success;
                self.clear_form();
                SubmitOutcome::Sent { id: response.id }
            }
            Err(err) => {
                warn!("failed to send contact form: {err}");
                self.state = ContactPageState::Error;
                self.last_error = Some(err.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    /// Return to the form, keeping the entered values.
    pub fn retry(&mut self) {
        self.state = ContactPageState::Form;
        self.last_error = None;
    }

    /// Return to an empty form.
    pub fn reset(&mut self) {
        self.state = ContactPageState::Form;
        self.last_error = None;
        self.clear_form();
    }

    fn clear_form(&mut self) {
        self.form = ContactForm {
            language: self.form.language,
            ..Default::default()
        };
        self.errors = validate(&self.form, self.subject_policy);
        self.touched.clear();
        self.attempted = false;
    }
}

fn validate(form: &ContactForm, subject_policy: SubjectPolicy) -> FieldErrors {
    form.clone()
        .validate(subject_policy)
        .err()
        .unwrap_or_default()
}

/// Marks a request as in flight until dropped, also when the submit future is
/// cancelled.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
