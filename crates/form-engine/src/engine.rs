// File: src/engine.rs
// Purpose: Form state container, change handlers and the submission gate

use crate::event::{ChangeEvent, SubmitEvent};
use crate::key::FieldKey;
use crate::state::{ErrorMap, FormData, FormSnapshot};
use crate::validation::ValidationConfig;
use crate::value::FieldValue;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Completion callback run when a submission passes validation.
pub type SubmitCallback = Box<dyn Fn()>;
type Subscriber<K> = Rc<dyn Fn(&FormSnapshot<K>)>;

/// Everything a form needs at construction time.
///
/// All parts are optional: without initial values the form starts empty,
/// without validations every submission is accepted, and without an
/// `on_submit` callback an accepted submission does nothing further.
pub struct EngineConfig<K: FieldKey> {
    pub initial_values: FormData<K>,
    pub validations: ValidationConfig<K>,
    pub on_submit: Option<SubmitCallback>,
}

impl<K: FieldKey> EngineConfig<K> {
    pub fn new() -> Self {
        Self {
            initial_values: FormData::new(),
            validations: ValidationConfig::new(),
            on_submit: None,
        }
    }

    pub fn initial_values(mut self, values: FormData<K>) -> Self {
        self.initial_values = values;
        self
    }

    pub fn initial_value(mut self, key: K, value: impl Into<FieldValue>) -> Self {
        self.initial_values.set(key, value);
        self
    }

    pub fn validations(mut self, validations: ValidationConfig<K>) -> Self {
        self.validations = validations;
        self
    }

    pub fn on_submit(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_submit = Some(Box::new(callback));
        self
    }
}

impl<K: FieldKey> Default for EngineConfig<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Every rule passed and `on_submit` ran.
    Accepted,
    /// At least one field failed; the count of failing fields.
    Rejected(usize),
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted)
    }
}

struct EngineInner<K: FieldKey> {
    data: RefCell<FormData<K>>,
    errors: RefCell<ErrorMap<K>>,
    validations: ValidationConfig<K>,
    on_submit: Option<SubmitCallback>,
    subscribers: RefCell<Vec<Subscriber<K>>>,
}

/// State of one form-editing session.
///
/// Holds the field values, the rules they are checked against and the
/// errors from the last submission. Cloning yields another handle to the
/// same form, which is how change handlers keep it alive.
///
/// Values change only through [`handle_change`](Self::handle_change) (or
/// [`set_value`](Self::set_value)) and are never validated on change.
/// Errors change only through [`handle_submit`](Self::handle_submit), which
/// recomputes them from scratch.
///
/// Single-threaded: every call runs to completion before returning. A
/// panicking custom validator unwinds through `handle_submit` untouched.
pub struct FormEngine<K: FieldKey> {
    inner: Rc<EngineInner<K>>,
}

impl<K: FieldKey> Clone for FormEngine<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K: FieldKey> FormEngine<K> {
    pub fn new(config: EngineConfig<K>) -> Self {
        tracing::debug!(
            initial_fields = config.initial_values.len(),
            validated_fields = config.validations.len(),
            "form engine created"
        );

        Self {
            inner: Rc::new(EngineInner {
                data: RefCell::new(config.initial_values),
                errors: RefCell::new(ErrorMap::new()),
                validations: config.validations,
                on_submit: config.on_submit,
                subscribers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Snapshot of the current field values.
    pub fn data(&self) -> FormData<K> {
        self.inner.data.borrow().clone()
    }

    /// Snapshot of the errors from the last submission.
    pub fn errors(&self) -> ErrorMap<K> {
        self.inner.errors.borrow().clone()
    }

    pub fn value(&self, key: &K) -> Option<FieldValue> {
        self.inner.data.borrow().get(key).cloned()
    }

    pub fn error(&self, key: &K) -> Option<String> {
        self.inner.errors.borrow().get(key).map(str::to_string)
    }

    pub fn validations(&self) -> &ValidationConfig<K> {
        &self.inner.validations
    }

    /// Register a hook called after every change and every submission.
    pub fn subscribe(&self, subscriber: impl Fn(&FormSnapshot<K>) + 'static) {
        self.inner.subscribers.borrow_mut().push(Rc::new(subscriber));
    }

    /// Replace one field's value and notify subscribers.
    pub fn set_value(&self, key: K, value: impl Into<FieldValue>) {
        let value = value.into();
        tracing::debug!(field = key.name(), %value, "field changed");
        self.inner.data.borrow_mut().set(key, value);
        self.notify();
    }

    /// Handler that stores each event's raw value under `key`.
    pub fn handle_change<E>(&self, key: K) -> impl Fn(&E) + 'static
    where
        E: ChangeEvent + ?Sized,
    {
        let engine = self.clone();
        move |event: &E| engine.set_value(key.clone(), event.value())
    }

    /// Handler that passes each event's raw value through `transform`
    /// before storing it under `key`.
    pub fn handle_change_with<E, F>(&self, key: K, transform: F) -> impl Fn(&E) + 'static
    where
        E: ChangeEvent + ?Sized,
        F: Fn(FieldValue) -> FieldValue + 'static,
    {
        let engine = self.clone();
        move |event: &E| engine.set_value(key.clone(), transform(event.value()))
    }

    /// Validate the current values and run `on_submit` if nothing failed.
    ///
    /// The event's default action is prevented first, whatever the outcome.
    /// The stored errors are replaced, not merged, so a field that now
    /// passes loses its old message.
    pub fn handle_submit<E>(&self, event: &mut E) -> Submission
    where
        E: SubmitEvent + ?Sized,
    {
        event.prevent_default();

        // Validate a copy so validators may read the engine
        let data = self.data();
        let errors = self.inner.validations.validate(&data);
        let failed = errors.len();
        *self.inner.errors.borrow_mut() = errors;
        self.notify();

        if failed > 0 {
            tracing::debug!(failed, "submission rejected");
            return Submission::Rejected(failed);
        }

        tracing::debug!("submission accepted");
        if let Some(on_submit) = &self.inner.on_submit {
            on_submit();
        }
        Submission::Accepted
    }

    fn notify(&self) {
        // Release every borrow before calling out, subscribers may re-enter
        let subscribers: Vec<Subscriber<K>> = self.inner.subscribers.borrow().clone();
        if subscribers.is_empty() {
            return;
        }

        let snapshot = FormSnapshot {
            data: self.data(),
            errors: self.errors(),
        };
        for subscriber in subscribers {
            subscriber(&snapshot);
        }
    }
}

impl<K: FieldKey> fmt::Debug for FormEngine<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormEngine")
            .field("data", &*self.inner.data.borrow())
            .field("errors", &*self.inner.errors.borrow())
            .field("validations", &self.inner.validations)
            .finish_non_exhaustive()
    }
}
