// File: src/event.rs
// Purpose: Event seams between the engine and the UI layer

use crate::value::FieldValue;

/// An input's change notification, carrying the new raw value.
pub trait ChangeEvent {
    fn value(&self) -> FieldValue;
}

/// A form's submit notification.
pub trait SubmitEvent {
    /// Stop the host from performing its default submission.
    fn prevent_default(&mut self);
}

/// Kind of control an [`InputEvent`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Number,
    Email,
    Password,
    Checkbox,
    Select,
}

/// A change event from a native input control.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    pub kind: InputKind,
    pub value: FieldValue,
}

impl InputEvent {
    pub fn new(kind: InputKind, value: impl Into<FieldValue>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(InputKind::Text, value.into())
    }

    /// Number inputs still report their value as text.
    pub fn number(raw: impl Into<String>) -> Self {
        Self::new(InputKind::Number, raw.into())
    }

    pub fn select(option: impl Into<String>) -> Self {
        Self::new(InputKind::Select, option.into())
    }

    pub fn checkbox(checked: bool) -> Self {
        Self::new(InputKind::Checkbox, checked)
    }
}

impl ChangeEvent for InputEvent {
    fn value(&self) -> FieldValue {
        self.value.clone()
    }
}

impl ChangeEvent for FieldValue {
    fn value(&self) -> FieldValue {
        self.clone()
    }
}

/// A submit event that records whether its default action was prevented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmitEvent {
    default_prevented: bool,
}

impl FormSubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl SubmitEvent for FormSubmitEvent {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}
