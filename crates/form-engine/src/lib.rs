//! # form-engine
//!
//! Form state for an arbitrary record type: field values that change one at
//! a time, validation rules checked when the form is submitted, and a
//! completion callback that only runs once every rule passes.
//!
//! ## Quick Start
//!
//! ```rust
//! use form_engine::{
//!     field_keys, EngineConfig, FormEngine, FormSubmitEvent, InputEvent, ValidationConfig,
//!     ValidationRule,
//! };
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! field_keys! {
//!     pub enum SignupField {
//!         Name => "name",
//!         Age => "age",
//!     }
//! }
//!
//! let submitted = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&submitted);
//!
//! let form = FormEngine::new(
//!     EngineConfig::new()
//!         .validations(ValidationConfig::new().field(
//!             SignupField::Name,
//!             ValidationRule::new().required("This field is required"),
//!         ))
//!         .on_submit(move || counter.set(counter.get() + 1)),
//! );
//!
//! // Nothing entered yet: the submission is held back
//! form.handle_submit(&mut FormSubmitEvent::new());
//! assert_eq!(form.error(&SignupField::Name).as_deref(), Some("This field is required"));
//! assert_eq!(submitted.get(), 0);
//!
//! let on_name = form.handle_change(SignupField::Name);
//! on_name(&InputEvent::text("Felix"));
//!
//! form.handle_submit(&mut FormSubmitEvent::new());
//! assert!(form.errors().is_empty());
//! assert_eq!(submitted.get(), 1);
//! ```
//!
//! ## Rules
//!
//! Each field takes up to three checks, evaluated in this order with the
//! first failure winning:
//!
//! - **required** - the value is present and not an empty string
//! - **pattern** - the value's string form fully matches a [`Pattern`]
//! - **custom** - an arbitrary predicate over the value
//!
//! Rules may also be declared in TOML and loaded through [`RulesFile`].

pub mod engine;
pub mod error;
pub mod event;
pub mod key;
pub mod pattern;
pub mod rules_file;
pub mod state;
pub mod transform;
pub mod validation;
pub mod value;

pub use engine::{EngineConfig, FormEngine, SubmitCallback, Submission};
pub use error::ConfigError;
pub use event::{ChangeEvent, FormSubmitEvent, InputEvent, InputKind, SubmitEvent};
pub use key::FieldKey;
pub use pattern::Pattern;
pub use rules_file::{RulesFile, ValidatorRegistry};
pub use state::{ErrorMap, FormData, FormSnapshot};
pub use validation::{Custom, PatternRule, Predicate, Required, ValidationConfig, ValidationRule};
pub use value::FieldValue;
