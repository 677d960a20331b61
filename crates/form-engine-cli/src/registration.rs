// File: src/registration.rs
// Purpose: The registration form, in a plain and a validated variant

use anyhow::{Context, Result};
use form_engine::{
    field_keys, transform, EngineConfig, FieldValue, FormData, FormEngine, FormSubmitEvent,
    InputEvent, Pattern, RulesFile, Submission, ValidationConfig, ValidationRule,
    ValidatorRegistry,
};
use serde::Serialize;
use std::cell::Cell;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

field_keys! {
    /// Fields of the registration record.
    pub enum UserField {
        Name => "name",
        Age => "age",
        Email => "email",
        Gender => "gender",
        Password => "password",
    }
}

const NAME_PATTERN: &str = "/[A-Za-z ]*/";
const EMAIL_PATTERN: &str = r"/[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}/";
const MIN_AGE: f64 = 18.0;
const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::NonBinary => "non-binary",
        }
    }

    fn from_value(value: &FieldValue) -> Option<Self> {
        match value.as_str()? {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "non-binary" => Some(Gender::NonBinary),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw input as a user would type it into the form's controls.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RegistrationInput {
    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// Age in years
    #[arg(long)]
    pub age: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Password
    #[arg(long)]
    pub password: Option<String>,

    /// Gender
    #[arg(long, value_enum)]
    pub gender: Option<Gender>,
}

/// A submitted registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub name: Option<String>,
    pub age: Option<f64>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub password: Option<String>,
}

impl User {
    fn from_data(data: &FormData<UserField>) -> Self {
        let text = |key: UserField| data.get(&key).map(ToString::to_string);
        Self {
            name: text(UserField::Name),
            age: data.get(&UserField::Age).and_then(FieldValue::as_f64),
            email: text(UserField::Email),
            gender: data.get(&UserField::Gender).and_then(Gender::from_value),
            password: text(UserField::Password),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// No rules: every submission goes through
    Plain,
    /// Rules checked on submit
    Validated,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Submitted(User),
    /// Failing fields with their messages, in form order
    Rejected(Vec<(UserField, String)>),
}

/// The registration form wired to a [`FormEngine`].
pub struct Registration {
    variant: Variant,
    engine: FormEngine<UserField>,
    submitted: Rc<Cell<bool>>,
}

impl Registration {
    pub fn plain() -> Self {
        Self::build(Variant::Plain, EngineConfig::new())
    }

    pub fn validated() -> Result<Self> {
        Ok(Self::build(
            Variant::Validated,
            EngineConfig::new().validations(default_validations()?),
        ))
    }

    /// Validated variant with rules read from a TOML file.
    pub fn from_rules_file(path: &Path) -> Result<Self> {
        let rules = RulesFile::load_from(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()))?;
        let config = rules
            .engine_config(&registry())
            .with_context(|| format!("Invalid rules in {}", path.display()))?;

        Ok(Self::build(Variant::Validated, config))
    }

    fn build(variant: Variant, config: EngineConfig<UserField>) -> Self {
        let submitted = Rc::new(Cell::new(false));
        let flag = Rc::clone(&submitted);
        let engine = FormEngine::new(config.on_submit(move || flag.set(true)));

        Self {
            variant,
            engine,
            submitted,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Dispatch one change event per provided field, as the form's
    /// controls would.
    pub fn fill(&self, input: &RegistrationInput) {
        let on_name = self.engine.handle_change(UserField::Name);
        let on_age = self.engine.handle_change_with(UserField::Age, transform::parse_int);
        let on_email = self.engine.handle_change(UserField::Email);
        let on_password = self.engine.handle_change(UserField::Password);
        let on_gender = self.engine.handle_change(UserField::Gender);

        if let Some(name) = &input.name {
            on_name(&InputEvent::text(name.as_str()));
        }
        if let Some(age) = &input.age {
            on_age(&InputEvent::number(age.as_str()));
        }
        if let Some(email) = &input.email {
            on_email(&InputEvent::new(form_engine::InputKind::Email, email.as_str()));
        }
        if let Some(password) = &input.password {
            on_password(&InputEvent::new(form_engine::InputKind::Password, password.as_str()));
        }
        if let Some(gender) = input.gender {
            on_gender(&InputEvent::select(gender.as_str()));
        }
    }

    pub fn submit(&self) -> Outcome {
        self.submitted.set(false);

        match self.engine.handle_submit(&mut FormSubmitEvent::new()) {
            Submission::Accepted => {
                debug_assert!(self.submitted.get());
                Outcome::Submitted(User::from_data(&self.engine.data()))
            }
            Submission::Rejected(_) => {
                let errors = self.engine.errors();
                let failures = UserField::ALL
                    .iter()
                    .filter_map(|key| errors.get(key).map(|msg| (*key, msg.to_string())))
                    .collect();
                Outcome::Rejected(failures)
            }
        }
    }
}

/// Validators rules files may reference by name.
pub fn registry() -> ValidatorRegistry {
    let mut registry = ValidatorRegistry::with_builtins();
    registry
        .register("adult", is_adult)
        .register("password_length", long_enough_password);
    registry
}

fn is_adult(value: Option<&FieldValue>) -> bool {
    // Age is optional, but when given it has to be a real number
    match value {
        None => true,
        Some(v) => v.as_f64().map_or(false, |age| age.is_finite() && age >= MIN_AGE),
    }
}

fn long_enough_password(value: Option<&FieldValue>) -> bool {
    value
        .and_then(FieldValue::as_str)
        .map_or(false, |s| s.chars().count() >= MIN_PASSWORD_LENGTH)
}

fn default_validations() -> Result<ValidationConfig<UserField>> {
    Ok(ValidationConfig::new()
        .field(
            UserField::Name,
            ValidationRule::new()
                .required("Name is required")
                .pattern(
                    Pattern::new(NAME_PATTERN)?,
                    "You're not allowed to use special characters or numbers in your name.",
                ),
        )
        .field(
            UserField::Age,
            ValidationRule::new().custom(is_adult, "You have to be at least 18 years old."),
        )
        .field(
            UserField::Email,
            ValidationRule::new()
                .required("Email is required")
                .pattern(Pattern::new(EMAIL_PATTERN)?, "Please enter a valid email address."),
        )
        .field(
            UserField::Password,
            ValidationRule::new().required("Password is required").custom(
                long_enough_password,
                "Password needs to be at least 6 characters long.",
            ),
        )
        .field(
            UserField::Gender,
            ValidationRule::new().required("Please select a gender."),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn complete_input() -> RegistrationInput {
        RegistrationInput {
            name: Some("Felix Gerschau".into()),
            age: Some("30".into()),
            email: Some("felix@example.com".into()),
            password: Some("hunter22".into()),
            gender: Some(Gender::NonBinary),
        }
    }

    #[test]
    fn test_plain_accepts_anything() {
        let form = Registration::plain();
        form.fill(&RegistrationInput::default());

        assert_eq!(
            form.submit(),
            Outcome::Submitted(User {
                name: None,
                age: None,
                email: None,
                gender: None,
                password: None,
            })
        );
    }

    #[test]
    fn test_validated_accepts_complete_input() {
        let form = Registration::validated().unwrap();
        form.fill(&complete_input());

        match form.submit() {
            Outcome::Submitted(user) => {
                assert_eq!(user.name.as_deref(), Some("Felix Gerschau"));
                assert_eq!(user.age, Some(30.0));
                assert_eq!(user.gender, Some(Gender::NonBinary));
            }
            other => panic!("expected submission, got {:?}", other),
        }
    }

    #[test]
    fn test_validated_reports_failures_in_form_order() {
        let form = Registration::validated().unwrap();
        form.fill(&RegistrationInput {
            name: Some("Felix123".into()),
            age: Some("12".into()),
            password: Some("abc".into()),
            ..RegistrationInput::default()
        });

        let Outcome::Rejected(failures) = form.submit() else {
            panic!("expected rejection");
        };
        let fields: Vec<UserField> = failures.iter().map(|(field, _)| *field).collect();
        assert_eq!(
            fields,
            vec![
                UserField::Name,
                UserField::Age,
                UserField::Email,
                UserField::Gender,
                UserField::Password,
            ]
        );
        assert_eq!(failures[2].1, "Email is required");
    }

    #[test]
    fn test_non_numeric_age_is_rejected() {
        let form = Registration::validated().unwrap();
        form.fill(&RegistrationInput {
            age: Some("old".into()),
            ..complete_input()
        });

        assert_eq!(
            form.submit(),
            Outcome::Rejected(vec![(
                UserField::Age,
                "You have to be at least 18 years old.".to_string()
            )])
        );
    }

    #[test]
    fn test_bundled_rules_file_matches_built_in_rules() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("registration.toml");
        let input = RegistrationInput {
            name: Some("Felix123".into()),
            age: Some("12".into()),
            ..complete_input()
        };

        let from_file = Registration::from_rules_file(&path).unwrap();
        let built_in = Registration::validated().unwrap();
        from_file.fill(&input);
        built_in.fill(&input);

        assert_eq!(from_file.submit(), built_in.submit());
    }

    #[rstest]
    #[case::absent(None, true)]
    #[case::adult(Some(FieldValue::from(18)), true)]
    #[case::minor(Some(FieldValue::from(17)), false)]
    #[case::unparsed(Some(FieldValue::from("30")), false)]
    #[case::nan(Some(FieldValue::Number(f64::NAN)), false)]
    fn test_is_adult(#[case] age: Option<FieldValue>, #[case] expected: bool) {
        assert_eq!(is_adult(age.as_ref()), expected);
    }

    #[test]
    fn test_registry_resolves_demo_validators() {
        let registry = registry();
        assert!(registry.contains("adult"));
        assert!(registry.contains("password_length"));
        assert!(registry.contains("email"));
    }
}
