// File: src/key.rs
// Purpose: Field identifiers for the managed record

use std::fmt::Debug;
use std::hash::Hash;

/// Identifies one field of the record a form edits.
///
/// Implement this on a fieldless enum (one variant per record field) to get
/// compile-time-checked keys; [`field_keys!`](crate::field_keys) generates
/// the enum and the impl together. `String` implements it as well for forms
/// whose field set is only known at runtime.
pub trait FieldKey: Clone + Eq + Hash + Debug + 'static {
    /// Stable name used in logs and rule files.
    fn name(&self) -> &str;

    /// Resolve a key from its name, `None` if the record has no such field.
    fn from_name(name: &str) -> Option<Self>;
}

impl FieldKey for String {
    fn name(&self) -> &str {
        self
    }

    fn from_name(name: &str) -> Option<Self> {
        Some(name.to_string())
    }
}

/// Declare a field-key enum for a record.
///
/// ```
/// form_engine::field_keys! {
///     pub enum LoginField {
///         Email => "email",
///         Password => "password",
///     }
/// }
///
/// use form_engine::FieldKey;
/// assert_eq!(LoginField::Email.name(), "email");
/// assert_eq!(LoginField::from_name("password"), Some(LoginField::Password));
/// ```
#[macro_export]
macro_rules! field_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $field:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            /// Every field of the record, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl $crate::FieldKey for $name {
            fn name(&self) -> &str {
                match self {
                    $($name::$variant => $field),+
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($field => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}
