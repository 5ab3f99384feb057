//! Field format rules for the registration form.
//!
//! The server reuses these checks when strict validation is enabled.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static SECCION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]{0,3}$").expect("valid seccion pattern"));
static CURP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{18}$").expect("valid curp pattern"));
static TELEFONO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid telefono pattern"));

/// The three inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Seccion,
    Curp,
    Telefono,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Seccion, Field::Curp, Field::Telefono];

    /// Wire name used in the request body.
    pub fn name(self) -> &'static str {
        match self {
            Field::Seccion => "seccion",
            Field::Curp => "curp",
            Field::Telefono => "telefono",
        }
    }

    /// Human label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Field::Seccion => "Sección",
            Field::Curp => "CURP",
            Field::Telefono => "Teléfono",
        }
    }

    fn required_message(self) -> &'static str {
        match self {
            Field::Seccion => "La sección es obligatoria",
            Field::Curp => "El CURP es obligatorio",
            Field::Telefono => "El teléfono es obligatorio",
        }
    }

    fn pattern_message(self) -> &'static str {
        match self {
            Field::Seccion => "Debe ser un número entre 1 y 9999 sin ceros al inicio",
            Field::Curp => "El CURP debe tener 18 caracteres alfanuméricos",
            Field::Telefono => "Debe contener 10 dígitos",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Field::Seccion => &*SECCION_RE,
            Field::Curp => &*CURP_RE,
            Field::Telefono => &*TELEFONO_RE,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    Required,
    Pattern,
}

/// A field-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind,
    pub message: &'static str,
}

/// Check one raw value against its field rule.
pub fn validate_field(field: Field, value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError {
            field,
            kind: FieldErrorKind::Required,
            message: field.required_message(),
        });
    }
    if !field.pattern().is_match(value) {
        return Err(FieldError {
            field,
            kind: FieldErrorKind::Pattern,
            message: field.pattern_message(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seccion_rule() {
        for ok in ["1", "12", "999", "9999"] {
            assert!(validate_field(Field::Seccion, ok).is_ok(), "{ok}");
        }
        for bad in ["0", "012", "10000", "12a", " 12", "-1"] {
            let err = validate_field(Field::Seccion, bad).unwrap_err();
            assert_eq!(err.kind, FieldErrorKind::Pattern, "{bad}");
        }
    }

    #[test]
    fn test_curp_rule_requires_uppercase() {
        assert!(validate_field(Field::Curp, "ABCD010101HDFRRL09").is_ok());
        assert!(validate_field(Field::Curp, "abcd010101hdfrrl09").is_err());
        assert!(validate_field(Field::Curp, "ABCD010101HDFRRL0").is_err());
        assert!(validate_field(Field::Curp, "ABCD010101HDFRRL09X").is_err());
        assert!(validate_field(Field::Curp, "ABCD-10101HDFRRL09").is_err());
    }

    #[test]
    fn test_telefono_rule() {
        assert!(validate_field(Field::Telefono, "5512345678").is_ok());
        assert!(validate_field(Field::Telefono, "551234567").is_err());
        assert!(validate_field(Field::Telefono, "55 1234 5678").is_err());
    }

    #[test]
    fn test_empty_value_uses_required_message() {
        let err = validate_field(Field::Telefono, "").unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::Required);
        assert_eq!(err.message, "El teléfono es obligatorio");
        assert_eq!(err.to_string(), "telefono: El teléfono es obligatorio");
    }

    #[test]
    fn test_pattern_messages() {
        let err = validate_field(Field::Seccion, "0").unwrap_err();
        assert_eq!(
            err.message,
            "Debe ser un número entre 1 y 9999 sin ceros al inicio"
        );
        let err = validate_field(Field::Curp, "X").unwrap_err();
        assert_eq!(err.message, "El CURP debe tener 18 caracteres alfanuméricos");
    }
}
