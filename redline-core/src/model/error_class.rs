use serde::{Deserialize, Serialize};

/// Classification attached to an annotation pass.
///
/// Chosen once per apply and used only in the user-facing summary;
/// it is not stored per row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorClass {
    Major,
    Minor,
}

impl ErrorClass {
    pub fn all() -> &'static [ErrorClass] {
        &[ErrorClass::Major, ErrorClass::Minor]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::Major => "Major Error",
            ErrorClass::Minor => "Minor Error",
        }
    }

    pub fn short(&self) -> &'static str {
        match self {
            ErrorClass::Major => "MAJOR",
            ErrorClass::Minor => "MINOR",
        }
    }
}

impl Default for ErrorClass {
    fn default() -> Self {
        ErrorClass::Major
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(ErrorClass::Major.as_str(), "Major Error");
        assert_eq!(ErrorClass::Minor.short(), "MINOR");
        assert_eq!(ErrorClass::all().len(), 2);
    }
}
