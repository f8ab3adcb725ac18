use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Field name reported by validation failures.
pub const LANGUAGE_NAME_FIELD: &str = "language_name";

/// The closed set of languages the service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLanguage {
    Go,
    Java,
    Php,
    Javascript,
    Ruby,
}

impl SupportedLanguage {
    pub const ALL: [SupportedLanguage; 5] = [
        SupportedLanguage::Go,
        SupportedLanguage::Java,
        SupportedLanguage::Php,
        SupportedLanguage::Javascript,
        SupportedLanguage::Ruby,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedLanguage::Go => "go",
            SupportedLanguage::Java => "java",
            SupportedLanguage::Php => "php",
            SupportedLanguage::Javascript => "javascript",
            SupportedLanguage::Ruby => "ruby",
        }
    }

    /// Validates a raw language name. Matching is exact and case-sensitive.
    pub fn parse(name: &str) -> Result<Self, ValidateLanguageError> {
        if name.is_empty() {
            return Err(ValidateLanguageError::Required);
        }

        Self::ALL
            .into_iter()
            .find(|language| language.as_str() == name)
            .ok_or_else(|| ValidateLanguageError::Unsupported {
                value: name.to_string(),
            })
    }
}

impl FromStr for SupportedLanguage {
    type Err = ValidateLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateLanguageError {
    #[error("Field validation for 'language_name' failed on the 'required' rule")]
    Required,

    #[error("Field validation for 'language_name' failed on the 'supported_language' rule: {value:?} is not one of go, java, php, javascript, ruby")]
    Unsupported { value: String },
}

impl ValidateLanguageError {
    pub fn field(&self) -> &'static str {
        LANGUAGE_NAME_FIELD
    }

    pub fn rule(&self) -> &'static str {
        match self {
            ValidateLanguageError::Required => "required",
            ValidateLanguageError::Unsupported { .. } => "supported_language",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LanguageId(pub Uuid);

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RepositoryId(pub Uuid);

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_supported_language() {
        for name in ["go", "java", "php", "javascript", "ruby"] {
            let language = SupportedLanguage::parse(name).unwrap();
            assert_eq!(language.as_str(), name);
            assert_eq!(language.to_string(), name);
        }
    }

    #[test]
    fn rejects_unsupported_names() {
        for name in ["rust", "Go", " go", "go ", "golang", "java/script", "../go"] {
            let err = SupportedLanguage::parse(name).unwrap_err();
            assert_eq!(
                err,
                ValidateLanguageError::Unsupported {
                    value: name.to_string()
                }
            );
            assert_eq!(err.rule(), "supported_language");
        }
    }

    #[test]
    fn empty_name_fails_required_rule() {
        let err = "".parse::<SupportedLanguage>().unwrap_err();

        assert_eq!(err, ValidateLanguageError::Required);
        assert_eq!(err.field(), "language_name");
        assert_eq!(err.rule(), "required");
    }

    #[test]
    fn error_message_names_field_and_rule() {
        let message = SupportedLanguage::parse("rust").unwrap_err().to_string();

        assert!(message.contains("'language_name'"));
        assert!(message.contains("'supported_language'"));
        assert!(message.contains("\"rust\""));
    }

    #[test]
    fn identifiers_serialize_as_bare_uuid() {
        let id = Uuid::parse_str("34ffdec9-26e4-4c2f-b9ae-4dc9cb647dc5").unwrap();

        assert_eq!(
            serde_json::to_string(&LanguageId(id)).unwrap(),
            "\"34ffdec9-26e4-4c2f-b9ae-4dc9cb647dc5\""
        );
        assert_eq!(
            RepositoryId(id).to_string(),
            "34ffdec9-26e4-4c2f-b9ae-4dc9cb647dc5"
        );
    }
}
