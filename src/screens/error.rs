use validator::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("required field missing: {}", .0.join(", "))]
    MissingRequired(Vec<String>),
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl FormError {
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        FormError::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<ValidationErrors> for FormError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        FormError::MissingRequired(fields)
    }
}
