use crate::utils::error::{ProbeError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_service_name(field_name: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Service name cannot be empty".to_string(),
        });
    }

    if name.contains('\0') {
        return Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Service name contains null bytes".to_string(),
        });
    }

    if name.chars().any(char::is_whitespace) {
        return Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Service name cannot contain whitespace".to_string(),
        });
    }

    Ok(())
}

pub fn validate_fact_name(field_name: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Fact name cannot be empty".to_string(),
        });
    }

    // 事實名稱用作 key-value 輸出的鍵，不能含空白或 '='
    if name.chars().any(|c| c.is_whitespace() || c == '=') {
        return Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Fact name cannot contain whitespace or '='".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ProbeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}
