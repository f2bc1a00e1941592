use crate::error::{AppError, AppResult};
use regex::Regex;

/// Validate a Peruvian mobile number in canonical +519xxxxxxxx form.
pub fn validate_pe_phone(phone: &str) -> AppResult<()> {
    let phone_regex = Regex::new(r"^\+519\d{8}$").unwrap();

    if !phone_regex.is_match(phone) {
        return Err(AppError::ValidationError(
            "Número de celular inválido, usa el formato +519xxxxxxxx".to_string(),
        ));
    }

    Ok(())
}

/// Normalize common input shapes ("987 654 321", "51987654321") to +51 form.
pub fn format_pe_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 11 && digits.starts_with("51") {
        format!("+{digits}")
    } else if digits.len() == 9 {
        format!("+51{digits}")
    } else {
        phone.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pe_phone() {
        assert!(validate_pe_phone("+51987654321").is_ok());
        assert!(validate_pe_phone("+5198765432").is_err()); // one digit short
        assert!(validate_pe_phone("51987654321").is_err()); // missing plus
        assert!(validate_pe_phone("+51887654321").is_err()); // mobiles start with 9
    }

    #[test]
    fn test_format_pe_phone() {
        assert_eq!(format_pe_phone("987654321"), "+51987654321");
        assert_eq!(format_pe_phone("51987654321"), "+51987654321");
        assert_eq!(format_pe_phone("987 654 321"), "+51987654321");
        assert_eq!(format_pe_phone("+51987654321"), "+51987654321");
    }
}
