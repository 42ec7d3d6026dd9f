use colored::Colorize;
use inquire::Text;
use validator::ValidateEmail;

use crate::{error::AppError, menu::BACK_OPTION};

/// Maximum length for a profile name
const MAX_PROFILE_NAME_LENGTH: usize = 30;
/// Maximum length for Git username
const MAX_NAME_LENGTH: usize = 100;
/// Maximum length for Git email address
const MAX_EMAIL_LENGTH: usize = 100;

/// Prompts user for input until valid input is provided
///
/// Validation errors are printed and the prompt repeats; any other error ends the loop.
///
/// # Arguments
/// * `prompt_message` - Text shown before the cursor
/// * `default` - Value returned for an empty answer
/// * `input_validation` - Turns raw input into the accepted value
pub fn prompt_until_valid<T, F>(
    prompt_message: &str,
    default: Option<&str>,
    input_validation: F,
) -> Result<T, AppError>
where
    F: Fn(&str) -> Result<T, AppError>,
{
    loop {
        let mut text = Text::new(prompt_message);
        if let Some(default) = default {
            text = text.with_default(default);
        }
        let input: String = text.prompt()?;
        match input_validation(input.trim()) {
            Ok(value) => break Ok(value),
            Err(AppError::Validation(msg)) => println!("{}", msg.red()),
            Err(e) => return Err(e),
        }
    }
}

/// Parses a yes/no answer
pub fn parse_yes_no(input: &str) -> Result<bool, AppError> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(AppError::Validation("Invalid choice. Choices are (y/n)".to_string())),
    }
}

// Validate input helper functions

/// Validates a profile name
pub fn validate_profile_name(profile_name: &str) -> Result<(), AppError> {
    if profile_name.is_empty() {
        Err(AppError::Validation("Profile name cannot be empty".to_string()))
    } else if profile_name.chars().count() > MAX_PROFILE_NAME_LENGTH {
        Err(AppError::Validation(format!("Profile name too long (max {MAX_PROFILE_NAME_LENGTH} characters)")))
    } else if profile_name.chars().any(char::is_whitespace) {
        Err(AppError::Validation("Profile name cannot contain whitespace".to_string()))
    } else if profile_name == BACK_OPTION {
        Err(AppError::Validation(format!("Profile name cannot be '{BACK_OPTION}'")))
    } else {
        Ok(())
    }
}

/// Validates a git username
pub fn validate_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        Err(AppError::Validation("Name cannot be empty".to_string()))
    } else if name.chars().count() > MAX_NAME_LENGTH {
        Err(AppError::Validation(format!("Name too long (max {MAX_NAME_LENGTH} characters)")))
    } else {
        Ok(())
    }
}

/// Validates email input
pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.is_empty() {
        Err(AppError::Validation("Email cannot be empty".to_string()))
    } else if email.len() > MAX_EMAIL_LENGTH {
        Err(AppError::Validation(format!("Email too long (max {MAX_EMAIL_LENGTH} characters)")))
    } else if !email.validate_email() {
        Err(AppError::Validation("Invalid email format".to_string()))
    } else {
        Ok(())
    }
}
