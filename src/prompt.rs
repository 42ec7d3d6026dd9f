use colored::Colorize;

use crate::{
    error::AppError,
    origin,
    profile::Profile,
    resolve::Prompter,
    storage::ProfileStore,
    validation::{parse_yes_no, prompt_until_valid, validate_email, validate_name, validate_profile_name},
};

/// Asks a yes/no question until the answer parses
pub fn ask_yes_no(question: &str) -> Result<bool, AppError> {
    prompt_until_valid(&format!("{} (y/n):", question.blue()), None, parse_yes_no)
}

/// Asks for a profile name not in `taken`
pub fn ask_profile_name(taken: &[String]) -> Result<String, AppError> {
    prompt_until_valid(&format!("{}", "Profile name:".blue()), None, |input| {
        validate_profile_name(input)?;
        check_name_free(input, taken)?;
        Ok(input.to_string())
    })
}

/// Fails when `profile_name` is already used by another profile
pub fn check_name_free(profile_name: &str, taken: &[String]) -> Result<(), AppError> {
    if taken.iter().any(|name| name == profile_name) {
        return Err(AppError::Validation(format!("Profile {profile_name} already exists")));
    }
    Ok(())
}

pub fn ask_name(default: Option<&str>) -> Result<String, AppError> {
    prompt_until_valid(&format!("{}", "Name:".blue()), default, |input| {
        validate_name(input)?;
        Ok(input.to_string())
    })
}

pub fn ask_email(default: Option<&str>) -> Result<String, AppError> {
    prompt_until_valid(&format!("{}", "E-mail:".blue()), default, |input| {
        validate_email(input)?;
        Ok(input.to_string())
    })
}

/// Asks for a signing key, an empty answer keeps `default`
pub fn ask_signing_key(default: Option<&str>) -> Result<Option<String>, AppError> {
    let message = match default {
        Some(key) => format!("Signing key (enter to keep {key}):"),
        None => "Signing key (enter to skip):".to_string(),
    };
    prompt_until_valid(&format!("{}", message.blue()), None, |input| {
        Ok(if input.is_empty() { default.map(str::to_string) } else { Some(input.to_string()) })
    })
}

/// Asks for an origin and normalizes the answer to a host
pub fn ask_origin(default: Option<&str>) -> Result<String, AppError> {
    prompt_until_valid(&format!("{}", "Origin:".blue()), default, |input| {
        let host = origin::normalize(input);
        if host.is_empty() {
            return Err(AppError::Validation("Origin cannot be empty".to_string()));
        }
        Ok(host.to_string())
    })
}

/// Prints profiles separated by blank lines
pub fn print_profiles<'a>(profiles: impl IntoIterator<Item = &'a Profile>) {
    for profile in profiles {
        println!("{profile}\n");
    }
}

/// [`Prompter`] reading from the terminal
pub struct TerminalPrompter {
    taken: Vec<String>,
    listed: bool,
}

impl TerminalPrompter {
    /// Prompter that refuses profile names already in `store`
    pub fn new(store: &ProfileStore) -> Self {
        Self {
            taken: store.all().iter().map(|p| p.profile_name.clone()).collect(),
            listed: false,
        }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm_create(&mut self, origin: &str) -> Result<bool, AppError> {
        println!("{} {}", "No profiles found for origin".yellow(), origin);
        ask_yes_no("Would you like to create a new one?")
    }

    fn create_profile(&mut self, origin: &str) -> Result<Profile, AppError> {
        let profile_name: String = ask_profile_name(&self.taken)?;
        let name: String = ask_name(None)?;
        let email: String = ask_email(None)?;
        let signing_key: Option<String> = ask_signing_key(None)?;
        Ok(Profile { profile_name, name, email, origin: origin.to_string(), signing_key })
    }

    fn choose_profile(&mut self, candidates: &[Profile]) -> Result<String, AppError> {
        if !self.listed {
            println!("{}", "Multiple profiles found for this origin".yellow());
            print_profiles(candidates);
            self.listed = true;
        }
        Ok(inquire::Text::new(&format!("{}", "Please pick a profile (enter the profile name):".blue()))
            .prompt()?)
    }

    fn reject_choice(&mut self, _input: &str) {
        println!("{}", "Invalid choice. Please try again.".red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taken_names_are_refused() {
        let taken = vec!["work".to_string(), "home".to_string()];
        assert!(check_name_free("oss", &taken).is_ok());
        assert!(matches!(check_name_free("work", &taken), Err(AppError::Validation(_))));
    }

    #[test]
    fn prompter_snapshots_store_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ProfileStore::open(dir.path().join("profiles.json")).unwrap();
        store
            .add(Profile {
                profile_name: "work".to_string(),
                name: "W".to_string(),
                email: "w@x.com".to_string(),
                origin: "x.com".to_string(),
                signing_key: None,
            })
            .unwrap();

        let prompter = TerminalPrompter::new(&store);
        assert_eq!(prompter.taken, ["work"]);
        assert!(!prompter.listed);
    }
}
