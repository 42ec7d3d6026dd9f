use colored::Colorize;
use inquire::Select;

use crate::{
    cli::ProfileArgs,
    commands,
    error::{AppError, Scope},
    git::IdentityGateway,
    profile::{Profile, ProfileFilter},
    prompt,
    storage::ProfileStore,
};

/// Entry that leaves a selection without choosing a profile
pub const BACK_OPTION: &str = "back";

/// Runs interactive menu interface
pub fn run_menu(store: &mut ProfileStore, git: &dyn IdentityGateway) -> Result<(), AppError> {
    loop {
        let actions: Vec<&'static str> = vec![
            "initialize from origin",
            "set profile",
            "add profile",
            "update profile",
            "remove profile",
            "list profiles",
            "check credentials",
            "unset credentials",
            "quit",
        ];

        let action_selected: &'static str = Select::new(&format!("{}", "select action".blue()), actions)
            .prompt()?;

        match action_selected {
            "initialize from origin" => commands::init(store, git)?,
            "set profile" => menu_set_profile(store, git)?,
            "add profile" => menu_add_profile(store, git)?,
            "update profile" => menu_update_profile(store, git)?,
            "remove profile" => menu_remove_profile(store)?,
            "list profiles" => commands::list(store, None, &ProfileFilter::default())?,
            "check credentials" => commands::check(git, Scope::Local)?,
            "unset credentials" => commands::unset(git, Scope::Local)?,
            "quit" => {
                println!("{}", "quitting".yellow());
                break Ok(());
            }
            _ => unreachable!("unexpected input"),
        }
    }
}

/// Lets the user pick a profile, `None` when there are none or "back" was chosen
fn select_profile(store: &ProfileStore, message: &str) -> Result<Option<String>, AppError> {
    if store.all().is_empty() {
        println!("{}", "No profiles found.".yellow());
        return Ok(None);
    }

    let profile_names: Vec<String> = build_profile_list(store.all());
    let selected: String = Select::new(&format!("{}", message.blue()), profile_names).prompt()?;
    Ok((selected != BACK_OPTION).then_some(selected))
}

/// Menu for applying a profile to the current repository
fn menu_set_profile(store: &mut ProfileStore, git: &dyn IdentityGateway) -> Result<(), AppError> {
    if let Some(profile_name) = select_profile(store, "select profile to set:")? {
        commands::set(store, git, &profile_name, Scope::Local)?;
    }
    Ok(())
}

/// Menu for adding a new profile
fn menu_add_profile(store: &mut ProfileStore, git: &dyn IdentityGateway) -> Result<(), AppError> {
    let taken: Vec<String> = store.all().iter().map(|p| p.profile_name.clone()).collect();
    let profile_name: String = prompt::ask_profile_name(&taken)?;
    commands::add(store, git, &profile_name, ProfileArgs::default())
}

/// Menu for updating a profile
fn menu_update_profile(store: &mut ProfileStore, git: &dyn IdentityGateway) -> Result<(), AppError> {
    if let Some(profile_name) = select_profile(store, "select profile to update:")? {
        commands::update(store, git, &profile_name, ProfileArgs::default(), None)?;
    }
    Ok(())
}

/// Menu for removing a profile
fn menu_remove_profile(store: &mut ProfileStore) -> Result<(), AppError> {
    if let Some(profile_name) = select_profile(store, "select profile to remove:")? {
        commands::remove(store, Some(&profile_name), false, ProfileFilter::default())?;
    }
    Ok(())
}

/// Builds list of profile names for menu to display
fn build_profile_list(profiles: &[Profile]) -> Vec<String> {
    let mut profile_names: Vec<String> = profiles.iter()
        .map(|profile| profile.profile_name.clone())
        .collect();
    profile_names.push(BACK_OPTION.to_string());
    profile_names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_list_ends_with_back() {
        let profiles = vec![Profile {
            profile_name: "work".to_string(),
            name: "W".to_string(),
            email: "w@x.com".to_string(),
            origin: "x.com".to_string(),
            signing_key: None,
        }];
        assert_eq!(build_profile_list(&profiles), ["work", BACK_OPTION]);
        assert_eq!(build_profile_list(&[]), [BACK_OPTION]);
    }
}
