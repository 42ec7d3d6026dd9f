use colored::Colorize;

use crate::{
    cli::ProfileArgs,
    error::{AppError, Field, Scope},
    git::IdentityGateway,
    origin,
    profile::{Profile, ProfileFilter},
    prompt::{self, TerminalPrompter},
    resolve::{self, Resolution},
    storage::ProfileStore,
    validation::{validate_email, validate_name, validate_profile_name},
};

/// Origin flag value meaning "the current repository's origin"
const AUTO_ORIGIN: &str = "auto";

/// Resolves an `--origin` flag value to a host
///
/// `auto` reads the current repository's origin and fails the same way that read does.
fn origin_from_flag(value: &str, git: &dyn IdentityGateway) -> Result<String, AppError> {
    if value == AUTO_ORIGIN {
        return git.origin();
    }
    Ok(origin::normalize(value).to_string())
}

/// Prints the outcome of applying a profile
fn report_resolution(resolution: Resolution) {
    match resolution {
        Resolution::Aborted { origin } => {
            println!("{} {}. {}", "No profile for origin".yellow(), origin, "Nothing to do.".yellow())
        }
        Resolution::AlreadySet { profile } => println!(
            "{} {}. {}",
            "Repository already uses profile".yellow(),
            profile.profile_name,
            "Nothing to do.".yellow()
        ),
        Resolution::Applied { profile, failures } => {
            for failure in &failures {
                println!("{}", failure.to_string().red());
            }
            if failures.is_empty() {
                println!("{} {}", "Credentials set from profile".green(), profile.profile_name);
            } else {
                println!("{} {}", "Credentials only partially set from profile".red(), profile.profile_name);
            }
        }
    }
}

/// Sets the local identity from the profile matching the repository origin
pub fn init(store: &mut ProfileStore, git: &dyn IdentityGateway) -> Result<(), AppError> {
    let mut prompter = TerminalPrompter::new(store);
    let resolution: Resolution = resolve::initialize_from_origin(store, git, &mut prompter)?;
    report_resolution(resolution);
    Ok(())
}

/// Adds a profile, prompting for every field not passed in `fields`
///
/// # Arguments
/// * `profile_name` - Unique name of the new profile
/// * `fields` - Values given on the command line
pub fn add(
    store: &mut ProfileStore,
    git: &dyn IdentityGateway,
    profile_name: &str,
    fields: ProfileArgs,
) -> Result<(), AppError> {
    validate_profile_name(profile_name)?;
    if store.get_by_name(profile_name).is_some() {
        return Err(AppError::DuplicateProfile(profile_name.to_string()));
    }

    let name: String = match fields.name {
        Some(name) => {
            validate_name(&name)?;
            name
        }
        None => prompt::ask_name(None)?,
    };
    let email: String = match fields.email {
        Some(email) => {
            validate_email(&email)?;
            email
        }
        None => prompt::ask_email(None)?,
    };
    let signing_key: Option<String> = match fields.signing_key {
        Some(key) => Some(key),
        None => prompt::ask_signing_key(None)?,
    };

    let origin: String = match fields.origin {
        Some(value) => origin_from_flag(&value, git)?,
        // only a suggestion, so a missing origin just leaves the prompt empty
        None => prompt::ask_origin(git.origin().ok().as_deref())?,
    };

    store.add(Profile {
        profile_name: profile_name.to_string(),
        name,
        email,
        origin: origin.clone(),
        signing_key,
    })?;
    println!("{} {} for origin {}", "Added profile:".green(), profile_name, origin);
    Ok(())
}

/// Updates a profile, prompting with the old values as defaults for fields not passed
pub fn update(
    store: &mut ProfileStore,
    git: &dyn IdentityGateway,
    profile_name: &str,
    fields: ProfileArgs,
    rename: Option<String>,
) -> Result<(), AppError> {
    let old: Profile = store
        .get_by_name(profile_name)
        .cloned()
        .ok_or_else(|| AppError::ProfileNotFound(profile_name.to_string()))?;

    let new_profile_name: String = match rename {
        Some(new_name) => {
            validate_profile_name(&new_name)?;
            if new_name != old.profile_name && store.get_by_name(&new_name).is_some() {
                return Err(AppError::DuplicateProfile(new_name));
            }
            new_name
        }
        None => old.profile_name.clone(),
    };
    let name: String = match fields.name {
        Some(name) => {
            validate_name(&name)?;
            name
        }
        None => prompt::ask_name(Some(&old.name))?,
    };
    let email: String = match fields.email {
        Some(email) => {
            validate_email(&email)?;
            email
        }
        None => prompt::ask_email(Some(&old.email))?,
    };
    let signing_key: Option<String> = match fields.signing_key {
        Some(key) => Some(key),
        None => prompt::ask_signing_key(old.signing_key.as_deref())?,
    };
    let origin: String = match fields.origin {
        Some(value) => origin_from_flag(&value, git)?,
        None => prompt::ask_origin(Some(&old.origin))?,
    };

    store.edit(
        profile_name,
        Profile { profile_name: new_profile_name.clone(), name, email, origin, signing_key },
    )?;
    println!("{} {}", "Profile updated:".green(), new_profile_name);
    Ok(())
}

/// Removes one profile by name, every profile, or the profiles matching `filter`
pub fn remove(
    store: &mut ProfileStore,
    profile_name: Option<&str>,
    all: bool,
    filter: ProfileFilter,
) -> Result<(), AppError> {
    if all {
        store.clear()?;
        println!("{}", "All profiles removed.".green());
        return Ok(());
    }

    if let Some(profile_name) = profile_name {
        store.delete(profile_name)?;
        println!("{} {}", "Profile removed:".green(), profile_name);
        return Ok(());
    }

    if filter.is_empty() {
        return Err(AppError::Validation(
            "provide a profile name, --all or at least one filter".to_string(),
        ));
    }

    let matching: Vec<String> = store
        .filter(&filter)
        .into_iter()
        .map(|p| p.profile_name.clone())
        .collect();
    if matching.is_empty() {
        println!("{}", "No profiles to remove.".yellow());
        return Ok(());
    }
    for profile_name in &matching {
        store.delete(profile_name)?;
        println!("{} {}", "Profile removed:".green(), profile_name);
    }
    println!("{} {}", "Profiles removed:".green(), matching.len());
    Ok(())
}

/// Shows one profile or every profile matching `filter`
pub fn list(store: &ProfileStore, profile_name: Option<&str>, filter: &ProfileFilter) -> Result<(), AppError> {
    if let Some(profile_name) = profile_name {
        let profile: &Profile = store
            .get_by_name(profile_name)
            .ok_or_else(|| AppError::ProfileNotFound(profile_name.to_string()))?;
        prompt::print_profiles([profile]);
        return Ok(());
    }

    let profiles: Vec<&Profile> = store.filter(filter);
    if profiles.is_empty() {
        println!("{}", "No profiles to display.".yellow());
    } else {
        prompt::print_profiles(profiles);
    }
    Ok(())
}

/// Applies the named profile, offering to create it when unknown
pub fn set(
    store: &mut ProfileStore,
    git: &dyn IdentityGateway,
    profile_name: &str,
    scope: Scope,
) -> Result<(), AppError> {
    if store.get_by_name(profile_name).is_none() {
        println!("{} {}", "Profile doesn't exist:".yellow(), profile_name);
        if !prompt::ask_yes_no("Would you like to create it?")? {
            println!("{}", "Nothing to do.".yellow());
            return Ok(());
        }
        add(store, git, profile_name, ProfileArgs::default())?;
    }

    let profile: Profile = store
        .get_by_name(profile_name)
        .cloned()
        .ok_or_else(|| AppError::ProfileNotFound(profile_name.to_string()))?;

    if scope == Scope::Local {
        match git.origin() {
            Ok(repo_origin) if repo_origin != profile.origin => {
                println!("{}", "warning: profile origin and repository origin don't match".yellow());
                println!("\tRepository origin: {repo_origin}");
                println!("\tProfile origin: {}\n", profile.origin);
            }
            Ok(_) | Err(AppError::OriginNotConfigured) => {}
            Err(e) => return Err(e),
        }
    }

    report_resolution(resolve::apply_profile(git, profile, scope));
    Ok(())
}

/// Writes a name and email without storing a profile
pub fn tempset(
    git: &dyn IdentityGateway,
    name: Option<String>,
    email: Option<String>,
    scope: Scope,
) -> Result<(), AppError> {
    for (field, value) in [(Field::Name, name), (Field::Email, email)] {
        let current: Option<String> = git.read(field, scope)?;
        let value: String = match value {
            Some(value) => value,
            None => match field {
                Field::Name => prompt::ask_name(current.as_deref())?,
                Field::Email => prompt::ask_email(current.as_deref())?,
            },
        };
        if current.as_deref() != Some(value.as_str()) {
            git.write(field, &value, scope)?;
        }
    }
    println!("{}", "Credentials set successfully".green());
    Ok(())
}

/// Unsets name and email; both are attempted and each failure is reported
pub fn unset(git: &dyn IdentityGateway, scope: Scope) -> Result<(), AppError> {
    if scope == Scope::Local {
        println!("{}", "warning: git will default to global credentials without local configuration".yellow());
    }
    for result in [git.unset_name(scope), git.unset_email(scope)] {
        if let Err(e) = result {
            println!("{}", e.to_string().red());
        }
    }
    println!("{}", "Process complete.".green());
    Ok(())
}

/// Shows the configured name and email of `scope`
pub fn check(git: &dyn IdentityGateway, scope: Scope) -> Result<(), AppError> {
    match git.get_name(scope) {
        Ok(name) => println!("{} {}", "Current name:".blue(), name),
        Err(e) => println!("{}", e.to_string().red()),
    }
    match git.get_email(scope) {
        Ok(email) => println!("{} {}", "Current email:".blue(), email),
        Err(e) => println!("{}", e.to_string().red()),
    }
    Ok(())
}
