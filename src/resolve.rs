//! Picks the profile for the current repository by its origin and applies it.
//!
//! ```text
//! origin lookup -> profiles by origin
//!   0 match  -> confirm create -> add -> re-query -> first
//!   1 match  -> that one
//!   n match  -> ask for a profile name until one matches
//! -> identity already equal? nothing to do : write name, write email
//! ```

use tracing::{debug, info, warn};

use crate::{
    error::{AppError, Scope},
    git::IdentityGateway,
    profile::Profile,
    storage::ProfileStore,
};

/// Interactive decisions the resolution needs from the user
pub trait Prompter {
    /// Whether to create a profile for an origin nothing matches
    fn confirm_create(&mut self, origin: &str) -> Result<bool, AppError>;

    /// Collects a new profile scoped to `origin`
    fn create_profile(&mut self, origin: &str) -> Result<Profile, AppError>;

    /// Reads one raw profile-name answer, `candidates` are all profiles for the origin
    fn choose_profile(&mut self, candidates: &[Profile]) -> Result<String, AppError>;

    /// Called when an answer to [`Prompter::choose_profile`] matched nothing
    fn reject_choice(&mut self, input: &str);
}

/// How a resolution ended
#[derive(Debug)]
pub enum Resolution {
    /// No profile for the origin and the user declined to create one
    Aborted { origin: String },
    /// The identity already equals the profile, nothing written
    AlreadySet { profile: Profile },
    /// Both writes were attempted; `failures` holds the ones that failed
    Applied { profile: Profile, failures: Vec<AppError> },
}

/// Candidate whose profile name equals `input` exactly
pub fn pick_candidate<'a>(candidates: &'a [Profile], input: &str) -> Option<&'a Profile> {
    candidates.iter().find(|p| p.profile_name == input)
}

/// Whether the identity at `scope` already equals the profile's name and email
///
/// Unreadable or unset fields count as different.
pub fn credentials_already_set<G>(git: &G, profile: &Profile, scope: Scope) -> bool
where
    G: IdentityGateway + ?Sized,
{
    let current_name: Option<String> = git.get_name(scope).ok();
    let current_email: Option<String> = git.get_email(scope).ok();
    current_name.as_deref() == Some(profile.name.as_str())
        && current_email.as_deref() == Some(profile.email.as_str())
}

/// Writes the profile's name then email at `scope`
///
/// A failed name write does not stop the email write.
pub fn apply_profile<G>(git: &G, profile: Profile, scope: Scope) -> Resolution
where
    G: IdentityGateway + ?Sized,
{
    if credentials_already_set(git, &profile, scope) {
        debug!(profile = %profile.profile_name, "identity already matches");
        return Resolution::AlreadySet { profile };
    }

    let failures: Vec<AppError> = [
        git.set_name(&profile.name, scope),
        git.set_email(&profile.email, scope),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect();

    for failure in &failures {
        warn!(profile = %profile.profile_name, error = %failure, "identity write failed");
    }
    Resolution::Applied { profile, failures }
}

/// Asks until the answer names one of `candidates`
fn choose<P>(prompter: &mut P, candidates: &[Profile]) -> Result<Profile, AppError>
where
    P: Prompter + ?Sized,
{
    loop {
        let input: String = prompter.choose_profile(candidates)?;
        if let Some(profile) = pick_candidate(candidates, input.trim()) {
            break Ok(profile.clone());
        }
        debug!(input = %input.trim(), "choice matched no candidate");
        prompter.reject_choice(&input);
    }
}

/// Applies the profile matching the current repository's origin to its local identity
///
/// Fails when the origin cannot be read, when creating a profile fails, or when
/// a prompt fails. Identity write failures are returned inside [`Resolution::Applied`].
pub fn initialize_from_origin<G, P>(
    store: &mut ProfileStore,
    git: &G,
    prompter: &mut P,
) -> Result<Resolution, AppError>
where
    G: IdentityGateway + ?Sized,
    P: Prompter + ?Sized,
{
    let origin: String = git.origin()?;
    let candidates: Vec<Profile> = store.by_origin(&origin).into_iter().cloned().collect();
    info!(%origin, matches = candidates.len(), "resolving profile by origin");

    let selected: Profile = match candidates.as_slice() {
        [] => {
            if !prompter.confirm_create(&origin)? {
                return Ok(Resolution::Aborted { origin });
            }
            let created: Profile = prompter.create_profile(&origin)?;
            store.add(created)?;
            store
                .by_origin(&origin)
                .first()
                .map(|p| (*p).clone())
                .ok_or_else(|| AppError::Validation(format!("new profile does not belong to origin {origin}")))?
        }
        [only] => only.clone(),
        many => choose(prompter, many)?,
    };

    Ok(apply_profile(git, selected, Scope::Local))
}
