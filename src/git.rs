use std::{
    ffi::OsString,
    path::PathBuf,
    process::{Command, Output, Stdio},
};

use tracing::debug;

use crate::{
    error::{AppError, Field, Scope},
    origin,
};

/// Exit status `git config --get` uses for a key with no value
const GIT_CONFIG_KEY_ABSENT: i32 = 1;

/// Remote-origin config key
const ORIGIN_URL_KEY: &str = "remote.origin.url";

/// Boundary to the identity stored in git config
///
/// Implementors supply the raw reads and writes; the provided methods layer the
/// "not set" and "nothing to unset" semantics on top.
pub trait IdentityGateway {
    /// Whether the working directory is inside a work tree. Any failure counts as `false`.
    fn is_inside_repository(&self) -> bool;

    /// Normalized host of the `origin` remote
    fn origin(&self) -> Result<String, AppError>;

    /// Reads a field, `Ok(None)` when the key is absent at that scope
    fn read(&self, field: Field, scope: Scope) -> Result<Option<String>, AppError>;

    /// Writes a field at the given scope
    fn write(&self, field: Field, value: &str, scope: Scope) -> Result<(), AppError>;

    /// Removes a field at the given scope without checking it exists
    fn remove(&self, field: Field, scope: Scope) -> Result<(), AppError>;

    /// Reads a field, failing with [`AppError::NotSet`] when absent
    fn get(&self, field: Field, scope: Scope) -> Result<String, AppError> {
        self.read(field, scope)?
            .ok_or(AppError::NotSet { field, scope })
    }

    fn get_name(&self, scope: Scope) -> Result<String, AppError> {
        self.get(Field::Name, scope)
    }

    fn get_email(&self, scope: Scope) -> Result<String, AppError> {
        self.get(Field::Email, scope)
    }

    fn set_name(&self, value: &str, scope: Scope) -> Result<(), AppError> {
        self.write(Field::Name, value, scope)
    }

    fn set_email(&self, value: &str, scope: Scope) -> Result<(), AppError> {
        self.write(Field::Email, value, scope)
    }

    /// Removes a field, failing with [`AppError::NothingToUnset`] when it has no value
    fn unset(&self, field: Field, scope: Scope) -> Result<(), AppError> {
        match self.get(field, scope) {
            Ok(_) => self.remove(field, scope),
            Err(AppError::NotSet { field, scope }) => Err(AppError::NothingToUnset { field, scope }),
            Err(e) => Err(e),
        }
    }

    fn unset_name(&self, scope: Scope) -> Result<(), AppError> {
        self.unset(Field::Name, scope)
    }

    fn unset_email(&self, scope: Scope) -> Result<(), AppError> {
        self.unset(Field::Email, scope)
    }
}

/// [`IdentityGateway`] backed by the git executable
#[derive(Debug, Clone)]
pub struct Git {
    program: OsString,
    work_dir: Option<PathBuf>,
}

impl Default for Git {
    fn default() -> Self {
        Self::new("git")
    }
}

impl Git {
    /// Gateway invoking `program` in the process working directory
    pub fn new(program: impl Into<OsString>) -> Self {
        Self { program: program.into(), work_dir: None }
    }

    /// Runs every command inside `dir` instead of the process working directory
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    /// Spawns git with `args` and waits for it
    ///
    /// # Arguments
    /// * `args` - Arguments passed after the program name
    fn run(&self, args: &[&str]) -> Result<Output, AppError> {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null());
        if let Some(dir) = &self.work_dir {
            command.current_dir(dir);
        }

        debug!(args = ?args, "running git");
        command.output().map_err(|e| AppError::ExternalTool {
            command: self.describe(args),
            message: e.to_string(),
        })
    }

    /// Runs git and fails on any non-zero exit status
    fn run_checked(&self, args: &[&str]) -> Result<String, AppError> {
        let output: Output = self.run(args)?;
        if !output.status.success() {
            return Err(self.failure(args, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Runs a `git config --get` style lookup, mapping exit status 1 to `None`
    fn lookup(&self, args: &[&str]) -> Result<Option<String>, AppError> {
        let output: Output = self.run(args)?;
        if output.status.success() {
            return Ok(Some(String::from_utf8_lossy(&output.stdout).trim().to_string()));
        }
        if output.status.code() == Some(GIT_CONFIG_KEY_ABSENT) {
            debug!(args = ?args, "config key absent");
            return Ok(None);
        }
        Err(self.failure(args, &output))
    }

    fn failure(&self, args: &[&str], output: &Output) -> AppError {
        let stderr: String = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() { output.status.to_string() } else { stderr };
        AppError::ExternalTool { command: self.describe(args), message }
    }

    fn describe(&self, args: &[&str]) -> String {
        format!("{} {}", self.program.to_string_lossy(), args.join(" "))
    }

    /// Local scope needs a work tree; global scope always passes
    fn require_repository(&self, scope: Scope) -> Result<(), AppError> {
        if scope == Scope::Local && !self.is_inside_repository() {
            return Err(AppError::NotInGitRepository);
        }
        Ok(())
    }
}

impl IdentityGateway for Git {
    fn is_inside_repository(&self) -> bool {
        self.run_checked(&["rev-parse", "--is-inside-work-tree"])
            .is_ok_and(|out| out == "true")
    }

    fn origin(&self) -> Result<String, AppError> {
        self.require_repository(Scope::Local)?;
        let url: String = self
            .lookup(&["config", "--get", ORIGIN_URL_KEY])?
            .ok_or(AppError::OriginNotConfigured)?;
        Ok(origin::normalize(&url).to_string())
    }

    fn read(&self, field: Field, scope: Scope) -> Result<Option<String>, AppError> {
        self.require_repository(scope)?;
        self.lookup(&["config", "--get", scope.flag(), field.key()])
    }

    fn write(&self, field: Field, value: &str, scope: Scope) -> Result<(), AppError> {
        self.require_repository(scope)?;
        self.run_checked(&["config", scope.flag(), field.key(), value])?;
        Ok(())
    }

    fn remove(&self, field: Field, scope: Scope) -> Result<(), AppError> {
        self.require_repository(scope)?;
        self.run_checked(&["config", scope.flag(), "--unset", field.key()])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git_available() -> bool {
        Command::new("git").arg("--version").output().is_ok_and(|o| o.status.success())
    }

    fn scratch_repo() -> (TempDir, Git) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let git = Git::default().in_dir(dir.path());
        git.run_checked(&["init", "--quiet"]).expect("failed to init repo");
        (dir, git)
    }

    #[test]
    fn outside_repository() {
        if !git_available() {
            return;
        }
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let git = Git::default().in_dir(dir.path());

        assert!(!git.is_inside_repository());
        assert!(matches!(git.origin(), Err(AppError::NotInGitRepository)));
        assert!(matches!(git.get_name(Scope::Local), Err(AppError::NotInGitRepository)));
        assert!(matches!(git.set_email("a@x.com", Scope::Local), Err(AppError::NotInGitRepository)));
    }

    #[test]
    fn local_identity_lifecycle() {
        if !git_available() {
            return;
        }
        let (_dir, git) = scratch_repo();
        assert!(git.is_inside_repository());

        assert!(matches!(
            git.get_name(Scope::Local),
            Err(AppError::NotSet { field: Field::Name, scope: Scope::Local })
        ));

        git.set_name("Ada Lovelace", Scope::Local).unwrap();
        git.set_email("ada@example.com", Scope::Local).unwrap();
        assert_eq!(git.get_name(Scope::Local).unwrap(), "Ada Lovelace");
        assert_eq!(git.get_email(Scope::Local).unwrap(), "ada@example.com");

        git.unset_name(Scope::Local).unwrap();
        assert!(git.read(Field::Name, Scope::Local).unwrap().is_none());
        assert_eq!(git.get_email(Scope::Local).unwrap(), "ada@example.com");

        assert!(matches!(
            git.unset_name(Scope::Local),
            Err(AppError::NothingToUnset { field: Field::Name, scope: Scope::Local })
        ));
    }

    #[test]
    fn origin_is_normalized() {
        if !git_available() {
            return;
        }
        let (_dir, git) = scratch_repo();
        assert!(matches!(git.origin(), Err(AppError::OriginNotConfigured)));

        git.run_checked(&["remote", "add", "origin", "git@gitlab.com:team/repo.git"])
            .unwrap();
        assert_eq!(git.origin().unwrap(), "gitlab.com");
    }

    #[test]
    fn missing_program_is_external_tool_error() {
        let git = Git::new("git-profile-no-such-program");
        assert!(!git.is_inside_repository());
        assert!(matches!(
            git.read(Field::Name, Scope::Global),
            Err(AppError::ExternalTool { .. })
        ));
    }

    /// Gateway whose `config` subcommand is the shell script `body`
    ///
    /// `sh` is the program and the script sits in the work dir under the name
    /// `config`, so `sh config --get ...` runs it without needing an exec bit.
    #[cfg(unix)]
    fn scripted_config(body: &str) -> (TempDir, Git) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        std::fs::write(dir.path().join("config"), body).expect("failed to write script");
        let git = Git::new("sh").in_dir(dir.path());
        (dir, git)
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_one_is_absent() {
        let (_dir, git) = scripted_config("exit 1\n");
        assert!(git.read(Field::Name, Scope::Global).unwrap().is_none());
        assert!(matches!(
            git.get_email(Scope::Global),
            Err(AppError::NotSet { field: Field::Email, scope: Scope::Global })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn other_exit_status_is_external_tool_error() {
        let (_dir, git) = scripted_config("echo boom >&2\nexit 2\n");
        match git.read(Field::Name, Scope::Global) {
            Err(AppError::ExternalTool { command, message }) => {
                assert!(command.ends_with("config --get --global user.name"), "{command}");
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn undecodable_stderr_is_external_tool_error() {
        let (_dir, git) = scripted_config("printf '\\377\\376 bad' >&2\nexit 3\n");
        match git.write(Field::Email, "a@x.com", Scope::Global) {
            Err(AppError::ExternalTool { command, message }) => {
                assert!(command.contains("user.email"), "{command}");
                assert!(message.ends_with(" bad"), "{message:?}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            git.read(Field::Name, Scope::Global),
            Err(AppError::ExternalTool { .. })
        ));
    }
}
