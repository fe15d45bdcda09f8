use sha_crypt::{Sha512Params, sha512_simple};

use crate::error::{Error, ErrorKind, Result};
use crate::paths::SystemPaths;
use crate::runner::Runner;

/// Sets a user's password by handing `usermod -p` a SHA-512 crypt hash.
/// The hash is computed here so the cleartext never reaches a command line.
#[derive(Debug, Clone)]
pub struct ChangePass {
    pub password: String,
    pub login: String,
}

impl ChangePass {
    pub fn run(&self, _paths: &SystemPaths, runner: &Runner) -> Result<()> {
        if self.password.is_empty() {
            tracing::warn!("no password supplied; account left unchanged");
            return Ok(());
        }
        if self.login.trim().is_empty() {
            tracing::warn!("no login supplied; account left unchanged");
            return Ok(());
        }

        let hash = hash_password(&self.password)?;

        runner.run("usermod", &["-p", &hash, &self.login])?;
        tracing::info!(login = %self.login, "password updated");
        Ok(())
    }
}

/// A hashing failure means the inputs were unusable, not that a file
/// operation failed.
fn hash_password(password: &str) -> Result<String> {
    let params = Sha512Params::default();
    sha512_simple(password, &params).map_err(|e| {
        Error::new(
            ErrorKind::InvalidArgument,
            format!("failed to hash password: {e:?}"),
        )
    })
}
