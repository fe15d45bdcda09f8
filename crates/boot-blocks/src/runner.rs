use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc;

use crate::error::{Error, Result};
use crate::log_sanitize::sanitize_log_line;

/// Runs the external post-action commands a block fires after its file
/// write. Every exit status is surfaced to the caller; none are discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct Runner {
    pub dry_run: bool,
}

impl Runner {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        if self.dry_run {
            tracing::info!("DRY-RUN: {} {}", program, args.join(" "));
            return Ok(());
        }
        let mut cmd = Command::new(program);
        cmd.args(args);
        self.run_cmd(cmd)
    }

    /// Spawns with stdin detached (blocks run without a controlling TTY)
    /// and streams stdout/stderr line-by-line through the sanitizer into
    /// the log while the command runs.
    pub fn run_cmd(&self, mut cmd: Command) -> Result<()> {
        let program = cmd.get_program().to_string_lossy().into_owned();
        if self.dry_run {
            tracing::info!("DRY-RUN: {:?}", cmd);
            return Ok(());
        }

        let mut child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::command(format!("failed to spawn {program}: {e}")))?;

        let (tx, rx) = mpsc::channel::<String>();
        if let Some(out) = child.stdout.take() {
            let tx = tx.clone();
            std::thread::spawn(move || stream_lines(out, tx));
        }
        if let Some(err) = child.stderr.take() {
            let tx = tx.clone();
            std::thread::spawn(move || stream_lines(err, tx));
        }
        drop(tx);

        for line in rx {
            let line = sanitize_log_line(&line);
            if line.is_empty() {
                continue;
            }
            tracing::info!(command = %program, "{line}");
        }

        let status = child
            .wait()
            .map_err(|e| Error::command(format!("failed to wait for {program}: {e}")))?;
        if !status.success() {
            return Err(Error::command(format!("{program} failed: {status}")));
        }
        Ok(())
    }
}

fn stream_lines<R: Read>(reader: R, tx: mpsc::Sender<String>) {
    for line in BufReader::new(reader).lines() {
        match line {
            Ok(l) => {
                if tx.send(l).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_skips_execution() {
        let runner = Runner::new(true);
        // Would fail to spawn if actually executed.
        runner
            .run("/definitely/not/a/real/binary", &["--flag"])
            .expect("dry-run never spawns");
    }

    #[test]
    fn missing_binary_surfaces_as_command_failure() {
        let runner = Runner::new(false);
        let err = runner
            .run("/definitely/not/a/real/binary", &[])
            .expect_err("spawn must fail");
        assert_eq!(err.kind(), crate::ErrorKind::ExternalCommandFailed);
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_an_error() {
        let runner = Runner::new(false);
        let err = runner.run("false", &[]).expect_err("false exits 1");
        assert_eq!(err.kind(), crate::ErrorKind::ExternalCommandFailed);
        runner.run("true", &[]).expect("true exits 0");
    }
}
