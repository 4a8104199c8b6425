//! Child process execution
//!
//! Each step runs as its own process with the pipeline base directory as its
//! working directory. Output is inherited rather than captured, so the
//! child's stdout/stderr reach the operator as they are written.
//!
//! A step with a timeout gets its own process group on Unix, so whatever it
//! spawned is killed along with it when the limit is hit or the run is
//! interrupted.
//!
//! Example step configurations:
//! ```yaml
//! - description: Native binary
//!   run: bin/dq-summary
//!
//! - description: Script
//!   run: etl_pipeline.py
//!   interpreter: python3
//!   args: ["--strict"]
//!   timeout: 300
//! ```

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Instant;

use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::engine::error::OrchestratorError;
use crate::engine::result::StepOutcome;
use crate::workflow::Step;

/// Run a step to completion and report its exit code.
///
/// A non-zero exit is an `Ok` outcome; the caller decides what a failure
/// means. Errors are reserved for steps that never ran to completion.
pub async fn run_step(step: &Step, working_dir: &Path) -> Result<StepOutcome, OrchestratorError> {
    if !step.reference.exists() {
        return Err(OrchestratorError::MissingExecutable(step.reference.clone()));
    }

    let (program, mut cmd) = match &step.interpreter {
        Some(interpreter) => {
            let mut cmd = Command::new(interpreter);
            cmd.arg(&step.reference);
            (interpreter.clone(), cmd)
        }
        None => (
            step.reference.display().to_string(),
            Command::new(&step.reference),
        ),
    };

    cmd.args(&step.args)
        .current_dir(working_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    #[cfg(unix)]
    {
        if step.timeout.is_some() {
            cmd.process_group(0);
        }
    }

    info!("Executing step {}: {}", step.number, step.reference.display());

    let start = Instant::now();
    let mut child = cmd.spawn().map_err(|e| OrchestratorError::Spawn {
        program: program.clone(),
        source: e,
    })?;

    let status = match step.timeout {
        Some(limit) => tokio::select! {
            status = child.wait() => status,
            _ = tokio::time::sleep(limit) => {
                warn!("Step {} exceeded {:?}, killing", step.number, limit);
                kill_step(&mut child, step.number).await;
                return Err(OrchestratorError::StepTimedOut {
                    step: step.number,
                    secs: limit.as_secs(),
                });
            }
            Ok(()) = tokio::signal::ctrl_c() => {
                warn!("Interrupted during step {}, killing", step.number);
                kill_step(&mut child, step.number).await;
                return Err(OrchestratorError::Interrupted { step: step.number });
            }
        },
        None => child.wait().await,
    }
    .map_err(|e| OrchestratorError::Spawn { program, source: e })?;

    let outcome = StepOutcome {
        step: step.number,
        exit_code: exit_code(status),
        elapsed: start.elapsed(),
    };
    debug!("Step {} finished: {:?}", step.number, outcome);
    Ok(outcome)
}

/// Kill a step and everything in its process group, then reap it
async fn kill_step(child: &mut Child, step: usize) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        if let Some(pid) = child.id() {
            if let Err(e) = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
                warn!("Failed to kill process group of step {}: {}", step, e);
            }
        }
    }

    if let Err(e) = child.kill().await {
        warn!("Failed to kill step {}: {}", step, e);
    }
}

/// Run a helper command (requirement check or installer) with its output
/// discarded, returning its exit code.
pub async fn run_quiet(argv: &[String], working_dir: &Path) -> Result<i32, OrchestratorError> {
    let Some((program, args)) = argv.split_first() else {
        return Err(OrchestratorError::Spawn {
            program: String::new(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
        });
    };

    debug!("Running {:?}", argv);
    let status = Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|e| OrchestratorError::Spawn {
            program: program.clone(),
            source: e,
        })?;

    Ok(exit_code(status))
}

/// Exit code of a finished child; signals map to `128 + signal` on Unix.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn sh_step(dir: &Path, number: usize, body: &str) -> Step {
        let script = dir.join(format!("step{}.sh", number));
        fs::write(&script, body).unwrap();
        Step {
            number,
            description: format!("step {}", number),
            reference: script,
            interpreter: Some("sh".to_string()),
            args: Vec::new(),
            timeout: None,
        }
    }

    #[tokio::test]
    async fn test_successful_step() {
        let dir = tempdir().unwrap();
        let step = sh_step(dir.path(), 1, "exit 0\n");

        let outcome = run_step(&step, dir.path()).await.unwrap();
        assert!(outcome.success());
        assert_eq!(outcome.step, 1);
    }

    #[tokio::test]
    async fn test_exit_code_is_reported() {
        let dir = tempdir().unwrap();
        let step = sh_step(dir.path(), 2, "exit 3\n");

        let outcome = run_step(&step, dir.path()).await.unwrap();
        assert!(!outcome.success());
        assert_eq!(outcome.exit_code, 3);
    }

    #[tokio::test]
    async fn test_runs_in_working_dir() {
        let dir = tempdir().unwrap();
        let step = sh_step(dir.path(), 1, "touch marker\n");

        run_step(&step, dir.path()).await.unwrap();
        assert!(dir.path().join("marker").exists());
    }

    #[tokio::test]
    async fn test_args_are_passed() {
        let dir = tempdir().unwrap();
        let mut step = sh_step(dir.path(), 1, "echo \"$1\" > arg.txt\n");
        step.args = vec!["hello".to_string()];

        run_step(&step, dir.path()).await.unwrap();
        let written = fs::read_to_string(dir.path().join("arg.txt")).unwrap();
        assert_eq!(written.trim(), "hello");
    }

    #[tokio::test]
    async fn test_missing_executable() {
        let dir = tempdir().unwrap();
        let step = Step {
            number: 1,
            description: "missing".to_string(),
            reference: dir.path().join("nope.sh"),
            interpreter: None,
            args: Vec::new(),
            timeout: None,
        };

        let err = run_step(&step, dir.path()).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::MissingExecutable(p) if p == dir.path().join("nope.sh")));
    }

    #[tokio::test]
    async fn test_timeout_kills_step() {
        let dir = tempdir().unwrap();
        let mut step = sh_step(dir.path(), 1, "sleep 5\n");
        step.timeout = Some(Duration::from_millis(200));

        let start = Instant::now();
        let err = run_step(&step, dir.path()).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::StepTimedOut { step: 1, .. }));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_timeout_kills_spawned_processes() {
        let dir = tempdir().unwrap();
        let mut step = sh_step(dir.path(), 1, "sh -c 'sleep 1; touch leaked'\n");
        step.timeout = Some(Duration::from_millis(200));

        let err = run_step(&step, dir.path()).await.unwrap_err();
        assert!(matches!(err, OrchestratorError::StepTimedOut { step: 1, .. }));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!dir.path().join("leaked").exists());
    }

    #[tokio::test]
    async fn test_signal_exit_code() {
        let dir = tempdir().unwrap();
        let step = sh_step(dir.path(), 1, "kill -9 $$\n");

        let outcome = run_step(&step, dir.path()).await.unwrap();
        assert_eq!(outcome.exit_code, 128 + 9);
    }

    #[tokio::test]
    async fn test_run_quiet() {
        let dir = tempdir().unwrap();
        let ok = vec!["sh".to_string(), "-c".to_string(), "exit 0".to_string()];
        let fail = vec!["sh".to_string(), "-c".to_string(), "exit 4".to_string()];

        assert_eq!(run_quiet(&ok, dir.path()).await.unwrap(), 0);
        assert_eq!(run_quiet(&fail, dir.path()).await.unwrap(), 4);
        assert!(run_quiet(&[], dir.path()).await.is_err());
    }
}
