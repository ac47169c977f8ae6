//! Process launcher and pipeline executor.
//!
//! A job with N stages becomes N child processes connected by N-1
//! close-on-exec pipes: stage i reads pipe i-1 and writes pipe i, the
//! first and last stages take the whole-job redirections, and each stage
//! may redirect its own stderr. The parent's copies of every pipe end and
//! redirection file are consumed at spawn time, so by the time the wait
//! phase starts no descriptor scoped to the job is still open here.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use bosun_hal::{process, Pid};
use bosun_parser::JobSpec;
use tracing::debug;

use crate::context::ShellContext;
use crate::error::{ShellError, ShellResult};

/// One pipeline stage after the spawn phase.
enum Stage {
    Running(Child),
    /// Spawn failed with an exec-class error, reported already; carries
    /// the exit code recorded for the stage (127 or 126).
    Failed(i32),
}

/// Launch every stage of `job`, then wait according to its mode.
///
/// Foreground: waits for all stages and records the last stage's status.
/// Background: waits for every stage except the last (so pipe-only stages
/// never linger as zombies), then moves the job into the registry keyed
/// by the last stage's pid.
pub fn launch(job: JobSpec, ctx: &mut ShellContext) -> ShellResult<()> {
    if let Some(path) = redirection_conflict(&job) {
        return Err(ShellError::RedirectionConflict { path });
    }

    let n = job.stages.len();

    // Input first: a failed input open must not create or truncate any
    // output file.
    let mut stdin_file = open_input(job.stdin_path.as_deref())?;
    let mut stdout_file = open_output(job.stdout_path.as_deref())?;
    let mut stderr_files = Vec::with_capacity(n);
    for stage in &job.stages {
        stderr_files.push(open_output(stage.stderr_path.as_deref())?);
    }

    let mut pipes = Vec::with_capacity(n.saturating_sub(1));
    for _ in 1..n {
        let (read, write) = bosun_hal::pipe::pair()?;
        pipes.push((Some(read), Some(write)));
    }

    let mut stages = Vec::with_capacity(n);
    for (i, spec) in job.stages.iter().enumerate() {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if i > 0 {
            if let Some(read) = pipes[i - 1].0.take() {
                cmd.stdin(Stdio::from(read));
            }
        } else if let Some(file) = stdin_file.take() {
            cmd.stdin(Stdio::from(file));
        }
        if i + 1 < n {
            if let Some(write) = pipes[i].1.take() {
                cmd.stdout(Stdio::from(write));
            }
        } else if let Some(file) = stdout_file.take() {
            cmd.stdout(Stdio::from(file));
        }
        if let Some(file) = stderr_files[i].take() {
            cmd.stderr(Stdio::from(file));
        }
        // Dropping `cmd` inside spawn_stage closes the parent's copies of
        // this stage's pipe ends; a failed spawn closes them the same
        // way, so downstream stages still see EOF.
        stages.push(spawn_stage(cmd, &spec.program)?);
    }

    if job.background {
        let last = match stages.pop() {
            Some(stage) => stage,
            None => return Ok(()),
        };
        for stage in stages {
            if let Stage::Running(child) = stage {
                process::wait_pid(child_pid(&child))?;
            }
        }
        if let Stage::Running(child) = last {
            let pid = child_pid(&child);
            debug!(%pid, line = %job.line, "registered background job");
            ctx.jobs.insert(pid, job);
        }
        // If the last stage failed to spawn there is nothing to track;
        // the exec error was already reported.
        Ok(())
    } else {
        let mut last_status = 0;
        for (i, stage) in stages.into_iter().enumerate() {
            let status = match stage {
                Stage::Running(child) => process::wait_pid(child_pid(&child))?.status_code(),
                Stage::Failed(code) => code,
            };
            if i + 1 == n {
                last_status = status;
            }
        }
        ctx.last_status = last_status;
        debug!(status = last_status, line = %job.line, "foreground job complete");
        Ok(())
    }
}

/// The per-stage redirection conflict check, applied uniformly to every
/// job: a stage's effective input (whole-job input on the first stage),
/// output (whole-job output on the last stage), and error targets must
/// all be distinct paths. Runs before anything is opened or spawned.
fn redirection_conflict(job: &JobSpec) -> Option<PathBuf> {
    let last = job.stages.len().saturating_sub(1);
    for (i, stage) in job.stages.iter().enumerate() {
        let input = if i == 0 { job.stdin_path.as_deref() } else { None };
        let output = if i == last {
            job.stdout_path.as_deref()
        } else {
            None
        };
        let error = stage.stderr_path.as_deref();
        for (a, b) in [(input, output), (input, error), (output, error)] {
            if let (Some(a), Some(b)) = (a, b) {
                if a == b {
                    return Some(a.to_path_buf());
                }
            }
        }
    }
    None
}

fn open_input(path: Option<&Path>) -> ShellResult<Option<File>> {
    match path {
        Some(path) => File::open(path).map(Some).map_err(|source| {
            ShellError::Redirection {
                path: path.to_path_buf(),
                source,
            }
        }),
        None => Ok(None),
    }
}

fn open_output(path: Option<&Path>) -> ShellResult<Option<File>> {
    match path {
        Some(path) => File::create(path).map(Some).map_err(|source| {
            ShellError::Redirection {
                path: path.to_path_buf(),
                source,
            }
        }),
        None => Ok(None),
    }
}

/// Spawn one stage. Exec-class failures (the command itself cannot run)
/// are reported here and stay local to the stage; anything else means the
/// process primitive is broken and is fatal to the shell.
fn spawn_stage(mut cmd: Command, program: &str) -> ShellResult<Stage> {
    match cmd.spawn() {
        Ok(child) => {
            debug!(program, pid = child.id(), "spawned stage");
            Ok(Stage::Running(child))
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            eprintln!("bosun: {program}: command not found");
            Ok(Stage::Failed(127))
        }
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            eprintln!("bosun: {program}: permission denied");
            Ok(Stage::Failed(126))
        }
        Err(source) => Err(ShellError::ProcessSpawn {
            program: program.to_string(),
            source,
        }),
    }
}

fn child_pid(child: &Child) -> Pid {
    Pid::from_raw(child.id() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bosun_parser::ProcessSpec;

    fn stage(program: &str, stderr_path: Option<&str>) -> ProcessSpec {
        ProcessSpec {
            program: program.to_string(),
            args: Vec::new(),
            stderr_path: stderr_path.map(PathBuf::from),
        }
    }

    fn single(stdin: Option<&str>, stdout: Option<&str>, stderr: Option<&str>) -> JobSpec {
        JobSpec {
            stages: vec![stage("cmd", stderr)],
            stdin_path: stdin.map(PathBuf::from),
            stdout_path: stdout.map(PathBuf::from),
            background: false,
            line: "cmd".to_string(),
        }
    }

    #[test]
    fn single_stage_conflicts_are_detected() {
        assert!(redirection_conflict(&single(Some("f"), Some("f"), None)).is_some());
        assert!(redirection_conflict(&single(Some("f"), None, Some("f"))).is_some());
        assert!(redirection_conflict(&single(None, Some("f"), Some("f"))).is_some());
        assert!(redirection_conflict(&single(Some("a"), Some("b"), Some("c"))).is_none());
    }

    #[test]
    fn pipeline_conflict_check_is_per_stage() {
        // Input lands on the first stage, output on the last; in a
        // pipeline they never meet in one process, so the same path for
        // both is not a collision.
        let job = JobSpec {
            stages: vec![stage("a", None), stage("b", None)],
            stdin_path: Some(PathBuf::from("f")),
            stdout_path: Some(PathBuf::from("f")),
            background: false,
            line: "a | b".to_string(),
        };
        assert!(redirection_conflict(&job).is_none());

        // But a stage's own stderr colliding with its effective output is.
        let job = JobSpec {
            stages: vec![stage("a", None), stage("b", Some("f"))],
            stdin_path: None,
            stdout_path: Some(PathBuf::from("f")),
            background: false,
            line: "a | b 2> f > f".to_string(),
        };
        assert_eq!(redirection_conflict(&job), Some(PathBuf::from("f")));
    }
}
