//! Worker thread for filenav launches.
//!
//! Detached commands (browser, player, viewer, opener) are spawned here so the UI never waits
//! on them. Each spawned child is waited on by its own reaper thread and the outcome is sent
//! back over [WorkerResponse].
//!
//! Requests [WorkerTask] come in from the AppState, results go back through the response
//! channel and are drained by `AppState::tick`.

use crate::core::launch::{CommandLine, Launch};

use crossbeam_channel::{Receiver, Sender, unbounded};

use std::io;
use std::process::{Child, Command, Stdio};
use std::thread;

/// Channels to the launch worker.
pub struct Workers {
    launch_tx: Sender<WorkerTask>,
    response_rx: Receiver<WorkerResponse>,
}

impl Workers {
    /// Spawns the launch worker thread.
    pub fn spawn() -> Self {
        let (launch_tx, launch_rx) = unbounded::<WorkerTask>();
        let (res_tx, response_rx) = unbounded::<WorkerResponse>();

        start_launch_worker(launch_rx, res_tx);

        Self {
            launch_tx,
            response_rx,
        }
    }

    #[inline]
    pub fn launch_tx(&self) -> &Sender<WorkerTask> {
        &self.launch_tx
    }

    #[inline]
    pub fn response_rx(&self) -> &Receiver<WorkerResponse> {
        &self.response_rx
    }
}

/// Tasks sent to the worker thread.
#[derive(Debug)]
pub enum WorkerTask {
    Spawn {
        command: CommandLine,
        launch: Launch,
        request_id: u64,
    },
}

/// Responses sent from the worker back to the main thread.
#[derive(Debug)]
pub enum WorkerResponse {
    /// The child ran to completion.
    Exited {
        launch: Launch,
        success: bool,
        request_id: u64,
    },
    /// The child could not be started or waited on.
    Error {
        launch: Launch,
        message: String,
        request_id: u64,
    },
}

/// Starts `command` with all stdio detached from the terminal.
pub fn spawn_detached(command: &CommandLine) -> io::Result<Child> {
    Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
}

fn start_launch_worker(task_rx: Receiver<WorkerTask>, res_tx: Sender<WorkerResponse>) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let WorkerTask::Spawn {
                command,
                launch,
                request_id,
            } = task;

            let mut child = match spawn_detached(&command) {
                Ok(child) => child,
                Err(e) => {
                    tracing::warn!(program = %command.program, error = %e, "spawn failed");
                    let _ = res_tx.send(WorkerResponse::Error {
                        launch,
                        message: format!("{}: {}", command.program, e),
                        request_id,
                    });
                    continue;
                }
            };

            tracing::debug!(program = %command.program, pid = child.id(), "spawned");
            let res_tx = res_tx.clone();
            thread::spawn(move || {
                let response = match child.wait() {
                    Ok(status) => {
                        if !status.success() {
                            tracing::warn!(program = %command.program, %status, "command failed");
                        }
                        WorkerResponse::Exited {
                            launch,
                            success: status.success(),
                            request_id,
                        }
                    }
                    Err(e) => WorkerResponse::Error {
                        launch,
                        message: format!("{}: {}", command.program, e),
                        request_id,
                    },
                };
                let _ = res_tx.send(response);
            });
        }
    });
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::time::Duration;

    fn spawn_task(program: &str, args: &[&str], request_id: u64) -> WorkerTask {
        WorkerTask::Spawn {
            command: CommandLine {
                program: program.to_string(),
                args: args.iter().map(OsString::from).collect(),
            },
            launch: Launch::OpenIn,
            request_id,
        }
    }

    #[test]
    fn reports_successful_exit() -> Result<(), Box<dyn std::error::Error>> {
        let workers = Workers::spawn();
        workers.launch_tx().send(spawn_task("true", &[], 1))?;

        match workers.response_rx().recv_timeout(Duration::from_secs(5))? {
            WorkerResponse::Exited {
                success,
                request_id,
                ..
            } => {
                assert!(success);
                assert_eq!(request_id, 1);
            }
            other => return Err(format!("Unexpected response: {:?}", other).into()),
        }
        Ok(())
    }

    #[test]
    fn reports_failed_exit() -> Result<(), Box<dyn std::error::Error>> {
        let workers = Workers::spawn();
        workers.launch_tx().send(spawn_task("false", &[], 2))?;

        match workers.response_rx().recv_timeout(Duration::from_secs(5))? {
            WorkerResponse::Exited {
                success, launch, ..
            } => {
                assert!(!success);
                assert_eq!(launch, Launch::OpenIn);
            }
            other => return Err(format!("Unexpected response: {:?}", other).into()),
        }
        Ok(())
    }

    #[test]
    fn reports_missing_program() -> Result<(), Box<dyn std::error::Error>> {
        let workers = Workers::spawn();
        workers
            .launch_tx()
            .send(spawn_task("filenav-no-such-program", &[], 3))?;

        match workers.response_rx().recv_timeout(Duration::from_secs(5))? {
            WorkerResponse::Error {
                message,
                request_id,
                ..
            } => {
                assert!(message.starts_with("filenav-no-such-program"));
                assert_eq!(request_id, 3);
            }
            other => return Err(format!("Unexpected response: {:?}", other).into()),
        }
        Ok(())
    }

    #[test]
    fn long_running_child_does_not_block_queue() -> Result<(), Box<dyn std::error::Error>> {
        let workers = Workers::spawn();
        workers.launch_tx().send(spawn_task("sleep", &["2"], 10))?;
        workers.launch_tx().send(spawn_task("true", &[], 11))?;

        match workers.response_rx().recv_timeout(Duration::from_secs(1))? {
            WorkerResponse::Exited { request_id, .. } => assert_eq!(request_id, 11),
            other => return Err(format!("Unexpected response: {:?}", other).into()),
        }
        Ok(())
    }
}
