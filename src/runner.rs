/// Stage the working directory, launch the simulator binary and watch it from
/// a background thread.
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use eframe::egui;
use thiserror::Error;

use crate::app_types::{RunnerCommand, RunnerUpdate};
use crate::input_file::{self, InputFileError};
use crate::ui::form::FormPanel;

/// simulator executable, resolved through PATH
pub const FELIX_BINARY: &str = "felixsim";
/// environment override for the executable name
pub const FELIX_BIN_ENV: &str = "FELIX_BIN";
/// file names the simulator expects in its working directory
pub const INPUT_FILE_NAME: &str = "felix.inp";
pub const CIF_FILE_NAME: &str = "felix.cif";

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    InputFile(#[from] InputFileError),
    #[error("could not stage {path}: {source}")]
    Stage {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not start {binary}: {source}")]
    Spawn {
        binary: String,
        source: std::io::Error,
    },
    #[error("could not start watcher thread: {source}")]
    Thread { source: std::io::Error },
}

/// Channels and join handle for a running simulation.
pub struct RunHandle {
    pub command_tx: mpsc::Sender<RunnerCommand>,
    pub update_rx: mpsc::Receiver<RunnerUpdate>,
    pub thread: thread::JoinHandle<()>,
}

pub fn felix_binary() -> String {
    std::env::var(FELIX_BIN_ENV).unwrap_or_else(|_| FELIX_BINARY.to_owned())
}

/// Program and arguments for the requested core count. More than one core
/// goes through mpirun.
pub fn build_command(binary: &str, cores: u32) -> (String, Vec<String>) {
    if cores > 1 {
        (
            "mpirun".to_owned(),
            vec!["-np".to_owned(), cores.to_string(), binary.to_owned()],
        )
    } else {
        (binary.to_owned(), Vec::new())
    }
}

/// Write felix.inp and copy the crystal file into the output directory, which
/// becomes the simulator's working directory.
pub fn stage_run_dir(panels: &[FormPanel], cif: &Path, output_dir: &Path) -> Result<(), RunError> {
    input_file::save(&output_dir.join(INPUT_FILE_NAME), panels)?;

    let staged_cif = output_dir.join(CIF_FILE_NAME);
    // re-running from a previous output directory picks the staged copy
    // itself; fs::copy would truncate it before reading
    if let (Ok(from), Ok(to)) = (cif.canonicalize(), staged_cif.canonicalize()) {
        if from == to {
            return Ok(());
        }
    }
    std::fs::copy(cif, &staged_cif).map_err(|source| RunError::Stage {
        path: staged_cif,
        source,
    })?;
    Ok(())
}

/// Stage the run directory and spawn the simulator plus a watcher thread.
/// The watcher forwards output lines, answers cancel requests and reports the
/// exit status.
pub fn launch(
    ctx: &egui::Context,
    program: &str,
    panels: &[FormPanel],
    cif: &Path,
    output_dir: &Path,
    cores: u32,
) -> Result<RunHandle, RunError> {
    stage_run_dir(panels, cif, output_dir)?;

    let (binary, args) = build_command(program, cores);
    let mut child = Command::new(&binary)
        .args(&args)
        .current_dir(output_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RunError::Spawn {
            binary: binary.clone(),
            source,
        })?;

    log::info!(
        "started {} {} in {}",
        binary,
        args.join(" "),
        output_dir.display()
    );

    let (command_tx, command_rx) = mpsc::channel();
    let (update_tx, update_rx) = mpsc::channel();
    let ctx_clone = ctx.clone();

    let handle = thread::Builder::new()
        .name("felix-run".to_owned())
        .spawn(move || {
            let mut readers = Vec::new();
            if let Some(stdout) = child.stdout.take() {
                readers.push(forward_lines(stdout, update_tx.clone(), ctx_clone.clone()));
            }
            if let Some(stderr) = child.stderr.take() {
                readers.push(forward_lines(stderr, update_tx.clone(), ctx_clone.clone()));
            }

            loop {
                // check for commands (non-blocking)
                if let Ok(RunnerCommand::Cancel) = command_rx.try_recv() {
                    let _ = child.kill();
                }

                match child.try_wait() {
                    Ok(Some(status)) => {
                        // readers finish once the pipes close
                        for reader in readers.drain(..) {
                            let _ = reader.join();
                        }
                        let _ = update_tx.send(RunnerUpdate::Finished {
                            success: status.success(),
                            code: status.code(),
                        });
                        ctx_clone.request_repaint();
                        break;
                    }
                    Ok(None) => {
                        // sleep a bit to avoid busy-waiting
                        thread::sleep(Duration::from_millis(10));
                    }
                    Err(err) => {
                        let _ = update_tx.send(RunnerUpdate::Failed(err.to_string()));
                        ctx_clone.request_repaint();
                        break;
                    }
                }
            }
        })
        .map_err(|source| RunError::Thread { source })?;

    Ok(RunHandle {
        command_tx,
        update_rx,
        thread: handle,
    })
}

fn forward_lines<R: Read + Send + 'static>(
    stream: R,
    update_tx: mpsc::Sender<RunnerUpdate>,
    ctx: egui::Context,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    // the simulator's output is not guaranteed to be UTF-8
                    let line = String::from_utf8_lossy(&buf)
                        .trim_end_matches(|c| c == '\n' || c == '\r')
                        .to_owned();
                    let _ = update_tx.send(RunnerUpdate::Line(line));
                    ctx.request_repaint();
                }
            }
        }
    })
}
