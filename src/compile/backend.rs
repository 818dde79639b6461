//! Compilation backend boundary.
//!
//! The orchestrator is agnostic to which concrete toolchain typesets the
//! document, provided it honors the timeout and returns a `%PDF`-signed
//! binary on success. [`CommandBackend`] shells out to a real engine;
//! [`MockBackend`] produces a minimally valid artifact without one, and
//! is swappable behind the identical contract.

use std::fs;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Per-attempt request handed to a backend.
#[derive(Debug, Clone)]
pub struct CompileRequest {
    /// Engine identifier (e.g. `pdflatex`, `xelatex`).
    pub engine: String,
    /// Hard wall-clock bound for one attempt.
    pub timeout: Duration,
    /// Pass the engine's shell-escape flag.
    pub shell_escape: bool,
}

/// Failure at the backend boundary.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("compilation timed out after {0:?}")]
    Timeout(Duration),

    #[error("engine reported failure")]
    Engine {
        /// Raw diagnostic log for downstream parsing.
        log: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A compilation backend: typesetting-language text in, binary out.
pub trait CompilationBackend {
    fn compile(&self, source: &str, request: &CompileRequest) -> Result<Vec<u8>, BackendError>;
}

/// Backend that invokes an external engine as a subprocess.
///
/// The source is written to a scratch directory, the engine runs with
/// `-interaction=nonstopmode -halt-on-error`, and a watchdog loop kills
/// the process when the request's timeout expires.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandBackend;

impl CommandBackend {
    pub fn new() -> Self {
        Self
    }
}

impl CompilationBackend for CommandBackend {
    fn compile(&self, source: &str, request: &CompileRequest) -> Result<Vec<u8>, BackendError> {
        let dir = tempfile::tempdir()?;
        let tex_path = dir.path().join("document.tex");
        fs::write(&tex_path, source)?;

        let mut command = Command::new(&request.engine);
        command
            .arg("-interaction=nonstopmode")
            .arg("-halt-on-error");
        if request.shell_escape {
            command.arg("-shell-escape");
        }
        command
            .arg("document.tex")
            .current_dir(dir.path())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        log::debug!("spawning {} in {:?}", request.engine, dir.path());
        let mut child = command.spawn()?;
        let deadline = Instant::now() + request.timeout;

        loop {
            match child.try_wait()? {
                Some(status) if status.success() => {
                    return Ok(fs::read(dir.path().join("document.pdf"))?);
                }
                Some(_) => {
                    let log = fs::read_to_string(dir.path().join("document.log"))
                        .unwrap_or_default();
                    return Err(BackendError::Engine { log });
                }
                None => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(BackendError::Timeout(request.timeout));
                    }
                    thread::sleep(Duration::from_millis(50));
                }
            }
        }
    }
}

/// What a [`MockBackend`] should do per call.
#[derive(Debug, Clone)]
enum MockBehavior {
    Succeed,
    Fail { log: String },
    TimeOut,
}

/// Test-double backend producing a minimally valid PDF.
///
/// The artifact carries the real format signature, a page object per
/// `\chapter` in the source, a text stream, and the trailer, so it passes
/// the orchestrator's structural checks without a toolchain.
#[derive(Debug, Clone)]
pub struct MockBackend {
    behavior: MockBehavior,
}

impl MockBackend {
    /// Backend that always succeeds.
    pub fn new() -> Self {
        Self {
            behavior: MockBehavior::Succeed,
        }
    }

    /// Backend that always fails with the given diagnostic log.
    pub fn failing(log: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Fail { log: log.into() },
        }
    }

    /// Backend that always reports a timeout.
    pub fn timing_out() -> Self {
        Self {
            behavior: MockBehavior::TimeOut,
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilationBackend for MockBackend {
    fn compile(&self, source: &str, request: &CompileRequest) -> Result<Vec<u8>, BackendError> {
        match &self.behavior {
            MockBehavior::Succeed => Ok(minimal_pdf(source)),
            MockBehavior::Fail { log } => Err(BackendError::Engine { log: log.clone() }),
            MockBehavior::TimeOut => Err(BackendError::Timeout(request.timeout)),
        }
    }
}

/// Build a structurally valid PDF for the given source.
///
/// One page object per `\chapter` occurrence (minimum one), plus a text
/// stream echoing a source excerpt.
fn minimal_pdf(source: &str) -> Vec<u8> {
    let pages = source.matches("\\chapter").count().max(1);

    let mut out = b"%PDF-1.4\n".to_vec();
    out.extend_from_slice(b"1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n");
    out.extend_from_slice(
        format!("2 0 obj << /Type /Pages /Count {pages} >> endobj\n").as_bytes(),
    );
    for i in 0..pages {
        out.extend_from_slice(
            format!("{} 0 obj << /Type /Page /Parent 2 0 R >> endobj\n", i + 3).as_bytes(),
        );
    }
    let excerpt: String = source
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .take(64)
        .collect();
    out.extend_from_slice(
        format!("stream\nBT /F1 11 Tf ({excerpt}) Tj ET\nendstream\n").as_bytes(),
    );
    out.extend_from_slice(b"%%EOF\n");
    out
}
