//! Compilation orchestration: validated content to a checked artifact.
//!
//! The pipeline is: validate/normalize input, generate the document text,
//! invoke the (potentially slow or flaky) backend under a timeout with
//! sequential bounded retries, parse diagnostics on failure, structurally
//! validate the binary on success, and package exactly one
//! [`CompilationResult`]. Callers treat `success` as the sole
//! authoritative outcome; backend errors are never propagated raw.

mod artifact;
mod backend;
mod diagnostics;

pub use artifact::{validate_pdf, PdfInfo};
pub use backend::{BackendError, CommandBackend, CompilationBackend, CompileRequest, MockBackend};
pub use diagnostics::parse_log;

use std::time::{Duration, Instant};

use serde_json::Value;

use crate::model::BookContent;
use crate::tex::TexProcessor;
use crate::validate::validate_book;

/// A single diagnostic from the compilation backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationError {
    pub message: String,
    pub line: Option<u32>,
}

/// The packaged outcome of one compilation run.
///
/// `pdf` is present iff `success`. Diagnostics are aggregated here rather
/// than raised individually.
#[derive(Debug, Clone)]
pub struct CompilationResult {
    pub success: bool,
    pub pdf: Option<Vec<u8>>,
    pub errors: Vec<CompilationError>,
    pub warnings: Vec<String>,
    pub compilation_time: Duration,
    pub output_size: usize,
}

impl CompilationResult {
    fn failure(errors: Vec<CompilationError>, warnings: Vec<String>, started: Instant) -> Self {
        Self {
            success: false,
            pdf: None,
            errors,
            warnings,
            compilation_time: started.elapsed(),
            output_size: 0,
        }
    }
}

/// Orchestrator configuration.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Engine identifier handed to the backend.
    pub engine: String,
    /// Wall-clock bound per backend attempt.
    pub timeout: Duration,
    /// Additional attempts after the first, strictly sequential.
    pub max_retries: u32,
    /// Pass the engine's shell-escape flag.
    pub shell_escape: bool,
}

impl CompilerConfig {
    /// Full-book profile: typesetting a whole book is slow but
    /// near-deterministic pass/fail, so a long timeout and no retries.
    pub fn book() -> Self {
        Self {
            engine: "pdflatex".into(),
            timeout: Duration::from_secs(180),
            max_retries: 0,
            shell_escape: false,
        }
    }

    /// Fast development profile: short timeout, one retry.
    pub fn draft() -> Self {
        Self {
            engine: "pdflatex".into(),
            timeout: Duration::from_secs(30),
            max_retries: 1,
            shell_escape: false,
        }
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self::book()
    }
}

/// Drives validation, document generation, backend compilation, and
/// artifact validation into one result.
pub struct BookCompiler<B: CompilationBackend> {
    config: CompilerConfig,
    processor: TexProcessor,
    backend: B,
}

impl<B: CompilationBackend> BookCompiler<B> {
    pub fn new(config: CompilerConfig, backend: B) -> Self {
        Self {
            config,
            processor: TexProcessor::default(),
            backend,
        }
    }

    /// Use a custom typesetting processor (configuration overrides).
    pub fn with_processor(mut self, processor: TexProcessor) -> Self {
        self.processor = processor;
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile raw upstream content end to end.
    ///
    /// A validation failure returns immediately with the error in the
    /// result's error list; no partial artifact is ever produced.
    pub fn compile(&self, raw: &Value) -> CompilationResult {
        let started = Instant::now();

        let content = match validate_book(raw) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("content rejected: {e}");
                return CompilationResult::failure(
                    vec![CompilationError {
                        message: e.to_string(),
                        line: None,
                    }],
                    Vec::new(),
                    started,
                );
            }
        };

        self.run(&content, started)
    }

    /// Compile already-validated content.
    pub fn compile_content(&self, content: &BookContent) -> CompilationResult {
        self.run(content, Instant::now())
    }

    fn run(&self, content: &BookContent, started: Instant) -> CompilationResult {
        log::info!(
            "compiling {:?}: {} chapters",
            content.title,
            content.chapters.len()
        );

        let source = match self.processor.generate_complete_document(content, true) {
            Ok(source) => source,
            Err(e) => {
                return CompilationResult::failure(
                    vec![CompilationError {
                        message: e.to_string(),
                        line: None,
                    }],
                    Vec::new(),
                    started,
                );
            }
        };

        let request = CompileRequest {
            engine: self.config.engine.clone(),
            timeout: self.config.timeout,
            shell_escape: self.config.shell_escape,
        };

        let attempts = 1 + self.config.max_retries;
        let mut errors: Vec<CompilationError> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();

        for attempt in 1..=attempts {
            log::debug!("backend attempt {attempt}/{attempts}");
            match self.backend.compile(&source, &request) {
                Ok(bytes) => {
                    return self.package(bytes, warnings, started);
                }
                Err(BackendError::Engine { log }) => {
                    let (parsed_errors, parsed_warnings) = parse_log(&log);
                    warnings = parsed_warnings;
                    errors = if parsed_errors.is_empty() {
                        vec![CompilationError {
                            message: "engine reported failure with no parsable diagnostics"
                                .into(),
                            line: None,
                        }]
                    } else {
                        parsed_errors
                    };
                }
                Err(e) => {
                    errors = vec![CompilationError {
                        message: e.to_string(),
                        line: None,
                    }];
                }
            }
        }

        log::warn!("compilation failed after {attempts} attempt(s)");
        CompilationResult::failure(errors, warnings, started)
    }

    fn package(
        &self,
        bytes: Vec<u8>,
        mut warnings: Vec<String>,
        started: Instant,
    ) -> CompilationResult {
        let info = match validate_pdf(&bytes) {
            Ok(info) => info,
            Err(e) => {
                return CompilationResult::failure(
                    vec![CompilationError {
                        message: e.to_string(),
                        line: None,
                    }],
                    warnings,
                    started,
                );
            }
        };

        if info.size < 1024 {
            warnings.push(format!("artifact is suspiciously small ({} bytes)", info.size));
        }
        if !info.has_text {
            warnings.push("artifact contains no text streams".into());
        }

        log::info!(
            "compiled {} bytes, {} page(s) in {:?}",
            info.size,
            info.page_count,
            started.elapsed()
        );

        CompilationResult {
            success: true,
            output_size: bytes.len(),
            pdf: Some(bytes),
            errors: Vec::new(),
            warnings,
            compilation_time: started.elapsed(),
        }
    }
}
