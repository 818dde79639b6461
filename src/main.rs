//! bookbinder - compile AI-generated book JSON into typeset artifacts

use std::fs;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use bookbinder::{
    count_words, extract_plain_text, validate_book, BookCompiler, CommandBackend, CompilerConfig,
    TexProcessor,
};

#[derive(Parser)]
#[command(name = "bookbinder")]
#[command(version, about = "Compile AI-generated book JSON into typeset artifacts", long_about = None)]
#[command(after_help = "EXAMPLES:
    bookbinder book.json book.pdf       Compile to PDF via pdflatex
    bookbinder book.json book.tex --tex Emit the LaTeX source only
    bookbinder book.json book.txt --text Emit the plain-text projection
    bookbinder -c book.json             Validate and report word count")]
struct Cli {
    /// Input book JSON file
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (.pdf, .tex, or .txt)
    #[arg(value_name = "OUTPUT", required_unless_present = "check")]
    output: Option<String>,

    /// Validate the input and report metrics without compiling
    #[arg(short, long)]
    check: bool,

    /// Emit LaTeX source instead of compiling
    #[arg(long)]
    tex: bool,

    /// Emit the plain-text projection instead of compiling
    #[arg(long)]
    text: bool,

    /// Compilation engine
    #[arg(long, default_value = "pdflatex")]
    engine: String,

    /// Compilation timeout in seconds
    #[arg(long, default_value_t = 180)]
    timeout: u64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let raw_text = fs::read_to_string(&cli.input).map_err(|e| e.to_string())?;
    let raw: serde_json::Value = serde_json::from_str(&raw_text).map_err(|e| e.to_string())?;
    let content = validate_book(&raw).map_err(|e| e.to_string())?;

    if cli.check {
        println!("Title: {}", content.title);
        println!("Author: {}", content.author);
        println!("Chapters: {}", content.chapters.len());
        println!("Words: {}", count_words(&content));
        return Ok(());
    }

    let output = cli.output.as_deref().ok_or("output required")?;

    if cli.text {
        fs::write(output, extract_plain_text(&content)).map_err(|e| e.to_string())?;
        return Ok(());
    }

    if cli.tex {
        let source = TexProcessor::default()
            .generate_complete_document(&content, true)
            .map_err(|e| e.to_string())?;
        fs::write(output, source).map_err(|e| e.to_string())?;
        return Ok(());
    }

    let config = CompilerConfig {
        engine: cli.engine.clone(),
        timeout: Duration::from_secs(cli.timeout),
        ..CompilerConfig::book()
    };
    let compiler = BookCompiler::new(config, CommandBackend::new());
    let result = compiler.compile_content(&content);

    for warning in &result.warnings {
        eprintln!("warning: {warning}");
    }

    if !result.success {
        for error in &result.errors {
            match error.line {
                Some(line) => eprintln!("error (l.{line}): {}", error.message),
                None => eprintln!("error: {}", error.message),
            }
        }
        return Err("compilation failed".into());
    }

    let pdf = result.pdf.ok_or("missing artifact")?;
    fs::write(output, &pdf).map_err(|e| e.to_string())?;
    println!(
        "wrote {} ({} bytes in {:.1}s)",
        output,
        result.output_size,
        result.compilation_time.as_secs_f32()
    );
    Ok(())
}
