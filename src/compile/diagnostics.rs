//! Parsing of engine diagnostic output.
//!
//! TeX engines report errors as lines starting with `! `, followed within
//! a few lines by an `l.<n>` marker giving the source line. Warnings show
//! up as `LaTeX Warning:` lines and overfull/underfull box complaints.
//! Everything else in the log is noise for our purposes.

use super::CompilationError;

/// Parse engine log output into error records and warning strings.
pub fn parse_log(log: &str) -> (Vec<CompilationError>, Vec<String>) {
    let mut errors: Vec<CompilationError> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    for line in log.lines() {
        let trimmed = line.trim_end();

        if let Some(message) = trimmed.strip_prefix("! ") {
            errors.push(CompilationError {
                message: message.to_string(),
                line: None,
            });
            continue;
        }

        // An `l.<n>` marker attaches to the most recent error without one.
        if let Some(rest) = trimmed.strip_prefix("l.") {
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            if !digits.is_empty() {
                if let Some(last) = errors.last_mut() {
                    if last.line.is_none() {
                        last.line = digits.parse().ok();
                    }
                }
            }
            continue;
        }

        if let Some(idx) = trimmed.find("LaTeX Warning:") {
            let message = trimmed[idx + "LaTeX Warning:".len()..].trim();
            if !message.is_empty() {
                warnings.push(message.to_string());
            }
            continue;
        }

        if trimmed.starts_with("Overfull \\hbox") || trimmed.starts_with("Underfull \\hbox") {
            warnings.push(trimmed.to_string());
        }
    }

    (errors, warnings)
}
