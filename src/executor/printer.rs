use std::{
    error::Error,
    path::{Path, PathBuf},
};

use colored::{Color, Colorize};
use url::Url;

use crate::session::{DeployResponse, PrimeSummary, SubmitError};

pub fn print_reading(path: &Path) {
    println!("{} {}...", "Reading".bold(), path.display());
}

pub fn print_deploying(endpoint: &Url, env_files: &[PathBuf]) {
    println!("{} {}...", "Deploying to".bold(), endpoint.as_str().cyan());

    if !env_files.is_empty() {
        let files = env_files
            .iter()
            .map(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| p.display().to_string())
            })
            .collect::<Vec<_>>()
            .join(", ");
        println!("{} {}", "Env:".bold(), files.dimmed());
    }
}

pub fn print_primed(summary: &PrimeSummary) {
    println!(
        "{} {}",
        "Visited home page.".dimmed(),
        format!("({:.1} ms)", summary.duration_ms).dimmed()
    );
}

pub fn print_prime_warning(err: &SubmitError) {
    eprintln!(
        "{} {}",
        "Warning visiting home page:".yellow().bold(),
        describe_error(err)
    );
}

pub fn print_submit_error(err: &SubmitError) {
    eprintln!("{} {}", "Error:".red().bold(), describe_error(err));
}

pub fn print_response(response: &DeployResponse) {
    println!("{}", render_response(response));
}

pub fn render_response(response: &DeployResponse) -> String {
    let status_color = if response.status >= 400 {
        Color::Red
    } else if response.status >= 300 {
        Color::Yellow
    } else {
        Color::Green
    };

    format!(
        "{} {} {}\n{} {}",
        "Status:".bold(),
        response.status.to_string().color(status_color),
        format!("({:.1} ms)", response.duration_ms).dimmed(),
        "Response:".bold(),
        decode_body(&response.body)
    )
}

/// Every invalid UTF-8 sequence becomes U+FFFD; valid text passes through.
pub fn decode_body(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Flattens an error and its sources into one line.
pub fn describe_error(err: &(dyn Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if parts.last() != Some(&text) {
            parts.push(text);
        }
        source = cause.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fmt;

    #[derive(Debug)]
    struct Layer {
        message: &'static str,
        source: Option<Box<Layer>>,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message)
        }
    }

    impl Error for Layer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            self.source.as_deref().map(|s| s as &(dyn Error + 'static))
        }
    }

    fn response(status: u16, body: &[u8]) -> DeployResponse {
        DeployResponse {
            status,
            body: body.to_vec(),
            duration_ms: 1.0,
        }
    }

    #[test]
    fn decode_body_keeps_valid_utf8() {
        let text = "{\"id\":\"dep_1\",\"note\":\"héllo ✓\"}";
        assert_eq!(decode_body(text.as_bytes()), text);
    }

    #[test]
    fn decode_body_marks_each_invalid_sequence() {
        assert_eq!(decode_body(b"ok\xff!"), "ok\u{FFFD}!");
        assert_eq!(decode_body(b"\xc3(\xfe"), "\u{FFFD}(\u{FFFD}");
    }

    #[test]
    fn render_response_shows_status_then_body() {
        let rendered = render_response(&response(201, br#"{"id":"dep_1","status":"queued"}"#));
        let mut lines = rendered.lines();

        let status_line = lines.next().unwrap();
        assert!(status_line.contains("Status:"));
        assert!(status_line.contains("201"));
        assert!(status_line.contains("(1.0 ms)"));

        let body_line = lines.next().unwrap();
        assert!(body_line.contains("Response:"));
        assert!(body_line.ends_with(r#"{"id":"dep_1","status":"queued"}"#));
    }

    #[test]
    fn render_response_handles_undecodable_bodies() {
        let rendered = render_response(&response(502, b"bad\x80gateway"));
        assert!(rendered.contains("502"));
        assert!(rendered.contains("bad\u{FFFD}gateway"));
    }

    #[test]
    fn describe_error_joins_sources_and_skips_repeats() {
        let err = Layer {
            message: "request to https://deploy.example/ failed",
            source: Some(Box::new(Layer {
                message: "connection refused",
                source: Some(Box::new(Layer {
                    message: "connection refused",
                    source: None,
                })),
            })),
        };

        assert_eq!(
            describe_error(&err),
            "request to https://deploy.example/ failed: connection refused"
        );
    }
}
