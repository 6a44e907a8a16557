//! Response and descriptor printing
//!
//! JSON is pretty-printed through `jq .` when it is on the PATH, falling back to
//! serde_json. Section labels are styled with `console`, which drops colors when
//! stdout is not a terminal.

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::time::Duration;

use console::style;
use reqwest::blocking::Response;
use tracing::debug;

use crate::errors::Result;

/// A received response, captured for printing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseReport {
    /// e.g. `HTTP/1.1 200 OK`
    pub status_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub elapsed: Duration,
}

impl ResponseReport {
    /// Read the whole response; `elapsed` is measured by the caller
    pub fn from_response(response: Response, elapsed: Duration) -> Result<Self> {
        let status_line = format!("{:?} {}", response.version(), response.status());
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| (name.to_string(), String::from_utf8_lossy(value.as_bytes()).to_string()))
            .collect();
        let body = response.text()?;

        Ok(Self { status_line, headers, body, elapsed })
    }

    /// Render the report, with `pretty` applied to a body that parses as JSON
    pub fn render(&self, pretty: impl Fn(&str) -> Option<String>) -> String {
        let mut out = String::new();

        out.push_str(&format!("{} {}\n", style("Status:").bold().cyan(), self.status_line));

        out.push_str(&format!("{}\n", style("Headers:").bold().cyan()));
        for (name, value) in &self.headers {
            out.push_str(&format!("  {}: {}\n", style(name).magenta(), value));
        }

        out.push_str(&format!("{}\n", style("Response:").bold().cyan()));
        let body = pretty(&self.body).unwrap_or_else(|| self.body.clone());
        out.push_str(body.trim_end_matches('\n'));
        out.push('\n');

        // millisecond precision is enough for a human
        let elapsed = Duration::from_millis(self.elapsed.as_millis() as u64);
        out.push_str(&format!(
            "{} {}\n",
            style("Time taken:").bold().cyan(),
            humantime::format_duration(elapsed)
        ));

        out
    }
}

/// Print a response report to stdout
pub fn print_response(report: &ResponseReport) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(report.render(format_json).as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Print any JSON document (e.g. a descriptor) to stdout
pub fn print_json(text: &str) -> Result<()> {
    let rendered = format_json(text).unwrap_or_else(|| text.to_string());
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rendered.trim_end_matches('\n'))?;
    Ok(())
}

/// Pretty-print `text` if it is JSON; `None` otherwise
pub fn format_json(text: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    format_with_jq(text).or_else(|| serde_json::to_string_pretty(&value).ok())
}

/// Run `jq .` over `text`; `None` when jq is missing or fails
fn format_with_jq(text: &str) -> Option<String> {
    let mut child = Command::new("jq")
        .arg(".")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| debug!(error = %e, "jq not available, using built-in JSON formatting"))
        .ok()?;

    // dropped at the end of the statement, closing jq's stdin
    child.stdin.take()?.write_all(text.as_bytes()).ok()?;

    let output = child.wait_with_output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()
}
