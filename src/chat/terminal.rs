use std::io::Write;

use async_trait::async_trait;
use colored::Colorize;
use serde_json::json;

use super::{ChatSink, SinkError};
use crate::attachment::Attachment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line, shaped like the chat payload.
    Json,
    /// Coloured, human-readable blocks.
    Pretty,
}

/// Writes chat output to stdout for the CLI front end.
#[derive(Debug, Clone, Copy)]
pub struct TerminalSink {
    format: OutputFormat,
}

impl TerminalSink {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    fn write(&self, rendered: &str) -> Result<(), SinkError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", rendered)?;
        stdout.flush()?;
        Ok(())
    }
}

#[async_trait]
impl ChatSink for TerminalSink {
    async fn send_text(&self, text: &str) -> Result<(), SinkError> {
        let rendered = match self.format {
            OutputFormat::Json => serde_json::to_string(&json!({ "text": text }))?,
            OutputFormat::Pretty => text.bold().to_string(),
        };
        self.write(&rendered)
    }

    async fn send_attachment(&self, attachment: &Attachment) -> Result<(), SinkError> {
        let rendered = match self.format {
            OutputFormat::Json => {
                serde_json::to_string(&json!({ "attachments": [attachment] }))?
            }
            OutputFormat::Pretty => render_pretty(attachment),
        };
        self.write(&rendered)
    }
}

/// Render an attachment as a small block with a coloured side bar:
///
/// ```text
/// ┃ Add widgets #975 (https://github.com/foo/foo-api/pull/975)
/// ┃ by octocat
/// ┃ `[Merged]` *octocat* wants to merge 3 commits into `main` from `widgets`
/// ┃ Labels: `[bug]`
/// ```
fn render_pretty(attachment: &Attachment) -> String {
    let (r, g, b) = parse_hex(&attachment.color).unwrap_or((255, 255, 255));
    let bar = "┃".truecolor(r, g, b).to_string();

    let mut lines = vec![
        format!(
            "{} {} ({})",
            bar,
            attachment.title.bold(),
            attachment.title_link.underline()
        ),
        format!("{} by {}", bar, attachment.author_name.italic()),
    ];
    for text_line in attachment.text.lines() {
        lines.push(format!("{} {}", bar, text_line));
    }
    for field in attachment.fields.iter().flatten() {
        let value = field.value.replace('\n', " ");
        lines.push(format!("{} {}: {}", bar, field.title.bold(), value));
    }
    lines.join("\n")
}

/// Parse `#RRGGBB` into its components.
fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
