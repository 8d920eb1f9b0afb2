// ============================================================================
// Shell - line-oriented front end over one session
// ============================================================================
//
// - parser: tokenizes a line and builds a typed request
// - render: plain text or JSON output for outcomes and rejections
//
// Rejections and refusals are printed and the loop continues; only I/O
// failures end it early.
//
// ============================================================================

mod parser;
mod render;

pub use parser::{parse_line, tokenize, ShellInput};
pub use render::{render, render_json, render_text, OutputFormat};

use std::io::{BufRead, Write};

use crate::dispatch::{DispatchTable, Session};

pub struct Shell {
    session: Session,
    format: OutputFormat,
    prompt: Option<String>,
}

impl Shell {
    pub fn new(session: Session, format: OutputFormat) -> Self {
        Self {
            session,
            format,
            prompt: None,
        }
    }

    /// Print `prompt` before reading each line.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> anyhow::Result<()> {
        let mut lines = input.lines();

        loop {
            if let Some(prompt) = &self.prompt {
                write!(output, "[{}] {prompt}", self.session.role())?;
                output.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            let parsed = match parse_line(&line, self.session.active_table()) {
                Ok(parsed) => parsed,
                Err(rejection) => {
                    tracing::debug!(line = %line, reason = rejection.label(), "Line rejected");
                    let command = metric_label(&line, self.session.active_table());
                    self.session
                        .metrics()
                        .record_dispatch(command, rejection.label());
                    writeln!(output, "{}", render(self.format, &Err(rejection)))?;
                    continue;
                }
            };

            match parsed {
                ShellInput::Empty => {}
                ShellInput::Exit => break,
                ShellInput::Help => {
                    let table = self.session.active_table();
                    writeln!(output, "Commands for {}:", table.role())?;
                    for command in table.commands() {
                        writeln!(output, "  {command}")?;
                    }
                    writeln!(output, "  help | metrics | exit")?;
                }
                ShellInput::Metrics => write!(output, "{}", self.session.metrics().render()?)?,
                ShellInput::Request(request) => {
                    let result = self.session.dispatch(request);
                    writeln!(output, "{}", render(self.format, &result))?;
                }
            }
        }

        tracing::info!("Shell closed");
        Ok(())
    }
}

/// Words outside the active table share one label so typos cannot grow the
/// series set.
fn metric_label<'a>(line: &'a str, table: &DispatchTable) -> &'a str {
    match line.split_whitespace().next() {
        Some(word) if table.contains(word) => word,
        _ => UNKNOWN_COMMAND,
    }
}

const UNKNOWN_COMMAND: &str = "<unknown>";
