//! External NER program adapter.
//!
//! Lets a statistical model (typically a spaCy pipeline) run out of process.
//! The program receives the page text on stdin and must print a JSON array
//! on stdout:
//!
//! ```json
//! [{"start_char": 8, "end_char": 27, "label": "LOC"}]
//! ```
//!
//! Offsets are Unicode character offsets, as spaCy reports them; they are
//! converted to byte offsets here.

use crate::domain::{EntityLabel, EntityRecognizer, RecognizedEntity};
use crate::error::{AnonymizerError, AnonymizerResult};
use serde::Deserialize;
use std::io::Write;
use std::process::{Command, Stdio};

#[derive(Debug, Deserialize)]
struct RawEntity {
    start_char: usize,
    end_char: usize,
    label: String,
}

/// Recognizer backed by an external process, spawned once per page.
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    /// Creates a recognizer running `program` with `args`.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Splits a whitespace-separated command line into program and arguments.
    pub fn from_command_line(command_line: &str) -> AnonymizerResult<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or_else(|| AnonymizerError::InvalidInput {
            parameter: "ner-command".to_string(),
            reason: "Command line is empty".to_string(),
        })?;
        Ok(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn unavailable(&self, reason: impl Into<String>) -> AnonymizerError {
        AnonymizerError::ModelUnavailable {
            recognizer: self.program.clone(),
            reason: reason.into(),
        }
    }

    fn run(&self, text: &str) -> AnonymizerResult<Vec<u8>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.unavailable(format!("failed to start: {}", e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.unavailable("stdin not captured"))?;
        let input = text.to_owned();
        // Feed stdin from another thread so a chatty child cannot deadlock us
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child
            .wait_with_output()
            .map_err(|e| self.unavailable(format!("failed to wait: {}", e)))?;

        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(self.unavailable(format!("failed to write input: {}", e))),
            Err(_) => return Err(self.unavailable("input writer panicked")),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.unavailable(format!(
                "exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(output.stdout)
    }

    /// Parses program output and converts char offsets to byte offsets.
    pub fn parse_output(&self, text: &str, stdout: &[u8]) -> AnonymizerResult<Vec<RecognizedEntity>> {
        let raw: Vec<RawEntity> = serde_json::from_slice(stdout)
            .map_err(|e| self.unavailable(format!("invalid output: {}", e)))?;

        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();

        let mut entities = Vec::with_capacity(raw.len());
        for entity in raw {
            match (
                boundaries.get(entity.start_char),
                boundaries.get(entity.end_char),
            ) {
                (Some(&start), Some(&end)) => {
                    entities.push(RecognizedEntity::new(
                        start,
                        end,
                        EntityLabel::parse(&entity.label),
                    ));
                }
                _ => log::warn!(
                    "{}: entity offsets {}..{} exceed text of {} characters",
                    self.program,
                    entity.start_char,
                    entity.end_char,
                    boundaries.len() - 1
                ),
            }
        }
        Ok(entities)
    }
}

impl EntityRecognizer for CommandRecognizer {
    fn recognize(&self, text: &str) -> AnonymizerResult<Vec<RecognizedEntity>> {
        let stdout = self.run(text)?;
        self.parse_output(text, &stdout)
    }

    fn name(&self) -> &str {
        &self.program
    }
}
