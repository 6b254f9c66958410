//! User interaction
//!
//! [`Prompter`] is the only way flows read input or print output. Implementors supply
//! raw line input and output; selection and confirmation parsing live in the
//! provided methods so every implementation behaves the same.

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

pub trait Prompter {
    /// Read one raw line. `Ok(None)` means end of input or interrupt.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Print one line of output.
    fn say(&mut self, line: &str);

    /// Free-text answer, trimmed. `Ok(None)` on end of input; empty answers are `Some("")`.
    fn text(&mut self, prompt: &str) -> Result<Option<String>> {
        Ok(self
            .read_line(&format!("{prompt} "))?
            .map(|line| line.trim().to_string()))
    }

    /// Pick one of `options` by number. `Ok(None)` when the user cancels.
    fn select(&mut self, prompt: &str, options: &[String]) -> Result<Option<usize>> {
        if options.is_empty() {
            return Ok(None);
        }
        self.say(prompt);
        for (i, option) in options.iter().enumerate() {
            self.say(&format!("  {}. {option}", i + 1));
        }

        loop {
            let Some(answer) = self.text(&format!("Enter 1-{} (empty to cancel):", options.len()))?
            else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(None);
            }
            match parse_selection(&answer, options.len()) {
                Some(index) => return Ok(Some(index)),
                None => self.say(&format!(
                    "Please enter a number between 1 and {}.",
                    options.len()
                )),
            }
        }
    }

    /// Yes/no question. An empty answer takes `default`; end of input is "no".
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let Some(answer) = self.text(&format!("{prompt} {hint}"))? else {
                return Ok(false);
            };
            match parse_confirmation(&answer, default) {
                Some(value) => return Ok(value),
                None => self.say("Please answer y or n."),
            }
        }
    }
}

/// 1-based menu number → 0-based index.
pub fn parse_selection(answer: &str, len: usize) -> Option<usize> {
    answer
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}

pub fn parse_confirmation(answer: &str, default: bool) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Line editor backed prompter for interactive use.
pub struct TerminalPrompter {
    editor: DefaultEditor,
}

impl TerminalPrompter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn say(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Replays canned answers and records everything shown to the user.
#[cfg(test)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<String>,
    pub transcript: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| (*a).to_string()).collect(),
            transcript: Vec::new(),
        }
    }

    /// Everything printed or asked, one entry per line.
    pub fn output(&self) -> String {
        self.transcript.join("\n")
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.transcript.push(prompt.trim_end().to_string());
        Ok(self.answers.pop_front())
    }

    fn say(&mut self, line: &str) {
        self.transcript.push(line.to_string());
    }
}
