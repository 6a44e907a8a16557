//! Interactive prompts
//!
//! Everything the guided workflows ask goes through [`Prompter`], so they can be
//! driven by a scripted prompter in tests. [`TerminalPrompter`] is the dialoguer
//! implementation used by the binary; it writes to stderr to keep stdout clean.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use dialoguer::console::Term;
use dialoguer::{Confirm, FuzzySelect, Input, Select};
use indexmap::IndexMap;
use tracing::debug;

use crate::errors::{ReqbookError, Result};

/// Source of interactive answers
pub trait Prompter {
    /// Free text input, may be empty
    fn input(&mut self, prompt: &str) -> Result<String>;

    fn input_with_default(&mut self, prompt: &str, default: &str) -> Result<String>;

    /// Pick one of `items`, returning its index
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize>;

    /// Like [`Prompter::select`], with type-to-filter
    fn fuzzy_select(&mut self, prompt: &str, items: &[String]) -> Result<usize>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Open `content` in the editor and return what was saved.
    /// `extension` (e.g. `.json`) is the temp file suffix.
    fn edit_text(&mut self, content: &str, extension: &str) -> Result<String>;

    /// Show a message without asking anything
    fn notice(&mut self, message: &str);
}

/// Select one of `items` or type a new value
///
/// The last choice is `add_label`; picking it asks for the value. With no items
/// the value is asked for directly.
pub fn select_with_add(prompter: &mut dyn Prompter, prompt: &str, items: &[String], add_label: &str) -> Result<String> {
    if items.is_empty() {
        return prompter.input(prompt);
    }

    let mut choices = items.to_vec();
    choices.push(add_label.to_string());

    let index = prompter.select(prompt, &choices, 0)?;
    if index < items.len() {
        Ok(items[index].clone())
    } else {
        prompter.input(add_label)
    }
}

/// Collect key/value pairs while the user keeps confirming `question`
///
/// Keys for which `refuse` returns a message are not added; the message is shown
/// and the loop asks again.
pub fn prompt_while_confirm(
    prompter: &mut dyn Prompter,
    question: &str,
    key_prompt: &str,
    value_prompt: &str,
    refuse: &dyn Fn(&str) -> Option<String>,
) -> Result<IndexMap<String, String>> {
    let mut pairs = IndexMap::new();

    while prompter.confirm(question, false)? {
        let key = prompter.input(key_prompt)?.trim().to_string();
        if key.is_empty() {
            prompter.notice("Key must not be empty");
            continue;
        }
        if let Some(message) = refuse(&key) {
            prompter.notice(&message);
            continue;
        }

        let value = prompter.input(value_prompt)?;
        pairs.insert(key, value);
    }

    Ok(pairs)
}

/// Terminal prompter backed by dialoguer and an external editor
pub struct TerminalPrompter {
    term: Term,
    editor: String,
    tmp_dir: PathBuf,
}

impl TerminalPrompter {
    pub fn new(editor: impl Into<String>, tmp_dir: impl Into<PathBuf>) -> Self {
        Self {
            term: Term::stderr(),
            editor: editor.into(),
            tmp_dir: tmp_dir.into(),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str) -> Result<String> {
        Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text_on(&self.term)?)
    }

    fn input_with_default(&mut self, prompt: &str, default: &str) -> Result<String> {
        Ok(Input::<String>::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .allow_empty(true)
            .interact_text_on(&self.term)?)
    }

    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        Ok(Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_on(&self.term)?)
    }

    fn fuzzy_select(&mut self, prompt: &str, items: &[String]) -> Result<usize> {
        Ok(FuzzySelect::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_on(&self.term)?)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact_on(&self.term)?)
    }

    fn edit_text(&mut self, content: &str, extension: &str) -> Result<String> {
        fs::create_dir_all(&self.tmp_dir).map_err(|e| ReqbookError::from_io(e, &self.tmp_dir))?;

        let mut file = tempfile::Builder::new()
            .prefix("reqbook-edit-")
            .suffix(extension)
            .tempfile_in(&self.tmp_dir)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;

        let mut words = self.editor.split_whitespace();
        let program = words
            .next()
            .ok_or_else(|| ReqbookError::Config("no editor configured".to_string()))?;

        debug!(editor = %self.editor, path = %file.path().display(), "Opening editor");

        let status = Command::new(program)
            .args(words)
            .arg(file.path())
            .status()
            .map_err(|e| ReqbookError::Prompt(format!("failed to start editor {:?}: {}", program, e)))?;

        if !status.success() {
            return Err(ReqbookError::Prompt(format!("editor {:?} exited with {}", program, status)));
        }

        // read by path: some editors replace the file instead of writing through
        Ok(fs::read_to_string(file.path())?)
    }

    fn notice(&mut self, message: &str) {
        let _ = self.term.write_line(message);
    }
}
