//! Line editing with persistent history
//!
//! History is written back when the `Shell` is dropped, so every way out of
//! the session loop (quit command, end of input, read error) saves it.

use crate::config::ShellConfig;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Prompt shown before anything has been pushed
pub const INITIAL_PROMPT: &str = "[  ]> ";

pub struct Shell {
    editor: DefaultEditor,
    history_file: Option<PathBuf>,
    prompt: String,
}

impl Shell {
    pub fn open(config: &ShellConfig) -> Result<Self, ReadlineError> {
        let mut editor = DefaultEditor::new()?;
        let history_file = config.prepare_history();

        if let Some(ref path) = history_file {
            // A missing file just means a first session
            if let Err(e) = editor.load_history(path) {
                debug!("no history loaded from {}: {}", path.display(), e);
            }
        }

        Ok(Shell {
            editor,
            history_file,
            prompt: INITIAL_PROMPT.to_string(),
        })
    }

    pub fn set_prompt(&mut self, prompt: String) {
        self.prompt = prompt;
    }

    /// Next line of input, cleaned; `None` at end of input or on interrupt
    pub fn read_line(&mut self) -> Option<String> {
        match self.editor.readline(&self.prompt) {
            Ok(raw) => {
                let line = clean_line(&raw);
                if !line.is_empty() {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        debug!("history entry not added: {}", e);
                    }
                }
                Some(line)
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => None,
            Err(e) => {
                warn!("read failed: {}", e);
                None
            }
        }
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        if let Some(ref path) = self.history_file {
            if let Err(e) = self.editor.save_history(path) {
                warn!("failed to save history to {}: {}", path.display(), e);
            }
        }
    }
}

/// Drop digit-group commas and surrounding whitespace
pub fn clean_line(raw: &str) -> String {
    raw.replace(',', "").trim().to_string()
}
