//! Interactive read-eval-print loop.
//!
//! Every line is loaded and run on a fresh machine. Errors are reported and
//! the loop keeps going; `exit` or end of input at the prompt ends it.

use std::io::{self, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use svm_core::{Completion, Console, Machine, ProgramLoader, SvmConfig, SvmError, SvmResult};

const PROMPT: &str = "> ";

/// What the loop does after evaluating one line
#[derive(Debug)]
pub enum LineOutcome {
    Continue,
    Error(SvmError),
    Quit,
}

pub struct Repl {
    editor: DefaultEditor,
    config: SvmConfig,
}

impl Repl {
    pub fn new(config: SvmConfig) -> rustyline::Result<Self> {
        Ok(Repl {
            editor: DefaultEditor::new()?,
            config,
        })
    }

    /// Run until the user quits
    pub fn run(&mut self) -> rustyline::Result<()> {
        println!("Hit CTRL+D or type \"exit\" to quit.");

        loop {
            let line = match self.editor.readline(PROMPT) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err),
            };
            if line.trim().is_empty() {
                continue;
            }
            self.editor.add_history_entry(line.as_str())?;

            match self.eval(&line) {
                LineOutcome::Continue => {}
                LineOutcome::Error(err) => eprintln!("error: {}", err),
                LineOutcome::Quit => break,
            }
        }

        Ok(())
    }

    /// Load and run one line of source
    pub fn eval(&mut self, line: &str) -> LineOutcome {
        let program = match ProgramLoader::load(line, &self.config) {
            Ok(program) => program,
            Err(err) => return LineOutcome::Error(err),
        };

        let mut console = EditorConsole::new(&mut self.editor);
        let result = Machine::with_config(&self.config, program, &mut console).run();
        if let Err(err) = console.finish() {
            return LineOutcome::Error(err);
        }

        match result {
            Ok(Completion::Finished) => LineOutcome::Continue,
            Ok(Completion::Exited) => LineOutcome::Quit,
            Err(SvmError::Interrupted) => {
                debug!("run interrupted");
                LineOutcome::Continue
            }
            Err(err) => LineOutcome::Error(err),
        }
    }
}

/// Console that reads through the line editor.
///
/// Text printed without a trailing newline is held back and used as the
/// prompt of the next `read`, so the editor does not redraw over it.
struct EditorConsole<'a> {
    editor: &'a mut DefaultEditor,
    line: PartialLine,
}

impl<'a> EditorConsole<'a> {
    fn new(editor: &'a mut DefaultEditor) -> Self {
        EditorConsole {
            editor,
            line: PartialLine::default(),
        }
    }

    /// Write out any held-back partial line
    fn finish(&mut self) -> SvmResult<()> {
        let rest = self.line.take();
        if rest.is_empty() {
            return Ok(());
        }
        let mut out = io::stdout().lock();
        out.write_all(rest.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}

impl Console for EditorConsole<'_> {
    fn read_line(&mut self) -> SvmResult<String> {
        let prompt = self.line.take();
        match self.editor.readline(&prompt) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted) => Err(SvmError::Interrupted),
            Err(ReadlineError::Eof) => Err(SvmError::EndOfInput),
            Err(ReadlineError::Io(err)) => Err(err.into()),
            Err(err) => Err(SvmError::Io(err.to_string())),
        }
    }

    fn write_str(&mut self, text: &str) -> SvmResult<()> {
        if let Some(complete) = self.line.push(text) {
            let mut out = io::stdout().lock();
            out.write_all(complete.as_bytes())?;
            out.flush()?;
        }
        Ok(())
    }
}

/// Output split at the last newline
#[derive(Debug, Default)]
struct PartialLine {
    pending: String,
}

impl PartialLine {
    /// Append text; returns everything up to and including the last newline
    fn push(&mut self, text: &str) -> Option<String> {
        self.pending.push_str(text);
        let end = self.pending.rfind('\n')?;
        Some(self.pending.drain(..=end).collect())
    }

    fn take(&mut self) -> String {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_line_holds_text_after_last_newline() {
        let mut line = PartialLine::default();
        assert_eq!(line.push("Enter: "), None);
        assert_eq!(line.push("a\nb\nc"), Some("Enter: a\nb\n".to_string()));
        assert_eq!(line.take(), "c");
        assert_eq!(line.take(), "");
    }

    fn repl() -> Repl {
        Repl::new(SvmConfig::new()).expect("editor setup failed")
    }

    #[test]
    fn eval_maps_run_results_to_outcomes() {
        let mut repl = repl();
        assert!(matches!(repl.eval("1 2 +"), LineOutcome::Continue));
        assert!(matches!(
            repl.eval("1 0 /"),
            LineOutcome::Error(SvmError::DivisionByZero)
        ));
        assert!(matches!(repl.eval("exit"), LineOutcome::Quit));
        assert!(matches!(repl.eval("1 exit 2"), LineOutcome::Quit));
    }

    #[test]
    fn eval_reports_load_errors_and_keeps_going() {
        let mut repl = repl();
        assert!(matches!(
            repl.eval("'open"),
            LineOutcome::Error(SvmError::Lex { .. })
        ));
        assert!(matches!(
            repl.eval("frob"),
            LineOutcome::Error(SvmError::UnknownOpcode(ref word)) if word == "frob"
        ));
        assert!(matches!(repl.eval("2 3 *"), LineOutcome::Continue));
    }
}
