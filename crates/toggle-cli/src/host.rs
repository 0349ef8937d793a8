use crate::error::CliError;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command as ProcessCommand;
use toggle_core::{BoxError, Editor};

/// How the chosen file is "opened".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opener {
    /// Print the path on stdout (for `$(toggle-file switch ...)` style use).
    Print,
    /// Run a program with the path appended to its arguments.
    Command(Vec<String>),
}

impl Opener {
    /// `None` prints; otherwise the command line is split into words with shell quoting rules
    /// (`'...'`, `"..."`, backslash escapes). Nothing else of the shell is interpreted.
    pub fn parse(command: Option<&str>) -> Result<Self, CliError> {
        let Some(command) = command else {
            return Ok(Opener::Print);
        };
        let argv = shell_words::split(command).map_err(|e| CliError::InvalidOpenCommand {
            command: command.to_string(),
            message: e.to_string(),
        })?;
        if argv.is_empty() {
            return Err(CliError::EmptyOpenCommand);
        }
        Ok(Opener::Command(argv))
    }
}

/// The terminal stands in for an editor: the "active view" is the file given on the command
/// line, and opening means printing or launching a program.
pub struct CliEditor<W> {
    current: PathBuf,
    opener: Opener,
    out: W,
}

impl<W: Write> CliEditor<W> {
    pub fn new(current: PathBuf, opener: Opener, out: W) -> Self {
        Self {
            current,
            opener,
            out,
        }
    }
}

impl<W: Write> Editor for CliEditor<W> {
    fn current_file_path(&self) -> Option<PathBuf> {
        Some(self.current.clone())
    }

    fn open_path(&mut self, path: &Path) -> Result<(), BoxError> {
        match &self.opener {
            Opener::Print => {
                writeln!(self.out, "{}", path.display())?;
                self.out.flush()?;
            }
            Opener::Command(argv) => {
                let status = ProcessCommand::new(&argv[0])
                    .args(&argv[1..])
                    .arg(path)
                    .status()?;
                if !status.success() {
                    return Err(Box::new(CliError::OpenCommandFailed {
                        command: argv.join(" "),
                        status,
                    }));
                }
            }
        }
        self.current = path.to_path_buf();
        Ok(())
    }
}
