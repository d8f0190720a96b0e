//! Yes/no confirmation for interactive commands.

use std::io::{self, BufRead, Write};

use console::style;
use tracing::{debug, trace};

/// Interpret an answer line. Anything but an explicit yes is a no.
pub fn parse_answer(line: &str) -> bool {
    matches!(
        line.trim().to_lowercase().as_str(),
        "y" | "yes" | "是" | "好"
    )
}

/// Ask `question` on stderr and read one answer line from `input`.
///
/// End of input counts as "no".
pub fn confirm_from<R: BufRead>(question: &str, input: &mut R) -> io::Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{} {} ", style(question).bold(), style("[y/N]").dim())?;
    stderr.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    trace!(bytes = read, "Read confirmation answer");
    let answer = read > 0 && parse_answer(&line);
    debug!(answer, "Confirmation answered");
    Ok(answer)
}

/// Ask `question` and read the answer from stdin.
pub fn confirm(question: &str) -> io::Result<bool> {
    confirm_from(question, &mut io::stdin().lock())
}
