//! Handles all user-facing output for the CLI.
//!
//! Element listings go to stdout; the run summary goes to stderr so it never mixes
//! with anything a caller might pipe.

use std::io::Write;
use std::path::Path;

use atty::Stream;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::syntax::TopLevel;
use crate::transform::{Obfuscated, Obfuscator};

const PREVIEW_CHARS: usize = 100;

/// Colors only when the stream is a terminal. `ColorChoice::Auto` alone still colors pipes.
fn color_choice(stream: Stream) -> ColorChoice {
    if atty::is(stream) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// One-line rendering of emitted code: every whitespace run becomes one space, truncated.
pub fn preview(code: &str) -> String {
    let collapsed = code.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(PREVIEW_CHARS).collect()
}

/// Prints every non-whitespace element as `Kind(preview)`.
pub fn print_elements(obfuscator: &mut Obfuscator, elements: &[TopLevel]) {
    let mut stdout = StandardStream::stdout(color_choice(Stream::Stdout));
    for element in elements.iter().filter(|e| !e.is_spaces()) {
        let code = obfuscator.render(std::slice::from_ref(element)).code;
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
        let _ = write!(stdout, "{}", element.kind());
        let _ = stdout.reset();
        let _ = writeln!(stdout, "({})", preview(&code));
    }
}

pub fn print_summary(input: &Path, output: &Path, result: &Obfuscated) {
    let mut stderr = StandardStream::stderr(color_choice(Stream::Stderr));
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
    let _ = write!(stderr, "Obfuscated");
    let _ = stderr.reset();
    let _ = writeln!(
        stderr,
        " {} -> {} ({} elements, {} classes shuffled)",
        input.display(),
        output.display(),
        result.elements,
        result.classes_shuffled
    );
}
