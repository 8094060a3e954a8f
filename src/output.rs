//! Console output: colored human-readable lines and pretty JSON.
//!
//! Colors are best effort. They are off when `NO_COLOR` is set or stdout is
//! not a terminal.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

use crossterm::style::{style, Stylize};
use serde::Serialize;

/// Default padding width for key/value keys.
const KEY_WIDTH: usize = 14;

/// Whether stdout should get ANSI colors.
#[must_use]
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal()
}

/// Line-oriented formatter over any writer.
pub struct Formatter<'a> {
    out: &'a mut dyn Write,
    color: bool,
    indent: usize,
    key_width: usize,
}

impl<'a> Formatter<'a> {
    /// Formatter writing to `out`.
    pub fn new(out: &'a mut dyn Write, color: bool) -> Self {
        Self {
            out,
            color,
            indent: 0,
            key_width: KEY_WIDTH,
        }
    }

    /// A formatter over the same writer with `spaces` more indentation.
    pub fn indent_by(&mut self, spaces: usize) -> Formatter<'_> {
        Formatter {
            out: &mut *self.out,
            color: self.color,
            indent: self.indent + spaces,
            key_width: self.key_width,
        }
    }

    /// Bold title.
    pub fn header(&mut self, title: &str) -> io::Result<()> {
        let text = self.paint(title, |s| style(s).bold().to_string());
        self.line(&text)
    }

    /// Cyan section title.
    pub fn subheader(&mut self, title: &str) -> io::Result<()> {
        let text = self.paint(title, |s| style(s).cyan().to_string());
        self.line(&text)
    }

    /// Plain line.
    pub fn info(&mut self, text: &str) -> io::Result<()> {
        self.line(text)
    }

    /// Green line.
    pub fn success(&mut self, text: &str) -> io::Result<()> {
        let text = self.paint(text, |s| style(s).green().to_string());
        self.line(&text)
    }

    /// Yellow line.
    pub fn warn(&mut self, text: &str) -> io::Result<()> {
        let text = self.paint(text, |s| style(s).yellow().to_string());
        self.line(&text)
    }

    /// Red line.
    pub fn error(&mut self, text: &str) -> io::Result<()> {
        let text = self.paint(text, |s| style(s).red().to_string());
        self.line(&text)
    }

    /// `• text`
    pub fn bullet(&mut self, text: &str) -> io::Result<()> {
        self.line(&format!("• {text}"))
    }

    /// Aligned `key:   value` line.
    pub fn kv(&mut self, key: &str, value: impl Display) -> io::Result<()> {
        let key = format!("{:<width$}", format!("{key}:"), width = self.key_width);
        let key = self.paint(&key, |s| style(s).dark_grey().to_string());
        self.line(&format!("{key} {value}"))
    }

    /// Header text with an optional yellow `[note]` suffix.
    pub fn tagged(&mut self, title: &str, note: &str) -> io::Result<()> {
        let title = self.paint(title, |s| style(s).cyan().to_string());
        if note.is_empty() {
            return self.line(&title);
        }
        let note = self.paint(&format!("[{note}]"), |s| style(s).yellow().to_string());
        self.line(&format!("{title}  {note}"))
    }

    /// Prompt without a trailing newline, flushed.
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}{}", " ".repeat(self.indent), text)?;
        self.out.flush()
    }

    fn paint(&self, text: &str, apply: impl Fn(&str) -> String) -> String {
        if self.color {
            apply(text)
        } else {
            text.to_string()
        }
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}{}", " ".repeat(self.indent), text)
    }
}

/// Write `value` as indented JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
