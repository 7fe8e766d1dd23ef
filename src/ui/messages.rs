use std::fmt;
use std::io::{self, Write};

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";

fn emit<T: fmt::Display>(
    out: &mut dyn Write,
    color: bool,
    fg: &str,
    icon: &str,
    msg: T,
) -> io::Result<()> {
    if color {
        writeln!(out, "{fg}{BOLD}{icon}{RESET} {msg}")
    } else {
        writeln!(out, "{icon} {msg}")
    }
}

pub fn info<T: fmt::Display>(out: &mut dyn Write, color: bool, msg: T) -> io::Result<()> {
    emit(out, color, FG_BLUE, ICON_INFO, msg)
}

pub fn success<T: fmt::Display>(out: &mut dyn Write, color: bool, msg: T) -> io::Result<()> {
    emit(out, color, FG_GREEN, ICON_OK, msg)
}

pub fn warning<T: fmt::Display>(out: &mut dyn Write, color: bool, msg: T) -> io::Result<()> {
    emit(out, color, FG_YELLOW, ICON_WARN, msg)
}
