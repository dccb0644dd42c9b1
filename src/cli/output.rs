//! What the CLI prints.
//!
//! Results go to stdout uncolored so scripts can consume them. Diagnostics
//! go to stderr. `colored` honors NO_COLOR and CLICOLOR on its own.

use std::fmt::Display;

use colored::Colorize;

pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "warning".yellow(), msg);
}

/// Completed change to the database, e.g. `Imported: Arthur (31 members)`.
pub fn action(label: &str, msg: &(impl Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

pub fn header(msg: &str) {
    println!("{}", msg.cyan().bold());
}

/// Status tag such as `CHILD_ADDED`, printed alone on its line.
pub fn tag(tag: &str) {
    println!("{tag}");
}

/// Related members on one line, space separated. No members prints an empty line.
pub fn names(names: &[String]) {
    println!("{}", names.join(" "));
}

/// Plain value: a path or a rendered config.
pub fn value(msg: &(impl Display + ?Sized)) {
    println!("{msg}");
}
