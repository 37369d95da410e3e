use crossterm::style::{Color, Stylize};

/// Print a success message in green to stdout.
pub fn success(msg: &str) {
    println!("{}", msg.with(Color::Green));
}

/// Print an error message in red to stderr.
pub fn error(msg: &str) {
    eprintln!("{}", msg.with(Color::Red));
}

/// Print a warning message in yellow to stderr.
pub fn warning(msg: &str) {
    eprintln!("{}", msg.with(Color::Yellow));
}

/// Print an info message in cyan to stdout.
pub fn info(msg: &str) {
    println!("{}", msg.with(Color::Cyan));
}

/// Print a secondary note in cyan to stderr, keeping stdout for results.
pub fn hint(msg: &str) {
    eprintln!("{}", msg.with(Color::Cyan));
}

/// Print a `label: value` line with the label in bold.
pub fn field(label: &str, value: &str) {
    println!("{} {}", format!("{label}:").bold(), value);
}
