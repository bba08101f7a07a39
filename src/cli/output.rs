//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print breadcrumb trail (cyan, joined by ` > `)
pub fn breadcrumb(names: &[String]) {
    if names.is_empty() {
        println!("{}", "(root)".cyan());
    } else {
        println!("{}", names.join(" > ").cyan());
    }
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print one aligned level-table row: name, value, percentage, share bar
pub fn level_row(name: &str, value: &str, percent: &str, bar_width: usize) {
    let bar = "█".repeat(bar_width);
    println!(
        "  {:<24} {:>10} {:>8}  {}",
        name,
        value,
        percent,
        bar.blue()
    );
}
