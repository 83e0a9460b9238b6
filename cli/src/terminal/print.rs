use std::fmt::Display;

use crate::terminal::{colors, logging::PRINT_TARGET};
use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

/// Column count every rule and header is drawn to.
pub const WIDTH: usize = 64;

/// A labelled value in a report section.
pub type Row<'a> = (&'a str, ColoredString);

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

const BANNER: &str = r#"
         __      __                 _
        / /___ _/ /_ _      __(_)________
       / / __ `/ __ \ | /| / / / ___/ _ \
      / / /_/ / /_/ / |/ |/ / / /  /  __/
     /_/\__,_/_.___/|__/|__/_/_/   \___/
"#;

pub fn banner(no_banner: bool, quiet: u8) {
    if no_banner || quiet > 0 {
        return;
    }
    let version: String = format!("⟦ LABWIRE v{} ⟧", env!("CARGO_PKG_VERSION"));
    print(&format!("{}", BANNER.bright_green()));
    print(&titled_rule('═', &version.bright_green().bold()));
}

/// Section divider. Hidden from `-q` on.
pub fn header(title: &str, quiet: u8) {
    if quiet > 0 {
        return;
    }
    let title: String = format!("⟦ {} ⟧", title.to_uppercase());
    print(&titled_rule('─', &title.bright_green()));
}

pub fn rule() {
    print(&format!("{}", "═".repeat(WIDTH).color(colors::SEPARATOR)));
}

pub fn centered(msg: &str) {
    let pad: String = " ".repeat(WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{pad}{msg}"));
}

pub fn status_line(msg: impl Display) {
    print(&format!("{} {}", ">".color(colors::SEPARATOR), msg));
}

/// `> Key.....: value` lines, keys padded to the longest one.
pub fn details(rows: &[Row<'_>]) {
    let width: usize = key_width(rows);
    for (key, value) in rows {
        status_line(format!("{}{} {}", key.color(colors::PRIMARY), leader(key, width), value));
    }
}

/// `[idx] name` followed by one tree branch per row.
pub fn device_tree(idx: usize, name: &str, rows: &[Row<'_>]) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));

    let width: usize = key_width(rows);
    for (i, (key, value)) in rows.iter().enumerate() {
        let branch: &str = if i + 1 == rows.len() { "└─" } else { "├─" };
        print(&format!(
            " {} {}{} {}",
            branch.color(colors::SEPARATOR),
            key.color(colors::TEXT_DEFAULT),
            leader(key, width),
            value
        ));
    }
}

fn key_width(rows: &[Row<'_>]) -> usize {
    rows.iter().map(|(key, _)| key.width()).max().unwrap_or(0)
}

/// Dots from the end of `key` to one past the widest key, then the colon.
fn leader(key: &str, width: usize) -> ColoredString {
    format!("{}:", ".".repeat(width + 1 - key.width())).color(colors::SEPARATOR)
}

/// `fill` repeated on both sides of `title` so the line spans [`WIDTH`] columns.
fn titled_rule(fill: char, title: &ColoredString) -> String {
    let remaining: usize = WIDTH.saturating_sub(title.width());
    let left: String = fill.to_string().repeat(remaining / 2);
    let right: String = fill.to_string().repeat(remaining - remaining / 2);
    format!("{}{}{}", left.color(colors::SEPARATOR), title, right.color(colors::SEPARATOR))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
