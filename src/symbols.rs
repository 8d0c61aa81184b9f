// src/symbols.rs

use colored::{ColoredString, Colorize};
use std::sync::LazyLock;

pub static ERROR: LazyLock<ColoredString> = LazyLock::new(|| "[X]".red());
pub static INFO: LazyLock<ColoredString> = LazyLock::new(|| "[i]".cyan());
pub static WARN: LazyLock<ColoredString> = LazyLock::new(|| "[!]".yellow());
pub static FILE: LazyLock<ColoredString> = LazyLock::new(|| "[F]".green());
pub static PAGE: LazyLock<ColoredString> = LazyLock::new(|| "[P]".blue());
