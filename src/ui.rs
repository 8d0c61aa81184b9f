// src/ui.rs

use crate::{constants, models::File, symbols, utils};
use colored::*;

pub fn print_header(title: &str) {
    println!("\n{}", "═".repeat(constants::UI_WIDTH));
    println!(" {}", title.cyan().bold());
    println!("{}", "═".repeat(constants::UI_WIDTH));
}

pub fn print_sub_header(title: &str) {
    println!("\n--- {} ---", title.bold());
}

pub fn box_message(title: &str, content: &[&str], color_func: fn(ColoredString) -> ColoredString) {
    println!("\n┌{}┐", "─".repeat(constants::UI_WIDTH - 2));
    println!("  {}", color_func(title.bold()));
    println!("├{}┤", "─".repeat(constants::UI_WIDTH - 2));
    for line in content {
        println!("  {}", line);
    }
    println!("└{}┘", "─".repeat(constants::UI_WIDTH - 2));
}

/// 打印一条文件引用：`[F] 文件名 (大小) #id`
pub fn print_file(file: &File, indent: usize) {
    let name = if file.display_name.is_empty() {
        &file.filename
    } else {
        &file.display_name
    };
    let size = file
        .size
        .map(|s| format!(" ({})", utils::format_size(s)))
        .unwrap_or_default();
    println!(
        "{}{} {}{} {}",
        " ".repeat(indent),
        *symbols::FILE,
        utils::truncate_text(name, 60),
        size.dimmed(),
        format!("#{}", file.id).dimmed()
    );
}

pub fn print_page(title: &str, indent: usize) {
    println!(
        "{}{} {}",
        " ".repeat(indent),
        *symbols::PAGE,
        utils::truncate_text(title, 70)
    );
}
