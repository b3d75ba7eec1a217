use colored::*;

pub fn print_header(text: &str) {
    println!("\n{}", text.bright_cyan().bold());
    println!("{}", "=".repeat(text.len()).bright_cyan());
}

pub fn print_warning(text: &str) {
    println!("{}", text.yellow());
}

pub fn print_info(text: &str) {
    println!("{}", text.blue());
}

/// Numbered list under a bold label
pub fn print_list(label: &str, items: &[String]) {
    println!("{}", label.bold());
    if items.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for (i, item) in items.iter().enumerate() {
        println!("  {}. {}", i + 1, item);
    }
}
