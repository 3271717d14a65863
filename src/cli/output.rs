/// Diagnostic output helpers.
///
/// Everything here goes to stderr: stdout carries only the filter results.
use colored::*;

pub fn section_header(title: &str) {
    eprintln!("\n{}", title.bold().cyan());
    eprintln!("{}", "─".repeat(title.chars().count()).dimmed());
}

pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

pub fn action(message: &str) {
    eprintln!("{} {}", "▶".cyan(), message);
}

/// Tree structure item
pub fn tree_item(is_last: bool, label: &str, value: Option<&str>) {
    let prefix = if is_last { "└─" } else { "├─" };
    if let Some(val) = value {
        eprintln!("{} {}: {}", prefix.dimmed(), label, val);
    } else {
        eprintln!("{} {}", prefix.dimmed(), label);
    }
}

/// Key/value rows rendered as one tree
pub fn tree_section(items: &[(&str, String)]) {
    for (i, (label, value)) in items.iter().enumerate() {
        tree_item(i + 1 == items.len(), label, Some(value));
    }
}

/// Format a number with thousands separator
pub fn format_number<N: ToString>(n: N) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0u64), "0");
        assert_eq!(format_number(999usize), "999");
        assert_eq!(format_number(1000u64), "1,000");
        assert_eq!(format_number(123_456_789u64), "123,456,789");
    }
}
