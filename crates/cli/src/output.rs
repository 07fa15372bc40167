//! Terminal output utilities
//!
//! Colours are applied only when the stream supports them, so the same
//! strings can be asserted on in tests and piped into files.

use console::{pad_str, truncate_str, Alignment, Term};
use karia_search::{AvailableResource, SearchResultItem};
use owo_colors::{OwoColorize, Stream};

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".if_supports_color(Stream::Stdout, |t| t.green()), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".if_supports_color(Stream::Stderr, |t| t.red()), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".if_supports_color(Stream::Stderr, |t| t.yellow()), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".if_supports_color(Stream::Stdout, |t| t.blue()), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.if_supports_color(Stream::Stdout, |t| t.bold()));
        println!("{}", "─".repeat(console::measure_text_width(message)));
    }
}

/// Width used for listings: the terminal width, or 100 when not a terminal
pub fn listing_width() -> usize {
    Term::stdout()
        .size_checked()
        .map_or(100, |(_, cols)| usize::from(cols))
}

const LABEL_WIDTH: usize = 22;
const NAME_WIDTH: usize = 28;

/// One line per result: resource label, name, offer and phone
pub fn format_item(item: &SearchResultItem, width: usize) -> String {
    let label = pad_str(&item.source_display, LABEL_WIDTH, Alignment::Left, Some("…"));
    let name = pad_str(item.display_name(), NAME_WIDTH, Alignment::Left, Some("…"));
    let mut rest = item.offer.clone().unwrap_or_default();
    if let Some(ref phone) = item.phone {
        if !rest.is_empty() {
            rest.push_str("  ");
        }
        rest.push_str(phone);
    }

    let used = LABEL_WIDTH + NAME_WIDTH + 2;
    let rest = truncate_str(&rest, width.saturating_sub(used).max(10), "…");
    format!(
        "{} {} {}",
        label.if_supports_color(Stream::Stdout, |t| t.cyan()),
        name.if_supports_color(Stream::Stdout, |t| t.bold()),
        rest
    )
    .trim_end()
    .to_string()
}

/// Print a result listing followed by a count
pub fn print_items(items: &[SearchResultItem]) {
    let width = listing_width();
    for item in items {
        println!("{}", format_item(item, width));
    }
    println!(
        "{}",
        format_count(items.len(), "result", "results").if_supports_color(Stream::Stdout, |t| t.dimmed())
    );
}

/// One line per available resource
pub fn format_resource(resource: &AvailableResource) -> String {
    let descriptor = &resource.descriptor;
    let groups: Vec<&str> = descriptor
        .field_groups
        .iter()
        .filter_map(|g| g.columns().first().map(String::as_str))
        .collect();
    format!(
        "{} {} [{}]",
        pad_str(&descriptor.name, 14, Alignment::Left, None),
        pad_str(&descriptor.display_label, LABEL_WIDTH, Alignment::Left, None),
        groups.join(", ")
    )
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{mins}m {remaining_secs:.0}s")
    }
}

/// Format an object size for display
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
