//! CLI support: tracing init and the console batch observer.

use vaultlink_client::queue::{BatchItem, BatchObserver};

/// Initialize tracing for CLI binaries (RUST_LOG aware, warn by default so
/// progress output stays readable).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

/// Prints batch progress to stdout.
#[derive(Default)]
pub struct ConsoleObserver;

impl BatchObserver for ConsoleObserver {
    fn upload_started(&self, item: &BatchItem) {
        println!("Submitting {}...", item.name);
    }

    fn upload_finished(&self, item: &BatchItem, remote_id: &str) {
        println!("  {} -> {}", item.name, remote_id);
    }

    fn upload_failed(&self, item: &BatchItem, message: &str) {
        eprintln!("  {} failed: {}", item.name, message);
    }

    fn batch_complete(&self, submitted: usize, last_name: Option<&str>) {
        println!(
            "Submitted {} file(s), last: {}",
            submitted,
            last_name.unwrap_or("Nothing")
        );
    }
}

/// Parse a CLI batch item: `<file_id>` or `<file_id>:<display name>`.
pub fn parse_item(raw: &str) -> Result<BatchItem, String> {
    let (id_part, name) = match raw.split_once(':') {
        Some((id, name)) if !name.is_empty() => (id, name.to_string()),
        _ => (raw, raw.to_string()),
    };

    let file_id: u64 = id_part
        .parse()
        .map_err(|_| format!("Invalid file id in '{}': expected <id> or <id>:<name>", raw))?;

    Ok(BatchItem::new(file_id, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_with_and_without_name() {
        let item = parse_item("42:report.txt").unwrap();
        assert_eq!(item.file_id, 42);
        assert_eq!(item.name, "report.txt");

        let item = parse_item("7").unwrap();
        assert_eq!(item.file_id, 7);
        assert_eq!(item.name, "7");
    }

    #[test]
    fn test_parse_item_rejects_garbage() {
        assert!(parse_item("abc").is_err());
        assert!(parse_item("12abc:x").is_err());
    }
}
