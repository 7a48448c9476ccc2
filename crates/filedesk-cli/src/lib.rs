use std::io::{BufRead, Write};

use filedesk_core::{UploadFileCategory, UploadFileResponse, UploadFileType};

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Ask a yes/no question; anything but `y`/`yes` is a no.
pub fn confirm<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Render file records as a fixed-width table.
pub fn render_files_table(files: &[UploadFileResponse]) -> String {
    if files.is_empty() {
        return "No files found.\n".to_string();
    }

    let mut out = format!(
        "{:<8} {:<30} {:<28} {:>10} {:<10} {:<6}\n",
        "ID", "Original Filename", "Category", "Size", "Created", "Public"
    );
    out.push_str(&"-".repeat(97));
    out.push('\n');

    for file in files {
        let created = file
            .created_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<8} {:<30} {:<28} {:>10} {:<10} {:<6}\n",
            file.id,
            truncate_string(&file.original_file_name, 30),
            file.upload_file_category.as_str(),
            file.size_label(),
            created,
            if file.is_public { "yes" } else { "no" },
        ));
    }
    out
}

/// Categories grouped under their file type with the picker hint.
pub fn render_categories() -> String {
    let mut out = String::new();
    for file_type in [UploadFileType::Image, UploadFileType::Attachment] {
        out.push_str(&format!("{} ({})\n", file_type, file_type.accept_hint()));
        for category in UploadFileCategory::for_type(file_type) {
            out.push_str(&format!("  {:<28} {}\n", category.as_str(), category.label()));
        }
    }
    out
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
