//! filedesk CLI — manage files attached to stores, menus, organizations and
//! members.
//!
//! Reads FILEDESK_API_URL (or API_URL), FILEDESK_LOGIN_ID and
//! FILEDESK_PASSWORD. Logs in once per invocation.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use filedesk_api_client::{
    ApiResponse, FileServiceClient, UploadPayload, DEFAULT_EXPIRATION_MINUTES, DEFAULT_PAGE_SIZE,
};
use filedesk_cli::{confirm, init_tracing, render_categories, render_files_table};
use filedesk_core::{
    filter_by_type, Reference, ReferenceType, UploadFileCategory, UploadFileType,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "filedesk", about = "File service CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct ReferenceArgs {
    /// Owning entity type: store, menu, organization, member
    #[arg(long, default_value = "STORE", value_parser = parse_reference_type)]
    reference_type: ReferenceType,
    /// Owning entity id (positive)
    #[arg(long, default_value = "1")]
    reference_id: i64,
}

impl ReferenceArgs {
    fn reference(&self) -> anyhow::Result<Reference> {
        Ok(Reference::new(self.reference_type, self.reference_id)?)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file; the category decides the image or attachment endpoint
    Upload {
        /// Path to the file to upload
        file: std::path::PathBuf,
        /// Upload category, e.g. STORE_IMAGE or BUSINESS_LICENSE.
        /// Defaults to STORE_IMAGE for images, STORE_RENT_CONTRACT otherwise
        #[arg(long, value_parser = parse_category)]
        category: Option<UploadFileCategory>,
        #[command(flatten)]
        reference: ReferenceArgs,
    },
    /// List one page of files for a reference
    List {
        #[command(flatten)]
        reference: ReferenceArgs,
        /// Only this category
        #[arg(long, value_parser = parse_category)]
        category: Option<UploadFileCategory>,
        /// Page index, starting at 0
        #[arg(long, default_value = "0")]
        page: u32,
        /// Page size
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        size: u32,
        #[arg(long, value_enum, default_value = "table")]
        format: Format,
    },
    /// List all files for a reference, optionally only images or attachments
    Files {
        #[command(flatten)]
        reference: ReferenceArgs,
        /// image or attachment
        #[arg(long = "type", value_parser = parse_file_type)]
        file_type: Option<UploadFileType>,
        /// Only this category
        #[arg(long, value_parser = parse_category)]
        category: Option<UploadFileCategory>,
        #[arg(long, value_enum, default_value = "table")]
        format: Format,
    },
    /// Print a download URL for a file. With --reference-id the file is
    /// looked up first and a public file prints its public URL; otherwise a
    /// time-limited signed URL is requested
    Download {
        /// File id
        id: i64,
        /// Minutes a signed URL stays valid
        #[arg(long, default_value_t = DEFAULT_EXPIRATION_MINUTES)]
        expiration_minutes: u32,
        /// Owning entity type of the file
        #[arg(long, default_value = "STORE", value_parser = parse_reference_type)]
        reference_type: ReferenceType,
        /// Owning entity id of the file
        #[arg(long)]
        reference_id: Option<i64>,
    },
    /// Delete a file
    Delete {
        /// File id
        id: i64,
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },
    /// List upload categories by file type
    Categories,
}

fn parse_category(s: &str) -> Result<UploadFileCategory, String> {
    s.parse().map_err(|e: filedesk_core::ModelError| e.to_string())
}

fn parse_reference_type(s: &str) -> Result<ReferenceType, String> {
    s.parse().map_err(|e: filedesk_core::ModelError| e.to_string())
}

fn parse_file_type(s: &str) -> Result<UploadFileType, String> {
    s.parse().map_err(|e: filedesk_core::ModelError| e.to_string())
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Payload of a successful envelope, or the envelope's message as an error.
fn require_success<T>(response: ApiResponse<T>) -> anyhow::Result<T> {
    let message = response.message.clone();
    response
        .into_data()
        .ok_or_else(|| anyhow::anyhow!("Request was not successful: {}", message))
}

fn client() -> anyhow::Result<FileServiceClient> {
    FileServiceClient::from_env().context(
        "Failed to create API client. Check FILEDESK_API_URL and FILEDESK_* credentials",
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            file,
            category,
            reference,
        } => {
            let reference = reference.reference()?;
            let client = client()?;
            let payload = UploadPayload::from_path(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let category = category.unwrap_or_else(|| payload.default_category());
            tracing::info!(
                content_type = %payload.content_type,
                bytes = payload.len(),
                "Prepared upload"
            );
            let response = client.upload(payload, category, reference).await?;
            print_json(&require_success(response)?)?;
        }
        Commands::List {
            reference,
            category,
            page,
            size,
            format,
        } => {
            let reference = reference.reference()?;
            let client = client()?;
            let response = client.get_files(reference, category, page, size).await?;
            let page = require_success(response)?;
            match format {
                Format::Json => print_json(&page)?,
                Format::Table => {
                    print!("{}", render_files_table(&page.content));
                    println!(
                        "\nPage {} of {} ({} files total)",
                        page.page + 1,
                        page.total_pages.max(1),
                        page.total_elements
                    );
                }
            }
        }
        Commands::Files {
            reference,
            file_type,
            category,
            format,
        } => {
            let reference = reference.reference()?;
            let client = client()?;
            let response = client.get_files_by_reference(reference, category).await?;
            let mut files = require_success(response)?;
            if let Some(file_type) = file_type {
                files = filter_by_type(files, file_type);
            }
            match format {
                Format::Json => print_json(&files)?,
                Format::Table => print!("{}", render_files_table(&files)),
            }
        }
        Commands::Download {
            id,
            expiration_minutes,
            reference_type,
            reference_id,
        } => {
            let client = client()?;
            let response = match reference_id {
                Some(reference_id) => {
                    let reference = Reference::new(reference_type, reference_id)?;
                    let files =
                        require_success(client.get_files_by_reference(reference, None).await?)?;
                    let file = files
                        .into_iter()
                        .find(|f| f.id == id)
                        .with_context(|| format!("File {} not found for {}", id, reference))?;
                    client.download_link(&file, expiration_minutes).await?
                }
                None => client
                    .get_download_url(id, expiration_minutes)
                    .await?
                    .map(|download| download.download_url),
            };
            println!("{}", require_success(response)?);
        }
        Commands::Delete { id, yes } => {
            if !yes {
                let stdin = std::io::stdin();
                let confirmed = confirm(
                    &format!("Are you sure you want to delete file {}?", id),
                    &mut stdin.lock(),
                    &mut std::io::stdout(),
                )
                .context("Failed to read confirmation")?;
                if !confirmed {
                    println!("Aborted.");
                    return Ok(());
                }
            }
            client()?.delete_file(id).await?;
            print_json(
                &serde_json::json!({ "success": true, "message": format!("File {} deleted", id) }),
            )?;
        }
        Commands::Categories => print!("{}", render_categories()),
    }

    Ok(())
}
