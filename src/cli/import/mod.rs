//! Import command - creates users from a JSON file

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::clock::SystemClock;
use crate::domain::user::{User, UserRepository};
use crate::infrastructure::user::{CreateUserRequest, InMemoryUserRepository, UserService};

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON file holding an array of `{ "name": ..., "email": ... }` objects
    pub file: PathBuf,

    /// First ID to assign, overriding `registry.first_id`
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    pub first_id: Option<i64>,
}

/// One entry of the import file
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRecord {
    pub name: String,
    pub email: String,
}

/// A record the service refused
#[derive(Debug)]
pub struct Rejection {
    /// Position of the record in the input
    pub index: usize,
    pub email: String,
    pub reason: String,
}

/// Outcome of an import run
#[derive(Debug, Default)]
pub struct ImportReport {
    pub created: Vec<User>,
    pub rejected: Vec<Rejection>,
}

/// Parse the import file contents
pub fn parse_records(json: &str) -> anyhow::Result<Vec<ImportRecord>> {
    serde_json::from_str(json).context("Import file must be a JSON array of {name, email} objects")
}

/// Create every record in order, collecting rejections instead of stopping
pub async fn import_users<R: UserRepository>(
    service: &UserService<R>,
    records: Vec<ImportRecord>,
) -> ImportReport {
    let mut report = ImportReport::default();

    for (index, record) in records.into_iter().enumerate() {
        let email = record.email.clone();
        let request = CreateUserRequest {
            name: record.name,
            email: record.email,
        };

        match service.create(request).await {
            Ok(user) => report.created.push(user),
            Err(e) => {
                warn!(index, email = %email, error = %e, "Skipping record");
                report.rejected.push(Rejection {
                    index,
                    email,
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}

/// Run the import and print the persisted users as JSON
pub async fn run(args: ImportArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();

    let contents = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let records = parse_records(&contents)?;

    let first_id = args.first_id.unwrap_or(config.registry.first_id);
    let repository = Arc::new(InMemoryUserRepository::with_first_id(
        Arc::new(SystemClock::new()),
        first_id,
    )?);
    let service = UserService::new(repository);

    let report = import_users(&service, records).await;
    info!(
        created = report.created.len(),
        rejected = report.rejected.len(),
        "Import finished"
    );

    let users = service.list().await?;
    println!("{}", serde_json::to_string_pretty(&users)?);

    Ok(())
}
