//! Patient export command.

use std::path::Path;

use super::{CliError, open_service};

pub async fn run(output: &Path) -> Result<(), CliError> {
    let service = open_service().await?;
    let count = service.export_patients_to(output).await?;

    println!("Exported {count} records to {}.", output.display());
    Ok(())
}
