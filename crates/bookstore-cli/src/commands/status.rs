//! Status command implementation - list applied migrations

use anyhow::{Context, Result};
use bookstore_migrate::Runner;

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::{load_config, open_database, print_table};

/// Execute the status command
pub fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let (config, root) = load_config(global)?;
    let migrations_dir = config.migration_path_absolute(&root);
    let db = open_database(&config, global)?;
    let runner = Runner::new(&db, &migrations_dir);

    let entries = runner.status()?;

    match args.output {
        StatusOutput::Json => {
            let json =
                serde_json::to_string_pretty(&entries).context("Failed to serialize status")?;
            println!("{json}");
        }
        StatusOutput::Table => {
            if entries.is_empty() {
                println!("No migrations applied");
                return Ok(());
            }
            println!("Applied migrations ({}):", entries.len());
            let rows: Vec<Vec<String>> = entries
                .iter()
                .map(|e| vec![e.version.clone(), e.applied_at.clone()])
                .collect();
            print_table(&["VERSION", "APPLIED AT"], &rows);
        }
    }
    Ok(())
}
