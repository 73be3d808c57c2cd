//! Migrate command implementation - apply pending migrations in order

use anyhow::Result;
use bookstore_migrate::Runner;
use std::time::Instant;

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::{load_config, open_database, ExitCode};

/// Execute the migrate command
pub fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let start_time = Instant::now();
    let (config, root) = load_config(global)?;
    let migrations_dir = config.migration_path_absolute(&root);
    let db = open_database(&config, global)?;
    let runner = Runner::new(&db, &migrations_dir);

    if global.verbose {
        eprintln!(
            "[verbose] Reading migrations from {}",
            migrations_dir.display()
        );
    }

    if args.dry_run {
        let pending = runner.pending()?;
        if pending.is_empty() {
            println!("No pending migrations");
            return Ok(());
        }
        println!("Pending migrations ({}):", pending.len());
        for file in &pending {
            println!("  - {}", file.version);
        }
        return Ok(());
    }

    match runner.migrate() {
        Ok(applied) => {
            let duration = start_time.elapsed();
            if applied.is_empty() {
                println!("No pending migrations");
            } else {
                for version in &applied {
                    println!("  \u{2713} {}", version);
                }
                println!(
                    "\nApplied {} migration(s) in {}ms",
                    applied.len(),
                    duration.as_millis()
                );
            }
            println!("Migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            eprintln!("  \u{2717} {}", e);
            Err(ExitCode(1).into())
        }
    }
}
