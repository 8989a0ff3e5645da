use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::store::journal::Journal;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;
use std::fs;
use std::io::{Write, stdin, stdout};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Back up the ledger tables and the journal. Without `--compress`
    /// the destination is a directory receiving one copy per file; with
    /// it, a single .zip archive.
    pub fn backup(cfg: &Config, dest_file: &str, compress: bool) -> AppResult<()> {
        // 1. Collect the ledger files that exist so far
        let sources: Vec<PathBuf> = cfg
            .ledger_files()
            .into_iter()
            .filter(|p| p.exists())
            .collect();

        if sources.is_empty() {
            return Err(AppError::Backup(format!(
                "no ledger files found in {}",
                cfg.data_dir().display()
            )));
        }

        // 2. Write the backup
        let outcome = if compress {
            backup_zip(&sources, expand_tilde(dest_file))?
        } else {
            backup_copy(&sources, expand_tilde(dest_file))?
        };

        let Some(final_path) = outcome else {
            println!("❌ Backup cancelled by user.");
            return Ok(());
        };

        // 3. Journal entry (non-blocking)
        let journal = Journal::new(cfg.journal_path());
        if let Err(e) = journal.record(
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        ) {
            warning(format!("Failed to write journal entry: {e}"));
        }

        Ok(())
    }
}

fn file_name(path: &Path) -> AppResult<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::Backup(format!("invalid path: {}", path.display())))
}

/// Ask before clobbering an existing backup. Defaults to no.
fn confirm_overwrite(target: &Path) -> AppResult<bool> {
    println!(
        "⚠️  '{}' already exists.\nDo you want to overwrite it? [y/N]:",
        target.display()
    );

    print!("> ");
    stdout().flush().ok();

    let mut answer = String::new();
    stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();

    Ok(answer == "y" || answer == "yes")
}

/// Copy every ledger file into the destination directory.
fn backup_copy(sources: &[PathBuf], dest: PathBuf) -> AppResult<Option<PathBuf>> {
    fs::create_dir_all(&dest)?;

    for src in sources {
        let target = dest.join(file_name(src)?);
        if target.exists() && !confirm_overwrite(&target)? {
            return Ok(None);
        }
    }

    for src in sources {
        fs::copy(src, dest.join(file_name(src)?))?;
    }

    println!("✅ Backup created: {}", dest.display());
    Ok(Some(dest))
}

/// Pack every ledger file into one .zip archive.
fn backup_zip(sources: &[PathBuf], dest: PathBuf) -> AppResult<Option<PathBuf>> {
    let mut dest = dest;
    if dest.extension().is_none() {
        dest.set_extension("zip");
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    if dest.exists() && !confirm_overwrite(&dest)? {
        return Ok(None);
    }

    let file = fs::File::create(&dest)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for src in sources {
        let mut f = fs::File::open(src)?;
        zip.start_file(file_name(src)?, options)
            .map_err(|e| AppError::Backup(e.to_string()))?;
        std::io::copy(&mut f, &mut zip)?;
    }

    zip.finish().map_err(|e| AppError::Backup(e.to_string()))?;

    println!("📦 Compressed backup created: {}", dest.display());
    Ok(Some(dest))
}
