//! assetkit CLI — list and clear a media library.
//!
//! Commands:
//!   assetkit list [--json]     List every asset (id and kind)
//!   assetkit delete            Delete every asset in one change
//!
//! Options:
//!   --root <dir>               Library root (default: $ASSETKIT_ROOT or ~/.assetkit/library)

use std::path::PathBuf;
use std::process::ExitCode;

use assetkit_core::{paths, DirectoryStore, MediaLibrary};

fn main() -> ExitCode {
    env_logger::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let root = match take_root(&mut args) {
        Ok(root) => root.unwrap_or_else(paths::library_root),
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    if args.is_empty() {
        print_usage();
        return ExitCode::SUCCESS;
    }

    log::debug!("assetkit: library root {}", root.display());
    let library = MediaLibrary::new(DirectoryStore::open(root));

    let result = match args[0].as_str() {
        "list" => cmd_list(&library, &args[1..]),
        "delete" => cmd_delete(&library),
        other => {
            eprintln!("unknown command: {}", other);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list(library: &MediaLibrary<DirectoryStore>, args: &[String]) -> Result<(), String> {
    let json = args.iter().any(|a| a == "--json");
    let assets = library.list().map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&assets).map_err(|e| e.to_string())?;
        println!("{}", out);
        return Ok(());
    }

    if assets.is_empty() {
        println!("library is empty");
        return Ok(());
    }
    for asset in &assets {
        println!("{}  {}", asset.id(), asset.kind());
    }
    Ok(())
}

fn cmd_delete(library: &MediaLibrary<DirectoryStore>) -> Result<(), String> {
    let summary = library.delete().map_err(|e| e.to_string())?;
    println!("deleted {} assets", summary.requested);
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Remove `--root <dir>` from `args`, returning the directory if given.
fn take_root(args: &mut Vec<String>) -> Result<Option<PathBuf>, String> {
    let Some(pos) = args.iter().position(|a| a == "--root") else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        return Err("--root requires a directory".into());
    }
    let dir = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(PathBuf::from(dir)))
}

fn print_usage() {
    println!("assetkit - media library maintenance");
    println!();
    println!("usage: assetkit [--root <dir>] <command> [args]");
    println!();
    println!("commands:");
    println!("  list [--json]          List every asset (id and kind)");
    println!("  delete                 Delete every asset in one change");
}
