//! Sonora tag tool
//!
//! # What this program is
//! A small command-line front end for editing ID3v2 tags in `.mp3` files:
//! title, artist, album, year, genre, comment, track, disc, composer,
//! album artist and the front cover.
//!
//! # Mental model
//! - `sonora_tag::core::session::EditSession` = one open file: what's on disk vs. what you edited
//! - "save" = write canonical fields, rebuild extended frames, rebuild the cover,
//!   then commit the whole tag in one write and re-read it
//! - The file on disk is the only source of truth; nothing is cached between runs
//!
//! # Architecture constraints (on purpose)
//! - main.rs parses args (clap) and prints. Everything else lives in the library.
//! - Every command is "open -> do thing -> report". Errors are printed, never retried.
//!
//! Logging goes through `log`; set `RUST_LOG=debug` to see what the tag layer does.

mod cli;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, anyhow, bail};

use sonora_tag::core::error::Error;
use sonora_tag::core::session::load_snapshot;
use sonora_tag::core::settings::{self, Settings};
use sonora_tag::core::tags::{import_cover, strip};
use sonora_tag::core::types::{CoverChange, Field, SnapshotDiff, TagSnapshot};
use sonora_tag::core::{CoverEdit, Edits, apply_edits_many};

use crate::cli::{Command, CoverArg};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Usage errors and --help exit here (status 2 / 0).
    let cmd = cli::from_matches(&cli::command().get_matches());

    match run(cmd) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cmd: Command) -> anyhow::Result<()> {
    let settings_path = settings::default_path();
    let settings = Settings::load(&settings_path)
        .with_context(|| format!("reading {}", settings_path.display()))?;
    let options = settings.save_options();

    match cmd {
        Command::Show { files } => {
            let mut failed = 0;
            for file in &files {
                match load_snapshot(file, options) {
                    Ok(snap) => print_snapshot(file, &snap),
                    Err(e) => {
                        eprintln!("{}: {e}", file.display());
                        failed += 1;
                    }
                }
            }
            check_failures(failed, files.len())
        }

        Command::Set {
            files,
            fields,
            cover,
        } => {
            let cover = match cover {
                CoverArg::Keep => CoverEdit::Keep,
                CoverArg::Remove => CoverEdit::Remove,
                CoverArg::From(image) => {
                    let bytes = std::fs::read(&image)
                        .with_context(|| format!("reading {}", image.display()))?;
                    let cover = import_cover(&bytes, options.cover_quality)
                        .with_context(|| format!("loading cover {}", image.display()))?;
                    CoverEdit::Replace(cover)
                }
            };
            let edits = Edits { fields, cover };

            let mut failed = 0;
            for (path, res) in apply_edits_many(&files, &edits, options) {
                match res {
                    Ok(report) if report.diff.is_empty() => {
                        println!("{}: unchanged", path.display());
                    }
                    Ok(report) => {
                        println!("{}: saved ({})", path.display(), describe(&report.diff));
                    }
                    Err(e) => {
                        eprintln!("{}: save failed: {e}", path.display());
                        failed += 1;
                    }
                }
            }
            check_failures(failed, files.len())
        }

        Command::Cover { file, out } => {
            let snap = load_snapshot(&file, options)
                .with_context(|| format!("reading {}", file.display()))?;
            let cover = snap.cover.ok_or(Error::NoCover)?;
            std::fs::write(&out, &cover.data)
                .with_context(|| format!("writing {}", out.display()))?;
            println!(
                "{}: wrote {} ({}, {} bytes)",
                file.display(),
                out.display(),
                cover.mime_type,
                cover.data.len()
            );
            Ok(())
        }

        Command::Strip { files } => {
            let mut failed = 0;
            for file in &files {
                match strip(file) {
                    Ok(true) => println!("{}: tag removed", file.display()),
                    Ok(false) => println!("{}: no tag", file.display()),
                    Err(e) => {
                        eprintln!("{}: {e}", file.display());
                        failed += 1;
                    }
                }
            }
            check_failures(failed, files.len())
        }

        Command::Config { key, value } => run_config(settings, &settings_path, key, value),
    }
}

fn run_config(
    mut settings: Settings,
    path: &Path,
    key: Option<String>,
    value: Option<String>,
) -> anyhow::Result<()> {
    match (key, value) {
        (None, _) => {
            for (k, v) in settings.iter() {
                println!("{k} = {v}");
            }
        }
        (Some(key), None) => {
            let v = settings
                .get(&key)
                .ok_or_else(|| anyhow!("{key} is not set"))?;
            println!("{v}");
        }
        (Some(key), Some(value)) => {
            if value.is_empty() {
                settings.remove(&key);
            } else {
                settings.set(key, value);
            }
            settings
                .save(path)
                .with_context(|| format!("writing {}", path.display()))?;
        }
    }
    Ok(())
}

fn print_snapshot(path: &Path, snap: &TagSnapshot) {
    println!("{}", path.display());
    for field in Field::ALL {
        println!("  {:<13}: {}", field.name(), snap.get(field));
    }
    match &snap.cover {
        Some(c) => println!("  {:<13}: {}, {} bytes", "cover", c.mime_type, c.data.len()),
        None => println!("  {:<13}: -", "cover"),
    }
}

fn describe(diff: &SnapshotDiff) -> String {
    let mut parts: Vec<&str> = diff.fields.iter().map(|c| c.field.name()).collect();
    match diff.cover {
        Some(CoverChange::Added) => parts.push("cover added"),
        Some(CoverChange::Replaced) => parts.push("cover replaced"),
        Some(CoverChange::Removed) => parts.push("cover removed"),
        None => {}
    }
    parts.join(", ")
}

fn check_failures(failed: usize, total: usize) -> anyhow::Result<()> {
    if failed > 0 {
        bail!("{failed} of {total} file(s) failed");
    }
    Ok(())
}
