//! cli.rs
//! The `clap` command tree and the [`Command`] it boils down to. No IO here.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgGroup, ArgMatches, value_parser};

use sonora_tag::core::types::Field;

const FILES_ARG: &str = "files";

const FILE_ARG: &str = "file";

const OUT_ARG: &str = "out";

const COVER_ARG: &str = "cover";

const NO_COVER_ARG: &str = "no-cover";

const KEY_ARG: &str = "key";

const VALUE_ARG: &str = "value";

const EDITS_GROUP: &str = "edits";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CoverArg {
    Keep,
    Remove,
    From(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Show {
        files: Vec<PathBuf>,
    },
    Set {
        files: Vec<PathBuf>,
        fields: BTreeMap<Field, String>,
        cover: CoverArg,
    },
    Cover {
        file: PathBuf,
        out: PathBuf,
    },
    Strip {
        files: Vec<PathBuf>,
    },
    Config {
        key: Option<String>,
        value: Option<String>,
    },
}

pub(crate) fn command() -> clap::Command {
    let files_arg = Arg::new(FILES_ARG)
        .help("The .mp3 files")
        .num_args(1..)
        .required(true)
        .value_parser(value_parser!(PathBuf));

    clap::Command::new("sonora-tag")
        .about("Edit ID3v2 tags and cover art of .mp3 files")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            clap::Command::new("show")
                .about("Prints the tag fields and cover of each file")
                .arg(files_arg.clone()),
        )
        .subcommand(set_command(files_arg.clone()))
        .subcommand(
            clap::Command::new("cover")
                .about("Writes the embedded cover of a file to disk")
                .arg(
                    Arg::new(FILE_ARG)
                        .help("The .mp3 file to read")
                        .num_args(1)
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new(OUT_ARG)
                        .help("Where to write the image")
                        .num_args(1)
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            clap::Command::new("strip")
                .about("Removes the whole ID3v2 tag")
                .arg(files_arg),
        )
        .subcommand(
            clap::Command::new("config")
                .about("Lists, reads or writes a setting (an empty value removes it)")
                .arg(Arg::new(KEY_ARG).num_args(1).required(false))
                .arg(Arg::new(VALUE_ARG).num_args(1).required(false)),
        )
}

fn set_command(files_arg: Arg) -> clap::Command {
    let mut cmd = clap::Command::new("set")
        .about("Changes fields and/or the cover of one or more files")
        .after_help("An empty value (--composer \"\") clears the field.")
        .arg(files_arg);

    let mut edit_ids = Vec::with_capacity(Field::ALL.len() + 2);
    for field in Field::ALL {
        // Set (not Append): a repeated field is a usage error.
        cmd = cmd.arg(
            Arg::new(field.name())
                .long(field.name())
                .value_name("VALUE")
                .help(format!("New {}", field.name()))
                .num_args(1)
                .action(ArgAction::Set),
        );
        edit_ids.push(field.name());
    }

    cmd.arg(
        Arg::new(COVER_ARG)
            .long(COVER_ARG)
            .value_name("IMAGE")
            .help("Replace the cover (re-encoded as JPEG)")
            .num_args(1)
            .value_parser(value_parser!(PathBuf)),
    )
    .arg(
        Arg::new(NO_COVER_ARG)
            .long(NO_COVER_ARG)
            .help("Remove all embedded pictures")
            .action(ArgAction::SetTrue)
            .conflicts_with(COVER_ARG),
    )
    .group(
        ArgGroup::new(EDITS_GROUP)
            .args(edit_ids.into_iter().chain([COVER_ARG, NO_COVER_ARG]))
            .required(true)
            .multiple(true),
    )
}

fn paths(matches: &ArgMatches, id: &str) -> Vec<PathBuf> {
    matches
        .get_many::<PathBuf>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn path(matches: &ArgMatches, id: &str) -> PathBuf {
    matches.get_one::<PathBuf>(id).cloned().unwrap_or_default()
}

pub(crate) fn from_matches(matches: &ArgMatches) -> Command {
    match matches.subcommand() {
        Some(("show", m)) => Command::Show {
            files: paths(m, FILES_ARG),
        },
        Some(("set", m)) => {
            let fields = Field::ALL
                .into_iter()
                .filter_map(|field| {
                    m.get_one::<String>(field.name())
                        .map(|value| (field, value.clone()))
                })
                .collect();
            let cover = if m.get_flag(NO_COVER_ARG) {
                CoverArg::Remove
            } else if let Some(image) = m.get_one::<PathBuf>(COVER_ARG) {
                CoverArg::From(image.clone())
            } else {
                CoverArg::Keep
            };
            Command::Set {
                files: paths(m, FILES_ARG),
                fields,
                cover,
            }
        }
        Some(("cover", m)) => Command::Cover {
            file: path(m, FILE_ARG),
            out: path(m, OUT_ARG),
        },
        Some(("strip", m)) => Command::Strip {
            files: paths(m, FILES_ARG),
        },
        Some(("config", m)) => Command::Config {
            key: m.get_one::<String>(KEY_ARG).cloned(),
            value: m.get_one::<String>(VALUE_ARG).cloned(),
        },
        Some((subcommand, _)) => {
            unreachable!("Unknown subcommand {subcommand}");
        }
        None => {
            unreachable!("Missing subcommand");
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        command()
            .try_get_matches_from(std::iter::once("sonora-tag").chain(args.iter().copied()))
            .map(|matches| from_matches(&matches))
    }

    fn error_kind(args: &[&str]) -> ErrorKind {
        parse(args).unwrap_err().kind()
    }

    #[test]
    fn command_tree_is_consistent() {
        command().debug_assert();
    }

    #[test]
    fn no_args_prints_help() {
        assert_eq!(
            error_kind(&[]),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
        assert_eq!(error_kind(&["--help"]), ErrorKind::DisplayHelp);
    }

    #[test]
    fn set_collects_files_fields_and_cover() {
        let cmd = parse(&[
            "set",
            "a.mp3",
            "b.mp3",
            "--title",
            "Song",
            "--composer",
            "",
            "--album-artist",
            "Various",
            "--cover",
            "front.png",
        ])
        .unwrap();

        let mut fields = BTreeMap::new();
        fields.insert(Field::Title, "Song".to_string());
        fields.insert(Field::Composer, String::new());
        fields.insert(Field::AlbumArtist, "Various".to_string());
        assert_eq!(
            cmd,
            Command::Set {
                files: vec!["a.mp3".into(), "b.mp3".into()],
                fields,
                cover: CoverArg::From("front.png".into()),
            }
        );

        let cmd = parse(&["set", "a.mp3", "--no-cover"]).unwrap();
        assert_eq!(
            cmd,
            Command::Set {
                files: vec!["a.mp3".into()],
                fields: BTreeMap::new(),
                cover: CoverArg::Remove,
            }
        );
    }

    #[test]
    fn set_errors() {
        assert_eq!(
            error_kind(&["set", "a.mp3"]),
            ErrorKind::MissingRequiredArgument
        );
        assert_eq!(
            error_kind(&["set", "--title", "x"]),
            ErrorKind::MissingRequiredArgument
        );
        assert!(parse(&["set", "a.mp3", "--title"]).is_err());
        assert_eq!(
            error_kind(&["set", "a.mp3", "--lyrics", "x"]),
            ErrorKind::UnknownArgument
        );
        assert_eq!(
            error_kind(&["set", "a.mp3", "--title", "x", "--title", "y"]),
            ErrorKind::ArgumentConflict
        );
        assert_eq!(
            error_kind(&["set", "a.mp3", "--no-cover", "--cover", "c.png"]),
            ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn other_commands() {
        assert_eq!(
            parse(&["cover", "a.mp3", "out.jpg"]).unwrap(),
            Command::Cover {
                file: "a.mp3".into(),
                out: "out.jpg".into(),
            }
        );
        assert!(parse(&["cover", "a.mp3"]).is_err());
        assert_eq!(
            parse(&["config", "theme", "dark"]).unwrap(),
            Command::Config {
                key: Some("theme".to_string()),
                value: Some("dark".to_string()),
            }
        );
        assert_eq!(
            parse(&["config"]).unwrap(),
            Command::Config {
                key: None,
                value: None,
            }
        );
        assert_eq!(
            parse(&["show", "a.mp3", "b.mp3"]).unwrap(),
            Command::Show {
                files: vec!["a.mp3".into(), "b.mp3".into()],
            }
        );
        assert!(parse(&["strip"]).is_err());
        assert!(parse(&["show", "--title", "x"]).is_err());
        assert!(parse(&["play", "a.mp3"]).is_err());
    }
}
