//! CLI argument parsing tests.
//!
//! These tests verify that command-line arguments are parsed correctly
//! without actually executing the commands (which would require a ROM image).

use std::path::PathBuf;

use clap::Parser;

// Re-create Args structure for testing since it's not publicly exported
#[derive(Parser)]
#[command(name = "nhl94")]
struct Args {
    #[arg(long, value_name = "FILE", global = true)]
    layout: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    Info {
        rom: PathBuf,
        #[arg(long)]
        json: bool,
    },
    Roster {
        rom: PathBuf,
        #[arg(short, long)]
        team: Option<String>,
        #[arg(long, short, value_enum, default_value = "console")]
        format: RosterFormat,
    },
    Lines {
        rom: PathBuf,
        #[arg(short, long)]
        team: String,
        #[arg(long)]
        plain: bool,
    },
    Export {
        rom: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, short, value_enum, default_value = "json")]
        format: ExportFormat,
    },
    Apply {
        rom: PathBuf,
        #[arg(short, long)]
        edits: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    Checksum {
        rom: PathBuf,
        #[arg(long)]
        fix: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    Layout {
        #[arg(short, long, default_value = "layout.txt")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
enum RosterFormat {
    Console,
    Tsv,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
enum ExportFormat {
    Tsv,
    Json,
}

#[test]
fn test_subcommand_required() {
    assert!(Args::try_parse_from(["nhl94"]).is_err());
}

#[test]
fn test_parse_info() {
    let args = Args::try_parse_from(["nhl94", "info", "nhl94.bin"]).unwrap();
    assert!(args.layout.is_none());
    assert!(!args.verbose);
    match args.command {
        Command::Info { rom, json } => {
            assert_eq!(rom, PathBuf::from("nhl94.bin"));
            assert!(!json);
        }
        _ => panic!("Expected Info command"),
    }
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let args = Args::try_parse_from([
        "nhl94", "info", "nhl94.bin", "--json", "-v", "--layout", "hack.txt",
    ])
    .unwrap();
    assert!(args.verbose);
    assert_eq!(args.layout, Some(PathBuf::from("hack.txt")));
    assert!(matches!(args.command, Command::Info { json: true, .. }));
}

#[test]
fn test_parse_roster_defaults() {
    let args = Args::try_parse_from(["nhl94", "roster", "nhl94.bin"]).unwrap();
    match args.command {
        Command::Roster { team, format, .. } => {
            assert!(team.is_none());
            assert_eq!(format, RosterFormat::Console);
        }
        _ => panic!("Expected Roster command"),
    }
}

#[test]
fn test_parse_roster_with_team_and_format() {
    let args =
        Args::try_parse_from(["nhl94", "roster", "nhl94.bin", "-t", "BOS", "-f", "tsv"]).unwrap();
    match args.command {
        Command::Roster { team, format, .. } => {
            assert_eq!(team.as_deref(), Some("BOS"));
            assert_eq!(format, RosterFormat::Tsv);
        }
        _ => panic!("Expected Roster command"),
    }
}

#[test]
fn test_parse_roster_invalid_format() {
    assert!(Args::try_parse_from(["nhl94", "roster", "nhl94.bin", "--format", "xml"]).is_err());
}

#[test]
fn test_parse_lines_requires_team() {
    assert!(Args::try_parse_from(["nhl94", "lines", "nhl94.bin"]).is_err());

    let args =
        Args::try_parse_from(["nhl94", "lines", "nhl94.bin", "--team", "0x1000", "--plain"])
            .unwrap();
    match args.command {
        Command::Lines { team, plain, .. } => {
            assert_eq!(team, "0x1000");
            assert!(plain);
        }
        _ => panic!("Expected Lines command"),
    }
}

#[test]
fn test_parse_export() {
    let args = Args::try_parse_from(["nhl94", "export", "nhl94.bin", "-o", "out.tsv", "-f", "tsv"])
        .unwrap();
    match args.command {
        Command::Export { output, format, .. } => {
            assert_eq!(output, Some(PathBuf::from("out.tsv")));
            assert_eq!(format, ExportFormat::Tsv);
        }
        _ => panic!("Expected Export command"),
    }
}

#[test]
fn test_parse_export_defaults_to_json_stdout() {
    let args = Args::try_parse_from(["nhl94", "export", "nhl94.bin"]).unwrap();
    match args.command {
        Command::Export { output, format, .. } => {
            assert!(output.is_none());
            assert_eq!(format, ExportFormat::Json);
        }
        _ => panic!("Expected Export command"),
    }
}

#[test]
fn test_parse_apply() {
    let args = Args::try_parse_from([
        "nhl94",
        "apply",
        "nhl94.bin",
        "--edits",
        "lines.json",
        "--output",
        "edited.bin",
    ])
    .unwrap();
    match args.command {
        Command::Apply { rom, edits, output } => {
            assert_eq!(rom, PathBuf::from("nhl94.bin"));
            assert_eq!(edits, PathBuf::from("lines.json"));
            assert_eq!(output, PathBuf::from("edited.bin"));
        }
        _ => panic!("Expected Apply command"),
    }
}

#[test]
fn test_parse_apply_requires_output() {
    assert!(Args::try_parse_from(["nhl94", "apply", "nhl94.bin", "-e", "lines.json"]).is_err());
}

#[test]
fn test_parse_checksum() {
    let args = Args::try_parse_from(["nhl94", "checksum", "nhl94.bin"]).unwrap();
    assert!(matches!(
        args.command,
        Command::Checksum {
            fix: false,
            output: None,
            ..
        }
    ));

    let args = Args::try_parse_from(["nhl94", "checksum", "nhl94.bin", "--fix", "-o", "fixed.bin"])
        .unwrap();
    match args.command {
        Command::Checksum { fix, output, .. } => {
            assert!(fix);
            assert_eq!(output, Some(PathBuf::from("fixed.bin")));
        }
        _ => panic!("Expected Checksum command"),
    }
}

#[test]
fn test_parse_layout_default_output() {
    let args = Args::try_parse_from(["nhl94", "layout"]).unwrap();
    match args.command {
        Command::Layout { output } => assert_eq!(output, PathBuf::from("layout.txt")),
        _ => panic!("Expected Layout command"),
    }
}
