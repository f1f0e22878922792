//! CLI argument parsing tests

use std::path::PathBuf;

use play_architect::cli::{parse_args, Mode};

#[test]
fn test_no_arguments_opens_shell() {
    let args = parse_args(["play-architect"]).unwrap();
    assert_eq!(args.mode(), Mode::Tui);
    assert!(args.config.is_none());
}

#[test]
fn test_metadata_defaults() {
    let args = parse_args(["play-architect", "metadata", "--name", "FitTrack"]).unwrap();
    assert_eq!(
        args.mode(),
        Mode::Metadata {
            name: "FitTrack".to_string(),
            keywords: String::new(),
            tone: "Professional & Trustworthy".to_string(),
        }
    );
}

#[test]
fn test_global_flags_after_mode() {
    let args = parse_args([
        "play-architect",
        "audit",
        "--listing",
        "listing.json",
        "--json",
        "--config",
        "pa.toml",
    ])
    .unwrap();
    assert!(args.json);
    assert_eq!(args.config, Some(PathBuf::from("pa.toml")));
    assert_eq!(
        args.mode(),
        Mode::Audit {
            listing: PathBuf::from("listing.json")
        }
    );
}

#[test]
fn test_icon_requires_output_file() {
    assert!(parse_args(["play-architect", "icon", "--description", "a kettlebell"]).is_err());

    let args = parse_args(["play-architect", "icon", "--out", "icon.png"]).unwrap();
    match args.mode() {
        Mode::Icon { style, out, .. } => {
            assert_eq!(style, "Flat & Minimalist");
            assert_eq!(out, PathBuf::from("icon.png"));
        }
        other => panic!("expected icon mode, got {:?}", other),
    }
}

#[test]
fn test_unknown_mode_is_rejected() {
    assert!(parse_args(["play-architect", "publish"]).is_err());
}
