use clap::{CommandFactory, Parser};
use curator::tooling::cli::{Cli, Commands};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["curator", "generate-readme"],
        vec!["curator", "generate-readme", "--dry-run"],
        vec!["curator", "generate-readme", "--output", "out/README.md"],
        vec!["curator", "--config", "sources.yaml", "validate-config"],
        vec!["curator", "validate-config", "--check-sources"],
        vec!["curator", "list-sources"],
        vec!["curator", "list-sources", "--format", "json"],
        vec!["curator", "--verbose", "--log-format", "json", "list-sources"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_invalid_input() {
    assert!(Cli::try_parse_from(["curator"]).is_err());
    assert!(Cli::try_parse_from(["curator", "list-sources", "--format", "xml"]).is_err());
    assert!(Cli::try_parse_from(["curator", "scrape"]).is_err());
}

#[test]
fn parse_generate_flags() {
    let cli = Cli::try_parse_from(["curator", "generate-readme", "--dry-run"]).unwrap();
    match cli.command {
        Commands::GenerateReadme { output, dry_run } => {
            assert!(dry_run);
            assert_eq!(output, None);
        }
        other => panic!("unexpected command: {other:?}"),
    }

    let cli = Cli::try_parse_from(["curator", "--verbose", "list-sources"]).unwrap();
    assert!(cli.logging_overrides().verbose);
}

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}
