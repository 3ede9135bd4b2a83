use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_load_with_globals() {
    let cli = Cli::try_parse_from([
        "starload",
        "--verbose",
        "load",
        "--input",
        "shipments.csv",
        "--strict",
        "-d",
        "warehouse.duckdb",
    ])
    .unwrap();

    assert!(cli.global.verbose);
    assert_eq!(cli.global.database.as_deref(), Some("warehouse.duckdb"));
    match cli.command {
        Commands::Load(args) => {
            assert_eq!(args.input.input.as_deref(), Some("shipments.csv"));
            assert!(args.input.strict);
            assert!(!args.json);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_plan_output_defaults_to_table() {
    let cli = Cli::try_parse_from(["starload", "plan"]).unwrap();
    match cli.command {
        Commands::Plan(args) => assert_eq!(args.output, PlanOutput::Table),
        other => panic!("unexpected command: {other:?}"),
    }

    let cli = Cli::try_parse_from(["starload", "plan", "-o", "ddl"]).unwrap();
    match cli.command {
        Commands::Plan(args) => assert_eq!(args.output, PlanOutput::Ddl),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_query_requires_sql() {
    assert!(Cli::try_parse_from(["starload", "query"]).is_err());
    let cli = Cli::try_parse_from(["starload", "query", "SELECT 1", "--json"]).unwrap();
    match cli.command {
        Commands::Query(args) => {
            assert_eq!(args.sql, "SELECT 1");
            assert!(args.json);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}
