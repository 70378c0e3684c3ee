use super::*;

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn test_search_joins_keywords() {
    let cli = Cli::try_parse_from(["rodex", "search", "tower", "defense", "--limit", "5"]).unwrap();
    let command = cli.command.unwrap();

    assert_eq!(command.intent(), DiscoveryIntent::Search);
    assert_eq!(command.query(), "tower defense");
    assert_eq!(command.args().limit, 5);
    assert!(!command.args().json);
}

#[test]
fn test_search_requires_query() {
    assert!(Cli::try_parse_from(["rodex", "search"]).is_err());
}

#[test]
fn test_discovery_commands() {
    let cases = [
        ("trending", DiscoveryIntent::Trending),
        ("popular", DiscoveryIntent::Popular),
        ("top-rated", DiscoveryIntent::TopRated),
        ("recommended", DiscoveryIntent::Recommended),
    ];

    for (name, intent) in cases {
        let cli = Cli::try_parse_from(["rodex", name, "--json"]).unwrap();
        let command = cli.command.unwrap();
        assert_eq!(command.intent(), intent);
        assert_eq!(command.args().limit, 20);
        assert!(command.args().json);
        assert_eq!(command.query(), "");
    }
}

#[test]
fn test_global_options_parse() {
    let cli = Cli::try_parse_from([
        "rodex",
        "--net-timeout",
        "5",
        "--search-cap",
        "10",
        "--log-format",
        "json",
        "--color",
        "never",
        "trending",
    ])
    .unwrap();

    assert_eq!(cli.config.net_timeout, 5);
    assert_eq!(cli.config.search_cap, 10);
    assert_eq!(cli.config.log_format, crate::primitives::LogFormat::Json);
    assert_eq!(cli.config.color, crate::primitives::ColorIntent::Never);
}

#[test]
fn test_no_command_is_allowed() {
    let cli = Cli::try_parse_from(["rodex"]).unwrap();
    assert!(cli.command.is_none());
}
