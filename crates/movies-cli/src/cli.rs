use anyhow::{Context, bail};

pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub log_level: String,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Schema,
    List,
    Get { id: String },
    Create { body: Body },
    Update { id: String, body: Body },
    Delete { id: String },
}

/// A JSON request body given inline or as `@path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Inline(String),
    File(String),
}

impl Body {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix('@') {
            Some(path) => Self::File(path.to_string()),
            None => Self::Inline(raw.to_string()),
        }
    }

    pub fn read(&self) -> anyhow::Result<String> {
        match self {
            Self::Inline(s) => Ok(s.clone()),
            Self::File(path) => {
                std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
            }
        }
    }
}

/// Parse `argv` (including the program name).
pub fn parse_args(args: &[String]) -> anyhow::Result<Invocation> {
    let mut log_level = DEFAULT_LOG_LEVEL.to_string();
    let mut rest: Vec<&str> = Vec::new();

    let mut it = args.iter().skip(1).map(String::as_str);
    while let Some(arg) = it.next() {
        match arg {
            "--log-level" => {
                log_level = it
                    .next()
                    .context("--log-level requires a value")?
                    .to_string();
            }
            "-h" | "--help" => {
                return Ok(Invocation {
                    log_level,
                    command: Command::Help,
                });
            }
            _ => rest.push(arg),
        }
    }

    let command = match rest.as_slice() {
        [] | ["help"] => Command::Help,
        ["schema"] => Command::Schema,
        ["list"] => Command::List,
        ["get", id] => Command::Get { id: id.to_string() },
        ["create", body] => Command::Create {
            body: Body::parse(body),
        },
        ["update", id, body] => Command::Update {
            id: id.to_string(),
            body: Body::parse(body),
        },
        ["delete", id] => Command::Delete { id: id.to_string() },
        [cmd, ..] if is_known(cmd) => bail!("wrong number of arguments for '{cmd}'; see `movies help`"),
        [cmd, ..] => bail!("unknown command '{cmd}'; see `movies help`"),
    };

    Ok(Invocation { log_level, command })
}

fn is_known(cmd: &str) -> bool {
    matches!(
        cmd,
        "help" | "schema" | "list" | "get" | "create" | "update" | "delete"
    )
}

pub fn print_help() {
    println!(
        "\
movies - manage the movie catalogue

USAGE:
    movies [--log-level <filter>] <command>

COMMANDS:
    schema                create the movie table if it does not exist
    list                  print all active movies
    get <id>              print one movie
    create <json|@file>   insert a movie, e.g. '{{\"name\":\"Heat\",\"genre\":\"Crime\"}}'
    update <id> <json|@file>
                          change only the fields present in the JSON
    delete <id>           soft-delete a movie
    help                  show this message

ENVIRONMENT:
    DATABASE_URL          PostgreSQL connection string (required)
    MOVIES_POOL_SIZE      connection pool size (default 16)
    MOVIES_TABLE          table name (default movies)
    RUST_LOG              log filter, overrides --log-level"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("movies")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parses_each_command() {
        let cases = [
            (vec![], Command::Help),
            (vec!["help"], Command::Help),
            (vec!["schema"], Command::Schema),
            (vec!["list"], Command::List),
            (vec!["get", "7"], Command::Get { id: "7".into() }),
            (vec!["delete", "7"], Command::Delete { id: "7".into() }),
            (
                vec!["create", r#"{"name":"Heat"}"#],
                Command::Create {
                    body: Body::Inline(r#"{"name":"Heat"}"#.into()),
                },
            ),
            (
                vec!["update", "7", "@patch.json"],
                Command::Update {
                    id: "7".into(),
                    body: Body::File("patch.json".into()),
                },
            ),
        ];

        for (argv, expected) in cases {
            let inv = parse_args(&args(&argv)).unwrap();
            assert_eq!(inv.command, expected, "argv: {argv:?}");
            assert_eq!(inv.log_level, DEFAULT_LOG_LEVEL);
        }
    }

    #[test]
    fn log_level_may_appear_anywhere() {
        let inv = parse_args(&args(&["list", "--log-level", "movies=debug"])).unwrap();
        assert_eq!(inv.log_level, "movies=debug");
        assert_eq!(inv.command, Command::List);

        assert!(parse_args(&args(&["list", "--log-level"])).is_err());
    }

    #[test]
    fn rejects_unknown_and_malformed() {
        let err = parse_args(&args(&["frobnicate"])).unwrap_err();
        assert!(err.to_string().contains("unknown command"));

        let err = parse_args(&args(&["get"])).unwrap_err();
        assert!(err.to_string().contains("wrong number of arguments"));

        assert!(parse_args(&args(&["update", "7"])).is_err());
    }

    #[test]
    fn help_flag_wins() {
        let inv = parse_args(&args(&["get", "--help"])).unwrap();
        assert_eq!(inv.command, Command::Help);
    }
}
