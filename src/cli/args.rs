//! Command-line argument parsing for the khoj CLI.
//!
//! Arguments are parsed by hand: global flags may appear anywhere, the first
//! positional argument names the command, and the rest are its operands.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Create an account and log in
    Signup {
        username: String,
        email: String,
        password: String,
    },
    /// Create a throwaway guest account and log in
    Guest,
    /// Log in with existing credentials
    Login { username: String, password: String },
    /// Forget the stored session
    Logout,
    /// Show the logged-in account
    Whoami,
    /// Create an empty conversation
    New { title: Option<String> },
    /// Print a conversation transcript
    Show { conversation_id: Uuid },
    /// Rename a conversation
    Rename { conversation_id: Uuid, title: String },
    /// Delete a conversation
    Delete { conversation_id: Uuid },
    /// Ask through the streaming search pipeline
    Ask {
        conversation_id: Option<Uuid>,
        prompt: String,
    },
    /// One-shot answer without search
    Generate { prompt: String },
    /// List uploaded documents
    DocsList,
    /// Upload a local file
    DocsUpload { path: PathBuf },
    /// Delete an uploaded document
    DocsDelete { id: i64 },
}

/// A command plus the global flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub command: CliCommand,
    /// `--api-url` override
    pub api_url: Option<String>,
    /// `--verbose` raises the log level to debug
    pub verbose: bool,
}

/// Why the arguments could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("unknown flag '{0}'")]
    UnknownFlag(String),
    #[error("missing value for {0}")]
    MissingValue(&'static str),
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
    #[error("'{value}' is not a valid {what}")]
    InvalidValue { what: &'static str, value: String },
}

/// Parse command-line arguments, including the program name.
///
/// # Examples
///
/// ```
/// use khoj::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["khoj".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap().command, CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Result<Invocation, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut api_url = None;
    let mut verbose = false;
    let mut conversation = None;
    let mut positional = Vec::new();

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => positional.insert(0, "version".to_string()),
            "--help" | "-h" => positional.insert(0, "help".to_string()),
            "--verbose" | "-v" => verbose = true,
            "--api-url" => api_url = Some(args.next().ok_or(ArgsError::MissingValue("--api-url"))?),
            "--conversation" | "-c" => {
                conversation = Some(args.next().ok_or(ArgsError::MissingValue("--conversation"))?)
            }
            flag if flag.starts_with("--") => return Err(ArgsError::UnknownFlag(flag.to_string())),
            _ => positional.push(arg),
        }
    }

    let command = parse_command(positional, conversation)?;
    Ok(Invocation {
        command,
        api_url,
        verbose,
    })
}

fn parse_command(positional: Vec<String>, conversation: Option<String>) -> Result<CliCommand, ArgsError> {
    let mut words = positional.into_iter();
    let Some(name) = words.next() else {
        return Ok(CliCommand::Help);
    };
    let rest: Vec<String> = words.collect();

    let command = match name.as_str() {
        "version" => CliCommand::Version,
        "help" => CliCommand::Help,
        "signup" => {
            let [username, email, password] = exact(rest, ["username", "email", "password"])?;
            CliCommand::Signup {
                username,
                email,
                password,
            }
        }
        "guest" => no_operands(rest, CliCommand::Guest)?,
        "login" => {
            let [username, password] = exact(rest, ["username", "password"])?;
            CliCommand::Login { username, password }
        }
        "logout" => no_operands(rest, CliCommand::Logout)?,
        "whoami" => no_operands(rest, CliCommand::Whoami)?,
        "new" => CliCommand::New {
            title: Some(rest.join(" ")).filter(|t| !t.trim().is_empty()),
        },
        "show" => {
            let [id] = exact(rest, ["conversation id"])?;
            CliCommand::Show {
                conversation_id: parse_uuid(&id)?,
            }
        }
        "rename" => {
            let mut rest = rest.into_iter();
            let id = rest.next().ok_or(ArgsError::MissingValue("conversation id"))?;
            let title = rest.collect::<Vec<_>>().join(" ");
            if title.trim().is_empty() {
                return Err(ArgsError::MissingValue("title"));
            }
            CliCommand::Rename {
                conversation_id: parse_uuid(&id)?,
                title,
            }
        }
        "delete" => {
            let [id] = exact(rest, ["conversation id"])?;
            CliCommand::Delete {
                conversation_id: parse_uuid(&id)?,
            }
        }
        "ask" => CliCommand::Ask {
            conversation_id: conversation.as_deref().map(parse_uuid).transpose()?,
            prompt: prompt(rest)?,
        },
        "generate" => CliCommand::Generate {
            prompt: prompt(rest)?,
        },
        "docs" => parse_docs(rest)?,
        other => return Err(ArgsError::UnknownCommand(other.to_string())),
    };

    if conversation.is_some() && !matches!(command, CliCommand::Ask { .. }) {
        return Err(ArgsError::UnexpectedArgument("--conversation".to_string()));
    }
    Ok(command)
}

fn parse_docs(rest: Vec<String>) -> Result<CliCommand, ArgsError> {
    let mut rest = rest.into_iter();
    let sub = rest.next().ok_or(ArgsError::MissingValue("docs subcommand"))?;
    let rest: Vec<String> = rest.collect();
    match sub.as_str() {
        "list" => no_operands(rest, CliCommand::DocsList),
        "upload" => {
            let [path] = exact(rest, ["file path"])?;
            Ok(CliCommand::DocsUpload {
                path: PathBuf::from(path),
            })
        }
        "delete" => {
            let [id] = exact(rest, ["document id"])?;
            let id = id.parse::<i64>().map_err(|_| ArgsError::InvalidValue {
                what: "document id",
                value: id.clone(),
            })?;
            Ok(CliCommand::DocsDelete { id })
        }
        other => Err(ArgsError::UnknownCommand(format!("docs {}", other))),
    }
}

/// Take exactly `N` operands, naming the first missing one.
fn exact<const N: usize>(rest: Vec<String>, names: [&'static str; N]) -> Result<[String; N], ArgsError> {
    if rest.len() > N {
        return Err(ArgsError::UnexpectedArgument(rest[N].clone()));
    }
    if rest.len() < N {
        return Err(ArgsError::MissingValue(names[rest.len()]));
    }
    rest.try_into()
        .map_err(|_| ArgsError::MissingValue(names[0]))
}

fn no_operands(rest: Vec<String>, command: CliCommand) -> Result<CliCommand, ArgsError> {
    match rest.into_iter().next() {
        Some(extra) => Err(ArgsError::UnexpectedArgument(extra)),
        None => Ok(command),
    }
}

fn prompt(rest: Vec<String>) -> Result<String, ArgsError> {
    let prompt = rest.join(" ");
    if prompt.trim().is_empty() {
        Err(ArgsError::MissingValue("prompt"))
    } else {
        Ok(prompt)
    }
}

fn parse_uuid(value: &str) -> Result<Uuid, ArgsError> {
    Uuid::parse_str(value).map_err(|_| ArgsError::InvalidValue {
        what: "conversation id",
        value: value.to_string(),
    })
}
