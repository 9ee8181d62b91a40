//! Command handlers.
//!
//! Each handler talks to the backend through [`KhojClient`] and prints its
//! result to stdout. Errors propagate to `main` as `color_eyre` reports.

use color_eyre::eyre::{Result, WrapErr};
use uuid::Uuid;

use super::args::CliCommand;
use super::render::{icons, render_conversation, render_documents, render_summary, ProgressPrinter};
use super::version::VERSION;
use crate::api::KhojClient;
use crate::app::ChatSession;
use crate::auth::flow;
use crate::auth::{Session, SessionStore};
use crate::config::ClientConfig;
use crate::error::{ApiError, StreamError};
use crate::models::{CreateUserRequest, DEFAULT_TITLE};

/// Usage text printed by `khoj help`.
pub const USAGE: &str = "\
Usage: khoj [--api-url <url>] [--verbose] <command>

Account:
  signup <username> <email> <password>   Create an account and log in
  guest                                  Continue as a guest
  login <username> <password>            Log in
  logout                                 Forget the stored session
  whoami                                 Show the logged-in account

Chat:
  ask [--conversation <id>] <prompt...>  Ask with live web search
  generate <prompt...>                   Quick answer without search
  new [title]                            Create an empty conversation
  show <conversation-id>                 Print a conversation
  rename <conversation-id> <title>       Rename a conversation
  delete <conversation-id>               Delete a conversation

Documents:
  docs list                              List uploaded documents
  docs upload <path>                     Upload a file
  docs delete <id>                       Delete a document

Environment:
  KHOJ_API_URL   Backend URL (default http://localhost:8080)
  KHOJ_HOME      Directory holding session.json (default ~/.khoj)
  KHOJ_LOG       Log filter (default khoj=info)
";

/// Run a command against the configured backend.
pub async fn run_command(command: CliCommand, config: ClientConfig, store: &SessionStore) -> Result<()> {
    let client = KhojClient::new(config);

    match command {
        CliCommand::Version => println!("khoj {}", VERSION),
        CliCommand::Help => print!("{}", USAGE),
        CliCommand::Signup {
            username,
            email,
            password,
        } => {
            let request = CreateUserRequest::new(username, email, password);
            let session = flow::signup(&client, store, &request)
                .await
                .map_err(report)?;
            println!("{} Signed up as {}", icons::SUCCESS, session.username);
        }
        CliCommand::Guest => {
            let session = flow::guest(&client, store).await.map_err(report)?;
            println!("{} Continuing as {}", icons::SUCCESS, session.username);
        }
        CliCommand::Login { username, password } => {
            let session = flow::login(&client, store, &username, &password)
                .await
                .map_err(report)?;
            println!("{} Logged in as {}", icons::SUCCESS, session.username);
        }
        CliCommand::Logout => match flow::logout(store).map_err(report)? {
            Some(session) => println!("Logged out {}", session.username),
            None => println!("Not logged in."),
        },
        CliCommand::Whoami => {
            let session = flow::require_session(store).map_err(report)?;
            let client = flow::authorized_client(&client, &session);
            match client.get_user(session.user_id).await {
                Ok(user) => println!("{} <{}> ({})", user.username, user.email, user.id),
                Err(e) => {
                    tracing::warn!("Could not fetch account details: {}", e);
                    println!("{} ({})", session.username, session.user_id);
                }
            }
        }
        CliCommand::New { title } => {
            let (session, client) = logged_in(&client, store)?;
            let title = title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
            let conversation = client
                .create_conversation(session.user_id, &title)
                .await
                .map_err(report)?;
            println!("{}", conversation.id);
        }
        CliCommand::Show { conversation_id } => {
            let (_, client) = logged_in(&client, store)?;
            let conversation = client
                .get_conversation(conversation_id)
                .await
                .map_err(report)?;
            print!("{}", render_conversation(&conversation));
        }
        CliCommand::Rename {
            conversation_id,
            title,
        } => {
            let (_, client) = logged_in(&client, store)?;
            let conversation = client
                .rename_conversation(conversation_id, &title)
                .await
                .map_err(report)?;
            println!("{} Renamed to \"{}\"", icons::SUCCESS, conversation.title);
        }
        CliCommand::Delete { conversation_id } => {
            let (_, client) = logged_in(&client, store)?;
            client
                .delete_conversation(conversation_id)
                .await
                .map_err(report)?;
            println!("{} Deleted {}", icons::SUCCESS, conversation_id);
        }
        CliCommand::Ask {
            conversation_id,
            prompt,
        } => {
            let (session, client) = logged_in(&client, store)?;
            ask(client, session.user_id, conversation_id, &prompt).await?;
        }
        CliCommand::Generate { prompt } => {
            let (_, client) = logged_in(&client, store)?;
            let response = client.generate_response(&prompt).await.map_err(report)?;
            println!("{}", response.message);
        }
        CliCommand::DocsList => {
            let (session, client) = logged_in(&client, store)?;
            let documents = client
                .list_documents(&session.user_id.to_string())
                .await
                .map_err(report)?;
            print!("{}", render_documents(&documents));
        }
        CliCommand::DocsUpload { path } => {
            let (session, client) = logged_in(&client, store)?;
            let document = client
                .upload_document_file(&session.user_id.to_string(), &path)
                .await
                .map_err(report)
                .wrap_err_with(|| format!("Uploading {}", path.display()))?;
            println!("{} Uploaded {} (id {})", icons::SUCCESS, document.name, document.id);
        }
        CliCommand::DocsDelete { id } => {
            let (_, client) = logged_in(&client, store)?;
            client.delete_document(id).await.map_err(report)?;
            println!("{} Deleted document {}", icons::SUCCESS, id);
        }
    }

    Ok(())
}

/// Stream one turn, printing progress to stderr and the answer to stdout.
///
/// Ctrl-C cancels the turn; no answer is saved for it.
async fn ask(client: KhojClient, user_id: Uuid, conversation_id: Option<Uuid>, prompt: &str) -> Result<()> {
    let mut chat = ChatSession::new(client, user_id);
    if let Some(id) = conversation_id {
        chat = chat.with_conversation(id);
    }

    let mut printer = ProgressPrinter::new();
    let outcome = tokio::select! {
        result = chat.send(prompt, |state| printer.update(state)) => result,
        _ = tokio::signal::ctrl_c() => Err(ApiError::Stream(StreamError::Cancelled)),
    };
    // Dropping the session aborts a turn that is still running
    let conversation = chat.conversation_id();
    drop(chat);

    let turn = outcome.map_err(report)?;
    println!();
    match turn.answer {
        Some(ref answer) => println!("{}", answer),
        None => eprintln!("{} {}", icons::WARNING, turn.progress.display_status()),
    }

    let summary = render_summary(&turn.progress);
    if !summary.is_empty() {
        println!();
        print!("{}", summary);
    }
    if let Some(id) = conversation {
        eprintln!("\nconversation: {}", id);
    }
    Ok(())
}

/// Load the session and build a client carrying its token.
fn logged_in(client: &KhojClient, store: &SessionStore) -> Result<(Session, KhojClient)> {
    let session = flow::require_session(store).map_err(report)?;
    let client = flow::authorized_client(client, &session);
    Ok((session, client))
}

/// Convert an API error into a report with its user-facing message.
fn report(error: ApiError) -> color_eyre::Report {
    let hint = if error.is_retryable() {
        " (try again)"
    } else {
        ""
    };
    let message = format!("{}{}", error.user_message(), hint);
    color_eyre::Report::new(error).wrap_err(message)
}
