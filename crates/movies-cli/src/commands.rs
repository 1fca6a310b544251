use crate::cli::{Body, Command};
use anyhow::Context;
use movies::validate::{validate_new, validate_patch};
use movies::{
    GenericClient, MoviePatch, MovieService, MovieStore, StoreError, ValidationCode,
    ValidationError, ValidationErrors, ensure_schema, parse_id,
};
use serde::Serialize;

/// A command whose ids and bodies have been parsed and checked.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Schema,
    List,
    Get(i64),
    Create(MoviePatch),
    Update(i64, MoviePatch),
    Delete(i64),
}

/// Parse and validate everything the user typed. Runs before any
/// configuration is loaded or connection opened; `None` means show help.
pub fn prepare(command: Command) -> anyhow::Result<Option<Request>> {
    let request = match command {
        Command::Help => return Ok(None),
        Command::Schema => Request::Schema,
        Command::List => Request::List,
        Command::Get { id } => Request::Get(parse_id(&id)?),
        Command::Create { body } => {
            let movie = read_patch(&body)?;
            validate_new(&movie)?;
            Request::Create(movie)
        }
        Command::Update { id, body } => {
            let id = parse_id(&id)?;
            let patch = read_patch(&body)?;
            validate_patch(&patch)?;
            if patch.is_empty() {
                return Err(StoreError::NoFieldsToUpdate.into());
            }
            Request::Update(id, patch)
        }
        Command::Delete { id } => Request::Delete(parse_id(&id)?),
    };
    Ok(Some(request))
}

pub async fn run(request: Request, client: &impl GenericClient, table: &str) -> anyhow::Result<()> {
    let service = MovieService::new(MovieStore::new(client).with_table(table)?);

    match request {
        Request::Schema => {
            ensure_schema(client, table).await?;
            println!("table {table} is ready");
        }
        Request::List => print_json(&service.get_all().await?)?,
        Request::Get(id) => print_json(&service.get_by_id(id).await?)?,
        Request::Create(movie) => print_json(&service.create(&movie).await?)?,
        Request::Update(id, patch) => print_json(&service.update(id, &patch).await?)?,
        Request::Delete(id) => {
            service.delete(id).await?;
            tracing::info!(id, "movie deleted");
            println!("deleted movie {id}");
        }
    }
    Ok(())
}

/// Read a body and decode it as a movie patch. A body that is not a movie
/// JSON object is invalid input.
pub fn read_patch(body: &Body) -> anyhow::Result<MoviePatch> {
    let text = body.read()?;
    serde_json::from_str(&text)
        .map_err(|e| {
            ValidationErrors::from(ValidationError::new("body", ValidationCode::Format, e.to_string()))
        })
        .context("request body is not a valid movie JSON object")
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{out}");
    Ok(())
}
