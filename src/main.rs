use std::io::{self, IsTerminal};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use quill::cli::CliArgs;
use quill::gateway::{OfflineGateway, SpellDictionary};
use quill::model::{AppModel, Document};
use quill::repl::{self, Session};
use quill::runtime::Runtime;
use quill::util::{files::filename_for_display, read_document};

fn main() -> Result<()> {
    let startup = CliArgs::parse().into_config().map_err(|e| anyhow!(e))?;

    quill::tracing::init();

    let config = startup.load_assist_config();
    if startup.print_config {
        print!("{}", config.to_yaml().map_err(|e| anyhow!(e))?);
        return Ok(());
    }

    let document = match &startup.document {
        Some(path) if path.exists() => {
            let text = read_document(path)
                .map_err(|e| anyhow!(e.user_message(&filename_for_display(path))))?;
            tracing::info!("Opened {} ({} chars)", path.display(), text.chars().count());
            Document {
                file_path: Some(path.clone()),
                ..Document::with_text(&text)
            }
        }
        Some(path) => Document {
            file_path: Some(path.clone()),
            ..Document::new()
        },
        None => Document::new(),
    };

    let gateway = Arc::new(OfflineGateway::new(SpellDictionary::with_extra(
        &config.spelling,
    )));
    let model = AppModel::with_document(document, config);
    let mut session = Session::new(Runtime::new(model, gateway));

    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("quill - type `help` for commands");
    }
    repl::run(&mut session, stdin.lock(), io::stdout().lock()).context("session failed")?;
    Ok(())
}
