use anyhow::{Context as _, Result};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tutor_system::client::mime_type_for;
use tutor_system::{AskApi, ClientConfig, DocumentProcessor, HttpAskApi, SelectedFile, TutorSession};

const HELP: &str = "Commands:
  :file <path>   load a PDF as study material
  :clear         forget the loaded PDF
  :quit          exit
Anything else is sent as a question.";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = ClientConfig::from_env();
    log::info!("Using answer service at {}", config.service_url);

    let mut session = TutorSession::new(HttpAskApi::new(config.service_url));
    let processor = DocumentProcessor::new();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Offline AI Q&A Tutor");
    println!("{HELP}");
    println!();
    println!("{}", session.answer().display());

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        if line.is_empty() {
            continue;
        } else if line == ":quit" {
            break;
        } else if line == ":clear" {
            session.select_file(None).await;
            println!("No PDF loaded.");
        } else if let Some(path) = line.strip_prefix(":file") {
            match read_selected_file(Path::new(path.trim())).await {
                Ok(file) => {
                    if let Some(file) = session.begin_select(Some(file)) {
                        if session.is_loading() {
                            println!("Reading {}...", file.name);
                        }
                        let result = processor.extract_pages(file.bytes).await;
                        session.finish_select(result);
                    }
                    match session.file_name() {
                        Some(name) => println!("Loaded: {name}"),
                        None => println!("Only PDF files are accepted."),
                    }
                }
                Err(e) => println!("{e:#}"),
            }
        } else if line.starts_with(':') {
            println!("{HELP}");
        } else {
            session.set_question(line);
            match session.begin_submit() {
                Ok(request) => {
                    if session.is_loading() {
                        println!("Thinking...");
                    }
                    let result = session.api().ask(&request).await;
                    session.finish_submit(result);
                    println!("{}", session.answer().display());
                }
                Err(outcome) => log::debug!("Question not sent: {:?}", outcome),
            }
        }
    }

    Ok(())
}

async fn read_selected_file(path: &Path) -> Result<SelectedFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Could not read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(SelectedFile {
        mime_type: mime_type_for(&name).to_string(),
        name,
        bytes,
    })
}
