use anyhow::Result;
use clap::Parser;
use cli::args::{Cli, Commands};
use cli::output;
use nice_core::config::{self, AppConfig};
use nice_core::pipeline;
use nice_core::{Classification, ClassifyError};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Classify {
            description,
            retrieval,
            json,
            snapshot,
        } => {
            let classifier = pipeline::build_classifier(&cfg)?;
            let options = retrieval.options(classifier.defaults());
            let (candidates, messages) = classifier.prompt(&description, &options).await?;
            if let Some(path) = &snapshot {
                output::write_snapshot(path, &description, &messages);
            }
            let result = Classification {
                answer: classifier.decide(&messages).await?,
                candidates,
                messages,
            };
            if json {
                println!("{}", output::classification_json(&description, &result)?);
            } else {
                println!("{}", result.answer);
            }
            Ok(())
        }
        Commands::Candidates {
            description,
            retrieval,
        } => {
            let classifier = pipeline::build_classifier(&cfg)?;
            let options = retrieval.options(classifier.defaults());
            let candidates = classifier.candidates(&description, &options).await?;
            if candidates.is_empty() {
                eprintln!("No candidate classes found.");
            }
            for line in output::candidate_lines(&candidates, classifier.store()) {
                println!("{}", line);
            }
            Ok(())
        }
        Commands::Prompt {
            description,
            retrieval,
        } => {
            let classifier = pipeline::build_classifier(&cfg)?;
            let options = retrieval.options(classifier.defaults());
            let (_, messages) = classifier.prompt(&description, &options).await?;
            println!("{}", output::messages_json(&messages)?);
            Ok(())
        }
        Commands::Show { class_id } => run_show(&cfg, class_id),
    }
}

fn run_show(cfg: &AppConfig, class_id: u32) -> Result<()> {
    let store = pipeline::load_reference_store(cfg)?;
    let record = store.get(class_id).map_err(ClassifyError::from)?;
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}
