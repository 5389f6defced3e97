//! Persona Rubric command-line entry point.

mod cli;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use persona_rubric::adapters::InMemoryClassificationRepository;
use persona_rubric::application::{ClassifySubjectCommand, ClassifySubjectHandler};
use persona_rubric::config::{AppConfig, ConfigError};
use persona_rubric::domain::foundation::{DomainError, SubjectId};
use persona_rubric::domain::persona::{
    PersonaClassifier, PersonaQuestion, QuestionResponse, Rubric,
};
use persona_rubric::logging::{self, LoggingError};

use crate::cli::{Cli, Commands};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("Failed to read {path}: {source}")]
    Input {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Questionnaire file layout for `classify`.
#[derive(Debug, Deserialize)]
struct QuestionnaireInput {
    questions: Vec<PersonaQuestion>,
    responses: Vec<QuestionResponse>,
}

#[derive(Debug, serde::Serialize)]
struct RubricSummary<'a> {
    version: &'a str,
    fallback_persona: &'a str,
    default_percentage: f64,
    distribution: Vec<DistributionRow<'a>>,
}

#[derive(Debug, serde::Serialize)]
struct DistributionRow<'a> {
    combination_key: &'a str,
    percentage: f64,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = cli.rubric {
        config.rubric.path = Some(path);
    }
    match cli.verbose {
        0 => {}
        1 => config.logging.level = "debug".to_string(),
        _ => config.logging.level = "trace".to_string(),
    }
    config.validate().map_err(ConfigError::from)?;
    logging::init(&config.logging)?;

    match cli.command {
        Commands::Classify {
            input,
            subject,
            pretty,
        } => classify(&config, &input, subject, pretty).await,
        Commands::Rubric => {
            let rubric = config.rubric.load_rubric().map_err(ConfigError::from)?;
            print_rubric(&rubric)
        }
    }
}

async fn classify(
    config: &AppConfig,
    input: &Path,
    subject: String,
    pretty: bool,
) -> Result<(), CliError> {
    let raw = std::fs::read_to_string(input).map_err(|source| CliError::Input {
        path: input.display().to_string(),
        source,
    })?;
    let questionnaire: QuestionnaireInput = serde_json::from_str(&raw)?;
    let subject_id = SubjectId::new(subject).map_err(DomainError::from)?;

    let classifier: Arc<PersonaClassifier> = Arc::new(config.build_classifier()?);
    let repository = Arc::new(InMemoryClassificationRepository::new());
    let handler = ClassifySubjectHandler::new(classifier, repository);

    info!(
        questions = questionnaire.questions.len(),
        responses = questionnaire.responses.len(),
        "Classifying questionnaire"
    );

    let outcome = handler
        .handle(ClassifySubjectCommand {
            subject_id,
            questions: questionnaire.questions,
            responses: questionnaire.responses,
        })
        .await?;

    let json = if pretty {
        serde_json::to_string_pretty(&outcome.result)?
    } else {
        serde_json::to_string(&outcome.result)?
    };
    println!("{}", json);
    Ok(())
}

fn print_rubric(rubric: &Rubric) -> Result<(), CliError> {
    let summary = RubricSummary {
        version: rubric.version(),
        fallback_persona: rubric.fallback_persona().key(),
        default_percentage: rubric.default_percentage(),
        distribution: rubric
            .distribution()
            .map(|(combination_key, percentage)| DistributionRow {
                combination_key,
                percentage,
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
