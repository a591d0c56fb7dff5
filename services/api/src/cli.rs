use crate::commands::{
    run_model_inspect, run_predict, run_predict_batch, ModelInspectArgs, PredictArgs,
    PredictBatchArgs,
};
use crate::server;
use admit_ai::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Admission Chance Predictor",
    about = "Serve and run graduate admission predictions from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single applicant profile
    Predict(PredictArgs),
    /// Score every applicant in a CSV export
    PredictBatch(PredictBatchArgs),
    /// Work with the trained model artifact
    Model {
        #[command(subcommand)]
        command: ModelCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ModelCommand {
    /// Print artifact metadata, tree count and category codes
    Inspect(ModelInspectArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_predict(args),
        Command::PredictBatch(args) => run_predict_batch(args),
        Command::Model {
            command: ModelCommand::Inspect(args),
        } => run_model_inspect(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_flags_parse_into_typed_profile_fields() {
        let cli = Cli::try_parse_from([
            "admit-ai-api",
            "predict",
            "--degree",
            "masters",
            "--exam-type",
            "IELTS",
            "--exam-score",
            "7.0",
            "--cgpa",
            "8.5",
            "--sop",
            "4",
            "--lor",
            "4",
            "--work-exp",
            "2",
            "--research",
            "--country",
            "🇩🇪 Germany",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Predict(args)) => {
                let profile = args.profile();
                assert_eq!(profile.country, admit_ai::admissions::Country::Germany);
                assert!(profile.research);
                assert!(!profile.internship);
            }
            other => panic!("expected predict command, got {other:?}"),
        }
    }

    #[test]
    fn unknown_exam_is_rejected_by_the_parser() {
        let result = Cli::try_parse_from([
            "admit-ai-api",
            "predict",
            "--degree",
            "Masters",
            "--exam-type",
            "GMAT",
            "--exam-score",
            "700",
            "--cgpa",
            "8",
            "--sop",
            "4",
            "--lor",
            "4",
            "--country",
            "USA",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn model_inspect_is_nested() {
        let cli = Cli::try_parse_from(["admit-ai-api", "model", "inspect"]).expect("parses");
        assert!(matches!(
            cli.command,
            Some(Command::Model {
                command: ModelCommand::Inspect(_)
            })
        ));
    }
}
