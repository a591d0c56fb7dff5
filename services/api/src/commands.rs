use crate::infra::{load_config, load_scoring_context, parse_category};
use admit_ai::admissions::{
    score_csv, ApplicantProfile, Category, Country, Degree, ExamType, ModelArtifact,
    PredictionResult, ScoringContext,
};
use admit_ai::error::AppError;
use clap::Args;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Degree applied for (Undergraduate, Masters, PhD)
    #[arg(long, value_parser = parse_category::<Degree>)]
    pub(crate) degree: Degree,
    /// Exam taken (IELTS, TOEFL, PTE, DET, GRE)
    #[arg(long, value_parser = parse_category::<ExamType>)]
    pub(crate) exam_type: ExamType,
    /// Score on the chosen exam's native scale
    #[arg(long)]
    pub(crate) exam_score: f64,
    /// Full-time work experience in years
    #[arg(long, default_value_t = 0)]
    pub(crate) work_exp: u32,
    /// CGPA on a 10-point scale
    #[arg(long)]
    pub(crate) cgpa: f64,
    /// Statement of purpose strength (1 to 5)
    #[arg(long)]
    pub(crate) sop: f64,
    /// Letter of recommendation strength (1 to 5)
    #[arg(long)]
    pub(crate) lor: f64,
    /// Applicant has research experience
    #[arg(long)]
    pub(crate) research: bool,
    /// Applicant has completed an internship or project
    #[arg(long)]
    pub(crate) internship: bool,
    /// Destination country
    #[arg(long, value_parser = parse_category::<Country>)]
    pub(crate) country: Country,
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
    /// Print the JSON view returned by the HTTP endpoint instead of a report
    #[arg(long)]
    pub(crate) json: bool,
}

impl PredictArgs {
    pub(crate) fn profile(&self) -> ApplicantProfile {
        ApplicantProfile {
            degree: self.degree,
            exam_type: self.exam_type,
            exam_score: self.exam_score,
            work_experience_years: self.work_exp,
            cgpa: self.cgpa,
            sop: self.sop,
            lor: self.lor,
            research: self.research,
            internship: self.internship,
            country: self.country,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct PredictBatchArgs {
    /// CSV export with degree, exam_type, exam_score, work_exp, cgpa, sop, lor, research, internship, country columns
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ModelInspectArgs {
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

fn build_context(model: Option<PathBuf>) -> Result<ScoringContext, AppError> {
    let config = load_config(model)?;
    load_scoring_context(&config.model.artifact_path, config.scoring)
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let context = build_context(args.model.clone())?;
    let profile = args.profile();
    let result = context.evaluate(&profile)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result.view()).map_err(std::io::Error::from)?
        );
    } else {
        render_prediction(&profile, &result);
    }
    Ok(())
}

pub(crate) fn run_predict_batch(args: PredictBatchArgs) -> Result<(), AppError> {
    let context = build_context(args.model)?;
    let file = File::open(&args.input)?;
    let outcomes = score_csv(&context, BufReader::new(file))?;

    println!("Batch predictions for {}", args.input.display());
    let mut failures = 0usize;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(result) => println!(
                "  row {:>3}: {:>6.2}%  {}",
                outcome.row,
                result.prediction,
                result.verdict.label()
            ),
            Err(err) => {
                failures += 1;
                println!("  row {:>3}: error: {err}", outcome.row);
            }
        }
    }
    println!("{} scored, {} failed", outcomes.len() - failures, failures);
    Ok(())
}

pub(crate) fn run_model_inspect(args: ModelInspectArgs) -> Result<(), AppError> {
    let config = load_config(args.model)?;
    let artifact = ModelArtifact::from_path(&config.model.artifact_path)?;
    render_artifact(&artifact);

    let missing = artifact.categories.missing::<Country>();
    if !missing.is_empty() {
        let labels: Vec<_> = missing.iter().map(|country| country.label()).collect();
        println!("  countries without a trained code: {}", labels.join(", "));
    }
    Ok(())
}

fn render_prediction(profile: &ApplicantProfile, result: &PredictionResult) {
    println!(
        "Admission chance for {} ({} {}) to {}",
        profile.degree.label(),
        profile.exam_type,
        profile.exam_score,
        profile.country
    );
    println!("  {:.2}%  {}", result.prediction, result.verdict.label());
    if result.penalty > 0.0 {
        println!(
            "  model estimate {:.2}% reduced by {:.2} points for a low exam score",
            result.model_probability * 100.0,
            result.penalty
        );
    }

    println!("\nProfile scorecard");
    for entry in &result.scorecard {
        println!(
            "  {:<10} {:<8} {}",
            entry.dimension.label(),
            entry.rating.label(),
            serde_json::to_string(&entry.value).unwrap_or_default()
        );
    }

    if !result.tips.is_empty() {
        println!("\nImprovement tips");
        for tip in &result.tips {
            println!("  - {}", tip.message());
        }
    }

    if let Some(warning) = result.fit_warning {
        println!("\nExam fit: {}", warning.message());
    }
}

fn render_artifact(artifact: &ModelArtifact) {
    let metadata = &artifact.metadata;
    println!("Model artifact");
    println!("  format version: {}", artifact.format_version);
    println!("  name: {}", metadata.name.as_deref().unwrap_or("(unnamed)"));
    if let Some(trained_at) = metadata.trained_at {
        println!("  trained at: {}", trained_at.format("%Y-%m-%d %H:%M UTC"));
    }
    if let Some(rows) = metadata.training_rows {
        println!("  training rows: {rows}");
    }
    if let Some(r2) = metadata.cross_val_r2 {
        println!("  cross-validated R2: {r2:.3}");
    }
    println!("  trees: {}", artifact.forest.tree_count());
    println!("  features: {}", artifact.feature_order.join(", "));

    for (title, table) in [
        ("degree", &artifact.categories.degree),
        ("exam", &artifact.categories.exam),
        ("country", &artifact.categories.country),
    ] {
        let codes: Vec<_> = table
            .iter()
            .map(|(label, code)| format!("{label}={code}"))
            .collect();
        println!("  {title} codes: {}", codes.join(", "));
    }
}
