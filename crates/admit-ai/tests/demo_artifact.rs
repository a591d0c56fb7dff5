use std::io::Cursor;
use std::path::PathBuf;

use admit_ai::admissions::{
    score_csv, ApplicantProfile, Category, Country, Degree, ExamType, FitWarning, ModelArtifact,
    ScoringContext, ScoringPolicy, Tip, Verdict,
};

fn demo_artifact_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models/admit_forest.json")
}

fn demo_context(policy: ScoringPolicy) -> ScoringContext {
    let artifact = ModelArtifact::from_path(demo_artifact_path()).expect("demo artifact loads");
    ScoringContext::from_artifact(artifact, policy)
}

fn reference_profile() -> ApplicantProfile {
    ApplicantProfile {
        degree: Degree::Masters,
        exam_type: ExamType::Ielts,
        exam_score: 7.0,
        work_experience_years: 2,
        cgpa: 8.5,
        sop: 4.0,
        lor: 4.0,
        research: true,
        internship: false,
        country: Country::Germany,
    }
}

#[test]
fn demo_artifact_covers_every_country() {
    let artifact = ModelArtifact::from_path(demo_artifact_path()).expect("demo artifact loads");

    assert_eq!(artifact.forest.tree_count(), 4);
    assert!(artifact.categories.missing::<Country>().is_empty());
    assert_eq!(artifact.categories.country.get("UAE"), Some(&10));
    assert_eq!(
        artifact.metadata.name.as_deref(),
        Some("admit-forest-demo")
    );
}

#[test]
fn reference_profile_is_a_strong_admit() {
    let context = demo_context(ScoringPolicy::default());

    let result = context
        .evaluate(&reference_profile())
        .expect("reference profile scores");

    assert_eq!(context.predictor_name(), "random_forest");
    assert_eq!(result.prediction, 73.0);
    assert_eq!(result.verdict, Verdict::StrongAdmit);
    assert_eq!(result.tips, vec![Tip::ReachSchools]);
    assert_eq!(result.view().fit_warning, "");
}

#[test]
fn language_test_for_usa_carries_gre_advice() {
    let context = demo_context(ScoringPolicy::default());
    let mut profile = reference_profile();
    profile.country = Country::Usa;

    let result = context.evaluate(&profile).expect("profile scores");

    assert_eq!(result.fit_warning, Some(FitWarning::GreExpected(Country::Usa)));
}

#[test]
fn twelve_country_deployment_rejects_uae() {
    let policy = ScoringPolicy::default().with_countries(
        Country::ALL
            .iter()
            .copied()
            .filter(|country| *country != Country::Uae),
    );
    let context = demo_context(policy);
    let mut profile = reference_profile();
    profile.country = Country::Uae;

    let error = context.evaluate(&profile).expect_err("UAE disabled");

    assert!(error.to_string().contains("country 'UAE'"));
    assert_eq!(context.available_countries().len(), 12);
}

#[test]
fn batch_export_scores_against_demo_model() {
    let context = demo_context(ScoringPolicy::default());
    let export = "\
degree,exam_type,exam_score,work_exp,cgpa,sop,lor,research,internship,country
Masters,IELTS,7.0,2,8.5,4.0,4.0,1,0,Germany
Masters,DET,5,2,8.5,4.0,4.0,1,0,Germany
";

    let outcomes = score_csv(&context, Cursor::new(export)).expect("header readable");

    assert_eq!(outcomes.len(), 2);
    let first = outcomes[0].result.as_ref().expect("first row scores");
    assert_eq!(first.prediction, 73.0);
    let error = outcomes[1].result.as_ref().expect_err("DET 5 is below range");
    assert_eq!(
        error.to_string(),
        "Invalid DET score 5. Allowed range: 10 to 160"
    );
}
