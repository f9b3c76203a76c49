use crate::infra::{CandidateRecord, CandidateStatus, Dataset, InMemoryMatchDataSource};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use talent_match::config::parse_weight_percentages;
use talent_match::error::AppError;
use talent_match::matching::{
    Candidate, CandidateId, CompetencyId, DiscProfile, DiscTolerance, EducationEntry,
    EducationLevel, ExperienceEntry, GeoPoint, JobId, JobPosting, Location, MatchEngine,
    MatchResult, MatchStatistics, MatchWeights, SeniorityLevel, DEFAULT_MIN_SCORE,
    DEFAULT_WEIGHTS,
};

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// JSON dataset with `jobs` and `candidates`
    #[arg(long)]
    pub(crate) dataset: PathBuf,
    /// Job identifier to rank candidates for
    #[arg(long)]
    pub(crate) job: String,
    /// Minimum composite score to keep (0-100)
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) min_score: u8,
    /// Six percentages: competency,experience,education,location,salary,behavioral
    #[arg(long, value_parser = parse_weights)]
    pub(crate) weights: Option<MatchWeights>,
    /// Date used to close ongoing roles (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct StatsArgs {
    /// JSON dataset with `jobs` and `candidates`
    #[arg(long)]
    pub(crate) dataset: PathBuf,
    /// Job identifier to summarise
    #[arg(long)]
    pub(crate) job: String,
    /// Date used to close ongoing roles (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Print JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Date used to close ongoing roles (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Show the per-factor breakdown for every ranked candidate
    #[arg(long)]
    pub(crate) explain: bool,
}

fn parse_weights(raw: &str) -> Result<MatchWeights, String> {
    parse_weight_percentages(raw).map_err(|err| err.to_string())
}

fn build_engine(
    dataset: Dataset,
    as_of: Option<NaiveDate>,
) -> MatchEngine<InMemoryMatchDataSource> {
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    MatchEngine::new(Arc::new(InMemoryMatchDataSource::new(dataset))).with_reference_date(as_of)
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        dataset,
        job,
        min_score,
        weights,
        as_of,
        json,
    } = args;

    let engine = build_engine(Dataset::load(&dataset)?, as_of);
    let weights = weights.unwrap_or(DEFAULT_WEIGHTS);
    let job_id = JobId(job);
    let results = engine.compute_matches(&job_id, min_score, &weights)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        render_matches(&job_id, min_score, &results, true);
    }
    Ok(())
}

pub(crate) fn run_stats(args: StatsArgs) -> Result<(), AppError> {
    let StatsArgs {
        dataset,
        job,
        as_of,
        json,
    } = args;

    let engine = build_engine(Dataset::load(&dataset)?, as_of);
    let job_id = JobId(job);
    let statistics = engine.compute_statistics(&job_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&statistics)?);
    } else {
        render_statistics(&job_id, &statistics);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { as_of, explain } = args;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    println!("Candidate matching demo (reference date {as_of})");
    let dataset = demo_dataset();
    let job_ids: Vec<JobId> = dataset.jobs.iter().map(|job| job.id.clone()).collect();
    let engine = build_engine(dataset, Some(as_of));

    for job_id in job_ids {
        let results = engine.compute_matches(&job_id, 0, &DEFAULT_WEIGHTS)?;
        render_matches(&job_id, 0, &results, explain);
        let statistics = engine.compute_statistics(&job_id)?;
        render_statistics(&job_id, &statistics);
    }
    Ok(())
}

fn render_matches(job_id: &JobId, min_score: u8, results: &[MatchResult], explain: bool) {
    println!("\nMatches for {job_id} (min score {min_score})");
    if results.is_empty() {
        println!("- no candidate cleared the threshold");
        return;
    }
    for (rank, result) in results.iter().enumerate() {
        println!(
            "{:>2}. {} [{}] score {}",
            rank + 1,
            result.candidate_name,
            result.candidate_id,
            result.score
        );
        if explain {
            for component in &result.components {
                println!(
                    "      {:<11} {:>3}  {}",
                    component.factor.label(),
                    component.score,
                    component.notes
                );
            }
        }
    }
}

fn render_statistics(job_id: &JobId, statistics: &MatchStatistics) {
    println!("\nPool statistics for {job_id}");
    println!(
        "- {} candidates | max {} | mean {}",
        statistics.total, statistics.max_score, statistics.mean_score
    );
    println!(
        "- >=90: {} | >=80: {} | >=70: {}",
        statistics.at_least_90, statistics.at_least_80, statistics.at_least_70
    );
    for bucket in &statistics.histogram {
        println!("  {:>7} {}", bucket.label, "#".repeat(bucket.count));
    }
}

fn competencies(ids: &[&str]) -> BTreeSet<CompetencyId> {
    ids.iter().map(|id| CompetencyId(id.to_string())).collect()
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

const SAO_PAULO: GeoPoint = GeoPoint {
    latitude: -23.5505,
    longitude: -46.6333,
};

/// Sample pool covering full, partial, and sparse profiles.
pub(crate) fn demo_dataset() -> Dataset {
    let jobs = vec![
        JobPosting {
            id: JobId("vaga-backend-senior".to_string()),
            title: "Pessoa Desenvolvedora Backend Sênior".to_string(),
            required_competencies: competencies(&["rust", "postgresql", "aws", "docker"]),
            seniority: SeniorityLevel::Senior,
            desired_years_in_role: 5.0,
            target_role: Some("backend".to_string()),
            minimum_education: Some(EducationLevel::Undergraduate),
            desired_fields_of_study: vec!["computação".to_string(), "sistemas".to_string()],
            location: Location {
                coordinates: Some(SAO_PAULO),
                label: Some("São Paulo, SP".to_string()),
            },
            remote: false,
            salary_range: Some("R$ 12.000 - R$ 16.000".to_string()),
            benefits: Some("Plano de saúde, vale refeição, PLR".to_string()),
            ideal_disc_profile: Some(DiscProfile {
                dominance: 70.0,
                influence: 45.0,
                steadiness: 40.0,
                conformity: 75.0,
            }),
            disc_tolerance: DiscTolerance::default(),
        },
        JobPosting {
            id: JobId("vaga-dados-pleno".to_string()),
            title: "Analista de Dados Pleno".to_string(),
            required_competencies: competencies(&["python", "sql", "power-bi"]),
            seniority: SeniorityLevel::Mid,
            desired_years_in_role: 2.0,
            target_role: Some("dados".to_string()),
            minimum_education: Some(EducationLevel::Technical),
            desired_fields_of_study: vec!["estatística".to_string()],
            location: Location {
                coordinates: None,
                label: Some("Home office".to_string()),
            },
            remote: true,
            salary_range: Some("R$ 7.500".to_string()),
            benefits: None,
            ideal_disc_profile: None,
            disc_tolerance: DiscTolerance::default(),
        },
    ];

    let candidates = vec![
        CandidateRecord {
            candidate: Candidate {
                id: CandidateId("cand-001".to_string()),
                name: "Mariana Costa".to_string(),
                competencies: competencies(&["rust", "postgresql", "aws", "docker", "python"]),
                seniority: Some(SeniorityLevel::Senior),
                experiences: vec![ExperienceEntry {
                    title: "Engenheira Backend".to_string(),
                    start: ymd(2018, 3, 1).unwrap_or_default(),
                    end: None,
                }],
                education: vec![EducationEntry {
                    level: EducationLevel::Masters,
                    field_of_study: "Ciência da Computação".to_string(),
                }],
                location: Location {
                    coordinates: Some(GeoPoint {
                        latitude: -23.5614,
                        longitude: -46.6559,
                    }),
                    label: Some("São Paulo".to_string()),
                },
                willing_to_relocate: None,
                desired_salary: Some(15_000.0),
                disc_profile: Some(DiscProfile {
                    dominance: 72.0,
                    influence: 50.0,
                    steadiness: 35.0,
                    conformity: 70.0,
                }),
            },
            status: CandidateStatus::Active,
        },
        CandidateRecord {
            candidate: Candidate {
                id: CandidateId("cand-002".to_string()),
                name: "Rafael Nunes".to_string(),
                competencies: competencies(&["python", "sql", "docker"]),
                seniority: Some(SeniorityLevel::Mid),
                experiences: vec![
                    ExperienceEntry {
                        title: "Analista de Dados".to_string(),
                        start: ymd(2021, 2, 1).unwrap_or_default(),
                        end: None,
                    },
                    ExperienceEntry {
                        title: "Desenvolvedor Backend".to_string(),
                        start: ymd(2018, 1, 1).unwrap_or_default(),
                        end: ymd(2021, 1, 15),
                    },
                ],
                education: vec![EducationEntry {
                    level: EducationLevel::Undergraduate,
                    field_of_study: "Estatística".to_string(),
                }],
                location: Location {
                    coordinates: Some(GeoPoint {
                        latitude: -19.9167,
                        longitude: -43.9345,
                    }),
                    label: Some("Belo Horizonte".to_string()),
                },
                willing_to_relocate: Some(true),
                desired_salary: Some(9_000.0),
                disc_profile: Some(DiscProfile {
                    dominance: 40.0,
                    influence: 55.0,
                    steadiness: 70.0,
                    conformity: 80.0,
                }),
            },
            status: CandidateStatus::Active,
        },
        CandidateRecord {
            candidate: Candidate {
                id: CandidateId("cand-003".to_string()),
                name: "Juliana Prado".to_string(),
                competencies: competencies(&["sql"]),
                seniority: None,
                experiences: Vec::new(),
                education: Vec::new(),
                location: Location {
                    coordinates: None,
                    label: Some("Recife".to_string()),
                },
                willing_to_relocate: None,
                desired_salary: None,
                disc_profile: None,
            },
            status: CandidateStatus::Active,
        },
        CandidateRecord {
            candidate: Candidate {
                id: CandidateId("cand-004".to_string()),
                name: "Pedro Alves".to_string(),
                competencies: competencies(&["rust", "postgresql", "aws", "docker"]),
                seniority: Some(SeniorityLevel::Senior),
                experiences: Vec::new(),
                education: Vec::new(),
                location: Location::default(),
                willing_to_relocate: None,
                desired_salary: None,
                disc_profile: None,
            },
            status: CandidateStatus::Hired,
        },
    ];

    Dataset { jobs, candidates }
}
