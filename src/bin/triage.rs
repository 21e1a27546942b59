use std::env;
use std::io::{self, Write};

use anyhow::{anyhow, Context, Result};
use meditriage::config;
use meditriage::models::{PatientProfile, Sex, TurnOutcome};
use meditriage::session::AnalysisOutcome;
use meditriage::{GeminiInterviewService, TriageSession};

fn main() -> Result<()> {
    let args = CliArgs::parse()?;
    config::ensure_workspace_structure()?;
    let mut config = config::load_or_default()?;
    if let Some(model) = args.model {
        config.gemini.model = model;
    }
    if let Some(max_questions) = args.max_questions {
        config.interview.max_questions = max_questions;
    }

    let api_key = env::var("GEMINI_API_KEY")
        .context("GEMINI_API_KEY must be set; the assessment runs against the Gemini API")?;
    let service = GeminiInterviewService::new(&config, api_key)?;
    let mut session = TriageSession::new(Box::new(service))?;

    println!("MediTriage: AI symptom assessment (research preview, not medical advice)");
    loop {
        run_assessment(&mut session)?;
        if !prompt_yes_no("Start a new assessment? [y/N]")? {
            break;
        }
        session.reset()?;
        println!();
    }
    Ok(())
}

fn run_assessment(session: &mut TriageSession) -> Result<()> {
    println!();
    println!("Enter the patient's details to begin.");
    let profile = prompt_profile()?;

    println!();
    println!("Starting the interview. Answer each question; the interviewer");
    println!("will say when it has enough.");
    session.submit_intake(profile)?;

    loop {
        match next_turn_with_retry(session)? {
            TurnFetch::Abandoned => {
                println!();
                println!("Assessment abandoned; returning to intake.");
                return Ok(());
            }
            TurnFetch::Outcome(TurnOutcome::Question { text }) => {
                println!();
                println!("Interviewer: {text}");
                let answer = prompt_required("Your answer")?;
                session.answer_question(&answer)?;
            }
            TurnFetch::Outcome(TurnOutcome::Complete) => break,
        }
    }

    println!();
    println!("Analyzing symptoms... this can take a little while.");
    match session.complete_interview()? {
        AnalysisOutcome::Completed(report) => render_report(session.profile(), &report),
        AnalysisOutcome::Failed { notice } => {
            println!();
            println!("{notice}");
        }
    }
    Ok(())
}

enum TurnFetch {
    Outcome(TurnOutcome),
    Abandoned,
}

/// Interview-turn failures leave the session where it was, so the user
/// can choose to retry the same turn or give up on the run.
fn next_turn_with_retry(session: &mut TriageSession) -> Result<TurnFetch> {
    loop {
        match session.next_question() {
            Ok(outcome) => return Ok(TurnFetch::Outcome(outcome)),
            Err(err) => {
                println!();
                println!("The interviewer is unavailable: {err:#}");
                if prompt_yes_no("Retry this turn? [y/N]")? {
                    continue;
                }
                session.reset()?;
                return Ok(TurnFetch::Abandoned);
            }
        }
    }
}

fn render_report(profile: Option<&PatientProfile>, report: &meditriage::AssessmentReport) {
    println!();
    println!("=== Preliminary assessment ===");
    if let Some(profile) = profile {
        println!(
            "Patient: {} ({}, {})",
            profile.full_name,
            profile.age_years,
            profile.sex.label()
        );
    }
    println!();
    println!("{}", report.summary);
    println!();
    println!("Differential diagnosis:");
    for entry in &report.differential {
        println!(
            "  - {} ({}%): {}",
            entry.condition, entry.likelihood_percent, entry.rationale
        );
    }
    println!();
    println!("Recommended urgency: {}", report.urgency.label());
    if !report.recommended_steps.is_empty() {
        println!("Next steps:");
        for step in &report.recommended_steps {
            println!("  - {step}");
        }
    }
    println!();
    println!("{}", report.disclaimer);
}

fn prompt_profile() -> Result<PatientProfile> {
    let full_name = prompt_required("Full name")?;
    let age_years = prompt_age()?;
    let sex = prompt_sex()?;
    let chief_complaint = prompt_required("Main symptom or complaint")?;
    let symptom_duration = prompt_required("How long has this been going on")?;
    let conditions = prompt_list("Pre-existing conditions (comma separated, blank for none)")?;
    let medications = prompt_list("Current medications (comma separated, blank for none)")?;
    let allergies = prompt_list("Known allergies (comma separated, blank for none)")?;
    Ok(
        PatientProfile::new(full_name, age_years, sex, chief_complaint, symptom_duration)
            .with_preexisting_conditions(conditions)
            .with_current_medications(medications)
            .with_allergies(allergies),
    )
}

fn prompt_line(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

fn prompt_required(label: &str) -> Result<String> {
    loop {
        let value = prompt_line(label)?;
        if !value.is_empty() {
            return Ok(value);
        }
        println!("This field is required.");
    }
}

fn prompt_age() -> Result<u32> {
    loop {
        let value = prompt_required("Age in years")?;
        match value.parse::<u32>() {
            Ok(age) if age <= 130 => return Ok(age),
            _ => println!("Please enter an age as a whole number."),
        }
    }
}

fn prompt_sex() -> Result<Sex> {
    loop {
        let value = prompt_required("Sex (f/m/other)")?;
        match value.to_lowercase().as_str() {
            "f" | "female" => return Ok(Sex::Female),
            "m" | "male" => return Ok(Sex::Male),
            "o" | "other" => return Ok(Sex::Other),
            _ => println!("Please answer f, m, or other."),
        }
    }
}

fn prompt_list(label: &str) -> Result<Vec<String>> {
    let value = prompt_line(label)?;
    Ok(value
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}

fn prompt_yes_no(label: &str) -> Result<bool> {
    let value = prompt_line(label)?;
    Ok(matches!(value.to_lowercase().as_str(), "y" | "yes"))
}

struct CliArgs {
    model: Option<String>,
    max_questions: Option<u32>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut model = None;
        let mut max_questions = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--model" => {
                    let value = args.next().context("Expected a model name after --model")?;
                    model = Some(value);
                }
                "--max-questions" => {
                    let value = args
                        .next()
                        .context("Expected a number after --max-questions")?;
                    max_questions = Some(
                        value
                            .parse::<u32>()
                            .context("--max-questions expects a whole number")?,
                    );
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => {
                    return Err(anyhow!(
                        "Unknown argument '{other}'. Run with --help for usage instructions."
                    ));
                }
            }
        }
        Ok(Self {
            model,
            max_questions,
        })
    }
}

fn print_usage() {
    println!("Usage: triage [--model <name>] [--max-questions <n>]");
    println!();
    println!("Runs an interactive AI symptom assessment in the terminal.");
    println!("Requires GEMINI_API_KEY in the environment.");
    println!();
    println!("Options:");
    println!("  --model <name>        Override the configured Gemini model");
    println!("  --max-questions <n>   Cap the number of interview questions");
    println!("  -h, --help            Show this help text");
}
