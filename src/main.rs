use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use study_assistant::app::App;
use study_assistant::quiz::OptionVerdict;
use study_assistant::GatewayError;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "study-assistant")]
#[command(about = "AI explanations, note summaries and quizzes")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Explain a doubt, optionally with a Mermaid diagram.
    Explain {
        /// The doubt to explain. Read from stdin when omitted.
        #[arg(long)]
        text: Option<String>,
        /// Write any diagram markup to this file instead of printing it.
        #[arg(long, value_name = "PATH")]
        diagram_out: Option<PathBuf>,
    },
    /// Condense notes into bullet points.
    Summarize {
        /// The notes to summarize. Read from stdin when omitted.
        #[arg(long)]
        text: Option<String>,
    },
    /// Generate a multiple-choice quiz and answer it interactively.
    Quiz {
        /// Source text to quiz on.
        #[arg(long)]
        text: String,
        /// Number of questions (1-10).
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=10))]
        questions: u32,
    },
}

fn read_input(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read input from stdin")?;
            Ok(buf)
        }
    }
}

/// User-facing text for a failure while building the app.
fn startup_error_message(err: study_assistant::Error) -> String {
    GatewayError::from(err).message().to_string()
}

/// Parse a 1-based option number typed by the learner.
fn parse_choice(input: &str, option_count: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=option_count).contains(&n).then(|| n - 1)
}

fn verdict_marker(verdict: Option<OptionVerdict>) -> &'static str {
    match verdict {
        Some(OptionVerdict::Correct) => "[correct]",
        Some(OptionVerdict::Incorrect) => "[your answer]",
        _ => "",
    }
}

async fn run_explain(app: &mut App, text: String, diagram_out: Option<PathBuf>) -> Result<()> {
    app.explain(&text).await;
    let view = app.solver_mut();
    if let Some(message) = view.error() {
        bail!("{}", message);
    }
    if view.explanation().is_empty() && view.diagram().is_none() {
        bail!("Please enter a doubt to explain.");
    }

    println!("{}", view.explanation());

    if let Some(diagram) = view.take_render_request() {
        match diagram_out {
            Some(path) => {
                std::fs::write(&path, &diagram)
                    .with_context(|| format!("Failed to write diagram to {}", path.display()))?;
                info!("Saved diagram markup to {}", path.display());
            }
            None => println!("\n```mermaid\n{}\n```", diagram),
        }
    }
    Ok(())
}

async fn run_summarize(app: &mut App, text: String) -> Result<()> {
    app.summarize(&text).await;
    let view = app.summarizer();
    if let Some(message) = view.error() {
        bail!("{}", message);
    }
    match view.summary() {
        Some(summary) => {
            println!("{}", summary);
            Ok(())
        }
        None => bail!("Please enter some notes to summarize."),
    }
}

async fn run_quiz(app: &mut App, text: String, questions: u32) -> Result<()> {
    app.generate_quiz(&text, questions).await;
    if let Some(message) = app.quiz().error() {
        bail!("{}", message);
    }
    let Some(quiz) = app.quiz().questions().map(<[_]>::to_vec) else {
        bail!("Please enter some text to generate a quiz from.");
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    for (index, question) in quiz.iter().enumerate() {
        println!("\n{}. {}", index + 1, question.question);
        for (i, option) in question.options.iter().enumerate() {
            println!("   {}) {}", i + 1, option);
        }
        loop {
            print!("Your answer (1-{}): ", question.options.len());
            io::stdout().flush()?;
            let Some(line) = lines.next().transpose()? else {
                break;
            };
            if let Some(choice) = parse_choice(&line, question.options.len()) {
                app.quiz_mut().select_answer(index, &question.options[choice]);
                break;
            }
            println!("Please enter a number between 1 and {}.", question.options.len());
        }
    }

    let view = app.quiz_mut();
    let score = view.submit_answers().unwrap_or(0);

    println!("\nResults");
    for (index, question) in quiz.iter().enumerate() {
        println!("\n{}. {}", index + 1, question.question);
        for option in &question.options {
            println!("   {} {}", option, verdict_marker(view.verdict(index, option)));
        }
    }
    println!("\nYour score: {}/{}", score, quiz.len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "study_assistant=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = CliArgs::parse();

    let mut app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            eprintln!("{}", startup_error_message(e));
            std::process::exit(1);
        }
    };

    let outcome = match args.command {
        Command::Explain { text, diagram_out } => {
            let text = read_input(text)?;
            run_explain(&mut app, text, diagram_out).await
        }
        Command::Summarize { text } => {
            let text = read_input(text)?;
            run_summarize(&mut app, text).await
        }
        Command::Quiz { text, questions } => run_quiz(&mut app, text, questions).await,
    };

    if let Err(e) = outcome {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}
