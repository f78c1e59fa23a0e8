//! Terminal quiz driver: plays an adaptive session against the OpenAI
//! generator with the in-memory store. Mostly a demo of the service wiring.

use anyhow::{bail, Context, Result};
use clap::Parser;
use quizmaster::config::{KeyFromEnv, QuizConfig};
use quizmaster::error::QuizError;
use quizmaster::generator::{OpenAiConfig, OpenAiGenerator};
use quizmaster::model::Question;
use quizmaster::store::MemoryStore;
use quizmaster::QuizService;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quiz", about = "Play an adaptive trivia quiz in the terminal")]
struct Args {
    /// Quiz theme, e.g. "space" or "renaissance art"
    theme: String,

    /// Number of questions to play before stopping
    #[arg(short = 'n', long, default_value_t = 10)]
    rounds: usize,

    /// Model to generate questions with
    #[arg(long, default_value = "gpt-4o-mini")]
    model: String,
}

struct OpenAiKey;

impl KeyFromEnv for OpenAiKey {
    const KEY_NAME: &'static str = "OPENAI_API_KEY";
}

fn ask(question: &Question) -> Result<usize> {
    println!("\n[{}] {}", question.difficulty, question.text);
    for (i, option) in question.options.iter().enumerate() {
        println!("  {}) {}", i + 1, option);
    }
    loop {
        print!("answer (1-4): ");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=4).contains(&n) => return Ok(n - 1),
            _ => println!("please enter a number between 1 and 4"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let api_key = OpenAiKey::find_key()
        .context("OPENAI_API_KEY not set (environment or .env)")?;
    let generator = OpenAiGenerator::new(OpenAiConfig {
        api_key,
        model: args.model,
        ..OpenAiConfig::default()
    });
    let service = QuizService::new(generator, MemoryStore::new(), QuizConfig::default());

    let created = service.create_session(&args.theme).await?;
    println!("theme: {}", args.theme);

    let mut question = created.question;
    let mut score = 0usize;
    for round in 1..=args.rounds {
        let answer = ask(&question)?;
        let outcome = service.submit_answer(&created.session_id, answer).await?;
        if outcome.correct {
            score += 1;
            println!("correct!");
        } else {
            println!("wrong.");
        }
        if let Some(explanation) = outcome.explanation {
            println!("  {}", explanation);
        }
        println!("  difficulty is now {}", outcome.new_difficulty);

        if round == args.rounds {
            break;
        }
        question = match service.next_question(&created.session_id).await {
            Ok(q) => q,
            Err(QuizError::SessionExhausted) => {
                println!("no more questions available.");
                break;
            }
            Err(e) => bail!(e),
        };
    }

    println!("\nfinal score: {}/{}", score, args.rounds);
    Ok(())
}
