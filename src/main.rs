use std::env;
use std::fs;
use std::process::ExitCode;

use quizgen::config::Config;
use quizgen::errors::QuizError;
use quizgen::models::domain::{AnswerLetter, QuizRequest};
use quizgen::random::RandomSource;
use quizgen::services::grading::answer_key;
use quizgen::session::QuizSession;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(path) = args.first() else {
        eprintln!("usage: quizgen <text-file> [mcq-count] [tf-count] [difficulty] [--json]");
        return ExitCode::FAILURE;
    };

    let config = Config::from_env();
    let json_output = args.iter().any(|arg| arg == "--json");
    let positional: Vec<&String> = args
        .iter()
        .skip(1)
        .filter(|arg| !arg.starts_with("--"))
        .collect();

    let mcq_count = positional
        .first()
        .and_then(|v| v.parse().ok())
        .unwrap_or(config.default_mcq_count);
    let tf_count = positional
        .get(1)
        .and_then(|v| v.parse().ok())
        .unwrap_or(config.default_tf_count);
    let difficulty = positional
        .get(2)
        .and_then(|v| v.parse().ok())
        .unwrap_or(config.default_difficulty);

    let mut text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("failed to read {}: {}", path, err);
            return ExitCode::FAILURE;
        }
    };
    if text.chars().count() > config.max_source_chars {
        log::warn!("input truncated to {} characters", config.max_source_chars);
        text = text.chars().take(config.max_source_chars).collect();
    }

    let session = QuizSession::new(text);
    let request = QuizRequest::new(mcq_count, tf_count, difficulty);
    let mut rng = RandomSource::new();

    let quiz = match session.build_quiz(&request, &mut rng) {
        Ok(quiz) => quiz,
        Err(QuizError::NoQuestions) => {
            eprintln!("could not generate questions from this document; try another file or adjust formatting");
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    if json_output {
        match serde_json::to_string_pretty(&quiz) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("failed to serialize quiz: {}", err);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    for (i, question) in quiz.questions.iter().enumerate() {
        println!("{}. {}", i + 1, question.text);
        for (j, option) in question.options.iter().enumerate() {
            let letter = AnswerLetter::from_index(j).map(|l| l.as_char()).unwrap_or('?');
            println!("   {}. {}", letter, option);
        }
        println!();
    }

    println!("Answer Key");
    for entry in answer_key(&quiz) {
        match (entry.letter, entry.option_text) {
            (Some(letter), Some(option)) => println!("Q{}: {}. {}", entry.number, letter, option),
            _ => println!("Q{}: N/A", entry.number),
        }
    }

    if let Some(shortfall) = quiz.shortfall {
        eprintln!(
            "note: {} MCQ and {} true/false questions short of the requested counts",
            shortfall.mcq_missing, shortfall.tf_missing
        );
    }

    ExitCode::SUCCESS
}
