//! Interactive play over stdin.

use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use lf_engine::session::DEATH_BANNER;
use lf_engine::{CannedSpeech, EngineConfig, GameSession, TurnOutcome, demo};
use miette::{IntoDiagnostic, Result, WrapErr};

pub fn run(seed: Option<u64>, config: Option<&Path>, transcript: Option<&Path>) -> Result<()> {
    let mut config = match config {
        Some(path) => EngineConfig::load(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    tracing::debug!(seed = config.seed, "starting play");
    let pack = demo::build().into_diagnostic()?;
    let mut session = GameSession::new(pack, &config, CannedSpeech::default()).into_diagnostic()?;

    println!("  {} | seed {}", demo::TITLE.bold().yellow(), config.seed);
    println!("  Type 'help' for hints, 'quit' to leave.\n");
    println!("{}\n", session.opening().into_diagnostic()?);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().into_diagnostic()?;

        line.clear();
        if reader.read_line(&mut line).into_diagnostic()? == 0 {
            break;
        }

        let turn = session.process(&line).into_diagnostic()?;
        match turn.outcome {
            TurnOutcome::Died => {
                let text = turn
                    .narration
                    .replace(DEATH_BANNER, &DEATH_BANNER.red().bold().to_string());
                println!("{text}\n");
            }
            TurnOutcome::ParseFailure | TurnOutcome::NoMatch => {
                println!("{}\n", turn.narration.dimmed());
            }
            _ => println!("{}\n", turn.narration),
        }
        if session.is_finished() {
            break;
        }
    }

    let game = session.game();
    println!(
        "  Score {} in {} moves, {} deaths.",
        game.ctx().score(),
        game.ctx().moves(),
        game.ctx().deaths()
    );

    if let Some(path) = transcript {
        session
            .transcript()
            .write_to(path)
            .into_diagnostic()
            .wrap_err("failed to write transcript")?;
        println!("  Transcript written to {}", path.display());
    }
    Ok(())
}
