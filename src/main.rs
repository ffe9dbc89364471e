use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;

use typrate::config::Config;
use typrate::event::{EventHandler, HostEvent};
use typrate::prompt::{Difficulty, PracticeFocus, Prompt};
use typrate::session::matcher::{CharVerdict, WordComparison};
use typrate::session::result::ScoreRecord;
use typrate::session::state::{SubmitOutcome, TickOutcome};
use typrate::session::{Mode, TestConfig, TestSession, stats};
use typrate::store::{ScoreHistory, ScoreStore};

#[derive(Parser)]
#[command(
    name = "typrate",
    version,
    about = "Typing speed trainer with selectable test modes and persistent best scores"
)]
struct Cli {
    #[arg(short, long, help = "Test mode (time, words, infinite, practice, custom)")]
    mode: Option<String>,

    #[arg(short, long, help = "Prompt difficulty (easy, medium, hard)")]
    difficulty: Option<String>,

    #[arg(short, long, help = "Time limit in seconds (time mode)")]
    seconds: Option<u32>,

    #[arg(short, long, help = "Word limit (words mode)")]
    words: Option<usize>,

    #[arg(
        short,
        long,
        help = "Practice focus (numbers, symbols, uppercase, lowercase, common-words)"
    )]
    focus: Option<String>,

    #[arg(short, long, help = "Custom prompt text (implies custom mode)")]
    text: Option<String>,

    #[arg(long, help = "Print the leaderboard and exit")]
    best: bool,

    #[arg(long, help = "Do not persist this session's score")]
    no_save: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|e| {
        log::warn!("could not read config, using defaults: {e}");
        Config::default()
    });
    let selection_flags = cli.mode.is_some()
        || cli.difficulty.is_some()
        || cli.seconds.is_some()
        || cli.words.is_some()
        || cli.focus.is_some();
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(seconds) = cli.seconds {
        config.seconds = seconds;
    }
    if let Some(words) = cli.words {
        config.words = words;
    }
    if let Some(focus) = cli.focus {
        config.focus = focus;
    }
    if cli.text.is_some() {
        config.mode = "custom".to_string();
    }
    config.normalize();
    // Flag selections become the next run's defaults; custom text stays
    // per-run and is never saved.
    if selection_flags && config.mode != "custom" {
        let _ = config.save();
    }

    let store = if cli.no_save {
        None
    } else {
        match ScoreStore::new() {
            Ok(store) => Some(store),
            Err(e) => {
                log::warn!("score storage unavailable, scores will not be saved: {e}");
                None
            }
        }
    };
    let mut history = ScoreHistory::load(store);

    if cli.best {
        if history.is_empty() {
            println!("no scores yet");
        }
        for row in history.leaderboard_rows() {
            println!("{row}");
        }
        return Ok(());
    }

    let test_config = build_test_config(&config, cli.text.as_deref())?;
    let prompt = Prompt::resolve(&test_config);

    let mut session = TestSession::new();
    session.start(prompt, test_config)?;

    println!(
        "mode {} | difficulty {} | {} words in prompt",
        session.config.mode.label(),
        session.config.difficulty.label(),
        session.prompt.len(),
    );
    println!("press Enter after each word; Ctrl-D to stop early");
    print_target(&session);

    run(&mut session, &mut history)
}

fn build_test_config(config: &Config, custom_text: Option<&str>) -> Result<TestConfig> {
    let difficulty = Difficulty::parse(&config.difficulty).unwrap_or(Difficulty::Easy);
    let mode = match config.mode.as_str() {
        "time" => Mode::TimeLimit(config.seconds),
        "words" => Mode::WordCount(config.words),
        "infinite" => Mode::Infinite,
        "practice" => Mode::Practice(
            PracticeFocus::parse(&config.focus).unwrap_or(PracticeFocus::CommonWords),
        ),
        "custom" => match custom_text {
            Some(text) => Mode::Custom(text.to_string()),
            None => bail!("custom mode needs --text"),
        },
        other => bail!("unknown mode `{other}`"),
    };
    Ok(TestConfig { mode, difficulty })
}

fn run(session: &mut TestSession, history: &mut ScoreHistory) -> Result<()> {
    let events = EventHandler::new(Duration::from_secs(1));

    while session.is_running() {
        match events.next()? {
            HostEvent::Line(line) => match session.submit_word(&line) {
                Ok(SubmitOutcome::Ignored) => {}
                Ok(SubmitOutcome::Advanced(comparison)) => {
                    print_feedback(session, &comparison);
                    print_target(session);
                }
                Ok(SubmitOutcome::Finished(comparison, record)) => {
                    print_feedback(session, &comparison);
                    finish(session, history, record);
                }
                Err(e) => log::debug!("submission dropped: {e}"),
            },
            HostEvent::Tick => match session.tick() {
                Ok(TickOutcome::Running) => {}
                Ok(TickOutcome::Finished(record)) => {
                    println!("\ntime is up");
                    finish(session, history, record);
                }
                Err(e) => log::debug!("tick dropped: {e}"),
            },
            HostEvent::Eof => {
                session.abort();
                println!("\nstopped; no score recorded");
            }
        }
    }
    Ok(())
}

fn print_target(session: &TestSession) {
    if let Some(word) = session.current_word() {
        match session.next_word() {
            Some(next) => println!("type: {word}   (next: {next})"),
            None => println!("type: {word}"),
        }
    }
}

fn print_feedback(session: &TestSession, comparison: &WordComparison) {
    let marker = if comparison.full_match { " ok" } else { "err" };
    println!(
        "{marker} {}  [{} | {} WPM | {:.1}% | {:.0}%]",
        verdict_markup(comparison),
        stats::format_clock(session.elapsed_secs),
        stats::wpm(session),
        stats::accuracy_percent(session),
        session.progress_fraction() * 100.0,
    );
}

/// Correct characters echo the target; mistakes show as x (wrong), _ (not
/// typed), + (typed past the end).
fn verdict_markup(comparison: &WordComparison) -> String {
    comparison
        .chars
        .iter()
        .map(|check| match check.verdict {
            CharVerdict::Correct => check.ch,
            CharVerdict::Incorrect => 'x',
            CharVerdict::Missing => '_',
            CharVerdict::Extra => '+',
        })
        .collect()
}

fn finish(session: &TestSession, history: &mut ScoreHistory, record: ScoreRecord) {
    println!();
    println!("test complete ({})", stats::format_clock(session.elapsed_secs));
    println!("  wpm:            {}", record.wpm);
    println!("  accuracy:       {:.1}%", record.accuracy);
    println!("  error rate:     {:.1}%", stats::error_rate_percent(session));
    println!("  correct words:  {}", session.correct_words);
    println!(
        "  avg time/word:  {:.1}s",
        stats::average_time_per_word(session)
    );
    println!(
        "  avg word time:  {:.1}s",
        stats::average_word_time(session)
    );
    let trouble = stats::top_error_chars(session, 5);
    if !trouble.is_empty() {
        let rendered: Vec<String> = trouble
            .iter()
            .map(|(ch, count)| format!("{ch} ({count})"))
            .collect();
        println!("  trouble keys:   {}", rendered.join(", "));
    }

    let outcome = history.record(record.clone());
    if outcome.new_best {
        println!();
        println!(
            "new record! {} WPM is your best for {}",
            record.wpm,
            record.key()
        );
    }

    println!();
    println!("leaderboard ({}):", record.key());
    for row in history.rows_for(&record.difficulty, &record.mode) {
        println!("  {row}");
    }
}
