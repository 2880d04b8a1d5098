mod command;
mod render;

use command::{Command, QuitGuard};
use session::{Controller, Notice, Phase, Reporter, Step};
use source::Source;
use std::{env, sync::Arc};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    runtime::Builder,
    signal,
    sync::mpsc,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse environment variables
    let base = env::var("QUIZ_API_BASE").unwrap_or_else(|_| String::from(source::DEFAULT_BASE));
    let remote = match env::var("QUIZ_SUBMIT_RESULTS") {
        Ok(flag) => flag.parse()?,
        _ => false,
    };

    let source = Source::new(&base).map_err(|err| anyhow::anyhow!("{base}: {err}"))?;
    log::info!("using question service at {}", source.base());

    let runtime = Builder::new_current_thread().enable_all().build()?;
    let result = runtime.block_on(run(Arc::new(source), remote));

    // A pending stdin read would otherwise hold up the shutdown.
    runtime.shutdown_background();
    result
}

async fn run(source: Arc<Source>, remote: bool) -> anyhow::Result<()> {
    println!("{}", render::menu());

    // The count is informational, so it must not hold up the menu.
    let mut count = {
        let source = Arc::clone(&source);
        tokio::spawn(async move { source.fetch_question_count().await })
    };
    let mut counting = true;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let reporter = Reporter::new(Arc::clone(&source), remote);
    let mut ctl = Controller::new(source, reporter, tx);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut guard = QuitGuard::default();

    loop {
        tokio::select! {
            biased;
            result = signal::ctrl_c() => {
                result?;
                break;
            }
            result = &mut count, if counting => {
                counting = false;
                match result {
                    Ok(total) => println!("{}", render::question_bank(total)),
                    Err(err) => log::warn!("Question count task failed: {err}"),
                }
            }
            Some(event) = rx.recv() => {
                let notice = ctl.handle(event);
                on_notice(&ctl, notice);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !on_input(&mut ctl, &mut guard, &line) {
                    break;
                }
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn on_notice(ctl: &Controller, notice: Notice) {
    match notice {
        Notice::Ignored | Notice::Ticked { crossed: None, .. } => (),
        Notice::Activated => println!("{}", render::question(ctl.session())),
        Notice::Aborted(err) => println!("{err}\n\n{}", render::topics()),
        Notice::Ticked { remaining, crossed: Some(urgency) } => {
            if let Some(cue) = render::urgency_cue(urgency, remaining) {
                println!("{cue}");
            }
        }
        Notice::Finished(summary) => println!("{}", render::summary(&summary)),
    }
}

/// Returns `false` once the user asks to leave.
fn on_input(ctl: &mut Controller, guard: &mut QuitGuard, line: &str) -> bool {
    let Some(command) = Command::parse(line) else {
        if !line.trim().is_empty() {
            println!("Unknown command. Type `help` for a list of commands.");
        }
        return true;
    };

    if command != Command::Quit {
        guard.disarm();
    }

    match command {
        Command::Quit => {
            if guard.confirm(ctl.session().phase() == Phase::Active) {
                return false;
            }
            println!("Your quiz progress will be lost. Type `quit` again to leave.");
        }
        Command::Help => println!("{}", render::help()),
        Command::Topics => println!("{}", render::topics()),
        Command::Start(topic) => {
            println!("Loading {}...", topic.display_name());
            ctl.start(topic);
        }
        Command::Retake => match ctl.retake() {
            Ok(_) => println!("Loading..."),
            Err(err) => println!("{err}"),
        },
        Command::Select(index) => match ctl.select_option(index) {
            Ok(()) => println!("{}", render::question(ctl.session())),
            Err(err) => println!("{err}"),
        },
        Command::Next => {
            let session = ctl.session();
            if session.phase() == Phase::Active && !session.can_advance() {
                println!("Select an option before moving on.");
                return true;
            }
            match ctl.next() {
                Ok(Step::Moved(_)) => println!("{}", render::question(ctl.session())),
                Ok(Step::Finished(summary)) => println!("{}", render::summary(&summary)),
                Err(err) => println!("{err}"),
            }
        }
        Command::Previous => match ctl.previous() {
            Ok(true) => println!("{}", render::question(ctl.session())),
            Ok(false) => println!("This is the first question."),
            Err(err) => println!("{err}"),
        },
        Command::Finish => match ctl.finish() {
            Ok(summary) => println!("{}", render::summary(&summary)),
            Err(err) => println!("{err}"),
        },
        Command::Show => {
            let session = ctl.session();
            match session.phase() {
                Phase::Idle => println!("{}", render::topics()),
                Phase::Loading => println!("Loading questions..."),
                Phase::Active => println!("{}", render::question(session)),
                Phase::Finished => match session.score() {
                    Ok(summary) => println!("{}", render::summary(&summary)),
                    Err(err) => println!("{err}"),
                },
            }
        }
    }

    true
}
