use model::{Completion, ResultSummary, Topic};
use session::{timer, Session, Urgency};

const BAR_WIDTH: usize = 20;

pub fn topics() -> String {
    let mut lines = vec![String::from("Available topics:")];
    lines.extend(Topic::SUPPORTED.iter().map(|topic| format!("  {:<12}{}", topic.id(), topic.display_name())));
    lines.join("\n")
}

/// Welcome screen shown once at startup.
pub fn menu() -> String {
    [
        String::from("Welcome to Quizbox!"),
        topics(),
        String::from("Type a topic id to begin, or `help` for all commands."),
    ]
    .join("\n\n")
}

/// Size of the question bank, announced once it is known.
pub fn question_bank(count: u32) -> String {
    format!("Practice with {count}+ questions.")
}

pub const fn help() -> &'static str {
    "Commands:
  <topic> | start <category>   begin a quiz
  1-4 | a-d                    select an option
  n | next                     next question (finishes on the last one)
  p | prev                     previous question
  finish                       submit the quiz now
  r | retake                   restart the current topic
  show                         redraw the current screen
  topics                       list available topics
  q | quit                     leave"
}

fn progress_bar(number: usize, total: usize) -> String {
    if total == 0 {
        return format!("[{}] 0%", ".".repeat(BAR_WIDTH));
    }
    let filled = number.min(total) * BAR_WIDTH / total;
    format!("[{}{}] {}%", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled), number.min(total) * 100 / total)
}

const fn urgency_marker(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Calm => "",
        Urgency::Warning => " (!)",
        Urgency::Critical => " (!!)",
    }
}

/// Announcement for the moment the clock enters a more urgent band.
pub fn urgency_cue(urgency: Urgency, remaining: u32) -> Option<String> {
    let clock = timer::clock(remaining);
    match urgency {
        Urgency::Calm => None,
        Urgency::Warning => Some(format!("Heads up: {clock} left.")),
        Urgency::Critical => Some(format!("Hurry! Only {clock} left.")),
    }
}

pub fn question(session: &Session) -> String {
    let Some(question) = session.current() else {
        return String::from("There is no question to show.");
    };

    let total = session.questions().len();
    let number = session.position() + 1;
    let topic = session.topic().map_or("Quiz", |topic| topic.display_name());
    let mut lines = vec![
        format!(
            "{topic} | Question {number} of {total} | {}{}",
            timer::clock(session.remaining()),
            urgency_marker(session.urgency()),
        ),
        progress_bar(number, total),
        String::new(),
        question.prompt.clone(),
    ];

    let selection = session.selection();
    for ((label, index), option) in ('A'..='D').zip(0u8..).zip(question.options.iter()) {
        let marker = if selection == Some(index) { '>' } else { ' ' };
        lines.push(format!(" {marker} {label}. {option}"));
    }

    let forward = if session.is_last() { "finish the quiz" } else { "go to the next question" };
    lines.push(String::new());
    lines.push(format!("Pick 1-4 (or a-d), `n` to {forward}, `p` to go back."));
    lines.join("\n")
}

pub fn summary(summary: &ResultSummary) -> String {
    let mut lines = Vec::with_capacity(6);
    if summary.completion == Completion::Expired {
        lines.push(String::from("Time's up!"));
    }
    lines.push(summary.grade().headline().to_owned());
    lines.push(format!(
        "{}: {}/{} correct ({}%)",
        summary.topic.display_name(),
        summary.correct,
        summary.total,
        summary.percentage,
    ));
    lines.push(format!(
        "Correct: {} | Incorrect: {} | Time spent: {}",
        summary.correct,
        summary.incorrect,
        timer::clock(summary.elapsed),
    ));
    lines.push(String::from("Type `r` to retake this quiz or `topics` to pick another."));
    lines.join("\n")
}
