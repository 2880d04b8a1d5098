use crate::{
    error::{Error, Result},
    report::Reporter,
    timer::{Timer, Urgency},
    Load, Session, Step, Tick, Ticket,
};
use model::{normalize, Question, ResultSummary, Topic};
use source::Source;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Asynchronous completions routed back into the event loop.
pub enum Event {
    Loaded {
        ticket: Ticket,
        result: source::error::Result<Vec<Question>>,
    },
    Tick(Ticket),
}

/// What the front end should know after an event was handled.
#[derive(Debug)]
pub enum Notice {
    /// Nothing changed (e.g. a superseded load or a late tick).
    Ignored,
    /// Questions arrived and the quiz is running.
    Activated,
    /// Loading failed. The user should pick a topic again.
    Aborted(Error),
    Ticked {
        remaining: u32,
        crossed: Option<Urgency>,
    },
    Finished(ResultSummary),
}

/// Owns the single running session together with its timer, and performs the
/// side effects the session itself stays clear of.
pub struct Controller {
    session: Session,
    timer: Timer,
    source: Arc<Source>,
    reporter: Reporter,
    /// Where loads and ticks report back to.
    events: mpsc::UnboundedSender<Event>,
}

impl Controller {
    pub fn new(source: Arc<Source>, reporter: Reporter, events: mpsc::UnboundedSender<Event>) -> Self {
        Self { session: Session::default(), timer: Timer::default(), source, reporter, events }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_ticking(&self) -> bool {
        self.timer.is_running()
    }

    fn spawn_load(&self, ticket: Ticket, topic: Topic) {
        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = source.fetch_questions(&topic).await.map(normalize);
            // The loop may already be shutting down, in which case nobody cares.
            let _ = events.send(Event::Loaded { ticket, result });
        });
    }

    /// Begins a new attempt. State is reset before the questions are requested.
    pub fn start(&mut self, topic: Topic) -> Ticket {
        self.timer.cancel();
        log::info!("Starting a {} quiz.", topic.id());
        let ticket = self.session.start(topic.clone());
        self.spawn_load(ticket, topic);
        ticket
    }

    pub fn retake(&mut self) -> Result<Ticket> {
        let ticket = self.session.retake()?;
        self.timer.cancel();
        let topic = self.session.topic().cloned().ok_or(Error::NoTopic)?;
        log::info!("Retaking the {} quiz.", topic.id());
        self.spawn_load(ticket, topic);
        Ok(ticket)
    }

    pub fn select_option(&mut self, index: u8) -> Result<()> {
        self.session.select_option(index)
    }

    pub fn next(&mut self) -> Result<Step> {
        let step = self.session.next()?;
        if let Step::Finished(summary) = &step {
            self.conclude(summary);
        }
        Ok(step)
    }

    pub fn previous(&mut self) -> Result<bool> {
        self.session.previous()
    }

    pub fn finish(&mut self) -> Result<ResultSummary> {
        let summary = self.session.finish()?;
        self.conclude(&summary);
        Ok(summary)
    }

    fn conclude(&mut self, summary: &ResultSummary) {
        self.timer.cancel();
        log::info!(
            "Quiz on {} finished ({:?}): {}/{} correct in {}s.",
            summary.topic.id(),
            summary.completion,
            summary.correct,
            summary.total,
            summary.elapsed,
        );
        drop(self.reporter.submit(summary.clone()));
    }

    pub fn handle(&mut self, event: Event) -> Notice {
        match event {
            Event::Loaded { ticket, result } => self.on_loaded(ticket, result),
            Event::Tick(ticket) => self.on_tick(ticket),
        }
    }

    fn on_loaded(&mut self, ticket: Ticket, result: source::error::Result<Vec<Question>>) -> Notice {
        match self.session.on_loaded(ticket, result) {
            Load::Active => {
                let events = self.events.clone();
                self.timer.start(move || events.send(Event::Tick(ticket)).is_ok());
                Notice::Activated
            }
            Load::Stale => {
                log::debug!("Discarding questions from superseded load {ticket:?}.");
                Notice::Ignored
            }
            Load::Aborted(err) => {
                log::warn!("Aborting quiz: {err}");
                Notice::Aborted(err)
            }
        }
    }

    fn on_tick(&mut self, ticket: Ticket) -> Notice {
        if ticket != self.session.ticket() {
            return Notice::Ignored;
        }

        match self.session.tick() {
            Ok(Tick::Running { remaining, crossed }) => Notice::Ticked { remaining, crossed },
            Ok(Tick::Expired(summary)) => {
                self.conclude(&summary);
                Notice::Finished(summary)
            }
            Err(_) => Notice::Ignored,
        }
    }
}
