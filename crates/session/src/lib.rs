//! The quiz session state machine and the machinery around it.
//!
//! ```text
//! Idle -> Loading -> Active -> Finished
//!   ^        |                    |
//!   +--------+ (failed load)      +--> Loading (retake)
//! ```
//!
//! [`Session`] is purely synchronous. Anything that suspends (loading
//! questions, ticking, reporting results) is driven by the [`Controller`].

pub mod controller;
pub mod error;
pub mod report;
pub mod scorer;
pub mod timer;

pub use controller::{Controller, Event, Notice};
pub use report::Reporter;
pub use timer::{Timer, Urgency};

use error::{Error, Result};
use model::{AnswerMap, Completion, Question, ResultSummary, Topic, OPTION_COUNT};

/// Length of a quiz attempt in seconds.
pub const SESSION_DURATION: u32 = 1200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Active,
    Finished,
}

/// Identifies one call to [`Session::start`]. Results and ticks carrying an
/// older ticket belong to a superseded attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ticket(u64);

/// Outcome of delivering loaded questions to the session.
#[derive(Debug)]
pub enum Load {
    /// Questions accepted, the session is now active.
    Active,
    /// The result belongs to a superseded start and was dropped.
    Stale,
    /// Loading failed. The session is back to idle.
    Aborted(Error),
}

/// Outcome of moving forward.
#[derive(Debug)]
pub enum Step {
    Moved(usize),
    Finished(ResultSummary),
}

/// Outcome of a clock tick.
#[derive(Debug)]
pub enum Tick {
    Running {
        remaining: u32,
        /// Set when this tick entered a more urgent band.
        crossed: Option<Urgency>,
    },
    Expired(ResultSummary),
}

/// One attempt at a quiz, from topic selection until it is scored.
pub struct Session {
    phase: Phase,
    ticket: Ticket,
    topic: Option<Topic>,
    questions: Box<[Question]>,
    position: usize,
    answers: AnswerMap,
    remaining: u32,
    completion: Option<Completion>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            ticket: Ticket::default(),
            topic: None,
            questions: Box::default(),
            position: 0,
            answers: AnswerMap::new(),
            remaining: SESSION_DURATION,
            completion: None,
        }
    }
}

impl Session {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn topic(&self) -> Option<&Topic> {
        self.topic.as_ref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.position)
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    /// Option recorded for the current question, if any.
    pub fn selection(&self) -> Option<u8> {
        let question = self.current()?;
        self.answers.get(&question.id).copied()
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn urgency(&self) -> Urgency {
        Urgency::from_remaining(self.remaining)
    }

    pub fn completion(&self) -> Option<Completion> {
        self.completion
    }

    pub fn is_last(&self) -> bool {
        self.position + 1 == self.questions.len()
    }

    /// Whether the caller may move forward: the current question is answered.
    pub fn can_advance(&self) -> bool {
        self.phase == Phase::Active && self.selection().is_some()
    }

    /// Resets everything and waits for questions on `topic`. Supersedes any
    /// attempt in progress, including one that is still loading.
    pub fn start(&mut self, topic: Topic) -> Ticket {
        self.ticket = Ticket(self.ticket.0 + 1);
        self.phase = Phase::Loading;
        self.topic = Some(topic);
        self.questions = Box::default();
        self.position = 0;
        self.answers.clear();
        self.remaining = SESSION_DURATION;
        self.completion = None;
        self.ticket
    }

    /// Starts over on the same topic.
    pub fn retake(&mut self) -> Result<Ticket> {
        if !matches!(self.phase, Phase::Idle | Phase::Finished) {
            return Err(Error::InvalidState);
        }
        let topic = self.topic.take().ok_or(Error::NoTopic)?;
        Ok(self.start(topic))
    }

    /// Delivers the result of the load issued under `ticket`.
    pub fn on_loaded(&mut self, ticket: Ticket, result: source::error::Result<Vec<Question>>) -> Load {
        if self.phase != Phase::Loading || self.ticket != ticket {
            return Load::Stale;
        }

        let questions = match result {
            Ok(questions) if questions.is_empty() => {
                self.phase = Phase::Idle;
                return Load::Aborted(Error::EmptyResult);
            }
            Ok(questions) => questions,
            Err(err) => {
                self.phase = Phase::Idle;
                return Load::Aborted(err.into());
            }
        };

        self.questions = questions.into_boxed_slice();
        self.phase = Phase::Active;
        Load::Active
    }

    fn ensure_active(&self) -> Result<()> {
        if self.phase == Phase::Active {
            Ok(())
        } else {
            Err(Error::InvalidState)
        }
    }

    /// Records (or replaces) the answer to the current question.
    pub fn select_option(&mut self, index: u8) -> Result<()> {
        self.ensure_active()?;
        if usize::from(index) >= OPTION_COUNT {
            return Err(Error::OutOfRange);
        }
        let question = self.current().ok_or(Error::InvalidState)?;
        let id = question.id;
        self.answers.insert(id, index);
        Ok(())
    }

    /// Moves to the next question, or finishes on the last one. Whether the
    /// current question has been answered is the caller's concern; see
    /// [`Session::can_advance`].
    pub fn next(&mut self) -> Result<Step> {
        self.ensure_active()?;
        if self.is_last() {
            return self.finish().map(Step::Finished);
        }
        self.position += 1;
        Ok(Step::Moved(self.position))
    }

    /// Moves back one question. Returns whether the position changed.
    pub fn previous(&mut self) -> Result<bool> {
        self.ensure_active()?;
        if self.position == 0 {
            return Ok(false);
        }
        self.position -= 1;
        Ok(true)
    }

    /// Ends the attempt at the user's request and scores it.
    pub fn finish(&mut self) -> Result<ResultSummary> {
        self.complete(Completion::Submitted)
    }

    fn complete(&mut self, completion: Completion) -> Result<ResultSummary> {
        self.ensure_active()?;
        self.phase = Phase::Finished;
        self.completion = Some(completion);
        self.score()
    }

    /// Counts down one second. Reaching zero finishes the attempt.
    pub fn tick(&mut self) -> Result<Tick> {
        self.ensure_active()?;
        let before = self.urgency();
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            return self.complete(Completion::Expired).map(Tick::Expired);
        }

        let after = self.urgency();
        let crossed = (after > before).then_some(after);
        Ok(Tick::Running { remaining: self.remaining, crossed })
    }

    /// Scores a finished attempt. Pure: repeated calls agree.
    pub fn score(&self) -> Result<ResultSummary> {
        if self.phase != Phase::Finished {
            return Err(Error::InvalidState);
        }
        let topic = self.topic.as_ref().ok_or(Error::NoTopic)?;
        let completion = self.completion.ok_or(Error::InvalidState)?;
        Ok(scorer::score(topic, &self.questions, &self.answers, self.remaining, completion))
    }
}
