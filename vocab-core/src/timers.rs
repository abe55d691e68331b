use std::time::Duration;

/// Identifies one mounted session. Tokens only grow, so a timer scheduled by
/// a torn-down session can never match the session mounted after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionToken(u64);

impl SessionToken {
    pub const NONE: SessionToken = SessionToken(0);

    pub fn next(self) -> Self {
        SessionToken(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Show the content of the card that was current when scheduled.
    FlashcardReveal { index: usize },
    QuizAdvance,
    MemoryRevert,
    MemoryVictory,
    TypingAdvance,
}

#[derive(Debug, Clone)]
pub struct PendingTimer {
    pub token: SessionToken,
    pub kind: TimerKind,
    pub due: Duration,
    seq: u64,
}

/// Fire-and-forget timers on a virtual clock. Nothing is ever cancelled; the
/// host decides at fire time whether the owning session is still mounted.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_seq: u64,
    pending: Vec<PendingTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_for(&self, token: SessionToken) -> usize {
        self.pending.iter().filter(|t| t.token == token).count()
    }

    pub fn schedule(&mut self, token: SessionToken, delay: Duration, kind: TimerKind) {
        let timer = PendingTimer {
            token,
            kind,
            due: self.now + delay,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.push(timer);
    }

    /// Time left until the earliest pending timer.
    pub fn next_due_in(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|t| t.due)
            .min()
            .map(|due| due.saturating_sub(self.now))
    }

    /// Removes the earliest timer due at or before `until` and moves the clock
    /// to its deadline. Equal deadlines come out in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<PendingTimer> {
        let position = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;

        let timer = self.pending.remove(position);
        if timer.due > self.now {
            self.now = timer.due;
        }
        Some(timer)
    }

    /// Moves the clock forward once every due timer has been popped.
    pub fn settle(&mut self, until: Duration) {
        if until > self.now {
            self.now = until;
        }
    }
}
