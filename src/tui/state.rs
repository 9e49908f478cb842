//! TUI state algebra: pure types, zero effects.
//!
//! A [`Session`] owns everything one shortlisting pass needs: the candidate
//! map (read-only), the shortlist being built, and the decision cursor.
//! Transitions consume a session by value and hand back a [`Transition`],
//! so a finished or aborted session cannot be driven any further.

use tracing::debug;

use crate::types::{CandidateMap, Shortlist, Summary};

// ============================================================================
// MODES
// ============================================================================

/// Which input mode the session is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Awaiting y/n/s/q/? for the current candidate.
    #[default]
    Prompting,
    /// Help panel covers the screen; only `?` leaves it.
    HelpOverlay,
}

/// Position in the word × candidate traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecisionCursor {
    /// Index into the candidate map's words.
    pub word: usize,
    /// Index into the current word's candidates.
    pub candidate: usize,
    pub mode: Mode,
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Accept the current candidate.
    Yes,
    /// Reject the current candidate.
    No,
    /// Skip the rest of the current word's candidates.
    Skip,
    /// Abort the session without saving.
    Quit,
    /// Show or hide the help panel.
    ToggleHelp,
    /// Menu selection on the summary screen.
    NumberKey(u8),
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure session transition.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Keep reviewing; render this session next.
    Review(Session),
    /// Every word has been visited.
    Finished {
        candidates: CandidateMap,
        shortlist: Shortlist,
    },
    /// The user asked to quit. Nothing is saved.
    Quit,
}

/// What the screen should show, borrowed from the live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ui<'a> {
    /// Three-region decision prompt.
    Prompt {
        word: &'a str,
        candidate: &'a str,
        /// 1-based word position and word count.
        word_pos: (usize, usize),
        /// 1-based candidate position and candidate count for this word.
        candidate_pos: (usize, usize),
    },
    /// Full-screen help panel.
    Help,
    /// Totals plus the save menu.
    Summary(&'a Summary),
}

// ============================================================================
// SESSION
// ============================================================================

/// One shortlisting pass over a candidate map.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    candidates: CandidateMap,
    shortlist: Shortlist,
    cursor: DecisionCursor,
}

impl Session {
    /// Start a session on the first word that has candidates.
    ///
    /// The shortlist starts with every word mapped to an empty list, so
    /// words that are skipped or have no candidates still appear in it.
    pub fn start(candidates: CandidateMap) -> Transition {
        let shortlist = Shortlist::with_words(candidates.words());
        let session = Session {
            candidates,
            shortlist,
            cursor: DecisionCursor::default(),
        };
        session.enter_word(0)
    }

    pub fn cursor(&self) -> DecisionCursor {
        self.cursor
    }

    pub fn mode(&self) -> Mode {
        self.cursor.mode
    }

    pub fn candidates(&self) -> &CandidateMap {
        &self.candidates
    }

    pub fn shortlist(&self) -> &Shortlist {
        &self.shortlist
    }

    /// The (word, candidate) pair under the cursor.
    ///
    /// Always `Some` for a session obtained from a [`Transition::Review`].
    pub fn current(&self) -> Option<(&str, &str)> {
        let (word, candidates) = self.candidates.entry_at(self.cursor.word)?;
        let candidate = candidates.get(self.cursor.candidate)?;
        Some((word, candidate.as_str()))
    }

    /// What to draw for the current state.
    pub fn ui(&self) -> Ui<'_> {
        match (self.cursor.mode, self.current()) {
            (Mode::Prompting, Some((word, candidate))) => Ui::Prompt {
                word,
                candidate,
                word_pos: (self.cursor.word + 1, self.candidates.len()),
                candidate_pos: (self.cursor.candidate + 1, self.candidate_count()),
            },
            _ => Ui::Help,
        }
    }

    fn candidate_count(&self) -> usize {
        self.candidates
            .entry_at(self.cursor.word)
            .map_or(0, |(_, candidates)| candidates.len())
    }

    /// Append the current candidate to the shortlist.
    pub(crate) fn accept_current(&mut self) {
        if let Some((_, candidate)) = self.current() {
            let candidate = candidate.to_string();
            self.shortlist.push_at(self.cursor.word, candidate);
        }
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        self.cursor.mode = mode;
    }

    /// Move to the next candidate, spilling over into the next word.
    pub(crate) fn advance(mut self) -> Transition {
        if self.cursor.candidate + 1 < self.candidate_count() {
            self.cursor.candidate += 1;
            self.cursor.mode = Mode::Prompting;
            Transition::Review(self)
        } else {
            self.next_word()
        }
    }

    /// Leave the current word, whatever candidates remain.
    pub(crate) fn next_word(self) -> Transition {
        let next = self.cursor.word + 1;
        self.enter_word(next)
    }

    /// Position on the first word at or after `index` that has candidates.
    ///
    /// Words without candidates are passed over silently.
    fn enter_word(mut self, mut index: usize) -> Transition {
        while let Some((word, candidates)) = self.candidates.entry_at(index) {
            if !candidates.is_empty() {
                self.cursor = DecisionCursor {
                    word: index,
                    candidate: 0,
                    mode: Mode::Prompting,
                };
                return Transition::Review(self);
            }
            debug!(word, "no candidates; skipping word");
            index += 1;
        }

        Transition::Finished {
            candidates: self.candidates,
            shortlist: self.shortlist,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
