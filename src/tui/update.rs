//! Pure state transitions: (Session, Action) → Transition.
//!
//! This is the core logic of the TUI. Fully testable without a terminal.
//! Each mode defines which actions it accepts. Unhandled actions return
//! the session unchanged (no-op).

use crate::types::SaveChoice;

use super::state::{Action, Mode, Session, Transition};

/// Pure state transition function for the review phase.
pub fn update(session: Session, action: &Action) -> Transition {
    match session.mode() {
        Mode::Prompting => update_prompting(session, action),
        Mode::HelpOverlay => update_help(session, action),
    }
}

/// Summary menu: only `1`, `2` and `3` mean anything.
pub fn update_menu(action: &Action) -> Option<SaveChoice> {
    match action {
        Action::NumberKey(n) => SaveChoice::from_menu_key(*n),
        _ => None,
    }
}

// ============================================================================
// PER-MODE HANDLERS
// ============================================================================

/// Prompting: decide on the candidate under the cursor.
fn update_prompting(mut session: Session, action: &Action) -> Transition {
    match action {
        Action::Yes => {
            session.accept_current();
            session.advance()
        }
        Action::No => session.advance(),
        Action::Skip => session.next_word(),
        Action::Quit => Transition::Quit,
        Action::ToggleHelp => {
            session.set_mode(Mode::HelpOverlay);
            Transition::Review(session)
        }
        Action::NumberKey(_) => Transition::Review(session),
    }
}

/// HelpOverlay: everything except `?` is swallowed, including quit.
fn update_help(mut session: Session, action: &Action) -> Transition {
    match action {
        Action::ToggleHelp => {
            session.set_mode(Mode::Prompting);
            Transition::Review(session)
        }
        _ => Transition::Review(session),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CandidateMap, SaveFormat, Shortlist};

    fn candidates(entries: &[(&str, &[&str])]) -> CandidateMap {
        entries
            .iter()
            .map(|(w, syns)| (w.to_string(), syns.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    fn start(entries: &[(&str, &[&str])]) -> Session {
        match Session::start(candidates(entries)) {
            Transition::Review(session) => session,
            other => panic!("Expected Review, got {:?}", other),
        }
    }

    /// Feed actions until the session ends; returns the final transition
    /// and every (word, candidate) shown in Prompting along the way.
    fn drive(
        entries: &[(&str, &[&str])],
        actions: &[Action],
    ) -> (Transition, Vec<(String, String)>) {
        let mut shown = Vec::new();
        let mut transition = Session::start(candidates(entries));

        for action in actions {
            let session = match transition {
                Transition::Review(session) => session,
                done => return (done, shown),
            };
            if session.mode() == Mode::Prompting {
                if let Some((w, c)) = session.current() {
                    shown.push((w.to_string(), c.to_string()));
                }
            }
            transition = update(session, action);
        }
        (transition, shown)
    }

    fn finished_shortlist(transition: Transition) -> Shortlist {
        match transition {
            Transition::Finished { shortlist, .. } => shortlist,
            other => panic!("Expected Finished, got {:?}", other),
        }
    }

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // --- Prompting ---

    #[test]
    fn yes_then_no_with_empty_word() {
        let (transition, shown) = drive(
            &[("liquid", &["fluid", "smooth"]), ("great", &[])],
            &[Action::Yes, Action::No],
        );

        match transition {
            Transition::Finished { candidates, shortlist } => {
                assert_eq!(shortlist.get("liquid"), Some(&list(&["fluid"])[..]));
                assert_eq!(shortlist.get("great"), Some(&[][..]));
                assert_eq!(candidates.total_values(), 2);
                assert_eq!(shortlist.total_values(), 1);
            }
            other => panic!("Expected Finished, got {:?}", other),
        }
        assert_eq!(shown.len(), 2);
        assert!(shown.iter().all(|(w, _)| w == "liquid"));
    }

    #[test]
    fn all_no_gives_all_empty_with_same_keys() {
        let entries: &[(&str, &[&str])] = &[("a", &["a1", "a2"]), ("b", &["b1"]), ("c", &[])];
        let (transition, _) = drive(entries, &[Action::No, Action::No, Action::No]);

        let shortlist = finished_shortlist(transition);
        let words: Vec<&str> = shortlist.words().collect();
        assert_eq!(words, vec!["a", "b", "c"]);
        assert_eq!(shortlist.total_values(), 0);
    }

    #[test]
    fn accepted_keep_candidate_order() {
        let (transition, _) = drive(
            &[("w", &["c1", "c2", "c3", "c4"])],
            &[Action::Yes, Action::No, Action::Yes, Action::Yes],
        );
        let shortlist = finished_shortlist(transition);
        assert_eq!(shortlist.get("w"), Some(&list(&["c1", "c3", "c4"])[..]));
    }

    #[test]
    fn skip_on_first_candidate_never_shows_the_rest() {
        let (transition, shown) = drive(
            &[("a", &["a1", "a2", "a3"]), ("b", &["b1"])],
            &[Action::Skip, Action::Yes],
        );

        let shortlist = finished_shortlist(transition);
        assert_eq!(shortlist.get("a"), Some(&[][..]));
        assert_eq!(shortlist.get("b"), Some(&list(&["b1"])[..]));
        assert_eq!(
            shown,
            vec![("a".to_string(), "a1".to_string()), ("b".to_string(), "b1".to_string())]
        );
    }

    #[test]
    fn skip_keeps_earlier_acceptances() {
        let (transition, _) = drive(
            &[("a", &["a1", "a2", "a3"])],
            &[Action::Yes, Action::Skip],
        );
        let shortlist = finished_shortlist(transition);
        assert_eq!(shortlist.get("a"), Some(&list(&["a1"])[..]));
    }

    #[test]
    fn skip_on_last_word_finishes() {
        let session = start(&[("a", &["a1", "a2"])]);
        assert!(matches!(update(session, &Action::Skip), Transition::Finished { .. }));
    }

    #[test]
    fn quit_aborts_with_partial_shortlist() {
        let session = start(&[("a", &["a1", "a2"])]);
        let session = match update(session, &Action::Yes) {
            Transition::Review(s) => s,
            other => panic!("Expected Review, got {:?}", other),
        };
        assert_eq!(update(session, &Action::Quit), Transition::Quit);
    }

    #[test]
    fn number_keys_are_ignored_while_prompting() {
        let session = start(&[("a", &["a1"])]);
        let before = session.clone();
        assert_eq!(update(session, &Action::NumberKey(1)), Transition::Review(before));
    }

    // --- Help overlay ---

    #[test]
    fn help_toggle_returns_to_same_candidate() {
        let session = start(&[("a", &["a1", "a2"])]);
        let before = session.clone();

        let help = match update(session, &Action::ToggleHelp) {
            Transition::Review(s) => s,
            other => panic!("Expected Review, got {:?}", other),
        };
        assert_eq!(help.mode(), Mode::HelpOverlay);
        assert_eq!(help.cursor().candidate, 0);

        assert_eq!(update(help, &Action::ToggleHelp), Transition::Review(before));
    }

    #[test]
    fn help_swallows_everything_but_toggle() {
        let session = start(&[("a", &["a1"])]);
        let help = match update(session, &Action::ToggleHelp) {
            Transition::Review(s) => s,
            other => panic!("Expected Review, got {:?}", other),
        };

        for action in [Action::Yes, Action::No, Action::Skip, Action::Quit, Action::NumberKey(2)] {
            let expected = help.clone();
            assert_eq!(update(help.clone(), &action), Transition::Review(expected));
        }
    }

    // --- Menu ---

    #[test]
    fn menu_accepts_only_one_to_three() {
        assert_eq!(
            update_menu(&Action::NumberKey(1)),
            Some(SaveChoice::Save(SaveFormat::Text))
        );
        assert_eq!(
            update_menu(&Action::NumberKey(2)),
            Some(SaveChoice::Save(SaveFormat::Json))
        );
        assert_eq!(update_menu(&Action::NumberKey(3)), Some(SaveChoice::Discard));
        assert_eq!(update_menu(&Action::NumberKey(4)), None);
        assert_eq!(update_menu(&Action::Yes), None);
        assert_eq!(update_menu(&Action::Quit), None);
    }
}
