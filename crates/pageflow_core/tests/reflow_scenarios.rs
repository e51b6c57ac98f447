use pageflow_core::{
    deserialize_pages, serialize_pages, CapacityOracle, Constraints, EditorEvent, EditorSession,
    FocusConvention, FocusTarget, HandleRegistry, InputHandle, Key, PageId, PageSequence,
    ReflowEngine, Verdict,
};

fn engine(max_lines: usize) -> ReflowEngine {
    ReflowEngine::with_constraints(Constraints::lines(max_lines))
}

fn session_with(max_lines: usize, contents: &[&str]) -> EditorSession {
    EditorSession::restore(
        uuid_for_tests(),
        PageSequence::from_contents(contents.iter().copied()),
        Default::default(),
        engine(max_lines),
    )
}

fn uuid_for_tests() -> pageflow_core::DocumentId {
    "11111111-2222-4333-8444-555555555555".parse().unwrap()
}

#[test]
fn typing_past_the_last_line_opens_a_new_page() {
    let mut pages = PageSequence::from_contents(["a\nb\nc"]);
    let outcome = engine(3)
        .edit(&mut pages, PageId(1), "a\nb\nc\nd", 7)
        .unwrap();

    assert_eq!(pages.contents(), vec!["a\nb\nc", "d"]);
    assert_eq!(pages.ids(), vec![PageId(1), PageId(2)]);
    assert_eq!(outcome.focus, FocusTarget::new(PageId(2), 1));
    assert_eq!(outcome.pages_created, 1);
}

#[test]
fn backspace_at_page_start_merges_into_previous_page() {
    let mut session = session_with(3, &["x", "y"]);
    let focus = session.handle_key(PageId(2), 0, Key::Backspace);

    assert_eq!(session.pages().contents(), vec!["x\ny"]);
    assert_eq!(session.pages().ids(), vec![PageId(1)]);
    assert_eq!(focus, Some(FocusTarget::new(PageId(1), 1)));
}

#[test]
fn paste_spanning_pages_lands_caret_after_pasted_text() {
    let mut pages = PageSequence::create_initial();
    let outcome = engine(2)
        .paste(&mut pages, PageId(1), 0, "a\nb\nc\nd")
        .unwrap();

    assert_eq!(pages.contents(), vec!["a\nb", "c\nd"]);
    assert_eq!(outcome.focus, FocusTarget::new(PageId(2), 3));
}

#[test]
fn backspace_on_first_page_is_rejected() {
    let mut session = session_with(3, &["x", "y"]);
    let before = session.pages().clone();

    assert!(session.pages().merge_target(PageId(1)).is_none());
    assert_eq!(session.handle_key(PageId(1), 0, Key::Backspace), None);
    assert_eq!(
        session.apply(EditorEvent::MergeBackward {
            page_id: PageId(1)
        }),
        None
    );
    assert_eq!(session.pages(), &before);
}

#[test]
fn large_paste_creates_many_pages_and_keeps_downstream_text() {
    let mut pages = PageSequence::from_contents(["start", "end"]);
    let text = (1..=9).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
    let outcome = engine(2).paste(&mut pages, PageId(1), 5, &text).unwrap();

    assert_eq!(pages.text(), format!("start{text}\nend"));
    assert_eq!(
        pages.contents(),
        vec!["start1\n2", "3\n4", "5\n6", "7\n8", "9\nend"]
    );
    // "9" is the end of the pasted stream, on the last page.
    assert_eq!(outcome.focus, FocusTarget::new(pages.last().id, 1));
    assert_eq!(outcome.pages_created, 3);
}

#[test]
fn paste_without_overflow_stays_on_page() {
    let mut pages = PageSequence::from_contents(["hello world"]);
    let outcome = engine(4).paste(&mut pages, PageId(1), 5, ",").unwrap();
    assert_eq!(pages.contents(), vec!["hello, world"]);
    assert_eq!(outcome.focus, FocusTarget::new(PageId(1), 6));
}

#[test]
fn wrapped_policy_moves_long_lines_onto_the_next_page() {
    let engine = ReflowEngine::with_constraints(Constraints::wrapped(10, 3));
    let mut pages = PageSequence::create_initial();
    let long = "x".repeat(25);
    engine
        .paste(&mut pages, PageId(1), 0, &format!("short\n{long}"))
        .unwrap();

    // 1 row + 3 rows exceeds the 3-row budget.
    assert_eq!(pages.contents(), vec!["short".to_string(), long]);
}

#[test]
fn multibyte_text_keeps_carets_in_chars() {
    let mut pages = PageSequence::create_initial();
    let outcome = engine(1).paste(&mut pages, PageId(1), 0, "日本\n語だ").unwrap();
    assert_eq!(pages.contents(), vec!["日本", "語だ"]);
    assert_eq!(outcome.focus, FocusTarget::new(PageId(2), 2));
}

#[test]
fn track_caret_convention_keeps_cursor_on_edited_line() {
    let engine = engine(2).with_focus_convention(FocusConvention::TrackCaret);
    let mut pages = PageSequence::from_contents(["one\ntwo"]);
    let outcome = engine
        .edit(&mut pages, PageId(1), "zero\none\ntwo", 4)
        .unwrap();
    assert_eq!(pages.contents(), vec!["zero\none", "two"]);
    assert_eq!(outcome.focus, FocusTarget::new(PageId(1), 4));
}

/// Oracle counting characters instead of lines, as a host-supplied strategy.
struct CharBudgetOracle {
    max_chars: usize,
}

impl CapacityOracle for CharBudgetOracle {
    fn evaluate(&self, content: &str, _constraints: &Constraints) -> Verdict {
        let mut used = 0;
        for (index, line) in content.split('\n').enumerate() {
            used += line.chars().count();
            if index > 0 && used > self.max_chars {
                return Verdict::Overflow { split_line: index };
            }
        }
        Verdict::Fits
    }
}

#[test]
fn custom_oracle_drives_the_same_cascade() {
    let engine = ReflowEngine::new(CharBudgetOracle { max_chars: 6 }, Constraints::lines(100));
    let mut pages = PageSequence::create_initial();
    engine
        .paste(&mut pages, PageId(1), 0, "abc\ndef\nghi\njk")
        .unwrap();
    assert_eq!(pages.contents(), vec!["abc\ndef", "ghi\njk"]);
    assert!(engine.is_settled(&pages));
}

#[derive(Debug, Default)]
struct FakeInput {
    focused_at: Option<usize>,
}

impl InputHandle for FakeInput {
    fn focus_at(&mut self, caret: usize) {
        self.focused_at = Some(caret);
    }
}

#[test]
fn focus_is_applied_to_the_new_page_on_next_flush() {
    let mut session = session_with(2, &["a\nb"]);
    let mut registry = HandleRegistry::new();
    registry.register(PageId(1), FakeInput::default());
    session.flush_focus(&mut registry);

    session.apply(EditorEvent::Edit {
        page_id: PageId(1),
        content: "a\nb\nc".to_string(),
        caret: 5,
    });
    // The surface has not mounted page 2 yet.
    assert_eq!(session.flush_focus(&mut registry), None);

    registry.register(PageId(2), FakeInput::default());
    registry.retain_pages(&session.pages().ids());
    assert_eq!(
        session.flush_focus(&mut registry),
        Some(FocusTarget::new(PageId(2), 1))
    );
    assert_eq!(registry.get(PageId(2)).unwrap().focused_at, Some(1));
}

#[test]
fn deleting_all_text_of_a_middle_page_removes_it() {
    let mut session = session_with(2, &["a\nb", "c\nd", "e"]);
    let focus = session.apply(EditorEvent::Edit {
        page_id: PageId(2),
        content: String::new(),
        caret: 0,
    });
    assert_eq!(session.pages().contents(), vec!["a\nb", "e"]);
    assert_eq!(focus, Some(FocusTarget::new(PageId(1), 3)));
}

#[test]
fn blank_lines_carried_past_a_full_page_keep_focus_in_bounds() {
    let engine = engine(2);
    let mut pages = PageSequence::from_contents(["a\nb"]);
    let outcome = engine
        .edit(&mut pages, PageId(1), "a\nb\n\n\n\n", 7)
        .unwrap();

    assert_eq!(pages.contents(), vec!["a\nb", "\n", "\n"]);
    let focused = pages.page(outcome.focus.page_id).unwrap();
    assert!(outcome.focus.caret <= focused.char_len());

    let snapshot = pages.clone();
    let settled = engine.settle(&mut pages, outcome.focus);
    assert_eq!(pages, snapshot);
    assert_eq!(settled.focus, outcome.focus);
}

#[test]
fn enter_then_triple_enter_keeps_every_invariant() {
    let engine = engine(2);
    let mut pages = PageSequence::create_initial();
    engine.paste(&mut pages, PageId(1), 0, "\n").unwrap();
    let outcome = engine
        .edit(&mut pages, PageId(1), "\n\n\n\n", 4)
        .unwrap();

    assert_eq!(pages.text(), "\n\n\n\n");
    assert!(engine.is_settled(&pages));
    let focused = pages.page(outcome.focus.page_id).unwrap();
    assert!(outcome.focus.caret <= focused.char_len());
}

#[test]
fn wrapped_blank_line_before_long_line_survives_round_trip() {
    let engine = ReflowEngine::with_constraints(Constraints::wrapped(4, 3));
    let mut pages = PageSequence::create_initial();
    let text = format!("\n{}", "x".repeat(12));
    engine.paste(&mut pages, PageId(1), 0, &text).unwrap();

    assert!(pages.iter().all(|page| !page.is_empty()));
    let mut restored = deserialize_pages(&serialize_pages(&pages));
    engine.settle(&mut restored, FocusTarget::start_of(PageId(1)));
    assert_eq!(restored.contents(), pages.contents());
}

#[test]
fn enter_on_one_line_pages_never_strands_an_empty_page() {
    let engine = engine(1);
    let mut pages = PageSequence::create_initial();
    engine.edit(&mut pages, PageId(1), "\n", 1).unwrap();
    engine.edit(&mut pages, PageId(1), "\n\n", 2).unwrap();

    assert_eq!(pages.contents(), vec!["\n", ""]);
    let mut restored = deserialize_pages(&serialize_pages(&pages));
    engine.settle(&mut restored, FocusTarget::start_of(PageId(1)));
    assert_eq!(restored.contents(), pages.contents());
}
