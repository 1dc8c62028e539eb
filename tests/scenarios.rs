//! End-to-end flows through `update`
//!
//! Gateway completions are delivered by hand so the interleaving of user
//! edits and responses is exact.

mod common;

use common::{dispatch_request, test_model, test_model_with_selection};
use quill::error::EditError;
use quill::gateway::{GatewayError, GatewayErrorKind};
use quill::messages::{AssistMsg, Msg, SelectionMsg, SpellMsg, SuggestionMsg};
use quill::model::{ProactiveSuggestion, RephraseSuggestion, SpellcheckError, SuggestionOutcome};
use quill::update::update;

// ========================================================================
// Transforms
// ========================================================================

#[test]
fn test_transform_replaces_selection() {
    let mut model = test_model_with_selection("The wrok is done.", 4, 8);
    let id = dispatch_request(&mut model, Msg::transform("fix spelling"));

    update(
        &mut model,
        Msg::Assist(AssistMsg::TransformCompleted {
            id,
            result: Ok("work".to_string()),
        }),
    );

    assert_eq!(model.content(), "The work is done.");
    assert!(model.selection.get().is_none());
    assert!(!model.dispatcher.is_busy());
}

#[test]
fn test_edit_before_resolution_reports_stale_anchor() {
    let mut model = test_model_with_selection("abcdef", 1, 3);
    let id = dispatch_request(&mut model, Msg::transform("uppercase"));

    // User types "X" at 0 while the request is out
    update(&mut model, Msg::insert(0, "X"));
    assert_eq!(model.content(), "Xabcdef");

    let pending = model.dispatcher.finish_transform(id).unwrap();
    let err = model.resolve_transform(&pending, "BC").unwrap_err();
    assert_eq!(
        err,
        EditError::StaleAnchor {
            expected: "bc".to_string(),
            found: Some("ab".to_string()),
        }
    );
    assert_eq!(model.content(), "Xabcdef");
    assert!(model.selection.get().is_none());
}

#[test]
fn test_span_past_shrunk_document_reports_stale_anchor() {
    let mut model = test_model_with_selection("abcdef", 3, 6);
    let id = dispatch_request(&mut model, Msg::transform("uppercase"));

    // Deleting "ab" moves "def" to 1..4; the captured end is now past the end
    update(&mut model, Msg::replace(0, 2, ""));
    assert_eq!(model.selection.get().map(|s| s.range()), Some(1..4));

    let pending = model.dispatcher.finish_transform(id).unwrap();
    let err = model.resolve_transform(&pending, "DEF").unwrap_err();
    assert_eq!(
        err,
        EditError::StaleAnchor {
            expected: "def".to_string(),
            found: None,
        }
    );
    assert_eq!(model.content(), "cdef");
    assert!(model.selection.get().is_none());
}

#[test]
fn test_empty_transform_result_keeps_span() {
    let mut model = test_model_with_selection("The wrok is done.", 4, 8);
    let id = dispatch_request(&mut model, Msg::transform("fix spelling"));
    update(
        &mut model,
        Msg::Assist(AssistMsg::TransformCompleted {
            id,
            result: Ok(String::new()),
        }),
    );

    assert_eq!(model.content(), "The wrok is done.");
    assert_eq!(model.revision(), 0);
    assert!(!model.dispatcher.is_busy());
    assert!(model.status.message().is_some());
}

#[test]
fn test_in_flight_span_stays_busy_after_shift() {
    let mut model = test_model_with_selection("abcdef", 3, 6);
    dispatch_request(&mut model, Msg::transform("uppercase"));
    update(&mut model, Msg::insert(0, "XY"));
    assert_eq!(model.selection.get().map(|s| s.range()), Some(5..8));

    assert!(update(&mut model, Msg::transform("uppercase")).is_none());
    assert_eq!(model.dispatcher.pending_transforms().len(), 1);

    // Text now sitting at the old offsets is a different span
    update(&mut model, Msg::select(3, 6));
    assert!(update(&mut model, Msg::transform("uppercase")).is_some());
    assert_eq!(model.dispatcher.pending_transforms().len(), 2);
}

#[test]
fn test_stale_transform_completion_leaves_document() {
    let mut model = test_model_with_selection("abcdef", 1, 3);
    let id = dispatch_request(&mut model, Msg::transform("uppercase"));
    update(&mut model, Msg::insert(0, "X"));
    let revision = model.revision();

    update(
        &mut model,
        Msg::Assist(AssistMsg::TransformCompleted {
            id,
            result: Ok("BC".to_string()),
        }),
    );

    assert_eq!(model.content(), "Xabcdef");
    assert_eq!(model.revision(), revision);
    assert!(model.status.message().is_some());
}

#[test]
fn test_edit_after_selection_does_not_block_transform() {
    let mut model = test_model_with_selection("abcdef", 1, 3);
    let id = dispatch_request(&mut model, Msg::transform("uppercase"));
    update(&mut model, Msg::insert(6, "!"));

    update(
        &mut model,
        Msg::Assist(AssistMsg::TransformCompleted {
            id,
            result: Ok("BC".to_string()),
        }),
    );
    assert_eq!(model.content(), "aBCdef!");
}

#[test]
fn test_gateway_failure_keeps_document() {
    let mut model = test_model_with_selection("The wrok is done.", 4, 8);
    let id = dispatch_request(&mut model, Msg::transform("fix"));
    update(
        &mut model,
        Msg::Assist(AssistMsg::TransformCompleted {
            id,
            result: Err(GatewayError::new(GatewayErrorKind::Backend, "quota")),
        }),
    );
    assert_eq!(model.content(), "The wrok is done.");
    let status = model.status.message().unwrap();
    assert!(status.text.contains("quota"));
}

#[test]
fn test_concurrent_transforms_on_different_spans() {
    let mut model = test_model_with_selection("one two three", 0, 3);
    let first = dispatch_request(&mut model, Msg::transform("upper"));
    update(&mut model, Msg::select(8, 13));
    let second = dispatch_request(&mut model, Msg::transform("upper"));

    // Second resolves first; the first span lies before it and is untouched
    update(
        &mut model,
        Msg::Assist(AssistMsg::TransformCompleted {
            id: second,
            result: Ok("THREE!".to_string()),
        }),
    );
    update(
        &mut model,
        Msg::Assist(AssistMsg::TransformCompleted {
            id: first,
            result: Ok("ONE".to_string()),
        }),
    );
    assert_eq!(model.content(), "ONE two THREE!");
}

// ========================================================================
// Rephrase
// ========================================================================

fn options() -> Vec<RephraseSuggestion> {
    vec![
        RephraseSuggestion::new("Greetings", "More formal"),
        RephraseSuggestion::new("Hey", "More casual"),
        RephraseSuggestion::new("Hi", "More direct"),
    ]
}

#[test]
fn test_rephrase_then_apply() {
    let mut model = test_model_with_selection("Hello there", 0, 5);
    let id = dispatch_request(&mut model, Msg::Assist(AssistMsg::RequestRephrase));
    update(
        &mut model,
        Msg::Assist(AssistMsg::RephraseCompleted {
            id,
            options: options(),
        }),
    );
    assert_eq!(model.suggestions.rephrase().unwrap().options.len(), 3);

    update(&mut model, Msg::Assist(AssistMsg::ApplyRephrase(1)));
    assert_eq!(model.content(), "Hey there");
    assert!(model.selection.get().is_none());
    assert!(model.suggestions.rephrase().is_none());
}

#[test]
fn test_rephrase_arriving_after_selection_change_is_discarded() {
    let mut model = test_model_with_selection("Hello there", 0, 5);
    let id = dispatch_request(&mut model, Msg::Assist(AssistMsg::RequestRephrase));
    update(&mut model, Msg::select(6, 11));
    update(
        &mut model,
        Msg::Assist(AssistMsg::RephraseCompleted {
            id,
            options: options(),
        }),
    );
    assert!(model.suggestions.rephrase().is_none());
}

#[test]
fn test_rephrase_arriving_after_clear_is_discarded() {
    let mut model = test_model_with_selection("Hello there", 0, 5);
    let id = dispatch_request(&mut model, Msg::Assist(AssistMsg::RequestRephrase));
    update(&mut model, Msg::Selection(SelectionMsg::Clear));
    update(
        &mut model,
        Msg::Assist(AssistMsg::RephraseCompleted {
            id,
            options: options(),
        }),
    );
    assert!(model.suggestions.rephrase().is_none());
}

#[test]
fn test_apply_rephrase_without_selection() {
    let mut model = test_model("Hello there");
    assert_eq!(model.apply_rephrase(0), Err(EditError::NoSelection));
}

// ========================================================================
// Proactive suggestions
// ========================================================================

#[test]
fn test_accept_suggestion() {
    let mut model = test_model("Hello world");
    let outcome = model.offer_suggestion(
        0,
        Some(ProactiveSuggestion::new("world", "World", "capitalize")),
    );
    assert_eq!(outcome, SuggestionOutcome::Shown);

    update(&mut model, Msg::Suggestion(SuggestionMsg::Accept));
    assert_eq!(model.content(), "Hello World");
    assert!(model.suggestions.proactive().is_none());
}

#[test]
fn test_accept_replaces_first_occurrence_only() {
    let mut model = test_model("foo and foo");
    model.offer_suggestion(0, Some(ProactiveSuggestion::new("foo", "bar", "r")));
    model.accept_suggestion().unwrap();
    assert_eq!(model.content(), "bar and foo");
}

#[test]
fn test_suggestion_arrival_rules() {
    let mut model = test_model_with_selection("Hello world", 6, 11);

    let missing = ProactiveSuggestion::new("planet", "Planet", "capitalize");
    assert_eq!(
        model.offer_suggestion(0, Some(missing)),
        SuggestionOutcome::Stale
    );

    let selected = ProactiveSuggestion::new("world", "World", "capitalize");
    assert_eq!(
        model.offer_suggestion(0, Some(selected.clone())),
        SuggestionOutcome::OverlapsSelection
    );

    model.clear_selection();
    assert_eq!(
        model.offer_suggestion(0, Some(selected.clone())),
        SuggestionOutcome::Shown
    );
    assert_eq!(
        model.offer_suggestion(0, Some(selected)),
        SuggestionOutcome::Kept
    );
}

#[test]
fn test_empty_result_only_clears_when_current() {
    let mut model = test_model("Hello world");
    model.offer_suggestion(0, Some(ProactiveSuggestion::new("world", "World", "c")));
    model.apply_edit(0, 0, ">").unwrap();

    assert_eq!(model.offer_suggestion(0, None), SuggestionOutcome::Outdated);
    assert!(model.suggestions.proactive().is_some());

    assert_eq!(
        model.offer_suggestion(model.revision(), None),
        SuggestionOutcome::Cleared
    );
    assert!(model.suggestions.proactive().is_none());
}

#[test]
fn test_accept_after_snippet_edited_away() {
    let mut model = test_model("Hello world");
    model.offer_suggestion(0, Some(ProactiveSuggestion::new("world", "World", "c")));
    model.apply_edit(6, 11, "there").unwrap();
    // The invalidation pass already dropped it
    assert_eq!(model.accept_suggestion(), Ok(None));
}

// ========================================================================
// Spellcheck
// ========================================================================

#[test]
fn test_correct_after_shift() {
    let mut model = test_model("The wrok is done.");
    update(
        &mut model,
        Msg::Spell(SpellMsg::CheckCompleted {
            revision: 0,
            errors: vec![SpellcheckError::new("wrok", vec!["work".into()], 4)],
        }),
    );
    update(&mut model, Msg::insert(0, "Today: "));
    assert_eq!(model.spellcheck.errors()[0].index, 11);

    update(
        &mut model,
        Msg::Spell(SpellMsg::Correct {
            index: 0,
            replacement: None,
        }),
    );
    assert_eq!(model.content(), "Today: The work is done.");
}

#[test]
fn test_out_of_order_spellcheck_passes() {
    let mut model = test_model("teh end");
    update(&mut model, Msg::insert(7, "."));
    update(
        &mut model,
        Msg::Spell(SpellMsg::CheckCompleted {
            revision: 1,
            errors: vec![SpellcheckError::new("teh", vec!["the".into()], 0)],
        }),
    );
    // The pass started before the edit finishes last
    update(
        &mut model,
        Msg::Spell(SpellMsg::CheckCompleted {
            revision: 0,
            errors: vec![],
        }),
    );

    assert_eq!(model.spellcheck.errors().len(), 1);
    assert_eq!(model.spellcheck.errors()[0].word, "teh");
    assert_eq!(model.spellcheck.checked_revision, Some(1));
}

#[test]
fn test_late_spellcheck_results_filtered() {
    let mut model = test_model("The wrok is done.");
    update(&mut model, Msg::replace(4, 8, "work"));
    update(
        &mut model,
        Msg::Spell(SpellMsg::CheckCompleted {
            revision: 0,
            errors: vec![SpellcheckError::new("wrok", vec!["work".into()], 4)],
        }),
    );
    assert!(model.spellcheck.errors().is_empty());
}

// ========================================================================
// Drafts and insertion
// ========================================================================

#[test]
fn test_draft_replaces_document() {
    let mut model = test_model_with_selection("old text", 0, 3);
    let id = dispatch_request(
        &mut model,
        Msg::Assist(AssistMsg::RequestDraft {
            prompt: "a poem".into(),
            attachments: vec![],
        }),
    );
    update(
        &mut model,
        Msg::Assist(AssistMsg::DraftCompleted {
            id,
            result: Ok("Roses are red.".into()),
        }),
    );
    assert_eq!(model.content(), "Roses are red.");
    assert!(model.selection.get().is_none());
}

#[test]
fn test_insertion_follows_earlier_edits() {
    let mut model = test_model("Start. End.");
    let id = dispatch_request(
        &mut model,
        Msg::Assist(AssistMsg::RequestInsertion {
            at: 7,
            prompt: "middle".into(),
        }),
    );
    update(&mut model, Msg::insert(0, ">> "));
    update(
        &mut model,
        Msg::Assist(AssistMsg::InsertionCompleted {
            id,
            result: Ok("Middle. ".into()),
        }),
    );
    assert_eq!(model.content(), ">> Start. Middle. End.");
}

#[test]
fn test_insertion_dropped_when_anchor_overlapped() {
    let mut model = test_model("Start. End.");
    let id = dispatch_request(
        &mut model,
        Msg::Assist(AssistMsg::RequestInsertion {
            at: 7,
            prompt: "middle".into(),
        }),
    );
    update(&mut model, Msg::replace(5, 9, "!"));
    let content = model.content();
    update(
        &mut model,
        Msg::Assist(AssistMsg::InsertionCompleted {
            id,
            result: Ok("Middle. ".into()),
        }),
    );
    assert_eq!(model.content(), content);
}
