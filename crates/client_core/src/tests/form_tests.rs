use super::*;

fn script(name: &str, mime: &str) -> SelectedFile {
    SelectedFile::from_bytes(name, mime, b"INT. KITCHEN - DAY".to_vec())
}

fn video(name: &str) -> SelectedFile {
    SelectedFile::from_bytes(name, "video/mp4", vec![0u8; 16])
}

fn ready_form() -> UploadForm {
    let mut form = UploadForm::new();
    form.select_script(script("pilot.fountain", "")).expect("script");
    form.select_videos(vec![video("a.mp4"), video("b.mp4")])
        .expect("videos");
    form
}

#[test]
fn accepts_plain_text_script_and_clears_previous_error() {
    let mut form = UploadForm::new();
    form.select_videos(vec![script("x.txt", "text/plain")])
        .expect_err("no videos");
    assert!(form.error().is_some());

    form.select_script(script("pilot.txt", "text/plain"))
        .expect("accepted");
    assert_eq!(form.script().map(|f| f.name.as_str()), Some("pilot.txt"));
    assert!(form.error().is_none());
}

#[test]
fn accepts_fountain_script_with_unknown_mime_type() {
    let mut form = UploadForm::new();
    form.select_script(script("pilot.fountain", "application/octet-stream"))
        .expect("accepted");
    assert_eq!(
        form.script().map(|f| f.name.as_str()),
        Some("pilot.fountain")
    );
}

#[test]
fn rejected_script_keeps_previous_selection() {
    let mut form = UploadForm::new();
    form.select_script(script("pilot.txt", "text/plain"))
        .expect("accepted");

    let err = form
        .select_script(script("poster.png", "image/png"))
        .expect_err("rejected");
    assert_eq!(err, FormError::InvalidScript);
    assert_eq!(form.script().map(|f| f.name.as_str()), Some("pilot.txt"));
    assert_eq!(
        form.error().map(ToString::to_string).as_deref(),
        Some("Please upload a valid script file (.txt or .fountain)")
    );
}

#[test]
fn video_batch_appends_only_video_files_in_order() {
    let mut form = UploadForm::new();
    form.select_videos(vec![video("first.mp4")]).expect("first");

    let accepted = form
        .select_videos(vec![
            video("second.mov"),
            script("notes.txt", "text/plain"),
            video("third.webm"),
        ])
        .expect("partial batch");
    assert_eq!(accepted, 2);

    let names: Vec<&str> = form.videos().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["first.mp4", "second.mov", "third.webm"]);
    assert!(form.error().is_none());
}

#[test]
fn all_invalid_video_batch_leaves_list_unchanged() {
    let mut form = UploadForm::new();
    form.select_videos(vec![video("keep.mp4")]).expect("first");

    let err = form
        .select_videos(vec![script("a.txt", "text/plain"), script("b.png", "image/png")])
        .expect_err("rejected");
    assert_eq!(err, FormError::NoValidVideos);
    assert_eq!(form.videos().len(), 1);
    assert_eq!(form.error(), Some(&FormError::NoValidVideos));
}

#[test]
fn remove_video_shifts_later_entries_down() {
    let mut form = UploadForm::new();
    form.select_videos(vec![video("a.mp4"), video("b.mp4"), video("c.mp4")])
        .expect("videos");

    let removed = form.remove_video(1).expect("removed");
    assert_eq!(removed.name, "b.mp4");
    let names: Vec<&str> = form.videos().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["a.mp4", "c.mp4"]);
}

#[test]
fn remove_video_out_of_range_is_a_no_op() {
    let mut form = ready_form();
    assert!(form.remove_video(7).is_none());
    assert_eq!(form.videos().len(), 2);
}

#[test]
fn clear_script_only_drops_the_script() {
    let mut form = ready_form();
    form.clear_script();
    assert!(form.script().is_none());
    assert_eq!(form.videos().len(), 2);
    assert!(!form.can_submit());
}

#[test]
fn begin_submission_requires_both_inputs() {
    let mut form = UploadForm::new();
    form.select_videos(vec![video("a.mp4")]).expect("videos");

    let outcome = form.begin_submission().expect_err("missing script");
    assert_eq!(outcome, SubmitOutcome::MissingInputs);
    assert_eq!(form.error(), Some(&FormError::MissingInputs));
    assert_eq!(form.status(), ProcessingStatus::Idle);
    assert_eq!(form.attempt(), 0);
}

#[test]
fn begin_submission_resets_progress_error_and_result() {
    let mut form = ready_form();
    let first = form.begin_submission().expect("first");
    form.advance_progress(first.attempt, 10, 90);
    form.complete_submission(
        first.attempt,
        Ok(ProcessResponse {
            matched_scenes: Some(1),
            ..Default::default()
        }),
    );
    assert_eq!(form.progress(), PROGRESS_COMPLETE);

    let second = form.begin_submission().expect("second");
    assert_eq!(second.attempt, first.attempt + 1);
    assert_eq!(second.videos.len(), 2);
    assert_eq!(form.status(), ProcessingStatus::Submitting);
    assert_eq!(form.progress(), 0);
    assert!(form.result().is_none());
    assert!(form.error().is_none());
}

#[test]
fn second_submission_while_in_flight_is_inert() {
    let mut form = ready_form();
    form.begin_submission().expect("first");
    let before = form.clone();

    let outcome = form.begin_submission().expect_err("in flight");
    assert_eq!(outcome, SubmitOutcome::AlreadyInFlight);
    assert_eq!(form, before);
}

#[test]
fn progress_never_passes_ceiling_while_waiting() {
    let mut form = ready_form();
    let pending = form.begin_submission().expect("pending");

    let mut steps = 0;
    while form.advance_progress(pending.attempt, 10, 90) {
        steps += 1;
        assert!(form.progress() <= 90);
    }
    assert_eq!(steps, 9);
    assert_eq!(form.progress(), 90);
    assert_eq!(form.progress_caption(), "Finalizing video...");
}

#[test]
fn stale_attempt_cannot_move_progress() {
    let mut form = ready_form();
    let pending = form.begin_submission().expect("pending");
    form.complete_submission(pending.attempt, Err(FormError::transport("boom")));
    let progress = form.progress();

    assert!(!form.advance_progress(pending.attempt, 10, 90));
    assert_eq!(form.progress(), progress);
}

#[test]
fn failure_keeps_partial_progress() {
    let mut form = ready_form();
    let pending = form.begin_submission().expect("pending");
    form.advance_progress(pending.attempt, 10, 90);
    form.advance_progress(pending.attempt, 10, 90);

    let outcome = form.complete_submission(
        pending.attempt,
        Err(FormError::transport("Processing failed")),
    );
    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(form.status(), ProcessingStatus::Failed);
    assert_eq!(form.progress(), 20);
    assert!(form.result().is_none());
    assert!(form.can_submit());
}

#[test]
fn abandoned_attempt_returns_form_to_interactive_state() {
    let mut form = ready_form();
    let pending = form.begin_submission().expect("pending");
    assert!(form.abandon_submission(pending.attempt));
    assert_eq!(form.status(), ProcessingStatus::Failed);
    assert_eq!(
        form.error().map(ToString::to_string).as_deref(),
        Some(GENERIC_FAILURE_MESSAGE)
    );
    assert!(!form.abandon_submission(pending.attempt));
}

#[test]
fn start_new_project_resets_everything_after_success() {
    let mut form = ready_form();
    let pending = form.begin_submission().expect("pending");
    form.complete_submission(
        pending.attempt,
        Ok(ProcessResponse {
            matched_scenes: Some(3),
            download_url: Some("https://x/y.mp4".to_string()),
            ..Default::default()
        }),
    );

    form.start_new_project();
    assert!(form.script().is_none());
    assert!(form.videos().is_empty());
    assert!(form.result().is_none());
    assert_eq!(form.progress(), 0);
    assert_eq!(form.status(), ProcessingStatus::Idle);
}
