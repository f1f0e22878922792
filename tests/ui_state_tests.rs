//! Shell state tests
//!
//! Gateway calls run on a real multi-threaded runtime against the fake
//! transport; completions are applied through `process_completions` exactly
//! as the main loop does.

mod common;

use std::sync::Arc;

use play_architect::ui::Section;
use play_architect_core::listing::ListingField;
use play_architect_core::surfaces::{AUDIT_FAILURE, ICON_FAILURE, METADATA_FAILURE};
use play_architect_core::AuditDisplay;

#[test]
fn test_starts_on_metadata_with_configured_category() {
    let runtime = common::runtime();
    let gateway = Arc::new(common::fake_gateway("metadata_fittrack.json"));
    let app = common::app_with(&gateway, &runtime);

    assert_eq!(app.section(), Section::Metadata);
    assert_eq!(app.listing().category(), "Health & Fitness");
    assert!(app.is_configured());
    assert!(!app.is_busy());
}

#[test]
fn test_section_cycle_wraps() {
    let runtime = common::runtime();
    let gateway = Arc::new(common::fake_gateway("metadata_fittrack.json"));
    let mut app = common::app_with(&gateway, &runtime);

    app.prev_section();
    assert_eq!(app.section(), Section::StorePreview);
    app.next_section();
    assert_eq!(app.section(), Section::Metadata);
}

#[test]
fn test_metadata_generation_updates_listing() {
    let runtime = common::runtime();
    let gateway = Arc::new(common::fake_gateway("metadata_fittrack.json"));
    let mut app = common::app_with(&gateway, &runtime);
    app.edit_field(ListingField::Title, "FitTrack");
    app.metadata.set_keywords_input("fitness, workout, gym");

    app.trigger_metadata();
    assert!(app.metadata.is_in_progress());
    assert!(app.is_busy());

    assert_eq!(common::wait_for_completions(&mut app, 1), 1);
    assert!(!app.metadata.is_in_progress());
    assert_eq!(app.listing().app_name(), "FitTrack: Workout Planner & Gym Log Pro");
    assert_eq!(app.listing().keywords(), ["fitness", "workout", "gym"]);
    // Category is never touched by generation
    assert_eq!(app.listing().category(), "Health & Fitness");
    assert!(app.listing().counters()[0].is_exceeded());
    assert_eq!(
        app.metadata.reasoning(),
        Some("Leads with the brand and the core keyword.")
    );

    let sent = gateway.transport().as_fake().unwrap().last_call().unwrap();
    assert!(sent.body.contains("FitTrack"));
}

#[test]
fn test_second_trigger_while_in_flight_is_ignored() {
    let runtime = common::runtime();
    let gateway = Arc::new(common::fake_gateway("metadata_fittrack.json"));
    let mut app = common::app_with(&gateway, &runtime);

    app.trigger_metadata();
    app.trigger_metadata();
    assert!(app
        .console_messages()
        .iter()
        .any(|m| m.content == "Metadata generation already in progress"));

    common::wait_for_completions(&mut app, 1);
    // Nothing else is in flight
    std::thread::sleep(std::time::Duration::from_millis(50));
    assert_eq!(app.process_completions(), 0);
    assert_eq!(common::call_count(&gateway), 1);
}

#[test]
fn test_missing_credential_sets_notice_without_calling_out() {
    let runtime = common::runtime();
    let gateway = Arc::new(common::unconfigured_gateway("metadata_fittrack.json"));
    let mut app = common::app_with(&gateway, &runtime);
    app.edit_field(ListingField::Title, "FitTrack");
    assert!(!app.is_configured());

    app.trigger_metadata();
    common::wait_for_completions(&mut app, 1);

    assert_eq!(common::call_count(&gateway), 0);
    assert_eq!(app.listing().app_name(), "FitTrack");
    let notice = app.active_notice().unwrap();
    assert_eq!(notice.message, METADATA_FAILURE);

    app.dismiss_notice();
    assert!(app.active_notice().is_none());
}

#[test]
fn test_icon_generation_and_save() {
    let runtime = common::runtime();
    let gateway = Arc::new(common::fake_gateway("icon_second_candidate.json"));
    let mut app = common::app_with(&gateway, &runtime);
    app.edit_field(ListingField::Title, "FitTrack");
    app.select_section(Section::IconStudio);

    app.trigger_current();
    common::wait_for_completions(&mut app, 1);

    let icon = app.listing().icon_url().unwrap();
    assert_eq!(icon.mime_type(), Some("image/png"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("icon.png");
    assert_eq!(app.save_icon(&path).unwrap(), 8);
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");
}

#[test]
fn test_icon_failure_keeps_previous_listing() {
    let runtime = common::runtime();
    let gateway = Arc::new(common::fake_gateway("icon_no_image.json"));
    let mut app = common::app_with(&gateway, &runtime);
    app.select_section(Section::IconStudio);

    app.trigger_icon();
    common::wait_for_completions(&mut app, 1);

    assert!(app.listing().icon_url().is_none());
    assert_eq!(app.active_notice().unwrap().message, ICON_FAILURE);
}

#[test]
fn test_audit_runs_once_on_first_view_of_complete_listing() {
    let runtime = common::runtime();
    let gateway = Arc::new(common::fake_gateway("audit_issues.json"));
    let mut app = common::app_with(&gateway, &runtime);
    app.edit_field(ListingField::Title, "#1 Fitness App");
    app.edit_field(ListingField::ShortDescription, "Best workouts ever");

    app.select_section(Section::PolicyAudit);
    assert!(matches!(app.audit.display(), AuditDisplay::Running));
    common::wait_for_completions(&mut app, 1);

    match app.audit.display() {
        AuditDisplay::Issues(issues) => assert_eq!(issues.len(), 3),
        other => panic!("expected issues, got {:?}", other),
    }

    // Leaving and returning does not audit again
    app.select_section(Section::StorePreview);
    app.select_section(Section::PolicyAudit);
    std::thread::sleep(std::time::Duration::from_millis(50));
    assert_eq!(app.process_completions(), 0);
    assert_eq!(common::call_count(&gateway), 1);
}

#[test]
fn test_audit_skipped_on_view_of_incomplete_listing() {
    let runtime = common::runtime();
    let gateway = Arc::new(common::fake_gateway("audit_clean.json"));
    let mut app = common::app_with(&gateway, &runtime);
    app.edit_field(ListingField::Title, "FitTrack");

    app.select_section(Section::PolicyAudit);
    assert!(matches!(app.audit.display(), AuditDisplay::NotRun));

    // Explicit run is allowed
    app.trigger_current();
    common::wait_for_completions(&mut app, 1);
    assert!(matches!(app.audit.display(), AuditDisplay::Clean));
    assert_eq!(common::call_count(&gateway), 1);
}

#[test]
fn test_audit_failure_sets_notice() {
    let runtime = common::runtime();
    let gateway = Arc::new(common::fake_gateway("prompt_blocked.json"));
    let mut app = common::app_with(&gateway, &runtime);
    app.select_section(Section::PolicyAudit);

    app.trigger_audit();
    common::wait_for_completions(&mut app, 1);

    assert!(matches!(app.audit.display(), AuditDisplay::NotRun));
    assert_eq!(app.active_notice().unwrap().message, AUDIT_FAILURE);
}

#[test]
fn test_console_is_bounded() {
    let runtime = common::runtime();
    let gateway = Arc::new(common::fake_gateway("metadata_fittrack.json"));
    let mut app = common::app_with(&gateway, &runtime);

    for i in 0..250 {
        app.log(format!("line {}", i));
    }
    assert_eq!(app.console_messages().len(), 200);
    assert_eq!(app.console_messages().last().unwrap().content, "line 249");
}
