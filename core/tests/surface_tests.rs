//! Editing surface integration tests
//!
//! Drives begin → execute → finish the way the shell does, against the fake
//! transport.

use play_architect_core::gateway::{FakeTransport, Transport};
use play_architect_core::listing::ListingField;
use play_architect_core::surfaces::{AUDIT_FAILURE, METADATA_FAILURE};
use play_architect_core::{
    AppListing, AuditDisplay, AuditSurface, Completion, Gateway, GatewayConfig, IconStyle,
    IconSurface, MetadataSurface, SurfaceRequest, Tone,
};
use std::path::PathBuf;

fn load_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", path.display()))
}

fn gateway_with(fixture: &str) -> Gateway {
    Gateway::with_transport(
        GatewayConfig::default().with_api_key("test-key"),
        Transport::Fake(FakeTransport::new(&load_fixture(fixture))),
    )
}

fn call_count(gateway: &Gateway) -> usize {
    gateway.transport().as_fake().map_or(0, |f| f.call_count())
}

#[tokio::test]
async fn test_metadata_roundtrip_updates_listing() {
    let gateway = gateway_with("metadata_fittrack.json");
    let listing = AppListing::new().with_field(ListingField::Title, "FitTrack");

    let mut surface = MetadataSurface::new(&listing);
    surface.set_keywords_input("fitness, workout, gym, health");
    surface.set_tone(Tone::from("Fun & Playful"));

    let request = surface.begin(&listing).unwrap();
    assert!(surface.begin(&listing).is_none());

    let Completion::Metadata { request, result } =
        SurfaceRequest::from(request).execute(&gateway).await
    else {
        panic!("expected metadata completion");
    };
    assert_eq!(call_count(&gateway), 1);

    let next = surface.finish(request, result, &listing).unwrap();
    assert_eq!(next.app_name(), "FitTrack: Workout Planner & Gym Log Pro");
    assert_eq!(next.keywords(), ["fitness", "workout", "gym", "health"]);
    assert!(next.counters()[0].is_exceeded());
    assert!(surface.reasoning().is_some());
}

#[tokio::test]
async fn test_metadata_mismatch_leaves_listing_unchanged() {
    let gateway = gateway_with("metadata_missing_field.json");
    let listing = AppListing::new()
        .with_field(ListingField::Title, "Old title")
        .with_field(ListingField::ShortDescription, "Old short");
    let before = listing.clone();

    let mut surface = MetadataSurface::new(&listing);
    let request = surface.begin(&listing).unwrap();
    let Completion::Metadata { request, result } = request.execute(&gateway).await else {
        panic!("expected metadata completion");
    };
    assert!(result.as_ref().unwrap_err().is_validation_mismatch());

    assert!(surface.finish(request, result, &listing).is_none());
    assert_eq!(listing, before);
    assert_eq!(surface.notice().unwrap().message, METADATA_FAILURE);
    assert!(!surface.is_in_progress());
}

#[tokio::test]
async fn test_second_trigger_while_in_flight_issues_no_call() {
    let gateway = gateway_with("icon_second_candidate.json");
    let listing = AppListing::new().with_field(ListingField::Title, "FitTrack");

    let mut surface = IconSurface::new();
    surface.set_style(IconStyle::from("pixel art"));
    let first = surface.begin(&listing).unwrap();
    assert!(surface.begin(&listing).is_none());
    assert!(surface.begin(&listing).is_none());

    let Completion::Icon { result, .. } = first.execute(&gateway).await else {
        panic!("expected icon completion");
    };
    assert_eq!(call_count(&gateway), 1);

    let next = surface.finish(result, &listing).unwrap();
    assert!(next.icon_url().is_some());
    assert!(surface.begin(&next).is_some());
}

#[tokio::test]
async fn test_audit_clean_is_distinct_from_failure() {
    let listing = AppListing::new()
        .with_field(ListingField::Title, "X")
        .with_field(ListingField::ShortDescription, "Y");

    let gateway = gateway_with("audit_clean.json");
    let mut surface = AuditSurface::new();
    let request = surface.on_view(&listing).unwrap();
    let Completion::Audit { result, .. } = request.execute(&gateway).await else {
        panic!("expected audit completion");
    };
    surface.finish(result);
    assert_eq!(surface.display(), AuditDisplay::Clean);
    assert!(surface.notice().is_none());

    let failing = gateway_with("audit_no_text.json");
    let mut surface = AuditSurface::new();
    let request = surface.on_view(&listing).unwrap();
    let Completion::Audit { result, .. } = request.execute(&failing).await else {
        panic!("expected audit completion");
    };
    surface.finish(result);
    assert_eq!(surface.display(), AuditDisplay::NotRun);
    assert_eq!(surface.notice().unwrap().message, AUDIT_FAILURE);
}

#[tokio::test]
async fn test_audit_auto_trigger_runs_once_across_views() {
    let gateway = gateway_with("audit_issues.json");
    let listing = AppListing::new()
        .with_field(ListingField::Title, "X")
        .with_field(ListingField::ShortDescription, "Y");

    let mut surface = AuditSurface::new();
    let mut executed = 0;
    for _ in 0..3 {
        if let Some(request) = surface.on_view(&listing) {
            let Completion::Audit { result, .. } = request.execute(&gateway).await else {
                panic!("expected audit completion");
            };
            surface.finish(result);
            executed += 1;
        }
    }
    assert_eq!(executed, 1);
    assert_eq!(call_count(&gateway), 1);
    match surface.display() {
        AuditDisplay::Issues(issues) => assert_eq!(issues.len(), 3),
        other => panic!("unexpected display {:?}", other),
    }
}

#[tokio::test]
async fn test_audit_not_auto_triggered_for_empty_fields() {
    let gateway = gateway_with("audit_clean.json");
    let mut surface = AuditSurface::new();
    assert!(surface.on_view(&AppListing::new()).is_none());
    assert_eq!(call_count(&gateway), 0);

    // Explicit request still works
    let request = surface.begin(&AppListing::new()).unwrap();
    let Completion::Audit { result, .. } = request.execute(&gateway).await else {
        panic!("expected audit completion");
    };
    surface.finish(result);
    assert_eq!(surface.display(), AuditDisplay::Clean);
}

#[tokio::test]
async fn test_missing_credential_becomes_notice() {
    let gateway = Gateway::with_transport(
        GatewayConfig::default(),
        Transport::Fake(FakeTransport::new("{}")),
    );
    let listing = AppListing::new();
    let mut surface = MetadataSurface::new(&listing);
    let request = surface.begin(&listing).unwrap();
    let completion = request.execute(&gateway).await;
    assert!(completion.error().unwrap().is_configuration());

    let Completion::Metadata { request, result } = completion else {
        panic!("expected metadata completion");
    };
    assert!(surface.finish(request, result, &listing).is_none());
    assert!(surface.notice().unwrap().detail.is_some());
    assert_eq!(call_count(&gateway), 0);
}
