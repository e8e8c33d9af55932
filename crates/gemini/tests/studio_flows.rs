//! End-to-end flows through `ConceptStudio` against the fake server.

mod common;

use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use serde_json::json;

use common::{Script, TEST_KEY, VIDEO_BYTES};
use conceptforge_core::error::CoreError;
use conceptforge_core::request::{
    CharacterRequest, ComicStripRequest, ConceptArtRequest, PlotRequest, VideoShotRequest,
};
use conceptforge_gemini::{ConceptStudio, GeminiApiError, GenerationError, StudioError};

fn studio(server: &common::FakeGemini, key: Option<&str>) -> ConceptStudio {
    ConceptStudio::new(server.config(key)).unwrap()
}

// ---------------------------------------------------------------------------
// Test: text modes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn character_concept_is_parsed_from_reply() {
    let reply = json!({
        "name": "Static Shock",
        "backstory": "A courier struck by a rogue satellite.",
        "powers": ["Electrokinesis"],
        "weaknesses": ["Water"],
        "visualDescription": "Blue suit with lightning trim."
    });
    let server = common::spawn(Script {
        text_reply: reply.to_string(),
        ..Script::default()
    })
    .await;

    let concept = studio(&server, Some(TEST_KEY))
        .generate_character_concept(&CharacterRequest::new("storm courier"))
        .await
        .unwrap();

    assert_eq!(concept.name, "Static Shock");
    assert_eq!(concept.powers, vec!["Electrokinesis".to_string()]);
    let call = &server.calls()[0];
    assert!(call.call.ends_with(":generateContent"));
    let prompt = call.body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("storm courier"));
}

#[tokio::test]
async fn invalid_plot_request_never_reaches_the_network() {
    let server = common::spawn(Script::default()).await;

    let err = studio(&server, Some(TEST_KEY))
        .generate_plot_outline(&PlotRequest::new("Iron Man", "", "redemption"))
        .await
        .unwrap_err();

    assert_matches!(err, StudioError::Core(CoreError::Validation(msg)) if msg.contains("Villain must be selected"));
    assert!(server.calls().is_empty());
}

#[tokio::test]
async fn unparseable_reply_is_a_parse_error() {
    let server = common::spawn(Script {
        text_reply: "not json".into(),
        ..Script::default()
    })
    .await;

    let err = studio(&server, Some(TEST_KEY))
        .generate_character_concept(&CharacterRequest::new("a hero"))
        .await
        .unwrap_err();

    assert_matches!(err, StudioError::Core(CoreError::Parse(_)));
}

#[tokio::test]
async fn missing_key_is_reported_for_text_modes() {
    let server = common::spawn(Script::default()).await;

    let err = studio(&server, None)
        .generate_character_concept(&CharacterRequest::new("a hero"))
        .await
        .unwrap_err();

    assert_matches!(err, StudioError::Api(GeminiApiError::MissingCredential));
}

// ---------------------------------------------------------------------------
// Test: image modes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn comic_strip_returns_one_image_per_panel() {
    let server = common::spawn(Script::default()).await;

    let images = studio(&server, Some(TEST_KEY))
        .generate_comic_strip(&ComicStripRequest::new("a bank heist", 3, "Noir"))
        .await
        .unwrap();

    assert_eq!(images.len(), 3);
    let body = &server.calls()[0].body;
    assert_eq!(body["parameters"]["sampleCount"], 3);
    let prompt = body["instances"][0]["prompt"].as_str().unwrap();
    assert!(prompt.contains("3-panel"));
    assert!(prompt.contains("Noir"));
}

#[tokio::test]
async fn empty_image_reply_is_an_error() {
    let server = common::spawn(Script {
        no_images: true,
        ..Script::default()
    })
    .await;

    let err = studio(&server, Some(TEST_KEY))
        .generate_concept_art(&ConceptArtRequest::new("a skyline"))
        .await
        .unwrap_err();

    assert_matches!(err, StudioError::NoImages);
    assert_eq!(
        err.to_string(),
        "Image generation failed: No images were returned."
    );
}

// ---------------------------------------------------------------------------
// Test: video mode
// ---------------------------------------------------------------------------

#[tokio::test]
async fn video_shot_polls_then_downloads_with_key() {
    let server = common::spawn(Script {
        pending_checks: 2,
        ..Script::default()
    })
    .await;
    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&messages);

    let bytes = studio(&server, Some(TEST_KEY))
        .generate_video_shot(&VideoShotRequest::new("a rooftop chase"), move |m| {
            sink.lock().unwrap().push(m.to_string())
        })
        .await
        .unwrap();

    assert_eq!(bytes, VIDEO_BYTES);
    assert_eq!(server.status_checks(), 3);
    let messages = messages.lock().unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages[1].ends_with("(Status check 2/5)"));

    let downloads = server.downloads();
    assert_eq!(downloads.len(), 1);
    assert_eq!(downloads[0].get("key").map(String::as_str), Some(TEST_KEY));
    assert_eq!(downloads[0].get("alt").map(String::as_str), Some("media"));
}

#[tokio::test]
async fn video_shot_times_out_at_the_cap() {
    let server = common::spawn(Script {
        pending_checks: usize::MAX,
        ..Script::default()
    })
    .await;
    let mut count = 0;

    let err = studio(&server, Some(TEST_KEY))
        .generate_video_shot(&VideoShotRequest::new("a rooftop chase"), |_| count += 1)
        .await
        .unwrap_err();

    assert_matches!(err, StudioError::Generation(GenerationError::Timeout { polls: 5, .. }));
    assert_eq!(count, 5);
    assert_eq!(server.status_checks(), 5);
    assert!(server.downloads().is_empty());
}

#[tokio::test]
async fn failed_operation_surfaces_service_message() {
    let server = common::spawn(Script {
        operation_error: Some((3, "prompt blocked".into())),
        ..Script::default()
    })
    .await;

    let err = studio(&server, Some(TEST_KEY))
        .generate_video_shot(&VideoShotRequest::new("a rooftop chase"), |_| {})
        .await
        .unwrap_err();

    assert_matches!(
        err,
        StudioError::Generation(GenerationError::JobFailed(ref msg)) if msg == "(code 3) prompt blocked"
    );
    assert!(server.downloads().is_empty());
}

#[tokio::test]
async fn empty_video_prompt_is_rejected_before_submit() {
    let server = common::spawn(Script::default()).await;

    let err = studio(&server, Some(TEST_KEY))
        .generate_video_shot(&VideoShotRequest::new("   "), |_| {})
        .await
        .unwrap_err();

    assert_matches!(err, StudioError::Core(CoreError::Validation(_)));
    assert!(server.calls().is_empty());
}
