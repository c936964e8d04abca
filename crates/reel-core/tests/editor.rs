use pretty_assertions::assert_eq;
use reel_core::{Editor, MockApi, PublishError, WidgetEvent};
use reel_protocol::{CastId, FieldId, FieldValue, Record};
use reel_test_utils::{
    FailingPublisher, RecordingPublisher, RecordingSink, attributes, member,
};
use std::sync::Arc;
use std::time::Duration;

fn recording_editor() -> (Editor, Arc<RecordingPublisher>, Arc<RecordingSink>) {
    let publisher = Arc::new(RecordingPublisher::new());
    let sink = Arc::new(RecordingSink::new());
    let editor = Editor::new(publisher.clone()).with_sink(sink.clone());
    (editor, publisher, sink)
}

#[tokio::test]
async fn blur_saves_and_publish_button_publishes() {
    let (mut editor, publisher, sink) = recording_editor();

    editor
        .dispatch(WidgetEvent::Change {
            field: FieldId::Title,
            value: FieldValue::text("Inception"),
        })
        .expect("change");
    let save = editor
        .dispatch(WidgetEvent::Blur {
            field: FieldId::Title,
        })
        .expect("blur")
        .expect("blur save");
    assert!(!save.publish());
    assert!(save.outcome().await.is_ok());

    let publish = editor
        .dispatch(WidgetEvent::Publish)
        .expect("publish")
        .expect("publish handle");
    assert!(publish.outcome().await.is_ok());

    let requests = publisher.requests();
    assert_eq!(requests.len(), 2);
    assert!(!requests[0].publish);
    assert!(requests[1].publish);
    assert_eq!(requests[0].record.title, "Inception");
    assert_eq!(requests[0].record, requests[1].record);
    assert_eq!(sink.outcomes().len(), 2);
}

#[tokio::test]
async fn dispatched_snapshot_ignores_later_edits() {
    let api = Arc::new(MockApi::new().with_latency(Duration::from_millis(20)));
    let mut editor = Editor::new(api.clone());

    editor
        .dispatch(WidgetEvent::Input {
            field: FieldId::Title,
            raw: "Heat".to_string(),
        })
        .expect("input");
    let handle = editor.publish(false);
    editor
        .dispatch(WidgetEvent::Input {
            field: FieldId::Title,
            raw: "Heat (1995)".to_string(),
        })
        .expect("input");
    assert!(handle.outcome().await.is_ok());

    assert_eq!(api.history()[0].record.title, "Heat");
    assert_eq!(editor.current().title, "Heat (1995)");
}

#[tokio::test]
async fn failed_save_is_reported_and_keeps_record() {
    let sink = Arc::new(RecordingSink::new());
    let mut editor = Editor::new(Arc::new(FailingPublisher::new("connection refused")))
        .with_sink(sink.clone());
    editor
        .dispatch(WidgetEvent::Input {
            field: FieldId::Rating,
            raw: "4.5".to_string(),
        })
        .expect("input");

    let outcome = editor.publish(true).outcome().await;
    assert_eq!(
        outcome.result,
        Err(PublishError::Transport("connection refused".to_string()))
    );
    assert_eq!(sink.failures(), 1);
    assert_eq!(editor.current().rating, 4.5);
}

#[tokio::test]
async fn overlapping_saves_each_complete() {
    let (editor, publisher, sink) = recording_editor();
    let first = editor.publish(false);
    let second = editor.publish(true);
    assert_eq!(first.seq() + 1, second.seq());

    let first = first.outcome().await;
    let second = second.outcome().await;
    assert!(first.is_ok() && second.is_ok());
    assert_eq!(publisher.requests().len(), 2);
    assert_eq!(sink.outcomes().len(), 2);
    assert_eq!(editor.saves_dispatched(), 2);
}

#[tokio::test]
async fn blur_save_can_be_disabled() {
    let (editor, publisher, _sink) = recording_editor();
    let mut editor = editor.with_autosave_on_blur(false);
    let handle = editor
        .dispatch(WidgetEvent::Blur {
            field: FieldId::Description,
        })
        .expect("blur");
    assert!(handle.is_none());
    assert!(publisher.requests().is_empty());
}

#[test]
fn cast_events_follow_list_protocol() {
    let (mut editor, _publisher, _sink) = recording_editor();
    for name in ["Alice", "Bob"] {
        editor
            .dispatch(WidgetEvent::Create {
                field: FieldId::Cast,
                attributes: attributes(name),
            })
            .expect("create");
    }
    assert_eq!(editor.current().cast, vec![member(1, "Alice"), member(2, "Bob")]);

    editor
        .dispatch(WidgetEvent::Update {
            field: FieldId::Cast,
            item: member(1, "Alicia"),
        })
        .expect("update");
    editor
        .dispatch(WidgetEvent::Update {
            field: FieldId::Cast,
            item: member(42, "Nobody"),
        })
        .expect("update");
    assert_eq!(editor.current().cast, vec![member(1, "Alicia"), member(2, "Bob")]);

    for _ in 0..2 {
        editor
            .dispatch(WidgetEvent::Delete {
                field: FieldId::Cast,
                id: CastId(1),
            })
            .expect("delete");
    }
    assert_eq!(editor.current().cast, vec![member(2, "Bob")]);

    editor
        .dispatch(WidgetEvent::Create {
            field: FieldId::Cast,
            attributes: attributes("Cy"),
        })
        .expect("create");
    assert_eq!(editor.current().cast[1].id, CastId(3));
}

#[test]
fn list_events_never_save() {
    let (mut editor, _publisher, _sink) = recording_editor();
    let saved = editor
        .dispatch(WidgetEvent::Create {
            field: FieldId::Cast,
            attributes: attributes("Alice"),
        })
        .expect("create");
    assert!(saved.is_none());
    assert_eq!(editor.saves_dispatched(), 0);
}

#[test]
fn mismatched_events_are_rejected() {
    let (mut editor, _publisher, _sink) = recording_editor();
    assert!(
        editor
            .dispatch(WidgetEvent::Blur {
                field: FieldId::Cast
            })
            .is_err()
    );
    assert!(
        editor
            .dispatch(WidgetEvent::Delete {
                field: FieldId::Title,
                id: CastId(1),
            })
            .is_err()
    );
    assert_eq!(*editor.current(), Record::default());
}
