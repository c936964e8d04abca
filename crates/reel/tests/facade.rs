use pretty_assertions::assert_eq;
use reel::{Editor, FieldId, FieldValue, MockApi, WidgetEvent};
use std::sync::Arc;

#[tokio::test]
async fn facade_exposes_a_working_editor() {
    reel::init_logging();
    let api = Arc::new(MockApi::new());
    let mut editor = Editor::new(api.clone());
    editor
        .dispatch(WidgetEvent::Change {
            field: FieldId::Title,
            value: FieldValue::text("Inception"),
        })
        .expect("change");
    let handle = editor
        .dispatch(WidgetEvent::Publish)
        .expect("publish")
        .expect("handle");
    assert!(handle.outcome().await.is_ok());

    let history = api.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].record.title, "Inception");
    assert!(history[0].publish);
}
