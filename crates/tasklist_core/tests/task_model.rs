use tasklist_core::{FilterMode, TaskListStore, ThemeMode};

#[test]
fn added_task_sets_defaults() {
    let mut store = TaskListStore::new();
    let task = store.add("hello").unwrap();

    assert!(!task.id.is_nil());
    assert_eq!(task.text, "hello");
    assert!(!task.completed);
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let mut store = TaskListStore::new();
    let task = store.add("ship it").unwrap();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], task.id.to_string());
    assert_eq!(json["text"], "ship it");
    assert_eq!(json["completed"], false);
}

#[test]
fn filter_mode_string_round_trip() {
    for mode in [FilterMode::All, FilterMode::Active, FilterMode::Completed] {
        assert_eq!(FilterMode::parse(mode.as_str()), Some(mode));
    }
    assert_eq!(FilterMode::parse(" Active "), Some(FilterMode::Active));
    assert_eq!(FilterMode::parse("done"), None);
}

#[test]
fn filter_mode_defaults_to_all() {
    assert_eq!(FilterMode::default(), FilterMode::All);
    assert_eq!(TaskListStore::new().filter(), FilterMode::All);
}

#[test]
fn filter_mode_serializes_snake_case() {
    let json = serde_json::to_value(FilterMode::Completed).unwrap();
    assert_eq!(json, "completed");
}

#[test]
fn theme_mode_toggles_between_light_and_dark() {
    assert_eq!(ThemeMode::default(), ThemeMode::Light);
    assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
    assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
    assert_eq!(ThemeMode::parse("DARK"), Some(ThemeMode::Dark));
    assert_eq!(ThemeMode::parse("dim"), None);
}
