use popcorn_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn unchanged_query_is_noop() {
    let (state, _) = update(AppState::new(), Msg::QueryChanged("Titanic".to_string()));
    let (next, effects) = update(state.clone(), Msg::QueryChanged("Titanic".to_string()));

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
