use mapp_core::{MemoryStateStorage, NoteStore, StoreConfig, StoreError};
use uuid::Uuid;

fn setup_with_themes(names: &[&str]) -> (NoteStore, Vec<Uuid>) {
    let mut store = NoteStore::open(MemoryStateStorage::new(), StoreConfig::default()).unwrap();
    let ids = names
        .iter()
        .map(|name| store.add_theme(*name, "Brain"))
        .collect();
    (store, ids)
}

fn theme_ids(store: &NoteStore) -> Vec<Uuid> {
    store.state().themes.iter().map(|theme| theme.id).collect()
}

fn orders(store: &NoteStore) -> Vec<i64> {
    store.state().themes.iter().map(|theme| theme.order).collect()
}

#[test]
fn move_theme_moves_element_to_index_and_reassigns_order() {
    let (mut store, ids) = setup_with_themes(&["A", "B", "C", "D"]);

    store.move_theme(0, 2).unwrap();
    assert_eq!(theme_ids(&store), vec![ids[1], ids[2], ids[0], ids[3]]);
    assert_eq!(orders(&store), vec![0, 1, 2, 3]);

    store.move_theme(3, 0).unwrap();
    assert_eq!(theme_ids(&store), vec![ids[3], ids[1], ids[2], ids[0]]);
    assert_eq!(orders(&store), vec![0, 1, 2, 3]);
}

#[test]
fn move_theme_rejects_out_of_range_index() {
    let (mut store, ids) = setup_with_themes(&["A", "B"]);

    let err = store.move_theme(0, 2).unwrap_err();
    assert!(matches!(err, StoreError::IndexOutOfRange { index: 2, len: 2 }));
    let err = store.move_theme(5, 0).unwrap_err();
    assert!(matches!(err, StoreError::IndexOutOfRange { index: 5, len: 2 }));
    assert_eq!(theme_ids(&store), ids);
}

#[test]
fn reorder_with_identity_leaves_state_unchanged() {
    let (mut store, ids) = setup_with_themes(&["A", "B", "C"]);
    store.delete_theme(ids[1]);
    store.toggle_theme_favorite(ids[2]);
    let before = store.state().clone();

    store.reorder_themes(&[ids[0], ids[2]]).unwrap();
    assert_eq!(store.state(), &before);
}

#[test]
fn reorder_rejects_non_permutations() {
    let (mut store, ids) = setup_with_themes(&["A", "B", "C"]);
    let before = store.state().clone();

    for candidate in [
        vec![ids[0], ids[1]],
        vec![ids[0], ids[1], ids[1]],
        vec![ids[0], ids[1], Uuid::new_v4()],
        vec![ids[0], ids[1], ids[2], ids[0]],
    ] {
        let err = store.reorder_themes(&candidate).unwrap_err();
        assert!(matches!(err, StoreError::NotAPermutation));
    }
    assert_eq!(store.state(), &before);
}

#[test]
fn reorder_keeps_theme_fields() {
    let (mut store, ids) = setup_with_themes(&["A", "B"]);
    store.toggle_theme_favorite(ids[0]);
    store.update_theme(ids[0], "Alpha", "Star");

    store.reorder_themes(&[ids[1], ids[0]]).unwrap();

    let moved = &store.state().themes[1];
    assert_eq!(moved.id, ids[0]);
    assert_eq!(moved.name, "Alpha");
    assert_eq!(moved.icon, "Star");
    assert!(moved.is_favorite);
    assert_eq!(orders(&store), vec![0, 1]);
}

#[test]
fn reorder_of_empty_store_is_accepted() {
    let (mut store, _) = setup_with_themes(&[]);
    store.reorder_themes(&[]).unwrap();
    assert!(store.state().themes.is_empty());
}

#[test]
fn open_aligns_stored_sequence_with_order_field() {
    use mapp_core::view::sidebar_tree;
    use mapp_core::{StateStorage, DEFAULT_STORAGE_KEY};

    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let storage = MemoryStateStorage::new();
    storage
        .set_item(
            DEFAULT_STORAGE_KEY,
            &format!(
                "{{\"themes\":[\
                 {{\"id\":\"{b}\",\"name\":\"B\",\"icon\":\"Brain\",\"order\":1}},\
                 {{\"id\":\"{a}\",\"name\":\"A\",\"icon\":\"Brain\",\"order\":0}}],\
                 \"categories\":[],\"notes\":[]}}"
            ),
        )
        .unwrap();

    let mut store = NoteStore::open(storage, StoreConfig::default()).unwrap();
    assert_eq!(theme_ids(&store), vec![a, b]);

    let before = store.state().clone();
    let current = theme_ids(&store);
    store.reorder_themes(&current).unwrap();
    assert_eq!(store.state(), &before);

    store.move_theme(0, 1).unwrap();
    let shown: Vec<_> = sidebar_tree(store.state())
        .themes
        .iter()
        .map(|node| node.theme.name.clone())
        .collect();
    assert_eq!(shown, vec!["B", "A"]);
    assert_eq!(theme_ids(&store), vec![b, a]);
}
