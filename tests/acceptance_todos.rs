use chrono::{TimeZone, Utc};
use todo_store::{
    DbConfig, ItemStore, MemoryItemStore, Sequence, TODO_ITEM_SEQUENCE, TodoError, TodoItem,
    TodoItemDao,
};

#[tokio::test]
async fn acceptance_insert_find_update_remove() {
    let store = MemoryItemStore::new();
    seed_counter(&store).await;
    let dao = TodoItemDao::new(store);

    // background items so counts move against a non-empty collection
    dao.insert(&mut item("Water the plants")).await.unwrap();
    dao.insert(&mut item("Book flights")).await.unwrap();
    let before = dao.list_all().await.unwrap().len();

    // insert
    let mut new = item("Walk the dog");
    new.tags = vec!["home".into()];
    new.deadline = Utc
        .with_ymd_and_hms(2026, 9, 1, 9, 0, 0)
        .unwrap()
        .to_rfc2822();
    let id = dao.insert(&mut new).await.unwrap();
    assert_eq!(new.id, id);

    // list grew by one
    assert_eq!(dao.list_all().await.unwrap().len(), before + 1);

    // find returns an item equal to what was inserted
    let found = dao.find_by_id(id).await.unwrap();
    assert_eq!(found, new);

    // update the description and read the change back
    let mut changed = found.clone();
    changed.description = "Walk the dog twice".into();
    assert!(dao.update(&changed).await.unwrap());
    assert_eq!(
        dao.find_by_id(id).await.unwrap().description,
        "Walk the dog twice"
    );

    // remove
    assert!(dao.remove_by_id(id).await.unwrap());
    assert_eq!(dao.list_all().await.unwrap().len(), before);
    assert!(matches!(
        dao.find_by_id(id).await.unwrap_err(),
        TodoError::NotFound(_)
    ));
}

fn item(description: &str) -> TodoItem {
    TodoItem::new(description).unwrap()
}

async fn seed_counter(store: &MemoryItemStore) {
    let counter = bson::to_document(&Sequence::initial(TODO_ITEM_SEQUENCE)).unwrap();
    store
        .insert_one(&DbConfig::default().sequences_collection, counter)
        .await
        .unwrap();
}
