use std::collections::HashSet;

use todo_store::{
    DbConfig, ItemStore, MemoryItemStore, Sequence, TODO_ITEM_SEQUENCE, TodoError, TodoItem,
    TodoItemDao,
};

async fn dao_with_counter_at(value: i64) -> TodoItemDao<MemoryItemStore> {
    let store = MemoryItemStore::new();
    let counter = bson::to_document(&Sequence {
        name: TODO_ITEM_SEQUENCE.to_string(),
        value,
    })
    .unwrap();
    store
        .insert_one(&DbConfig::default().sequences_collection, counter)
        .await
        .unwrap();
    TodoItemDao::new(store)
}

fn item(description: &str) -> TodoItem {
    TodoItem::new(description).unwrap()
}

#[tokio::test]
async fn first_id_follows_the_freshly_seeded_counter() {
    let dao = dao_with_counter_at(1).await;
    assert_eq!(dao.insert(&mut item("first")).await.unwrap(), 2);
}

#[tokio::test]
async fn assigned_id_is_the_post_increment_counter_value() {
    let dao = dao_with_counter_at(41).await;
    assert_eq!(dao.insert(&mut item("anywhere")).await.unwrap(), 42);
}

#[tokio::test]
async fn sequential_inserts_yield_strictly_increasing_ids() {
    let dao = dao_with_counter_at(1).await;
    let mut previous = 0;
    for n in 0..5 {
        let id = dao.insert(&mut item(&format!("task {n}"))).await.unwrap();
        assert!(id > previous);
        previous = id;
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_inserts_never_share_an_id() {
    let dao = dao_with_counter_at(1).await;

    let mut handles = Vec::new();
    for n in 0..32 {
        let dao = dao.clone();
        handles.push(tokio::spawn(async move {
            dao.insert(&mut item(&format!("task {n}"))).await
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().unwrap());
    }

    assert_eq!(ids.len(), 32);
    // Every increment was observed by exactly one caller.
    assert_eq!(*ids.iter().min().unwrap(), 2);
    assert_eq!(*ids.iter().max().unwrap(), 33);
}

#[tokio::test]
async fn insert_without_a_counter_fails_and_persists_nothing() {
    let store = MemoryItemStore::new();
    let dao = TodoItemDao::new(store);

    let err = dao.insert(&mut item("orphan")).await.unwrap_err();
    assert!(matches!(err, TodoError::IdGeneration(_)));
    assert!(dao.list_all().await.unwrap().is_empty());
}
