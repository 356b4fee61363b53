//! Note listing: the per-note tag query path and the batched path must agree.

use memo_core::{CreateNoteRequest, NoteRepository};
use memo_db::test_fixtures::TestDatabase;

async fn seed(test_db: &TestDatabase) {
    let notes = [
        (Some("Rust"), "ownership and borrowing", vec!["rust", "lang"]),
        (None, "untagged thought", vec![]),
        (Some("Web"), "axum handlers", vec!["rust", "web", "http"]),
        (Some(""), "empty title", vec!["misc"]),
    ];
    for (title, text, tags) in notes {
        test_db
            .db
            .notes
            .insert(CreateNoteRequest {
                title: title.map(str::to_string),
                text: text.to_string(),
                tags: tags.into_iter().map(str::to_string).collect(),
            })
            .await
            .expect("Failed to seed note");
    }
}

#[tokio::test]
async fn test_empty_store_lists_nothing() {
    let test_db = TestDatabase::new().await;
    assert!(test_db.db.notes.list().await.unwrap().is_empty());
    assert!(test_db.db.notes.list_batched().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_is_in_insertion_order() {
    let test_db = TestDatabase::new().await;
    seed(&test_db).await;

    let texts: Vec<String> = test_db
        .db
        .notes
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.text)
        .collect();
    assert_eq!(
        texts,
        vec![
            "ownership and borrowing",
            "untagged thought",
            "axum handlers",
            "empty title"
        ]
    );
}

#[tokio::test]
async fn test_list_keeps_titles_as_stored() {
    let test_db = TestDatabase::new().await;
    seed(&test_db).await;

    let titles: Vec<Option<String>> = test_db
        .db
        .notes
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(
        titles,
        vec![
            Some("Rust".to_string()),
            None,
            Some("Web".to_string()),
            Some(String::new())
        ]
    );
}

#[tokio::test]
async fn test_tags_are_sorted_per_note() {
    let test_db = TestDatabase::new().await;
    seed(&test_db).await;

    let notes = test_db.db.notes.list().await.unwrap();
    assert_eq!(notes[0].tags, vec!["lang", "rust"]);
    assert!(notes[1].tags.is_empty());
    assert_eq!(notes[2].tags, vec!["http", "rust", "web"]);
    assert_eq!(notes[3].tags, vec!["misc"]);
}

#[tokio::test]
async fn test_batched_listing_matches_per_note_listing() {
    let test_db = TestDatabase::new().await;
    seed(&test_db).await;

    let per_note = test_db.db.notes.list().await.unwrap();
    let batched = test_db.db.notes.list_batched().await.unwrap();
    assert_eq!(per_note, batched);
}

#[tokio::test]
async fn test_list_fails_on_closed_pool() {
    let test_db = TestDatabase::new().await;
    seed(&test_db).await;
    test_db.pool.close().await;

    assert!(matches!(
        test_db.db.notes.list().await,
        Err(memo_core::Error::Database(_))
    ));
}

#[tokio::test]
async fn test_list_fails_when_tag_query_fails() {
    let test_db = TestDatabase::new().await;
    seed(&test_db).await;

    // Note rows still load; every per-note tag query then fails.
    sqlx::query("DROP TABLE note_tag_link")
        .execute(&test_db.pool)
        .await
        .unwrap();

    assert!(matches!(
        test_db.db.notes.list().await,
        Err(memo_core::Error::Database(_))
    ));
}
