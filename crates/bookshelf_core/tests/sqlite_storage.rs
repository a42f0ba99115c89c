use bookshelf_core::db::{open_db, open_db_in_memory};
use bookshelf_core::storage::{BOOKS_KEY, SORT_STATE_KEY};
use bookshelf_core::{
    Book, BookDraft, Library, LibraryStorage, SortMode, SortState, SqliteLibraryStorage,
    StorageError,
};
use rusqlite::{params, Connection};

fn draft(title: &str, genre: &str) -> BookDraft {
    BookDraft {
        title: title.to_string(),
        author_first_name: "Italo".to_string(),
        author_last_name: "Calvino".to_string(),
        year_of_publication: 1972,
        number_of_pages: 165,
        estimated_reading_time: 4.5,
        genre: genre.to_string(),
        rating: 5,
        notes: None,
    }
}

fn blob_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM library_blobs;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn empty_database_loads_nothing() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteLibraryStorage::new(&conn);

    assert!(storage.load_books().unwrap().is_none());
    assert!(storage.load_sort_state().unwrap().is_none());
}

#[test]
fn save_and_load_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let mut storage = SqliteLibraryStorage::new(&conn);

    let books = vec![
        Book::create(&draft("Invisible Cities", "Fiction")).unwrap(),
        Book::create(&BookDraft {
            notes: Some("chapter 7".to_string()),
            ..draft("If on a winter's night", "Fiction")
        })
        .unwrap(),
    ];
    let state = SortState {
        mode: SortMode::DateAddedDesc,
        group_by_genre: false,
    };

    storage.save_books(&books).unwrap();
    storage.save_sort_state(&state).unwrap();

    assert_eq!(storage.load_books().unwrap(), Some(books));
    assert_eq!(storage.load_sort_state().unwrap(), Some(state));
}

#[test]
fn saves_upsert_one_row_per_key() {
    let conn = open_db_in_memory().unwrap();
    let mut storage = SqliteLibraryStorage::new(&conn);

    storage.save_books(&[]).unwrap();
    storage
        .save_books(&[Book::create(&draft("Palomar", "Fiction")).unwrap()])
        .unwrap();
    storage.save_sort_state(&SortState::default()).unwrap();
    storage.save_sort_state(&SortState::default()).unwrap();

    assert_eq!(blob_count(&conn), 2);
    assert_eq!(storage.load_books().unwrap().unwrap().len(), 1);
}

#[test]
fn undecodable_blob_is_reported_with_its_key() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO library_blobs (key, value) VALUES (?1, ?2);",
        params![BOOKS_KEY, b"[{\"title\":".to_vec()],
    )
    .unwrap();
    let storage = SqliteLibraryStorage::new(&conn);

    let err = storage.load_books().unwrap_err();
    assert!(matches!(err, StorageError::Decode { key, .. } if key == BOOKS_KEY));
    assert!(storage.load_sort_state().unwrap().is_none());
}

#[test]
fn library_survives_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookshelf.sqlite3");

    let expected = {
        let conn = open_db(&path).unwrap();
        let mut library = Library::load(SqliteLibraryStorage::new(&conn));
        library.add(Book::create_at(&draft("The Baron in the Trees", "Classic"), 1).unwrap());
        library.add(Book::create_at(&draft("Cosmicomics", "Short Stories"), 2).unwrap());
        library.add(Book::create_at(&draft("Mr. Palomar", "Fiction"), 3).unwrap());
        library.remove_at(2);
        library.advance_sort();
        library.books().to_vec()
    };

    let conn = open_db(&path).unwrap();
    let library = Library::load(SqliteLibraryStorage::new(&conn));
    assert_eq!(library.books(), expected.as_slice());
    assert_eq!(library.sort_mode(), SortMode::TitleDesc);
    assert_eq!(
        library
            .books()
            .iter()
            .map(Book::title)
            .collect::<Vec<_>>(),
        vec!["The Baron in the Trees", "Cosmicomics"]
    );
}

#[test]
fn corrupted_file_state_degrades_to_empty_library() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO library_blobs (key, value) VALUES (?1, ?2), (?3, ?4);",
        params![BOOKS_KEY, b"{}".to_vec(), SORT_STATE_KEY, b"42".to_vec()],
    )
    .unwrap();

    let library = Library::load(SqliteLibraryStorage::new(&conn));
    assert!(library.is_empty());
    assert_eq!(library.sort_mode(), SortMode::TitleAsc);
    assert!(library.group_by_genre());
}
