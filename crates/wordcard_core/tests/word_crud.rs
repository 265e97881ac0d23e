use std::collections::HashSet;
use std::sync::Arc;
use wordcard_core::{
    is_word_date, open_file_service, open_local_service, FileSnapshot, JsonWordRepository,
    KeyValueStore, MemoryKeyValueStore, RepoError, WordDraft, WordField, WordId, WordPatch,
    WordRecord, WordRepository, WordType, WordValidationError,
};

fn ephemeral() -> WordDraft {
    WordDraft::new(
        "Ephemeral",
        "Lasting for a very short time.",
        "The beauty of the cherry blossoms is ephemeral.",
        "adjective",
    )
}

#[test]
fn create_assigns_id_and_date_and_preserves_fields() {
    let service = open_local_service(MemoryKeyValueStore::new());

    let created = service.create_word(&ephemeral()).unwrap();
    assert!(created.id.as_u64() > 0);
    assert!(is_word_date(&created.date), "date `{}`", created.date);
    assert_eq!(created.text, "Ephemeral");
    assert_eq!(created.definition, "Lasting for a very short time.");
    assert_eq!(created.word_type, WordType::Adjective);

    let listed = service.list_words().unwrap();
    assert_eq!(listed, vec![created]);
}

#[test]
fn rapid_creates_get_unique_ids_in_insertion_order() {
    let service = open_local_service(MemoryKeyValueStore::new());

    let created: Vec<WordRecord> = (0..20)
        .map(|index| {
            let draft = WordDraft::new(format!("word {index}"), "def", "example", "noun");
            service.create_word(&draft).unwrap()
        })
        .collect();

    let ids: HashSet<WordId> = created.iter().map(|word| word.id).collect();
    assert_eq!(ids.len(), 20);

    let listed: Vec<WordId> = service
        .list_words()
        .unwrap()
        .iter()
        .map(|word| word.id)
        .collect();
    let expected: Vec<WordId> = created.iter().map(|word| word.id).collect();
    assert_eq!(listed, expected);
}

#[test]
fn create_rejects_blank_fields_without_writing() {
    let store = Arc::new(MemoryKeyValueStore::new());
    let service = open_local_service(store.clone());

    let mut draft = ephemeral();
    draft.example = "   ".to_string();
    let err = service.create_word(&draft).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(WordValidationError::MissingField(WordField::Example))
    ));

    assert_eq!(store.get_item("vocab-words").unwrap(), None);
}

#[test]
fn update_keeps_id_date_and_unsupplied_fields() {
    let service = open_local_service(MemoryKeyValueStore::new());
    let created = service.create_word(&ephemeral()).unwrap();

    let patch = WordPatch {
        definition: Some("Short-lived.".to_string()),
        ..WordPatch::default()
    };
    let updated = service.update_word(created.id, &patch).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.date, created.date);
    assert_eq!(updated.definition, "Short-lived.");
    assert_eq!(updated.text, created.text);
    assert_eq!(updated.example, created.example);
    assert_eq!(updated.word_type, created.word_type);
    assert_eq!(service.get_word(created.id).unwrap(), Some(updated));
}

#[test]
fn update_unknown_id_returns_not_found() {
    let service = open_local_service(MemoryKeyValueStore::new());
    let patch = WordPatch {
        text: Some("ghost".to_string()),
        ..WordPatch::default()
    };
    let err = service.update_word(WordId(404), &patch).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == WordId(404)));
}

#[test]
fn delete_removes_word_and_second_delete_is_not_found() {
    let service = open_local_service(MemoryKeyValueStore::new());
    let keep = service.create_word(&ephemeral()).unwrap();
    let doomed = service
        .create_word(&WordDraft::new("Ubiquitous", "Everywhere.", "Phones.", "adjective"))
        .unwrap();

    service.delete_word(doomed.id).unwrap();
    let remaining = service.list_words().unwrap();
    assert!(remaining.iter().all(|word| word.id != doomed.id));
    assert_eq!(remaining, vec![keep]);

    let err = service.delete_word(doomed.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == doomed.id));
}

#[test]
fn file_layout_is_pretty_printed_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    let service = open_file_service(&path);

    let created = service.create_word(&ephemeral()).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("[\n  {"));
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let first = &parsed.as_array().unwrap()[0];
    assert_eq!(first["id"], created.id.as_u64());
    assert_eq!(first["type"], "adjective");
    assert_eq!(first["date"], created.date.as_str());
}

#[test]
fn file_written_by_other_tools_with_string_ids_is_readable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    std::fs::write(
        &path,
        r#"[{"id":"1690000000000","text":"Laconic","definition":"Using few words.","example":"A laconic reply.","type":"adjective","date":"20 Jul 2023"}]"#,
    )
    .unwrap();

    let repo = JsonWordRepository::new(FileSnapshot::new(&path));
    let word = repo.get_word(WordId(1_690_000_000_000)).unwrap().unwrap();
    assert_eq!(word.text, "Laconic");

    repo.delete_word(word.id).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
}

#[test]
fn corrupt_file_is_reported_as_invalid_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    std::fs::write(&path, "{ not json").unwrap();

    let service = open_file_service(&path);
    assert!(matches!(
        service.list_words().unwrap_err(),
        RepoError::InvalidData(_)
    ));
}
