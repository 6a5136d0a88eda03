use newborn_core::{RepoError, SleepDraft, SleepPatch, SleepRepository, Store, TimeRange};

#[test]
fn create_and_get_roundtrip() {
    let store = Store::open_in_memory().unwrap();
    let repo = store.sleeps();

    let draft = SleepDraft {
        start: Some(3_000),
        end: Some(9_000),
        comment: Some("afternoon nap".to_string()),
    };
    let id = repo.create_sleep(&draft).unwrap();

    let loaded = repo.get_sleep(id).unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.start, Some(3_000));
    assert_eq!(loaded.end, Some(9_000));
    assert_eq!(loaded.comment.as_deref(), Some("afternoon nap"));
}

#[test]
fn empty_draft_inserts_with_all_fields_absent() {
    let store = Store::open_in_memory().unwrap();
    let repo = store.sleeps();

    let id = repo.create_sleep(&SleepDraft::default()).unwrap();

    let loaded = repo.get_sleep(id).unwrap();
    assert!(loaded.start.is_none());
    assert!(loaded.end.is_none());
    assert!(loaded.comment.is_none());
}

#[test]
fn ascending_start_range_returns_ascending_order() {
    let store = Store::open_in_memory().unwrap();
    let repo = store.sleeps();

    for start in [700, 200, 900, 400] {
        repo.create_sleep(&SleepDraft {
            start: Some(start),
            ..SleepDraft::default()
        })
        .unwrap();
    }

    let starts: Vec<Option<i64>> = repo
        .list_by_start(&TimeRange::since(200))
        .unwrap()
        .iter()
        .map(|sleep| sleep.start)
        .collect();
    assert_eq!(
        starts,
        vec![Some(200), Some(400), Some(700), Some(900)]
    );
}

#[test]
fn patch_merge_keeps_untouched_fields() {
    let store = Store::open_in_memory().unwrap();
    let repo = store.sleeps();

    let id = repo
        .create_sleep(&SleepDraft {
            start: Some(1_000),
            ..SleepDraft::default()
        })
        .unwrap();

    repo.update_sleep(
        id,
        &SleepPatch {
            end: Some(4_000),
            ..SleepPatch::default()
        },
    )
    .unwrap();

    let loaded = repo.get_sleep(id).unwrap();
    assert_eq!(loaded.start, Some(1_000));
    assert_eq!(loaded.end, Some(4_000));
    assert!(loaded.comment.is_none());
}

#[test]
fn delete_then_get_returns_not_found() {
    let store = Store::open_in_memory().unwrap();
    let repo = store.sleeps();

    let id = repo.create_sleep(&SleepDraft::default()).unwrap();
    repo.delete_sleep(id).unwrap();

    let err = repo.get_sleep(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id));
}

#[test]
fn update_missing_row_returns_not_found() {
    let store = Store::open_in_memory().unwrap();
    let repo = store.sleeps();

    let err = repo.update_sleep(77, &SleepPatch::default()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(77)));
}
