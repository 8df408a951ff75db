use playground_core::{
    Playground, PlaygroundFactory, PlaygroundId, PlaygroundParams, PlaygroundSnapshot,
};
use playground_runtime::{
    FileSnapshotRepository, InMemorySnapshotRepo, PlaygroundRegistry, RepositoryError,
    RuntimeError, SnapshotFormat, SnapshotRepository, TurnExecutor, WaitProvider,
};
use tempfile::TempDir;

fn playground() -> Playground {
    PlaygroundFactory::new()
        .create(&PlaygroundParams::new(15, 11, 10, 5).with_seed(9))
        .unwrap()
}

/// Snapshot of `pg` after `turns` waiting turns.
fn snapshot_after(pg: Playground, turns: u64) -> PlaygroundSnapshot {
    let mut executor = TurnExecutor::new(pg, WaitProvider, WaitProvider);
    for _ in 0..turns {
        executor.step().unwrap();
    }
    executor.playground().snapshot()
}

/// Exercises the whole contract against one repository.
fn check_contract(repo: &dyn SnapshotRepository) {
    let pg = playground();
    let id = pg.id();
    let first = pg.snapshot();
    let later = snapshot_after(pg, 3);

    assert!(repo.list_turns(id).unwrap().is_empty());
    assert_eq!(repo.latest(id).unwrap(), None);

    repo.save(&later).unwrap();
    repo.save(&first).unwrap();
    assert!(repo.exists(id, 0));
    assert!(repo.exists(id, 3));
    assert!(!repo.exists(id, 1));
    assert!(!repo.exists(PlaygroundId(id.0 + 1), 0));

    assert_eq!(repo.list_turns(id).unwrap(), vec![0, 3]);
    assert_eq!(repo.load(id, 0).unwrap(), Some(first.clone()));
    assert_eq!(repo.load(id, 2).unwrap(), None);
    assert_eq!(repo.latest(id).unwrap(), Some(later.clone()));

    let restored = Playground::from_snapshot(repo.latest(id).unwrap().unwrap()).unwrap();
    assert_eq!(restored.turn(), 3);
    assert_eq!(restored.snapshot(), later);

    repo.delete(id, 3).unwrap();
    repo.delete(id, 3).unwrap();
    assert_eq!(repo.list_turns(id).unwrap(), vec![0]);
    assert_eq!(repo.latest(id).unwrap(), Some(first));
}

#[test]
fn in_memory_repository_contract() {
    let repo = InMemorySnapshotRepo::new();
    check_contract(&repo);
    assert_eq!(repo.len(), 1);
}

#[test]
fn bincode_file_repository_contract() {
    let dir = TempDir::new().unwrap();
    let repo = FileSnapshotRepository::new(dir.path()).unwrap();
    assert_eq!(repo.format(), SnapshotFormat::Bincode);
    check_contract(&repo);
}

#[test]
fn json_file_repository_contract() {
    let dir = TempDir::new().unwrap();
    let repo = FileSnapshotRepository::with_format(dir.path(), SnapshotFormat::Json).unwrap();
    check_contract(&repo);

    let written: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(written, vec!["playground_1_turn_0.json".to_string()]);
}

#[test]
fn formats_do_not_see_each_other() {
    let dir = TempDir::new().unwrap();
    let binary = FileSnapshotRepository::new(dir.path()).unwrap();
    let json = FileSnapshotRepository::with_format(dir.path(), SnapshotFormat::Json).unwrap();

    let snapshot = playground().snapshot();
    binary.save(&snapshot).unwrap();
    assert_eq!(binary.list_turns(snapshot.id).unwrap(), vec![0]);
    assert!(json.list_turns(snapshot.id).unwrap().is_empty());
}

#[test]
fn misfiled_snapshot_is_reported_as_corrupted() {
    let dir = TempDir::new().unwrap();
    let repo = FileSnapshotRepository::with_format(dir.path(), SnapshotFormat::Json).unwrap();
    let snapshot = playground().snapshot();
    repo.save(&snapshot).unwrap();

    std::fs::rename(
        dir.path().join("playground_1_turn_0.json"),
        dir.path().join("playground_1_turn_5.json"),
    )
    .unwrap();

    assert!(matches!(
        repo.load(snapshot.id, 5),
        Err(RepositoryError::CorruptedData(_))
    ));
}

#[test]
fn garbage_bytes_fail_to_decode() {
    let dir = TempDir::new().unwrap();
    let repo = FileSnapshotRepository::new(dir.path()).unwrap();
    std::fs::write(dir.path().join("playground_4_turn_0.bin"), b"not a snapshot").unwrap();

    assert!(matches!(
        repo.load(PlaygroundId(4), 0),
        Err(RepositoryError::Serialization(_))
    ));
}

#[test]
fn registry_keeps_playgrounds_apart() {
    let mut registry = PlaygroundRegistry::new();
    let params = PlaygroundParams::new(11, 11, 10, 5);
    let a = registry.create(&params).unwrap();
    let b = registry.create(&params.with_seed(1)).unwrap();
    assert_ne!(a, b);
    assert_eq!(registry.len(), 2);

    let before = registry.get(b).unwrap().clone();
    registry.get_mut(a).unwrap().on_start_turn_actions();
    assert_eq!(registry.get(a).unwrap().turn(), 1);
    assert_eq!(registry.get(b).unwrap(), &before);

    let taken = registry.get(a).unwrap().clone();
    assert!(matches!(
        registry.insert(taken),
        Err(RuntimeError::DuplicatePlayground { id }) if id == a
    ));

    registry.remove(a).unwrap();
    assert!(matches!(
        registry.get(a),
        Err(RuntimeError::UnknownPlayground { id }) if id == a
    ));
    assert_eq!(registry.ids().collect::<Vec<_>>(), vec![b]);
}

#[test]
fn registry_create_skips_inserted_ids() {
    let mut registry = PlaygroundRegistry::new();
    let foreign = PlaygroundFactory::new()
        .create(&PlaygroundParams::new(9, 9, 0, 0))
        .unwrap();
    assert_eq!(foreign.id(), PlaygroundId(1));
    registry.insert(foreign).unwrap();

    let created = registry.create(&PlaygroundParams::new(9, 9, 0, 0)).unwrap();
    assert_eq!(created, PlaygroundId(2));
}

#[test]
fn registry_restores_latest_snapshot() {
    let repo = InMemorySnapshotRepo::new();
    let mut registry = PlaygroundRegistry::new();
    let id = registry
        .create(&PlaygroundParams::new(13, 13, 10, 5))
        .unwrap();

    assert_eq!(registry.save(id, &repo).unwrap(), 0);
    let saved = registry.get(id).unwrap().clone();

    registry.get_mut(id).unwrap().on_start_turn_actions();
    registry.get_mut(id).unwrap().on_start_turn_actions();
    assert_eq!(registry.save(id, &repo).unwrap(), 2);

    let mut fresh = PlaygroundRegistry::new();
    assert_eq!(fresh.restore_latest(id, &repo).unwrap(), 2);
    assert_eq!(fresh.get(id).unwrap().turn(), 2);

    repo.delete(id, 2).unwrap();
    assert_eq!(fresh.restore_latest(id, &repo).unwrap(), 0);
    assert_eq!(fresh.get(id).unwrap().snapshot(), saved.snapshot());

    assert!(matches!(
        fresh.restore_latest(PlaygroundId(99), &repo),
        Err(RuntimeError::SnapshotNotFound { .. })
    ));
}
