use authorlist_core::{
    Author, AuthorListView, BootstrapPhase, BootstrapSession, EntityRepository, Store, StoreConfig,
};
use std::path::Path;
use std::sync::{Arc, Barrier};
use std::thread;

fn author_rows(dir: &Path) -> Vec<(String, String)> {
    let store = Store::open(&StoreConfig::app(dir)).expect("store should open");
    store
        .repository::<Author>()
        .expect("repository should bind")
        .find_all()
        .expect("find_all should succeed")
        .into_iter()
        .map(|author| (author.name, author.birthdate))
        .collect()
}

#[test]
fn empty_store_displays_single_default_author() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let mut session = BootstrapSession::for_app(dir.path());

    let displayed: Vec<_> = session
        .bootstrap()
        .iter()
        .map(|author| (author.name.clone(), author.birthdate.clone()))
        .collect();

    assert_eq!(
        displayed,
        vec![("Chuck Norris".to_string(), "10-03-1940".to_string())]
    );
    assert_eq!(session.phase(), BootstrapPhase::Ready);
}

#[test]
fn repeated_bootstrap_never_adds_a_second_seed() {
    let dir = tempfile::tempdir().expect("temp dir should be created");

    let mut session = BootstrapSession::for_app(dir.path());
    for _ in 0..3 {
        assert_eq!(session.bootstrap().len(), 1);
    }
    session.shutdown().expect("shutdown should close the store");

    for _ in 0..3 {
        let mut fresh = BootstrapSession::for_app(dir.path());
        assert_eq!(fresh.bootstrap().len(), 1);
        fresh.shutdown().expect("shutdown should close the store");
    }

    assert_eq!(
        author_rows(dir.path()),
        vec![("Chuck Norris".to_string(), "10-03-1940".to_string())]
    );
}

#[test]
fn concurrent_first_bootstraps_seed_exactly_once() {
    const SESSIONS: usize = 8;
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let start = Arc::new(Barrier::new(SESSIONS));

    let workers: Vec<_> = (0..SESSIONS)
        .map(|_| {
            let base_dir = dir.path().to_path_buf();
            let start = Arc::clone(&start);
            thread::spawn(move || {
                let mut session = BootstrapSession::for_app(base_dir);
                start.wait();
                let shown = session.bootstrap().len();
                let phase = session.phase();
                session.shutdown().expect("session store should close");
                (shown, phase)
            })
        })
        .collect();

    for worker in workers {
        let (shown, phase) = worker.join().expect("bootstrap thread should not panic");
        assert_eq!(phase, BootstrapPhase::Ready);
        assert_eq!(shown, 1);
    }

    let store = Store::open(&StoreConfig::app(dir.path())).expect("store should open");
    let authors = store
        .repository::<Author>()
        .expect("author repository should bind");
    assert_eq!(authors.count().expect("count should succeed"), 1);
    let rows = authors.find_all().expect("find_all should succeed");
    assert!(rows[0].is_default_seed());
}

#[test]
fn pre_seeded_store_is_left_alone() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    {
        let store = Store::open(&StoreConfig::app(dir.path())).expect("store should open");
        store
            .repository::<Author>()
            .expect("repository should bind")
            .save(Author::new("Ada Lovelace", "12-10-1815"))
            .expect("save should succeed");
        store.close().expect("store should close");
    }

    let mut session = BootstrapSession::for_app(dir.path());
    let displayed = session.bootstrap().to_vec();

    assert_eq!(displayed.len(), 1);
    assert_eq!(displayed[0].name, "Ada Lovelace");
    assert_eq!(displayed[0].birthdate, "12-10-1815");
    assert!(!session.history().contains(&BootstrapPhase::Seeding));
    assert_eq!(
        author_rows(dir.path()),
        vec![("Ada Lovelace".to_string(), "12-10-1815".to_string())]
    );
}

#[test]
fn seed_check_runs_after_connect_and_before_ready() {
    let mut session = BootstrapSession::new(StoreConfig::in_memory());
    session.bootstrap();

    let history = session.history();
    let position = |phase| {
        history
            .iter()
            .position(|entry| *entry == phase)
            .expect("phase should be recorded")
    };
    assert!(position(BootstrapPhase::Connecting) < position(BootstrapPhase::Connected));
    assert!(position(BootstrapPhase::Connected) < position(BootstrapPhase::Seeding));
    assert!(position(BootstrapPhase::Seeding) < position(BootstrapPhase::Ready));
    assert_eq!(history.last(), Some(&BootstrapPhase::Ready));
}

#[test]
fn held_connection_skips_connecting_on_later_calls() {
    let mut session = BootstrapSession::new(StoreConfig::in_memory());
    session.bootstrap();
    session.bootstrap();
    session.bootstrap();

    let connects = session
        .history()
        .iter()
        .filter(|phase| **phase == BootstrapPhase::Connecting)
        .count();
    assert_eq!(connects, 1);
}

#[test]
fn later_call_reflects_authors_added_after_first_bootstrap() {
    let mut session = BootstrapSession::new(StoreConfig::in_memory());
    session.bootstrap();

    let store = session.store().expect("session should hold a store");
    store
        .repository::<Author>()
        .expect("repository should bind")
        .save(Author::new("Mary Shelley", "30-08-1797"))
        .expect("save should succeed");

    let names: Vec<_> = session
        .bootstrap()
        .iter()
        .map(|author| author.name.clone())
        .collect();
    assert_eq!(names, vec!["Chuck Norris", "Mary Shelley"]);
}

#[test]
fn store_emptied_mid_session_is_reseeded_on_next_call() {
    let mut session = BootstrapSession::new(StoreConfig::in_memory());
    session.bootstrap();
    session
        .store()
        .expect("session should hold a store")
        .connection()
        .execute_batch("DELETE FROM author;")
        .expect("raw SQL should run");

    let authors = session.bootstrap().to_vec();
    assert_eq!(authors.len(), 1);
    assert!(authors[0].is_default_seed());
    let seedings = session
        .history()
        .iter()
        .filter(|phase| **phase == BootstrapPhase::Seeding)
        .count();
    assert_eq!(seedings, 2);
}

#[test]
fn snapshot_feeds_display_tiles() {
    let mut session = BootstrapSession::new(StoreConfig::in_memory());
    let view = AuthorListView::from_authors(session.bootstrap());

    assert_eq!(view.title, "My List of Authors");
    assert_eq!(view.tiles.len(), 1);
    assert_eq!(view.tiles[0].name, "Chuck Norris");
    let seed_id = session.authors()[0].id.expect("record should have an id");
    assert_eq!(view.tiles[0].key, seed_id.to_string());
}
