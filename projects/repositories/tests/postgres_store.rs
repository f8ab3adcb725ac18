//! Store behaviour against a real PostgreSQL.
//!
//! Runs only when `TEST_DATABASE_URL` is set. Each test works inside a test
//! transaction that is never committed.

use std::sync::{Mutex, MutexGuard};

use chrono::{TimeZone, Utc};
use diesel::{connection::SimpleConnection, Connection, PgConnection};
use interfaces_github_search::index::{GitHubRepository, LanguageRepositories, Owner};
use projects_repositories::{
    db::{
        language::queries::get_language_by_name,
        repository::queries::{get_repositories_for_language, get_repository_by_name},
        stats::{
            models::{LanguageStarSum, RepositorySummary, TopRepository},
            queries::{
                get_languages_with_repositories, get_star_sum_per_language,
                get_top_repository_per_language,
            },
        },
    },
    storage::{
        postgres::{persist_language_repositories, remove_repository},
        PersistLanguageRepositoriesError,
    },
    types::RepositoryId,
};
use uuid::Uuid;

const SCHEMA: &str = include_str!(
    "../migrations/2024-05-01-000000_create_languages_and_repositories/up.sql"
);

static DATABASE: Mutex<()> = Mutex::new(());

struct TestDatabase {
    conn: PgConnection,
    _guard: MutexGuard<'static, ()>,
}

fn database() -> Option<TestDatabase> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let guard = DATABASE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let mut conn = PgConnection::establish(&url).unwrap();
    conn.batch_execute(SCHEMA).unwrap();
    conn.begin_test_transaction().unwrap();
    conn.batch_execute("DELETE FROM repositories; DELETE FROM programming_languages;")
        .unwrap();

    Some(TestDatabase {
        conn,
        _guard: guard,
    })
}

fn repository(full_name: &str, stars: i64, description: Option<&str>) -> GitHubRepository {
    GitHubRepository {
        full_name: full_name.to_string(),
        owner: Owner {
            login: full_name.split('/').next().unwrap().to_string(),
        },
        description: description.map(str::to_string),
        created_at: Utc.with_ymd_and_hms(2014, 8, 19, 4, 33, 40).unwrap(),
        stargazers_count: stars,
    }
}

fn fetched(language_name: &str, items: Vec<GitHubRepository>) -> LanguageRepositories {
    LanguageRepositories {
        language_name: language_name.to_string(),
        items,
    }
}

#[test]
fn persisted_repositories_are_read_back_most_starred_first() {
    let Some(mut db) = database() else { return };

    persist_language_repositories(
        &mut db.conn,
        &fetched(
            "java",
            vec![
                repository("spring-projects/spring-boot", 70_000, Some("Spring Boot")),
                repository("elastic/elasticsearch", 60_000, None),
                repository("iluwatar/java-design-patterns", 80_000, Some("Patterns")),
            ],
        ),
    )
    .unwrap();

    let stored = get_repositories_for_language(&mut db.conn, "java").unwrap();
    let names: Vec<_> = stored.iter().map(|r| r.full_name.as_str()).collect();
    assert_eq!(
        names,
        [
            "iluwatar/java-design-patterns",
            "spring-projects/spring-boot",
            "elastic/elasticsearch",
        ]
    );
    assert_eq!(stored[2].description, None);

    assert!(get_repositories_for_language(&mut db.conn, "ruby")
        .unwrap()
        .is_empty());
}

#[test]
fn persisting_twice_updates_in_place() {
    let Some(mut db) = database() else { return };

    let first = persist_language_repositories(
        &mut db.conn,
        &fetched("go", vec![repository("golang/go", 100_000, Some("old"))]),
    )
    .unwrap();
    let before = get_repository_by_name(&mut db.conn, first.0, "golang/go")
        .unwrap()
        .unwrap();

    let mut refreshed = repository("golang/go", 120_000, Some("new"));
    refreshed.created_at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let second =
        persist_language_repositories(&mut db.conn, &fetched("go", vec![refreshed])).unwrap();

    assert_eq!(first, second);
    let after = get_repository_by_name(&mut db.conn, second.0, "golang/go")
        .unwrap()
        .unwrap();
    assert_eq!(after.id, before.id);
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(after.stars, 120_000);
    assert_eq!(after.description.as_deref(), Some("new"));
    assert_eq!(get_repositories_for_language(&mut db.conn, "go").unwrap().len(), 1);
}

#[test]
fn negative_star_count_rolls_back_the_whole_batch() {
    let Some(mut db) = database() else { return };

    let err = persist_language_repositories(
        &mut db.conn,
        &fetched(
            "php",
            vec![
                repository("laravel/laravel", 75_000, None),
                repository("broken/broken", -1, None),
            ],
        ),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        PersistLanguageRepositoriesError::InvalidStarCount { stars: -1, .. }
    ));
    assert!(get_language_by_name(&mut db.conn, "php").unwrap().is_none());
    assert!(get_repositories_for_language(&mut db.conn, "php")
        .unwrap()
        .is_empty());
}

#[test]
fn removing_unknown_repository_is_not_found() {
    let Some(mut db) = database() else { return };

    let err = remove_repository(&mut db.conn, RepositoryId(Uuid::new_v4())).unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn removed_repository_disappears_from_reads() {
    let Some(mut db) = database() else { return };

    let language_id = persist_language_repositories(
        &mut db.conn,
        &fetched(
            "go",
            vec![repository(
                "golang/go",
                100_000,
                Some("The Go programming language"),
            )],
        ),
    )
    .unwrap();

    let stored = get_repositories_for_language(&mut db.conn, "go").unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].full_name, "golang/go");
    assert_eq!(stored[0].stars, 100_000);

    let repository_id = get_repository_by_name(&mut db.conn, language_id.0, "golang/go")
        .unwrap()
        .map(|row| RepositoryId(row.id))
        .unwrap();
    assert_eq!(
        remove_repository(&mut db.conn, repository_id).unwrap(),
        repository_id
    );

    assert!(get_repositories_for_language(&mut db.conn, "go")
        .unwrap()
        .is_empty());
    assert!(remove_repository(&mut db.conn, repository_id)
        .unwrap_err()
        .is_not_found());
}

#[test]
fn star_sums_are_empty_without_repositories() {
    let Some(mut db) = database() else { return };

    assert!(get_star_sum_per_language(&mut db.conn).unwrap().is_empty());
    assert!(get_top_repository_per_language(&mut db.conn)
        .unwrap()
        .is_empty());
    assert!(get_languages_with_repositories(&mut db.conn)
        .unwrap()
        .is_empty());
}

#[test]
fn star_sums_report_distance_to_previous_language() {
    let Some(mut db) = database() else { return };

    persist_language_repositories(
        &mut db.conn,
        &fetched("go", vec![repository("golang/go", 100_000, None)]),
    )
    .unwrap();
    assert_eq!(
        get_star_sum_per_language(&mut db.conn).unwrap(),
        vec![LanguageStarSum {
            language_name: "go".to_string(),
            stars_sum: 100_000,
            stars_difference: 0,
        }]
    );

    persist_language_repositories(
        &mut db.conn,
        &fetched(
            "javascript",
            vec![
                repository("facebook/react", 200_000, None),
                repository("vuejs/vue", 150_000, None),
            ],
        ),
    )
    .unwrap();

    assert_eq!(
        get_star_sum_per_language(&mut db.conn).unwrap(),
        vec![
            LanguageStarSum {
                language_name: "javascript".to_string(),
                stars_sum: 350_000,
                stars_difference: 0,
            },
            LanguageStarSum {
                language_name: "go".to_string(),
                stars_sum: 100_000,
                stars_difference: -250_000,
            },
        ]
    );
}

#[test]
fn top_list_keeps_most_starred_repository_per_language() {
    let Some(mut db) = database() else { return };

    persist_language_repositories(
        &mut db.conn,
        &fetched(
            "ruby",
            vec![
                repository("rails/rails", 55_000, None),
                repository("jekyll/jekyll", 49_000, None),
            ],
        ),
    )
    .unwrap();
    persist_language_repositories(
        &mut db.conn,
        &fetched(
            "go",
            vec![
                repository("golang/go", 100_000, None),
                repository("b/tie", 30_000, None),
                repository("a/tie", 30_000, None),
            ],
        ),
    )
    .unwrap();
    persist_language_repositories(
        &mut db.conn,
        &fetched(
            "php",
            vec![
                repository("b/tie", 30_000, None),
                repository("a/tie", 30_000, None),
            ],
        ),
    )
    .unwrap();

    assert_eq!(
        get_top_repository_per_language(&mut db.conn).unwrap(),
        vec![
            TopRepository {
                language_name: "go".to_string(),
                full_name: "golang/go".to_string(),
                stars: 100_000,
            },
            TopRepository {
                language_name: "ruby".to_string(),
                full_name: "rails/rails".to_string(),
                stars: 55_000,
            },
            TopRepository {
                language_name: "php".to_string(),
                full_name: "a/tie".to_string(),
                stars: 30_000,
            },
        ]
    );
}

#[test]
fn languages_tree_includes_languages_without_repositories() {
    let Some(mut db) = database() else { return };

    let go = persist_language_repositories(
        &mut db.conn,
        &fetched(
            "go",
            vec![
                repository("golang/go", 100_000, None),
                repository("gohugoio/hugo", 70_000, None),
            ],
        ),
    )
    .unwrap();
    let ruby = persist_language_repositories(&mut db.conn, &fetched("ruby", vec![])).unwrap();

    let hugo = get_repository_by_name(&mut db.conn, go.0, "gohugoio/hugo")
        .unwrap()
        .unwrap();
    let golang = get_repository_by_name(&mut db.conn, go.0, "golang/go")
        .unwrap()
        .unwrap();

    let tree = get_languages_with_repositories(&mut db.conn).unwrap();

    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].language_id, go.0);
    assert_eq!(tree[0].language_name, "go");
    assert_eq!(
        tree[0].repositories,
        vec![
            RepositorySummary {
                repository_id: hugo.id,
                repository_name: "gohugoio/hugo".to_string(),
                stars: 70_000,
            },
            RepositorySummary {
                repository_id: golang.id,
                repository_name: "golang/go".to_string(),
                stars: 100_000,
            },
        ]
    );
    assert_eq!(tree[1].language_id, ruby.0);
    assert!(tree[1].repositories.is_empty());
}
