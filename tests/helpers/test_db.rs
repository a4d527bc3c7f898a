use async_trait::async_trait;
use drift::application::services::auth_service::hash_password;
use drift::config::Config;
use drift::domain::entities::{File, Post, User, UserRole, Visibility};
use drift::domain::ports::file_repository::FileRepository;
use drift::domain::ports::time_service::TimeService;
use drift::domain::ports::user_repository::UserRepository;
use drift::Database;
use std::time::Duration;
use time::macros::datetime;
use time::OffsetDateTime;
use uuid::Uuid;

/// Fixed instant used as "now" across the integration tests
pub const NOW: OffsetDateTime = datetime!(2024-06-01 12:00 UTC);

pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub struct TestDb {
    db: Database,
    path: String,
}

impl TestDb {
    pub fn db(&self) -> &Database {
        &self.db
    }

    pub async fn teardown(self) {
        self.db.pool().close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", self.path, suffix));
        }
    }
}

pub async fn setup_test_db() -> TestDb {
    // File-based SQLite, unique per test so tests can run in parallel
    let path = std::env::temp_dir()
        .join(format!("drift_test_{}.db", Uuid::new_v4()))
        .to_string_lossy()
        .into_owned();
    let db_url = format!("sqlite://{}?mode=rwc", path);

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");
    db.run_migrations()
        .await
        .expect("Failed to run migrations");

    TestDb { db, path }
}

/// Clock pinned to a single instant
#[derive(Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

#[async_trait]
impl TimeService for FixedClock {
    async fn sleep(&self, _duration: Duration) {}

    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

pub fn test_config() -> Config {
    Config {
        registration_password: None,
        ..Config::default()
    }
}

pub async fn create_test_user(db: &Database, username: &str) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("Failed to hash password");
    let user = User::new(username.to_string(), password_hash, UserRole::User)
        .expect("Failed to build user");
    db.create_user(&user).await.expect("Failed to create user");
    user
}

pub async fn create_test_file(
    db: &Database,
    author_id: &str,
    visibility: Visibility,
    title: &str,
    content: &str,
) -> File {
    let post = Post::new(
        format!("Post for {}", title),
        None,
        visibility,
        author_id.to_string(),
    )
    .expect("Failed to build post");
    db.create_post(&post).await.expect("Failed to create post");

    let html = format!("<pre>{}</pre>", content);
    let file = File::new(
        post.id.clone(),
        title.to_string(),
        content.as_bytes().to_vec(),
        html.into_bytes(),
    )
    .expect("Failed to build file");
    db.create_file(&file).await.expect("Failed to create file");
    file
}
