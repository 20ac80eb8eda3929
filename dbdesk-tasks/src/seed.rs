/// Synthetic data for the task tracker
///
/// Seeding happens in two steps:
///
/// 1. [`SeedPlan::generate`] draws users and tasks from a random source. It is
///    pure, so a seeded `StdRng` gives the same plan every run.
/// 2. [`seed_all`] inserts the plan. Users and statuses are inserted first and
///    their generated ids are used for the tasks, so every task references rows
///    that exist.
///
/// # Example
///
/// ```no_run
/// use dbdesk_tasks::seed::{seed_all, SeedCounts, SeedPlan};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use sqlx::postgres::PgConnection;
///
/// # async fn example(conn: &mut PgConnection) -> Result<(), dbdesk_tasks::TaskDbError> {
/// let mut rng = StdRng::seed_from_u64(42);
/// let counts = SeedCounts::draw(&mut rng);
/// let plan = SeedPlan::generate(&mut rng, counts);
///
/// let report = seed_all(conn, plan).await?;
/// println!("{} users, {} tasks", report.users, report.tasks);
/// # Ok(())
/// # }
/// ```
use crate::config::SeedSettings;
use crate::error::{TaskDbError, TaskDbResult};
use crate::models::status::{Status, TaskStatus};
use crate::models::task::{CreateTask, Task};
use crate::models::user::{CreateUser, User};
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::postgres::PgConnection;
use std::collections::HashSet;
use std::ops::RangeInclusive;
use tracing::info;

/// Users per seed run when not configured
pub const USER_RANGE: RangeInclusive<usize> = 5..=8;

/// Tasks per seed run when not configured
pub const TASK_RANGE: RangeInclusive<usize> = 30..=50;

/// Words per task title
pub const TITLE_WORDS: usize = 6;

/// Column width of `tasks.title`
pub const MAX_TITLE_CHARS: usize = 100;

/// Upper bound for generated descriptions
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Random email draws per user before falling back to an index-tagged address
const MAX_EMAIL_ATTEMPTS: usize = 8;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Chloe", "Dmitri", "Elena", "Farid", "Grace", "Hugo", "Ines", "Jonas",
    "Keiko", "Liam", "Maya", "Nikolai", "Olivia", "Pavel", "Quinn", "Rosa", "Samir", "Tara",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Baker", "Carter", "Dubois", "Evans", "Fischer", "Garcia", "Hansen", "Ivanova",
    "Jensen", "Kowalski", "Lopez", "Moreau", "Nakamura", "Olsen", "Petrov", "Rossi", "Schmidt",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net", "mail.test"];

const WORDS: &[&str] = &[
    "analysis", "budget", "customer", "deploy", "draft", "estimate", "feedback", "forecast",
    "invoice", "meeting", "migrate", "network", "outline", "plan", "prepare", "quarter",
    "release", "report", "review", "schedule", "server", "sprint", "summary", "team", "test",
    "update", "vendor", "workshop", "archive", "backup", "check", "clean", "document", "follow",
    "measure", "order", "print", "record", "send", "verify",
];

/// How many users and tasks to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCounts {
    pub users: usize,
    pub tasks: usize,
}

impl SeedCounts {
    /// Draws counts from [`USER_RANGE`] and [`TASK_RANGE`]
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        SeedCounts {
            users: rng.gen_range(USER_RANGE),
            tasks: rng.gen_range(TASK_RANGE),
        }
    }

    /// Configured counts, drawing whichever is unset
    ///
    /// A configured user count of zero is raised to one: tasks need an owner.
    pub fn resolve<R: Rng + ?Sized>(settings: &SeedSettings, rng: &mut R) -> Self {
        let drawn = SeedCounts::draw(rng);
        SeedCounts {
            users: settings.users.map_or(drawn.users, |users| users.max(1)),
            tasks: settings.tasks.unwrap_or(drawn.tasks),
        }
    }
}

/// A task to insert, referencing plan entries by index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTask {
    pub title: String,
    pub description: String,

    /// Index into [`SeedPlan::statuses`]
    pub status_index: usize,

    /// Index into [`SeedPlan::users`]
    pub user_index: usize,
}

/// Everything one seed run inserts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPlan {
    pub users: Vec<CreateUser>,
    pub statuses: Vec<TaskStatus>,
    pub tasks: Vec<PlannedTask>,
}

/// Rows inserted by [`seed_all`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub statuses: usize,
    pub tasks: usize,
}

impl SeedPlan {
    /// Generates users with unique emails and tasks spread uniformly over
    /// users and statuses
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, counts: SeedCounts) -> Self {
        let mut emails = HashSet::with_capacity(counts.users);
        let mut users = Vec::with_capacity(counts.users);

        for index in 0..counts.users {
            let user = unique_user(rng, &emails, index);
            emails.insert(user.email.clone());
            users.push(user);
        }

        let statuses = TaskStatus::ALL.to_vec();

        let tasks = if users.is_empty() {
            Vec::new()
        } else {
            (0..counts.tasks)
                .map(|_| PlannedTask {
                    title: sentence(rng, TITLE_WORDS, MAX_TITLE_CHARS),
                    description: paragraph(rng, MAX_DESCRIPTION_CHARS),
                    status_index: rng.gen_range(0..statuses.len()),
                    user_index: rng.gen_range(0..users.len()),
                })
                .collect()
        };

        SeedPlan {
            users,
            statuses,
            tasks,
        }
    }
}

/// Inserts users, then statuses, then tasks
///
/// Run it inside [`Session::scoped`](crate::db::session::Session::scoped) on a
/// freshly initialized schema; the unique status names make a second run on
/// the same tables fail and roll back.
pub async fn seed_all(conn: &mut PgConnection, plan: SeedPlan) -> TaskDbResult<SeedReport> {
    info!(
        users = plan.users.len(),
        tasks = plan.tasks.len(),
        "Seeding database"
    );

    let mut user_ids = Vec::with_capacity(plan.users.len());
    for user in plan.users {
        user_ids.push(User::create(&mut *conn, user).await?.id);
    }

    let mut status_ids = Vec::with_capacity(plan.statuses.len());
    for status in &plan.statuses {
        status_ids.push(Status::create(&mut *conn, *status).await?.id);
    }

    let task_count = plan.tasks.len();
    for (position, task) in plan.tasks.into_iter().enumerate() {
        let status_id = status_ids.get(task.status_index).copied().ok_or_else(|| {
            TaskDbError::SeedPlan(format!(
                "task {} refers to status {}",
                position, task.status_index
            ))
        })?;
        let user_id = user_ids.get(task.user_index).copied().ok_or_else(|| {
            TaskDbError::SeedPlan(format!(
                "task {} refers to user {}",
                position, task.user_index
            ))
        })?;

        Task::create(
            &mut *conn,
            CreateTask {
                title: Some(task.title),
                description: Some(task.description),
                status_id: Some(status_id),
                user_id: Some(user_id),
            },
        )
        .await?;
    }

    let report = SeedReport {
        users: user_ids.len(),
        statuses: status_ids.len(),
        tasks: task_count,
    };

    info!(?report, "Seeding operation is successful");
    Ok(report)
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn fake_user<R: Rng + ?Sized>(rng: &mut R) -> CreateUser {
    let first = pick(rng, FIRST_NAMES);
    let last = pick(rng, LAST_NAMES);
    let suffix: u32 = rng.gen_range(0..0x10000);
    let domain = pick(rng, EMAIL_DOMAINS);

    CreateUser {
        fullname: format!("{} {}", first, last),
        email: format!(
            "{}.{}{:04x}@{}",
            first.to_lowercase(),
            last.to_lowercase(),
            suffix,
            domain
        ),
    }
}

/// A user whose email is not in `taken`
///
/// Random draws collide rarely; after [`MAX_EMAIL_ATTEMPTS`] collisions the
/// local part is tagged with `.index`, which no random draw produces.
fn unique_user<R: Rng + ?Sized>(rng: &mut R, taken: &HashSet<String>, index: usize) -> CreateUser {
    let mut user = fake_user(rng);
    for _ in 1..MAX_EMAIL_ATTEMPTS {
        if !taken.contains(&user.email) {
            return user;
        }
        user = fake_user(rng);
    }
    if taken.contains(&user.email) {
        user.email = tag_email(&user.email, index);
    }
    user
}

fn tag_email(email: &str, index: usize) -> String {
    match email.split_once('@') {
        Some((local, domain)) => format!("{}.{}@{}", local, index, domain),
        None => format!("{}.{}", email, index),
    }
}

/// A capitalized sentence of `words` words ending in a period, cut to `max_chars`
fn sentence<R: Rng + ?Sized>(rng: &mut R, words: usize, max_chars: usize) -> String {
    let mut text = (0..words)
        .map(|_| pick(rng, WORDS))
        .collect::<Vec<_>>()
        .join(" ");

    if let Some(first) = text.get(..1) {
        text = first.to_uppercase() + &text[1..];
    }
    text.push('.');
    text.truncate(max_chars);
    text
}

/// Sentences of 4 to 10 words, as many as fit in `max_chars`
fn paragraph<R: Rng + ?Sized>(rng: &mut R, max_chars: usize) -> String {
    let mut text = String::new();

    loop {
        let words = rng.gen_range(4..=10);
        let next = sentence(rng, words, max_chars);
        let needed = if text.is_empty() { next.len() } else { next.len() + 1 };

        if text.len() + needed > max_chars {
            break;
        }
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&next);
    }

    if text.is_empty() {
        text = sentence(rng, 1, max_chars);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn plan(seed: u64, users: usize, tasks: usize) -> SeedPlan {
        let mut rng = StdRng::seed_from_u64(seed);
        SeedPlan::generate(&mut rng, SeedCounts { users, tasks })
    }

    #[test]
    fn test_draw_stays_in_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let counts = SeedCounts::draw(&mut rng);
            assert!(USER_RANGE.contains(&counts.users));
            assert!(TASK_RANGE.contains(&counts.tasks));
        }
    }

    #[test]
    fn test_resolve_prefers_configured_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        let settings = SeedSettings {
            users: Some(5),
            tasks: Some(30),
            rng_seed: None,
        };
        assert_eq!(
            SeedCounts::resolve(&settings, &mut rng),
            SeedCounts { users: 5, tasks: 30 }
        );

        let partial = SeedSettings {
            tasks: Some(0),
            ..Default::default()
        };
        let counts = SeedCounts::resolve(&partial, &mut rng);
        assert!(USER_RANGE.contains(&counts.users));
        assert_eq!(counts.tasks, 0);
    }

    #[test]
    fn test_plan_has_requested_counts() {
        let plan = plan(7, 5, 30);
        assert_eq!(plan.users.len(), 5);
        assert_eq!(plan.statuses, TaskStatus::ALL);
        assert_eq!(plan.tasks.len(), 30);
    }

    #[test]
    fn test_plan_references_resolve() {
        for seed in 0..50 {
            let plan = plan(seed, 8, 50);
            for task in &plan.tasks {
                assert!(task.user_index < plan.users.len());
                assert!(task.status_index < plan.statuses.len());
            }
        }
    }

    #[test]
    fn test_plan_emails_unique() {
        let plan = plan(3, 200, 0);
        let emails: HashSet<_> = plan.users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails.len(), 200);
        assert!(plan.users.iter().all(|u| u.email.contains('@')));
        assert!(plan.users.iter().all(|u| u.email.len() <= 100));
    }

    #[test]
    fn test_plan_text_fits_columns() {
        let plan = plan(11, 5, 50);
        for task in &plan.tasks {
            assert!(!task.title.is_empty());
            assert!(task.title.len() <= MAX_TITLE_CHARS);
            assert_eq!(task.title.split(' ').count(), TITLE_WORDS);
            assert!(!task.description.is_empty());
            assert!(task.description.len() <= MAX_DESCRIPTION_CHARS);
        }
    }

    #[test]
    fn test_email_collisions_fall_back_to_tagged_address() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut taken = HashSet::new();
        // Reserve every email the next draws would produce
        let mut preview_rng = StdRng::seed_from_u64(9);
        for _ in 0..MAX_EMAIL_ATTEMPTS {
            taken.insert(fake_user(&mut preview_rng).email);
        }

        let user = unique_user(&mut rng, &taken, 4);
        assert!(!taken.contains(&user.email));
        assert!(user.email.contains(".4@"));
    }

    #[test]
    fn test_tag_email() {
        assert_eq!(tag_email("alice.baker00ff@mail.test", 12), "alice.baker00ff.12@mail.test");
        assert_eq!(tag_email("broken", 1), "broken.1");
    }

    #[test]
    fn test_same_seed_same_plan() {
        assert_eq!(plan(42, 6, 40), plan(42, 6, 40));
    }

    #[test]
    fn test_no_users_means_no_tasks() {
        let plan = plan(5, 0, 10);
        assert!(plan.users.is_empty());
        assert!(plan.tasks.is_empty());
    }
}
