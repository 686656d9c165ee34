//! Diesel adapters against a real PostgreSQL database.
//!
//! These cover the behaviour the in-memory store can only imitate: the
//! unique indexes and conditional writes that settle concurrent requests.

#[path = "support/pg_embed.rs"]
mod pg_embed;

use backend::domain::ports::{
    AchievementRepository, CheckInRepository, DailyTaskRepository, NewRoadmap,
    ProfileRepository, RoadmapProgressRepository, RoadmapRepository, UserStatsRepository,
};
use backend::domain::{
    ACHIEVEMENT_RULES, CalendarDay, CareerProfile, CheckInAnnotation, CheckInEntry, CheckInUpsert,
    Mood, NewAchievement, NewDailyTask, RoadmapDocument, RoadmapItemType, TaskText, Timeline,
    UserId, UserProfile, UserStats,
};
use backend::outbound::persistence::{
    DbPool, DieselAchievementRepository, DieselCheckInRepository, DieselDailyTaskRepository,
    DieselProfileRepository, DieselRoadmapProgressRepository, DieselRoadmapRepository,
    DieselUserStatsRepository, PoolConfig,
};
use chrono::{DateTime, TimeZone, Utc};
use pg_embed::{handle_cluster_setup_failure, migrated_database};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

struct TestContext {
    runtime: Runtime,
    pool: DbPool,
    user_id: UserId,
    _database: TemporaryDatabase,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let database = migrated_database(&runtime)?;
    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(database.url()).with_max_size(2)))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        pool,
        user_id: UserId::random(),
        _database: database,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn day(raw: &str) -> CalendarDay {
    CalendarDay::parse(raw).expect("valid date")
}

/// PostgreSQL keeps microseconds, so fixtures use whole seconds.
fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0)
        .single()
        .expect("valid instant")
}

fn entry(mood: i64, content: &str) -> CheckInEntry {
    CheckInEntry {
        mood: Mood::new(mood).expect("valid mood"),
        content: content.to_owned(),
        challenges: String::new(),
    }
}

#[rstest]
fn same_day_upserts_collapse_to_one_row(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: same_day_upserts_collapse_to_one_row skipped");
        return;
    };
    let repo = DieselCheckInRepository::new(context.pool.clone());
    let user_id = context.user_id;

    context.runtime.block_on(async {
        let first = repo
            .upsert_for_day(&CheckInUpsert {
                user_id,
                check_in_date: day("2026-03-02"),
                created_at: at(9, 0),
                entry: entry(4, "morning draft"),
            })
            .await
            .expect("first upsert");
        let second = repo
            .upsert_for_day(&CheckInUpsert {
                user_id,
                check_in_date: day("2026-03-02"),
                created_at: at(21, 30),
                entry: entry(8, "evening rewrite"),
            })
            .await
            .expect("second upsert");

        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, at(9, 0));
        assert_eq!(second.entry, entry(8, "evening rewrite"));
        assert_eq!(repo.count_for_user(&user_id).await.expect("count"), 1);
    });
}

#[rstest]
fn annotation_round_trips_through_jsonb(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: annotation_round_trips_through_jsonb skipped");
        return;
    };
    let repo = DieselCheckInRepository::new(context.pool.clone());
    let user_id = context.user_id;

    context.runtime.block_on(async {
        let stored = repo
            .upsert_for_day(&CheckInUpsert {
                user_id,
                check_in_date: day("2026-03-02"),
                created_at: at(9, 0),
                entry: entry(6, "shipped the parser"),
            })
            .await
            .expect("upsert");
        let annotation = CheckInAnnotation {
            summary: "Steady progress".into(),
            suggestions: vec!["Write tests".into(), "Rest".into()],
            mood_insight: None,
        };

        repo.set_annotation(stored.id, &annotation)
            .await
            .expect("annotate");
        let found = repo
            .find_by_id(stored.id)
            .await
            .expect("find")
            .expect("row exists");

        assert_eq!(found.annotation, Some(annotation));
        assert_eq!(found.entry, stored.entry);
    });
}

#[rstest]
fn stats_writes_are_conditional(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: stats_writes_are_conditional skipped");
        return;
    };
    let repo = DieselUserStatsRepository::new(context.pool.clone());
    let user_id = context.user_id;

    context.runtime.block_on(async {
        let initial = UserStats::first(user_id, day("2026-03-01"));
        assert!(repo.insert_if_absent(&initial).await.expect("first insert"));
        assert!(!repo.insert_if_absent(&initial).await.expect("second insert"));

        let (next, _) = UserStats::advance(Some(&initial), user_id, day("2026-03-02"));
        let stale = UserStats {
            current_streak: 5,
            longest_streak: 5,
            ..initial
        };
        assert!(!repo.compare_and_set(&stale, &next).await.expect("stale cas"));
        assert_eq!(repo.find(&user_id).await.expect("find"), Some(initial));

        assert!(repo.compare_and_set(&initial, &next).await.expect("fresh cas"));
        assert!(!repo.compare_and_set(&initial, &next).await.expect("replayed cas"));
        assert_eq!(repo.find(&user_id).await.expect("find"), Some(next));
    });
}

#[rstest]
fn achievements_unlock_once(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: achievements_unlock_once skipped");
        return;
    };
    let repo = DieselAchievementRepository::new(context.pool.clone());
    let user_id = context.user_id;
    let rule = ACHIEVEMENT_RULES.first().expect("at least one rule");

    context.runtime.block_on(async {
        let first = repo
            .insert_if_absent(&NewAchievement::from_rule(user_id, rule, at(9, 0)))
            .await
            .expect("first insert");
        let second = repo
            .insert_if_absent(&NewAchievement::from_rule(user_id, rule, at(10, 0)))
            .await
            .expect("second insert");

        let stored = first.expect("first writer wins");
        assert_eq!(stored.achievement_key, rule.key);
        assert_eq!(stored.unlocked_at, at(9, 0));
        assert!(second.is_none());

        let listed = repo.list_for_user(&user_id).await.expect("list");
        assert_eq!(listed, vec![stored]);
    });
}

#[rstest]
fn toggling_twice_clears_the_flag(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: toggling_twice_clears_the_flag skipped");
        return;
    };
    let repo = DieselRoadmapProgressRepository::new(context.pool.clone());
    let user_id = context.user_id;

    context.runtime.block_on(async {
        let on = repo
            .toggle(&user_id, RoadmapItemType::Skill, "Rust")
            .await
            .expect("first toggle");
        let off = repo
            .toggle(&user_id, RoadmapItemType::Skill, "Rust")
            .await
            .expect("second toggle");

        assert!(on.completed);
        assert!(!off.completed);
        assert_eq!(off.id, on.id);

        let other = repo
            .toggle(&user_id, RoadmapItemType::Project, "Rust")
            .await
            .expect("other section");
        assert_ne!(other.id, on.id);
        assert_eq!(repo.list_for_user(&user_id).await.expect("list").len(), 2);
    });
}

#[rstest]
fn latest_roadmap_keeps_timeline_order(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: latest_roadmap_keeps_timeline_order skipped");
        return;
    };
    let repo = DieselRoadmapRepository::new(context.pool.clone());
    let user_id = context.user_id;
    let document = |skill: &str| RoadmapDocument {
        skills_to_learn: vec![skill.to_owned()],
        timeline: Timeline::new(vec![
            ("Month 2".into(), vec!["Ship".into()]),
            ("Month 1".into(), vec!["Plan".into()]),
        ]),
        ..RoadmapDocument::default()
    };

    context.runtime.block_on(async {
        for (hour, skill) in [(9, "Rust"), (10, "Go")] {
            repo.insert(&NewRoadmap {
                user_id,
                created_at: at(hour, 0),
                document: document(skill),
            })
            .await
            .expect("insert roadmap");
        }

        let latest = repo
            .latest_for_user(&user_id)
            .await
            .expect("latest")
            .expect("roadmap exists");
        assert_eq!(latest.document, document("Go"));
        assert_eq!(repo.count_for_user(&user_id).await.expect("count"), 2);
    });
}

#[rstest]
fn daily_tasks_keep_insert_order_and_flip_done(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: daily_tasks_keep_insert_order_and_flip_done skipped");
        return;
    };
    let repo = DieselDailyTaskRepository::new(context.pool.clone());
    let user_id = context.user_id;
    let today = day("2026-03-02");
    let tasks: Vec<NewDailyTask> = ["Read a chapter", "Build the CLI", "Stretch"]
        .into_iter()
        .map(|text| NewDailyTask {
            user_id,
            task_text: TaskText::new(text).expect("valid task"),
            task_date: today,
            created_at: at(8, 0),
        })
        .collect();

    context.runtime.block_on(async {
        let inserted = repo.insert_many(&tasks).await.expect("insert");
        let texts: Vec<_> = inserted.iter().map(|t| t.task_text.as_str()).collect();
        assert_eq!(texts, ["Read a chapter", "Build the CLI", "Stretch"]);
        assert_eq!(repo.list_for_day(&user_id, today).await.expect("list"), inserted);

        let done = repo
            .set_done(inserted[1].id, true)
            .await
            .expect("set done")
            .expect("task exists");
        assert!(done.done);
        assert!(
            repo.set_done(uuid::Uuid::new_v4(), true)
                .await
                .expect("missing task")
                .is_none()
        );
    });
}

#[rstest]
fn profile_upsert_overwrites(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: profile_upsert_overwrites skipped");
        return;
    };
    let repo = DieselProfileRepository::new(context.pool.clone());
    let user_id = context.user_id;

    context.runtime.block_on(async {
        assert!(repo.find(&user_id).await.expect("find").is_none());
        for (current, target) in [("Analyst", "Engineer"), ("Engineer", "Staff Engineer")] {
            repo.upsert(&UserProfile {
                user_id,
                profile: CareerProfile::new(current, target),
            })
            .await
            .expect("upsert");
        }

        let stored = repo.find(&user_id).await.expect("find").expect("profile");
        assert_eq!(stored.profile, CareerProfile::new("Engineer", "Staff Engineer"));
    });
}
