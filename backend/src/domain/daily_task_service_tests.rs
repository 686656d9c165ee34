//! Tests for the daily task service.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    DailyTaskRepositoryError, MockCheckInRepository, MockDailyTaskRepository,
    MockRoadmapRepository, MockTextCompletion,
};
use crate::domain::{ErrorCode, Roadmap, RoadmapDocument};

type Service = DailyTaskService<MockDailyTaskRepository, MockCheckInRepository, MockRoadmapRepository>;

struct Mocks {
    tasks: MockDailyTaskRepository,
    check_ins: MockCheckInRepository,
    roadmaps: MockRoadmapRepository,
    completion: MockTextCompletion,
}

impl Mocks {
    fn new() -> Self {
        Self {
            tasks: MockDailyTaskRepository::new(),
            check_ins: MockCheckInRepository::new(),
            roadmaps: MockRoadmapRepository::new(),
            completion: MockTextCompletion::new(),
        }
    }

    fn into_service(self) -> Service {
        let clock = crate::test_support::MutableClock::new(
            Utc.with_ymd_and_hms(2026, 9, 2, 7, 15, 0).unwrap(),
        );
        DailyTaskService::new(
            DailyTaskRepositories {
                tasks: Arc::new(self.tasks),
                check_ins: Arc::new(self.check_ins),
                roadmaps: Arc::new(self.roadmaps),
            },
            Arc::new(self.completion),
            Arc::new(clock),
        )
    }
}

#[fixture]
fn user() -> UserId {
    UserId::random()
}

fn echo_insert(tasks: &[NewDailyTask]) -> Result<Vec<DailyTask>, DailyTaskRepositoryError> {
    Ok(tasks
        .iter()
        .map(|task| DailyTask {
            id: Uuid::new_v4(),
            user_id: task.user_id,
            task_text: task.task_text.as_str().to_owned(),
            task_date: task.task_date,
            done: false,
            created_at: task.created_at,
        })
        .collect())
}

fn task(user: UserId, text: &str, day: &str) -> DailyTask {
    DailyTask {
        id: Uuid::new_v4(),
        user_id: user,
        task_text: text.into(),
        task_date: CalendarDay::parse(day).expect("valid date"),
        done: false,
        created_at: Utc::now(),
    }
}

#[rstest]
#[tokio::test]
async fn list_defaults_to_today(user: UserId) {
    let mut mocks = Mocks::new();
    mocks
        .tasks
        .expect_list_for_day()
        .withf(|_, day| day.to_string() == "2026-09-02")
        .return_once(|_, _| Ok(Vec::new()));

    let tasks = mocks
        .into_service()
        .list(&user, None)
        .await
        .expect("list succeeds");

    assert!(tasks.is_empty());
}

#[rstest]
#[tokio::test]
async fn add_stores_a_single_task(user: UserId) {
    let mut mocks = Mocks::new();
    mocks
        .tasks
        .expect_insert_many()
        .withf(|tasks| tasks.len() == 1 && tasks[0].task_text.as_str() == "Write the RFC")
        .returning(echo_insert);
    let day = CalendarDay::parse("2026-09-03").expect("valid date");

    let stored = mocks
        .into_service()
        .add(&user, day, TaskText::new("  Write the RFC ").expect("valid text"))
        .await
        .expect("add succeeds");

    assert_eq!(stored.task_date, day);
    assert!(!stored.done);
}

#[rstest]
#[case::missing(None, ErrorCode::NotFound)]
#[case::foreign(Some(UserId::random()), ErrorCode::Forbidden)]
#[tokio::test]
async fn set_done_requires_an_owned_task(
    user: UserId,
    #[case] owner: Option<UserId>,
    #[case] expected: ErrorCode,
) {
    let mut mocks = Mocks::new();
    let found = owner.map(|owner| task(owner, "Read a chapter", "2026-09-02"));
    mocks.tasks.expect_find_by_id().return_once(move |_| Ok(found));
    mocks.tasks.expect_set_done().times(0);

    let err = mocks
        .into_service()
        .set_done(&user, Uuid::new_v4(), true)
        .await
        .expect_err("must fail");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn generated_tasks_use_context_and_skip_blanks(user: UserId) {
    let mut mocks = Mocks::new();
    mocks
        .check_ins
        .expect_latest_for_user()
        .return_once(|_| Ok(None));
    mocks.roadmaps.expect_latest_for_user().return_once(move |_| {
        Ok(Some(Roadmap {
            id: Uuid::new_v4(),
            user_id: user,
            created_at: Utc::now(),
            document: RoadmapDocument {
                skills_to_learn: vec!["Kubernetes".into()],
                ..RoadmapDocument::default()
            },
        }))
    });
    let yesterday = vec![task(user, "Install minikube", "2026-09-01")];
    mocks
        .tasks
        .expect_list_for_day()
        .withf(|_, day| day.to_string() == "2026-09-01")
        .return_once(move |_, _| Ok(yesterday));
    mocks
        .completion
        .expect_complete()
        .withf(|request| {
            request.user.contains("Kubernetes") && request.user.contains("Install minikube")
        })
        .return_once(|_| {
            Ok("```json\n{\"tasks\": [\"Deploy a pod\", \"  \", \"Learn about services\"]}\n```".to_owned())
        });
    mocks
        .tasks
        .expect_insert_many()
        .withf(|tasks| tasks.iter().all(|t| t.task_date.to_string() == "2026-09-02"))
        .returning(echo_insert);

    let stored = mocks
        .into_service()
        .generate_today(&user)
        .await
        .expect("generation succeeds");

    let texts: Vec<_> = stored.iter().map(|t| t.task_text.as_str()).collect();
    assert_eq!(texts, ["Deploy a pod", "Learn about services"]);
    assert!(stored[1].is_roadmap_related());
}

#[rstest]
#[tokio::test]
async fn generated_tasks_are_capped(user: UserId) {
    let mut mocks = Mocks::new();
    mocks
        .check_ins
        .expect_latest_for_user()
        .return_once(|_| Ok(None));
    mocks.roadmaps.expect_latest_for_user().return_once(|_| Ok(None));
    mocks
        .tasks
        .expect_list_for_day()
        .return_once(|_, _| Ok(Vec::new()));
    mocks.completion.expect_complete().return_once(|_| {
        let tasks: Vec<String> = (1..=9).map(|n| format!("Task {n}")).collect();
        Ok(serde_json::json!({ "tasks": tasks }).to_string())
    });
    mocks
        .tasks
        .expect_insert_many()
        .withf(|tasks| tasks.len() == MAX_GENERATED_TASKS)
        .returning(echo_insert);

    let stored = mocks
        .into_service()
        .generate_today(&user)
        .await
        .expect("generation succeeds");

    assert_eq!(stored.len(), MAX_GENERATED_TASKS);
    assert_eq!(stored[0].task_text, "Task 1");
    assert_eq!(stored[5].task_text, "Task 6");
}

#[rstest]
#[tokio::test]
async fn all_blank_tasks_are_a_parse_failure(user: UserId) {
    let mut mocks = Mocks::new();
    mocks
        .check_ins
        .expect_latest_for_user()
        .return_once(|_| Ok(None));
    mocks.roadmaps.expect_latest_for_user().return_once(|_| Ok(None));
    mocks
        .tasks
        .expect_list_for_day()
        .return_once(|_, _| Ok(Vec::new()));
    mocks
        .completion
        .expect_complete()
        .return_once(|_| Ok("{\"tasks\": [\"\", \" \"]}".to_owned()));
    mocks.tasks.expect_insert_many().times(0);

    let err = mocks
        .into_service()
        .generate_today(&user)
        .await
        .expect_err("parse failure");

    assert_eq!(err.code(), ErrorCode::CompletionParseFailure);
}
