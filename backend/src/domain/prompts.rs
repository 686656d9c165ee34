//! Prompt construction for the completion service.
//!
//! Each builder returns a [`CompletionRequest`] whose system message demands
//! bare JSON and whose user message describes the exact object shape the
//! matching payload type in [`crate::domain::completion`] expects.

use std::fmt::Write as _;

use crate::domain::ports::CompletionRequest;
use crate::domain::{CheckIn, CheckInEntry, RoadmapDocument};

const JSON_ONLY: &str = "Produce clean JSON only. No backticks.";

fn json_text<T: serde::Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_owned())
}

/// Prompt for annotating one check-in.
pub fn annotation_prompt(entry: &CheckInEntry) -> CompletionRequest {
    let user = format!(
        "The user logged a daily check-in.\n\n\
         Mood: {mood}\n\
         Work done: {content}\n\
         Challenges: {challenges}\n\n\
         Give me a JSON object with:\n\
         {{\n  \"summary\": \"Short summary of their day\",\n  \
         \"suggestions\": [\"3-4 concrete tasks for tomorrow\"],\n  \
         \"moodInsight\": \"1-2 sentences about mood or emotional pattern\"\n}}",
        mood = entry.mood.value(),
        content = entry.content,
        challenges = entry.challenges,
    );
    CompletionRequest::new(JSON_ONLY, user)
}

/// Prompt for a roadmap between two roles.
pub fn roadmap_prompt(current_role: &str, target_role: &str) -> CompletionRequest {
    let user = format!(
        "Create a career roadmap for someone currently working as \"{current_role}\" \
         who wants to become \"{target_role}\".\n\
         The output MUST be valid JSON with these fields:\n\
         {{\n  \"skillsToLearn\": [...],\n  \"projectsToBuild\": [...],\n  \
         \"certifications\": [...],\n  \"timeline\": {{\n    \"month1\": [...],\n    \
         \"month2\": [...],\n    \"month3\": [...]\n  }}\n}}"
    );
    CompletionRequest::new(
        "You generate structured career roadmaps in clean JSON. No backticks.",
        user,
    )
}

fn describe_check_in(out: &mut String, check_in: &CheckIn) {
    let _ = writeln!(
        out,
        "- {day}: mood {mood}/10; work: {content}; challenges: {challenges}",
        day = check_in.check_in_date,
        mood = check_in.entry.mood.value(),
        content = check_in.entry.content,
        challenges = check_in.entry.challenges,
    );
}

/// Prompt for weekly insights over `check_ins` (oldest first).
pub fn weekly_insights_prompt(check_ins: &[CheckIn]) -> CompletionRequest {
    let mut user = String::from("Here are a user's check-ins for the past 7 days:\n\n");
    for check_in in check_ins {
        describe_check_in(&mut user, check_in);
    }
    user.push_str(
        "\nCreate a JSON object with the following:\n\n\
         {\n  \"weeklySummary\": \"A helpful summary of their week\",\n  \
         \"moodAnalysis\": \"Explain mood patterns\",\n  \
         \"progressAchievements\": [\"List of things they improved\"],\n  \
         \"recurringChallenges\": [\"List of repeated problems\"],\n  \
         \"nextWeekRecommendations\": [\"3-5 clear action items\"]\n}\n\n\
         Output *only* JSON.",
    );
    CompletionRequest::new(JSON_ONLY, user)
}

/// Prompt for generating today's tasks.
pub fn today_tasks_prompt(
    latest: Option<&CheckIn>,
    roadmap: Option<&RoadmapDocument>,
    yesterday: &[String],
) -> CompletionRequest {
    let mut user = String::from("You are generating today's tasks for this user.\n\nTheir latest check-in:\n");
    match latest {
        Some(check_in) => describe_check_in(&mut user, check_in),
        None => user.push_str("(none yet)\n"),
    }

    let empty = RoadmapDocument::default();
    let roadmap = roadmap.unwrap_or(&empty);
    let _ = write!(
        user,
        "\nTheir roadmap goals:\nSkills:\n{skills}\n\nProjects:\n{projects}\n\n\
         Certifications:\n{certs}\n\nTimeline:\n{timeline}\n\n\
         Yesterday's tasks:\n{yesterday}\n\n",
        skills = json_text(&roadmap.skills_to_learn, "[]"),
        projects = json_text(&roadmap.projects_to_build, "[]"),
        certs = json_text(&roadmap.certifications, "[]"),
        timeline = json_text(&roadmap.timeline, "{}"),
        yesterday = json_text(yesterday, "[]"),
    );
    user.push_str(
        "You MUST produce 3-6 tasks that:\n\
         - push them forward in their roadmap\n\
         - break roadmap items into small, doable steps\n\
         - incorporate check-in challenges\n\
         - consider their mood patterns\n\
         - avoid repeating yesterday's tasks\n\n\
         Respond ONLY with JSON:\n{\n  \"tasks\": [\"task1\", \"task2\", ...]\n}",
    );
    CompletionRequest::new(JSON_ONLY, user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CalendarDay, Mood, Timeline, UserId};
    use chrono::Utc;
    use uuid::Uuid;

    fn entry() -> CheckInEntry {
        CheckInEntry {
            mood: Mood::new(6).expect("valid mood"),
            content: "Paired on the billing bug".into(),
            challenges: "Context switching".into(),
        }
    }

    #[test]
    fn annotation_prompt_embeds_entry_fields() {
        let request = annotation_prompt(&entry());
        assert!(request.user.contains("Mood: 6"));
        assert!(request.user.contains("Paired on the billing bug"));
        assert!(request.user.contains("\"moodInsight\""));
        assert!(request.system.contains("JSON"));
    }

    #[test]
    fn today_tasks_prompt_lists_yesterday_and_roadmap() {
        let check_in = CheckIn {
            id: Uuid::new_v4(),
            user_id: UserId::random(),
            check_in_date: CalendarDay::parse("2026-04-02").expect("valid date"),
            created_at: Utc::now(),
            entry: entry(),
            annotation: None,
        };
        let roadmap = RoadmapDocument {
            skills_to_learn: vec!["Kubernetes".into()],
            timeline: Timeline::new(vec![("month1".into(), vec!["CKA prep".into()])]),
            ..RoadmapDocument::default()
        };
        let request = today_tasks_prompt(
            Some(&check_in),
            Some(&roadmap),
            &["Read chapter 2".to_owned()],
        );
        assert!(request.user.contains("2026-04-02"));
        assert!(request.user.contains("Kubernetes"));
        assert!(request.user.contains("CKA prep"));
        assert!(request.user.contains("Read chapter 2"));
        assert!(request.user.contains("avoid repeating yesterday's tasks"));
    }

    #[test]
    fn roadmap_prompt_names_both_roles() {
        let request = roadmap_prompt("Support engineer", "Backend developer");
        assert!(request.user.contains("\"Support engineer\""));
        assert!(request.user.contains("\"Backend developer\""));
    }
}
