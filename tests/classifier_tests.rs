use chrono::{DateTime, TimeZone, Utc};
use roadmap_rs::core::{
    Issue, IssuePriority, IssueState, Quarter, classify, priority_rank, quarter_for,
};

fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn visible_quarters() -> Vec<Quarter> {
    vec![
        quarter_for(utc(2025, 7, 1)).expect("q3"),
        quarter_for(utc(2025, 10, 1)).expect("q4"),
    ]
}

fn open_issue(number: u64) -> Issue {
    Issue {
        id: format!("issue-{number}"),
        number,
        title: format!("Issue {number}"),
        state: IssueState::Open,
        points: None,
        closed_at: None,
        priority: None,
    }
}

fn closed_issue(number: u64, closed_at: DateTime<Utc>) -> Issue {
    Issue {
        state: IssueState::Closed,
        closed_at: Some(closed_at),
        ..open_issue(number)
    }
}

#[test]
fn map_is_seeded_with_visible_quarters_in_order() {
    let buckets = classify(&[], None, &visible_quarters(), utc(2025, 8, 15)).expect("classify");

    let keys: Vec<&String> = buckets.keys().collect();
    assert_eq!(keys, vec!["Q3 2025", "Q4 2025"]);
    assert!(buckets.values().all(|b| b.open.is_empty() && b.closed.is_empty()));
}

#[test]
fn closed_issue_buckets_by_closed_at_not_by_due_date() {
    let issues = vec![closed_issue(1, utc(2025, 7, 20))];
    let due_in_q4 = Some(utc(2025, 11, 15));

    let buckets =
        classify(&issues, due_in_q4, &visible_quarters(), utc(2025, 8, 15)).expect("classify");

    assert_eq!(buckets["Q3 2025"].closed.len(), 1);
    assert!(buckets["Q4 2025"].closed.is_empty());
}

#[test]
fn closed_issue_outside_visible_range_creates_its_quarter_key() {
    let issues = vec![closed_issue(1, utc(2025, 3, 10))];

    let buckets = classify(&issues, None, &visible_quarters(), utc(2025, 8, 15)).expect("classify");

    // Appended after the seeded keys, preserving insertion order.
    let keys: Vec<&String> = buckets.keys().collect();
    assert_eq!(keys, vec!["Q3 2025", "Q4 2025", "Q1 2025"]);
    assert_eq!(buckets["Q1 2025"].closed.len(), 1);
}

#[test]
fn closed_issue_without_closed_at_is_skipped() {
    let mut issue = open_issue(1);
    issue.state = IssueState::Closed;

    let buckets = classify(&[issue], None, &visible_quarters(), utc(2025, 8, 15)).expect("classify");
    assert!(buckets.values().all(|b| b.open.is_empty() && b.closed.is_empty()));
}

#[test]
fn open_issue_buckets_under_the_due_quarter() {
    let issues = vec![open_issue(1)];
    let due_in_q4 = Some(utc(2025, 11, 15));

    let buckets =
        classify(&issues, due_in_q4, &visible_quarters(), utc(2025, 8, 15)).expect("classify");

    assert_eq!(buckets["Q4 2025"].open.len(), 1);
    assert!(buckets["Q3 2025"].open.is_empty());
}

#[test]
fn open_issue_without_due_date_lands_in_the_current_quarter() {
    let issues = vec![open_issue(1)];

    let buckets = classify(&issues, None, &visible_quarters(), utc(2025, 8, 15)).expect("classify");
    assert_eq!(buckets["Q3 2025"].open.len(), 1);
}

#[test]
fn overdue_open_issue_relocates_to_the_current_quarter() {
    let issues = vec![open_issue(1)];
    let due_in_past = Some(utc(2025, 3, 31));

    let buckets =
        classify(&issues, due_in_past, &visible_quarters(), utc(2025, 8, 15)).expect("classify");

    assert_eq!(buckets["Q3 2025"].open.len(), 1);
    assert!(!buckets.contains_key("Q1 2025"));
}

#[test]
fn overdue_issue_is_dropped_when_the_current_quarter_is_not_visible() {
    let past_quarters = vec![
        quarter_for(utc(2025, 1, 15)).expect("q1"),
        quarter_for(utc(2025, 4, 15)).expect("q2"),
    ];
    let issues = vec![open_issue(1)];
    let due_in_past = Some(utc(2025, 3, 31));

    let buckets = classify(&issues, due_in_past, &past_quarters, utc(2025, 8, 15)).expect("classify");

    assert!(buckets.values().all(|b| b.open.is_empty()));
    assert!(!buckets.contains_key("Q3 2025"));
}

#[test]
fn buckets_sort_by_priority_then_points_then_number() {
    let mut low = open_issue(1);
    low.priority = Some(IssuePriority {
        name: "Low".to_owned(),
    });
    low.points = Some(10);

    let mut critical = open_issue(2);
    critical.priority = Some(IssuePriority {
        name: "P1 - Critical".to_owned(),
    });
    critical.points = Some(1);

    let unprioritized_default_points = open_issue(3);
    let mut unprioritized = open_issue(4);
    unprioritized.points = Some(3);

    let issues = vec![low, critical, unprioritized_default_points, unprioritized];
    let buckets = classify(&issues, None, &visible_quarters(), utc(2025, 8, 15)).expect("classify");

    let order: Vec<u64> = buckets["Q3 2025"].open.iter().map(|i| i.number).collect();
    // critical (rank 1), low (rank 4), then rank-5 ties on points=3 broken by number desc
    assert_eq!(order, vec![2, 1, 4, 3]);
}

#[test]
fn priority_rank_matches_case_insensitive_substrings() {
    let rank_of = |name: &str| {
        priority_rank(Some(&IssuePriority {
            name: name.to_owned(),
        }))
    };

    assert_eq!(rank_of("CRITICAL"), 1);
    assert_eq!(rank_of("severity::high"), 2);
    assert_eq!(rank_of("Medium"), 3);
    assert_eq!(rank_of("kinda low"), 4);
    assert_eq!(rank_of("urgent"), 5);
    assert_eq!(priority_rank(None), 5);
}
