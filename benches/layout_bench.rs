use chrono::{TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use roadmap_rs::core::{
    FixedClock, Issue, IssueState, Milestone, MilestoneState, PlanningWindow, TimelineScale, pack,
};
use roadmap_rs::{RoadmapEngine, RoadmapEngineConfig};
use std::hint::black_box;

const DAY_MS: i64 = 86_400_000;

fn issues(count: u64) -> Vec<Issue> {
    (0..count)
        .map(|number| Issue {
            id: format!("issue-{number}"),
            number,
            title: format!("Issue {number}"),
            state: IssueState::Open,
            points: Some((number % 13) as u32),
            closed_at: None,
            priority: None,
        })
        .collect()
}

fn bench_pack_1k(c: &mut Criterion) {
    let scale = TimelineScale {
        start_ms: Utc
            .with_ymd_and_hms(2025, 7, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp")
            .timestamp_millis(),
        total_days: 184,
    };
    let window = PlanningWindow::new(scale.start_ms, scale.start_ms + 92 * DAY_MS);
    let bucket = issues(1_000);

    c.bench_function("pack_1k_issues", |b| {
        b.iter(|| {
            let _ = pack(black_box(&bucket), black_box(window), black_box(scale));
        })
    });
}

fn bench_snapshot_50_rows(c: &mut Criterion) {
    let now = Utc
        .with_ymd_and_hms(2025, 8, 15, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let mut engine =
        RoadmapEngine::new(FixedClock::new(now), RoadmapEngineConfig::new()).expect("engine init");

    let milestones: Vec<Milestone> = (0..50)
        .map(|index| Milestone {
            id: format!("m{index}"),
            title: format!("{}.{}.0", index / 10 + 1, index % 10),
            due_on: None,
            open_issue_count: 40,
            closed_issue_count: 0,
            state: MilestoneState::Open,
        })
        .collect();
    let ids: Vec<String> = milestones.iter().map(|m| m.id.clone()).collect();

    engine.set_milestones(milestones).expect("set milestones");
    for id in &ids {
        engine.set_issues(id, issues(40));
    }

    c.bench_function("snapshot_50_rows", |b| {
        b.iter(|| {
            let snapshot = engine.snapshot().expect("snapshot");
            let _ = black_box(snapshot.to_json().expect("snapshot json"));
        })
    });
}

criterion_group!(benches, bench_pack_1k, bench_snapshot_50_rows);
criterion_main!(benches);
