use common::{MemoryGateway, PostRecord, TrendingConfig};
use time::macros::datetime;
use time::Duration;
use trending::{build_report, Period, RankedEntry, TrendingService};

#[test]
fn meetup_and_dubai_rank_for_today() {
    let now = datetime!(2026-10-19 20:00 UTC);
    let posts = vec![
        PostRecord::new("p1", "Great day at the #meetup in #Dubai", now - Duration::hours(3)).with_counts(3, 2),
        PostRecord::new("p2", "Another #meetup pic", now - Duration::hours(1)).with_counts(10, 1),
    ];

    let report = build_report(&posts, now, &TrendingConfig::default());

    assert_eq!(
        report.today,
        vec![
            RankedEntry::new("#meetup", 2, 16),
            RankedEntry::new("#dubai", 1, 5),
        ]
    );
    assert_eq!(report.week, report.today);
    assert_eq!(report.month, report.today);
}

#[test]
fn week_boundary_post_is_included() {
    let now = datetime!(2026-10-19 20:00 UTC);
    let boundary = Period::Week.start(now, time::UtcOffset::UTC);
    let posts = vec![PostRecord::new("p1", "#classiccars", boundary).with_counts(4, 0)];

    let report = build_report(&posts, now, &TrendingConfig::default());

    assert!(report.today.is_empty());
    assert_eq!(report.week, vec![RankedEntry::new("#classiccars", 1, 4)]);
}

#[test]
fn each_period_keeps_at_most_top_n() {
    let now = datetime!(2026-10-19 20:00 UTC);
    let posts: Vec<PostRecord> = (0..8)
        .map(|i| {
            PostRecord::new(format!("p{}", i), format!("#tag{}", i), now - Duration::minutes(i))
                .with_counts(i * 10, 0)
        })
        .collect();

    let report = build_report(&posts, now, &TrendingConfig::default());

    let tags: Vec<&str> = report.today.iter().map(|e| e.tag.as_str()).collect();
    assert_eq!(tags, vec!["#tag7", "#tag6", "#tag5", "#tag4", "#tag3"]);
}

#[tokio::test]
async fn service_reads_through_gateway() {
    let now = time::OffsetDateTime::now_utc();
    let gateway = MemoryGateway::new();
    gateway.push_post(PostRecord::new("p1", "Weekend #drift session", now).with_counts(7, 3));
    let mut silent = PostRecord::new("p2", "#hidden", now);
    silent.body = None;
    gateway.push_post(silent);

    let service = TrendingService::new(gateway, TrendingConfig::default());
    let report = service.snapshot(now).await;

    assert_eq!(report.today, vec![RankedEntry::new("#drift", 1, 10)]);
}

#[tokio::test]
async fn empty_backend_reports_no_trends() {
    let service = TrendingService::new(MemoryGateway::new(), TrendingConfig::default());
    let report = service.snapshot(time::OffsetDateTime::now_utc()).await;
    assert!(report.is_empty());
}
