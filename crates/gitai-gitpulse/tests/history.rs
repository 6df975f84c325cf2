use chrono::{DateTime, TimeZone, Utc};
use gitai_gitpulse::language::detect_language;
use gitai_gitpulse::patterns::top_patterns;
use gitai_gitpulse::report::{format_stats_report, insights};
use gitai_gitpulse::stats::commit_type_and_scope;
use gitai_gitpulse::HistoryAnalyzer;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()
}

#[test]
fn subject_language_tags() {
    assert_eq!(detect_language("feat: 添加用户认证功能"), "zh");
    assert_eq!(detect_language("feat: add auth"), "en");

    let stats = HistoryAnalyzer::new(now()).analyze([
        "h1|li|feat: 添加用户认证功能||2024-03-30 09:00:00 +0800",
        "h2|bob|feat: add auth||2024-03-30 10:00:00 +0000",
    ]);
    assert_eq!(stats.language_usage["zh"], 1);
    assert_eq!(stats.language_usage["en"], 1);
    assert_eq!(stats.common_verbs.len(), 1);
}

#[test]
fn forty_of_hundred_commits_have_scope() {
    let lines: Vec<String> = (0..100)
        .map(|i| {
            let subject = if i % 5 < 2 {
                format!("fix(mod{}): handle case {i}", i % 3)
            } else {
                format!("chore: tidy {i}")
            };
            format!("{i:040x}|dev{}|{subject}||2024-03-{:02} 12:00:00 +0000", i % 4, 1 + i % 28)
        })
        .collect();

    let stats = HistoryAnalyzer::new(now()).analyze(&lines);
    assert_eq!(stats.total_commits, 100);
    assert_eq!(stats.with_scope, 40);
    assert_eq!(stats.scope_distribution.values().sum::<usize>(), 40);
    assert_eq!(stats.type_distribution["fix"], 40);
    assert_eq!(stats.type_distribution["chore"], 60);
    assert_eq!(stats.author_stats.len(), 4);
}

#[test]
fn empty_body_line_counts_commit_and_hour() {
    let stats =
        HistoryAnalyzer::new(now()).analyze(["h1|alice|feat: add x||2024-01-01 10:00:00 +0000"]);
    assert_eq!(stats.total_commits, 1);
    assert_eq!(stats.with_body, 0);
    assert_eq!(stats.time_distribution["10:00"], 1);
}

#[test]
fn type_and_scope_round_trip() {
    let subjects = [
        ("feat(auth): add login", "feat", Some("auth")),
        ("fix(api/v2): handle 404", "fix", Some("api/v2")),
        ("docs: update readme", "docs", None),
        ("perf(db-pool): reuse connections", "perf", Some("db-pool")),
    ];
    for (subject, want_type, want_scope) in subjects {
        let first = commit_type_and_scope(subject);
        let second = commit_type_and_scope(subject);
        assert_eq!(first, second);

        let (commit_type, scope) = first.unwrap();
        assert_eq!(commit_type, want_type);
        assert_eq!(scope, want_scope);
        assert!(subject.starts_with(commit_type));
        if let Some(scope) = scope {
            assert!(subject.contains(&format!("({scope})")));
        }
    }
}

#[test]
fn undated_and_malformed_lines() {
    let text = "\
a|x|feat: one|body text|2024-03-31 08:00:00 +0000
b|y|fix: two||not-a-date
too|few|fields
c|x|chore: three||2024-03-20 08:00:00 +0000";
    let stats = HistoryAnalyzer::new(now()).analyze(text.lines());
    assert_eq!(stats.total_commits, 3);
    assert_eq!(stats.with_body, 1);
    assert_eq!(stats.time_distribution.values().sum::<usize>(), 2);

    let trends = stats.recent_trends.as_ref().unwrap();
    assert_eq!(trends.last_30_days, 2);
    assert_eq!(trends.last_7_days, 1);
}

#[test]
fn end_to_end_report() {
    let lines = [
        "1|alice|feat(ui): add dark mode [UI-12]|Longer explanation|2024-03-29 09:00:00 +0000",
        "2|bob|fix(ui): correct contrast|Details|2024-03-29 11:00:00 +0000",
        "3|alice|docs: describe theming||2024-03-30 15:00:00 +0000",
        "4|carol|refactor(core): split renderer||2024-03-31 16:00:00 +0000",
    ];
    let stats = HistoryAnalyzer::new(now()).analyze(lines);
    assert_eq!(stats.with_ticket, 1);

    let patterns = top_patterns(&stats, 3);
    assert_eq!(patterns.len(), 3);
    assert!(patterns.iter().all(|p| p.scope.as_deref() == Some("ui")));

    let report = format_stats_report(&stats);
    assert!(report.contains("Total Commits: 4"));
    assert!(report.contains("Top Contributors\n  alice"));

    let kinds: Vec<_> = insights(&stats).into_iter().map(|i| i.kind).collect();
    assert!(!kinds.is_empty());
}
