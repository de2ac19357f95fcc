use fail2ban_analyzer::commands::{execute_analyze, AnalyzeArgs, PROCESSING_FAILURE};
use fail2ban_analyzer::output::read_report;
use fail2ban_analyzer::utils::error::IntakeError;
use std::path::Path;

const LOG: &str = "\
2024-01-01 10:00:00 fail2ban.actions [1234]: NOTICE [sshd] Ban 192.168.1.10
2024-01-01 10:05:00 fail2ban.actions [1234]: NOTICE [sshd] Ban 192.168.1.10
2024-01-01 10:10:00 fail2ban.actions [1234]: NOTICE [sshd] Ban 10.0.0.5
";

fn args_for(dir: &Path, log_name: &str) -> AnalyzeArgs {
    AnalyzeArgs {
        log_path: dir.join(log_name),
        output_json: Some(dir.join("out/report.json")),
        chart_dir: Some(dir.join("graphs")),
        ..Default::default()
    }
}

#[test]
fn test_analyze_writes_report_and_chart() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("fail2ban.log"), LOG).unwrap();
    let args = args_for(temp_dir.path(), "fail2ban.log");

    let report = execute_analyze(&args).unwrap();

    assert_eq!(report.graph_url, "/graphs/graph.svg");
    assert_eq!(report.total_bans, 3);
    assert!(temp_dir.path().join("graphs/graph.svg").exists());

    let loaded = read_report(temp_dir.path().join("out/report.json")).unwrap();
    assert_eq!(loaded.counts, report.counts);
    assert_eq!(loaded.source, "fail2ban.log");
}

#[test]
fn test_analyze_empty_log_has_no_chart() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("empty.log"), "").unwrap();
    let args = args_for(temp_dir.path(), "empty.log");

    let report = execute_analyze(&args).unwrap();

    assert!(report.counts.is_empty());
    assert_eq!(report.graph_url, "");
    assert!(!temp_dir.path().join("graphs/graph.svg").exists());
}

#[test]
fn test_analyze_rejects_oversized_log() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("fail2ban.log"), LOG).unwrap();
    let args = AnalyzeArgs {
        max_bytes: 10,
        ..args_for(temp_dir.path(), "fail2ban.log")
    };

    let err = execute_analyze(&args).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<IntakeError>(),
        Some(IntakeError::TooLarge { limit: 10, .. })
    ));
}

#[test]
fn test_analyze_missing_log() {
    let temp_dir = tempfile::tempdir().unwrap();
    let args = args_for(temp_dir.path(), "missing.log");

    let err = execute_analyze(&args).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<IntakeError>(),
        Some(IntakeError::MissingFile(_))
    ));
    assert_ne!(err.to_string(), PROCESSING_FAILURE);
}

#[test]
fn test_analyze_custom_chart_title() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("fail2ban.log"), LOG).unwrap();
    let args = AnalyzeArgs {
        chart_title: Some("sshd bans".to_string()),
        ..args_for(temp_dir.path(), "fail2ban.log")
    };

    execute_analyze(&args).unwrap();

    let svg = std::fs::read_to_string(temp_dir.path().join("graphs/graph.svg")).unwrap();
    assert!(svg.contains("sshd bans"));
}
