use netcheck::models::CheckKind;
use netcheck::{run_checks, CheckPlan, HostPort, Settings};
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_mixed_plan_reports_each_kind_once() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open = listener.local_addr().unwrap().port();

    let plan = CheckPlan {
        dns: Some("127.0.0.1".to_string()),
        tcp: vec![
            HostPort::new("127.0.0.1", open),
            HostPort::new("127.0.0.1", open),
        ],
        ..Default::default()
    };

    let results = run_checks(&plan, &Settings::default()).await;

    assert_eq!(results.kinds(), vec![CheckKind::Dns, CheckKind::Tcp]);
    assert_eq!(results.tcp.as_ref().unwrap().len(), 2);
    assert!(results.all_ok());
}

#[tokio::test]
async fn test_probes_run_concurrently() {
    let settings = Settings::default().with_timeout(0.5).unwrap();
    let plan = CheckPlan {
        tcp: (0..4).map(|i| HostPort::new("10.255.255.1", 81 + i)).collect(),
        ..Default::default()
    };

    let start = Instant::now();
    let results = run_checks(&plan, &settings).await;

    assert!(start.elapsed() < Duration::from_millis(1500));
    let tcp = results.tcp.unwrap();
    assert_eq!(tcp.len(), 4);
    assert_eq!(
        tcp.iter().map(|r| r.port).collect::<Vec<_>>(),
        vec![81, 82, 83, 84]
    );
}

#[tokio::test]
async fn test_kinds_run_concurrently() {
    // Accepts connections at the kernel level but never answers
    let silent = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = silent.local_addr().unwrap().port();

    let mut settings = Settings::default().with_timeout(0.5).unwrap();
    settings.http.grace_secs = 0.2;
    settings.tls.grace_secs = 0.2;

    let plan = CheckPlan {
        http: vec![format!("http://127.0.0.1:{port}/")],
        tls: Some(HostPort::new("127.0.0.1", port)),
        ..Default::default()
    };

    let start = Instant::now();
    let results = run_checks(&plan, &settings).await;
    let elapsed = start.elapsed();

    // Back to back the two would need at least 1.2 s
    assert!(elapsed < Duration::from_millis(1100), "took {elapsed:?}");
    assert!(!results.http.unwrap()[0].ok);
    assert!(!results.tls.unwrap().ok);
}
