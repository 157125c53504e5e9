mod support;

use std::{collections::HashSet, sync::Arc, time::Duration};

use pathprobe_core::{
    CandidateGenerator, Dictionary, HttpProber, ProbeMethod, ProbeSettings,
    ScanSettings, ScanStatus, Scanner, SuffixVariant, TargetScope, scan,
};

const TIMEOUT: Duration = Duration::from_millis(2500);

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn finds_present_paths_and_reports_exhaustion() {
    let target = support::serve_paths(&["a", "c"]).await;
    let dictionary = Dictionary::from_entries(["a", "b", "c"]);

    let result = scan(&target.base(), &dictionary, 2, 50, TIMEOUT)
        .await
        .expect("scan");

    let files: HashSet<String> = result.files.iter().cloned().collect();
    assert_eq!(files, HashSet::from([target.url("a"), target.url("c")]));
    assert_eq!(result.files.len(), 2);
    assert_eq!(result.status, ScanStatus::Exhausted);
    assert_eq!(result.message(), "scanned all 3 entries.");
    assert_eq!(result.stats.not_found, 1);
    assert_eq!(target.hits(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stops_at_cap_when_everything_exists() {
    let target = support::serve_everything().await;
    let dictionary =
        Dictionary::from_entries((0..100).map(|i| format!("file{i}")));
    let concurrency = 5;

    let result = scan(&target.base(), &dictionary, concurrency, 50, TIMEOUT)
        .await
        .expect("scan");

    assert_eq!(result.files.len(), 50);
    assert_eq!(result.status, ScanStatus::CapReached);
    assert_eq!(
        result.message(),
        "stopped early after finding 50 files (result cap reached)."
    );
    // Probes admitted before the stop flag was seen still complete.
    assert!(result.stats.probed <= 50 + concurrency - 1);
    assert_eq!(result.stats.probed, 50 + result.stats.discarded);
    assert!(result.stats.skipped >= 100 - (50 + concurrency - 1));
    assert_eq!(target.hits(), result.stats.probed);

    let unique: HashSet<&String> = result.files.iter().collect();
    assert_eq!(unique.len(), 50);
}

#[tokio::test]
async fn get_probes_with_suffix_variants_and_path_scope() {
    let target = support::serve_paths(&["app/login.html", "app/api/"]).await;
    let dictionary = Dictionary::from_entries(["login", "api", "missing"]);
    let prober = HttpProber::new(&ProbeSettings {
        method: ProbeMethod::Get,
        timeout: TIMEOUT,
        ..ProbeSettings::default()
    })
    .expect("client");

    let scanner = Scanner::new(Arc::new(prober))
        .with_settings(ScanSettings::new(3, 50))
        .with_scope(TargetScope::Path)
        .with_generator(CandidateGenerator::new(SuffixVariant::ALL.to_vec()));

    let site = format!("{}app/index.php", target.base());
    let result = scanner.scan(Some(&site), &dictionary).await.expect("scan");

    let files: HashSet<String> = result.files.into_iter().collect();
    assert_eq!(
        files,
        HashSet::from([target.url("app/login.html"), target.url("app/api/")])
    );
    assert_eq!(result.stats.candidates, 12);
    assert_eq!(result.stats.probed, 12);
}

#[tokio::test]
async fn unreachable_target_yields_empty_result() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dictionary = Dictionary::from_entries(["a", "b"]);
    let result = scan(
        &format!("http://{addr}/"),
        &dictionary,
        2,
        50,
        Duration::from_millis(500),
    )
    .await
    .expect("probe failures are not fatal");

    assert!(result.files.is_empty());
    assert_eq!(result.stats.errored, 2);
    assert_eq!(result.message(), "scanned all 2 entries.");
}
