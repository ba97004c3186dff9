use std::{
    env, fs,
    path::PathBuf,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use browser_core::{
    host::parse_daily_index, view::Placeholder, AppHost, DirAssetSource, ModeController,
    PaperArea, PaperStore, ReadySignal, Region, SharedPage, SitePaths, StaticSiteHost,
};
use shared::domain::ViewMode;
use tokio::sync::Mutex;

fn build_site() -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let root = env::temp_dir().join(format!("paper_browser_site_{suffix}"));
    fs::create_dir_all(root.join("assets")).expect("assets dir");
    fs::create_dir_all(root.join("data")).expect("data dir");

    fs::write(
        root.join("assets").join("conference-list.json"),
        r#"{"conferences":[
            {"id":"neurips2024","name":"NeurIPS 2024","file":"neurips2024.jsonl",
             "date":"2024-12-10","category":"ML","year":2024,"count":2,
             "description":"Oral papers"}
        ]}"#,
    )
    .expect("catalog");
    fs::write(
        root.join("data").join("neurips2024.jsonl"),
        concat!(
            "{\"id\":\"neurips2024_oral_1\",\"title\":\"A\",\"authors\":[\"x\"]}\n",
            "\n",
            "{\"id\":\"neurips2024_oral_2\",\"title\":\"B\",\"authors\":[\"y\"]}\n",
        ),
    )
    .expect("conference data");
    fs::write(
        root.join("assets").join("file-list.txt"),
        "2025-01-01.jsonl\n2025-01-03.jsonl\n\nnot-a-date\n",
    )
    .expect("daily index");
    fs::write(
        root.join("data").join("2025-01-03.jsonl"),
        "{\"id\":\"2501.00001\",\"title\":\"Daily\"}\n",
    )
    .expect("daily data");
    root
}

#[test]
fn daily_index_is_sorted_newest_first() {
    let dates = parse_daily_index("2025-01-01.jsonl\ndata/2025-01-03.jsonl\n2025-01-01\nbogus\n");
    assert_eq!(dates, vec!["2025-01-03", "2025-01-01"]);
}

#[tokio::test]
async fn browses_a_static_site_on_disk() {
    let root = build_site();
    let source = Arc::new(DirAssetSource::new(&root));
    let page = SharedPage::new();
    let store = Arc::new(Mutex::new(PaperStore::default()));
    let host = Arc::new(StaticSiteHost::new(
        source.clone(),
        Arc::new(page.clone()),
        store.clone(),
        SitePaths::default(),
    ));
    let controller = ModeController::new(
        source,
        host.clone(),
        Arc::new(page.clone()),
        store.clone(),
        SitePaths::default(),
    );

    let ready = ReadySignal::new();
    assert_eq!(host.refresh_dates().await, vec!["2025-01-03", "2025-01-01"]);
    ready.mark_ready();
    let catalog = controller.init(&ready).await;
    assert_eq!(catalog.len(), 1);

    controller.switch_mode(ViewMode::Conference).await;
    let snapshot = page.snapshot();
    assert_eq!(snapshot.text(Region::CurrentConference), Some("NeurIPS 2024"));
    match snapshot.paper_area() {
        PaperArea::Papers(cards) => {
            assert_eq!(cards.len(), 2);
            assert_eq!(cards[1].title, "B");
        }
        other => panic!("expected papers, got {other:?}"),
    }

    controller.switch_mode(ViewMode::Daily).await;
    match page.snapshot().paper_area() {
        PaperArea::Papers(cards) => assert_eq!(cards[0].id, "2501.00001"),
        other => panic!("expected daily papers, got {other:?}"),
    }
    let store = store.lock().await;
    assert_eq!(store.papers("neurips2024").map(<[_]>::len), Some(2));
    assert_eq!(store.papers("2025-01-03").map(<[_]>::len), Some(1));
    drop(store);

    host.load_papers_by_date("2025-01-01").await;
    assert_eq!(
        page.snapshot().paper_area(),
        &PaperArea::Placeholder(Placeholder::DailyLoadFailed {
            date: "2025-01-01".to_string(),
            message: "not found: data/2025-01-01.jsonl".to_string(),
            path: "data/2025-01-01.jsonl".to_string(),
        })
    );

    fs::remove_dir_all(root).expect("cleanup");
}
