use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use view_my_startup_lib::bootstrap::wire_use_cases;
use view_my_startup_lib::shell::{parse_line, Flow, Shell};
use vms_core::{AppConfig, Locale};

async fn shell_against(server: &ServerGuard) -> Shell {
    let mut config = AppConfig::default();
    config.backend.base_url = server.url();
    Shell::new(wire_use_cases(&config).unwrap(), Locale::Ko)
}

async fn run(shell: &Shell, line: &str) -> anyhow::Result<String> {
    let command = parse_line(line).unwrap().unwrap();
    match shell.execute(command).await? {
        Flow::Continue(output) => Ok(output),
        Flow::Quit => Ok(String::new()),
    }
}

async fn mock_startup(server: &mut Server, id: u64, name: &str, sim_invest: i64) {
    server
        .mock("GET", format!("/startups/{id}").as_str())
        .with_status(200)
        .with_body(
            json!({ "id": id, "name": name, "category": "AI", "simInvest": sim_invest })
                .to_string(),
        )
        .create_async()
        .await;
}

#[tokio::test]
async fn pick_compare_show_reset() {
    let mut server = Server::new_async().await;
    mock_startup(&mut server, 1, "Alpha", 1_000).await;
    mock_startup(&mut server, 2, "Beta", 2_500_000).await;
    mock_startup(&mut server, 3, "Gamma", 0).await;
    let register = server
        .mock("POST", "/selections/1")
        .with_status(201)
        .expect(1)
        .create_async()
        .await;
    let submit = server
        .mock("POST", "/comparisons")
        .match_body(Matcher::Json(json!({ "ids": [2, 3] })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/comparisons/results")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("sortBy".into(), "simInvest".into()),
            Matcher::UrlEncoded("order".into(), "desc".into()),
        ]))
        .with_status(200)
        .with_body(
            json!([
                { "id": 2, "name": "Beta", "category": "AI", "simInvest": 2_500_000 },
                { "id": 1, "name": "Alpha", "category": "AI", "simInvest": 1_000 }
            ])
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/startups/1/rank")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!([{ "rank": 1, "id": 1, "name": "Alpha", "category": "AI", "revenue": 10 }])
                .to_string(),
        )
        .create_async()
        .await;
    let shell = shell_against(&server).await;

    assert_eq!(run(&shell, "pick 1").await.unwrap(), "picked 1:Alpha");
    assert_eq!(
        run(&shell, "candidate 2 3").await.unwrap(),
        "candidates added: [2, 3]"
    );

    let compared = run(&shell, "compare").await.unwrap();
    assert!(compared.contains("Done"), "{compared}");
    assert!(compared.contains("2,500,000 원"), "{compared}");
    assert!(compared.lines().any(|l| l.starts_with('*') && l.contains("Alpha")));

    let shown = run(&shell, "show").await.unwrap();
    assert!(shown.contains("my startups: [1:Alpha]"), "{shown}");
    assert!(shown.contains("rank around 1"), "{shown}");
    assert!(shown.contains("1위"), "{shown}");

    assert_eq!(run(&shell, "reset").await.unwrap(), "selection cleared");
    let shown = run(&shell, "show").await.unwrap();
    assert!(shown.contains("(no comparison)"), "{shown}");
    assert!(shown.contains("my startups: []"), "{shown}");

    register.assert_async().await;
    submit.assert_async().await;
}

#[tokio::test]
async fn compare_without_candidates_is_refused() {
    let mut server = Server::new_async().await;
    mock_startup(&mut server, 1, "Alpha", 0).await;
    let shell = shell_against(&server).await;

    run(&shell, "pick 1").await.unwrap();
    let err = run(&shell, "compare").await.unwrap_err();

    assert!(err.to_string().contains("candidates: 0"), "{err}");
}

#[tokio::test]
async fn invest_reports_password_mismatch_before_any_request() {
    let server = Server::new_async().await;
    let shell = shell_against(&server).await;

    let err = run(
        &shell,
        "invest 9 --name Kim --amount 100 --comment hi --password a --check-password b",
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("checkPassword"), "{err}");
}

#[tokio::test]
async fn rejected_investment_shows_localized_message() {
    let mut server = Server::new_async().await;
    server
        .mock("PATCH", "/investments/9")
        .with_status(400)
        .create_async()
        .await;
    let shell = shell_against(&server).await;

    let err = run(
        &shell,
        "invest 9 --name Kim --amount 100 --comment hi --password a --check-password a",
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "수정 요청이 실패했습니다.");
}
