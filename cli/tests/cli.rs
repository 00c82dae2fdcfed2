//! End-to-end runs of the `taskboard` binary against a live mock server.

use assert_cmd::Command;
use predicates::str::contains;

/// Start the mock server on a random port on its own runtime thread and
/// return its collection URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}/api/todos")
}

fn taskboard(url: &str) -> Command {
    let mut cmd = Command::cargo_bin("taskboard").unwrap();
    cmd.env_remove("TASKBOARD_LOG").arg("--api-url").arg(url);
    cmd
}

/// Run `add` and return the id it printed.
fn add(url: &str, args: &[&str]) -> String {
    let output = taskboard(url).arg("add").args(args).output().unwrap();
    assert!(output.status.success(), "add failed: {output:?}");
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .find_map(|l| l.strip_prefix("created "))
        .unwrap()
        .trim()
        .to_string()
}

#[test]
fn list_on_empty_server() {
    let url = start_server();
    taskboard(&url)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("all 0 | active 0 | completed 0"))
        .stdout(contains("No tasks yet"));
}

#[test]
fn add_then_list_and_filter() {
    let url = start_server();
    let id = add(&url, &["Buy milk", "--priority", "high", "--tags", "shop, home"]);

    taskboard(&url)
        .arg("list")
        .assert()
        .success()
        .stdout(contains(format!("[ ] {id}  Buy milk (high) #shop #home")))
        .stdout(contains("all 1 | active 1 | completed 0"));

    taskboard(&url).args(["done", &id]).assert().success().stdout(contains(format!("[x] {id}")));

    taskboard(&url)
        .args(["list", "--filter", "active"])
        .assert()
        .success()
        .stdout(contains("No active tasks."));

    taskboard(&url).args(["undo", &id]).assert().success().stdout(contains("completed 0"));
}

#[test]
fn edit_and_remove() {
    let url = start_server();
    let id = add(&url, &["Walk dog", "--category", "pets"]);

    taskboard(&url)
        .args(["edit", &id, "--title", "Walk cat", "--due", "2031-02-03"])
        .assert()
        .success()
        .stdout(contains(format!("[ ] {id}  Walk cat (medium) @pets due 2031-02-03")));

    taskboard(&url)
        .args(["rm", &id])
        .assert()
        .success()
        .stdout(contains(format!("deleted {id}")))
        .stdout(contains("all 0"));
}

#[test]
fn blank_title_fails_locally() {
    let url = start_server();
    taskboard(&url)
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(contains("title is required"));
}

#[test]
fn unknown_id_is_reported() {
    let url = start_server();
    taskboard(&url)
        .args(["rm", "missing"])
        .assert()
        .failure()
        .stderr(contains("not found"));
    taskboard(&url)
        .args(["edit", "missing", "--title", "x"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn edit_can_clear_text_fields() {
    let url = start_server();
    let id = add(&url, &["Walk dog", "--category", "pets", "--description", "twice"]);

    taskboard(&url)
        .args(["edit", &id, "--category", ""])
        .assert()
        .success()
        .stdout(contains(format!("[ ] {id}  Walk dog (medium)\n")));
}

#[test]
fn unreachable_server_fails_with_hint() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    taskboard(&format!("http://{addr}/api/todos"))
        .arg("list")
        .assert()
        .failure()
        .stderr(contains("cannot connect to the task server"))
        .stderr(contains("hint:"));
}

#[test]
fn invalid_url_is_rejected() {
    taskboard("not a url")
        .arg("list")
        .assert()
        .failure()
        .stderr(contains("bad API URL"));
}
