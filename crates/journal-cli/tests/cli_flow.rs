use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use rusqlite::Connection;
use tempfile::TempDir;

const PIN: &str = "1357";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_journal"))
}

/// Isolated HOME and XDG directories for one test.
struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("config")).expect("create config dir");
        std::fs::create_dir_all(dir.path().join("data")).expect("create data dir");
        Self { dir }
    }

    fn config_home(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    fn config_file(&self) -> PathBuf {
        self.config_home().join("journal").join("config.toml")
    }

    fn db_path(&self) -> PathBuf {
        self.dir
            .path()
            .join("data")
            .join("journal")
            .join("journal_database.db")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.config_home())
            .env("XDG_DATA_HOME", self.dir.path().join("data"))
            .env_remove("JOURNAL_PATH")
            .env_remove("JOURNAL_CONFIG")
            .env_remove("JOURNAL_PIN")
            .env_remove("JOURNAL_NEW_PIN")
            .env_remove("JOURNAL_LOG");
        cmd
    }

    fn run(&self, args: &[&str], pin: Option<&str>) -> Output {
        self.run_in_zone(args, pin, "UTC")
    }

    fn run_in_zone(&self, args: &[&str], pin: Option<&str>, zone: &str) -> Output {
        let mut cmd = self.command();
        cmd.env("TZ", zone);
        cmd.args(args);
        if let Some(pin) = pin {
            cmd.env("JOURNAL_PIN", pin);
        }
        cmd.output().expect("run journal")
    }

    fn init(&self) {
        let output = self.run(&["init", "--name", "Aaron", "--no-input"], Some(PIN));
        assert_success(&output, "init");
    }

    fn add(&self, title: &str, content: &str, date: &str) -> String {
        let output = self.run(
            &[
                "add", "--title", title, "--content", content, "--date", date,
            ],
            Some(PIN),
        );
        assert_success(&output, "add");
        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .trim()
            .strip_prefix("Added entry ")
            .expect("add prints the new id")
            .to_string()
    }

    fn list_json(&self) -> Vec<serde_json::Value> {
        let output = self.run(&["list", "--json"], Some(PIN));
        assert_success(&output, "list");
        serde_json::from_slice(&output.stdout).expect("list output is JSON")
    }
}

fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{} failed: stdout={}, stderr={}",
        what,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn open_db(path: &Path) -> Connection {
    Connection::open(path).expect("open journal database")
}

#[test]
fn test_cli_init_add_list_show() {
    let env = TestEnv::new();
    env.init();
    assert!(env.db_path().exists());
    assert!(env.config_file().exists());

    let id = env.add("Morning", "Coffee on the porch", "2018-07-01T08:30:00Z");

    let entries = env.list_json();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], id.as_str());
    assert_eq!(entries[0]["title"], "Morning");
    assert_eq!(entries[0]["content"], "Coffee on the porch");
    assert_eq!(entries[0]["date_millis"], 1_530_433_800_000_i64);

    let show = env.run(&["show", &id, "--json"], Some(PIN));
    assert_success(&show, "show");
    let shown: serde_json::Value = serde_json::from_slice(&show.stdout).unwrap();
    assert_eq!(shown["title"], "Morning");

    let plain = env.run(&["show", &id], Some(PIN));
    assert_success(&plain, "show");
    let text = String::from_utf8_lossy(&plain.stdout);
    assert!(text.contains("Title: Morning"));
    assert!(text.contains("Coffee on the porch"));
}

#[test]
fn test_cli_writes_expected_rows() {
    let env = TestEnv::new();
    env.init();
    let id = env.add("Stored", "Exact millis", "2018-07-01T08:30:00.250Z");

    let conn = open_db(&env.db_path());
    let (uuid, title, date, content): (String, String, i64, String) = conn
        .query_row(
            "SELECT uuid, title, date, content FROM entry",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .expect("one entry row");
    assert_eq!(uuid, id);
    assert_eq!(title, "Stored");
    assert_eq!(date, 1_530_433_800_250);
    assert_eq!(content, "Exact millis");

    let (username, pin): (String, String) = conn
        .query_row("SELECT username, pin FROM user", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .expect("one user row");
    assert_eq!(username, "user");
    assert_eq!(pin, PIN);
}

#[test]
fn test_cli_list_keeps_insertion_order() {
    let env = TestEnv::new();
    env.init();

    let mut ids = Vec::new();
    for i in 1..=5 {
        ids.push(env.add(
            &format!("Title {}", i),
            "",
            &format!("2018-07-0{}T08:00:00Z", 6 - i),
        ));
    }

    let delete = env.run(&["delete", &ids[2], "--yes"], Some(PIN));
    assert_success(&delete, "delete");

    let titles: Vec<String> = env
        .list_json()
        .iter()
        .map(|entry| entry["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Title 1", "Title 2", "Title 4", "Title 5"]);
}

#[test]
fn test_cli_wrong_pin_exits_auth_failed() {
    let env = TestEnv::new();
    env.init();

    let output = env.run(&["list"], Some("0000"));
    assert_eq!(output.status.code(), Some(5));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Incorrect PIN"));

    let no_pin = env.run(&["list"], None);
    assert_eq!(no_pin.status.code(), Some(5));
}

#[test]
fn test_cli_init_rejects_bad_registration() {
    let env = TestEnv::new();

    let short = env.run(&["init", "--name", "Aaron", "--no-input"], Some("12"));
    assert_eq!(short.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&short.stderr).contains("at least 4"));

    let blank = env.run(&["init", "--name", "", "--no-input"], Some(PIN));
    assert_eq!(blank.status.code(), Some(4));

    let users: i64 = open_db(&env.db_path())
        .query_row("SELECT COUNT(*) FROM user", [], |row| row.get(0))
        .unwrap();
    assert_eq!(users, 0);

    let no_name = env.run(&["init", "--no-input"], Some(PIN));
    assert_eq!(no_name.status.code(), Some(4));
}

#[test]
fn test_cli_init_twice_is_rejected() {
    let env = TestEnv::new();
    env.init();

    let again = env.run(&["init", "--name", "Aaron", "--no-input"], Some(PIN));
    assert_eq!(again.status.code(), Some(4));
}

#[test]
fn test_cli_missing_journal_is_not_found() {
    let env = TestEnv::new();
    let output = env.run(&["list"], Some(PIN));
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("journal init"));
}

#[test]
fn test_cli_unknown_and_malformed_ids() {
    let env = TestEnv::new();
    env.init();

    let missing = env.run(
        &["show", "00000000-0000-4000-8000-000000000000"],
        Some(PIN),
    );
    assert_eq!(missing.status.code(), Some(3));

    let malformed = env.run(&["show", "not-a-uuid"], Some(PIN));
    assert_eq!(malformed.status.code(), Some(4));

    let bad_date = env.run(&["add", "--title", "x", "--date", "soon"], Some(PIN));
    assert_eq!(bad_date.status.code(), Some(4));
}

#[test]
fn test_cli_delete_requires_confirmation() {
    let env = TestEnv::new();
    env.init();
    let id = env.add("Keep me", "", "2018-07-01");

    let refused = env.run(&["delete", &id], Some(PIN));
    assert_eq!(refused.status.code(), Some(4));
    assert_eq!(env.list_json().len(), 1);

    let deleted = env.run(&["delete", &id, "--yes"], Some(PIN));
    assert_success(&deleted, "delete");
    assert!(env.list_json().is_empty());
}

#[test]
fn test_cli_edit_changes_only_given_fields() {
    let env = TestEnv::new();
    env.init();
    let id = env.add("Draft", "Original body", "2018-07-01T08:30:00Z");
    let other = env.add("Other", "Untouched", "2018-07-02T08:30:00Z");

    let edit = env.run(&["edit", &id, "--title", "Final"], Some(PIN));
    assert_success(&edit, "edit");

    let entries = env.list_json();
    let edited = entries.iter().find(|e| e["id"] == id.as_str()).unwrap();
    assert_eq!(edited["title"], "Final");
    assert_eq!(edited["content"], "Original body");
    assert_eq!(edited["date_millis"], 1_530_433_800_000_i64);

    let untouched = entries.iter().find(|e| e["id"] == other.as_str()).unwrap();
    assert_eq!(untouched["title"], "Other");
    assert_eq!(untouched["content"], "Untouched");
}

#[test]
fn test_cli_dates_and_times_are_local() {
    const ZONE: &str = "America/New_York";
    let env = TestEnv::new();
    env.init();

    let added = env.run_in_zone(
        &[
            "add", "--title", "Fourth", "--content", "", "--date", "2018-07-01", "--time",
            "09:15",
        ],
        Some(PIN),
        ZONE,
    );
    assert_success(&added, "add");
    let id = String::from_utf8_lossy(&added.stdout)
        .trim()
        .trim_start_matches("Added entry ")
        .to_string();
    let millis = |env: &TestEnv| env.list_json()[0]["date_millis"].as_i64().unwrap();
    assert_eq!(millis(&env), 1_530_450_900_000);

    let shown = env.run_in_zone(&["show", &id], Some(PIN), ZONE);
    assert_success(&shown, "show");
    let text = String::from_utf8_lossy(&shown.stdout);
    assert!(text.contains("Date: Sun 01 Jul 2018"), "{}", text);
    assert!(text.contains("Time: 09:15 AM"), "{}", text);

    // A new day keeps the time of day, and a new time keeps the day.
    let moved = env.run_in_zone(&["edit", &id, "--date", "2018-07-04"], Some(PIN), ZONE);
    assert_success(&moved, "edit");
    assert_eq!(millis(&env), 1_530_710_100_000);

    let retimed = env.run_in_zone(&["edit", &id, "--time", "18:40"], Some(PIN), ZONE);
    assert_success(&retimed, "edit");
    assert_eq!(millis(&env), 1_530_744_000_000);

    // A bare day added late in the evening still lands on that day.
    let evening = env.run_in_zone(
        &["add", "--title", "Late", "--content", "", "--date", "2018-07-01"],
        Some(PIN),
        ZONE,
    );
    assert_success(&evening, "add");
    let listed = env.run_in_zone(&["list"], Some(PIN), ZONE);
    let text = String::from_utf8_lossy(&listed.stdout);
    assert!(!text.contains("Sat 30 Jun 2018"), "{}", text);
    assert_eq!(text.matches("Sun 01 Jul 2018").count(), 1, "{}", text);

    let bad_time = env.run(&["edit", &id, "--time", "7pm"], Some(PIN));
    assert_eq!(bad_time.status.code(), Some(4));
}

#[test]
fn test_cli_change_pin() {
    let env = TestEnv::new();
    env.init();

    let mut change = env.command();
    change
        .arg("change-pin")
        .env("JOURNAL_PIN", PIN)
        .env("JOURNAL_NEW_PIN", "2468");
    let change = change.output().expect("run change-pin");
    assert_success(&change, "change-pin");

    assert_eq!(env.run(&["list"], Some(PIN)).status.code(), Some(5));
    assert_success(&env.run(&["list"], Some("2468")), "list with new pin");

    let mut short = env.command();
    short
        .arg("change-pin")
        .env("JOURNAL_PIN", "2468")
        .env("JOURNAL_NEW_PIN", "99");
    assert_eq!(short.output().unwrap().status.code(), Some(4));
}

#[test]
fn test_cli_argon2_pin_storage() {
    let env = TestEnv::new();
    std::fs::create_dir_all(env.config_file().parent().unwrap()).unwrap();
    std::fs::write(env.config_file(), "[security]\npin_storage = \"argon2\"\n").unwrap();

    env.init();
    let stored: String = open_db(&env.db_path())
        .query_row("SELECT pin FROM user", [], |row| row.get(0))
        .unwrap();
    assert!(stored.starts_with("$argon2"));
    assert_ne!(stored, PIN);

    assert_success(&env.run(&["list"], Some(PIN)), "list");
    assert_eq!(env.run(&["list"], Some("7531")).status.code(), Some(5));

    let config = std::fs::read_to_string(env.config_file()).unwrap();
    assert!(config.contains("argon2"));
}

#[test]
fn test_cli_explicit_journal_path() {
    let env = TestEnv::new();
    let custom = env.dir.path().join("elsewhere").join("mine.db");
    let custom_str = custom.to_str().unwrap();

    let init = env.run(
        &["init", custom_str, "--name", "Aaron", "--no-input"],
        Some(PIN),
    );
    assert_success(&init, "init");
    assert!(custom.exists());
    assert!(!env.db_path().exists());

    // The config now points at the custom file.
    env.add("Here", "", "2018-07-01");
    let count: i64 = open_db(&custom)
        .query_row("SELECT COUNT(*) FROM entry", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);

    let flagged = env.run(&["--journal", custom_str, "list", "--json"], Some(PIN));
    assert_success(&flagged, "list");
}

#[test]
fn test_cli_check_reports_counts() {
    let env = TestEnv::new();
    env.init();
    env.add("One", "", "2018-07-01");

    let output = env.run(&["check"], Some(PIN));
    assert_success(&output, "check");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Integrity check: OK"));
    assert!(stdout.contains("entry: 1 row"));
    assert!(stdout.contains("user: 1 row"));
}

#[test]
fn test_cli_completions() {
    let env = TestEnv::new();
    let output = env.run(&["completions", "bash"], None);
    assert_success(&output, "completions");
    assert!(String::from_utf8_lossy(&output.stdout).contains("journal"));
}
