mod common;

use assert_cmd::Command;
use monlivre_testing::{TestWorld, assertions, fixtures};
use predicates::prelude::*;

fn student_world() -> TestWorld {
    TestWorld::new()
        .with_base_url(&common::spawn_backend())
        .with_student(fixtures::STUDENT_ID)
        .json()
}

#[test]
#[allow(deprecated)]
fn test_help_lists_command_groups() {
    Command::cargo_bin("monlivre")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("loans"))
        .stdout(predicate::str::contains("catalog"))
        .stdout(predicate::str::contains("admin"));
}

#[test]
fn test_no_command_prints_guidance() {
    let world = TestWorld::new();
    let result = world.run(&[]).unwrap();

    assert!(result.success());
    assert!(result.stdout().contains("monlivre login"));
}

#[test]
fn test_loans_require_login() {
    let world = TestWorld::new().with_base_url(&common::closed_port_url());
    let result = world.run(&["loans", "list"]).unwrap();

    assert!(!result.success());
    assert!(result.stderr().contains("Not authenticated"));
}

#[test]
fn test_whoami_without_session() {
    let world = TestWorld::new().json();
    let result = world.run(&["whoami"]).unwrap();

    assert!(result.success());
    let json = result.json().unwrap();
    assert_eq!(json["content"]["authenticated"], false);
}

#[test]
fn test_loans_list_json() {
    let world = student_world();
    let result = world.run(&["loans", "list"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    assertions::assert_loan_count(&json, 3).unwrap();
    assert_eq!(json["content"]["stats"]["borrowed"], 3);
    assert_eq!(json["content"]["stats"]["overdue"], 1);
    assert_eq!(json["content"]["stats"]["available_slots"], 2);

    let loans = json["content"]["loans"].as_array().unwrap();
    assert_eq!(loans[1]["state"], "overdue");
    assert_eq!(loans[1]["can_renew"], false);
    assert_eq!(loans[2]["cover_url"], "/placeholder.svg");
    assert_eq!(loans[2]["has_cover"], false);
}

#[test]
fn test_loans_list_query_filters() {
    let world = student_world();
    let result = world.run(&["loans", "list", "--query", "DUNE"]).unwrap();

    let json = result.json().unwrap();
    assertions::assert_loan_count(&json, 1).unwrap();
    assert_eq!(json["content"]["total_count"], 3);
    assert_eq!(json["content"]["query"], "DUNE");
}

#[test]
fn test_loans_list_quiet_prints_ids() {
    let world = TestWorld::new()
        .with_base_url(&common::spawn_backend())
        .with_student(fixtures::STUDENT_ID);
    let result = world.run(&["loans", "list", "--quiet"]).unwrap();

    assert!(result.success());
    assert_eq!(result.stdout(), "1\n2\n3\n");
}

#[test]
fn test_renew_granted() {
    let world = student_world();
    let result = world.run(&["loans", "renew", "1"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    assertions::assert_single_notification(&json, "success").unwrap();
    assert_eq!(json["content"]["outcome"]["outcome"], "renewed");
    assert_eq!(json["content"]["outcome"]["due_date"], "2025-03-03");
    assert_eq!(json["content"]["loan"]["renewal_count"], 2);
    assert_eq!(json["content"]["loan"]["state"], "renewal_exhausted");
}

#[test]
fn test_renew_overdue_is_blocked() {
    let world = student_world();
    let result = world.run(&["loans", "renew", "2"]).unwrap();
    assert!(result.success());

    let json = result.json().unwrap();
    assertions::assert_single_notification(&json, "warning").unwrap();
    assert_eq!(json["content"]["outcome"]["outcome"], "renewal_blocked_overdue");
    assert_eq!(json["content"]["loan"]["renewal_count"], 0);
}

#[test]
fn test_renew_unknown_loan_fails() {
    let world = student_world();
    let result = world.run(&["loans", "renew", "99"]).unwrap();

    assert!(!result.success());
    let json = result.json().unwrap();
    assertions::assert_single_notification(&json, "error").unwrap();
    assert_eq!(json["content"]["outcome"]["outcome"], "not_found");
}

#[test]
fn test_return_refetches_list() {
    let world = student_world();
    let result = world.run(&["loans", "return", "3"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    assertions::assert_single_notification(&json, "success").unwrap();
    assert_eq!(json["content"]["remaining"].as_array().unwrap().len(), 2);

    // The backend kept the change
    let listed = world.run(&["loans", "list"]).unwrap().json().unwrap();
    assertions::assert_loan_count(&listed, 2).unwrap();
}

#[test]
fn test_return_unknown_loan_reports_failure() {
    let world = student_world();
    let result = world.run(&["loans", "return", "99"]).unwrap();

    assert!(!result.success());
    let json = result.json().unwrap();
    assertions::assert_single_notification(&json, "error").unwrap();
    assert_eq!(json["content"]["error_kind"], "not_found");
    assert!(result.stderr().contains("Not found: loan 99"));
}

#[test]
fn test_catalog_list_filters_by_author() {
    let world = TestWorld::new()
        .with_base_url(&common::spawn_backend())
        .json();
    let result = world.run(&["catalog", "list", "--author", "camus"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    assertions::assert_book_count(&json, 2).unwrap();
    assert_eq!(json["content"]["total_count"], 3);
    assert_eq!(json["content"]["filters"]["author"], "camus");
    assert_eq!(json["content"]["books"][1]["available"], false);
}

#[test]
fn test_borrow_rejects_bad_date() {
    let world = student_world();
    let result = world
        .run(&["catalog", "borrow", "10", "--return-date", "31/12/2099"])
        .unwrap();

    assert!(!result.success());
    assert!(result.stderr().contains("Invalid date"));
}

#[test]
fn test_borrow_unavailable_book() {
    let world = student_world();
    let result = world
        .run(&["catalog", "borrow", "11", "--return-date", "2099-12-31"])
        .unwrap();

    assert!(!result.success());
    let json = result.json().unwrap();
    assertions::assert_single_notification(&json, "error").unwrap();
    assert_eq!(json["content"]["error_kind"], "validation");
}

#[test]
fn test_borrow_available_book() {
    let world = student_world();
    let result = world
        .run(&["catalog", "borrow", "10", "--return-date", "2099-12-31"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    assertions::assert_single_notification(&json, "success").unwrap();
    assert_eq!(json["content"]["return_date"], "2099-12-31");
}

#[test]
fn test_login_then_whoami() {
    let world = TestWorld::new()
        .with_base_url(&common::spawn_backend())
        .json();
    let login = world
        .run(&[
            "login",
            "--email",
            "amina.diallo@monlivre.edu",
            "--password",
            "secret",
        ])
        .unwrap();
    assert!(login.success(), "stderr: {}", login.stderr());
    let json = login.json().unwrap();
    assert_eq!(json["content"]["landing"], "dashboard");

    let whoami = world.run(&["whoami"]).unwrap().json().unwrap();
    assert_eq!(whoami["content"]["user_id"], "42");
    assert_eq!(whoami["content"]["is_admin"], false);
}

#[test]
fn test_login_rejected_keeps_session_empty() {
    let world = TestWorld::new()
        .with_base_url(&common::spawn_backend())
        .json();
    let result = world
        .run(&["login", "--email", "nobody@monlivre.edu", "--password", "x"])
        .unwrap();

    assert!(!result.success());
    let json = result.json().unwrap();
    assertions::assert_single_notification(&json, "error").unwrap();
    assert_eq!(json["content"]["status"], 401);
    assert!(
        json["notifications"][0]["message"]
            .as_str()
            .unwrap()
            .contains("Identifiants invalides")
    );
    assert!(!world.session_store().load().unwrap().is_authenticated());
}

#[test]
fn test_admin_students_list() {
    let world = TestWorld::new()
        .with_base_url(&common::spawn_backend())
        .with_admin("1")
        .json();
    let result = world.run(&["admin", "students", "list"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    assert_eq!(json["content"]["students"].as_array().unwrap().len(), 2);
    assert_eq!(json["content"]["students"][0]["borrowed_books"], 3);
}

#[test]
fn test_admin_add_student_conflict() {
    let world = TestWorld::new()
        .with_base_url(&common::spawn_backend())
        .with_admin("1")
        .json();
    let result = world
        .run(&[
            "admin",
            "students",
            "add",
            "--name",
            "Amina Diallo",
            "--email",
            "amina.diallo@monlivre.edu",
        ])
        .unwrap();

    assert!(!result.success());
    let json = result.json().unwrap();
    assertions::assert_single_notification(&json, "error").unwrap();
    assert_eq!(json["content"]["status"], 409);
}

#[test]
fn test_backend_unreachable() {
    let world = TestWorld::new()
        .with_base_url(&common::closed_port_url())
        .with_student(fixtures::STUDENT_ID);
    let result = world.run(&["loans", "list"]).unwrap();

    assert!(!result.success());
    assert!(result.stderr().contains("Network error"));
}

#[test]
fn test_config_reflects_base_url_flag() {
    let world = TestWorld::new().json();
    let result = world
        .run(&["--base-url", "http://library.test:8080", "config"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json().unwrap();
    assert_eq!(json["content"]["base_url"], "http://library.test:8080");
    assert_eq!(json["content"]["config_file_exists"], false);
    assert_eq!(json["content"]["renewal_days"], 30);
}
