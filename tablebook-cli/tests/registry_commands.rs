//! Integration tests for the registry commands.
//!
//! These tests cover `user`, `restaurant` and `table`, including:
//! - Ids printed on stdout for scripting
//! - Listing in every output format
//! - Duplicate detection (exit code 1)
//! - Input validation (exit code 4)
//! - Refusing to delete tables that still have reservations

mod common;

use common::{booking_at, stdout_of, TestEnv};
use predicates::prelude::*;

// ============================================================================
// Users
// ============================================================================

/// Registering prints the id; show and list find the user.
#[test]
fn test_user_add_show_list() {
    let env = TestEnv::new();
    let id = env.add_user("Ada@Example.com");
    assert!(id > 0);

    // Emails are stored lowercased and looked up case-insensitively.
    env.command()
        .args(["user", "show", "ADA@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ada@example.com"));

    env.command()
        .args(["user", "show"])
        .arg(id.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("ada@example.com"));

    env.command()
        .args(["user", "list", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "id,email,first_name,last_name,phone,role,created_at\n",
        ))
        .stdout(predicate::str::contains(",customer,"));
}

/// A second registration with the same email is refused.
#[test]
fn test_user_duplicate_email() {
    let env = TestEnv::new();
    env.add_user("ada@example.com");

    env.command()
        .args([
            "user",
            "add",
            "--email",
            "ADA@example.com",
            "--first-name",
            "Ada",
            "--last-name",
            "Again",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

/// Malformed input is a validation failure.
#[test]
fn test_user_invalid_email() {
    let env = TestEnv::new();

    env.command()
        .args([
            "user",
            "add",
            "--email",
            "not-an-email",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
        ])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("email"));
}

/// Removing a user takes their reservations along.
#[test]
fn test_user_remove_cascades() {
    let env = TestEnv::new();
    let venue = env.standard_venue();
    env.reserve_ok(venue.guest, venue.restaurant, &booking_at("19:00"), 2);

    env.command()
        .args(["user", "remove", venue.guest])
        .assert()
        .success();

    env.command()
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));

    env.command()
        .args(["user", "show", venue.guest])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

// ============================================================================
// Restaurants
// ============================================================================

/// Restaurants list by name, case-insensitively, and search by substring.
#[test]
fn test_restaurant_list_and_search() {
    let env = TestEnv::new();
    env.add_restaurant("Trattoria", "11:00", "22:00");
    env.add_restaurant("apple tree", "08:00", "15:00");
    env.add_restaurant("Brasserie", "12:00", "23:00");

    let output = env
        .command()
        .args(["restaurant", "list", "--format", "tsv"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let names: Vec<String> = stdout_of(&output)
        .lines()
        .skip(1)
        .map(|line| line.split('\t').nth(1).unwrap().to_string())
        .collect();
    assert_eq!(names, ["apple tree", "Brasserie", "Trattoria"]);

    env.command()
        .args(["restaurant", "list", "--search", "TREE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("apple tree"))
        .stdout(predicate::str::contains("Trattoria").not());
}

/// Opening after closing is rejected at registration.
#[test]
fn test_restaurant_rejects_overnight_hours() {
    let env = TestEnv::new();

    env.command()
        .args([
            "restaurant",
            "add",
            "--name",
            "Night Owl",
            "--opens",
            "22:00",
            "--closes",
            "02:00",
        ])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("closing_time"));
}

/// A partial address is an argument error.
#[test]
fn test_restaurant_partial_address() {
    let env = TestEnv::new();

    env.command()
        .args([
            "restaurant",
            "add",
            "--name",
            "Halfway",
            "--opens",
            "11:00",
            "--closes",
            "22:00",
            "--street",
            "Main St 1",
        ])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("--zip"));
}

/// Update keeps unspecified fields and can clear the address.
#[test]
fn test_restaurant_update() {
    let env = TestEnv::new();
    let id = env.add_restaurant("Bistro", "11:00", "22:00");

    env.command()
        .args(["restaurant", "update"])
        .arg(id.to_string())
        .args([
            "--closes", "23:30", "--street", "Main St 1", "--zip", "10115", "--city", "Berlin",
            "--country", "DE",
        ])
        .assert()
        .success();

    env.command()
        .args(["restaurant", "show"])
        .arg(id.to_string())
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Bistro\""))
        .stdout(predicate::str::contains("23:30:00"))
        .stdout(predicate::str::contains("Berlin"));

    env.command()
        .args(["restaurant", "update"])
        .arg(id.to_string())
        .arg("--clear-address")
        .assert()
        .success();

    env.command()
        .args(["restaurant", "show"])
        .arg(id.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("Berlin").not());
}

/// Unknown restaurants are semantic failures.
#[test]
fn test_restaurant_not_found() {
    let env = TestEnv::new();

    env.command()
        .args(["restaurant", "show", "42"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("restaurant 42 not found"));
}

// ============================================================================
// Tables
// ============================================================================

/// Tables list by number; duplicate numbers are refused.
#[test]
fn test_table_add_list_duplicate() {
    let env = TestEnv::new();
    let restaurant = env.add_restaurant("Bistro", "11:00", "22:00");
    env.add_table(restaurant, 3, 6);
    env.add_table(restaurant, 1, 2);

    let output = env
        .command()
        .args(["table", "list", "--format", "csv", "--restaurant"])
        .arg(restaurant.to_string())
        .output()
        .unwrap();
    assert!(output.status.success());
    let numbers: Vec<String> = stdout_of(&output)
        .lines()
        .skip(1)
        .map(|line| line.split(',').nth(2).unwrap().to_string())
        .collect();
    assert_eq!(numbers, ["1", "3"]);

    env.command()
        .args(["table", "add", "--number", "3", "--capacity", "4", "--restaurant"])
        .arg(restaurant.to_string())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

/// Capacity outside 1..=100 is rejected.
#[test]
fn test_table_capacity_bounds() {
    let env = TestEnv::new();
    let restaurant = env.add_restaurant("Bistro", "11:00", "22:00");

    env.command()
        .args(["table", "add", "--number", "1", "--capacity", "0", "--restaurant"])
        .arg(restaurant.to_string())
        .assert()
        .code(4);

    env.command()
        .args(["table", "add", "--number", "1", "--capacity", "101", "--restaurant"])
        .arg(restaurant.to_string())
        .assert()
        .code(4);
}

/// Resizing a table changes which parties it can seat.
#[test]
fn test_table_update_capacity() {
    let env = TestEnv::new();
    let restaurant = env.add_restaurant("Bistro", "11:00", "22:00");
    let table = env.add_table(restaurant, 1, 2);

    env.command()
        .args(["table", "update"])
        .arg(table.to_string())
        .args(["--capacity", "8"])
        .assert()
        .success();

    env.command()
        .args(["availability", "--party", "8", "--restaurant"])
        .arg(restaurant.to_string())
        .arg("--at")
        .arg(booking_at("19:00"))
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{table}\t{restaurant}\t1\t8")));

    env.command()
        .args(["table", "update"])
        .arg(table.to_string())
        .assert()
        .code(4);
}

/// A booked table cannot be removed; a free one can.
#[test]
fn test_table_remove_in_use() {
    let env = TestEnv::new();
    let venue = env.standard_venue();
    env.reserve_ok(venue.guest, venue.restaurant, &booking_at("19:00"), 2);

    env.command()
        .args(["table", "remove"])
        .arg(venue.tables[0].to_string())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("still has reservations"));

    env.command()
        .args(["table", "remove"])
        .arg(venue.tables[2].to_string())
        .assert()
        .success();

    env.command()
        .args(["restaurant", "remove"])
        .arg(venue.restaurant.to_string())
        .assert()
        .code(1);
}
