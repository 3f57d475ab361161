//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for registry setup and booking
//! - Instants that fall inside the default booking window

use assert_cmd::Command;
use chrono::{Duration, Utc};
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

/// Environment variables the binary reads; cleared for isolation.
const TABLEBOOK_ENV: [&str; 11] = [
    "TABLEBOOK_DATA_DIR",
    "TABLEBOOK_USER",
    "TABLEBOOK_BUSY_TIMEOUT",
    "TABLEBOOK_LOG_MODE",
    "TABLEBOOK_CONFLICT_WINDOW_MINUTES",
    "TABLEBOOK_SPAN_MIDNIGHT",
    "TABLEBOOK_MIN_LEAD_MINUTES",
    "TABLEBOOK_MAX_ADVANCE_DAYS",
    "TABLEBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
    "TABLEBOOK_DISABLE_AUTOINIT",
    "TABLEBOOK_OUTPUT_FORMAT",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the tablebook data directory
    pub data_dir: PathBuf,
}

/// A restaurant open 11:00-22:00 with a 2-, 4- and 6-top, plus one guest.
#[allow(dead_code)]
pub struct Venue {
    /// Restaurant id.
    pub restaurant: i64,
    /// Table ids, by capacity 2, 4, 6.
    pub tables: [i64; 3],
    /// Guest email.
    pub guest: &'static str,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment. The data directory is not created;
    /// the first command creates it.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("tablebook-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a bare command builder with a clean environment and no flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("tablebook").expect("Failed to find tablebook binary");
        for var in TABLEBOOK_ENV {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get a command acting as `user`.
    pub fn command_as(&self, user: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("--user").arg(user);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Run a command and parse the id it prints on stdout.
    ///
    /// # Panics
    /// Panics if the command fails or prints something other than an id.
    pub fn run_for_id(&self, mut cmd: Command) -> i64 {
        let output = cmd.output().expect("Failed to run command");
        assert!(
            output.status.success(),
            "Command failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        stdout_of(&output)
            .trim()
            .parse()
            .expect("Output is not a valid id")
    }

    /// Register a user and return its id.
    pub fn add_user(&self, email: &str) -> i64 {
        let mut cmd = self.command();
        cmd.args([
            "user",
            "add",
            "--email",
            email,
            "--first-name",
            "Test",
            "--last-name",
            "Guest",
        ]);
        self.run_for_id(cmd)
    }

    /// Register a restaurant and return its id.
    pub fn add_restaurant(&self, name: &str, opens: &str, closes: &str) -> i64 {
        let mut cmd = self.command();
        cmd.args([
            "restaurant",
            "add",
            "--name",
            name,
            "--opens",
            opens,
            "--closes",
            closes,
        ]);
        self.run_for_id(cmd)
    }

    /// Add a table and return its id.
    pub fn add_table(&self, restaurant: i64, number: u32, capacity: u8) -> i64 {
        let mut cmd = self.command();
        cmd.args(["table", "add", "--restaurant"])
            .arg(restaurant.to_string())
            .arg("--number")
            .arg(number.to_string())
            .arg("--capacity")
            .arg(capacity.to_string());
        self.run_for_id(cmd)
    }

    /// Seed the standard venue.
    pub fn standard_venue(&self) -> Venue {
        let restaurant = self.add_restaurant("Chez Test", "11:00", "22:00");
        let tables = [
            self.add_table(restaurant, 1, 2),
            self.add_table(restaurant, 2, 4),
            self.add_table(restaurant, 3, 6),
        ];
        let guest = "guest@example.com";
        self.add_user(guest);
        Venue {
            restaurant,
            tables,
            guest,
        }
    }

    /// Run `reserve` as `user` and return the raw output.
    pub fn reserve(&self, user: &str, restaurant: i64, at: &str, party: u8) -> Output {
        self.command_as(user)
            .args(["reserve", "--restaurant"])
            .arg(restaurant.to_string())
            .arg("--at")
            .arg(at)
            .arg("--party")
            .arg(party.to_string())
            .output()
            .expect("Failed to run reserve command")
    }

    /// Reserve and return the new reservation id.
    ///
    /// # Panics
    /// Panics if the reservation fails.
    pub fn reserve_ok(&self, user: &str, restaurant: i64, at: &str, party: u8) -> i64 {
        let output = self.reserve(user, restaurant, at, party);
        assert!(
            output.status.success(),
            "Reserve failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        stdout_of(&output)
            .trim()
            .parse()
            .expect("Output is not a valid reservation id")
    }
}

/// An instant two days from now at `HH:MM`, inside the default booking window.
#[allow(dead_code)]
pub fn booking_at(time: &str) -> String {
    let day = Utc::now().date_naive() + Duration::days(2);
    format!("{} {time}", day.format("%Y-%m-%d"))
}

/// Decoded stdout.
#[allow(dead_code)]
pub fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("Invalid UTF-8 in output")
}
