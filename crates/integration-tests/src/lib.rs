//! Integration tests for the storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p technova-integration-tests
//! ```
//!
//! Every test gets its own store document in a temporary directory, so tests
//! run in parallel without sharing state.
//!
//! # Test Categories
//!
//! - `shopping_flow` - Cart, checkout and order history end to end
//! - `checkout_atomicity` - Refused checkouts leave the store untouched
//! - `accounts` - Registration, sign-in and the session across reopen
//! - `admin_console` - Staff guard, product and user management, seeding

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use technova_storefront::Storefront;
use technova_storefront::clock::FixedClock;
use technova_storefront::db::FileStore;
use technova_storefront::models::{Account, NewAccount};
use technova_storefront::services::seed;

/// Timestamp every test clock is frozen at.
pub const TEST_MILLIS: i64 = 1_700_000_000_000;

/// A seeded, file-backed store in a private temporary directory.
pub struct TestContext {
    _dir: TempDir,
    pub store: FileStore,
    pub clock: FixedClock,
}

impl TestContext {
    /// Fresh store with the default catalog and administrator.
    #[must_use]
    pub fn seeded() -> Self {
        let ctx = Self::empty();
        seed::seed_defaults(&ctx.store).expect("seed store");
        ctx
    }

    /// Fresh store with nothing written yet.
    #[must_use]
    pub fn empty() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let store = FileStore::new(dir.path().join("technova-data.json"));
        Self {
            _dir: dir,
            store,
            clock: FixedClock(test_time()),
        }
    }

    #[must_use]
    pub fn storefront(&self) -> Storefront<'_> {
        Storefront::new(&self.store, &self.clock)
    }

    /// A second handle on the same document, as a new process would open it.
    #[must_use]
    pub fn reopen(&self) -> FileStore {
        FileStore::new(self.data_file())
    }

    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        self.store.path().to_path_buf()
    }

    /// Register `email` as a customer and leave it signed in.
    pub fn sign_up_customer(&self, email: &str) -> Account {
        self.storefront()
            .accounts()
            .sign_up(customer_form(email, "clave1"))
            .expect("sign up customer")
    }

    /// Sign in as the seeded administrator.
    pub fn login_admin(&self) -> Account {
        self.storefront()
            .accounts()
            .login(seed::DEFAULT_ADMIN_EMAIL, seed::DEFAULT_ADMIN_SECRET)
            .expect("admin login")
    }
}

/// A registration form that passes validation.
#[must_use]
pub fn customer_form(email: &str, secret: &str) -> NewAccount {
    NewAccount {
        id: "12345678K".to_string(),
        name: "Ana".to_string(),
        surname: "Soto".to_string(),
        email: email.to_string(),
        secret: secret.to_string(),
        address: "Av. Siempre Viva 742".to_string(),
    }
}

#[must_use]
pub fn test_time() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(TEST_MILLIS)
        .single()
        .expect("valid timestamp")
}
