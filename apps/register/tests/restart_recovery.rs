//! A cart rung up through the console is still there after the register
//! restarts, and a checkout leaves an empty cart on disk.

use till_core::Money;
use till_register::console::run_console;
use till_register::state::{RegisterConfig, RegisterSession};

fn config(dir: &tempfile::TempDir) -> RegisterConfig {
    RegisterConfig {
        database_path: Some(dir.path().join("till.db")),
        ..RegisterConfig::default()
    }
}

async fn drive(session: &mut RegisterSession, script: &str) -> Vec<serde_json::Value> {
    let mut out = Vec::new();
    run_console(session, script.as_bytes(), &mut out).await.unwrap();

    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn cart_is_restored_after_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut session = RegisterSession::open(config(&dir)).await.unwrap();
    drive(
        &mut session,
        "add P1 10 Masala Chai\nadd P1 10 Masala Chai\nadd P2 15 Samosa\ndiscount 10%\ncustomer C-9 Ravi\nnotes no sugar\n",
    )
    .await;
    session.close().await;

    let mut session = RegisterSession::open(config(&dir)).await.unwrap();
    assert_eq!(session.cart().lines().len(), 2);
    assert_eq!(session.cart().total(), Money::from_cents(3717));
    assert_eq!(session.cart().notes(), "no sugar");
    assert_eq!(session.cart().customer().map(|c| c.id.as_str()), Some("C-9"));

    let docs = drive(&mut session, "checkout\n").await;
    assert_eq!(docs[0]["order"]["customerId"], "C-9");
    assert_eq!(docs[0]["order"]["discountPercentage"], 1000);
    session.close().await;

    let session = RegisterSession::open(config(&dir)).await.unwrap();
    assert!(session.cart().is_empty());
    session.close().await;
}

#[tokio::test]
async fn disabled_persistence_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let volatile = RegisterConfig {
        persist_cart: false,
        ..config(&dir)
    };

    let mut session = RegisterSession::open(volatile.clone()).await.unwrap();
    drive(&mut session, "add P1 10 Masala Chai\n").await;
    session.close().await;

    let session = RegisterSession::open(volatile).await.unwrap();
    assert!(session.cart().is_empty());
    assert!(!dir.path().join("till.db").exists());
    session.close().await;
}
