//! Reloading stores from file-backed storage.
//!
//! Each test opens a store over a temporary directory, mutates it, drops it,
//! and opens a fresh store over the same directory, the way a page reload
//! rebuilds the cart from localStorage.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rust_decimal::Decimal;
use tempfile::TempDir;
use urithi_cart::{CartStore, FileStorage, Storage, StorageKeys, session};
use urithi_integration_tests::line;

fn open(dir: &TempDir) -> CartStore {
    let storage = FileStorage::new(dir.path()).unwrap();
    CartStore::open(Arc::new(storage), StorageKeys::default())
}

fn raw_cart(dir: &TempDir) -> String {
    let storage = FileStorage::new(dir.path()).unwrap();
    storage
        .get_item(&StorageKeys::default().cart)
        .unwrap()
        .unwrap_or_default()
}

#[test]
fn test_lines_survive_reload() {
    let dir = TempDir::new().unwrap();

    {
        let mut cart = open(&dir);
        cart.add_item(line("necklace", 12_500, 1).with_variant("gold"));
        cart.add_item(line("bracelet", 3_500, 2));
    }

    let cart = open(&dir);
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.subtotal(), Decimal::from(19_500));
    assert_eq!(
        cart.lines().first().and_then(|l| l.variant.as_deref()),
        Some("gold")
    );
}

#[test]
fn test_line_ids_are_stable_across_reload() {
    let dir = TempDir::new().unwrap();

    let ids: Vec<_> = {
        let mut cart = open(&dir);
        cart.add_item(line("a", 10, 1));
        cart.add_item(line("b", 10, 1));
        cart.lines().iter().map(|l| l.id.clone()).collect()
    };

    let mut cart = open(&dir);
    let reloaded: Vec<_> = cart.lines().iter().map(|l| l.id.clone()).collect();
    assert_eq!(ids, reloaded);

    // Ids from the previous process still address their lines.
    let first = ids.first().unwrap();
    assert!(cart.update_quantity(first, 4).is_some());
    assert_eq!(open(&dir).item_count(), 5);
}

#[test]
fn test_clear_persists_empty_list() {
    let dir = TempDir::new().unwrap();

    {
        let mut cart = open(&dir);
        cart.add_item(line("a", 10, 1));
        cart.clear();
    }

    assert_eq!(raw_cart(&dir), "[]");
    assert!(open(&dir).is_empty());
}

#[test]
fn test_corrupt_file_loads_empty_then_is_overwritten() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path()).unwrap();
    storage
        .set_item(&StorageKeys::default().cart, "{not json")
        .unwrap();

    let mut cart = open(&dir);
    assert!(cart.is_empty());

    cart.add_item(line("a", 10, 2));
    let persisted: serde_json::Value = serde_json::from_str(&raw_cart(&dir)).unwrap();
    assert_eq!(persisted.as_array().map(Vec::len), Some(1));
}

#[test]
fn test_storefront_json_with_numeric_prices_loads() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path()).unwrap();
    let legacy = r#"[
        {"id":"cart_1","productId":"1","name":"Maasai Beaded Necklace","price":12500,
         "image":"/img/necklace.jpg","quantity":1,"artisanId":"a1","artisanName":"Naserian"},
        {"id":"cart_2","productId":"2","name":"Kikuyu Beaded Bracelet","price":3500.5,
         "image":"","quantity":2,"artisanName":"Wanjiru","variant":"red"}
    ]"#;
    storage
        .set_item(&StorageKeys::default().cart, legacy)
        .unwrap();

    let cart = open(&dir);

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.subtotal(), Decimal::new(19_501, 0));
}

#[test]
fn test_duplicate_persisted_keys_are_merged() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path()).unwrap();
    let duplicated = r#"[
        {"id":"cart_1","productId":"P1","name":"Bowl","price":"100","quantity":1},
        {"id":"cart_2","productId":"P1","name":"Bowl","price":"100","quantity":2}
    ]"#;
    storage
        .set_item(&StorageKeys::default().cart, duplicated)
        .unwrap();

    let cart = open(&dir);

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines().first().map(|l| l.id.as_str()), Some("cart_1"));
    assert_eq!(cart.item_count(), 3);
}

#[test]
fn test_session_id_persists_and_regenerates_after_wipe() {
    let dir = TempDir::new().unwrap();

    let first = open(&dir).session_id();
    assert!(session::is_well_formed(first.as_str()));
    assert_eq!(open(&dir).session_id(), first);

    FileStorage::new(dir.path()).unwrap().clear().unwrap();

    let second = open(&dir).session_id();
    assert_ne!(first, second);
    assert!(session::is_well_formed(second.as_str()));
}

#[test]
fn test_custom_keys_isolate_carts() {
    let dir = TempDir::new().unwrap();
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(dir.path()).unwrap());
    let gifts = StorageKeys {
        cart: "urithi_gift_cart".to_string(),
        session: "urithi_gift_session".to_string(),
    };

    let mut main = CartStore::open(Arc::clone(&storage), StorageKeys::default());
    let mut gift = CartStore::open(Arc::clone(&storage), gifts.clone());
    main.add_item(line("a", 10, 1));
    gift.add_item(line("b", 10, 3));

    assert_eq!(open(&dir).item_count(), 1);
    assert_eq!(CartStore::open(storage, gifts).item_count(), 3);
}
