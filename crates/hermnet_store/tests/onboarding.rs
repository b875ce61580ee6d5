//! First-run onboarding: mint an identity, seal its private key into the
//! store, and read it back after a simulated restart.

use std::path::{Path, PathBuf};

use hermnet_crypto::IdentityService;
use hermnet_store::{keystore::IDENTITY_ALIAS, vault::new_vault_salt, Store, Vault};
use uuid::Uuid;

fn temp_db_path() -> PathBuf {
    PathBuf::from(format!("/tmp/hermnet-onboarding-test-{}.db", Uuid::new_v4()))
}

fn remove_db(path: &Path) {
    let _ = std::fs::remove_file(path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}

#[tokio::test]
async fn onboarding_persists_identity_and_contacts() {
    let path = temp_db_path();
    let salt = new_vault_salt();
    let service = IdentityService::new();

    let identity = service.generate_identity().expect("generate identity");
    assert_eq!(identity.id.len(), 21);
    assert!(identity.id.starts_with("HNET-"));

    let store = Store::new(&path, Vault::new());
    store.init().await.expect("init store");
    store
        .vault()
        .unlock(b"a passphrase the user chose", &salt)
        .await
        .expect("unlock vault");

    store
        .put_sealed_key(IDENTITY_ALIAS, identity.private_key.as_bytes())
        .await
        .expect("seal identity key");

    let opened = store
        .open_sealed_key(IDENTITY_ALIAS)
        .await
        .expect("open sealed key")
        .expect("identity key present");
    assert_eq!(&opened[..], identity.private_key.as_bytes());

    // The contact vault works against the same store.
    let peer = service.generate_identity().expect("generate peer");
    store
        .put_contact("First peer", &peer.public_key)
        .await
        .expect("add contact");

    store.close().await;

    // Restart: same file, fresh handles, same password.
    let reopened = Store::new(&path, Vault::new());
    reopened.init().await.expect("re-init store");
    reopened
        .vault()
        .unlock(b"a passphrase the user chose", &salt)
        .await
        .expect("unlock again");

    let opened = reopened
        .open_sealed_key(IDENTITY_ALIAS)
        .await
        .expect("open after restart")
        .expect("identity key survived");
    assert_eq!(&opened[..], identity.private_key.as_bytes());

    let contacts = reopened.list_contacts().await.expect("list contacts");
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].public_key, peer.public_key);
    assert_eq!(
        reopened.find_contact(&peer.public_key).await.expect("find").expect("present").name,
        "First peer"
    );

    remove_db(&path);
}
