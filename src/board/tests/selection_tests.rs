//! Backend selection tests: per-call dispatch and principal isolation.

use super::support::{FlipAuth, draft};
use crate::board::{
    adapters::memory::InMemoryStore,
    domain::PrincipalId,
    ports::TaskStore,
    services::SelectingStore,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type MemStore = InMemoryStore<DefaultClock>;
type Harness = (Arc<MemStore>, Arc<MemStore>, Arc<FlipAuth>, SelectingStore<MemStore, MemStore, FlipAuth>);

#[fixture]
fn harness() -> Harness {
    let local = Arc::new(InMemoryStore::default());
    let remote = Arc::new(InMemoryStore::default());
    let auth = Arc::new(FlipAuth::signed_out());
    let store = SelectingStore::new(Arc::clone(&local), Arc::clone(&remote), Arc::clone(&auth));
    (local, remote, auth, store)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn signed_out_calls_land_on_the_local_backend(harness: Harness) {
    let (local, remote, _auth, store) = harness;

    store
        .create_task(draft("Device-only"))
        .await
        .expect("creation should succeed");

    assert_eq!(local.get_tasks().await.expect("read").len(), 1);
    assert!(remote.get_tasks().await.expect("read").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn signed_in_calls_land_on_the_remote_backend(harness: Harness) {
    let (local, remote, auth, store) = harness;
    auth.sign_in(PrincipalId::new());

    store
        .create_task(draft("Account-only"))
        .await
        .expect("creation should succeed");

    assert!(local.get_tasks().await.expect("read").is_empty());
    assert_eq!(remote.get_tasks().await.expect("read").len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn backends_stay_isolated_across_sign_in_and_out(harness: Harness) {
    let (_local, _remote, auth, store) = harness;

    let device_task = store
        .create_task(draft("Created signed out"))
        .await
        .expect("creation should succeed");

    auth.sign_in(PrincipalId::new());
    let visible_signed_in = store.get_tasks().await.expect("read should succeed");
    assert!(
        visible_signed_in
            .iter()
            .all(|task| task.id() != device_task.id()),
        "device task must not leak into the account backend"
    );

    let account_task = store
        .create_task(draft("Created signed in"))
        .await
        .expect("creation should succeed");

    auth.sign_out();
    let visible_signed_out = store.get_tasks().await.expect("read should succeed");
    assert!(
        visible_signed_out
            .iter()
            .any(|task| task.id() == device_task.id()),
        "device task reappears once signed out"
    );
    assert!(
        visible_signed_out
            .iter()
            .all(|task| task.id() != account_task.id()),
        "account task must not leak into the device backend"
    );
}
