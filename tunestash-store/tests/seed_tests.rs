// End-to-end seeding tests: load the bundled JSON collections into a
// fresh in-memory store and verify the starter topology and wipe
// behavior.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use tunestash_store::seed::SEED_COMMENT_INSTANCE_ID;
use tunestash_store::{SeedData, Store};
use tunestash_types::{CommentType, LISTEN_TIME_FORMAT};

fn seeds_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("seeds")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn seeded_store() -> Store {
    init_tracing();
    let store = Store::in_memory().expect("in-memory store");
    let report = store.seed(&SeedData::load(seeds_dir()));
    assert!(report.complete(), "incomplete seed: {report:?}");
    store
}

fn seed_comment_instance() -> Uuid {
    SEED_COMMENT_INSTANCE_ID.parse().expect("seed instance id")
}

#[test]
fn seed_wires_starter_friendships() {
    let store = seeded_store();
    let friends = store.friends();
    let main_id = store.main_user_id();

    let of_main: Vec<String> = friends
        .friends_of(&main_id)
        .unwrap()
        .into_iter()
        .map(|u| u.name)
        .collect();
    assert_eq!(of_main, vec!["Bob LobLaw", "Sarah Connor"]);

    let sarah = store.users().get_by_name("Sarah Connor").unwrap().unwrap();
    let of_sarah: Vec<String> = friends
        .friends_of(&sarah.id)
        .unwrap()
        .into_iter()
        .map(|u| u.name)
        .collect();
    assert_eq!(of_sarah, vec!["Bob LobLaw", "Main User", "Peter Parker"]);

    assert!(store.is_friends_with_main_user(&sarah.id).unwrap());
    let vinny = store.users().get_by_name("Vinny Gambini").unwrap().unwrap();
    assert!(!store.is_friends_with_main_user(&vinny.id).unwrap());
}

#[test]
fn seed_wires_pending_follow_requests() {
    let store = seeded_store();
    let friends = store.friends();
    let main_id = store.main_user_id();

    let received: Vec<String> = friends
        .received_follow_requests(&main_id)
        .unwrap()
        .into_iter()
        .map(|u| u.name)
        .collect();
    assert_eq!(received, vec!["Peter Parker"]);

    let sent: Vec<String> = friends
        .sent_follow_requests(&main_id)
        .unwrap()
        .into_iter()
        .map(|u| u.name)
        .collect();
    assert_eq!(sent, vec!["Vinny Gambini"]);
}

#[test]
fn seed_leaves_sarahs_comment_on_bobs_adagio_listen() {
    let store = seeded_store();
    let sarah = store.users().get_by_name("Sarah Connor").unwrap().unwrap();

    let comments = store.comments().for_instance(&seed_comment_instance()).unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].user_id, sarah.id);
    assert_eq!(comments[0].kind, CommentType::Great);
    assert_eq!(
        comments[0].created_at.format(LISTEN_TIME_FORMAT).to_string(),
        "2020-12-01T10:01"
    );
}

#[test]
fn seeded_song_lookup_is_case_insensitive() {
    let store = seeded_store();
    assert!(store.songs().exists("Adagio").unwrap());
    assert!(store.songs().exists("adagio").unwrap());
    assert!(!store.songs().exists("Free Bird").unwrap());
}

#[test]
fn main_users_listens_come_back_newest_first() {
    let store = seeded_store();
    let listens: Vec<String> = store
        .instances()
        .recently_listened_by(&store.main_user_id())
        .unwrap()
        .into_iter()
        .map(|i| i.song_name)
        .collect();
    assert_eq!(listens, vec!["Thunderstruck", "Jolene", "Sandstorm"]);
}

#[test]
fn reseeding_a_seeded_store_changes_nothing() {
    let store = seeded_store();
    let report = store.seed(&SeedData::load(seeds_dir()));
    assert!(report.complete());

    assert_eq!(store.friends().friends_of(&store.main_user_id()).unwrap().len(), 2);
    assert_eq!(
        store.comments().for_instance(&seed_comment_instance()).unwrap().len(),
        1
    );
    assert_eq!(store.users().list_all().unwrap().len(), 5);
}

#[test]
fn empty_clears_entities_for_every_seeded_lookup() {
    let store = seeded_store();
    let main_id = store.main_user_id();
    let sarah = store.users().get_by_name("Sarah Connor").unwrap().unwrap();

    store.empty().unwrap();

    assert!(store.main_user().unwrap().is_none());
    assert!(store.users().get_by_id(&sarah.id).unwrap().is_none());
    assert!(store.users().list_all().unwrap().is_empty());
    assert!(!store.songs().exists("Adagio").unwrap());
    assert!(store.songs().get_by_name("Jolene").unwrap().is_none());
    assert!(store
        .instances()
        .get_by_id(&seed_comment_instance())
        .unwrap()
        .is_none());
    assert!(store.instances().recently_listened_by(&main_id).unwrap().is_empty());
    assert!(store.friends().friends_of(&main_id).unwrap().is_empty());
    assert!(store.friends().received_follow_requests(&main_id).unwrap().is_empty());
    assert!(store.reactions().stash_for_user(&main_id).unwrap().is_empty());
}

#[test]
fn empty_orphans_edge_and_comment_rows_rather_than_cascading() {
    let store = seeded_store();
    store.empty().unwrap();

    // comment rows survive the wipe; their instance is gone
    let orphaned = store.comments().for_instance(&seed_comment_instance()).unwrap();
    assert_eq!(orphaned.len(), 1);
}

#[test]
fn missing_seed_directory_fails_every_step_in_isolation() {
    init_tracing();
    let store = Store::in_memory().expect("in-memory store");
    let report = store.seed(&SeedData::load("/nonexistent/seeds"));

    assert!(!report.users_loaded);
    assert!(!report.songs_loaded);
    assert!(!report.instances_loaded);
    assert!(!report.genres_loaded);
    // wiring needs the named users, so it fails too
    assert!(!report.relationships_wired);
    assert!(!report.complete());
}

#[test]
fn seeded_genres_are_available_for_toggling() {
    let store = seeded_store();
    let main_id = store.main_user_id();
    let genres = store.genres();

    assert!(genres.get_by_name("Classical").unwrap().is_some());

    genres.toggle(&main_id, "Classical").unwrap();
    genres.toggle(&main_id, "Rock").unwrap();

    let toggled: Vec<String> = genres
        .toggled_by(&main_id)
        .unwrap()
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(toggled, vec!["Classical", "Rock"]);
}
