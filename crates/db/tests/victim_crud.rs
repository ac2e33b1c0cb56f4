//! Integration tests for `VictimRepo`.

use phishtrack_db::models::victim::CreateVictim;
use phishtrack_db::repositories::VictimRepo;
use sqlx::SqlitePool;

fn sample_victim(username: &str, timestamp: &str, campaign: Option<&str>) -> CreateVictim {
    CreateVictim {
        timestamp: Some(timestamp.to_string()),
        username: Some(username.to_string()),
        hostname: Some("HOST-1".to_string()),
        os: Some("linux".to_string()),
        os_version: Some("6.1".to_string()),
        workspace: Some("/home/dev/project".to_string()),
        vscode_version: Some("1.92.0".to_string()),
        event: Some("workspace_opened".to_string()),
        campaign: campaign.map(str::to_string),
        ip_address: Some("10.0.0.7".to_string()),
        user_agent: Some("curl/8.0".to_string()),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn insert_returns_strictly_increasing_ids(pool: SqlitePool) {
    let mut last = 0;
    for n in 0..5 {
        let id = VictimRepo::insert(&pool, &sample_victim("alice", &format!("2026-01-0{}", n + 1), None))
            .await
            .unwrap();
        assert!(id > last, "id {id} should be greater than {last}");
        last = id;
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn insert_stores_absent_fields_as_null(pool: SqlitePool) {
    let id = VictimRepo::insert(&pool, &CreateVictim::default()).await.unwrap();

    let victims = VictimRepo::list(&pool, None).await.unwrap();
    assert_eq!(victims.len(), 1);

    let victim = &victims[0];
    assert_eq!(victim.id, id);
    assert!(victim.timestamp.is_none());
    assert!(victim.username.is_none());
    assert!(victim.campaign.is_none());
    // The email flag always starts out false.
    assert!(!victim.email_sent);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_orders_by_timestamp_string_descending(pool: SqlitePool) {
    VictimRepo::insert(&pool, &sample_victim("first", "2026-01-01T08:00:00", None))
        .await
        .unwrap();
    VictimRepo::insert(&pool, &sample_victim("third", "2026-03-01T08:00:00", None))
        .await
        .unwrap();
    VictimRepo::insert(&pool, &sample_victim("second", "2026-02-01T08:00:00", None))
        .await
        .unwrap();

    let victims = VictimRepo::list(&pool, None).await.unwrap();
    let usernames: Vec<_> = victims
        .iter()
        .map(|v| v.username.as_deref().unwrap())
        .collect();
    assert_eq!(usernames, ["third", "second", "first"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_filters_by_campaign(pool: SqlitePool) {
    VictimRepo::insert(&pool, &sample_victim("alice", "2026-01-01", Some("camp1")))
        .await
        .unwrap();
    VictimRepo::insert(&pool, &sample_victim("bob", "2026-01-02", Some("camp2")))
        .await
        .unwrap();
    VictimRepo::insert(&pool, &sample_victim("carol", "2026-01-03", None))
        .await
        .unwrap();

    let camp1 = VictimRepo::list(&pool, Some("camp1")).await.unwrap();
    assert_eq!(camp1.len(), 1);
    assert_eq!(camp1[0].username.as_deref(), Some("alice"));

    let all = VictimRepo::list(&pool, None).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_unknown_campaign_returns_empty_not_error(pool: SqlitePool) {
    VictimRepo::insert(&pool, &sample_victim("alice", "2026-01-01", Some("camp1")))
        .await
        .unwrap();

    let victims = VictimRepo::list(&pool, Some("no-such-campaign")).await.unwrap();
    assert!(victims.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn mark_email_sent_flips_flag_once(pool: SqlitePool) {
    let id = VictimRepo::insert(&pool, &sample_victim("alice", "2026-01-01", None))
        .await
        .unwrap();

    let updated = VictimRepo::mark_email_sent(&pool, id).await.unwrap();
    assert!(updated);

    let victims = VictimRepo::list(&pool, None).await.unwrap();
    assert!(victims[0].email_sent);

    // Marking again is harmless and leaves the flag set.
    VictimRepo::mark_email_sent(&pool, id).await.unwrap();
    let victims = VictimRepo::list(&pool, None).await.unwrap();
    assert!(victims[0].email_sent);
}

#[sqlx::test(migrations = "./migrations")]
async fn mark_email_sent_unknown_id_is_noop(pool: SqlitePool) {
    let updated = VictimRepo::mark_email_sent(&pool, 9999).await.unwrap();
    assert!(!updated);
}
