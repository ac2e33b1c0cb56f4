//! Integration tests for `CampaignRepo`.

use phishtrack_db::models::campaign::CreateCampaign;
use phishtrack_db::models::victim::CreateVictim;
use phishtrack_db::repositories::{CampaignRepo, VictimRepo};
use sqlx::SqlitePool;

fn sample_campaign(campaign_id: &str, name: &str, total_targets: i64) -> CreateCampaign {
    CreateCampaign {
        campaign_id: campaign_id.to_string(),
        name: name.to_string(),
        description: Some("quarterly awareness exercise".to_string()),
        total_targets: Some(total_targets),
    }
}

fn tagged_victim(username: &str, campaign: &str) -> CreateVictim {
    CreateVictim {
        timestamp: Some("2026-06-01T09:00:00".to_string()),
        username: Some(username.to_string()),
        campaign: Some(campaign.to_string()),
        ..CreateVictim::default()
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn create_and_find_roundtrip(pool: SqlitePool) {
    CampaignRepo::create(&pool, &sample_campaign("camp1", "Q2 exercise", 50))
        .await
        .unwrap();

    let campaign = CampaignRepo::find_by_campaign_id(&pool, "camp1")
        .await
        .unwrap()
        .expect("campaign should exist");

    assert_eq!(campaign.name, "Q2 exercise");
    assert_eq!(campaign.total_targets, 50);
    assert_eq!(campaign.total_victims, 0);
    assert!(campaign.active);
    assert!(!campaign.created_at.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_campaign_id_is_rejected_and_row_untouched(pool: SqlitePool) {
    CampaignRepo::create(&pool, &sample_campaign("camp1", "original name", 10))
        .await
        .unwrap();

    let err = CampaignRepo::create(&pool, &sample_campaign("camp1", "imposter name", 999))
        .await
        .unwrap_err();
    assert!(CampaignRepo::is_duplicate(&err));

    let campaign = CampaignRepo::find_by_campaign_id(&pool, "camp1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(campaign.name, "original name");
    assert_eq!(campaign.total_targets, 10);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_orders_newest_first(pool: SqlitePool) {
    CampaignRepo::create(&pool, &sample_campaign("older", "Older", 0))
        .await
        .unwrap();
    CampaignRepo::create(&pool, &sample_campaign("newer", "Newer", 0))
        .await
        .unwrap();

    let campaigns = CampaignRepo::list(&pool).await.unwrap();
    assert_eq!(campaigns.len(), 2);
    assert!(
        campaigns[0].created_at >= campaigns[1].created_at,
        "expected newest creation time first"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn recount_matches_number_of_tagged_events(pool: SqlitePool) {
    CampaignRepo::create(&pool, &sample_campaign("camp1", "Q2 exercise", 100))
        .await
        .unwrap();

    for n in 0..4 {
        VictimRepo::insert(&pool, &tagged_victim(&format!("user{n}"), "camp1"))
            .await
            .unwrap();
        let total = CampaignRepo::recount_victims(&pool, "camp1").await.unwrap();
        assert_eq!(total, n + 1);
    }

    let campaign = CampaignRepo::find_by_campaign_id(&pool, "camp1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(campaign.total_victims, 4);
}

#[sqlx::test(migrations = "./migrations")]
async fn recount_ignores_events_from_other_campaigns(pool: SqlitePool) {
    CampaignRepo::create(&pool, &sample_campaign("camp1", "One", 10))
        .await
        .unwrap();
    CampaignRepo::create(&pool, &sample_campaign("camp2", "Two", 10))
        .await
        .unwrap();

    VictimRepo::insert(&pool, &tagged_victim("alice", "camp1")).await.unwrap();
    VictimRepo::insert(&pool, &tagged_victim("bob", "camp2")).await.unwrap();
    VictimRepo::insert(&pool, &tagged_victim("carol", "camp2")).await.unwrap();

    assert_eq!(CampaignRepo::recount_victims(&pool, "camp1").await.unwrap(), 1);
    assert_eq!(CampaignRepo::recount_victims(&pool, "camp2").await.unwrap(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn recount_for_unregistered_campaign_still_counts(pool: SqlitePool) {
    // Events may reference a campaign id that was never registered; the
    // count succeeds and the update simply touches no row.
    VictimRepo::insert(&pool, &tagged_victim("alice", "ghost")).await.unwrap();

    let total = CampaignRepo::recount_victims(&pool, "ghost").await.unwrap();
    assert_eq!(total, 1);
    assert!(CampaignRepo::find_by_campaign_id(&pool, "ghost")
        .await
        .unwrap()
        .is_none());
}
