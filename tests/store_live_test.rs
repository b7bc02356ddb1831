//! Live vector-store tests
//!
//! These need a running Postgres with the pgvector extension and a
//! config.toml pointing at it, so they are ignored by default:
//!
//! ```text
//! cargo test --test store_live_test -- --ignored
//! ```

use mantamatch::config::AppConfig;
use mantamatch::database::Database;

const DIM: usize = 8;

fn unit_vector(hot: usize) -> Vec<f32> {
    let mut v = vec![0.0f32; DIM];
    v[hot] = 1.0;
    v
}

#[tokio::test]
#[ignore = "Requires Postgres with pgvector"]
async fn self_similarity_is_the_best_match() {
    let mut config = AppConfig::load().unwrap();
    config.embedding.dimension = DIM;

    let db = Database::from_config(&config).await.unwrap();
    db.init_schema(DIM).await.unwrap();

    let _ = db.insert_catalog_entry(900_001, Some("test-a"), None).await;
    let _ = db.insert_catalog_entry(900_002, Some("test-b"), None).await;

    let a = unit_vector(0);
    let b = unit_vector(1);
    db.upsert_embedding(900_001, &a).await.unwrap();
    db.upsert_embedding(900_002, &b).await.unwrap();

    let matches = db.match_embeddings(&a, 10, 1.0).await.unwrap();
    assert!(!matches.is_empty());
    assert_eq!(matches[0].pk_catalog_id, 900_001);
    assert!(matches[0].score > 0.999, "got {}", matches[0].score);

    // Sorted by descending score
    for pair in matches.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }

    db.delete_embedding(900_001).await.unwrap();
    db.delete_embedding(900_002).await.unwrap();
}

#[tokio::test]
#[ignore = "Requires Postgres with pgvector"]
async fn upsert_is_idempotent_per_catalog_id() {
    let config = AppConfig::load().unwrap();
    let db = Database::from_config(&config).await.unwrap();
    db.init_schema(DIM).await.unwrap();

    let _ = db.insert_catalog_entry(900_003, Some("test-c"), None).await;

    db.upsert_embedding(900_003, &unit_vector(2)).await.unwrap();
    // Overwrite with a different vector; the new one must win.
    db.upsert_embedding(900_003, &unit_vector(3)).await.unwrap();

    let matches = db.match_embeddings(&unit_vector(3), 1, 1.0).await.unwrap();
    assert_eq!(matches[0].pk_catalog_id, 900_003);
    assert!(matches[0].score > 0.999);

    db.delete_embedding(900_003).await.unwrap();
}

#[tokio::test]
#[ignore = "Requires Postgres with pgvector"]
async fn unknown_catalog_id_fails_with_persistence_error() {
    let config = AppConfig::load().unwrap();
    let db = Database::from_config(&config).await.unwrap();
    db.init_schema(DIM).await.unwrap();

    let err = db
        .upsert_embedding(-999_999, &unit_vector(0))
        .await
        .unwrap_err();
    assert!(matches!(err, mantamatch::MantaMatchError::Persistence(_)));
}
