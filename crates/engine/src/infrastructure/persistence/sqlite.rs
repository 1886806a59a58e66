//! SQLite-backed record storage.

use async_trait::async_trait;
use nftdb_domain::{Nft, NftId};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool};

use crate::infrastructure::ports::{BatchOp, NftBatch, NftRepo, RepoError};

const SELECT_COLUMNS: &str = r#"
    SELECT Id, CHP, ATK, ATK_XP, DEF, DEF_XP, SPD, SPD_XP,
           ATK_SPD, ATK_SPD_XP, ATK_SPD_C, ATK_SPD_C_XP,
           DEF_SPD_D, DEF_SPD_D_XP, ATK_SPD_S, ATK_SPD_S_XP,
           Type, Skill, SpriteSheetLink
    FROM NFTs
"#;

/// Ids bound per `IN (...)` lookup, well under SQLite's bound-variable limit.
const LOOKUP_CHUNK: usize = 500;

const INSERT_NFT: &str = r#"
    INSERT INTO NFTs (
        Id, CHP, ATK, ATK_XP, DEF, DEF_XP, SPD, SPD_XP,
        ATK_SPD, ATK_SPD_XP, ATK_SPD_C, ATK_SPD_C_XP,
        DEF_SPD_D, DEF_SPD_D_XP, ATK_SPD_S, ATK_SPD_S_XP,
        Type, Skill, SpriteSheetLink
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

const UPSERT_NFT: &str = r#"
    INSERT INTO NFTs (
        Id, CHP, ATK, ATK_XP, DEF, DEF_XP, SPD, SPD_XP,
        ATK_SPD, ATK_SPD_XP, ATK_SPD_C, ATK_SPD_C_XP,
        DEF_SPD_D, DEF_SPD_D_XP, ATK_SPD_S, ATK_SPD_S_XP,
        Type, Skill, SpriteSheetLink
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
    ON CONFLICT(Id) DO UPDATE SET
        CHP = excluded.CHP,
        ATK = excluded.ATK,
        ATK_XP = excluded.ATK_XP,
        DEF = excluded.DEF,
        DEF_XP = excluded.DEF_XP,
        SPD = excluded.SPD,
        SPD_XP = excluded.SPD_XP,
        ATK_SPD = excluded.ATK_SPD,
        ATK_SPD_XP = excluded.ATK_SPD_XP,
        ATK_SPD_C = excluded.ATK_SPD_C,
        ATK_SPD_C_XP = excluded.ATK_SPD_C_XP,
        DEF_SPD_D = excluded.DEF_SPD_D,
        DEF_SPD_D_XP = excluded.DEF_SPD_D_XP,
        ATK_SPD_S = excluded.ATK_SPD_S,
        ATK_SPD_S_XP = excluded.ATK_SPD_S_XP,
        Type = excluded.Type,
        Skill = excluded.Skill,
        SpriteSheetLink = excluded.SpriteSheetLink
"#;

/// SQLite implementation of the record store.
pub struct SqliteNftRepo {
    pool: SqlitePool,
}

impl SqliteNftRepo {
    /// Open (creating if needed) the database file and ensure the table exists.
    pub async fn new(db_path: &str) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("connect", e))?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS NFTs (
                Id INTEGER NOT NULL PRIMARY KEY,
                CHP INTEGER NOT NULL DEFAULT 0,
                ATK INTEGER NOT NULL DEFAULT 0,
                ATK_XP REAL NOT NULL DEFAULT 0,
                DEF INTEGER NOT NULL DEFAULT 0,
                DEF_XP REAL NOT NULL DEFAULT 0,
                SPD INTEGER NOT NULL DEFAULT 0,
                SPD_XP REAL NOT NULL DEFAULT 0,
                ATK_SPD INTEGER NOT NULL DEFAULT 0,
                ATK_SPD_XP REAL NOT NULL DEFAULT 0,
                ATK_SPD_C INTEGER NOT NULL DEFAULT 0,
                ATK_SPD_C_XP REAL NOT NULL DEFAULT 0,
                DEF_SPD_D INTEGER NOT NULL DEFAULT 0,
                DEF_SPD_D_XP REAL NOT NULL DEFAULT 0,
                ATK_SPD_S INTEGER NOT NULL DEFAULT 0,
                ATK_SPD_S_XP REAL NOT NULL DEFAULT 0,
                Type TEXT NOT NULL DEFAULT '',
                Skill INTEGER NOT NULL DEFAULT 0,
                SpriteSheetLink TEXT NOT NULL DEFAULT ''
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("create_nfts_table", e))?;

        Ok(Self { pool })
    }

    async fn apply(&self, batch: NftBatch) -> Result<(), RepoError> {
        // Take the write lock before the guard read. A deferred transaction
        // would let two seeders pass the guard and fail the loser with
        // SQLITE_BUSY on its first insert.
        let mut tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(|e| RepoError::database("begin_batch", e))?;

        if batch.requires_empty_store() {
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM NFTs")
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| RepoError::database("count_nfts", e))?;
            if count > 0 {
                return Err(RepoError::constraint(format!(
                    "NFT store already holds {} records",
                    count
                )));
            }
        }

        for op in batch.into_ops() {
            match op {
                BatchOp::Insert(nft) => {
                    bind_nft(sqlx::query(INSERT_NFT), &nft)
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| insert_error(nft.id, e))?;
                }
                BatchOp::Upsert(nft) => {
                    bind_nft(sqlx::query(UPSERT_NFT), &nft)
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| RepoError::database("upsert_nft", e))?;
                }
            }
        }

        // Dropping `tx` on any early return above rolls the batch back.
        tx.commit()
            .await
            .map_err(|e| RepoError::database("commit_batch", e))
    }
}

#[async_trait]
impl NftRepo for SqliteNftRepo {
    async fn list_all(&self) -> Result<Vec<Nft>, RepoError> {
        let rows = sqlx::query(&format!("{} ORDER BY Id", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_nfts", e))?;

        rows.iter().map(row_to_nft).collect()
    }

    async fn get(&self, id: NftId) -> Result<Option<Nft>, RepoError> {
        let row = sqlx::query(&format!("{} WHERE Id = ?", SELECT_COLUMNS))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_nft", e))?;

        row.as_ref().map(row_to_nft).transpose()
    }

    async fn get_many(&self, ids: &[NftId]) -> Result<Vec<Nft>, RepoError> {
        let mut nfts = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(LOOKUP_CHUNK) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!("{} WHERE Id IN ({})", SELECT_COLUMNS, placeholders);

            let mut q = sqlx::query(&sql);
            for id in chunk {
                q = q.bind(id.get());
            }

            let rows = q
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::database("get_nfts", e))?;
            for row in &rows {
                nfts.push(row_to_nft(row)?);
            }
        }

        nfts.sort_by_key(|nft| nft.id.get());
        Ok(nfts)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM NFTs")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("count_nfts", e))?;
        Ok(count.max(0) as u64)
    }

    async fn commit(&self, batch: NftBatch) -> Result<(), RepoError> {
        if batch.is_empty() && !batch.requires_empty_store() {
            return Ok(());
        }
        self.apply(batch).await
    }
}

fn bind_nft<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    nft: &Nft,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    query
        .bind(nft.id.get())
        .bind(nft.chp)
        .bind(nft.atk)
        .bind(nft.atk_xp)
        .bind(nft.def)
        .bind(nft.def_xp)
        .bind(nft.spd)
        .bind(nft.spd_xp)
        .bind(nft.atk_spd)
        .bind(nft.atk_spd_xp)
        .bind(nft.atk_spd_c)
        .bind(nft.atk_spd_c_xp)
        .bind(nft.def_spd_d)
        .bind(nft.def_spd_d_xp)
        .bind(nft.atk_spd_s)
        .bind(nft.atk_spd_s_xp)
        .bind(nft.nft_type.clone())
        .bind(nft.skill)
        .bind(nft.sprite_sheet_link.clone())
}

fn row_to_nft(row: &SqliteRow) -> Result<Nft, RepoError> {
    let decode = |e: sqlx::Error| RepoError::database("decode_nft", e);

    Ok(Nft {
        id: NftId::new(row.try_get("Id").map_err(decode)?),
        chp: row.try_get("CHP").map_err(decode)?,
        atk: row.try_get("ATK").map_err(decode)?,
        atk_xp: row.try_get("ATK_XP").map_err(decode)?,
        def: row.try_get("DEF").map_err(decode)?,
        def_xp: row.try_get("DEF_XP").map_err(decode)?,
        spd: row.try_get("SPD").map_err(decode)?,
        spd_xp: row.try_get("SPD_XP").map_err(decode)?,
        atk_spd: row.try_get("ATK_SPD").map_err(decode)?,
        atk_spd_xp: row.try_get("ATK_SPD_XP").map_err(decode)?,
        atk_spd_c: row.try_get("ATK_SPD_C").map_err(decode)?,
        atk_spd_c_xp: row.try_get("ATK_SPD_C_XP").map_err(decode)?,
        def_spd_d: row.try_get("DEF_SPD_D").map_err(decode)?,
        def_spd_d_xp: row.try_get("DEF_SPD_D_XP").map_err(decode)?,
        atk_spd_s: row.try_get("ATK_SPD_S").map_err(decode)?,
        atk_spd_s_xp: row.try_get("ATK_SPD_S_XP").map_err(decode)?,
        nft_type: row.try_get("Type").map_err(decode)?,
        skill: row.try_get("Skill").map_err(decode)?,
        sprite_sheet_link: row.try_get("SpriteSheetLink").map_err(decode)?,
    })
}

fn insert_error(id: NftId, e: sqlx::Error) -> RepoError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => RepoError::conflict("Nft", id),
        _ => RepoError::database("insert_nft", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open_repo(dir: &tempfile::TempDir) -> SqliteNftRepo {
        let db_path = dir.path().join("nfts.db");
        SqliteNftRepo::new(&db_path.to_string_lossy())
            .await
            .expect("open sqlite repo")
    }

    fn nft(id: i32, chp: i32) -> Nft {
        Nft {
            chp,
            atk: 11,
            atk_xp: 0.25,
            def_spd_d_xp: 0.875,
            nft_type: "4".to_string(),
            skill: 6,
            sprite_sheet_link: format!("https://www.google.com/{}", id),
            ..Nft::new(NftId::new(id))
        }
    }

    #[tokio::test]
    async fn upsert_all_then_get_many_returns_equal_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;
        let records = vec![nft(2, 20), nft(6, 60), nft(9, 90)];

        repo.upsert_all(&records).await.expect("upsert");

        let ids = [NftId::new(2), NftId::new(6), NftId::new(9)];
        let fetched = repo.get_many(&ids).await.expect("get_many");
        assert_eq!(fetched, records);
    }

    #[tokio::test]
    async fn upsert_replaces_existing_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;
        repo.upsert_all(&[nft(3, 10)]).await.expect("first upsert");

        let mut changed = nft(3, 1000);
        changed.nft_type = "9".to_string();
        repo.upsert_all(std::slice::from_ref(&changed))
            .await
            .expect("second upsert");

        assert_eq!(repo.get(NftId::new(3)).await.expect("get"), Some(changed));
        assert_eq!(repo.count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn duplicate_insert_rolls_back_whole_batch() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;
        repo.upsert_all(&[nft(1, 10)]).await.expect("seed");

        let mut batch = NftBatch::new();
        batch.insert(nft(50, 5));
        batch.insert(nft(1, 99));
        let err = repo.commit(batch).await.unwrap_err();

        assert!(matches!(err, RepoError::Conflict { .. }));
        assert_eq!(repo.get(NftId::new(50)).await.expect("get"), None);
        assert_eq!(
            repo.get(NftId::new(1)).await.expect("get").map(|n| n.chp),
            Some(10)
        );
    }

    #[tokio::test]
    async fn empty_store_guard_blocks_second_seed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;

        let mut first = NftBatch::new().only_if_empty();
        first.insert(nft(0, 1));
        repo.commit(first).await.expect("first seed");

        let mut second = NftBatch::new().only_if_empty();
        second.insert(nft(1, 1));
        let err = repo.commit(second).await.unwrap_err();

        assert!(matches!(err, RepoError::ConstraintViolation(_)));
        assert_eq!(repo.count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let repo = open_repo(&dir).await;
            repo.upsert_all(&[nft(7, 70)]).await.expect("upsert");
        }

        let repo = open_repo(&dir).await;
        assert_eq!(repo.list_all().await.expect("list"), vec![nft(7, 70)]);
    }

    #[tokio::test]
    async fn unknown_ids_are_omitted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;
        repo.upsert_all(&[nft(2, 1)]).await.expect("upsert");

        let fetched = repo
            .get_many(&[NftId::new(2), NftId::new(404)])
            .await
            .expect("get_many");
        assert_eq!(fetched.len(), 1);
        assert!(repo.get_many(&[]).await.expect("empty").is_empty());
        assert_eq!(repo.get(NftId::new(404)).await.expect("get"), None);
    }

    #[tokio::test]
    async fn get_many_handles_more_ids_than_sqlite_can_bind() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;
        let records: Vec<Nft> = (0..40_000).map(|id| Nft::new(NftId::new(id))).collect();
        repo.upsert_all(&records).await.expect("upsert");

        let ids: Vec<NftId> = (0..40_000).rev().map(NftId::new).collect();
        let fetched = repo.get_many(&ids).await.expect("get_many");

        assert_eq!(fetched.len(), 40_000);
        assert_eq!(fetched.first().map(|n| n.id.get()), Some(0));
        assert_eq!(fetched.last().map(|n| n.id.get()), Some(39_999));
    }

    #[tokio::test]
    async fn concurrent_seeds_on_one_file_write_exactly_once() {
        use crate::infrastructure::config::SeedConfig;
        use crate::infrastructure::random::SystemRandom;
        use crate::use_cases::nfts::{SeedNfts, SeedOutcome};
        use std::sync::Arc;

        for round in 0..20 {
            let dir = tempfile::tempdir().expect("tempdir");
            let seeder = |repo: SqliteNftRepo| {
                SeedNfts::new(
                    Arc::new(repo),
                    Arc::new(SystemRandom::new()),
                    SeedConfig {
                        count: 100,
                        sprite_base_url: "https://sprites.test/".to_string(),
                    },
                )
            };
            let first = seeder(open_repo(&dir).await);
            let second = seeder(open_repo(&dir).await);

            let (a, b) = tokio::join!(first.execute(), second.execute());
            let mut outcomes = [
                a.unwrap_or_else(|e| panic!("round {round}: {e}")),
                b.unwrap_or_else(|e| panic!("round {round}: {e}")),
            ];
            outcomes.sort_by_key(|o| matches!(o, SeedOutcome::AlreadyPopulated));

            assert_eq!(
                outcomes,
                [SeedOutcome::Seeded(100), SeedOutcome::AlreadyPopulated],
                "round {round}"
            );
            assert_eq!(open_repo(&dir).await.count().await.expect("count"), 100);
        }
    }
}
