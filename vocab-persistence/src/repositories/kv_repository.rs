use anyhow::Result;
use sea_orm::{
    ActiveValue, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, sea_query::OnConflict,
};

use crate::entities::{kv_entries, prelude::*};

/// Namespaced JSON blobs, one row per namespace
#[derive(Clone)]
pub struct KeyValueRepository {
    db: DatabaseConnection,
}

impl KeyValueRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, namespace: &str) -> Result<Option<String>> {
        let entry = KvEntries::find_by_id(namespace.to_string())
            .one(&self.db)
            .await?;

        Ok(entry.map(|model| model.value))
    }

    /// Insert or overwrite the value stored under `namespace`
    pub async fn put(&self, namespace: &str, value: String) -> Result<()> {
        let entry = kv_entries::ActiveModel {
            namespace: ActiveValue::Set(namespace.to_string()),
            value: ActiveValue::Set(value),
            updated_at: ActiveValue::Set(chrono::Utc::now().into()),
        };

        KvEntries::insert(entry)
            .on_conflict(
                OnConflict::column(kv_entries::Column::Namespace)
                    .update_columns([kv_entries::Column::Value, kv_entries::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    /// Returns whether a row was removed
    pub async fn delete(&self, namespace: &str) -> Result<bool> {
        let result = KvEntries::delete_by_id(namespace.to_string())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn namespaces(&self) -> Result<Vec<String>> {
        let namespaces = KvEntries::find()
            .select_only()
            .column(kv_entries::Column::Namespace)
            .order_by_asc(kv_entries::Column::Namespace)
            .into_tuple::<String>()
            .all(&self.db)
            .await?;

        Ok(namespaces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_to_memory_database;
    use migration::{Migrator, MigratorTrait};

    async fn setup_test_db() -> KeyValueRepository {
        let db = connect_to_memory_database().await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        KeyValueRepository::new(db)
    }

    #[tokio::test]
    async fn test_missing_namespace_is_none() {
        let repo = setup_test_db().await;
        assert_eq!(repo.get("game-storage").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_is_last_write_wins() {
        let repo = setup_test_db().await;

        repo.put("settings-storage", r#"{"theme":"dark"}"#.to_string())
            .await
            .unwrap();
        repo.put("settings-storage", r#"{"theme":"light"}"#.to_string())
            .await
            .unwrap();

        let stored = repo.get("settings-storage").await.unwrap().unwrap();
        assert_eq!(stored, r#"{"theme":"light"}"#);
        assert_eq!(repo.namespaces().await.unwrap(), vec!["settings-storage"]);
    }

    #[tokio::test]
    async fn test_namespaces_are_independent() {
        let repo = setup_test_db().await;

        repo.put("vocab-game-storage", "1".to_string()).await.unwrap();
        repo.put("game-storage", "2".to_string()).await.unwrap();

        assert_eq!(
            repo.namespaces().await.unwrap(),
            vec!["game-storage", "vocab-game-storage"]
        );
        assert_eq!(repo.get("game-storage").await.unwrap().as_deref(), Some("2"));

        assert!(repo.delete("game-storage").await.unwrap());
        assert!(!repo.delete("game-storage").await.unwrap());
        assert_eq!(repo.get("game-storage").await.unwrap(), None);
        assert_eq!(
            repo.get("vocab-game-storage").await.unwrap().as_deref(),
            Some("1")
        );
    }
}
