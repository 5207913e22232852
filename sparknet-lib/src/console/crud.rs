//! Generic typed CRUD over console collections

use super::Console;
use crate::backend::Query;
use crate::error::Error;
use crate::model::Collection;
use crate::model::Entity;
use crate::model::Record;
use crate::model::types::Status;

impl Console {
    /// Lists raw records of a collection, newest first.
    pub async fn list_records(&self, collection: Collection) -> Result<Vec<Record>, Error> {
        self.query_records(collection, &Query::new().newest_first())
            .await
    }

    /// Lists raw records matching a query.
    pub async fn query_records(
        &self,
        collection: Collection,
        query: &Query,
    ) -> Result<Vec<Record>, Error> {
        let id = self.config.collection_id(collection);
        self.store.list(id, query).await
    }

    /// Fetches one raw record.
    pub async fn get_record(&self, collection: Collection, id: &str) -> Result<Record, Error> {
        let collection = self.config.collection_id(collection);
        self.store.get(collection, id).await
    }

    /// Lists every entity of a type, newest first.
    pub async fn list<E: Entity>(&self) -> Result<Vec<E>, Error> {
        self.query(&Query::new().newest_first()).await
    }

    /// Lists entities matching a query.
    pub async fn query<E: Entity>(&self, query: &Query) -> Result<Vec<E>, Error> {
        self.query_records(E::COLLECTION, query)
            .await?
            .iter()
            .map(|record| E::from_record(record).map_err(Error::from))
            .collect()
    }

    pub async fn get<E: Entity>(&self, id: &str) -> Result<E, Error> {
        let collection = self.config.collection_id(E::COLLECTION);
        let record = self.store.get(collection, id).await?;
        Ok(E::from_record(&record)?)
    }

    /// Creates an entity and returns it with its assigned ID.
    pub async fn create<E: Entity>(&self, entity: &E) -> Result<E, Error> {
        let collection = self.config.collection_id(E::COLLECTION);
        let mut record = entity.to_record();
        if let Some(id) = entity.id() {
            record.set_id(id);
        }
        let created = self.store.create(collection, &record).await?;
        log::info!("Created {} in {collection}", created.id().unwrap_or("?"));
        Ok(E::from_record(&created)?)
    }

    /// Writes every field of an existing entity.
    pub async fn save<E: Entity>(&self, entity: &E) -> Result<E, Error> {
        let id = entity.id().ok_or_else(|| {
            Error::InvalidOperation(format!("cannot save unsaved {}", E::COLLECTION))
        })?;
        self.patch(id, &entity.to_record()).await
    }

    /// Writes only the fields present in `changes`.
    pub async fn patch<E: Entity>(&self, id: &str, changes: &Record) -> Result<E, Error> {
        let collection = self.config.collection_id(E::COLLECTION);
        let updated = self.store.update(collection, id, changes).await?;
        Ok(E::from_record(&updated)?)
    }

    /// Sets the `status` attribute of an entity.
    pub async fn update_status<E: Entity, S: Status>(&self, id: &str, status: S) -> Result<E, Error> {
        log::info!("Setting {} {id} to {}", E::COLLECTION, status.as_str());
        self.patch(id, &Record::new().set("status", status.as_str()))
            .await
    }

    pub async fn delete<E: Entity>(&self, id: &str) -> Result<(), Error> {
        let collection = self.config.collection_id(E::COLLECTION);
        self.store.delete(collection, id).await?;
        log::info!("Deleted {id} from {collection}");
        Ok(())
    }
}
