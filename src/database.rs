//! The mongodb collection the catalog records are inserted into.

use mongodb::{
    Client, Collection,
    error::{ErrorKind, InsertManyError},
};
use tracing::{info, instrument};

use crate::{Error, catalog::FumoRecord, settings};

/// Mongodb error code for a unique index violation
const DUPLICATE_KEY: i32 = 11000;

/// Connection to the catalog collection. Meant to live for a single run
/// and to be closed with [Database::disconnect].
pub struct Database {
    client: Client,
    fumos: Collection<FumoRecord>,
}

impl Database {
    /// Sets up the database connection
    #[instrument(skip_all)]
    pub async fn connect(settings: &settings::Catalog) -> Result<Self, Error> {
        let uri = settings
            .mongo_uri
            .as_deref()
            .ok_or(Error::MissingSetting("catalog.mongo_uri"))?;

        let client = Client::with_uri_str(uri).await?;
        let fumos = client
            .database(&settings.database)
            .collection::<FumoRecord>(&settings.collection);
        info!("Connected to the database, using {}.{}", settings.database, settings.collection);

        Ok(Self { client, fumos })
    }

    /// Insert all records in one batch. Returns how many were inserted.
    ///
    /// The batch is ordered: a duplicate id stops it, records before the duplicate stay inserted.
    #[instrument(skip_all)]
    pub async fn insert_all(&self, records: &[FumoRecord]) -> Result<usize, Error> {
        if records.is_empty() {
            info!("Nothing to insert");
            return Ok(0);
        }

        match self.fumos.insert_many(records).await {
            Ok(result) => Ok(result.inserted_ids.len()),
            Err(err) => {
                let conflict = match err.kind.as_ref() {
                    ErrorKind::InsertMany(insert_error) => {
                        duplicate_conflict(insert_error.inserted_ids.len(), write_error_codes(insert_error))
                    }
                    _ => None,
                };
                Err(conflict.unwrap_or_else(|| err.into()))
            }
        }
    }

    /// Drop the whole collection
    #[instrument(skip_all)]
    pub async fn drop_collection(&self) -> Result<(), Error> {
        self.fumos.drop().await?;
        info!("Dropped collection {}", self.fumos.name());
        Ok(())
    }

    /// Shut down the connection
    pub async fn disconnect(self) {
        self.client.shutdown().await;
        info!("Database disconnected");
    }
}

fn write_error_codes(insert_error: &InsertManyError) -> Vec<i32> {
    insert_error
        .write_errors
        .iter()
        .flatten()
        .map(|write_error| write_error.code)
        .collect()
}

/// Turn the outcome of a failed batch into [Error::DuplicateRecords]
/// if at least one write error was a duplicate id
fn duplicate_conflict(inserted: usize, codes: impl IntoIterator<Item = i32>) -> Option<Error> {
    let duplicates = codes.into_iter().filter(|code| *code == DUPLICATE_KEY).count();
    (duplicates > 0).then_some(Error::DuplicateRecords { inserted, duplicates })
}
