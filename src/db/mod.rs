use crate::GuiError;
use crate::data::{CustomerEntry, ProductEntry};
use redb::{Database, ReadableTable, Table, TableDefinition, TypeName, Value};
use serde::{Deserialize, Serialize};
use std::any::type_name;
use std::fmt::Debug;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

const DB_FILE: &str = "alubill.redb";

pub(crate) const CUSTOMERS_TABLE: TableDefinition<&str, Bincode<CustomerEntry>> =
    TableDefinition::new("customers");
pub(crate) const PRODUCTS_TABLE: TableDefinition<&str, Bincode<ProductEntry>> =
    TableDefinition::new("products");

/// Reference data the document form can pick from.
pub(crate) trait Repository<T> {
    fn list(&self) -> Result<Vec<T>, GuiError>;
    fn add(&self, entry: &T) -> Result<(), GuiError>;
    /// Replaces the entry with the same id, which may have been renamed.
    fn update(&self, entry: &T) -> Result<(), GuiError>;
    fn remove(&self, id: &Uuid) -> Result<(), GuiError>;
}

pub(crate) trait Record: Debug + Clone + Serialize + for<'a> Deserialize<'a> + 'static {
    fn id(&self) -> Uuid;
    fn name(&self) -> &str;

    // name first, so iterating the table yields entries alphabetically
    fn key(&self) -> String {
        format!("{}_{}", self.name().to_lowercase(), self.id())
    }
}

impl Record for CustomerEntry {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Record for ProductEntry {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Opens or creates the database, fails if it is already open elsewhere.
pub(crate) fn open_db(data_folder: &Path) -> Result<Arc<Database>, GuiError> {
    let path = data_folder.join(DB_FILE);

    let db = Database::create(path).map_err(|e| GuiError::DatabaseError(e.to_string()))?;
    let write_txn = db
        .begin_write()
        .map_err(|e| GuiError::DatabaseError(e.to_string()))?;
    write_txn
        .open_table(CUSTOMERS_TABLE)
        .map_err(|e| GuiError::DatabaseError(e.to_string()))?;
    write_txn
        .open_table(PRODUCTS_TABLE)
        .map_err(|e| GuiError::DatabaseError(e.to_string()))?;
    write_txn
        .commit()
        .map_err(|e| GuiError::DatabaseError(e.to_string()))?;

    Ok(Arc::new(db))
}

pub(crate) struct Store<T: Record> {
    db: Arc<Database>,
    table: TableDefinition<'static, &'static str, Bincode<T>>,
}

impl<T: Record> Store<T> {
    pub(crate) fn new(
        db: Arc<Database>,
        table: TableDefinition<'static, &'static str, Bincode<T>>,
    ) -> Self {
        Self { db, table }
    }
}

impl<T: Record> Repository<T> for Store<T> {
    fn list(&self) -> Result<Vec<T>, GuiError> {
        let table = self
            .db
            .begin_read()
            .map_err(|e| GuiError::DatabaseError(e.to_string()))?
            .open_table(self.table)
            .map_err(|e| GuiError::DatabaseError(e.to_string()))?;

        let iter = table
            .iter()
            .map_err(|e| GuiError::DatabaseError(e.to_string()))?;

        Ok(iter.filter_map(|r| r.map(|v| v.1.value()).ok()).collect())
    }

    fn add(&self, entry: &T) -> Result<(), GuiError> {
        let key = entry.key();
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| GuiError::DatabaseError(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(self.table)
                .map_err(|e| GuiError::DatabaseError(e.to_string()))?;

            table
                .insert(key.as_str(), entry)
                .map_err(|e| GuiError::DatabaseError(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| GuiError::DatabaseError(e.to_string()))
    }

    fn update(&self, entry: &T) -> Result<(), GuiError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| GuiError::DatabaseError(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(self.table)
                .map_err(|e| GuiError::DatabaseError(e.to_string()))?;

            // the key contains the name, so a renamed entry gets a new key
            let old_key = find_key(&table, &entry.id())?.ok_or_else(|| {
                GuiError::DatabaseError(format!(
                    "Entry {} does not exist and can't be updated.",
                    entry.id()
                ))
            })?;
            table
                .remove(old_key.as_str())
                .map_err(|e| GuiError::DatabaseError(e.to_string()))?;
            table
                .insert(entry.key().as_str(), entry)
                .map_err(|e| GuiError::DatabaseError(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| GuiError::DatabaseError(e.to_string()))
    }

    fn remove(&self, id: &Uuid) -> Result<(), GuiError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| GuiError::DatabaseError(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(self.table)
                .map_err(|e| GuiError::DatabaseError(e.to_string()))?;

            let key = find_key(&table, id)?.ok_or_else(|| {
                GuiError::DatabaseError(format!("Entry {id} does not exist and can't be deleted."))
            })?;

            table
                .remove(key.as_str())
                .map_err(|e| GuiError::DatabaseError(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| GuiError::DatabaseError(e.to_string()))
    }
}

fn find_key<T: Record>(
    table: &Table<'_, &'static str, Bincode<T>>,
    id: &Uuid,
) -> Result<Option<String>, GuiError> {
    Ok(table
        .iter()
        .map_err(|e| GuiError::DatabaseError(e.to_string()))?
        .filter_map(|r| r.ok())
        .find(|(_, v)| v.value().id() == *id)
        .map(|(k, _)| k.value().to_owned()))
}

/// Keeps everything in memory, used in place of the database in tests.
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct MemoryStore<T> {
    entries: std::sync::Mutex<Vec<T>>,
}

#[cfg(test)]
impl<T> MemoryStore<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(vec![]),
        }
    }
}

#[cfg(test)]
impl<T: Record> Repository<T> for MemoryStore<T> {
    fn list(&self) -> Result<Vec<T>, GuiError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| GuiError::DatabaseError(e.to_string()))?
            .clone();
        entries.sort_by_key(|e| e.key());
        Ok(entries)
    }

    fn add(&self, entry: &T) -> Result<(), GuiError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| GuiError::DatabaseError(e.to_string()))?;
        // same key semantics as the database, the key holds name and id
        entries.retain(|e| e.key() != entry.key());
        entries.push(entry.clone());
        Ok(())
    }

    fn update(&self, entry: &T) -> Result<(), GuiError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| GuiError::DatabaseError(e.to_string()))?;
        match entries.iter_mut().find(|e| e.id() == entry.id()) {
            None => Err(GuiError::DatabaseError(format!(
                "Entry {} does not exist and can't be updated.",
                entry.id()
            ))),
            Some(existing) => {
                *existing = entry.clone();
                Ok(())
            }
        }
    }

    fn remove(&self, id: &Uuid) -> Result<(), GuiError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| GuiError::DatabaseError(e.to_string()))?;
        match entries.iter().position(|e| e.id() == *id) {
            None => Err(GuiError::DatabaseError(format!(
                "Entry {id} does not exist and can't be deleted."
            ))),
            Some(idx) => {
                entries.remove(idx);
                Ok(())
            }
        }
    }
}

#[derive(Debug)]
pub struct Bincode<T>(pub T);

impl<T> Value for Bincode<T>
where
    T: Debug + Serialize + for<'a> Deserialize<'a>,
{
    type SelfType<'a>
        = T
    where
        Self: 'a;
    type AsBytes<'a>
        = Vec<u8>
    where
        Self: 'a;

    fn as_bytes<'a, 'b: 'a>(value: &'a Self::SelfType<'b>) -> Self::AsBytes<'a>
    where
        Self: 'a,
        Self: 'b,
    {
        bincode::serialize(value).expect("can serialize with bincode")
    }

    fn fixed_width() -> Option<usize> {
        None
    }

    fn from_bytes<'a>(data: &'a [u8]) -> Self::SelfType<'a>
    where
        Self: 'a,
    {
        bincode::deserialize(data).expect("can deserialize using bincode")
    }

    fn type_name() -> redb::TypeName {
        TypeName::new(&format!("Bincode<{}>", type_name::<T>()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn temp_db() -> Arc<Database> {
        let dir = std::env::temp_dir().join(format!("alubill-test-{}", Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        open_db(&dir).unwrap()
    }

    fn customer(name: &str) -> CustomerEntry {
        CustomerEntry::new(name.into(), "01711111111".into(), String::default())
    }

    fn check_repository(repo: &impl Repository<CustomerEntry>) {
        assert!(repo.list().unwrap().is_empty());
        let karim = customer("Karim");
        let abdul = customer("abdul");
        repo.add(&karim).unwrap();
        repo.add(&abdul).unwrap();

        let names: Vec<String> = repo.list().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["abdul".to_owned(), "Karim".to_owned()]);

        repo.remove(&abdul.id).unwrap();
        assert_eq!(repo.list().unwrap(), vec![karim.clone()]);
        assert!(repo.remove(&abdul.id).is_err());

        // renaming moves the entry, it's not stored twice
        let renamed = CustomerEntry {
            name: String::from("Zaman"),
            ..karim.clone()
        };
        let bashir = customer("Bashir");
        repo.add(&bashir).unwrap();
        repo.update(&renamed).unwrap();
        assert_eq!(repo.list().unwrap(), vec![bashir.clone(), renamed.clone()]);

        // adding under an unchanged key overwrites, a new name is a new key
        repo.add(&renamed).unwrap();
        assert_eq!(repo.list().unwrap().len(), 2);
        let copy = CustomerEntry {
            name: String::from("Ahmed"),
            ..renamed.clone()
        };
        repo.add(&copy).unwrap();
        assert_eq!(repo.list().unwrap().len(), 3);

        assert!(repo.update(&abdul).is_err());
    }

    #[test]
    fn redb_store() {
        let store = Store::new(temp_db(), CUSTOMERS_TABLE);
        check_repository(&store);
    }

    #[test]
    fn memory_store() {
        check_repository(&MemoryStore::new());
    }

    #[test]
    fn products_keep_their_rate() {
        let store = Store::new(temp_db(), PRODUCTS_TABLE);
        let product = ProductEntry::new(
            "Sliding Window".into(),
            "5mm glass".into(),
            "sq.ft".into(),
            Decimal::new(5525, 2),
        );
        store.add(&product).unwrap();
        assert_eq!(store.list().unwrap(), vec![product]);
    }
}
