use std::{
    fs::{self, File},
    io::{self, Read, Write},
    path::Path,
};

use crate::catalog::Catalog;
use crate::users::UserDirectory;

lazy_static::lazy_static! {
    pub static ref DATA_DIR_PATH: String = configure_storage();
}

pub const CATALOG_FILE_NAME: &str = "catalog.json";
pub const USERS_FILE_NAME: &str = "users.json";

pub fn configure_storage() -> String {
    if cfg!(test) {
        String::from("./data/test/")
    } else {
        String::from("./data/")
    }
}

/// `Storage` persists the catalog and the user directory as JSON documents
/// under the data directory. A missing file loads as an empty store; every
/// successful authoring or registration mutation is followed by a save.
pub struct Storage {}

impl Storage {
    /// read from a path to a Vec<u8>
    pub fn read(path: &str) -> io::Result<Vec<u8>> {
        let mut f = std::fs::File::open(path)?;
        let mut data = Vec::<u8>::new();
        f.read_to_end(&mut data)?;
        Ok(data)
    }

    pub fn write(data: &[u8], filename: &str) -> crate::Result<()> {
        fs::create_dir_all(DATA_DIR_PATH.clone())?;
        let mut buffer = File::create(filename)?;
        buffer.write_all(data)?;
        Ok(())
    }

    pub fn file_exists(filename: &str) -> bool {
        let path = Path::new(&filename);
        path.exists()
    }

    fn catalog_file_path() -> String {
        let mut filename = DATA_DIR_PATH.clone();
        filename.push_str(CATALOG_FILE_NAME);
        filename
    }

    fn users_file_path() -> String {
        let mut filename = DATA_DIR_PATH.clone();
        filename.push_str(USERS_FILE_NAME);
        filename
    }

    pub fn load_catalog_from_disk() -> crate::Result<Catalog> {
        let filename = Storage::catalog_file_path();
        if !Storage::file_exists(&filename) {
            return Ok(Catalog::new());
        }
        let bytes = Storage::read(&filename)?;
        let catalog = serde_json::from_slice(&bytes)?;
        Ok(catalog)
    }

    pub fn save_catalog_to_disk(catalog: &Catalog) -> crate::Result<()> {
        let bytes = serde_json::to_vec(catalog)?;
        Storage::write(&bytes, &Storage::catalog_file_path())
    }

    pub fn load_users_from_disk() -> crate::Result<UserDirectory> {
        let filename = Storage::users_file_path();
        if !Storage::file_exists(&filename) {
            return Ok(UserDirectory::new());
        }
        let bytes = Storage::read(&filename)?;
        let users = serde_json::from_slice(&bytes)?;
        Ok(users)
    }

    pub fn save_users_to_disk(users: &UserDirectory) -> crate::Result<()> {
        let bytes = serde_json::to_vec(users)?;
        Storage::write(&bytes, &Storage::users_file_path())
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::catalog::TestType;

    #[test]
    #[serial]
    fn test_catalog_round_trips_through_disk() {
        let mut catalog = Catalog::new();
        let branch = catalog.insert_branch(String::from("Civil Law"), String::new());
        catalog
            .insert_test(
                String::from("Contracts"),
                TestType::SingleChoice,
                branch.id,
                vec![],
            )
            .unwrap();

        Storage::save_catalog_to_disk(&catalog).unwrap();
        let loaded = Storage::load_catalog_from_disk().unwrap();
        assert_eq!(loaded.list_branches(), catalog.list_branches());
        assert_eq!(
            loaded.list_tests_by_branch(branch.id),
            catalog.list_tests_by_branch(branch.id)
        );

        // ids keep advancing from where the loaded catalog left off
        let mut loaded = loaded;
        let next = loaded.insert_branch(String::from("Criminal Law"), String::new());
        assert_eq!(next.id, branch.id + 1);

        fs::remove_file(Storage::catalog_file_path()).unwrap();
    }

    #[test]
    #[serial]
    fn test_missing_files_load_as_empty_stores() {
        if Storage::file_exists(&Storage::catalog_file_path()) {
            fs::remove_file(Storage::catalog_file_path()).unwrap();
        }
        if Storage::file_exists(&Storage::users_file_path()) {
            fs::remove_file(Storage::users_file_path()).unwrap();
        }

        let catalog = Storage::load_catalog_from_disk().unwrap();
        assert!(catalog.list_branches().is_empty());

        let users = Storage::load_users_from_disk().unwrap();
        assert!(users.find_user_by_username("alice").is_none());
    }

    #[test]
    #[serial]
    fn test_users_round_trip_through_disk() {
        let mut users = UserDirectory::new();
        users
            .insert_user_if_absent(String::from("alice"), String::from("digest"))
            .unwrap();

        Storage::save_users_to_disk(&users).unwrap();
        let loaded = Storage::load_users_from_disk().unwrap();
        assert_eq!(
            loaded.find_user_by_username("alice"),
            users.find_user_by_username("alice")
        );

        fs::remove_file(Storage::users_file_path()).unwrap();
    }
}
