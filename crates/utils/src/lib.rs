mod atomic_write;
mod copy_tree;
mod expand_zip;
mod file_names_in;
mod find_project_root;
mod fs_archive_store;
mod get_kit_config;
mod get_kit_dir;
mod remove_path;
mod sync_files;
mod walk_files;

pub use atomic_write::atomic_write;
pub use copy_tree::copy_tree;
pub use expand_zip::expand_zip;
pub use file_names_in::file_names_in;
pub use find_project_root::find_project_root;
pub use fs_archive_store::FsArchiveStore;
pub use get_kit_config::get_kit_config;
pub use get_kit_dir::{CONFIG_FILE_NAME, KIT_DIR_NAME, get_kit_dir};
pub use remove_path::remove_path;
pub use sync_files::{SyncOutcome, sync_files};
pub use walk_files::{WalkedFile, to_slash_path, walk_files};
