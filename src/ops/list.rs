//! Folder-view listing

use crate::config::{create_client, S3Result, StoreConfig};
use crate::recent::{RecentStore, RecentlyDeletedSet};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FolderEntry {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileEntry {
    pub key: String,
    pub name: String,
    pub size: i64,
    pub last_modified: String,
    pub etag: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct FolderListing {
    pub folders: Vec<FolderEntry>,
    pub files: Vec<FileEntry>,
}

pub(crate) struct RawObject {
    pub key: String,
    pub size: i64,
    pub last_modified: String,
    pub etag: String,
}

/// List one level of the bucket as the UI shows it: sub-folders from the
/// delimiter's common prefixes, files from the direct children. Folders the
/// deleter recently removed are suppressed until the store's listing catches
/// up.
pub async fn list_folder<P: RecentStore>(
    config: &StoreConfig,
    recent: &RecentlyDeletedSet<P>,
    prefix: &str,
) -> S3Result<FolderListing> {
    let client = create_client(config)?;

    let mut request = client
        .list_objects_v2()
        .bucket(&config.bucket_name)
        .delimiter("/")
        .max_keys(1000);

    if !prefix.is_empty() {
        request = request.prefix(prefix);
    }

    let response = request.send().await?;

    let folders = response
        .common_prefixes()
        .iter()
        .filter_map(|p| p.prefix().map(str::to_string))
        .collect();

    let objects = response
        .contents()
        .iter()
        .filter_map(|obj| {
            let key = obj.key()?.to_string();
            Some(RawObject {
                key,
                size: obj.size().unwrap_or(0),
                last_modified: obj
                    .last_modified()
                    .map(|dt| dt.to_string())
                    .unwrap_or_default(),
                etag: obj.e_tag().unwrap_or_default().to_string(),
            })
        })
        .collect();

    Ok(build_listing(prefix, folders, objects, recent))
}

/// Shape one delimiter listing into folder and file entries. The prefix's own
/// marker object and anything nested below a sub-folder are dropped; names
/// are relative to the prefix.
pub(crate) fn build_listing<P: RecentStore>(
    prefix: &str,
    folders: Vec<String>,
    objects: Vec<RawObject>,
    recent: &RecentlyDeletedSet<P>,
) -> FolderListing {
    let folders = folders
        .into_iter()
        .filter(|key| !recent.contains(key))
        .map(|key| {
            let name = key
                .split('/')
                .filter(|segment| !segment.is_empty())
                .next_back()
                .unwrap_or_default()
                .to_string();
            FolderEntry { key, name }
        })
        .collect();

    let files = objects
        .into_iter()
        .filter_map(|obj| {
            if obj.key == prefix {
                return None;
            }
            let name = obj.key.strip_prefix(prefix)?.to_string();
            if name.contains('/') {
                return None;
            }
            Some(FileEntry {
                key: obj.key,
                name,
                size: obj.size,
                last_modified: obj.last_modified,
                etag: obj.etag,
            })
        })
        .collect();

    FolderListing { folders, files }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recent::MemoryStore;

    fn raw(key: &str) -> RawObject {
        RawObject {
            key: key.to_string(),
            size: 42,
            last_modified: "2024-03-05T14:30:00Z".to_string(),
            etag: "\"abc\"".to_string(),
        }
    }

    #[test]
    fn marker_and_nested_keys_are_dropped_from_the_file_view() {
        let recent = RecentlyDeletedSet::load(MemoryStore::default());
        let listing = build_listing(
            "docs/",
            vec!["docs/sub/".to_string()],
            vec![raw("docs/"), raw("docs/a.txt"), raw("docs/sub/c.txt")],
            &recent,
        );

        assert_eq!(listing.files.len(), 1);
        assert_eq!(listing.files[0].name, "a.txt");
        assert_eq!(listing.files[0].key, "docs/a.txt");
        assert_eq!(listing.folders.len(), 1);
        assert_eq!(listing.folders[0].name, "sub");
    }

    #[test]
    fn recently_deleted_folders_are_suppressed() {
        let mut recent = RecentlyDeletedSet::load(MemoryStore::default());
        recent.record("docs/old/");

        let listing = build_listing(
            "docs/",
            vec!["docs/old/".to_string(), "docs/new/".to_string()],
            Vec::new(),
            &recent,
        );

        assert_eq!(listing.folders.len(), 1);
        assert_eq!(listing.folders[0].key, "docs/new/");
    }

    #[test]
    fn root_listing_uses_whole_keys_as_names() {
        let recent = RecentlyDeletedSet::load(MemoryStore::default());
        let listing = build_listing(
            "",
            vec!["photos/".to_string()],
            vec![raw("readme.md")],
            &recent,
        );

        assert_eq!(listing.folders[0].name, "photos");
        assert_eq!(listing.files[0].name, "readme.md");
    }
}
