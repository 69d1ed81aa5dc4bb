//! File classification and display formatting
//!
//! Extension tables the UI uses to pick content types, icons and filter
//! categories, plus the human-readable size/date helpers.

use chrono::DateTime;
use serde::Serialize;

/// Lowercased extension of a filename. A name without a dot yields the whole
/// name, matching how the UI has always looked these up.
pub fn extension_of(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Content type for a filename, by extension.
pub fn content_type_for(filename: &str) -> &'static str {
    match extension_of(filename).as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "zip" => "application/zip",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}

/// Icon name for a file, preferring the MIME type when known.
pub fn icon_for(filename: &str, mime_type: Option<&str>) -> &'static str {
    if let Some(mime) = mime_type {
        if mime.starts_with("image/") {
            return "image";
        }
        if mime.starts_with("video/") {
            return "video";
        }
        if mime.starts_with("audio/") {
            return "music";
        }
        if mime.starts_with("text/") {
            return "file-text";
        }
        if mime.contains("pdf") {
            return "file-pdf";
        }
        if mime.contains("word") {
            return "file-word";
        }
        if mime.contains("excel") {
            return "file-excel";
        }
        if mime.contains("powerpoint") {
            return "file-powerpoint";
        }
        if mime.contains("zip") || mime.contains("compressed") {
            return "file-archive";
        }
    }

    match extension_of(filename).as_str() {
        "jpg" | "jpeg" | "png" | "gif" | "webp" | "svg" => "image",
        "pdf" => "file-pdf",
        "doc" | "docx" => "file-word",
        "xls" | "xlsx" => "file-excel",
        "ppt" | "pptx" => "file-powerpoint",
        "txt" => "file-text",
        "html" | "htm" | "css" | "js" | "json" | "xml" | "ts" | "py" | "java" | "cpp" | "c"
        | "cs" | "php" | "rb" | "go" | "swift" | "kt" => "code",
        "zip" | "rar" | "tar" | "gz" | "7z" => "file-archive",
        "mp3" | "wav" | "ogg" => "music",
        "mp4" | "avi" | "mov" | "wmv" | "webm" => "video",
        "folder" => "folder",
        _ => "file",
    }
}

/// Coarse category used by the UI's type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Video,
    Audio,
    Pdf,
    Text,
    Document,
    Archive,
    Other,
}

pub fn category_of(filename: &str, content_type: Option<&str>) -> FileCategory {
    let extension = extension_of(filename);
    let mime = content_type.unwrap_or_default();

    if mime.starts_with("image/")
        || matches!(
            extension.as_str(),
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "svg" | "bmp" | "tiff"
        )
    {
        return FileCategory::Image;
    }
    if mime.starts_with("video/")
        || matches!(
            extension.as_str(),
            "mp4" | "webm" | "mov" | "avi" | "wmv" | "flv" | "mkv"
        )
    {
        return FileCategory::Video;
    }
    if mime.starts_with("audio/")
        || matches!(
            extension.as_str(),
            "mp3" | "wav" | "ogg" | "flac" | "aac" | "m4a"
        )
    {
        return FileCategory::Audio;
    }
    if mime == "application/pdf" || extension == "pdf" {
        return FileCategory::Pdf;
    }
    if mime.starts_with("text/")
        || matches!(
            extension.as_str(),
            "txt" | "md" | "html" | "htm" | "css" | "js" | "json" | "xml" | "csv" | "ts" | "jsx"
                | "tsx"
        )
    {
        return FileCategory::Text;
    }
    if matches!(
        extension.as_str(),
        "doc" | "docx" | "xls" | "xlsx" | "ppt" | "pptx" | "odt" | "ods" | "odp"
    ) {
        return FileCategory::Document;
    }
    if matches!(extension.as_str(), "zip" | "rar" | "7z" | "tar" | "gz" | "bz2") {
        return FileCategory::Archive;
    }

    FileCategory::Other
}

/// Whether the UI can preview this file inline.
pub fn can_preview_inline(filename: &str, content_type: Option<&str>) -> bool {
    matches!(
        category_of(filename, content_type),
        FileCategory::Image | FileCategory::Video | FileCategory::Pdf | FileCategory::Text
    )
}

const SIZE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Human-readable size: two decimals, trailing zeros trimmed.
pub fn format_size(bytes: Option<i64>) -> String {
    let bytes = bytes.unwrap_or(0);
    if bytes <= 0 {
        return "0 B".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(SIZE_UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);

    let mut rendered = format!("{:.2}", value);
    if rendered.contains('.') {
        rendered = rendered
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string();
    }

    format!("{} {}", rendered, SIZE_UNITS[exponent])
}

/// Human-readable timestamp from the RFC 3339 strings listings carry.
/// Unparseable or empty input renders as "Unknown".
pub fn format_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%b %-d, %Y %H:%M").to_string(),
        Err(_) => "Unknown".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub name: String,
    pub path: String,
}

/// Breadcrumb trail for a path, starting at the bucket root.
pub fn breadcrumbs(path: &str) -> Vec<Breadcrumb> {
    let mut crumbs = vec![Breadcrumb {
        name: "Home".to_string(),
        path: String::new(),
    }];

    let mut current = String::new();
    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        current.push_str(segment);
        current.push('/');
        crumbs.push(Breadcrumb {
            name: segment.to_string(),
            path: current.clone(),
        });
    }

    crumbs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased_last_segment() {
        assert_eq!(extension_of("Photo.JPG"), "jpg");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of("README"), "readme");
    }

    #[test]
    fn content_type_lookup_falls_back_to_octet_stream() {
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("slides.pptx"),
            "application/vnd.openxmlformats-officedocument.presentationml.presentation");
        assert_eq!(content_type_for("data.bin"), "application/octet-stream");
    }

    #[test]
    fn icon_prefers_mime_type_over_extension() {
        assert_eq!(icon_for("weird.bin", Some("image/x-custom")), "image");
        assert_eq!(icon_for("main.rs", None), "file");
        assert_eq!(icon_for("main.go", None), "code");
        assert_eq!(icon_for("music.mp3", None), "music");
    }

    #[test]
    fn categories_cover_the_filter_buckets() {
        assert_eq!(category_of("a.jpeg", None), FileCategory::Image);
        assert_eq!(category_of("a.mkv", None), FileCategory::Video);
        assert_eq!(category_of("a.flac", None), FileCategory::Audio);
        assert_eq!(category_of("a.pdf", None), FileCategory::Pdf);
        assert_eq!(category_of("notes.md", None), FileCategory::Text);
        assert_eq!(category_of("a.odt", None), FileCategory::Document);
        assert_eq!(category_of("a.bz2", None), FileCategory::Archive);
        assert_eq!(category_of("a.exe", None), FileCategory::Other);
        assert_eq!(
            category_of("blob", Some("video/mp4")),
            FileCategory::Video
        );
    }

    #[test]
    fn sizes_trim_trailing_zeros() {
        assert_eq!(format_size(None), "0 B");
        assert_eq!(format_size(Some(0)), "0 B");
        assert_eq!(format_size(Some(512)), "512 B");
        assert_eq!(format_size(Some(1024)), "1 KB");
        assert_eq!(format_size(Some(1536)), "1.5 KB");
        assert_eq!(format_size(Some(1_572_864)), "1.5 MB");
        assert_eq!(format_size(Some(1_234_567)), "1.18 MB");
    }

    #[test]
    fn dates_render_or_fall_back_to_unknown() {
        assert_eq!(format_date("2024-03-05T14:30:00Z"), "Mar 5, 2024 14:30");
        assert_eq!(format_date(""), "Unknown");
        assert_eq!(format_date("not a date"), "Unknown");
    }

    #[test]
    fn breadcrumbs_build_progressive_paths() {
        let crumbs = breadcrumbs("a/b/");
        assert_eq!(crumbs.len(), 3);
        assert_eq!(crumbs[0].name, "Home");
        assert_eq!(crumbs[0].path, "");
        assert_eq!(crumbs[1].path, "a/");
        assert_eq!(crumbs[2].name, "b");
        assert_eq!(crumbs[2].path, "a/b/");
    }

    #[test]
    fn inline_preview_covers_viewable_categories() {
        assert!(can_preview_inline("a.png", None));
        assert!(can_preview_inline("a.txt", None));
        assert!(!can_preview_inline("a.zip", None));
    }
}
